use serde::Serialize;

use crate::filter::FilterOptions;
use crate::types::{CostSeries, FilterCriteria};

pub const CHART_TITLE: &str = "Daily costs";

/// Everything a chart front-end needs: parallel labels/values, the active
/// filter, and the values each filter can take.
#[derive(Debug, Clone, Serialize)]
pub struct SeriesView {
    pub title: &'static str,
    pub labels: Vec<String>,
    pub values: Vec<f64>,
    pub total: f64,
    pub filter: FilterCriteria,
    pub models: Vec<String>,
    pub types: Vec<String>,
}

impl SeriesView {
    pub fn new(series: &CostSeries, filter: &FilterCriteria, options: &FilterOptions) -> Self {
        Self {
            title: CHART_TITLE,
            labels: series.labels(),
            values: series.values(),
            total: series.total(),
            filter: filter.clone(),
            models: options.models.clone(),
            types: options.types.clone(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}
