use tracing::{debug, warn};

use crate::aggregate::aggregate_with_report;
use crate::cost::PricingMap;
use crate::error::LoadError;
use crate::filter::{filter, FilterOptions};
use crate::pricing::PricingIndex;
use crate::source::{load_both, DataSource};
use crate::tabular;
use crate::types::{CostSeries, FilterCriteria, SkipReport, UsageRecord};
use crate::usage::parse_usage_rows;

/// The loaded, immutable datasets and the queries the presentation layer runs
/// against them. Holds no filter state: every query takes its criteria.
pub struct Dashboard {
    usages: Vec<UsageRecord>,
    pricing: PricingIndex,
    options: FilterOptions,
}

impl Dashboard {
    /// Fetch both datasets concurrently, then build. Either load failing fails the whole thing.
    pub fn load(usages: &dyn DataSource, pricing: &dyn DataSource) -> Result<Self, LoadError> {
        debug!(usages = %usages.describe(), pricing = %pricing.describe(), "loading datasets");
        let (usage_text, pricing_text) = load_both(usages, pricing)?;
        Ok(Self::from_texts(&usage_text, &pricing_text))
    }

    pub fn from_texts(usage_text: &str, pricing_text: &str) -> Self {
        let usages = parse_usage_rows(&tabular::parse(usage_text, true));
        let pricing = PricingIndex::build(&tabular::parse(pricing_text, true));
        Self::new(usages, pricing)
    }

    pub fn new(usages: Vec<UsageRecord>, pricing: PricingIndex) -> Self {
        let options = FilterOptions::from_records(&usages);
        debug!(
            records = usages.len(),
            priced_models = pricing.len(),
            "dataset loaded"
        );

        if pricing.is_empty() {
            warn!("pricing dataset has no usable rows");
        }

        let dashboard = Self {
            usages,
            pricing,
            options,
        };
        let unpriced = dashboard.unpriced_models();
        if !unpriced.is_empty() {
            warn!("No pricing data for: {}", unpriced.join(", "));
        }
        dashboard
    }

    /// Daily cost series over the records matching `criteria`.
    pub fn compute_series(&self, criteria: &FilterCriteria) -> CostSeries {
        self.compute_series_with_report(criteria).0
    }

    pub fn compute_series_with_report(&self, criteria: &FilterCriteria) -> (CostSeries, SkipReport) {
        if criteria.is_unconstrained() {
            return aggregate_with_report(&self.usages, &self.pricing);
        }
        let selected = filter(&self.usages, criteria);
        aggregate_with_report(&selected, &self.pricing)
    }

    /// Records matching `criteria`, in load order.
    pub fn records(&self, criteria: &FilterCriteria) -> Vec<UsageRecord> {
        filter(&self.usages, criteria)
    }

    pub fn options(&self) -> &FilterOptions {
        &self.options
    }

    pub fn available_models(&self) -> &[String] {
        &self.options.models
    }

    pub fn available_types(&self) -> &[String] {
        &self.options.types
    }

    pub fn unpriced_models(&self) -> Vec<String> {
        self.pricing.unpriced_models(&self.usages)
    }

    pub fn record_count(&self) -> usize {
        self.usages.len()
    }
}
