use chrono::NaiveDate;
use serde::Serialize;

/// A single metered usage event, as loaded from the usage dataset.
#[derive(Debug, Clone, PartialEq)]
pub struct UsageRecord {
    pub model: String,
    /// The CSV `type` column.
    pub kind: String,
    /// `None` when the raw date was empty or not a real calendar date.
    pub created_at: Option<NaiveDate>,
    pub input_units: f64,
    pub output_units: f64,
    /// Set when either unit column failed to parse and was read as zero.
    pub malformed_units: bool,
}

/// Total cost attributed to one calendar day.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DailyCostPoint {
    pub date: NaiveDate,
    pub total_cost: f64,
}

/// Daily cost points, strictly ascending by date with no duplicate days.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct CostSeries {
    points: Vec<DailyCostPoint>,
}

impl CostSeries {
    /// Build from points already sorted by date with unique days.
    /// Only the aggregator constructs series, from an ordered map.
    pub(crate) fn from_sorted(points: Vec<DailyCostPoint>) -> Self {
        debug_assert!(points.windows(2).all(|w| w[0].date < w[1].date));
        Self { points }
    }

    pub fn points(&self) -> &[DailyCostPoint] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Canonical `YYYY-MM-DD` labels, parallel to [`CostSeries::values`].
    pub fn labels(&self) -> Vec<String> {
        self.points()
            .iter()
            .map(|p| p.date.format("%Y-%m-%d").to_string())
            .collect()
    }

    pub fn values(&self) -> Vec<f64> {
        self.points().iter().map(|p| p.total_cost).collect()
    }

    pub fn total(&self) -> f64 {
        // `Sum for f64` starts at -0.0, which would print as "$-0.00".
        self.points.iter().fold(0.0, |acc, p| acc + p.total_cost)
    }
}

/// Optional model/type constraints. `None` or an empty string means "any".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FilterCriteria {
    pub model: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
}

impl FilterCriteria {
    pub fn new(model: Option<String>, kind: Option<String>) -> Self {
        Self { model, kind }
    }

    /// The model constraint, with empty strings treated as absent.
    pub fn model(&self) -> Option<&str> {
        self.model.as_deref().filter(|m| !m.is_empty())
    }

    /// The type constraint, with empty strings treated as absent.
    pub fn kind(&self) -> Option<&str> {
        self.kind.as_deref().filter(|k| !k.is_empty())
    }

    pub fn is_unconstrained(&self) -> bool {
        self.model().is_none() && self.kind().is_none()
    }
}

/// What the aggregator did with each record it was handed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SkipReport {
    /// Records that contributed cost to the series.
    pub priced: usize,
    /// Excluded: no usable `created_at`.
    pub missing_date: usize,
    /// Excluded: model absent from the pricing index.
    pub unpriced: usize,
    /// Included, but with at least one unit column read as zero.
    pub malformed_units: usize,
}

impl SkipReport {
    pub fn skipped(&self) -> usize {
        self.missing_date + self.unpriced
    }
}
