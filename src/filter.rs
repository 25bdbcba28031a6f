use std::collections::BTreeSet;

use serde::Serialize;

use crate::types::{FilterCriteria, UsageRecord};

pub fn matches(record: &UsageRecord, criteria: &FilterCriteria) -> bool {
    criteria.model().is_none_or(|m| record.model == m)
        && criteria.kind().is_none_or(|k| record.kind == k)
}

/// Records satisfying `criteria`, in their original order.
pub fn filter(records: &[UsageRecord], criteria: &FilterCriteria) -> Vec<UsageRecord> {
    records
        .iter()
        .filter(|r| matches(r, criteria))
        .cloned()
        .collect()
}

/// Distinct selectable values for the model and type filters, sorted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FilterOptions {
    pub models: Vec<String>,
    pub types: Vec<String>,
}

impl FilterOptions {
    pub fn from_records(records: &[UsageRecord]) -> Self {
        let mut models = BTreeSet::new();
        let mut types = BTreeSet::new();
        for r in records {
            if !r.model.is_empty() {
                models.insert(r.model.as_str());
            }
            if !r.kind.is_empty() {
                types.insert(r.kind.as_str());
            }
        }
        Self {
            models: models.into_iter().map(String::from).collect(),
            types: types.into_iter().map(String::from).collect(),
        }
    }
}
