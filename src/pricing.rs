use std::collections::HashMap;

use tracing::{debug, warn};

use crate::cost::{PriceEntry, PricingMap};
use crate::tabular::Row;

/// Read-only model → price lookup built from the pricing dataset.
#[derive(Debug, Clone, Default)]
pub struct PricingIndex {
    map: HashMap<String, PriceEntry>,
}

impl PricingMap for PricingIndex {
    fn get(&self, model: &str) -> Option<&PriceEntry> {
        self.map.get(model)
    }
}

impl PricingIndex {
    /// Build from rows with `model`, `input` and `output` columns.
    ///
    /// Rows whose costs don't parse as finite numbers are dropped with a
    /// warning. Later rows for the same model replace earlier ones.
    pub fn build(rows: &[Row]) -> Self {
        let mut map = HashMap::new();

        for row in rows {
            let model = field(row, "model");
            if model.is_empty() {
                debug!("skipping pricing row without a model");
                continue;
            }

            let input = field(row, "input");
            let Some(cost_per_input_unit) = parse_cost(input) else {
                warn!(model, value = input, "dropping pricing row: bad input cost");
                continue;
            };
            let output = field(row, "output");
            let Some(cost_per_output_unit) = parse_cost(output) else {
                warn!(model, value = output, "dropping pricing row: bad output cost");
                continue;
            };

            let entry = PriceEntry {
                model: model.to_string(),
                cost_per_input_unit,
                cost_per_output_unit,
            };
            if let Some(previous) = map.insert(model.to_string(), entry) {
                debug!(model = %previous.model, "duplicate pricing row, keeping the later one");
            }
        }

        Self { map }
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}

fn field<'a>(row: &'a Row, name: &str) -> &'a str {
    row.get(name).map(|s| s.trim()).unwrap_or("")
}

fn parse_cost(raw: &str) -> Option<f64> {
    raw.parse::<f64>().ok().filter(|v| v.is_finite())
}
