use std::collections::BTreeSet;

use crate::types::UsageRecord;

/// Per-unit pricing for a model.
#[derive(Debug, Clone, PartialEq)]
pub struct PriceEntry {
    pub model: String,
    pub cost_per_input_unit: f64,
    pub cost_per_output_unit: f64,
}

/// Trait for looking up pricing by model name.
pub trait PricingMap {
    fn get(&self, model: &str) -> Option<&PriceEntry>;

    /// Cost of one record, or `None` if its model has no price.
    fn cost_for_record(&self, r: &UsageRecord) -> Option<f64> {
        let p = self.get(&r.model)?;
        Some(p.cost_per_input_unit * r.input_units + p.cost_per_output_unit * r.output_units)
    }

    /// Models that appeared in records but have no pricing, sorted.
    fn unpriced_models(&self, records: &[UsageRecord]) -> Vec<String> {
        records
            .iter()
            .filter(|r| self.get(&r.model).is_none())
            .map(|r| r.model.clone())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    struct Fixed(HashMap<String, PriceEntry>);

    impl PricingMap for Fixed {
        fn get(&self, model: &str) -> Option<&PriceEntry> {
            self.0.get(model)
        }
    }

    fn record(model: &str, input: f64, output: f64) -> UsageRecord {
        UsageRecord {
            model: model.to_string(),
            kind: "chat".to_string(),
            created_at: None,
            input_units: input,
            output_units: output,
            malformed_units: false,
        }
    }

    fn pricing() -> Fixed {
        let entry = PriceEntry {
            model: "gpt-4".to_string(),
            cost_per_input_unit: 0.01,
            cost_per_output_unit: 0.02,
        };
        Fixed(HashMap::from([("gpt-4".to_string(), entry)]))
    }

    #[test]
    fn cost_is_input_plus_output_weighted() {
        let cost = pricing().cost_for_record(&record("gpt-4", 100.0, 50.0)).unwrap();
        assert!((cost - 2.0).abs() < 1e-12);
    }

    #[test]
    fn unknown_model_has_no_cost() {
        assert_eq!(pricing().cost_for_record(&record("mystery", 1.0, 1.0)), None);
    }

    #[test]
    fn unpriced_models_are_unique_and_sorted() {
        let records = vec![
            record("zeta", 1.0, 1.0),
            record("gpt-4", 1.0, 1.0),
            record("alpha", 1.0, 1.0),
            record("zeta", 1.0, 1.0),
        ];
        assert_eq!(pricing().unpriced_models(&records), vec!["alpha", "zeta"]);
    }
}
