use std::collections::BTreeMap;

use chrono::NaiveDate;
use tracing::debug;

use crate::cost::PricingMap;
use crate::types::{CostSeries, DailyCostPoint, SkipReport, UsageRecord};

/// Sum per-record cost by calendar day.
///
/// Records without a date or without a price for their model are skipped.
/// Days with no priced usage are absent rather than zero.
pub fn aggregate(records: &[UsageRecord], pricing: &dyn PricingMap) -> CostSeries {
    aggregate_with_report(records, pricing).0
}

/// Like [`aggregate`], also reporting how many records were skipped and why.
pub fn aggregate_with_report(
    records: &[UsageRecord],
    pricing: &dyn PricingMap,
) -> (CostSeries, SkipReport) {
    // Keyed by date value so iteration order is chronological.
    let mut daily: BTreeMap<NaiveDate, Vec<f64>> = BTreeMap::new();
    let mut report = SkipReport::default();

    for r in records {
        let Some(date) = r.created_at else {
            report.missing_date += 1;
            debug!(model = %r.model, "skipping usage record without a date");
            continue;
        };

        let Some(cost) = pricing.cost_for_record(r) else {
            report.unpriced += 1;
            debug!(model = %r.model, %date, "skipping usage record with unpriced model");
            continue;
        };

        if r.malformed_units {
            report.malformed_units += 1;
        }
        report.priced += 1;
        daily.entry(date).or_default().push(cost);
    }

    let points = daily
        .into_iter()
        .map(|(date, costs)| DailyCostPoint {
            date,
            total_cost: order_independent_sum(costs),
        })
        .collect();

    (CostSeries::from_sorted(points), report)
}

/// Float addition isn't associative, so sum in a canonical order.
fn order_independent_sum(mut costs: Vec<f64>) -> f64 {
    costs.sort_by(f64::total_cmp);
    costs.into_iter().fold(0.0, |acc, c| acc + c)
}
