use chrono::NaiveDate;

use crate::tabular::Row;
use crate::types::UsageRecord;

pub const USAGE_COLUMNS: &[&str] = &["model", "type", "created_at", "usage_input", "usage_output"];

/// Convert parsed usage rows into records. Never fails: bad dates become
/// `None`, bad unit counts become zero and flag the record.
pub fn parse_usage_rows(rows: &[Row]) -> Vec<UsageRecord> {
    rows.iter().map(parse_usage_row).collect()
}

fn parse_usage_row(row: &Row) -> UsageRecord {
    let (input_units, input_ok) = parse_units(field(row, "usage_input"));
    let (output_units, output_ok) = parse_units(field(row, "usage_output"));

    UsageRecord {
        model: field(row, "model").to_string(),
        kind: field(row, "type").to_string(),
        created_at: normalize_date(field(row, "created_at")),
        input_units,
        output_units,
        malformed_units: !(input_ok && output_ok),
    }
}

/// Turn a `day.month.year` token into a calendar date.
///
/// The dot-separated parts are reversed and read as year, month, day, so
/// `01.03.2024` becomes 2024-03-01. Unpadded parts are accepted. Anything
/// that isn't exactly three numeric parts forming a real date is `None`.
pub fn normalize_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    let mut parts = raw.split('.').rev();
    let year = parts.next()?.trim().parse::<i32>().ok()?;
    let month = parts.next()?.trim().parse::<u32>().ok()?;
    let day = parts.next()?.trim().parse::<u32>().ok()?;
    if parts.next().is_some() {
        return None;
    }

    NaiveDate::from_ymd_opt(year, month, day)
}

/// Convert a record back into a CSV row in the usage dataset's format.
pub fn to_row(record: &UsageRecord) -> Row {
    let created_at = record
        .created_at
        .map(|d| d.format("%d.%m.%Y").to_string())
        .unwrap_or_default();

    Row::from([
        ("model".to_string(), record.model.clone()),
        ("type".to_string(), record.kind.clone()),
        ("created_at".to_string(), created_at),
        ("usage_input".to_string(), record.input_units.to_string()),
        ("usage_output".to_string(), record.output_units.to_string()),
    ])
}

fn field<'a>(row: &'a Row, name: &str) -> &'a str {
    row.get(name).map(|s| s.trim()).unwrap_or("")
}

fn parse_units(raw: &str) -> (f64, bool) {
    match raw.parse::<f64>() {
        Ok(v) if v.is_finite() => (v, true),
        _ => (0.0, false),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tabular;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn reverses_day_month_year() {
        assert_eq!(normalize_date("01.03.2024"), Some(date(2024, 3, 1)));
        assert_eq!(normalize_date("1.3.2024"), Some(date(2024, 3, 1)));
        assert_eq!(normalize_date(" 31.12.2023 "), Some(date(2023, 12, 31)));
    }

    #[test]
    fn rejects_impossible_or_malformed_dates() {
        assert_eq!(normalize_date(""), None);
        assert_eq!(normalize_date("31.02.2024"), None);
        assert_eq!(normalize_date("2024-03-01"), None);
        assert_eq!(normalize_date("03.2024"), None);
        assert_eq!(normalize_date("01.03.2024.5"), None);
        assert_eq!(normalize_date("aa.bb.cccc"), None);
    }

    #[test]
    fn parses_rows_into_records() {
        let text = "model,type,created_at,usage_input,usage_output\n\
                    gpt-4,chat,01.03.2024,100,50\n";
        let records = parse_usage_rows(&tabular::parse(text, true));
        assert_eq!(records.len(), 1);
        let r = &records[0];
        assert_eq!(r.model, "gpt-4");
        assert_eq!(r.kind, "chat");
        assert_eq!(r.created_at, Some(date(2024, 3, 1)));
        assert_eq!(r.input_units, 100.0);
        assert_eq!(r.output_units, 50.0);
        assert!(!r.malformed_units);
    }

    #[test]
    fn malformed_units_read_as_zero_and_flag_the_record() {
        let text = "model,type,created_at,usage_input,usage_output\n\
                    gpt-4,chat,01.03.2024,lots,50\n\
                    gpt-4,chat,,10,\n";
        let records = parse_usage_rows(&tabular::parse(text, true));
        assert_eq!(records[0].input_units, 0.0);
        assert_eq!(records[0].output_units, 50.0);
        assert!(records[0].malformed_units);
        assert_eq!(records[1].created_at, None);
        assert_eq!(records[1].output_units, 0.0);
        assert!(records[1].malformed_units);
    }

    #[test]
    fn to_row_writes_the_dataset_format() {
        let record = UsageRecord {
            model: "gpt-4".into(),
            kind: "chat".into(),
            created_at: Some(date(2024, 3, 1)),
            input_units: 100.0,
            output_units: 2.5,
            malformed_units: false,
        };
        let row = to_row(&record);
        assert_eq!(row["created_at"], "01.03.2024");
        assert_eq!(row["usage_input"], "100");
        assert_eq!(row["usage_output"], "2.5");
        assert_eq!(parse_usage_rows(&[row])[0], record);
    }
}
