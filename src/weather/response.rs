//! Typed view of the provider response and the shape checks applied to it.

use crate::types::gdu_table::{DailySeries, DailyValue};
use crate::weather::error::ExtractionError;
use chrono::NaiveDate;
use log::warn;
use serde::Deserialize;
use serde_json::Value;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ResultSet {
    #[serde(default)]
    time_intervals: Vec<Vec<String>>,
    #[serde(default)]
    codes: Vec<CodeResult>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CodeResult {
    #[serde(default)]
    data_per_time_interval: Vec<IntervalData>,
}

#[derive(Debug, Deserialize)]
struct IntervalData {
    #[serde(default)]
    data: Vec<Vec<Option<f64>>>,
}

/// Parses the raw provider JSON into the daily series it describes.
///
/// Only the first result set, code, interval and location are read. The timestamp
/// and value lists must both be non-empty and of equal length.
pub fn parse_daily_series(raw: Value) -> Result<DailySeries, ExtractionError> {
    let result_sets =
        Vec::<ResultSet>::deserialize(raw).map_err(ExtractionError::UnexpectedShape)?;
    if result_sets.len() > 1 {
        warn!(
            "Response contains {} result sets, using the first",
            result_sets.len()
        );
    }

    let result_set = result_sets
        .into_iter()
        .next()
        .ok_or(ExtractionError::NoResultSet)?;

    let timestamps = result_set
        .time_intervals
        .into_iter()
        .next()
        .filter(|timestamps| !timestamps.is_empty())
        .ok_or(ExtractionError::MissingTimestamps)?;

    let values = result_set
        .codes
        .into_iter()
        .next()
        .and_then(|code| code.data_per_time_interval.into_iter().next())
        .and_then(|interval| interval.data.into_iter().next())
        .filter(|values| !values.is_empty())
        .ok_or(ExtractionError::MissingValues)?;

    if timestamps.len() != values.len() {
        return Err(ExtractionError::LengthMismatch {
            timestamps: timestamps.len(),
            values: values.len(),
        });
    }

    timestamps
        .into_iter()
        .zip(values)
        .map(|(timestamp, value)| {
            let date = parse_day(&timestamp)?;
            let value = value.ok_or(ExtractionError::MissingValue(timestamp))?;
            Ok(DailyValue { date, value })
        })
        .collect::<Result<Vec<_>, _>>()
        .map(DailySeries::new)
}

/// Reads the day from a `YYYYMMDD...` timestamp; the time of day is ignored.
fn parse_day(timestamp: &str) -> Result<NaiveDate, ExtractionError> {
    timestamp
        .get(..8)
        .and_then(|day| NaiveDate::parse_from_str(day, "%Y%m%d").ok())
        .ok_or_else(|| ExtractionError::InvalidTimestamp(timestamp.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn response(timestamps: Value, values: Value) -> Value {
        json!([{
            "geometry": { "type": "MultiPoint", "coordinates": [[-93.6, 42.0, 300.0]] },
            "timeIntervals": [timestamps],
            "codes": [{
                "code": 731,
                "unit": "GDD",
                "dataPerTimeInterval": [{ "data": [values] }]
            }]
        }])
    }

    #[test]
    fn test_parse_daily_series() {
        let raw = response(
            json!(["20230501T0000", "20230502T0000", "20230503T0000"]),
            json!([10.0, 12.5, 8.0]),
        );
        let series = parse_daily_series(raw).unwrap();
        assert_eq!(series.len(), 3);
        assert_eq!(
            series.values()[1],
            DailyValue {
                date: NaiveDate::from_ymd_opt(2023, 5, 2).unwrap(),
                value: 12.5,
            }
        );
    }

    #[test]
    fn test_plain_day_timestamps() {
        let raw = response(json!(["20231231", "20240101"]), json!([0, 1]));
        let series = parse_daily_series(raw).unwrap();
        assert_eq!(
            series.date_span(),
            Some((
                NaiveDate::from_ymd_opt(2023, 12, 31).unwrap(),
                NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()
            ))
        );
    }

    #[test]
    fn test_not_an_array() {
        let err = parse_daily_series(json!({ "error_message": "invalid apikey" })).unwrap_err();
        assert!(matches!(err, ExtractionError::UnexpectedShape(_)));
    }

    #[test]
    fn test_empty_array() {
        let err = parse_daily_series(json!([])).unwrap_err();
        assert!(matches!(err, ExtractionError::NoResultSet));
    }

    #[test]
    fn test_missing_keys() {
        let err = parse_daily_series(json!([{ "codes": [] }])).unwrap_err();
        assert!(matches!(err, ExtractionError::MissingTimestamps));

        let err = parse_daily_series(json!([{ "timeIntervals": [["20230501"]] }])).unwrap_err();
        assert!(matches!(err, ExtractionError::MissingValues));

        let err = parse_daily_series(json!([{
            "timeIntervals": [["20230501"]],
            "codes": [{ "dataPerTimeInterval": [{ "data": [] }] }]
        }]))
        .unwrap_err();
        assert!(matches!(err, ExtractionError::MissingValues));
    }

    #[test]
    fn test_length_mismatch() {
        let raw = response(json!(["20230501", "20230502"]), json!([1.0]));
        let err = parse_daily_series(raw).unwrap_err();
        assert!(matches!(
            err,
            ExtractionError::LengthMismatch {
                timestamps: 2,
                values: 1
            }
        ));
    }

    #[test]
    fn test_invalid_timestamp() {
        let raw = response(json!(["2023-05-01"]), json!([1.0]));
        let err = parse_daily_series(raw).unwrap_err();
        assert!(matches!(err, ExtractionError::InvalidTimestamp(ref t) if t == "2023-05-01"));

        let raw = response(json!(["2023"]), json!([1.0]));
        assert!(matches!(
            parse_daily_series(raw).unwrap_err(),
            ExtractionError::InvalidTimestamp(_)
        ));
    }

    #[test]
    fn test_null_value() {
        let raw = response(json!(["20230501", "20230502"]), json!([1.0, null]));
        let err = parse_daily_series(raw).unwrap_err();
        assert!(matches!(err, ExtractionError::MissingValue(ref t) if t == "20230502"));
    }

    #[test]
    fn test_non_numeric_value() {
        let raw = response(json!(["20230501"]), json!(["hot"]));
        let err = parse_daily_series(raw).unwrap_err();
        assert!(matches!(err, ExtractionError::UnexpectedShape(_)));
    }
}
