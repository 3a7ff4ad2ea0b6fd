//! Request payload for the meteoblue dataset API.
//!
//! Everything except the point and the time interval is fixed: the request always asks
//! for imperial units and a daily sum of growing degree days with base 50 °F and
//! limit 86 °F.

use crate::types::date_range::DateRange;
use crate::types::site::LatLon;
use serde::Serialize;

const TEMPERATURE_UNIT: &str = "F";
const VELOCITY_UNIT: &str = "mph";
const LENGTH_UNIT: &str = "imperial";
const ENERGY_UNIT: &str = "watts";

const GEOMETRY_TYPE: &str = "MultiPoint";
const RESPONSE_FORMAT: &str = "json";
const TIME_INTERVALS_ALIGNMENT: &str = "none";

const DOMAIN: &str = "ERA5";
const GAP_FILL_DOMAIN: &str = "NEMSGLOBAL";
const TIME_RESOLUTION: &str = "daily";

/// meteoblue variable code for growing degree days.
pub const GDD_CODE: u32 = 731;
const GDD_LEVEL: &str = "2 m elevation corrected";
const GDD_AGGREGATION: &str = "sum";
pub const GDD_BASE_F: u32 = 50;
pub const GDD_LIMIT_F: u32 = 86;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Units {
    pub temperature: &'static str,
    pub velocity: &'static str,
    pub length: &'static str,
    pub energy: &'static str,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Geometry {
    #[serde(rename = "type")]
    pub kind: &'static str,
    /// `[longitude, latitude]` pairs.
    pub coordinates: Vec<[f64; 2]>,
    pub location_names: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CodeSpec {
    pub code: u32,
    pub level: &'static str,
    pub aggregation: &'static str,
    pub gdd_base: u32,
    pub gdd_limit: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuerySpec {
    pub domain: &'static str,
    pub gap_fill_domain: &'static str,
    pub time_resolution: &'static str,
    pub codes: Vec<CodeSpec>,
}

/// The JSON body POSTed to the provider.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WeatherQuery {
    pub units: Units,
    pub geometry: Geometry,
    pub format: &'static str,
    pub time_intervals: Vec<String>,
    pub time_intervals_alignment: &'static str,
    pub queries: Vec<QuerySpec>,
}

impl WeatherQuery {
    /// Builds the request for one point over `range`, from the start of the first day
    /// to the last second of the last day (UTC).
    ///
    /// # Examples
    ///
    /// ```
    /// use chrono::NaiveDate;
    /// use gdu_calculator::{DateRange, LatLon, WeatherQuery};
    ///
    /// let planted = NaiveDate::from_ymd_opt(2023, 5, 1).unwrap();
    /// let end = NaiveDate::from_ymd_opt(2023, 5, 3).unwrap();
    /// let range = DateRange::validate(planted, None, Some(end), end).unwrap();
    ///
    /// let query = WeatherQuery::build(LatLon(42.0, -93.6), &range);
    /// assert_eq!(query.time_intervals, vec!["2023-05-01T00:00:00Z/2023-05-03T23:59:59Z"]);
    /// assert_eq!(query.geometry.coordinates, vec![[-93.6, 42.0]]);
    /// ```
    pub fn build(location: LatLon, range: &DateRange) -> Self {
        Self {
            units: Units {
                temperature: TEMPERATURE_UNIT,
                velocity: VELOCITY_UNIT,
                length: LENGTH_UNIT,
                energy: ENERGY_UNIT,
            },
            geometry: Geometry {
                kind: GEOMETRY_TYPE,
                coordinates: vec![[location.longitude(), location.latitude()]],
                location_names: vec![String::new()],
            },
            format: RESPONSE_FORMAT,
            time_intervals: vec![format!(
                "{}T00:00:00Z/{}T23:59:59Z",
                range.start(),
                range.end()
            )],
            time_intervals_alignment: TIME_INTERVALS_ALIGNMENT,
            queries: vec![QuerySpec {
                domain: DOMAIN,
                gap_fill_domain: GAP_FILL_DOMAIN,
                time_resolution: TIME_RESOLUTION,
                codes: vec![CodeSpec {
                    code: GDD_CODE,
                    level: GDD_LEVEL,
                    aggregation: GDD_AGGREGATION,
                    gdd_base: GDD_BASE_F,
                    gdd_limit: GDD_LIMIT_F,
                }],
            }],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use serde_json::json;

    #[test]
    fn test_query_json_shape() {
        let start = NaiveDate::from_ymd_opt(2023, 5, 1).unwrap();
        let end = NaiveDate::from_ymd_opt(2023, 9, 30).unwrap();
        let range = DateRange::validate(start, Some(start), Some(end), end).unwrap();

        let query = WeatherQuery::build(LatLon(42.0, -93.6), &range);
        let value = serde_json::to_value(&query).unwrap();

        assert_eq!(
            value,
            json!({
                "units": {
                    "temperature": "F",
                    "velocity": "mph",
                    "length": "imperial",
                    "energy": "watts"
                },
                "geometry": {
                    "type": "MultiPoint",
                    "coordinates": [[-93.6, 42.0]],
                    "locationNames": [""]
                },
                "format": "json",
                "timeIntervals": ["2023-05-01T00:00:00Z/2023-09-30T23:59:59Z"],
                "timeIntervalsAlignment": "none",
                "queries": [{
                    "domain": "ERA5",
                    "gapFillDomain": "NEMSGLOBAL",
                    "timeResolution": "daily",
                    "codes": [{
                        "code": 731,
                        "level": "2 m elevation corrected",
                        "aggregation": "sum",
                        "gddBase": 50,
                        "gddLimit": 86
                    }]
                }]
            })
        );
    }

    #[test]
    fn test_single_day_interval() {
        let day = NaiveDate::from_ymd_opt(2024, 2, 29).unwrap();
        let range = DateRange::validate(day, None, Some(day), day).unwrap();
        let query = WeatherQuery::build(LatLon(-33.9, 18.4), &range);
        assert_eq!(
            query.time_intervals,
            vec!["2024-02-29T00:00:00Z/2024-02-29T23:59:59Z".to_string()]
        );
    }
}
