//! The end-to-end GDU pipeline: selection → site → date range → query → provider → table.

use crate::sites::error::ResolveError;
use crate::sites::site_locator::SiteLocator;
use crate::types::date_range::{DateRange, DateRangeError};
use crate::types::gdu_table::GduTable;
use crate::types::selector::{Selector, SelectorLevel};
use crate::weather::error::{ExtractionError, RequestError};
use crate::weather::extractor::extract_gdu;
use crate::weather::provider::WeatherProvider;
use crate::weather::query::WeatherQuery;
use bon::builder;
use chrono::NaiveDate;
use log::debug;
use std::fmt;
use thiserror::Error;

/// The pipeline stage a [`PipelineError`] came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PipelineStage {
    SelectionIncomplete,
    NoCoordinates,
    DateInvalid,
    RequestFailed,
    MalformedResponse,
    NoDataInRange,
}

impl PipelineStage {
    pub fn tag(&self) -> &'static str {
        match self {
            PipelineStage::SelectionIncomplete => "selection-incomplete",
            PipelineStage::NoCoordinates => "no-coordinates",
            PipelineStage::DateInvalid => "date-invalid",
            PipelineStage::RequestFailed => "request-failed",
            PipelineStage::MalformedResponse => "malformed-response",
            PipelineStage::NoDataInRange => "no-data-in-range",
        }
    }
}

impl fmt::Display for PipelineStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.tag())
    }
}

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("Please select a {0} to view GDU data")]
    SelectionIncomplete(SelectorLevel),

    #[error(transparent)]
    NotFound(#[from] ResolveError),

    #[error(transparent)]
    InvalidDateRange(#[from] DateRangeError),

    #[error("API request failed: {0}")]
    RequestFailed(#[from] RequestError),

    #[error("Unexpected response from the weather provider: {0}")]
    Extraction(#[from] ExtractionError),

    #[error("No data available for the selected date range ({start} to {end})")]
    EmptyResult { start: NaiveDate, end: NaiveDate },
}

impl PipelineError {
    pub fn stage(&self) -> PipelineStage {
        match self {
            PipelineError::SelectionIncomplete(_) => PipelineStage::SelectionIncomplete,
            PipelineError::NotFound(_) => PipelineStage::NoCoordinates,
            PipelineError::InvalidDateRange(_) => PipelineStage::DateInvalid,
            PipelineError::RequestFailed(_) => PipelineStage::RequestFailed,
            PipelineError::Extraction(_) => PipelineStage::MalformedResponse,
            PipelineError::EmptyResult { .. } => PipelineStage::NoDataInRange,
        }
    }

    /// The request succeeded but produced nothing to show; present as a notice.
    pub fn is_notice(&self) -> bool {
        matches!(self, PipelineError::EmptyResult { .. })
    }
}

/// Runs the whole pipeline for one selection and date range.
///
/// Each stage short-circuits on failure. The provider is called at most once, and
/// only after the selection resolved to a site and the date range validated.
///
/// * `.sites(&SiteLocator)` / `.provider(&P)`: **Required.**
/// * `.region()` / `.location()` / `.plot()`: the selector triple; missing or empty
///   values give [`PipelineError::SelectionIncomplete`].
/// * `.start()` / `.end()`: optional, default to the planting date and today.
/// * `.today()`: optional, defaults to the local date.
#[builder]
pub async fn run<P: WeatherProvider>(
    sites: &SiteLocator,
    provider: &P,
    region: Option<&str>,
    location: Option<&str>,
    plot: Option<&str>,
    start: Option<NaiveDate>,
    end: Option<NaiveDate>,
    today: Option<NaiveDate>,
) -> Result<GduTable, PipelineError> {
    let selector =
        Selector::from_parts(region, location, plot).map_err(PipelineError::SelectionIncomplete)?;

    let site = sites.resolve_selector(&selector)?;
    debug!(
        "Resolved {} to ({}, {}), planted {}",
        selector, site.latitude, site.longitude, site.planting_date
    );

    let today = today.unwrap_or_else(crate::utils::today);
    let range = DateRange::validate(site.planting_date, start, end, today)?;
    debug!("Validated date range {}", range);

    let query = WeatherQuery::build(site.coordinates(), &range);
    let raw = provider.fetch(&query).await?;

    extract_gdu(raw, &range)?.ok_or(PipelineError::EmptyResult {
        start: range.start(),
        end: range.end(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stage_tags() {
        let day = NaiveDate::from_ymd_opt(2023, 5, 1).unwrap();
        let cases = [
            (
                PipelineError::SelectionIncomplete(SelectorLevel::Plot),
                "selection-incomplete",
            ),
            (
                PipelineError::NotFound(ResolveError {
                    region: "IA".to_string(),
                    location: "AMES".to_string(),
                    plot: "P0".to_string(),
                }),
                "no-coordinates",
            ),
            (
                PipelineError::InvalidDateRange(DateRangeError::StartAfterEnd {
                    start: day,
                    end: day,
                }),
                "date-invalid",
            ),
            (
                PipelineError::Extraction(ExtractionError::NoResultSet),
                "malformed-response",
            ),
            (
                PipelineError::EmptyResult {
                    start: day,
                    end: day,
                },
                "no-data-in-range",
            ),
        ];
        for (error, tag) in cases {
            assert_eq!(error.stage().to_string(), tag);
            assert_eq!(error.is_notice(), tag == "no-data-in-range");
        }
    }

    #[test]
    fn test_messages_are_specific() {
        let err = PipelineError::SelectionIncomplete(SelectorLevel::Location);
        assert_eq!(err.to_string(), "Please select a location to view GDU data");

        let err = PipelineError::NotFound(ResolveError {
            region: "IA".to_string(),
            location: "AMES".to_string(),
            plot: "P0".to_string(),
        });
        assert_eq!(
            err.to_string(),
            "No coordinates found for RSTCD: IA, LOCCD: AMES, PLACD: P0"
        );
    }
}
