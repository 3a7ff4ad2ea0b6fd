mod config;
mod error;
mod export;
mod gdu_calculator;
mod pipeline;
mod sites;
mod types;
mod utils;
mod weather;

pub use config::*;
pub use error::GduError;
pub use export::{COL_CUMULATIVE_GDU, COL_DAILY_GDU, COL_DATE};
pub use gdu_calculator::*;
pub use pipeline::{run as run_pipeline, PipelineError, PipelineStage};

pub use sites::error::{LoadSitesError, ResolveError};
pub use sites::site_loader::{parse_sites_csv, SiteLoader, SiteSource, DEFAULT_SITES_URL};
pub use sites::site_locator::SiteLocator;

pub use types::date_range::{DateRange, DateRangeError, EARLIEST_DATA_DATE};
pub use types::gdu_table::{DailySeries, DailyValue, GduRow, GduTable};
pub use types::selector::{Selector, SelectorLevel};
pub use types::site::{LatLon, Site};

pub use weather::error::{ExtractionError, RequestError};
pub use weather::extractor::extract_gdu;
pub use weather::provider::{MeteoblueClient, WeatherProvider, DEFAULT_ENDPOINT};
pub use weather::query::{WeatherQuery, GDD_BASE_F, GDD_CODE, GDD_LIMIT_F};
pub use weather::response::parse_daily_series;
