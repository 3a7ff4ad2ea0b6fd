//! Loads the reference dataset of trial sites from a CSV source.

use crate::sites::error::LoadSitesError;
use crate::types::selector::SelectorLevel;
use crate::types::site::Site;
use chrono::NaiveDate;
use log::{info, warn};
use polars::prelude::*;
use reqwest::Client;
use std::fmt;
use std::io::Cursor;
use std::path::PathBuf;
use tokio::task;

pub const DEFAULT_SITES_URL: &str =
    "https://raw.githubusercontent.com/EisingerSyngenta/FloweringData/main/2022%20Locations.csv";

const COL_LATITUDE: &str = "Latitude";
const COL_LONGITUDE: &str = "Longitude";
const COL_PLANTING_DATE: &str = "planting_date";

/// Where the reference dataset is read from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SiteSource {
    /// A CSV file served over HTTP(S).
    Url(String),
    /// A CSV file on the local filesystem.
    CsvFile(PathBuf),
}

impl Default for SiteSource {
    fn default() -> Self {
        SiteSource::Url(DEFAULT_SITES_URL.to_string())
    }
}

impl fmt::Display for SiteSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SiteSource::Url(url) => write!(f, "{}", url),
            SiteSource::CsvFile(path) => write!(f, "{}", path.display()),
        }
    }
}

pub struct SiteLoader {
    download_client: Client,
}

impl Default for SiteLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl SiteLoader {
    pub fn new() -> SiteLoader {
        SiteLoader {
            download_client: Client::new(),
        }
    }

    /// Reads and parses all sites from `source`.
    pub async fn load(&self, source: &SiteSource) -> Result<Vec<Site>, LoadSitesError> {
        let bytes = match source {
            SiteSource::Url(url) => self.download(url).await?,
            SiteSource::CsvFile(path) => tokio::fs::read(path)
                .await
                .map_err(|e| LoadSitesError::FileRead(path.clone(), e))?,
        };

        let parse_start = std::time::Instant::now();
        let sites = task::spawn_blocking(move || parse_sites_csv(bytes)).await??;
        info!(
            "Parsed {} sites from {} in {:?}",
            sites.len(),
            source,
            parse_start.elapsed()
        );
        Ok(sites)
    }

    async fn download(&self, url: &str) -> Result<Vec<u8>, LoadSitesError> {
        info!("Downloading site data from {}", url);
        let response = self
            .download_client
            .get(url)
            .send()
            .await
            .map_err(|e| LoadSitesError::NetworkRequest(url.to_string(), e))?;

        let response = match response.error_for_status() {
            Ok(resp) => resp,
            Err(e) => {
                warn!("HTTP error for {}: {:?}", url, e);
                return Err(if let Some(status) = e.status() {
                    LoadSitesError::HttpStatus {
                        url: url.to_string(),
                        status,
                        source: e,
                    }
                } else {
                    LoadSitesError::NetworkRequest(url.to_string(), e)
                });
            }
        };

        let bytes = response
            .bytes()
            .await
            .map_err(|e| LoadSitesError::NetworkRequest(url.to_string(), e))?;
        Ok(bytes.to_vec())
    }
}

/// Parses CSV bytes (with header) into sites.
///
/// Every column is read as text so codes such as `007` keep their exact spelling.
/// Rows with an empty required field are skipped.
pub fn parse_sites_csv(bytes: Vec<u8>) -> Result<Vec<Site>, LoadSitesError> {
    let df = CsvReadOptions::default()
        .with_has_header(true)
        .with_infer_schema_length(Some(0))
        .into_reader_with_file_handle(Cursor::new(bytes))
        .finish()
        .map_err(LoadSitesError::CsvParse)?;

    let regions = string_column(&df, SelectorLevel::Region.column_name())?;
    let locations = string_column(&df, SelectorLevel::Location.column_name())?;
    let plots = string_column(&df, SelectorLevel::Plot.column_name())?;
    let latitudes = string_column(&df, COL_LATITUDE)?;
    let longitudes = string_column(&df, COL_LONGITUDE)?;
    let planting_dates = string_column(&df, COL_PLANTING_DATE)?;

    let mut sites = Vec::with_capacity(df.height());
    for idx in 0..df.height() {
        let row = idx + 1;
        let (
            Some(region),
            Some(location),
            Some(plot),
            Some(latitude),
            Some(longitude),
            Some(planting_date),
        ) = (
            non_empty(regions.get(idx)),
            non_empty(locations.get(idx)),
            non_empty(plots.get(idx)),
            non_empty(latitudes.get(idx)),
            non_empty(longitudes.get(idx)),
            non_empty(planting_dates.get(idx)),
        )
        else {
            warn!("Skipping site row {} with missing fields", row);
            continue;
        };

        sites.push(Site {
            region: region.to_string(),
            location: location.to_string(),
            plot: plot.to_string(),
            latitude: parse_coordinate(latitude, row, COL_LATITUDE)?,
            longitude: parse_coordinate(longitude, row, COL_LONGITUDE)?,
            planting_date: parse_planting_date(planting_date).ok_or_else(|| {
                LoadSitesError::InvalidValue {
                    row,
                    column: COL_PLANTING_DATE.to_string(),
                    value: planting_date.to_string(),
                }
            })?,
        });
    }
    Ok(sites)
}

fn string_column<'a>(df: &'a DataFrame, name: &str) -> Result<&'a StringChunked, LoadSitesError> {
    df.column(name)
        .and_then(|column| column.str())
        .map_err(|e| LoadSitesError::ColumnNotFound(name.to_string(), e))
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}

fn parse_coordinate(value: &str, row: usize, column: &str) -> Result<f64, LoadSitesError> {
    value
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| LoadSitesError::InvalidValue {
            row,
            column: column.to_string(),
            value: value.to_string(),
        })
}

/// Accepts `YYYY-MM-DD`, `YYYY/MM/DD`, `MM/DD/YYYY` and `MM/DD/YY`, ignoring any time part.
fn parse_planting_date(value: &str) -> Option<NaiveDate> {
    let day = value.trim().split(['T', ' ']).next()?;
    ["%Y-%m-%d", "%Y/%m/%d"]
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(day, format).ok())
        .or_else(|| {
            let format = match day.rsplit('/').next() {
                Some(year) if year.len() == 2 => "%m/%d/%y",
                _ => "%m/%d/%Y",
            };
            NaiveDate::parse_from_str(day, format).ok()
        })
}
