//! Runtime configuration: where sites come from, where the provider lives, where exports go.

use crate::sites::site_loader::SiteSource;
use crate::weather::provider::DEFAULT_ENDPOINT;
use bon::Builder;
use std::env;
use std::path::PathBuf;

pub const ENV_PROVIDER_URL: &str = "GDU_PROVIDER_URL";
pub const ENV_API_KEY: &str = "GDU_API_KEY";
pub const ENV_SITES_URL: &str = "GDU_SITES_URL";
pub const ENV_SITES_FILE: &str = "GDU_SITES_FILE";
pub const ENV_EXPORT_DIR: &str = "GDU_EXPORT_DIR";

/// Configuration for [`crate::GduCalculator`].
///
/// # Examples
///
/// ```
/// use gdu_calculator::{GduConfig, SiteSource};
/// use std::path::PathBuf;
///
/// let config = GduConfig::builder()
///     .api_key("my-key")
///     .sites(SiteSource::CsvFile(PathBuf::from("locations.csv")))
///     .build();
/// assert_eq!(config.endpoint, "https://my.meteoblue.com/dataset/query");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Builder)]
pub struct GduConfig {
    /// Provider endpoint the query is POSTed to.
    #[builder(into, default = DEFAULT_ENDPOINT.to_string())]
    pub endpoint: String,
    /// Sent as the `apikey` query parameter when present.
    #[builder(into)]
    pub api_key: Option<String>,
    #[builder(default)]
    pub sites: SiteSource,
    /// Target directory for CSV exports. Falls back to the download directory.
    #[builder(into)]
    pub export_dir: Option<PathBuf>,
}

impl Default for GduConfig {
    fn default() -> Self {
        Self::builder().build()
    }
}

impl GduConfig {
    /// Reads the configuration from `GDU_*` environment variables.
    ///
    /// `GDU_SITES_FILE` takes precedence over `GDU_SITES_URL`. Unset or empty variables
    /// keep their defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(|name| env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let get = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());

        let sites = match (get(ENV_SITES_FILE), get(ENV_SITES_URL)) {
            (Some(file), _) => SiteSource::CsvFile(PathBuf::from(file)),
            (None, Some(url)) => SiteSource::Url(url),
            (None, None) => SiteSource::default(),
        };

        GduConfig::builder()
            .maybe_endpoint(get(ENV_PROVIDER_URL))
            .maybe_api_key(get(ENV_API_KEY))
            .sites(sites)
            .maybe_export_dir(get(ENV_EXPORT_DIR).map(PathBuf::from))
            .build()
    }
}
