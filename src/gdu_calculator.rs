//! This module provides the main entry point: a client that owns the reference sites
//! and the weather provider, and runs the GDU pipeline for a selected site.

use crate::config::GduConfig;
use crate::error::GduError;
use crate::pipeline::{self, PipelineError};
use crate::sites::site_locator::SiteLocator;
use crate::types::gdu_table::GduTable;
use crate::types::selector::{Selector, SelectorLevel};
use crate::utils::default_export_dir;
use crate::weather::provider::{MeteoblueClient, WeatherProvider};
use bon::bon;
use chrono::NaiveDate;
use log::debug;
use std::path::PathBuf;
use std::sync::Arc;

/// The main client for computing growing degree units for trial sites.
///
/// Create one with [`GduCalculator::new()`] (configuration from the environment) or
/// [`GduCalculator::with_config()`]. The reference sites are loaded once per process
/// and shared between clients.
///
/// # Examples
///
/// ```no_run
/// # use gdu_calculator::{GduCalculator, GduError};
/// # #[tokio::main]
/// # async fn main() -> Result<(), GduError> {
/// let calculator = GduCalculator::new().await?;
///
/// for region in calculator.regions() {
///     println!("{}: {:?}", region, calculator.locations(region));
/// }
///
/// let table = calculator
///     .gdu()
///     .region("IA")
///     .location("AMES")
///     .plot("P1")
///     .call()
///     .await?;
/// println!("Total GDU since planting: {}", table.total_gdu());
/// # Ok(())
/// # }
/// ```
pub struct GduCalculator<P = MeteoblueClient> {
    sites: Arc<SiteLocator>,
    provider: P,
    export_dir: Option<PathBuf>,
}

impl GduCalculator<MeteoblueClient> {
    /// Creates a client from `GDU_*` environment variables. See [`GduConfig::from_env`].
    ///
    /// # Errors
    ///
    /// Returns [`GduError::LoadSites`] if the reference sites cannot be loaded.
    pub async fn new() -> Result<Self, GduError> {
        Self::with_config(GduConfig::from_env()).await
    }

    /// Creates a client from an explicit configuration.
    ///
    /// The site source in `config` is only used if no sites were loaded yet in this
    /// process.
    pub async fn with_config(config: GduConfig) -> Result<Self, GduError> {
        let sites = SiteLocator::shared(&config.sites).await?;
        let provider = MeteoblueClient::new(config.endpoint, config.api_key);
        debug!(
            "GDU calculator ready with {} sites, provider at {}",
            sites.len(),
            provider.endpoint()
        );
        Ok(Self {
            sites,
            provider,
            export_dir: config.export_dir,
        })
    }
}

#[bon]
impl<P: WeatherProvider> GduCalculator<P> {
    /// Creates a client around an already loaded set of sites and any provider.
    pub fn with_provider(sites: Arc<SiteLocator>, provider: P) -> Self {
        Self {
            sites,
            provider,
            export_dir: None,
        }
    }

    pub fn export_to(mut self, dir: impl Into<PathBuf>) -> Self {
        self.export_dir = Some(dir.into());
        self
    }

    pub fn sites(&self) -> &SiteLocator {
        &self.sites
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    /// Options for one selector level given the selections above it.
    pub fn options_for(
        &self,
        level: SelectorLevel,
        region: Option<&str>,
        location: Option<&str>,
    ) -> Vec<&str> {
        self.sites.options_for(level, region, location)
    }

    pub fn regions(&self) -> Vec<&str> {
        self.sites.regions()
    }

    pub fn locations(&self, region: &str) -> Vec<&str> {
        self.sites.locations(region)
    }

    pub fn plots(&self, region: &str, location: &str) -> Vec<&str> {
        self.sites.plots(region, location)
    }

    /// Computes daily and cumulative GDU for a site.
    ///
    /// This method uses a builder pattern.
    ///
    /// # Arguments
    ///
    /// * `.region(&str)`, `.location(&str)`, `.plot(&str)`: the selector triple. All three
    ///   are needed; a missing one is reported as [`PipelineError::SelectionIncomplete`].
    /// * `.start(NaiveDate)`: Optional. Defaults to the site's planting date.
    /// * `.end(NaiveDate)`: Optional. Defaults to today.
    /// * `.today(NaiveDate)`: Optional. Overrides the local date used as upper bound.
    ///
    /// # Errors
    ///
    /// Every failure is a [`PipelineError`]; [`PipelineError::stage`] tells which step
    /// failed. [`PipelineError::EmptyResult`] means the provider had no days in range.
    #[builder]
    pub async fn gdu(
        &self,
        region: Option<&str>,
        location: Option<&str>,
        plot: Option<&str>,
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
        today: Option<NaiveDate>,
    ) -> Result<GduTable, PipelineError> {
        pipeline::run()
            .sites(self.sites.as_ref())
            .provider(&self.provider)
            .maybe_region(region)
            .maybe_location(location)
            .maybe_plot(plot)
            .maybe_start(start)
            .maybe_end(end)
            .maybe_today(today)
            .call()
            .await
    }

    /// Writes `table` as `<region>_<location>_<plot>_GDU.csv` into the export directory.
    pub fn export_csv(&self, table: &GduTable, selector: &Selector) -> Result<PathBuf, GduError> {
        let dir = self.export_dir.clone().unwrap_or_else(default_export_dir);
        table.export_csv(&dir, selector)
    }
}
