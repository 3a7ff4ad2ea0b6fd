//! In-memory lookup over the reference dataset: selector resolution and cascading options.

use crate::sites::error::{LoadSitesError, ResolveError};
use crate::sites::site_loader::{SiteLoader, SiteSource};
use crate::types::selector::{Selector, SelectorLevel};
use crate::types::site::Site;
use log::{debug, info};
use std::collections::HashSet;
use std::sync::Arc;
use tokio::sync::OnceCell;

static SHARED_LOCATOR: OnceCell<Arc<SiteLocator>> = OnceCell::const_new();

/// Read-only view of all reference sites, in the order the source listed them.
#[derive(Debug, Clone, Default)]
pub struct SiteLocator {
    sites: Vec<Site>,
}

impl SiteLocator {
    pub fn from_sites(sites: Vec<Site>) -> Self {
        Self { sites }
    }

    /// Loads the sites from `source` into a new locator.
    pub async fn load(source: &SiteSource) -> Result<Self, LoadSitesError> {
        let sites = SiteLoader::new().load(source).await?;
        Ok(Self::from_sites(sites))
    }

    /// Process-wide locator, loaded on first use and kept for the life of the process.
    ///
    /// Only the first successful call loads anything; later calls return the same
    /// locator regardless of `source`. A failed load is not cached, so the next call
    /// tries again.
    pub async fn shared(source: &SiteSource) -> Result<Arc<SiteLocator>, LoadSitesError> {
        SHARED_LOCATOR
            .get_or_try_init(|| async {
                info!("Loading shared site data from {}", source);
                Self::load(source).await.map(Arc::new)
            })
            .await
            .cloned()
    }

    pub fn sites(&self) -> &[Site] {
        &self.sites
    }

    pub fn len(&self) -> usize {
        self.sites.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sites.is_empty()
    }

    /// Finds the site matching all three codes exactly (case-sensitive).
    ///
    /// If the dataset contains several rows for the same triple, the first one in
    /// dataset order wins. Duplicates are not an error.
    ///
    /// # Errors
    ///
    /// Returns [`ResolveError`] if no row matches.
    pub fn resolve(&self, region: &str, location: &str, plot: &str) -> Result<&Site, ResolveError> {
        let mut matches = self
            .sites
            .iter()
            .filter(|site| site.matches(region, location, plot));

        let site = matches.next().ok_or_else(|| ResolveError {
            region: region.to_string(),
            location: location.to_string(),
            plot: plot.to_string(),
        })?;

        let duplicates = matches.count();
        if duplicates > 0 {
            debug!(
                "{} duplicate rows for {}/{}/{}, using the first",
                duplicates, region, location, plot
            );
        }
        Ok(site)
    }

    pub fn resolve_selector(&self, selector: &Selector) -> Result<&Site, ResolveError> {
        self.resolve(&selector.region, &selector.location, &selector.plot)
    }

    /// Distinct values available at `level`, given the selections above it.
    ///
    /// Values are returned in first-seen dataset order. A level whose prerequisites are
    /// missing has no options: `Location` needs `region`, `Plot` needs both `region`
    /// and `location`.
    pub fn options_for(
        &self,
        level: SelectorLevel,
        region: Option<&str>,
        location: Option<&str>,
    ) -> Vec<&str> {
        match (level, region, location) {
            (SelectorLevel::Region, _, _) => distinct(self.sites.iter().map(|s| s.region.as_str())),
            (SelectorLevel::Location, Some(region), _) => distinct(
                self.sites
                    .iter()
                    .filter(|s| s.region == region)
                    .map(|s| s.location.as_str()),
            ),
            (SelectorLevel::Plot, Some(region), Some(location)) => distinct(
                self.sites
                    .iter()
                    .filter(|s| s.region == region && s.location == location)
                    .map(|s| s.plot.as_str()),
            ),
            _ => Vec::new(),
        }
    }

    pub fn regions(&self) -> Vec<&str> {
        self.options_for(SelectorLevel::Region, None, None)
    }

    pub fn locations(&self, region: &str) -> Vec<&str> {
        self.options_for(SelectorLevel::Location, Some(region), None)
    }

    pub fn plots(&self, region: &str, location: &str) -> Vec<&str> {
        self.options_for(SelectorLevel::Plot, Some(region), Some(location))
    }
}

fn distinct<'a>(values: impl Iterator<Item = &'a str>) -> Vec<&'a str> {
    let mut seen = HashSet::new();
    values.filter(|value| seen.insert(*value)).collect()
}
