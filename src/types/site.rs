//! Defines the data structures describing a field-trial site from the reference dataset.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Represents a geographical coordinate using latitude and longitude.
///
/// Latitude is the first element (index 0), and longitude is the second (index 1).
///
/// # Examples
///
/// ```
/// use gdu_calculator::LatLon;
///
/// let ames = LatLon(42.0, -93.6);
/// assert_eq!(ames.0, 42.0); // Latitude
/// assert_eq!(ames.1, -93.6); // Longitude
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatLon(pub f64, pub f64);

impl LatLon {
    pub fn latitude(self) -> f64 {
        self.0
    }

    pub fn longitude(self) -> f64 {
        self.1
    }
}

/// A single row of the reference dataset: one trial plot with its location and planting date.
///
/// The `(region, location, plot)` triple is expected to address at most one row, but the
/// source dataset does not enforce this. See [`crate::SiteLocator::resolve`] for how
/// duplicates are handled.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Site {
    /// Region code (`RSTCD` column).
    pub region: String,
    /// Location code within the region (`LOCCD` column).
    pub location: String,
    /// Plot code within the location (`PLACD` column).
    pub plot: String,
    /// Latitude in decimal degrees.
    pub latitude: f64,
    /// Longitude in decimal degrees.
    pub longitude: f64,
    /// The date the plot was planted. Acts as the lower bound for GDU date ranges.
    pub planting_date: NaiveDate,
}

impl Site {
    pub fn coordinates(&self) -> LatLon {
        LatLon(self.latitude, self.longitude)
    }

    pub(crate) fn matches(&self, region: &str, location: &str, plot: &str) -> bool {
        self.region == region && self.location == location && self.plot == plot
    }
}
