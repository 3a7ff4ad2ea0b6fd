//! Types for the hierarchical `(region, location, plot)` selection.

use std::fmt;

/// One level of the site hierarchy. Options at each level depend on the levels above it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SelectorLevel {
    /// Region code (`RSTCD`). Has no prerequisites.
    Region,
    /// Location code (`LOCCD`). Requires a region.
    Location,
    /// Plot code (`PLACD`). Requires a region and a location.
    Plot,
}

impl SelectorLevel {
    pub fn column_name(&self) -> &'static str {
        match self {
            SelectorLevel::Region => "RSTCD",
            SelectorLevel::Location => "LOCCD",
            SelectorLevel::Plot => "PLACD",
        }
    }
}

impl fmt::Display for SelectorLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SelectorLevel::Region => write!(f, "region"),
            SelectorLevel::Location => write!(f, "location"),
            SelectorLevel::Plot => write!(f, "plot"),
        }
    }
}

/// A complete selector triple addressing one site.
///
/// # Examples
///
/// ```
/// use gdu_calculator::{Selector, SelectorLevel};
///
/// let selector = Selector::from_parts(Some("IA"), Some("AMES"), Some("P1")).unwrap();
/// assert_eq!(selector.export_file_name("csv"), "IA_AMES_P1_GDU.csv");
///
/// let missing = Selector::from_parts(Some("IA"), Some(""), None).unwrap_err();
/// assert_eq!(missing, SelectorLevel::Location);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Selector {
    pub region: String,
    pub location: String,
    pub plot: String,
}

impl Selector {
    pub fn new(
        region: impl Into<String>,
        location: impl Into<String>,
        plot: impl Into<String>,
    ) -> Self {
        Self {
            region: region.into(),
            location: location.into(),
            plot: plot.into(),
        }
    }

    /// Builds a selector from optional parts, as they come from a partially filled form.
    ///
    /// Empty strings count as not selected. On failure the first missing level is returned.
    pub fn from_parts(
        region: Option<&str>,
        location: Option<&str>,
        plot: Option<&str>,
    ) -> Result<Self, SelectorLevel> {
        let pick = |value: Option<&str>, level: SelectorLevel| match value {
            Some(v) if !v.is_empty() => Ok(v.to_string()),
            _ => Err(level),
        };
        Ok(Self {
            region: pick(region, SelectorLevel::Region)?,
            location: pick(location, SelectorLevel::Location)?,
            plot: pick(plot, SelectorLevel::Plot)?,
        })
    }

    /// File name used when exporting a GDU table for this site, e.g. `IA_AMES_P1_GDU.csv`.
    pub fn export_file_name(&self, extension: &str) -> String {
        format!(
            "{}_{}_{}_GDU.{}",
            self.region, self.location, self.plot, extension
        )
    }
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "RSTCD: {}, LOCCD: {}, PLACD: {}",
            self.region, self.location, self.plot
        )
    }
}
