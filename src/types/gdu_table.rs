//! Daily provider values and the derived daily/cumulative GDU table.

use crate::types::date_range::DateRange;
use crate::utils::round_to_hundredths;
use chrono::NaiveDate;
use serde::Serialize;

/// One daily value as reported by the provider.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DailyValue {
    pub date: NaiveDate,
    pub value: f64,
}

/// The provider's daily values in the order they were returned.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DailySeries {
    values: Vec<DailyValue>,
}

impl DailySeries {
    pub fn new(values: Vec<DailyValue>) -> Self {
        Self { values }
    }

    pub fn values(&self) -> &[DailyValue] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// First and last date in the series, if any.
    pub fn date_span(&self) -> Option<(NaiveDate, NaiveDate)> {
        Some((self.values.first()?.date, self.values.last()?.date))
    }
}

/// A presented row of a [`GduTable`], rounded to two decimals.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GduRow {
    pub date: NaiveDate,
    pub daily_gdu: f64,
    pub cumulative_gdu: f64,
}

/// Daily and cumulative GDU over a requested date window.
///
/// Accumulation starts at the first day of the window, not at the first day the provider
/// returned. Daily values are kept at full precision; [`GduTable::rows`] rounds them for
/// presentation. A `GduTable` always holds at least one day.
#[derive(Debug, Clone, PartialEq)]
pub struct GduTable {
    days: Vec<DailyValue>,
    cumulative: Vec<f64>,
}

impl GduTable {
    /// Builds the table from the days of `series` that fall inside `range`.
    ///
    /// Returns `None` if no day of the series is inside the range.
    pub fn from_series(series: &DailySeries, range: &DateRange) -> Option<Self> {
        Self::from_days(
            series
                .values()
                .iter()
                .filter(|day| range.contains(day.date))
                .copied()
                .collect(),
        )
    }

    fn from_days(days: Vec<DailyValue>) -> Option<Self> {
        if days.is_empty() {
            return None;
        }
        let cumulative = days
            .iter()
            .scan(0.0, |total, day| {
                *total += day.value;
                Some(*total)
            })
            .collect();
        Some(Self { days, cumulative })
    }

    /// Re-filters the table to `range`, restarting accumulation at the new window.
    ///
    /// Equivalent to building a new table from the same provider data with `range`,
    /// as long as `range` lies inside the range this table was built with.
    pub fn restrict(&self, range: &DateRange) -> Option<Self> {
        Self::from_days(
            self.days
                .iter()
                .filter(|day| range.contains(day.date))
                .copied()
                .collect(),
        )
    }

    /// Rows rounded to two decimals, in chronological order.
    pub fn rows(&self) -> Vec<GduRow> {
        self.days
            .iter()
            .zip(&self.cumulative)
            .map(|(day, cumulative)| GduRow {
                date: day.date,
                daily_gdu: round_to_hundredths(day.value),
                cumulative_gdu: round_to_hundredths(*cumulative),
            })
            .collect()
    }

    /// The unrounded daily values backing the table.
    pub fn daily_values(&self) -> &[DailyValue] {
        &self.days
    }

    pub fn len(&self) -> usize {
        self.days.len()
    }

    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }

    pub fn first_date(&self) -> Option<NaiveDate> {
        self.days.first().map(|day| day.date)
    }

    pub fn last_date(&self) -> Option<NaiveDate> {
        self.days.last().map(|day| day.date)
    }

    /// Total GDU over the window, rounded to two decimals.
    pub fn total_gdu(&self) -> f64 {
        round_to_hundredths(self.cumulative.last().copied().unwrap_or(0.0))
    }
}
