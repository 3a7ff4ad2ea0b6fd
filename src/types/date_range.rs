//! Validated date ranges for GDU requests.

use chrono::NaiveDate;
use std::fmt;
use thiserror::Error;

/// The provider has no daily data before this date.
pub const EARLIEST_DATA_DATE: NaiveDate = match NaiveDate::from_ymd_opt(2020, 1, 1) {
    Some(date) => date,
    None => panic!("invalid earliest data date"),
};

/// Which bound of a proposed date range was violated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum DateRangeError {
    #[error("Start date {start} is before the earliest allowed date {floor}")]
    StartBeforeFloor { start: NaiveDate, floor: NaiveDate },

    #[error("End date {end} is after today ({today})")]
    EndInFuture { end: NaiveDate, today: NaiveDate },

    #[error("Start date {start} is after end date {end}")]
    StartAfterEnd { start: NaiveDate, end: NaiveDate },
}

/// An inclusive `[start, end]` range of calendar days.
///
/// A `DateRange` handed to the query builder has always been through [`DateRange::validate`],
/// so `start <= end`, `start` is not before the site's planting date (or
/// [`EARLIEST_DATA_DATE`]) and `end` is not in the future.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DateRange {
    start: NaiveDate,
    end: NaiveDate,
}

impl DateRange {
    /// Validates a proposed range against a site's planting date and the current date.
    ///
    /// Missing `start` defaults to the planting date, clamped up to [`EARLIEST_DATA_DATE`].
    /// Missing `end` defaults to `today`. Defaults are checked like explicit input.
    ///
    /// # Errors
    ///
    /// Checks are applied in order: [`DateRangeError::StartBeforeFloor`],
    /// [`DateRangeError::EndInFuture`], [`DateRangeError::StartAfterEnd`].
    ///
    /// # Examples
    ///
    /// ```
    /// use chrono::NaiveDate;
    /// use gdu_calculator::{DateRange, DateRangeError};
    ///
    /// let planted = NaiveDate::from_ymd_opt(2023, 5, 1).unwrap();
    /// let today = NaiveDate::from_ymd_opt(2023, 9, 1).unwrap();
    ///
    /// let range = DateRange::validate(planted, None, None, today).unwrap();
    /// assert_eq!(range.start(), planted);
    /// assert_eq!(range.end(), today);
    ///
    /// let too_early = NaiveDate::from_ymd_opt(2023, 4, 1).unwrap();
    /// assert!(matches!(
    ///     DateRange::validate(planted, Some(too_early), None, today),
    ///     Err(DateRangeError::StartBeforeFloor { .. })
    /// ));
    /// ```
    pub fn validate(
        planting_date: NaiveDate,
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
        today: NaiveDate,
    ) -> Result<Self, DateRangeError> {
        let floor = planting_date.max(EARLIEST_DATA_DATE);
        let start = start.unwrap_or(floor);
        let end = end.unwrap_or(today);

        if start < floor {
            return Err(DateRangeError::StartBeforeFloor { start, floor });
        }
        if end > today {
            return Err(DateRangeError::EndInFuture { end, today });
        }
        if start > end {
            return Err(DateRangeError::StartAfterEnd { start, end });
        }
        Ok(Self { start, end })
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    pub fn end(&self) -> NaiveDate {
        self.end
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }

    /// Returns a narrower range inside this one, or `None` if `start..=end` is not contained.
    pub fn sub_range(&self, start: NaiveDate, end: NaiveDate) -> Option<Self> {
        (self.start <= start && start <= end && end <= self.end).then_some(Self { start, end })
    }

    /// Number of calendar days covered, counting both ends.
    pub fn days(&self) -> i64 {
        (self.end - self.start).num_days() + 1
    }
}

impl fmt::Display for DateRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} to {}", self.start, self.end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_valid_range_is_returned_unmodified() {
        let planted = date(2023, 5, 1);
        let today = date(2023, 10, 1);
        for (start, end) in [
            (date(2023, 5, 1), date(2023, 5, 1)),
            (date(2023, 5, 1), date(2023, 10, 1)),
            (date(2023, 6, 15), date(2023, 7, 2)),
        ] {
            let range = DateRange::validate(planted, Some(start), Some(end), today).unwrap();
            assert_eq!(range.start(), start);
            assert_eq!(range.end(), end);
        }
    }

    #[test]
    fn test_start_before_planting_date() {
        let result = DateRange::validate(
            date(2023, 5, 1),
            Some(date(2023, 4, 30)),
            Some(date(2023, 5, 3)),
            date(2023, 10, 1),
        );
        assert_eq!(
            result,
            Err(DateRangeError::StartBeforeFloor {
                start: date(2023, 4, 30),
                floor: date(2023, 5, 1),
            })
        );
    }

    #[test]
    fn test_start_before_earliest_data_date() {
        let result = DateRange::validate(
            date(2018, 5, 1),
            Some(date(2019, 6, 1)),
            Some(date(2020, 6, 1)),
            date(2023, 1, 1),
        );
        assert!(matches!(
            result,
            Err(DateRangeError::StartBeforeFloor { floor, .. }) if floor == EARLIEST_DATA_DATE
        ));
    }

    #[test]
    fn test_end_in_future() {
        let result = DateRange::validate(
            date(2023, 5, 1),
            None,
            Some(date(2023, 10, 2)),
            date(2023, 10, 1),
        );
        assert_eq!(
            result,
            Err(DateRangeError::EndInFuture {
                end: date(2023, 10, 2),
                today: date(2023, 10, 1),
            })
        );
    }

    #[test]
    fn test_start_after_end() {
        let result = DateRange::validate(
            date(2023, 5, 1),
            Some(date(2023, 6, 2)),
            Some(date(2023, 6, 1)),
            date(2023, 10, 1),
        );
        assert!(matches!(result, Err(DateRangeError::StartAfterEnd { .. })));
    }

    #[test]
    fn test_defaults_clamp_old_planting_date_to_floor() {
        let range =
            DateRange::validate(date(2019, 4, 20), None, None, date(2020, 3, 1)).unwrap();
        assert_eq!(range.start(), EARLIEST_DATA_DATE);
        assert_eq!(range.end(), date(2020, 3, 1));
    }

    #[test]
    fn test_default_start_in_future_fails() {
        // Planting date after today: defaults cannot form a valid range.
        let result = DateRange::validate(date(2024, 5, 1), None, None, date(2024, 4, 1));
        assert!(matches!(result, Err(DateRangeError::StartAfterEnd { .. })));
    }

    #[test]
    fn test_sub_range_and_days() {
        let range = DateRange::validate(
            date(2023, 5, 1),
            None,
            Some(date(2023, 5, 10)),
            date(2023, 6, 1),
        )
        .unwrap();
        assert_eq!(range.days(), 10);
        let sub = range.sub_range(date(2023, 5, 3), date(2023, 5, 4)).unwrap();
        assert_eq!(sub.days(), 2);
        assert!(range.sub_range(date(2023, 4, 30), date(2023, 5, 4)).is_none());
        assert!(range.sub_range(date(2023, 5, 5), date(2023, 5, 4)).is_none());
        assert!(range.contains(date(2023, 5, 10)));
        assert!(!range.contains(date(2023, 5, 11)));
    }
}
