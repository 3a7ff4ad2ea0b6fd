use chrono::{Local, NaiveDate};
use std::path::PathBuf;

/// Rounds to two decimal places for presentation, exact halves to the even digit.
pub fn round_to_hundredths(value: f64) -> f64 {
    (value * 100.0).round_ties_even() / 100.0
}

/// Current local calendar date.
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// Directory exports go to when none is configured: the user's download directory,
/// or the working directory if there is none.
pub fn default_export_dir() -> PathBuf {
    dirs::download_dir().unwrap_or_else(|| PathBuf::from("."))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_to_hundredths() {
        assert_eq!(round_to_hundredths(22.5), 22.5);
        assert_eq!(round_to_hundredths(1.23456), 1.23);
        assert_eq!(round_to_hundredths(1.236), 1.24);
        assert_eq!(round_to_hundredths(-0.004), -0.0);
    }

    #[test]
    fn test_round_half_to_even() {
        assert_eq!(round_to_hundredths(0.125), 0.12);
        assert_eq!(round_to_hundredths(0.375), 0.38);
        assert_eq!(round_to_hundredths(12.625), 12.62);
    }
}
