use crate::types::date_range::DateRange;
use crate::types::gdu_table::GduTable;
use crate::weather::error::ExtractionError;
use crate::weather::response::parse_daily_series;
use log::{debug, info};
use serde_json::Value;

/// Turns a raw provider response into the GDU table for `range`.
///
/// Returns `Ok(None)` when the response is well-formed but none of its days fall
/// inside `range`. That is a valid "no data" answer, not a malformed response.
pub fn extract_gdu(raw: Value, range: &DateRange) -> Result<Option<GduTable>, ExtractionError> {
    let series = parse_daily_series(raw)?;
    debug!(
        "Provider returned {} days spanning {:?}",
        series.len(),
        series.date_span()
    );

    let table = GduTable::from_series(&series, range);
    match &table {
        Some(table) => info!(
            "Extracted {} days of GDU for {}, total {}",
            table.len(),
            range,
            table.total_gdu()
        ),
        None => info!("No provider data inside {}", range),
    }
    Ok(table)
}
