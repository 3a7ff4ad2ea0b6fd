//! Tabular export of a [`GduTable`]: `Date, Daily GDU, Cumulative GDU`.

use crate::error::GduError;
use crate::types::gdu_table::GduTable;
use crate::types::selector::Selector;
use chrono::NaiveDate;
use log::info;
use polars::prelude::*;
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

pub const COL_DATE: &str = "Date";
pub const COL_DAILY_GDU: &str = "Daily GDU";
pub const COL_CUMULATIVE_GDU: &str = "Cumulative GDU";

impl GduTable {
    /// The presented (rounded) rows as a polars `DataFrame`.
    pub fn to_dataframe(&self) -> Result<DataFrame, GduError> {
        let rows = self.rows();
        let dates: Vec<NaiveDate> = rows.iter().map(|row| row.date).collect();
        let daily: Vec<f64> = rows.iter().map(|row| row.daily_gdu).collect();
        let cumulative: Vec<f64> = rows.iter().map(|row| row.cumulative_gdu).collect();

        df!(
            COL_DATE => dates,
            COL_DAILY_GDU => daily,
            COL_CUMULATIVE_GDU => cumulative,
        )
        .map_err(GduError::TableFrame)
    }

    /// Writes the table as comma-separated text with a header row.
    pub fn write_csv<W: Write>(&self, writer: &mut W) -> Result<(), GduError> {
        let mut df = self.to_dataframe()?;
        CsvWriter::new(writer)
            .include_header(true)
            .finish(&mut df)
            .map_err(GduError::CsvWrite)
    }

    /// Writes `<region>_<location>_<plot>_GDU.csv` into `dir`, creating `dir` if needed.
    pub fn export_csv(&self, dir: &Path, selector: &Selector) -> Result<PathBuf, GduError> {
        std::fs::create_dir_all(dir)
            .map_err(|e| GduError::ExportDirCreation(dir.to_path_buf(), e))?;

        let path = dir.join(selector.export_file_name("csv"));
        let mut file =
            File::create(&path).map_err(|e| GduError::ExportFileCreation(path.clone(), e))?;
        self.write_csv(&mut file)?;
        info!("Exported {} GDU rows to {}", self.len(), path.display());
        Ok(path)
    }
}
