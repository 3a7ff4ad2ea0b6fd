use crate::pipeline::PipelineError;
use crate::sites::error::LoadSitesError;
use polars::error::PolarsError;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum GduError {
    #[error(transparent)]
    LoadSites(#[from] LoadSitesError),

    #[error(transparent)]
    Pipeline(#[from] PipelineError),

    #[error("Failed to build GDU table frame")]
    TableFrame(#[source] PolarsError),

    #[error("Failed to write GDU CSV")]
    CsvWrite(#[source] PolarsError),

    #[error("Failed to create export directory '{0}'")]
    ExportDirCreation(PathBuf, #[source] std::io::Error),

    #[error("Failed to create export file '{0}'")]
    ExportFileCreation(PathBuf, #[source] std::io::Error),
}
