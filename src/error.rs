use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Failures while retrieving a remote dosage log.
/// These are reported and the workflow moves on; the parser catches the missing file.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("no resource identifier found under key '{key}'")]
    MissingIdentifier { key: String },
    #[error("request to {url} failed: {source}")]
    Network { url: String, source: ureq::Error },
    #[error("download of {filename} returned status {status}")]
    Status { filename: String, status: u16 },
    #[error("could not write {}: {source}", path.display())]
    Write { path: PathBuf, source: io::Error },
}

/// Failures while reading a dosage log into a series.
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("could not read csv {}: {source}", path.display())]
    Csv { path: PathBuf, source: csv::Error },
    #[error("csv {} has no column '{column}'", path.display())]
    MissingColumn { path: PathBuf, column: String },
    #[error("csv {} row {row}: dose '{value}' is not a number", path.display())]
    InvalidDose {
        path: PathBuf,
        row: usize,
        value: String,
    },
}

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("could not create output directory {}: {source}", path.display())]
    OutputDir { path: PathBuf, source: io::Error },
    #[error("could not draw chart {}: {reason}", path.display())]
    Draw { path: PathBuf, reason: String },
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value '{value}' for {arg}: {reason}")]
    InvalidValue {
        arg: String,
        value: String,
        reason: String,
    },
}

/// Anything that ends a run with a failure status.
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error(transparent)]
    Render(#[from] RenderError),
}
