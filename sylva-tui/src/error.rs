//! Application errors.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use sylva_lib::TreeError;

/// Errors that end the application.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("terminal error: {0}")]
    Io(#[from] io::Error),
    #[error("could not read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("invalid settings: {0}")]
    Settings(#[from] serde_json::Error),
    #[error(transparent)]
    Tree(#[from] TreeError),
}
