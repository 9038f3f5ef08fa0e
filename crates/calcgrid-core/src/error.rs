//! Error types for Calcgrid core.

use thiserror::Error;

use calcgrid_engine::engine::{CellRef, MalformedAddress};

/// Errors that can occur in the document and storage layer.
#[derive(Error, Debug)]
pub enum CalcgridError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid sheet file: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Address(#[from] MalformedAddress),

    #[error("cell {0} is outside the sheet bounds")]
    OutOfBounds(CellRef),

    #[error("no file path set")]
    NoFilePath,
}

pub type Result<T> = std::result::Result<T, CalcgridError>;
