//! calcgrid-core - UI-agnostic document model + storage.

pub mod document;
pub mod error;
pub mod storage;

pub use document::Document;
pub use error::{CalcgridError, Result};

pub use calcgrid_engine::engine::{Cell, CellRef, CellValue, NumberFormat};
