//! Sparse storage for raw cell content.
//!
//! A [`Sheet`] maps addresses to raw content strings. Content beginning
//! with `=` is a formula; anything else is displayed verbatim. The store
//! never holds computed values, and addresses missing from it evaluate as
//! empty content.

use dashmap::DashMap;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use super::cell_ref::CellRef;
use super::format::NumberFormat;

/// Grid bounds. The editing surface must not admit addresses beyond these.
pub const MAX_ROWS: usize = 10_000;
/// Columns A through ZZ.
pub const MAX_COLS: usize = 702;

/// Raw content of one cell, plus its optional number format.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Cell {
    pub raw: String,
    pub format: Option<NumberFormat>,
}

impl Cell {
    pub fn new(raw: impl Into<String>) -> Cell {
        Cell {
            raw: raw.into(),
            format: None,
        }
    }

    pub fn with_format(raw: impl Into<String>, format: NumberFormat) -> Cell {
        Cell {
            raw: raw.into(),
            format: Some(format),
        }
    }

    pub fn is_formula(&self) -> bool {
        self.raw.starts_with('=')
    }
}

/// Shared sparse sheet store (DashMap is internally Arc-based, clones are cheap).
pub type Sheet = Arc<DashMap<CellRef, Cell>>;

pub fn new_sheet() -> Sheet {
    Arc::new(DashMap::new())
}

/// Whether an address lies inside the configured grid bounds.
pub fn in_bounds(addr: &CellRef) -> bool {
    addr.col < MAX_COLS && addr.row < MAX_ROWS
}
