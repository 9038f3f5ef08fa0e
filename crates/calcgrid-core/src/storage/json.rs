//! Sheet file parsing and writing.
//!
//! The on-disk format is a JSON object mapping address strings to raw
//! content strings, formulas included. Computed values and format tags are
//! never written; loading re-derives every display value.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use calcgrid_engine::engine::{Cell, CellRef, Sheet, in_bounds};

use crate::error::{CalcgridError, Result};

/// Parse a sheet file.
pub fn parse_sheet(path: &Path) -> Result<Sheet> {
    let content = fs::read_to_string(path)?;
    parse_sheet_content(&content)
}

/// Parse sheet content from a string.
pub fn parse_sheet_content(content: &str) -> Result<Sheet> {
    let entries: BTreeMap<String, String> = serde_json::from_str(content)?;

    let sheet: Sheet = std::sync::Arc::new(dashmap::DashMap::new());
    for (name, raw) in entries {
        let addr = CellRef::parse(&name)?;
        if !in_bounds(&addr) {
            return Err(CalcgridError::OutOfBounds(addr));
        }
        if raw.is_empty() {
            continue;
        }
        sheet.insert(addr, Cell::new(raw));
    }
    Ok(sheet)
}

/// Write a sheet to a file.
pub fn write_sheet(path: &Path, sheet: &Sheet) -> Result<()> {
    fs::write(path, write_sheet_content(sheet))?;
    Ok(())
}

/// Render a sheet as the JSON file format. Output is deterministic:
/// entries are sorted by address string.
pub fn write_sheet_content(sheet: &Sheet) -> String {
    let mut entries = BTreeMap::new();
    for entry in sheet.iter() {
        if entry.value().raw.is_empty() {
            continue;
        }
        entries.insert(entry.key().to_string(), entry.value().raw.clone());
    }

    let mut content = serde_json::to_string_pretty(&entries)
        .expect("string map must serialize as JSON");
    content.push('\n');
    content
}
