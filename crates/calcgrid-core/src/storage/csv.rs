//! CSV export of evaluated display values.

use std::io::Write;
use std::path::Path;

use calcgrid_engine::engine::CellRef;

use crate::document::Document;
use crate::error::Result;

/// Export displayed values to CSV. With no explicit range, the occupied
/// bounding box is exported; an empty sheet writes an empty file.
pub fn write_csv(
    path: &Path,
    doc: &Document,
    range: Option<((usize, usize), (usize, usize))>,
) -> Result<()> {
    let mut file = std::fs::File::create(path)?;
    let Some(((min_col, min_row), (max_col, max_row))) = range.or_else(|| bounding_box(doc))
    else {
        return Ok(());
    };

    for row in min_row..=max_row {
        let mut fields = Vec::with_capacity(max_col - min_col + 1);
        for col in min_col..=max_col {
            let value = doc.display(&CellRef::new(col, row));
            fields.push(escape_csv_field(&value));
        }
        writeln!(file, "{}", fields.join(","))?;
    }

    Ok(())
}

fn bounding_box(doc: &Document) -> Option<((usize, usize), (usize, usize))> {
    let occupied = doc.occupied();
    let first = occupied.first()?;
    let (mut min_col, mut min_row) = (first.col, first.row);
    let (mut max_col, mut max_row) = (first.col, first.row);
    for addr in &occupied {
        min_col = min_col.min(addr.col);
        min_row = min_row.min(addr.row);
        max_col = max_col.max(addr.col);
        max_row = max_row.max(addr.row);
    }
    Some(((min_col, min_row), (max_col, max_row)))
}

/// Escape a field for CSV output.
fn escape_csv_field(field: &str) -> String {
    // Guard against CSV formula injection in spreadsheet apps.
    let first_non_space = field.trim_start_matches([' ', '\t']).chars().next();
    let safe_field = if matches!(first_non_space, Some('=' | '+' | '-' | '@')) {
        format!("'{}", field)
    } else {
        field.to_string()
    };

    if safe_field.contains(',')
        || safe_field.contains('"')
        || safe_field.contains('\n')
        || safe_field.contains('\r')
    {
        format!("\"{}\"", safe_field.replace('"', "\"\""))
    } else {
        safe_field
    }
}
