use calcgrid_engine::engine::{Cell, CellRef, NumberFormat, in_bounds};

use super::Document;
use crate::error::{CalcgridError, Result};

impl Document {
    /// Set a cell's raw content. Empty content removes the entry; the
    /// store holds no empty cells. One cell erroring never prevents the
    /// rest of the sheet from recalculating.
    pub fn set_cell(&mut self, addr: CellRef, content: &str) -> Result<()> {
        if !in_bounds(&addr) {
            return Err(CalcgridError::OutOfBounds(addr));
        }

        if content.is_empty() {
            self.sheet.remove(&addr);
        } else {
            let format = self.get_cell(&addr).and_then(|cell| cell.format);
            self.sheet.insert(
                addr,
                Cell {
                    raw: content.to_string(),
                    format,
                },
            );
        }

        self.modified = true;
        self.recalculate();
        Ok(())
    }

    /// Clear a cell entirely (content and format).
    pub fn clear_cell(&mut self, addr: &CellRef) {
        if self.sheet.remove(addr).is_some() {
            self.modified = true;
            self.recalculate();
        }
    }

    /// Attach a number format to a cell. Applies to the computed result of
    /// a formula; literal content always displays verbatim.
    pub fn set_format(&mut self, addr: CellRef, format: NumberFormat) -> Result<()> {
        if !in_bounds(&addr) {
            return Err(CalcgridError::OutOfBounds(addr));
        }

        match self.sheet.get_mut(&addr) {
            Some(mut cell) => cell.format = Some(format),
            None => {
                self.sheet.insert(addr, Cell::with_format("", format));
            }
        }

        self.modified = true;
        self.recalculate();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use calcgrid_engine::engine::{CellValue, MAX_COLS, MAX_ROWS};

    fn addr(s: &str) -> CellRef {
        CellRef::parse(s).unwrap()
    }

    #[test]
    fn test_set_cell_marks_modified_and_recalculates() {
        let mut doc = Document::new();
        doc.set_cell(addr("A1"), "2").unwrap();
        doc.set_cell(addr("B1"), "=A1*3").unwrap();
        assert!(doc.modified);
        assert_eq!(doc.display(&addr("B1")), "6");

        doc.set_cell(addr("A1"), "10").unwrap();
        assert_eq!(doc.display(&addr("B1")), "30");
    }

    #[test]
    fn test_empty_content_removes_the_entry() {
        let mut doc = Document::new();
        doc.set_cell(addr("A1"), "5").unwrap();
        doc.set_cell(addr("A1"), "").unwrap();
        assert!(doc.sheet.get(&addr("A1")).is_none());
    }

    #[test]
    fn test_set_cell_rejects_out_of_bounds() {
        let mut doc = Document::new();
        let beyond_cols = CellRef::new(MAX_COLS, 0);
        let beyond_rows = CellRef::new(0, MAX_ROWS);
        assert!(matches!(
            doc.set_cell(beyond_cols, "1"),
            Err(CalcgridError::OutOfBounds(_))
        ));
        assert!(matches!(
            doc.set_cell(beyond_rows, "1"),
            Err(CalcgridError::OutOfBounds(_))
        ));
    }

    #[test]
    fn test_clear_cell_invalidates_dependents() {
        let mut doc = Document::new();
        doc.set_cell(addr("A1"), "5").unwrap();
        doc.set_cell(addr("B1"), "=A1+1").unwrap();
        assert_eq!(doc.display(&addr("B1")), "6");

        doc.clear_cell(&addr("A1"));
        // A missing reference coerces to zero.
        assert_eq!(doc.display(&addr("B1")), "1");
    }

    #[test]
    fn test_set_format_survives_content_edits() {
        let mut doc = Document::new();
        doc.set_cell(addr("A1"), "=1/4").unwrap();
        doc.set_format(addr("A1"), NumberFormat::Percentage).unwrap();
        assert_eq!(doc.display(&addr("A1")), "25%");

        doc.set_cell(addr("A1"), "=3/4").unwrap();
        assert_eq!(doc.display(&addr("A1")), "75%");
    }

    #[test]
    fn test_one_erroring_cell_does_not_stop_siblings() {
        let mut doc = Document::new();
        doc.set_cell(addr("A1"), "=1/0").unwrap();
        doc.set_cell(addr("A2"), "=2+2").unwrap();
        doc.set_cell(addr("A3"), "=A3").unwrap();

        assert_eq!(doc.evaluate_cell(&addr("A1")), CellValue::MathError);
        assert_eq!(doc.display(&addr("A2")), "4");
        assert_eq!(doc.evaluate_cell(&addr("A3")), CellValue::Circular);
    }
}
