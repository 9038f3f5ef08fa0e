use std::collections::HashMap;
use std::path::PathBuf;

use calcgrid_engine::engine::{Cell, CellRef, CellValue, Sheet, evaluate, new_sheet};

/// UI-agnostic document state for one sheet.
///
/// Recalculation is eager: every mutation re-runs a whole-sheet pass that
/// evaluates each formula-bearing cell into `computed`. Because the engine
/// is a pure function of the sheet snapshot, a cached value can never
/// disagree with an on-demand evaluation of the same snapshot.
pub struct Document {
    /// The sheet store (DashMap is internally Arc-based, clones are cheap).
    pub sheet: Sheet,
    /// Current file path.
    pub file_path: Option<PathBuf>,
    /// Whether the sheet has been modified since the last save.
    pub modified: bool,
    /// Computed values from the last recalculation pass.
    pub(crate) computed: HashMap<CellRef, CellValue>,
}

impl Document {
    /// Create an empty document. Side-effect free: does not touch the
    /// filesystem.
    pub fn new() -> Self {
        Document {
            sheet: new_sheet(),
            file_path: None,
            modified: false,
            computed: HashMap::new(),
        }
    }

    /// Create a document and load a file if one is given and exists.
    pub fn with_file(path: Option<PathBuf>) -> crate::Result<Self> {
        let mut doc = Self::new();
        if let Some(ref p) = path {
            if p.exists() {
                doc.load_file(p)?;
            } else {
                doc.file_path = Some(p.clone());
            }
        }
        Ok(doc)
    }

    /// Re-evaluate every formula-bearing cell from the current snapshot.
    pub fn recalculate(&mut self) {
        // Collect targets first; evaluation does its own lookups and must
        // not run while an iterator holds a shard guard.
        let targets: Vec<CellRef> = self
            .sheet
            .iter()
            .filter(|entry| entry.value().is_formula())
            .map(|entry| entry.key().clone())
            .collect();

        self.computed.clear();
        for addr in targets {
            let value = evaluate(&self.sheet, &addr);
            self.computed.insert(addr, value);
        }
    }

    /// Evaluate a cell directly against the current snapshot, bypassing
    /// the cache. Identical to the cached result by construction.
    pub fn evaluate_cell(&self, addr: &CellRef) -> CellValue {
        evaluate(&self.sheet, addr)
    }

    /// The displayed value for a cell: cached result for formulas,
    /// verbatim content for everything else.
    pub fn display(&self, addr: &CellRef) -> String {
        if let Some(value) = self.computed.get(addr) {
            return value.to_string();
        }
        match self.get_cell(addr) {
            Some(cell) if cell.is_formula() => self.evaluate_cell(addr).to_string(),
            Some(cell) => cell.raw,
            None => String::new(),
        }
    }

    /// Addresses currently present in the store, in row-major order.
    pub fn occupied(&self) -> Vec<CellRef> {
        let mut cells: Vec<CellRef> = self.sheet.iter().map(|e| e.key().clone()).collect();
        cells.sort_by(|a, b| a.row.cmp(&b.row).then(a.col.cmp(&b.col)));
        cells
    }

    pub(crate) fn replace_sheet(&mut self, sheet: Sheet) {
        self.sheet = sheet;
        self.recalculate();
    }

    /// Raw content for editing, empty string if the cell is unset.
    pub fn raw(&self, addr: &CellRef) -> String {
        self.sheet
            .get(addr)
            .map(|cell| cell.raw.clone())
            .unwrap_or_default()
    }

    pub(crate) fn get_cell(&self, addr: &CellRef) -> Option<Cell> {
        self.sheet.get(addr).map(|cell| cell.clone())
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}
