use std::path::{Path, PathBuf};

use super::Document;
use crate::error::{CalcgridError, Result};
use crate::storage::{parse_sheet, write_csv, write_sheet};

impl Document {
    /// Save to the current file path. Returns the path saved to.
    pub fn save_file(&mut self) -> Result<PathBuf> {
        let Some(path) = self.file_path.clone() else {
            return Err(CalcgridError::NoFilePath);
        };
        write_sheet(&path, &self.sheet)?;
        self.modified = false;
        Ok(path)
    }

    /// Save to an explicit path and adopt it as the current one.
    pub fn save_file_as(&mut self, path: &Path) -> Result<()> {
        write_sheet(path, &self.sheet)?;
        self.file_path = Some(path.to_path_buf());
        self.modified = false;
        Ok(())
    }

    /// Load a sheet file, replacing the current sheet. The parse runs
    /// before any state is touched, so a bad file leaves the document
    /// unchanged. Loading ends with one eager recalculation pass so every
    /// display value is ready before the first read.
    pub fn load_file(&mut self, path: &Path) -> Result<()> {
        let sheet = parse_sheet(path)?;
        self.replace_sheet(sheet);
        self.file_path = Some(path.to_path_buf());
        self.modified = false;
        Ok(())
    }

    /// Export displayed values as CSV, either for an explicit rectangle of
    /// (col, row) corners or for the occupied bounding box.
    pub fn export_csv(
        &self,
        path: &Path,
        range: Option<((usize, usize), (usize, usize))>,
    ) -> Result<()> {
        write_csv(path, self, range)
    }
}
