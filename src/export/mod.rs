//! Spreadsheet export of selected hits.
//!
//! Projects the selected hits of the current page onto the seven fixed
//! columns and encodes them as a single-sheet xlsx workbook.

use crate::model::{Column, ExportError, ResultSet};
use crate::state::SelectionSet;
use rust_xlsxwriter::{Format, Workbook};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

/// Base name of the exported workbook.
pub const ARTIFACT_NAME: &str = "selected_records";

/// Worksheet name inside the workbook.
pub const SHEET_NAME: &str = "Selected_Records";

// ===== ExportRecord =====

/// One exported row, values in [`Column::ALL`] order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportRecord {
    cells: [String; 7],
}

impl ExportRecord {
    /// Value of `column` (already `N/A`-substituted).
    pub fn get(&self, column: Column) -> &str {
        let idx = Column::ALL
            .iter()
            .position(|c| *c == column)
            .unwrap_or_default();
        &self.cells[idx]
    }

    /// All values in column order.
    pub fn cells(&self) -> &[String; 7] {
        &self.cells
    }
}

/// Selected hits as export records, in result order.
///
/// Selected ids that are not on the current page are skipped.
pub fn export_records(results: &ResultSet, selection: &SelectionSet) -> Vec<ExportRecord> {
    results
        .hits()
        .iter()
        .filter(|hit| selection.contains(hit.id()))
        .map(|hit| ExportRecord {
            cells: hit.row().map(str::to_string),
        })
        .collect()
}

// ===== ExportArtifact =====

/// An encoded workbook ready to be written.
#[derive(Debug, Clone)]
pub struct ExportArtifact {
    bytes: Vec<u8>,
    rows: usize,
}

impl ExportArtifact {
    /// File name the artifact is saved under.
    pub fn file_name(&self) -> String {
        format!("{ARTIFACT_NAME}.xlsx")
    }

    /// Encoded xlsx bytes.
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Number of data rows (header excluded).
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Write the workbook into `dir`, creating it if needed.
    pub fn write_to(&self, dir: &Path) -> Result<PathBuf, ExportError> {
        let path = dir.join(self.file_name());
        fs::create_dir_all(dir).map_err(|source| ExportError::Io {
            path: dir.to_path_buf(),
            source,
        })?;
        fs::write(&path, &self.bytes).map_err(|source| ExportError::Io {
            path: path.clone(),
            source,
        })?;
        info!(path = %path.display(), rows = self.rows, "Exported selected records");
        Ok(path)
    }
}

/// Encode the selected hits.
///
/// Returns `Ok(None)` when nothing on the page is selected.
pub fn export(
    results: &ResultSet,
    selection: &SelectionSet,
) -> Result<Option<ExportArtifact>, ExportError> {
    let records = export_records(results, selection);
    if records.is_empty() {
        return Ok(None);
    }
    let bytes = encode(&records)?;
    Ok(Some(ExportArtifact {
        bytes,
        rows: records.len(),
    }))
}

fn encode(records: &[ExportRecord]) -> Result<Vec<u8>, ExportError> {
    let mut workbook = Workbook::new();
    let header = Format::new().set_bold();
    let sheet = workbook.add_worksheet();
    sheet.set_name(SHEET_NAME)?;

    for (col, column) in (0u16..).zip(Column::ALL) {
        sheet.write_string_with_format(0, col, column.header(), &header)?;
    }
    for (row, record) in (1u32..).zip(records) {
        for (col, value) in (0u16..).zip(record.cells()) {
            sheet.write_string(row, col, value.as_str())?;
        }
    }

    Ok(workbook.save_to_buffer()?)
}
