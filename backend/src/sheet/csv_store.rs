use super::{check_row, SheetError, SheetStore};
use common::model::row::{header_cells, Column, SheetRow, ROW_WIDTH, SYNC_MARKER};
use common::model::ticket::TicketId;
use common::requests::CellEdit;
use log::info;
use std::io::BufWriter;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tempfile::NamedTempFile;

/// A ticket sheet kept in a CSV file.
///
/// Every write rewrites the whole file through a temporary file in the same
/// directory and renames it over the original, so readers never see a half
/// written sheet.
pub struct CsvSheet {
    path: PathBuf,
    lock: Mutex<()>,
}

impl CsvSheet {
    /// Opens the sheet. If the file is missing or empty, the column titles
    /// are written at `header_row` (1-based).
    pub fn open(path: impl Into<PathBuf>, header_row: usize) -> Result<Self, SheetError> {
        let sheet = CsvSheet {
            path: path.into(),
            lock: Mutex::new(()),
        };
        sheet.ensure_headers(header_row)?;
        Ok(sheet)
    }

    fn ensure_headers(&self, header_row: usize) -> Result<(), SheetError> {
        let index = check_row(header_row)?;
        let rows = self.load()?;
        if rows.iter().all(|r| r.iter().all(|c| c.trim().is_empty())) {
            let mut rows = vec![vec![String::new(); ROW_WIDTH]; index];
            rows.push(header_cells());
            self.store(&rows)?;
            info!(
                "Created ticket sheet header at row {} in {}",
                header_row,
                self.path.display()
            );
        }
        Ok(())
    }

    fn load(&self) -> Result<Vec<Vec<String>>, SheetError> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_path(&self.path)?;

        let mut rows = Vec::new();
        for record in reader.records() {
            let record = record?;
            rows.push(record.iter().map(|c| c.to_string()).collect());
        }
        Ok(rows)
    }

    fn store(&self, rows: &[Vec<String>]) -> Result<(), SheetError> {
        let dir = self
            .path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."));
        let tmp = NamedTempFile::new_in(dir)?;
        {
            let mut writer = csv::WriterBuilder::new()
                .flexible(true)
                .from_writer(BufWriter::new(tmp.as_file()));
            for row in rows {
                writer.write_record(row)?;
            }
            writer.flush()?;
        }
        tmp.persist(&self.path)?;
        Ok(())
    }

    /// Loads the sheet, lets `edit` change one row, then writes it back.
    fn update_row<F>(&self, row: usize, edit: F) -> Result<(), SheetError>
    where
        F: FnOnce(&mut Vec<String>),
    {
        let index = check_row(row)?;
        let _guard = self.lock.lock().unwrap_or_else(|p| p.into_inner());
        let mut rows = self.load()?;
        if rows.len() <= index {
            // Blank lines are skipped on read, so filler rows get empty cells.
            rows.resize_with(index + 1, || vec![String::new(); ROW_WIDTH]);
        }
        let cells = &mut rows[index];
        if cells.len() < ROW_WIDTH {
            cells.resize(ROW_WIDTH, String::new());
        }
        edit(cells);
        self.store(&rows)
    }

    #[cfg(test)]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SheetStore for CsvSheet {
    fn read_row(&self, row: usize) -> Result<SheetRow, SheetError> {
        let index = check_row(row)?;
        let _guard = self.lock.lock().unwrap_or_else(|p| p.into_inner());
        let rows = self.load()?;
        Ok(rows
            .get(index)
            .map(|cells| SheetRow::from_cells(cells))
            .unwrap_or_default())
    }

    fn apply_edits(&self, row: usize, edits: &[CellEdit]) -> Result<(), SheetError> {
        let columns = edits
            .iter()
            .map(|e| Column::from_number(e.column).ok_or(SheetError::InvalidColumn(e.column)))
            .collect::<Result<Vec<_>, _>>()?;
        if columns.is_empty() {
            return Ok(());
        }
        self.update_row(row, |cells| {
            for (column, edit) in columns.into_iter().zip(edits) {
                cells[column.index()] = edit.value.clone();
            }
        })
    }

    fn mark_synced(&self, row: usize, id: &TicketId) -> Result<(), SheetError> {
        self.update_row(row, |cells| {
            cells[Column::Id.index()] = id.to_string();
            cells[Column::Source.index()] = SYNC_MARKER.to_string();
        })
    }
}
