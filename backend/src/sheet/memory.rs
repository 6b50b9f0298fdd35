use super::{check_row, SheetError, SheetStore};
use common::model::row::{header_cells, Column, SheetRow, SYNC_MARKER};
use common::model::ticket::TicketId;
use common::requests::CellEdit;
use std::collections::HashMap;
use std::sync::Mutex;

/// In-memory sheet that counts writes, for handler tests.
#[derive(Default)]
pub struct MemorySheet {
    rows: Mutex<HashMap<usize, SheetRow>>,
    writes: Mutex<usize>,
}

impl MemorySheet {
    pub fn new() -> Self {
        let sheet = MemorySheet::default();
        sheet
            .rows
            .lock()
            .unwrap()
            .insert(1, SheetRow::from_cells(&header_cells()));
        sheet
    }

    pub fn with_row(self, row: usize, cells: &[&str]) -> Self {
        self.rows
            .lock()
            .unwrap()
            .insert(row, SheetRow::from_cells(cells));
        self
    }

    pub fn row(&self, row: usize) -> SheetRow {
        self.rows
            .lock()
            .unwrap()
            .get(&row)
            .cloned()
            .unwrap_or_default()
    }

    pub fn writes(&self) -> usize {
        *self.writes.lock().unwrap()
    }
}

impl SheetStore for MemorySheet {
    fn read_row(&self, row: usize) -> Result<SheetRow, SheetError> {
        check_row(row)?;
        Ok(self.row(row))
    }

    fn apply_edits(&self, row: usize, cells: &[CellEdit]) -> Result<(), SheetError> {
        check_row(row)?;
        let columns = cells
            .iter()
            .map(|e| Column::from_number(e.column).ok_or(SheetError::InvalidColumn(e.column)))
            .collect::<Result<Vec<_>, _>>()?;
        let mut rows = self.rows.lock().unwrap();
        let target = rows.entry(row).or_default();
        for (column, edit) in columns.into_iter().zip(cells) {
            *target.cell_mut(column) = edit.value.clone();
        }
        Ok(())
    }

    fn mark_synced(&self, row: usize, id: &TicketId) -> Result<(), SheetError> {
        check_row(row)?;
        let mut rows = self.rows.lock().unwrap();
        let target = rows.entry(row).or_default();
        target.id = id.to_string();
        target.source = SYNC_MARKER.to_string();
        *self.writes.lock().unwrap() += 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bad_column_leaves_row_untouched() {
        let sheet = MemorySheet::new().with_row(2, &["", "5", "task", "Paint"]);
        let err = sheet
            .apply_edits(
                2,
                &[
                    CellEdit { column: 4, value: "Sand".into() },
                    CellEdit { column: 12, value: "x".into() },
                ],
            )
            .unwrap_err();

        assert!(matches!(err, SheetError::InvalidColumn(12)));
        assert_eq!(sheet.row(2).issue, "Paint");
    }
}
