//! The tabular data source the sync handler reads rows from and writes ticket
//! ids back into.
//!
//! Rows are addressed the way a spreadsheet addresses them: 1-based, with the
//! header occupying the first row. The store never interprets cell contents;
//! that is the job of `sync::payload`.

mod csv_store;
#[cfg(test)]
pub mod memory;

pub use csv_store::CsvSheet;

use common::model::row::SheetRow;
use common::model::ticket::TicketId;
use common::requests::CellEdit;
use thiserror::Error;

/// Highest row number the store will read or write.
pub const MAX_ROWS: usize = 100_000;

#[derive(Error, Debug)]
pub enum SheetError {
    #[error("Row numbers start at 1, got {0}")]
    InvalidRow(usize),

    #[error("Row {0} is past the last row ({}) of the ticket sheet", MAX_ROWS)]
    RowOutOfRange(usize),

    #[error("Column {0} is outside the ticket sheet")]
    InvalidColumn(usize),

    #[error("Sheet I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Sheet CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Could not replace sheet file: {0}")]
    Persist(#[from] tempfile::PersistError),
}

/// Access to the ticket sheet.
///
/// Implementations must make [`SheetStore::mark_synced`] all-or-nothing: a row
/// either gets both its id and its source marker, or neither.
pub trait SheetStore: Send + Sync {
    /// Reads the full row. Rows past the end of the sheet read as empty.
    fn read_row(&self, row: usize) -> Result<SheetRow, SheetError>;

    /// Applies cell edits to one row, growing the sheet if needed.
    fn apply_edits(&self, row: usize, cells: &[CellEdit]) -> Result<(), SheetError>;

    /// Writes the ticket id and the sync marker into the row as one commit.
    fn mark_synced(&self, row: usize, id: &TicketId) -> Result<(), SheetError>;
}

/// Validates a 1-based row number and returns its 0-based index.
pub fn check_row(row: usize) -> Result<usize, SheetError> {
    if row > MAX_ROWS {
        return Err(SheetError::RowOutOfRange(row));
    }
    row.checked_sub(1).ok_or(SheetError::InvalidRow(row))
}
