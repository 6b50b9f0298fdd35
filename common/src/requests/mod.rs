use serde::{Deserialize, Serialize};

/// A single cell change. `column` is 1-based, like a spreadsheet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CellEdit {
    pub column: usize,
    pub value: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
/// Request payload for the sheet edit endpoint.
/// `row` is the 1-based row the edit touched; `cells` may be empty when the
/// edit has already been applied elsewhere and only the sync should run.
pub struct SheetEditRequest {
    pub sheet: String,
    pub row: usize,
    #[serde(default)]
    pub cells: Vec<CellEdit>,
}

#[derive(Debug, Deserialize)]
/// Query string of the sync log endpoint.
pub struct SyncLogQuery {
    pub limit: Option<usize>,
}
