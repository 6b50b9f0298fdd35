use super::payload::build_payload;
use super::{SyncError, TicketApi};
use crate::sheet::SheetStore;
use common::model::ticket::{CreatedTicket, TicketId};
use common::requests::SheetEditRequest;
use log::{debug, error, info, warn};
use std::fmt;
use std::sync::Arc;

/// Why an edit did not lead to a sync attempt. None of these are errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IgnoreReason {
    WrongSheet,
    HeaderRow,
    AlreadySynced,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncOutcome {
    Ignored { row: usize, reason: IgnoreReason },
    Synced { row: usize, id: TicketId },
}

impl fmt::Display for SyncOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SyncOutcome::Ignored { row, reason } => {
                let why = match reason {
                    IgnoreReason::WrongSheet => "edit is not on the ticket sheet",
                    IgnoreReason::HeaderRow => "header row",
                    IgnoreReason::AlreadySynced => "already synced",
                };
                write!(f, "Row {}: skipped, {}", row, why)
            }
            SyncOutcome::Synced { row, id } => write!(f, "Row {}: synced as ticket {}", row, id),
        }
    }
}

pub struct SyncHandler {
    sheet_name: String,
    header_row: usize,
    store: Arc<dyn SheetStore>,
    client: Box<dyn TicketApi>,
}

impl SyncHandler {
    pub fn new(
        sheet_name: impl Into<String>,
        header_row: usize,
        store: Arc<dyn SheetStore>,
        client: Box<dyn TicketApi>,
    ) -> Self {
        Self {
            sheet_name: sheet_name.into(),
            header_row,
            store,
            client,
        }
    }

    /// Entry point for the host. Runs [`SyncHandler::on_edit`] and writes one
    /// log line describing what happened. The result is handed back for job
    /// tracking only; nothing is surfaced to the editor.
    pub fn handle_edit(&self, edit: &SheetEditRequest) -> Result<SyncOutcome, SyncError> {
        let result = self.on_edit(edit);
        match &result {
            Ok(outcome @ SyncOutcome::Synced { .. }) => info!("{}", outcome),
            Ok(outcome) => debug!("{}", outcome),
            Err(e) if e.is_user_fixable() => warn!("{}", e),
            Err(e) => error!("{}", e),
        }
        result
    }

    /// Syncs the row an edit touched, if the edit is on the ticket sheet.
    ///
    /// The edited cells must already be in the sheet; the handler only reads
    /// the row and, after a successful creation, commits the id and marker.
    pub fn on_edit(&self, edit: &SheetEditRequest) -> Result<SyncOutcome, SyncError> {
        if edit.sheet != self.sheet_name {
            return Ok(SyncOutcome::Ignored {
                row: edit.row,
                reason: IgnoreReason::WrongSheet,
            });
        }
        self.sync_row(edit.row)
    }

    pub fn sheet_name(&self) -> &str {
        &self.sheet_name
    }

    /// Syncs one row of the ticket sheet.
    pub fn sync_row(&self, row: usize) -> Result<SyncOutcome, SyncError> {
        if row == self.header_row {
            return Ok(SyncOutcome::Ignored {
                row,
                reason: IgnoreReason::HeaderRow,
            });
        }

        let cells = self
            .store
            .read_row(row)
            .map_err(|source| SyncError::Sheet { row, source })?;
        if cells.is_synced() {
            return Ok(SyncOutcome::Ignored {
                row,
                reason: IgnoreReason::AlreadySynced,
            });
        }

        let payload = build_payload(row, &cells)?;

        let response = self
            .client
            .create_ticket(&payload)
            .map_err(|e| SyncError::Transport {
                row,
                message: e.to_string(),
            })?;

        if response.status != 200 {
            return Err(SyncError::Remote {
                row,
                status: response.status,
                body: response.body,
            });
        }

        let created: CreatedTicket =
            serde_json::from_str(&response.body).map_err(|e| SyncError::Transport {
                row,
                message: format!("unreadable ticket API response: {}", e),
            })?;

        self.store
            .mark_synced(row, &created.id)
            .map_err(|source| SyncError::Sheet { row, source })?;

        Ok(SyncOutcome::Synced {
            row,
            id: created.id,
        })
    }
}
