//! Row-to-ticket synchronization.
//!
//! An edit to the ticket sheet runs [`SyncHandler::handle_edit`], which turns
//! the edited row into a ticket through the ticket API at most once:
//!
//! 1. Edits on other sheets and on the header row are ignored.
//! 2. Rows whose `Source` cell is already filled are ignored. This is the only
//!    guard against submitting a row twice.
//! 3. Required fields are checked and the payload is built (`payload`).
//! 4. One `POST /tickets/from-sheet` is sent (`client`).
//! 5. On HTTP 200 the returned id and the `Sheet` marker are written back in a
//!    single commit. Anything else leaves the row untouched so the next edit
//!    retries it.

mod client;
mod handler;
mod payload;

pub use client::{ApiResponse, HttpTicketClient, TicketApi, TransportError};
pub use handler::{IgnoreReason, SyncHandler, SyncOutcome};

use crate::sheet::SheetError;
use thiserror::Error;

/// Why a sync attempt did not produce a ticket.
#[derive(Error, Debug)]
pub enum SyncError {
    #[error("Row {row}: missing required fields: {}", fields.join(", "))]
    MissingFields {
        row: usize,
        fields: Vec<&'static str>,
    },

    #[error("Row {row}: invalid {field} {value:?}: {reason}")]
    InvalidField {
        row: usize,
        field: &'static str,
        value: String,
        reason: String,
    },

    #[error("Row {row}: ticket API responded with status {status}: {body}")]
    Remote { row: usize, status: u16, body: String },

    #[error("Row {row}: ticket request failed: {message}")]
    Transport { row: usize, message: String },

    #[error("Row {row}: sheet access failed: {source}")]
    Sheet {
        row: usize,
        #[source]
        source: SheetError,
    },
}

impl SyncError {
    /// Short machine-readable name, used by the sync log.
    pub fn kind(&self) -> &'static str {
        match self {
            SyncError::MissingFields { .. } => "missing_fields",
            SyncError::InvalidField { .. } => "invalid_field",
            SyncError::Remote { .. } => "remote_error",
            SyncError::Transport { .. } => "transport_error",
            SyncError::Sheet { .. } => "sheet_error",
        }
    }

    /// Missing or malformed cells are for the editor to fix; everything else
    /// is an infrastructure problem.
    pub fn is_user_fixable(&self) -> bool {
        matches!(
            self,
            SyncError::MissingFields { .. } | SyncError::InvalidField { .. }
        )
    }
}
