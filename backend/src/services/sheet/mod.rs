//! Edit events for the ticket sheet.
//!
//! The provided routes are:
//! - `POST /api/sheet/edit`: takes a `SheetEditRequest` (sheet name, 1-based
//!   row, and the cells that changed), queues it for the sync worker and
//!   returns `{"job_id": ...}` straight away. The worker applies the cells to
//!   the sheet and then runs the sync handler on the row.
//!
//! - `GET /api/sheet/status/{job_id}`: returns the job's `JobStatus`
//!   (`Pending`, `InProgress`, `Completed` or `Failed`) from the shared
//!   `JobsState`. A completed job carries a one-line summary of what the sync
//!   handler did; a failed one carries the reason the row was not synced.

use actix_web::web::{get, post, scope};
use actix_web::Scope;

mod edit;
mod get_status;

const API_PATH: &str = "/api/sheet";

/// Configures and returns the Actix scope for sheet edit routes.
pub fn configure_routes() -> Scope {
    scope(API_PATH)
        .route("/edit", post().to(edit::process))
        .route("/status/{job_id}", get().to(get_status::process))
}
