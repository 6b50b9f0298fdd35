//! The sync worker: a dedicated thread that applies queued edits and runs the
//! sync handler, strictly one edit at a time and in arrival order.
//!
//! The handler blocks on its HTTP call, so it lives on its own OS thread
//! rather than on the Actix runtime. It talks to the async side only through
//! the `edits` and `updates` channels.

use super::state::{EditJob, JobUpdate};
use crate::audit::SyncLog;
use crate::sheet::SheetStore;
use crate::sync::{SyncError, SyncHandler, TransportError};
use common::jobs::JobStatus;
use log::{error, info, warn};
use std::sync::Arc;
use std::thread;
use tokio::sync::mpsc;

/// Spawns the worker thread. `build` runs on that thread, so the blocking
/// HTTP client is created and dropped there.
///
/// Edits to the ticket sheet are written into `store` before the handler
/// sees them; the handler itself only reads rows and commits ticket ids.
///
/// The thread exits when every edit sender has been dropped, or right away if
/// `build` fails (the closed queue then makes new edits fail fast).
pub fn spawn_sync_worker<F>(
    build: F,
    store: Arc<dyn SheetStore>,
    log: SyncLog,
    mut edits: mpsc::Receiver<EditJob>,
    updates: mpsc::Sender<JobUpdate>,
) -> std::io::Result<thread::JoinHandle<()>>
where
    F: FnOnce() -> Result<SyncHandler, TransportError> + Send + 'static,
{
    thread::Builder::new()
        .name("sheet-sync".to_string())
        .spawn(move || {
            let handler = match build() {
                Ok(handler) => handler,
                Err(e) => {
                    error!("Could not start sync worker: {}", e);
                    return;
                }
            };
            info!("Sync worker started");
            while let Some(job) = edits.blocking_recv() {
                run_job(&handler, store.as_ref(), &log, &updates, job);
            }
            info!("Sync worker stopped");
        })
}

fn run_job(
    handler: &SyncHandler,
    store: &dyn SheetStore,
    log: &SyncLog,
    updates: &mpsc::Sender<JobUpdate>,
    job: EditJob,
) {
    let EditJob { job_id, request } = job;
    let _ = updates.blocking_send(JobUpdate {
        job_id: job_id.clone(),
        status: JobStatus::InProgress,
    });

    let applied = if request.sheet == handler.sheet_name() && !request.cells.is_empty() {
        store.apply_edits(request.row, &request.cells)
    } else {
        Ok(())
    };

    let result = match applied {
        Ok(()) => handler.handle_edit(&request),
        Err(source) => {
            let e = SyncError::Sheet {
                row: request.row,
                source,
            };
            error!("{}", e);
            Err(e)
        }
    };

    if let Err(e) = log.record(&request.sheet, request.row, &result) {
        warn!("Row {}: could not record sync attempt: {}", request.row, e);
    }

    let status = match &result {
        Ok(outcome) => JobStatus::Completed(outcome.to_string()),
        Err(e) => JobStatus::Failed(e.to_string()),
    };
    let _ = updates.blocking_send(JobUpdate { job_id, status });
}
