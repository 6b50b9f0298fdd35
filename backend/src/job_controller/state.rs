//! Tracks the status of queued sheet edits.
//!
//! Every edit accepted by `POST /api/sheet/edit` gets a job id and a
//! `JobStatus`. The sync worker (`job_controller::worker`) reports progress as
//! `JobUpdate` messages over an MPSC channel, and `start_job_updater` folds
//! them into the shared map that the status endpoint reads.

use common::jobs::JobStatus;
use common::requests::SheetEditRequest;
use std::{
    collections::{HashMap, VecDeque},
    sync::Arc,
};
use tokio::sync::{mpsc, RwLock};

/// Shared between the Actix handlers (as `web::Data`), the updater task and
/// the sync worker.
#[derive(Clone)]
pub struct JobsState {
    /// Job id to current status. Written only by `start_job_updater` and by
    /// the edit endpoint when it registers a new job.
    pub jobs: Arc<RwLock<HashMap<String, JobStatus>>>,

    /// Queue of edits waiting for the sync worker. The worker takes them in
    /// order, one at a time.
    pub edits: mpsc::Sender<EditJob>,
}

/// One sheet edit waiting to be applied and synced.
#[derive(Debug)]
pub struct EditJob {
    pub(crate) job_id: String,
    pub(crate) request: SheetEditRequest,
}

/// Represents a status update for a specific edit job.
#[derive(Debug)]
pub struct JobUpdate {
    pub(crate) job_id: String,
    pub(crate) status: JobStatus,
}

impl JobsState {
    /// Registers a new job as `Pending` and queues its edit.
    ///
    /// Fails when the worker is gone; the job is then dropped again, since
    /// its id is never handed out.
    pub async fn enqueue(&self, request: SheetEditRequest) -> Result<String, String> {
        let job_id = uuid::Uuid::new_v4().to_string();
        self.jobs
            .write()
            .await
            .insert(job_id.clone(), JobStatus::Pending);

        let job = EditJob {
            job_id: job_id.clone(),
            request,
        };
        if self.edits.send(job).await.is_err() {
            self.jobs.write().await.remove(&job_id);
            return Err("Sync worker is not running".to_string());
        }
        Ok(job_id)
    }

    pub async fn status(&self, job_id: &str) -> Option<JobStatus> {
        self.jobs.read().await.get(job_id).cloned()
    }
}

/// How many finished jobs stay queryable before the oldest are forgotten.
pub const FINISHED_JOBS_KEPT: usize = 1_000;

/// Starts the central job state updater task.
///
/// Runs until every `JobUpdate` sender is dropped, applying each update to the
/// shared map. Only the newest `FINISHED_JOBS_KEPT` completed or failed jobs
/// are kept; pending and running jobs are never evicted.
pub async fn start_job_updater(state: JobsState, rx: mpsc::Receiver<JobUpdate>) {
    run_job_updater(state, rx, FINISHED_JOBS_KEPT).await
}

async fn run_job_updater(state: JobsState, mut rx: mpsc::Receiver<JobUpdate>, keep: usize) {
    let mut finished: VecDeque<String> = VecDeque::new();
    while let Some(update) = rx.recv().await {
        let done = matches!(update.status, JobStatus::Completed(_) | JobStatus::Failed(_));
        let mut jobs = state.jobs.write().await;
        jobs.insert(update.job_id.clone(), update.status);
        if done {
            finished.push_back(update.job_id);
            while finished.len() > keep {
                if let Some(old) = finished.pop_front() {
                    jobs.remove(&old);
                }
            }
        }
    }
}
