use serde::{Deserialize, Serialize};

/// Lifecycle of one queued sheet edit.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum JobStatus {
    Pending,
    InProgress,
    /// The edit was applied and the sync handler ran. Holds a short summary of
    /// what the handler did.
    Completed(String),
    Failed(String),
}
