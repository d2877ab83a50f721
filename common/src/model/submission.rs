use serde::{Deserialize, Serialize};

/// Lifecycle of an accepted submission on its way to storage.
///
/// The backend answers a submission immediately with an id and `Pending`;
/// the persistence writer later moves it to `Stored` or `Failed`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum SubmissionStatus {
    /// Accepted and queued for the writer.
    Pending,
    /// Persisted.
    Stored,
    /// The writer could not persist it. Contains the error message.
    Failed(String),
}
