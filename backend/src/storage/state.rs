//! Tracks submissions between acceptance and storage.
//!
//! Handlers never touch SQLite directly. An accepted submission is marked
//! `Pending` in `SubmissionsState::statuses` and queued on `tx`; the writer
//! task started by `start_submission_writer` stores it and flips the status to
//! `Stored` or `Failed`.

use crate::storage::db::{self, SubmissionRecord};
use common::model::submission::SubmissionStatus;
use log::{error, info};
use std::path::PathBuf;
use std::{collections::HashMap, sync::Arc};
use tokio::sync::{mpsc, RwLock};

/// Shared between all workers as `web::Data`.
#[derive(Clone)]
pub struct SubmissionsState {
    /// Status of every submission accepted since start-up, keyed by id.
    pub statuses: Arc<RwLock<HashMap<String, SubmissionStatus>>>,

    /// Queue drained by the writer task.
    pub tx: mpsc::Sender<SubmissionRecord>,

    /// Database the writer stores into. Also consulted for submissions
    /// accepted by an earlier run.
    pub database: PathBuf,
}

impl SubmissionsState {
    /// Creates the state plus the receiving end of its queue.
    pub fn new(database: PathBuf, capacity: usize) -> (Self, mpsc::Receiver<SubmissionRecord>) {
        let (tx, rx) = mpsc::channel(capacity);
        let state = Self {
            statuses: Arc::new(RwLock::new(HashMap::new())),
            tx,
            database,
        };
        (state, rx)
    }

    /// Current status of `id`, falling back to the database for submissions
    /// that are no longer in memory.
    pub async fn status_of(&self, id: &str) -> Result<Option<SubmissionStatus>, String> {
        if let Some(status) = self.statuses.read().await.get(id) {
            return Ok(Some(status.clone()));
        }

        let database = self.database.clone();
        let id = id.to_string();
        let found = tokio::task::spawn_blocking(move || db::find_submission(&database, &id))
            .await
            .map_err(|e| e.to_string())?
            .map_err(|e| e.to_string())?;
        Ok(found.map(|_| SubmissionStatus::Stored))
    }
}

/// Stores queued submissions one at a time until every sender is dropped.
pub async fn start_submission_writer(
    state: SubmissionsState,
    mut rx: mpsc::Receiver<SubmissionRecord>,
) {
    while let Some(record) = rx.recv().await {
        let id = record.id.clone();
        let database = state.database.clone();
        let outcome =
            tokio::task::spawn_blocking(move || db::insert_submission(&database, &record)).await;

        let status = match outcome {
            Ok(Ok(())) => {
                info!("submission {} stored", id);
                SubmissionStatus::Stored
            }
            Ok(Err(e)) => {
                error!("submission {} could not be stored: {}", id, e);
                SubmissionStatus::Failed(e.to_string())
            }
            Err(e) => {
                error!("writer task for submission {} panicked: {}", id, e);
                SubmissionStatus::Failed(e.to_string())
            }
        };

        state.statuses.write().await.insert(id, status);
    }
}
