use super::types::SessionSummary;
use crate::error::{GesturecamError, Result};
use crate::recognition::TrackerSnapshot;
use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::timeout;
use tokio_util::sync::CancellationToken;
use tracing::{error, info};
use uuid::Uuid;

/// Control handle of a running recognition session
pub struct SessionHandle {
    pub id: Uuid,
    pub started_at: DateTime<Utc>,
    pub(super) snapshot: Arc<Mutex<TrackerSnapshot>>,
    pub(super) cancellation_token: CancellationToken,
    pub(super) task: JoinHandle<SessionSummary>,
    pub(super) stop_timeout: Duration,
}

impl SessionHandle {
    /// Copy of the tracker state after the most recent frame
    pub fn snapshot(&self) -> TrackerSnapshot {
        self.snapshot.lock().clone()
    }

    /// Check if the processing loop has exited
    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }

    /// Halt the session immediately, discarding any gesture in progress
    pub async fn stop(mut self) -> Result<SessionSummary> {
        info!("Stopping session {}", self.id);
        self.cancellation_token.cancel();

        match timeout(self.stop_timeout, &mut self.task).await {
            Ok(joined) => joined.map_err(|e| {
                GesturecamError::component("session".to_string(), format!("task failed: {}", e))
            }),
            Err(_) => {
                error!("Session {} did not stop within {:?}", self.id, self.stop_timeout);
                self.task.abort();
                Err(GesturecamError::component(
                    "session".to_string(),
                    format!("stop timed out after {:?}", self.stop_timeout),
                ))
            }
        }
    }

    /// Wait for the session to end on its own, e.g. when a trace runs out
    pub async fn wait(self) -> Result<SessionSummary> {
        self.task
            .await
            .map_err(|e| GesturecamError::component("session".to_string(), format!("task failed: {}", e)))
    }
}

/// Stop a session through its handle
pub async fn stop_session(handle: SessionHandle) -> Result<SessionSummary> {
    handle.stop().await
}
