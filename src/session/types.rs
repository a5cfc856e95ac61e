use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Why a recognition session ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StopReason {
    /// Stopped through its handle
    Cancelled,
    /// The frame source ran out of frames
    SourceExhausted,
    /// The frame source kept failing
    SourceFailed,
}

/// Counters reported when a session ends
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SessionSummary {
    pub session_id: Uuid,
    pub reason: StopReason,
    pub frames_processed: u64,
    pub hands_seen: u64,
    pub malformed_frames: u64,
    pub events_emitted: u64,
}
