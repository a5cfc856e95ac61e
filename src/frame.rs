use crate::error::Result;
use std::sync::Arc;
use std::time::{Instant, SystemTime};

/// One camera frame as handed to a hand detector
#[derive(Debug, Clone)]
pub struct FrameData {
    /// Unique frame identifier
    pub id: u64,
    /// Wall-clock time when the frame was captured
    pub timestamp: SystemTime,
    /// Monotonic capture instant, the clock all gesture timing uses
    pub captured_at: Instant,
    /// Detector input (shared ownership for efficiency). Encoded image
    /// bytes for a model-backed detector, landmark JSON for a trace.
    pub data: Arc<Vec<u8>>,
}

impl FrameData {
    /// Create a new frame data instance captured at `captured_at`
    pub fn new(id: u64, captured_at: Instant, data: Vec<u8>) -> Self {
        Self {
            id,
            timestamp: SystemTime::now(),
            captured_at,
            data: Arc::new(data),
        }
    }

    /// Wrap detector output from an upstream process as a frame. `None`
    /// encodes a frame where no hand was found. Non-finite coordinates are
    /// encoded as JSON `null` and rejected as malformed downstream.
    pub fn from_landmarks(
        id: u64,
        captured_at: Instant,
        landmarks: Option<&[[f32; 3]]>,
    ) -> Result<Self> {
        let data = serde_json::to_vec(&landmarks)?;
        Ok(Self::new(id, captured_at, data))
    }
}
