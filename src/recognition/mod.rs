mod classifier;
mod debounce;
mod fingers;
mod pipeline;
mod tracker;
mod types;

#[cfg(test)]
mod tests;

pub use classifier::{classify, classify_with};
pub use debounce::Debouncer;
pub use fingers::{extract, extract_with};
pub use pipeline::{FrameOutcome, PipelineMetrics, RecognitionPipeline};
pub use tracker::{
    CompositeTracker, TrackerSnapshot, TrackerTimings, TrackingMode, DEBOUNCE_TIME,
    DRAG_THRESHOLD, TRACKING_TIMEOUT,
};
pub use types::{CompositeGesture, FingerState, GestureEvent, GestureLabel, SimpleGesture};

/// Thumb span must exceed this fraction of the wrist to middle-base distance
pub const THUMB_EXTENSION_RATIO: f32 = 0.6;
/// A fist is sideways when its palm width dx is below this fraction of dy
pub const SIDEWAYS_RATIO: f32 = 0.5;

/// Geometric thresholds used by extraction and classification
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeometryThresholds {
    pub thumb_extension_ratio: f32,
    pub sideways_ratio: f32,
}

impl Default for GeometryThresholds {
    fn default() -> Self {
        Self {
            thumb_extension_ratio: THUMB_EXTENSION_RATIO,
            sideways_ratio: SIDEWAYS_RATIO,
        }
    }
}
