use super::classifier::classify_with;
use super::fingers::extract_with;
use super::tracker::{CompositeTracker, TrackerSnapshot, TrackerTimings};
use super::types::{GestureEvent, GestureLabel};
use super::GeometryThresholds;
use crate::landmarks::{HandLandmarks, Landmark};
use std::time::Instant;
use tracing::{trace, warn};

/// Per-frame counters of the pipeline
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PipelineMetrics {
    pub frames_processed: u64,
    pub hands_seen: u64,
    pub malformed_frames: u64,
    pub events_emitted: u64,
}

/// Result of processing one frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameOutcome {
    pub label: GestureLabel,
    pub event: Option<GestureEvent>,
}

/// Extraction, classification and tracking for one session
#[derive(Debug, Clone)]
pub struct RecognitionPipeline {
    geometry: GeometryThresholds,
    tracker: CompositeTracker,
    metrics: PipelineMetrics,
}

impl RecognitionPipeline {
    pub fn new(geometry: GeometryThresholds, timings: TrackerTimings) -> Self {
        Self {
            geometry,
            tracker: CompositeTracker::new(timings),
            metrics: PipelineMetrics::default(),
        }
    }

    /// Process the raw detector output of one frame.
    ///
    /// Output that does not form a valid hand is treated as no hand.
    pub fn process(&mut self, detection: Option<Vec<Landmark>>, now: Instant) -> FrameOutcome {
        let hand = match detection.map(HandLandmarks::try_from) {
            Some(Ok(hand)) => Some(hand),
            Some(Err(e)) => {
                warn!("Discarding detector output: {}", e);
                self.metrics.malformed_frames += 1;
                None
            }
            None => None,
        };

        self.process_hand(hand.as_ref(), now)
    }

    /// Process an already validated hand, or `None` when no hand is visible
    pub fn process_hand(&mut self, hand: Option<&HandLandmarks>, now: Instant) -> FrameOutcome {
        self.metrics.frames_processed += 1;

        let (label, wrist) = match hand {
            Some(hand) => {
                self.metrics.hands_seen += 1;
                let fingers = extract_with(hand, &self.geometry);
                (classify_with(&fingers, hand, &self.geometry), Some(hand.wrist()))
            }
            None => (GestureLabel::None_, None),
        };
        trace!("Frame classified as {}", label);

        let event = self.tracker.update(label, wrist, now);
        if event.is_some() {
            self.metrics.events_emitted += 1;
        }

        FrameOutcome { label, event }
    }

    pub fn snapshot(&self, now: Instant) -> TrackerSnapshot {
        self.tracker.snapshot(now)
    }

    pub fn metrics(&self) -> &PipelineMetrics {
        &self.metrics
    }

    pub fn reset(&mut self) {
        self.tracker.reset();
    }
}

impl Default for RecognitionPipeline {
    fn default() -> Self {
        Self::new(GeometryThresholds::default(), TrackerTimings::default())
    }
}
