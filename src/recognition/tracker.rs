use super::debounce::Debouncer;
use super::types::{CompositeGesture, GestureEvent, GestureLabel, SimpleGesture};
use crate::landmarks::Point2;
use serde::Serialize;
use std::time::{Duration, Instant};
use tracing::{debug, trace};

/// Maximum time a composite gesture may stay in tracking
pub const TRACKING_TIMEOUT: Duration = Duration::from_millis(1000);
/// Normalized horizontal wrist displacement that counts as a drag
pub const DRAG_THRESHOLD: f32 = 0.2;
/// Dwell time before a simple gesture is confirmed
pub const DEBOUNCE_TIME: Duration = Duration::from_millis(400);

/// Timing and distance parameters of the tracker
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrackerTimings {
    pub debounce: Duration,
    pub tracking_timeout: Duration,
    pub drag_threshold: f32,
}

impl Default for TrackerTimings {
    fn default() -> Self {
        Self {
            debounce: DEBOUNCE_TIME,
            tracking_timeout: TRACKING_TIMEOUT,
            drag_threshold: DRAG_THRESHOLD,
        }
    }
}

/// Externally visible tracker mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum TrackingMode {
    Idle,
    TrackingClosed,
    TrackingOpen,
}

/// Copy of the tracker state, safe to hand to other threads
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrackerSnapshot {
    pub mode: TrackingMode,
    pub tracking_elapsed: Option<Duration>,
    pub anchor: Option<Point2>,
    pub pending_label: Option<GestureLabel>,
    pub last_emitted: Option<SimpleGesture>,
}

impl Default for TrackerSnapshot {
    fn default() -> Self {
        Self {
            mode: TrackingMode::Idle,
            tracking_elapsed: None,
            anchor: None,
            pending_label: None,
            last_emitted: None,
        }
    }
}

/// Debouncing and tracking are mutually exclusive, so each mode carries
/// only the data it needs.
#[derive(Debug, Clone)]
enum Mode {
    Idle { debounce: Debouncer },
    TrackingClosed { anchor: Point2, started_at: Instant },
    TrackingOpen { started_at: Instant },
}

#[derive(Debug, Clone)]
struct TrackingState {
    mode: Mode,
    last_emitted_simple: Option<SimpleGesture>,
}

/// State machine that turns per-frame labels into simple and composite
/// gesture events.
#[derive(Debug, Clone)]
pub struct CompositeTracker {
    timings: TrackerTimings,
    state: TrackingState,
}

impl CompositeTracker {
    pub fn new(timings: TrackerTimings) -> Self {
        Self {
            timings,
            state: TrackingState {
                mode: Mode::Idle {
                    debounce: Debouncer::new(timings.debounce),
                },
                last_emitted_simple: None,
            },
        }
    }

    pub fn timings(&self) -> &TrackerTimings {
        &self.timings
    }

    pub fn mode(&self) -> TrackingMode {
        match self.state.mode {
            Mode::Idle { .. } => TrackingMode::Idle,
            Mode::TrackingClosed { .. } => TrackingMode::TrackingClosed,
            Mode::TrackingOpen { .. } => TrackingMode::TrackingOpen,
        }
    }

    /// Discard all tracking and debounce state
    pub fn reset(&mut self) {
        self.return_to_idle();
    }

    pub fn snapshot(&self, now: Instant) -> TrackerSnapshot {
        let (tracking_elapsed, anchor, pending_label) = match &self.state.mode {
            Mode::Idle { debounce } => (None, None, debounce.pending()),
            Mode::TrackingClosed { anchor, started_at } => (
                Some(now.saturating_duration_since(*started_at)),
                Some(*anchor),
                None,
            ),
            Mode::TrackingOpen { started_at } => {
                (Some(now.saturating_duration_since(*started_at)), None, None)
            }
        };

        TrackerSnapshot {
            mode: self.mode(),
            tracking_elapsed,
            anchor,
            pending_label,
            last_emitted: self.state.last_emitted_simple,
        }
    }

    /// Advance the state machine by one frame.
    ///
    /// `wrist` is the wrist position for frames with a hand and `None` when
    /// no hand was detected. At most one event is returned per frame.
    pub fn update(
        &mut self,
        label: GestureLabel,
        wrist: Option<Point2>,
        now: Instant,
    ) -> Option<GestureEvent> {
        trace!("Tracker input: {} in {:?}", label, self.mode());

        match self.state.mode {
            Mode::Idle { .. } => self.update_idle(label, wrist, now),
            Mode::TrackingClosed { anchor, started_at } => {
                self.update_tracking_closed(label, wrist, anchor, started_at, now)
            }
            Mode::TrackingOpen { started_at } => self.update_tracking_open(label, started_at, now),
        }
    }

    fn update_idle(
        &mut self,
        label: GestureLabel,
        wrist: Option<Point2>,
        now: Instant,
    ) -> Option<GestureEvent> {
        match label {
            GestureLabel::Closed => {
                match wrist {
                    Some(anchor) => {
                        debug!("Fist detected, tracking from anchor {:?}", anchor);
                        self.state.mode = Mode::TrackingClosed {
                            anchor,
                            started_at: now,
                        };
                    }
                    None => debug!("Closed label without a wrist position, ignoring"),
                }
                None
            }
            GestureLabel::Open => {
                debug!("Open hand detected, tracking");
                self.state.mode = Mode::TrackingOpen { started_at: now };
                None
            }
            GestureLabel::None_ | GestureLabel::Unknown => {
                self.return_to_idle();
                None
            }
            GestureLabel::Point
            | GestureLabel::Victory
            | GestureLabel::Love
            | GestureLabel::ClosedSideways => {
                let Mode::Idle { debounce } = &mut self.state.mode else {
                    return None;
                };
                let confirmed = debounce.observe(label, now)?;

                match SimpleGesture::from_debounced(confirmed) {
                    Some(gesture) if self.state.last_emitted_simple != Some(gesture) => {
                        self.state.last_emitted_simple = Some(gesture);
                        Some(GestureEvent::Simple(gesture))
                    }
                    Some(_) => None,
                    None => {
                        // A held sideways fist is not dispatchable on its own,
                        // but it still breaks repeat suppression.
                        self.state.last_emitted_simple = None;
                        None
                    }
                }
            }
        }
    }

    fn update_tracking_closed(
        &mut self,
        label: GestureLabel,
        wrist: Option<Point2>,
        anchor: Point2,
        started_at: Instant,
        now: Instant,
    ) -> Option<GestureEvent> {
        if label == GestureLabel::None_ {
            debug!("Hand lost while tracking fist, abandoning");
            self.return_to_idle();
            return None;
        }

        if now.saturating_duration_since(started_at) > self.timings.tracking_timeout {
            debug!("Fist held without follow-up");
            return self.finish(GestureEvent::Simple(SimpleGesture::Closed));
        }

        match (label, wrist) {
            (GestureLabel::Open, _) => {
                self.finish(GestureEvent::Composite(CompositeGesture::OpenPanel))
            }
            (GestureLabel::Closed, Some(position)) => {
                let delta_x = position.x - anchor.x;
                if delta_x.abs() > self.timings.drag_threshold {
                    debug!("Fist dragged by {:.3}", delta_x);
                    self.finish(GestureEvent::Composite(CompositeGesture::ToggleInvisible))
                } else {
                    None
                }
            }
            _ => {
                debug!("Fist tracking interrupted by {}, abandoning", label);
                self.return_to_idle();
                None
            }
        }
    }

    fn update_tracking_open(
        &mut self,
        label: GestureLabel,
        started_at: Instant,
        now: Instant,
    ) -> Option<GestureEvent> {
        if label == GestureLabel::None_ {
            debug!("Hand lost while tracking open hand, abandoning");
            self.return_to_idle();
            return None;
        }

        // An open hand alone is the resting posture, so the timeout is silent
        if now.saturating_duration_since(started_at) > self.timings.tracking_timeout {
            debug!("Open hand held without follow-up");
            self.return_to_idle();
            return None;
        }

        match label {
            GestureLabel::ClosedSideways => {
                self.finish(GestureEvent::Composite(CompositeGesture::Grab))
            }
            GestureLabel::Open => None,
            _ => {
                debug!("Open hand tracking interrupted by {}, abandoning", label);
                self.return_to_idle();
                None
            }
        }
    }

    fn finish(&mut self, event: GestureEvent) -> Option<GestureEvent> {
        debug!("Gesture recognized: {}", event);
        self.return_to_idle();
        Some(event)
    }

    fn return_to_idle(&mut self) {
        self.state = TrackingState {
            mode: Mode::Idle {
                debounce: Debouncer::new(self.timings.debounce),
            },
            last_emitted_simple: None,
        };
    }
}

impl Default for CompositeTracker {
    fn default() -> Self {
        Self::new(TrackerTimings::default())
    }
}
