use super::handle::SessionHandle;
use super::types::{SessionSummary, StopReason};
use crate::actions::{ActionDispatcher, ActionHandler};
use crate::config::GesturecamConfig;
use crate::events::{EventBus, GesturecamEvent};
use crate::frame::FrameData;
use crate::recognition::{RecognitionPipeline, TrackerSnapshot};
use crate::source::{FrameSource, HandDetector};
use chrono::Utc;
use parking_lot::Mutex;
use std::sync::Arc;
use std::time::SystemTime;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info};
use uuid::Uuid;

/// Start a recognition session on the current tokio runtime.
///
/// Frames are pulled from `source`, run through `detector` and the
/// recognition pipeline, and every gesture event is published on the bus
/// and then handed to `handler`.
pub fn start_session<S, D, H>(
    config: &GesturecamConfig,
    source: S,
    detector: D,
    handler: H,
    event_bus: Arc<EventBus>,
) -> SessionHandle
where
    S: FrameSource + 'static,
    D: HandDetector + 'static,
    H: ActionHandler + 'static,
{
    let id = Uuid::new_v4();
    let snapshot = Arc::new(Mutex::new(TrackerSnapshot::default()));
    let cancellation_token = CancellationToken::new();

    let runner = SessionRunner {
        id,
        source,
        detector,
        pipeline: RecognitionPipeline::new(
            config.recognition.geometry(),
            config.recognition.timings(),
        ),
        dispatcher: ActionDispatcher::new(handler, &config.actions),
        event_bus,
        snapshot: Arc::clone(&snapshot),
        cancellation_token: cancellation_token.clone(),
        max_source_errors: config.session.max_source_errors,
    };

    info!("Starting session {}", id);
    let task = tokio::spawn(runner.run());

    SessionHandle {
        id,
        started_at: Utc::now(),
        snapshot,
        cancellation_token,
        task,
        stop_timeout: config.session.stop_timeout(),
    }
}

struct SessionRunner<S, D, H> {
    id: Uuid,
    source: S,
    detector: D,
    pipeline: RecognitionPipeline,
    dispatcher: ActionDispatcher<H>,
    event_bus: Arc<EventBus>,
    snapshot: Arc<Mutex<TrackerSnapshot>>,
    cancellation_token: CancellationToken,
    max_source_errors: u32,
}

impl<S, D, H> SessionRunner<S, D, H>
where
    S: FrameSource,
    D: HandDetector,
    H: ActionHandler,
{
    async fn run(mut self) -> SessionSummary {
        info!("Session {} reading from {}", self.id, self.source.name());
        publish(
            &self.event_bus,
            GesturecamEvent::SessionStarted {
                session_id: self.id,
                timestamp: SystemTime::now(),
            },
        )
        .await;

        let mut consecutive_errors = 0u32;
        let reason = loop {
            let next = tokio::select! {
                biased;
                _ = self.cancellation_token.cancelled() => break StopReason::Cancelled,
                next = self.source.next_frame() => next,
            };

            match next {
                Ok(Some(frame)) => {
                    consecutive_errors = 0;
                    self.process_frame(&frame).await;
                }
                Ok(None) => break StopReason::SourceExhausted,
                Err(e) => {
                    consecutive_errors += 1;
                    debug!(
                        "Consecutive frame source errors: {}/{}",
                        consecutive_errors, self.max_source_errors
                    );
                    publish(
                        &self.event_bus,
                        GesturecamEvent::SystemError {
                            component: self.source.name().to_string(),
                            error: e.to_string(),
                        },
                    )
                    .await;
                    if consecutive_errors > self.max_source_errors {
                        error!("Frame source failed too many times, ending session");
                        break StopReason::SourceFailed;
                    }
                }
            }
        };

        // Tracking state does not outlive the session
        self.pipeline.reset();
        *self.snapshot.lock() = TrackerSnapshot::default();

        let metrics = self.pipeline.metrics().clone();
        let summary = SessionSummary {
            session_id: self.id,
            reason,
            frames_processed: metrics.frames_processed,
            hands_seen: metrics.hands_seen,
            malformed_frames: metrics.malformed_frames,
            events_emitted: metrics.events_emitted,
        };

        info!(
            "Session {} ended ({:?}): {} frames, {} events",
            self.id, reason, summary.frames_processed, summary.events_emitted
        );
        publish(
            &self.event_bus,
            GesturecamEvent::SessionStopped {
                session_id: self.id,
                reason,
                frames_processed: summary.frames_processed,
                timestamp: SystemTime::now(),
            },
        )
        .await;

        summary
    }

    async fn process_frame(&mut self, frame: &FrameData) {
        let detection = match self.detector.detect(frame) {
            Ok(detection) => detection,
            Err(e) => {
                publish(
                    &self.event_bus,
                    GesturecamEvent::SystemError {
                        component: "detector".to_string(),
                        error: format!("frame {}: {}", frame.id, e),
                    },
                )
                .await;
                None
            }
        };

        let outcome = self.pipeline.process(detection, frame.captured_at);
        *self.snapshot.lock() = self.pipeline.snapshot(frame.captured_at);

        if let Some(event) = outcome.event {
            publish(
                &self.event_bus,
                GesturecamEvent::GestureRecognized {
                    event,
                    frame_id: frame.id,
                    timestamp: frame.timestamp,
                },
            )
            .await;
            self.dispatcher.dispatch(event);
        }
    }
}

async fn publish(event_bus: &EventBus, event: GesturecamEvent) {
    // A bus without subscribers is not an error for the session
    let event_type = event.event_type();
    if let Err(e) = event_bus.publish(event).await {
        debug!("Event {} not delivered: {}", event_type, e);
    }
}
