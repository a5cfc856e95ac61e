use crate::error::EventBusError;
use crate::recognition::GestureEvent;
use crate::session::StopReason;
use serde::{Deserialize, Serialize};
use std::time::SystemTime;
use tokio::sync::broadcast;
use tracing::{debug, info, warn};
use uuid::Uuid;

/// Notifications published by the gesturecam system
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum GesturecamEvent {
    /// A recognition session started processing frames
    SessionStarted {
        session_id: Uuid,
        timestamp: SystemTime,
    },
    /// A gesture event was emitted by the tracker
    GestureRecognized {
        event: GestureEvent,
        frame_id: u64,
        timestamp: SystemTime,
    },
    /// A recognition session ended
    SessionStopped {
        session_id: Uuid,
        reason: StopReason,
        frames_processed: u64,
        timestamp: SystemTime,
    },
    /// A system error occurred in a component
    SystemError { component: String, error: String },
    /// System shutdown requested
    ShutdownRequested {
        timestamp: SystemTime,
        reason: String,
    },
}

impl GesturecamEvent {
    /// Get a human-readable description of the event
    pub fn description(&self) -> String {
        match self {
            GesturecamEvent::SessionStarted { session_id, .. } => {
                format!("Session {} started", session_id)
            }
            GesturecamEvent::GestureRecognized {
                event, frame_id, ..
            } => {
                format!("Gesture {} recognized at frame {}", event, frame_id)
            }
            GesturecamEvent::SessionStopped {
                session_id,
                reason,
                frames_processed,
                ..
            } => {
                format!(
                    "Session {} stopped ({:?}) after {} frames",
                    session_id, reason, frames_processed
                )
            }
            GesturecamEvent::SystemError { component, error } => {
                format!("Error in {}: {}", component, error)
            }
            GesturecamEvent::ShutdownRequested { reason, .. } => {
                format!("Shutdown requested: {}", reason)
            }
        }
    }

    /// Get the event type as a string for filtering
    pub fn event_type(&self) -> &'static str {
        match self {
            GesturecamEvent::SessionStarted { .. } => "session_started",
            GesturecamEvent::GestureRecognized { .. } => "gesture_recognized",
            GesturecamEvent::SessionStopped { .. } => "session_stopped",
            GesturecamEvent::SystemError { .. } => "system_error",
            GesturecamEvent::ShutdownRequested { .. } => "shutdown_requested",
        }
    }
}

/// Async event bus for component coordination using broadcast channels
pub struct EventBus {
    sender: broadcast::Sender<GesturecamEvent>,
}

impl EventBus {
    /// Create a new event bus with the specified channel capacity
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Subscribe to events and get a receiver
    pub fn subscribe(&self) -> broadcast::Receiver<GesturecamEvent> {
        self.sender.subscribe()
    }

    /// Subscribe with a filter
    pub fn subscribe_filtered(&self, filter: EventFilter, name: &str) -> EventReceiver {
        EventReceiver::new(self.sender.subscribe(), filter, name.to_string())
    }

    /// Publish an event to all subscribers
    pub async fn publish(&self, event: GesturecamEvent) -> Result<usize, EventBusError> {
        debug!("Publishing event: {}", event.description());

        match &event {
            GesturecamEvent::GestureRecognized { event, frame_id, .. } => {
                info!("Gesture {} recognized at frame {}", event, frame_id);
            }
            GesturecamEvent::SystemError { component, error } => {
                warn!("System error in {}: {}", component, error);
            }
            GesturecamEvent::ShutdownRequested { reason, .. } => {
                info!("Shutdown requested: {}", reason);
            }
            _ => {}
        }

        self.sender
            .send(event)
            .map_err(|e| EventBusError::PublishFailed {
                details: e.to_string(),
            })
    }

    /// Get the number of active subscribers
    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }

    /// Check if there are any active subscribers
    pub fn has_subscribers(&self) -> bool {
        self.sender.receiver_count() > 0
    }
}

impl Clone for EventBus {
    fn clone(&self) -> Self {
        Self {
            sender: self.sender.clone(),
        }
    }
}

/// Event filter for selective event handling
#[derive(Debug, Clone)]
pub enum EventFilter {
    /// Accept all events
    All,
    /// Accept only specific event types
    EventTypes(Vec<&'static str>),
    /// Custom filter function
    Custom(fn(&GesturecamEvent) -> bool),
}

impl EventFilter {
    /// Check if an event passes this filter
    pub fn matches(&self, event: &GesturecamEvent) -> bool {
        match self {
            EventFilter::All => true,
            EventFilter::EventTypes(types) => types.contains(&event.event_type()),
            EventFilter::Custom(filter_fn) => filter_fn(event),
        }
    }
}

/// Event receiver with filtering capabilities
pub struct EventReceiver {
    receiver: broadcast::Receiver<GesturecamEvent>,
    filter: EventFilter,
    name: String,
}

impl EventReceiver {
    /// Create a new event receiver with a filter
    pub fn new(
        receiver: broadcast::Receiver<GesturecamEvent>,
        filter: EventFilter,
        name: String,
    ) -> Self {
        Self {
            receiver,
            filter,
            name,
        }
    }

    /// Receive the next filtered event.
    ///
    /// Lagging is logged and skipped; only a closed channel is an error.
    pub async fn recv(&mut self) -> Result<GesturecamEvent, EventBusError> {
        loop {
            match self.receiver.recv().await {
                Ok(event) => {
                    if self.filter.matches(&event) {
                        debug!(
                            "Receiver '{}' received event: {}",
                            self.name,
                            event.description()
                        );
                        return Ok(event);
                    }
                }
                Err(broadcast::error::RecvError::Lagged(n)) => {
                    warn!("Receiver '{}' lagged behind by {} events", self.name, n);
                }
                Err(broadcast::error::RecvError::Closed) => {
                    debug!("Event bus closed for receiver '{}'", self.name);
                    return Err(EventBusError::ChannelClosed);
                }
            }
        }
    }

    /// Try to receive an event without blocking
    pub fn try_recv(&mut self) -> Result<Option<GesturecamEvent>, EventBusError> {
        loop {
            match self.receiver.try_recv() {
                Ok(event) => {
                    if self.filter.matches(&event) {
                        return Ok(Some(event));
                    }
                }
                Err(broadcast::error::TryRecvError::Empty) => {
                    return Ok(None);
                }
                Err(broadcast::error::TryRecvError::Lagged(n)) => {
                    warn!("Receiver '{}' lagged behind by {} events", self.name, n);
                }
                Err(broadcast::error::TryRecvError::Closed) => {
                    debug!("Event bus closed for receiver '{}'", self.name);
                    return Err(EventBusError::ChannelClosed);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::recognition::{CompositeGesture, SimpleGesture};
    use tokio::time::{timeout, Duration};

    fn gesture(frame_id: u64) -> GesturecamEvent {
        GesturecamEvent::GestureRecognized {
            event: GestureEvent::Composite(CompositeGesture::OpenPanel),
            frame_id,
            timestamp: SystemTime::now(),
        }
    }

    #[tokio::test]
    async fn test_event_bus_basic_operations() {
        let event_bus = EventBus::new(10);
        let mut receiver = event_bus.subscribe();

        let subscriber_count = event_bus.publish(gesture(3)).await.unwrap();
        assert_eq!(subscriber_count, 1);

        match receiver.recv().await.unwrap() {
            GesturecamEvent::GestureRecognized {
                event, frame_id, ..
            } => {
                assert_eq!(event, GestureEvent::Composite(CompositeGesture::OpenPanel));
                assert_eq!(frame_id, 3);
            }
            other => panic!("Unexpected event type: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_publish_without_subscribers_fails() {
        let event_bus = EventBus::new(10);
        assert!(!event_bus.has_subscribers());
        assert!(matches!(
            event_bus.publish(gesture(1)).await,
            Err(EventBusError::PublishFailed { .. })
        ));
    }

    #[tokio::test]
    async fn test_multiple_subscribers() {
        let event_bus = EventBus::new(10);
        let mut receiver1 = event_bus.subscribe();
        let mut receiver2 = event_bus.subscribe();
        assert_eq!(event_bus.subscriber_count(), 2);

        event_bus
            .publish(GesturecamEvent::ShutdownRequested {
                timestamp: SystemTime::now(),
                reason: "test".to_string(),
            })
            .await
            .unwrap();

        let _ = timeout(Duration::from_millis(100), receiver1.recv())
            .await
            .unwrap()
            .unwrap();
        let _ = timeout(Duration::from_millis(100), receiver2.recv())
            .await
            .unwrap()
            .unwrap();
    }

    #[test]
    fn test_event_filter() {
        let filter = EventFilter::EventTypes(vec!["shutdown_requested", "session_stopped"]);
        let shutdown = GesturecamEvent::ShutdownRequested {
            timestamp: SystemTime::now(),
            reason: "keyboard".to_string(),
        };
        assert!(filter.matches(&shutdown));
        assert!(!filter.matches(&gesture(1)));

        let custom = EventFilter::Custom(|event| {
            matches!(
                event,
                GesturecamEvent::GestureRecognized {
                    event: GestureEvent::Simple(_),
                    ..
                }
            )
        });
        let simple = GesturecamEvent::GestureRecognized {
            event: GestureEvent::Simple(SimpleGesture::Point),
            frame_id: 1,
            timestamp: SystemTime::now(),
        };
        assert!(custom.matches(&simple));
        assert!(!custom.matches(&gesture(2)));
    }

    #[tokio::test]
    async fn test_filtered_receiver() {
        let event_bus = EventBus::new(10);
        let mut receiver = event_bus.subscribe_filtered(
            EventFilter::EventTypes(vec!["shutdown_requested"]),
            "test_receiver",
        );

        event_bus.publish(gesture(1)).await.unwrap();
        event_bus
            .publish(GesturecamEvent::ShutdownRequested {
                timestamp: SystemTime::now(),
                reason: "done".to_string(),
            })
            .await
            .unwrap();

        let event = timeout(Duration::from_millis(100), receiver.recv())
            .await
            .unwrap()
            .unwrap();
        assert_eq!(event.event_type(), "shutdown_requested");
        assert!(receiver.try_recv().unwrap().is_none());
    }

    #[test]
    fn test_event_properties() {
        let event = gesture(9);
        assert_eq!(event.event_type(), "gesture_recognized");
        assert!(event.description().contains("Composite(OpenPanel)"));
        assert!(event.description().contains("frame 9"));
    }
}
