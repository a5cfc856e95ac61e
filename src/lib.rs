pub mod actions;
pub mod app;
pub mod config;
pub mod error;
pub mod events;
pub mod frame;
pub mod keyboard_input;
pub mod landmarks;
pub mod recognition;
pub mod session;
pub mod source;

#[cfg(test)]
mod test_support;

pub use actions::{Action, ActionDispatcher, ActionHandler, ChannelActionHandler, LoggingActionHandler};
pub use app::{ComponentState, GesturecamApp, ShutdownReason};
pub use config::GesturecamConfig;
pub use error::{GesturecamError, Result};
pub use events::{EventBus, EventFilter, EventReceiver, GesturecamEvent};
pub use frame::FrameData;
pub use landmarks::{HandLandmarks, Landmark, Point2};
pub use recognition::{
    CompositeGesture, CompositeTracker, GestureEvent, GestureLabel, RecognitionPipeline,
    SimpleGesture, TrackerSnapshot,
};
pub use session::{start_session, stop_session, SessionHandle, SessionSummary, StopReason};
pub use source::{ChannelFrameSource, FrameSource, HandDetector, ReplaySource, TraceDetector};
