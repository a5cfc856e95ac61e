use crate::session::StopReason;

/// Component lifecycle states
#[derive(Debug, Clone, PartialEq)]
pub enum ComponentState {
    Stopped,
    Starting,
    Running,
    Stopping,
    Failed,
}

/// Why the application is shutting down
#[derive(Debug, Clone, PartialEq)]
pub enum ShutdownReason {
    /// A signal or the keyboard asked for shutdown
    Requested(String),
    /// The recognition session ended on its own
    SessionEnded(StopReason),
}
