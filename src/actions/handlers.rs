use super::dispatcher::ActionHandler;
use super::types::Action;
use crate::error::{GesturecamError, Result};
use tokio::sync::mpsc;
use tracing::info;

/// Handler that reports actions through the log instead of performing them
pub struct LoggingActionHandler {
    announce: bool,
}

impl LoggingActionHandler {
    pub fn new(announce: bool) -> Self {
        Self { announce }
    }
}

impl ActionHandler for LoggingActionHandler {
    fn perform(&self, action: &Action) -> Result<()> {
        info!(action = action.name(), "Performing action: {}", action);

        if self.announce {
            if let Some(phrase) = action.announcement() {
                info!(action = action.name(), "Announcement: {}", phrase);
            }
        }

        Ok(())
    }
}

/// Handler that forwards actions to the host over a channel, for hosts that
/// must apply them on their own thread
pub struct ChannelActionHandler {
    sender: mpsc::UnboundedSender<Action>,
}

impl ChannelActionHandler {
    pub fn new() -> (Self, mpsc::UnboundedReceiver<Action>) {
        let (sender, receiver) = mpsc::unbounded_channel();
        (Self { sender }, receiver)
    }
}

impl ActionHandler for ChannelActionHandler {
    fn perform(&self, action: &Action) -> Result<()> {
        self.sender
            .send(action.clone())
            .map_err(|_| GesturecamError::Action {
                action: action.name().to_string(),
                details: "action receiver dropped".to_string(),
            })
    }
}
