use super::types::Action;
use crate::config::ActionsConfig;
use crate::error::Result;
use crate::recognition::GestureEvent;
use tracing::{debug, warn};

/// Receiver of concrete actions, implemented by the host application
pub trait ActionHandler: Send + Sync {
    fn perform(&self, action: &Action) -> Result<()>;
}

/// Routes gesture events to an [`ActionHandler`].
///
/// Holds no per-event state: repeat suppression belongs to the tracker.
/// Handler failures are logged and never retried, since a stale retry could
/// fire after the user's hand has moved on.
pub struct ActionDispatcher<H> {
    handler: H,
    open_panel_hotkey: Vec<String>,
}

impl<H: ActionHandler> ActionDispatcher<H> {
    pub fn new(handler: H, config: &ActionsConfig) -> Self {
        Self {
            handler,
            open_panel_hotkey: config.hotkey_keys(),
        }
    }

    pub fn dispatch(&self, event: GestureEvent) {
        let action = Action::for_event(event, &self.open_panel_hotkey);
        debug!("Dispatching {} as {}", event, action);

        if let Err(e) = self.handler.perform(&action) {
            warn!("Action {} for {} failed: {}", action, event, e);
        }
    }

    pub fn handler(&self) -> &H {
        &self.handler
    }
}
