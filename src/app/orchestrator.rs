use super::types::ComponentState;
use crate::config::GesturecamConfig;
use crate::events::EventBus;
use crate::keyboard_input::KeyboardInputHandler;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::Mutex;
use tokio_util::sync::CancellationToken;

/// Application coordinator: owns the event bus and runs one recognition
/// session until it ends or shutdown is requested
pub struct GesturecamApp {
    pub(super) config: GesturecamConfig,
    pub(super) event_bus: Arc<EventBus>,
    pub(super) keyboard_handler: Option<KeyboardInputHandler>,
    pub(super) keyboard_enabled: bool,
    pub(super) component_states: Arc<Mutex<HashMap<String, ComponentState>>>,
    pub(super) cancellation_token: CancellationToken,
}

impl GesturecamApp {
    pub fn new(config: GesturecamConfig) -> Self {
        let event_bus = Arc::new(EventBus::new(config.system.event_bus_capacity));
        let keyboard_handler = Some(KeyboardInputHandler::new(Arc::clone(&event_bus)));

        Self {
            config,
            event_bus,
            keyboard_handler,
            keyboard_enabled: false,
            component_states: Arc::new(Mutex::new(HashMap::new())),
            cancellation_token: CancellationToken::new(),
        }
    }

    /// Enable or disable the keyboard input handler
    pub fn set_keyboard_enabled(&mut self, enabled: bool) {
        self.keyboard_enabled = enabled;
    }

    pub fn event_bus(&self) -> Arc<EventBus> {
        Arc::clone(&self.event_bus)
    }

    pub fn config(&self) -> &GesturecamConfig {
        &self.config
    }
}
