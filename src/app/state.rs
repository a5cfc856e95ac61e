use super::{ComponentState, GesturecamApp};
use tracing::debug;

impl GesturecamApp {
    pub(super) async fn set_component_state(&self, component: &str, state: ComponentState) {
        debug!("Component '{}' state changed to: {:?}", component, state);
        self.component_states
            .lock()
            .await
            .insert(component.to_string(), state);
    }

    #[cfg(test)]
    pub(super) async fn component_state(&self, component: &str) -> Option<ComponentState> {
        self.component_states.lock().await.get(component).cloned()
    }
}
