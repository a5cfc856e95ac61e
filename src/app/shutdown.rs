use super::{ComponentState, GesturecamApp};
use crate::error::Result;
use crate::session::{SessionHandle, StopReason};
use std::time::Duration;
use tokio::time::timeout;
use tracing::{debug, error, info};

impl GesturecamApp {
    /// Perform graceful shutdown and compute the exit code
    pub(super) async fn shutdown(&mut self, session: SessionHandle) -> Result<i32> {
        info!("Beginning graceful shutdown");

        // Signal handler tasks
        self.cancellation_token.cancel();

        let mut exit_code = 0;

        if self.keyboard_enabled {
            if let Err(e) = self.stop_keyboard().await {
                error!("Error stopping keyboard: {}", e);
                exit_code = 1;
            }
        }

        self.set_component_state("session", ComponentState::Stopping)
            .await;
        match session.stop().await {
            Ok(summary) => {
                info!(
                    "Session {} summary: {} frames, {} hands, {} malformed, {} events",
                    summary.session_id,
                    summary.frames_processed,
                    summary.hands_seen,
                    summary.malformed_frames,
                    summary.events_emitted
                );
                if summary.reason == StopReason::SourceFailed {
                    self.set_component_state("session", ComponentState::Failed)
                        .await;
                    error!("Session ended because the frame source failed");
                    exit_code = 1;
                } else {
                    self.set_component_state("session", ComponentState::Stopped)
                        .await;
                }
            }
            Err(e) => {
                self.set_component_state("session", ComponentState::Failed)
                    .await;
                error!("Error stopping session: {}", e);
                exit_code = 1;
            }
        }

        debug!(
            "Final component states: {:?}",
            *self.component_states.lock().await
        );
        info!("Graceful shutdown completed with exit code: {}", exit_code);
        Ok(exit_code)
    }

    async fn stop_keyboard(&self) -> Result<()> {
        let Some(keyboard_handler) = &self.keyboard_handler else {
            return Ok(());
        };

        self.set_component_state("keyboard", ComponentState::Stopping)
            .await;
        match timeout(Duration::from_secs(2), keyboard_handler.stop()).await {
            Ok(Ok(())) => {
                self.set_component_state("keyboard", ComponentState::Stopped)
                    .await;
                info!("keyboard component stopped");
                Ok(())
            }
            Ok(Err(e)) => {
                self.set_component_state("keyboard", ComponentState::Failed)
                    .await;
                Err(e)
            }
            Err(_) => {
                self.set_component_state("keyboard", ComponentState::Failed)
                    .await;
                Err(crate::error::GesturecamError::component(
                    "keyboard",
                    "stop timeout",
                ))
            }
        }
    }
}
