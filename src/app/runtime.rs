use super::{ComponentState, GesturecamApp, ShutdownReason};
use crate::actions::LoggingActionHandler;
use crate::error::Result;
use crate::events::{EventBus, EventFilter, EventReceiver, GesturecamEvent};
use crate::session::{start_session, SessionHandle};
use crate::source::{FrameSource, TraceDetector};
use std::sync::Arc;
use std::time::SystemTime;
use tracing::{error, info, warn};

impl GesturecamApp {
    /// Run one recognition session over `source` until it ends or shutdown
    /// is requested. Returns the process exit code.
    pub async fn run<S: FrameSource + 'static>(&mut self, source: S) -> Result<i32> {
        info!("Gesturecam system is running");

        // Subscribe before anything can publish
        let mut receiver = self.event_bus.subscribe_filtered(
            EventFilter::EventTypes(vec!["shutdown_requested", "session_stopped"]),
            "app",
        );

        self.set_component_state("session", ComponentState::Starting)
            .await;
        let handle = start_session(
            &self.config,
            source,
            TraceDetector,
            LoggingActionHandler::new(self.config.actions.announce),
            Arc::clone(&self.event_bus),
        );
        self.set_component_state("session", ComponentState::Running)
            .await;
        info!("Session {} started at {}", handle.id, handle.started_at);

        if self.keyboard_enabled {
            if let Some(keyboard_handler) = &self.keyboard_handler {
                self.set_component_state("keyboard", ComponentState::Starting)
                    .await;
                match keyboard_handler.start().await {
                    Ok(()) => {
                        self.set_component_state("keyboard", ComponentState::Running)
                            .await
                    }
                    Err(e) => {
                        warn!("Keyboard input unavailable: {}", e);
                        self.set_component_state("keyboard", ComponentState::Failed)
                            .await;
                    }
                }
            }
        }

        self.setup_signal_handlers();

        let shutdown_reason = wait_for_shutdown(&mut receiver, &handle).await?;
        info!("Shutdown initiated: {:?}", shutdown_reason);

        let exit_code = self.shutdown(handle).await?;

        info!("Gesturecam system shutdown complete");
        Ok(exit_code)
    }

    /// Set up signal handlers that publish a shutdown request on the bus
    fn setup_signal_handlers(&self) {
        #[cfg(unix)]
        {
            let event_bus = Arc::clone(&self.event_bus);
            let token = self.cancellation_token.clone();
            tokio::spawn(async move {
                use tokio::signal::unix::{signal, SignalKind};

                let mut sigterm = match signal(SignalKind::terminate()) {
                    Ok(sigterm) => sigterm,
                    Err(e) => {
                        error!("Failed to register SIGTERM handler: {}", e);
                        return;
                    }
                };

                tokio::select! {
                    _ = token.cancelled() => {}
                    Some(()) = sigterm.recv() => {
                        info!("Received SIGTERM signal");
                        request_shutdown(&event_bus, "SIGTERM").await;
                    }
                }
            });
        }

        let event_bus = Arc::clone(&self.event_bus);
        let token = self.cancellation_token.clone();
        tokio::spawn(async move {
            tokio::select! {
                _ = token.cancelled() => {}
                Ok(()) = tokio::signal::ctrl_c() => {
                    info!("Received SIGINT signal (Ctrl+C)");
                    request_shutdown(&event_bus, "SIGINT").await;
                }
            }
        });
    }
}

async fn request_shutdown(event_bus: &EventBus, reason: &str) {
    let event = GesturecamEvent::ShutdownRequested {
        timestamp: SystemTime::now(),
        reason: reason.to_string(),
    };
    if let Err(e) = event_bus.publish(event).await {
        error!("Failed to publish shutdown request: {}", e);
    }
}

async fn wait_for_shutdown(
    receiver: &mut EventReceiver,
    handle: &SessionHandle,
) -> Result<ShutdownReason> {
    loop {
        match receiver.recv().await? {
            GesturecamEvent::ShutdownRequested { reason, .. } => {
                return Ok(ShutdownReason::Requested(reason));
            }
            GesturecamEvent::SessionStopped {
                session_id, reason, ..
            } if session_id == handle.id => {
                return Ok(ShutdownReason::SessionEnded(reason));
            }
            _ => {}
        }
    }
}
