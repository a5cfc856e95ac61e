mod orchestrator;
mod runtime;
mod shutdown;
mod state;
mod types;


pub use orchestrator::GesturecamApp;
pub use types::{ComponentState, ShutdownReason};
