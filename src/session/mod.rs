mod handle;
mod runner;
mod types;


pub use handle::{stop_session, SessionHandle};
pub use runner::start_session;
pub use types::{SessionSummary, StopReason};
