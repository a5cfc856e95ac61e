mod dispatcher;
mod handlers;
mod types;


pub use dispatcher::{ActionDispatcher, ActionHandler};
pub use handlers::{ChannelActionHandler, LoggingActionHandler};
pub use types::Action;
