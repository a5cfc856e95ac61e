use thiserror::Error;

#[derive(Error, Debug)]
pub enum GesturecamError {
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] toml::ser::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Malformed landmarks: {details}")]
    MalformedLandmarks { details: String },

    #[error("Detector error: {details}")]
    Detector { details: String },

    #[error("Replay error at line {line}: {details}")]
    Replay { line: usize, details: String },

    #[error("Action '{action}' failed: {details}")]
    Action { action: String, details: String },

    #[error("Event bus error: {0}")]
    EventBus(#[from] EventBusError),

    #[error("System error: {message}")]
    System { message: String },

    #[error("Component error in {component}: {message}")]
    Component { component: String, message: String },
}

#[derive(Error, Debug)]
pub enum EventBusError {
    #[error("Failed to publish event: {details}")]
    PublishFailed { details: String },

    #[error("Event bus channel closed")]
    ChannelClosed,
}

impl GesturecamError {
    pub fn system<S: Into<String>>(message: S) -> Self {
        Self::System {
            message: message.into(),
        }
    }

    pub fn component<S: Into<String>>(component: S, message: S) -> Self {
        Self::Component {
            component: component.into(),
            message: message.into(),
        }
    }

    pub fn malformed<S: Into<String>>(details: S) -> Self {
        Self::MalformedLandmarks {
            details: details.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, GesturecamError>;
