use config::{Config, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use tracing::{debug, info};

use crate::recognition::{GeometryThresholds, TrackerTimings};

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct GesturecamConfig {
    pub recognition: RecognitionConfig,
    pub actions: ActionsConfig,
    pub session: SessionConfig,
    pub replay: ReplayConfig,
    pub system: SystemConfig,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct RecognitionConfig {
    /// Dwell time before a simple gesture is confirmed, in milliseconds
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,

    /// How long a composite gesture may stay in tracking, in milliseconds
    #[serde(default = "default_tracking_timeout_ms")]
    pub tracking_timeout_ms: u64,

    /// Normalized horizontal wrist displacement that counts as a drag
    #[serde(default = "default_drag_threshold")]
    pub drag_threshold: f32,

    /// Thumb span must exceed this fraction of the wrist-to-middle-base distance
    #[serde(default = "default_thumb_extension_ratio")]
    pub thumb_extension_ratio: f32,

    /// A fist is sideways when palm dx < ratio * palm dy
    #[serde(default = "default_sideways_ratio")]
    pub sideways_ratio: f32,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ActionsConfig {
    /// Keyboard shortcut sent when the panel gesture fires (e.g. "ctrl+shift+a")
    #[serde(default = "default_open_panel_hotkey")]
    pub open_panel_hotkey: String,

    /// Voice short announcements for actions that have one
    #[serde(default = "default_announce")]
    pub announce: bool,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct SessionConfig {
    /// Maximum time to wait for the processing loop to exit on stop
    #[serde(default = "default_stop_timeout_ms")]
    pub stop_timeout_ms: u64,

    /// Consecutive frame source errors tolerated before the session gives up
    #[serde(default = "default_max_source_errors")]
    pub max_source_errors: u32,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ReplayConfig {
    /// Pace replayed traces by their recorded timestamps
    #[serde(default = "default_realtime")]
    pub realtime: bool,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct SystemConfig {
    /// Event bus capacity
    #[serde(default = "default_event_bus_capacity")]
    pub event_bus_capacity: usize,
}

impl RecognitionConfig {
    pub fn timings(&self) -> TrackerTimings {
        TrackerTimings {
            debounce: Duration::from_millis(self.debounce_ms),
            tracking_timeout: Duration::from_millis(self.tracking_timeout_ms),
            drag_threshold: self.drag_threshold,
        }
    }

    pub fn geometry(&self) -> GeometryThresholds {
        GeometryThresholds {
            thumb_extension_ratio: self.thumb_extension_ratio,
            sideways_ratio: self.sideways_ratio,
        }
    }
}

impl SessionConfig {
    pub fn stop_timeout(&self) -> Duration {
        Duration::from_millis(self.stop_timeout_ms)
    }
}

impl ActionsConfig {
    /// Split the configured hotkey into its lowercase key names
    pub fn hotkey_keys(&self) -> Vec<String> {
        self.open_panel_hotkey
            .split('+')
            .map(|key| key.trim().to_lowercase())
            .filter(|key| !key.is_empty())
            .collect()
    }
}

impl GesturecamConfig {
    /// Load configuration from default sources (file + environment variables)
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from_file("gesturecam.toml")
    }

    /// Load configuration from a specific file path
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path_str = path.as_ref().to_string_lossy();
        debug!("Loading configuration from: {}", path_str);

        let settings = Config::builder()
            .set_default("recognition.debounce_ms", default_debounce_ms())?
            .set_default(
                "recognition.tracking_timeout_ms",
                default_tracking_timeout_ms(),
            )?
            .set_default("recognition.drag_threshold", default_drag_threshold() as f64)?
            .set_default(
                "recognition.thumb_extension_ratio",
                default_thumb_extension_ratio() as f64,
            )?
            .set_default("recognition.sideways_ratio", default_sideways_ratio() as f64)?
            .set_default("actions.open_panel_hotkey", default_open_panel_hotkey())?
            .set_default("actions.announce", default_announce())?
            .set_default("session.stop_timeout_ms", default_stop_timeout_ms())?
            .set_default("session.max_source_errors", default_max_source_errors())?
            .set_default("replay.realtime", default_realtime())?
            .set_default(
                "system.event_bus_capacity",
                default_event_bus_capacity() as i64,
            )?
            // Add configuration file (optional)
            .add_source(File::with_name(&path_str).required(false))
            // Add environment variables with GESTURECAM_ prefix
            .add_source(
                Environment::with_prefix("GESTURECAM")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let config: GesturecamConfig = settings.try_deserialize()?;

        info!("Configuration loaded successfully");
        debug!("Final configuration: {:#?}", config);

        Ok(config)
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<(), ConfigError> {
        let recognition = &self.recognition;

        if recognition.debounce_ms == 0 {
            return Err(ConfigError::Message(
                "Recognition debounce_ms must be greater than 0".to_string(),
            ));
        }

        if recognition.tracking_timeout_ms == 0 {
            return Err(ConfigError::Message(
                "Recognition tracking_timeout_ms must be greater than 0".to_string(),
            ));
        }

        if !(recognition.drag_threshold > 0.0 && recognition.drag_threshold < 1.0) {
            return Err(ConfigError::Message(
                "Recognition drag_threshold must be within (0, 1)".to_string(),
            ));
        }

        if !(recognition.thumb_extension_ratio > 0.0) {
            return Err(ConfigError::Message(
                "Recognition thumb_extension_ratio must be greater than 0".to_string(),
            ));
        }

        if !(recognition.sideways_ratio > 0.0) {
            return Err(ConfigError::Message(
                "Recognition sideways_ratio must be greater than 0".to_string(),
            ));
        }

        if self.actions.hotkey_keys().is_empty() {
            return Err(ConfigError::Message(
                "Actions open_panel_hotkey must name at least one key".to_string(),
            ));
        }

        if self.session.stop_timeout_ms == 0 {
            return Err(ConfigError::Message(
                "Session stop_timeout_ms must be greater than 0".to_string(),
            ));
        }

        if self.system.event_bus_capacity == 0 {
            return Err(ConfigError::Message(
                "Event bus capacity must be greater than 0".to_string(),
            ));
        }

        Ok(())
    }
}

impl Default for GesturecamConfig {
    fn default() -> Self {
        Self {
            recognition: RecognitionConfig {
                debounce_ms: default_debounce_ms(),
                tracking_timeout_ms: default_tracking_timeout_ms(),
                drag_threshold: default_drag_threshold(),
                thumb_extension_ratio: default_thumb_extension_ratio(),
                sideways_ratio: default_sideways_ratio(),
            },
            actions: ActionsConfig {
                open_panel_hotkey: default_open_panel_hotkey(),
                announce: default_announce(),
            },
            session: SessionConfig {
                stop_timeout_ms: default_stop_timeout_ms(),
                max_source_errors: default_max_source_errors(),
            },
            replay: ReplayConfig {
                realtime: default_realtime(),
            },
            system: SystemConfig {
                event_bus_capacity: default_event_bus_capacity(),
            },
        }
    }
}

// Default value functions
fn default_debounce_ms() -> u64 {
    400
}
fn default_tracking_timeout_ms() -> u64 {
    1000
}
fn default_drag_threshold() -> f32 {
    0.2
}
fn default_thumb_extension_ratio() -> f32 {
    0.6
}
fn default_sideways_ratio() -> f32 {
    0.5
}

fn default_open_panel_hotkey() -> String {
    "ctrl+shift+a".to_string()
}
fn default_announce() -> bool {
    true
}

fn default_stop_timeout_ms() -> u64 {
    2000
}
fn default_max_source_errors() -> u32 {
    10
}

fn default_realtime() -> bool {
    true
}

fn default_event_bus_capacity() -> usize {
    100
}
