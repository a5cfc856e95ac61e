use crate::recognition::{CompositeGesture, GestureEvent, SimpleGesture};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Concrete effect requested from the host application
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Action {
    /// Stop any speech in progress
    SilenceSpeech,
    /// Make the interface visible
    ShowInterface,
    /// Hide the interface and let clicks pass through it
    HideInterface,
    /// Put the assistant to sleep
    Sleep,
    /// Exit the application
    Quit,
    /// Open the text panel by sending a keyboard shortcut
    OpenPanel { hotkey: Vec<String> },
    /// Make the window grabbable so it can be moved
    RepositionWindow,
}

impl Action {
    /// Map a gesture event to its action. Every event has exactly one.
    pub fn for_event(event: GestureEvent, open_panel_hotkey: &[String]) -> Self {
        match event {
            GestureEvent::Simple(SimpleGesture::Point) => Action::SilenceSpeech,
            GestureEvent::Simple(SimpleGesture::Victory) => Action::ShowInterface,
            GestureEvent::Simple(SimpleGesture::Love) => Action::Quit,
            GestureEvent::Simple(SimpleGesture::Closed) => Action::Sleep,
            GestureEvent::Composite(CompositeGesture::OpenPanel) => Action::OpenPanel {
                hotkey: open_panel_hotkey.to_vec(),
            },
            GestureEvent::Composite(CompositeGesture::ToggleInvisible) => Action::HideInterface,
            GestureEvent::Composite(CompositeGesture::Grab) => Action::RepositionWindow,
        }
    }

    /// Short spoken feedback for actions that are not otherwise visible
    pub fn announcement(&self) -> Option<&'static str> {
        match self {
            Action::OpenPanel { .. } => Some("Opening the panel."),
            Action::RepositionWindow => Some("Reposition mode."),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Action::SilenceSpeech => "silence_speech",
            Action::ShowInterface => "show_interface",
            Action::HideInterface => "hide_interface",
            Action::Sleep => "sleep",
            Action::Quit => "quit",
            Action::OpenPanel { .. } => "open_panel",
            Action::RepositionWindow => "reposition_window",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::OpenPanel { hotkey } => write!(f, "open_panel ({})", hotkey.join("+")),
            other => f.write_str(other.name()),
        }
    }
}
