use serde::{Deserialize, Serialize};
use std::fmt;

/// Extended/folded state of each finger, `[thumb, index, middle, ring, pinky]`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct FingerState([bool; 5]);

impl FingerState {
    pub const fn new(fingers: [bool; 5]) -> Self {
        Self(fingers)
    }

    pub fn as_array(&self) -> [bool; 5] {
        self.0
    }

    pub fn thumb(&self) -> bool {
        self.0[0]
    }

    pub fn index(&self) -> bool {
        self.0[1]
    }

    pub fn middle(&self) -> bool {
        self.0[2]
    }

    pub fn ring(&self) -> bool {
        self.0[3]
    }

    pub fn pinky(&self) -> bool {
        self.0[4]
    }

    pub fn extended_count(&self) -> usize {
        self.0.iter().filter(|extended| **extended).count()
    }
}

/// Single-frame classification result
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GestureLabel {
    /// No hand visible this frame
    None_,
    Open,
    Closed,
    ClosedSideways,
    Point,
    Victory,
    Love,
    Unknown,
}

impl GestureLabel {
    pub fn as_str(&self) -> &'static str {
        match self {
            GestureLabel::None_ => "none",
            GestureLabel::Open => "open",
            GestureLabel::Closed => "closed",
            GestureLabel::ClosedSideways => "closed_sideways",
            GestureLabel::Point => "point",
            GestureLabel::Victory => "victory",
            GestureLabel::Love => "love",
            GestureLabel::Unknown => "unknown",
        }
    }

    /// Labels the debouncer may confirm
    pub fn is_debounceable(&self) -> bool {
        !matches!(self, GestureLabel::None_ | GestureLabel::Unknown)
    }
}

impl fmt::Display for GestureLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Gestures that are dispatched on their own
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SimpleGesture {
    Point,
    Victory,
    Love,
    Closed,
}

impl SimpleGesture {
    /// Simple gestures confirmed through the debouncer. `Closed` is reached
    /// only through the tracker's timeout fallback.
    pub fn from_debounced(label: GestureLabel) -> Option<Self> {
        match label {
            GestureLabel::Point => Some(SimpleGesture::Point),
            GestureLabel::Victory => Some(SimpleGesture::Victory),
            GestureLabel::Love => Some(SimpleGesture::Love),
            _ => None,
        }
    }
}

/// Two-step gestures recognized by the tracker
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CompositeGesture {
    /// Closed fist followed by an open hand
    OpenPanel,
    /// Closed fist dragged sideways
    ToggleInvisible,
    /// Open hand followed by a sideways fist
    Grab,
}

/// Event handed to the action layer, at most once per logical transition
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GestureEvent {
    Simple(SimpleGesture),
    Composite(CompositeGesture),
}

impl fmt::Display for GestureEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GestureEvent::Simple(gesture) => write!(f, "Simple({:?})", gesture),
            GestureEvent::Composite(gesture) => write!(f, "Composite({:?})", gesture),
        }
    }
}
