use super::types::GestureLabel;
use std::time::{Duration, Instant};

/// Dwell-time filter for per-frame labels.
///
/// A label is confirmed once it has been observed on every frame for at
/// least `dwell`. Any change of label restarts the timer.
#[derive(Debug, Clone)]
pub struct Debouncer {
    dwell: Duration,
    candidate: Option<(GestureLabel, Instant)>,
}

impl Debouncer {
    pub fn new(dwell: Duration) -> Self {
        Self {
            dwell,
            candidate: None,
        }
    }

    /// Feed one frame's label. Returns the label on every frame where it is
    /// confirmed; repeat suppression is left to the caller.
    pub fn observe(&mut self, label: GestureLabel, now: Instant) -> Option<GestureLabel> {
        if !label.is_debounceable() {
            self.reset();
            return None;
        }

        let since = match self.candidate {
            Some((current, since)) if current == label => since,
            _ => {
                self.candidate = Some((label, now));
                now
            }
        };

        // A clock that went backwards counts as no elapsed time
        if now.saturating_duration_since(since) >= self.dwell {
            Some(label)
        } else {
            None
        }
    }

    pub fn reset(&mut self) {
        self.candidate = None;
    }

    /// Label currently being timed, if any
    pub fn pending(&self) -> Option<GestureLabel> {
        self.candidate.map(|(label, _)| label)
    }
}
