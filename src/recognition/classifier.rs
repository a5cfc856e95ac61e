use super::types::{FingerState, GestureLabel};
use super::GeometryThresholds;
use crate::landmarks::{HandLandmarks, INDEX_MCP, PINKY_MCP};

/// Classify with the default thresholds
pub fn classify(fingers: &FingerState, landmarks: &HandLandmarks) -> GestureLabel {
    classify_with(fingers, landmarks, &GeometryThresholds::default())
}

/// Map one frame's finger states to a label. First match wins, since several
/// categories overlap at the finger-count level.
pub fn classify_with(
    fingers: &FingerState,
    landmarks: &HandLandmarks,
    thresholds: &GeometryThresholds,
) -> GestureLabel {
    let extended = fingers.extended_count();

    if extended == 0 {
        return if is_sideways(landmarks, thresholds) {
            GestureLabel::ClosedSideways
        } else {
            GestureLabel::Closed
        };
    }

    if extended >= 4 {
        return GestureLabel::Open;
    }

    match fingers.as_array() {
        [false, true, false, false, false] => GestureLabel::Point,
        [false, true, true, false, false] => GestureLabel::Victory,
        [true, true, false, false, true] => GestureLabel::Love,
        _ => GestureLabel::Unknown,
    }
}

/// Palm-width axis (index base to pinky base) close to vertical
fn is_sideways(landmarks: &HandLandmarks, thresholds: &GeometryThresholds) -> bool {
    let index_base = &landmarks[INDEX_MCP];
    let pinky_base = &landmarks[PINKY_MCP];
    let dx = (index_base.x - pinky_base.x).abs();
    let dy = (index_base.y - pinky_base.y).abs();
    dx < thresholds.sideways_ratio * dy
}
