use super::types::FingerState;
use super::GeometryThresholds;
use crate::landmarks::*;

/// Tip/PIP joint pairs for the four long fingers
const FINGER_JOINTS: [(usize, usize); 4] = [
    (INDEX_TIP, INDEX_PIP),
    (MIDDLE_TIP, MIDDLE_PIP),
    (RING_TIP, RING_PIP),
    (PINKY_TIP, PINKY_PIP),
];

/// Derive finger states with the default thresholds
pub fn extract(landmarks: &HandLandmarks) -> FingerState {
    extract_with(landmarks, &GeometryThresholds::default())
}

/// Derive finger states from one hand.
///
/// The thumb is compared against the wrist to middle-base distance so the
/// test scales with hand size and tolerates rotation. The other fingers are
/// extended when the tip is above its PIP joint in image coordinates, which
/// assumes a roughly upright camera.
pub fn extract_with(landmarks: &HandLandmarks, thresholds: &GeometryThresholds) -> FingerState {
    let reference = landmarks[WRIST].distance_2d(&landmarks[MIDDLE_MCP]);
    let thumb_span = landmarks[THUMB_TIP].distance_2d(&landmarks[PINKY_MCP]);

    let mut fingers = [false; 5];
    fingers[0] = thumb_span > thresholds.thumb_extension_ratio * reference;

    for (slot, (tip, pip)) in fingers[1..].iter_mut().zip(FINGER_JOINTS) {
        *slot = landmarks[tip].y < landmarks[pip].y;
    }

    FingerState::new(fingers)
}
