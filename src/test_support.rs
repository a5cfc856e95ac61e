//! Synthetic hand fixtures shared by unit tests.

use crate::landmarks::*;

#[derive(Debug, Clone, Copy)]
pub enum HandPose {
    Fist,
    SidewaysFist,
    OpenPalm,
    Point,
    Victory,
    Love,
    ThumbsUp,
}

impl HandPose {
    fn fingers(self) -> [bool; 5] {
        match self {
            HandPose::Fist | HandPose::SidewaysFist => [false; 5],
            HandPose::OpenPalm => [true; 5],
            HandPose::Point => [false, true, false, false, false],
            HandPose::Victory => [false, true, true, false, false],
            HandPose::Love => [true, true, false, false, true],
            HandPose::ThumbsUp => [true, false, false, false, false],
        }
    }
}

pub fn hand(pose: HandPose, wrist_x: f32) -> HandLandmarks {
    hand_with(pose.fingers(), matches!(pose, HandPose::SidewaysFist), wrist_x)
}

/// Build an upright hand whose extracted finger states equal `fingers`.
///
/// The wrist sits at (`wrist_x`, 0.9); every other point is shifted with it.
pub fn hand_with(fingers: [bool; 5], sideways: bool, wrist_x: f32) -> HandLandmarks {
    let mut points = raw_points(fingers, sideways);
    let shift = wrist_x - 0.5;
    for point in points.iter_mut() {
        point[0] += shift;
    }
    HandLandmarks::try_from(points.as_slice()).expect("fixture landmarks are valid")
}

pub fn raw_points(fingers: [bool; 5], sideways: bool) -> Vec<[f32; 3]> {
    let mut points = vec![[0.5_f32, 0.7, 0.0]; LANDMARK_COUNT];

    points[WRIST] = [0.5, 0.9, 0.0];
    points[MIDDLE_MCP] = [0.5, 0.6, 0.0];

    if sideways {
        points[INDEX_MCP] = [0.5, 0.58, 0.0];
        points[PINKY_MCP] = [0.53, 0.74, 0.0];
    } else {
        points[INDEX_MCP] = [0.4, 0.62, 0.0];
        points[PINKY_MCP] = [0.62, 0.66, 0.0];
    }

    points[THUMB_TIP] = if fingers[0] {
        [0.25, 0.6, 0.0]
    } else {
        let pinky_base = points[PINKY_MCP];
        [pinky_base[0] - 0.03, pinky_base[1] + 0.02, 0.0]
    };

    let chains = [
        (INDEX_PIP, INDEX_TIP, 0.4),
        (MIDDLE_PIP, MIDDLE_TIP, 0.5),
        (RING_PIP, RING_TIP, 0.56),
        (PINKY_PIP, PINKY_TIP, 0.62),
    ];
    for (finger, (pip, tip, x)) in chains.into_iter().enumerate() {
        points[pip] = [x, 0.5, 0.0];
        points[tip] = if fingers[finger + 1] {
            [x, 0.3, 0.0]
        } else {
            [x, 0.65, 0.0]
        };
    }

    points
}
