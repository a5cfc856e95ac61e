use crate::error::{GesturecamError, Result};
use serde::{Deserialize, Serialize};
use std::ops::Index;

/// Number of keypoints the hand topology defines
pub const LANDMARK_COUNT: usize = 21;

pub const WRIST: usize = 0;
pub const THUMB_TIP: usize = 4;
pub const INDEX_MCP: usize = 5;
pub const INDEX_PIP: usize = 6;
pub const INDEX_TIP: usize = 8;
pub const MIDDLE_MCP: usize = 9;
pub const MIDDLE_PIP: usize = 10;
pub const MIDDLE_TIP: usize = 12;
pub const RING_PIP: usize = 14;
pub const RING_TIP: usize = 16;
pub const PINKY_MCP: usize = 17;
pub const PINKY_PIP: usize = 18;
pub const PINKY_TIP: usize = 20;

/// A single normalized keypoint. `x` and `y` are fractions of the frame size,
/// `z` is detector-relative depth.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Landmark {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Landmark {
    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    /// Planar distance, ignoring depth
    pub fn distance_2d(&self, other: &Landmark) -> f32 {
        (self.x - other.x).hypot(self.y - other.y)
    }

    pub fn xy(&self) -> Point2 {
        Point2 {
            x: self.x,
            y: self.y,
        }
    }

    fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }
}

impl From<[f32; 3]> for Landmark {
    fn from([x, y, z]: [f32; 3]) -> Self {
        Self { x, y, z }
    }
}

/// Normalized 2D position, used for the wrist anchor
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point2 {
    pub x: f32,
    pub y: f32,
}

/// Exactly 21 validated landmarks of one hand.
///
/// Only constructible through `TryFrom`, so every instance has the full
/// topology and finite coordinates.
#[derive(Debug, Clone, PartialEq)]
pub struct HandLandmarks {
    points: [Landmark; LANDMARK_COUNT],
}

impl HandLandmarks {
    pub fn wrist(&self) -> Point2 {
        self.points[WRIST].xy()
    }

    pub fn points(&self) -> &[Landmark; LANDMARK_COUNT] {
        &self.points
    }
}

impl Index<usize> for HandLandmarks {
    type Output = Landmark;

    fn index(&self, index: usize) -> &Self::Output {
        &self.points[index]
    }
}

impl TryFrom<&[Landmark]> for HandLandmarks {
    type Error = GesturecamError;

    fn try_from(points: &[Landmark]) -> Result<Self> {
        let points: [Landmark; LANDMARK_COUNT] = points.try_into().map_err(|_| {
            GesturecamError::malformed(format!(
                "expected {} landmarks, got {}",
                LANDMARK_COUNT,
                points.len()
            ))
        })?;

        if let Some(position) = points.iter().position(|point| !point.is_finite()) {
            return Err(GesturecamError::malformed(format!(
                "landmark {} has a non-finite coordinate",
                position
            )));
        }

        Ok(Self { points })
    }
}

impl TryFrom<Vec<Landmark>> for HandLandmarks {
    type Error = GesturecamError;

    fn try_from(points: Vec<Landmark>) -> Result<Self> {
        Self::try_from(points.as_slice())
    }
}

impl TryFrom<&[[f32; 3]]> for HandLandmarks {
    type Error = GesturecamError;

    fn try_from(raw: &[[f32; 3]]) -> Result<Self> {
        let points: Vec<Landmark> = raw.iter().copied().map(Landmark::from).collect();
        Self::try_from(points.as_slice())
    }
}
