use crate::error::{GesturecamError, Result};
use crate::frame::FrameData;
use crate::landmarks::Landmark;
use serde_json::Value;

/// Hand landmark detector.
///
/// Returns the raw keypoints of at most one hand. Validation of the output
/// happens downstream, so a detector may return whatever its model produced.
pub trait HandDetector: Send {
    fn detect(&mut self, frame: &FrameData) -> Result<Option<Vec<Landmark>>>;
}

impl<F> HandDetector for F
where
    F: FnMut(&FrameData) -> Result<Option<Vec<Landmark>>> + Send,
{
    fn detect(&mut self, frame: &FrameData) -> Result<Option<Vec<Landmark>>> {
        self(frame)
    }
}

/// Detector for frames that already carry landmark JSON from an upstream
/// process.
///
/// Any JSON payload is passed on: points that are not three numbers become
/// non-finite landmarks and a non-array payload becomes an empty hand, so the
/// recognition pipeline rejects and counts them. Only a payload that is not
/// JSON at all is a detector error.
#[derive(Debug, Default, Clone, Copy)]
pub struct TraceDetector;

impl HandDetector for TraceDetector {
    fn detect(&mut self, frame: &FrameData) -> Result<Option<Vec<Landmark>>> {
        let payload: Option<Value> =
            serde_json::from_slice(&frame.data).map_err(|e| GesturecamError::Detector {
                details: format!("frame {} is not landmark JSON: {}", frame.id, e),
            })?;

        Ok(payload.map(|value| match value {
            Value::Array(points) => points.iter().map(landmark_from_json).collect(),
            _ => Vec::new(),
        }))
    }
}

fn landmark_from_json(value: &Value) -> Landmark {
    let coordinates: Option<Vec<f32>> = value.as_array().and_then(|items| {
        items
            .iter()
            .map(|item| item.as_f64().map(|c| c as f32))
            .collect()
    });

    match coordinates.as_deref() {
        Some(&[x, y, z]) => Landmark::new(x, y, z),
        _ => Landmark::new(f32::NAN, f32::NAN, f32::NAN),
    }
}
