use crate::config::FaceAnchors;
use crate::error::PipelineError;
use crate::utils::coordinate::Coordinate2D;

/// Guards divisions when facial dimensions collapse to near-zero.
const EPSILON: f32 = 1e-6;

/// Normalized ratio features derived from one landmark set.
///
/// Mouth metrics are normalized by face width, eye openness by the width of
/// the respective eye.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FeatureVector {
    pub mouth_width_ratio: f32,
    pub mouth_open_ratio: f32,
    pub left_eye_open_ratio: f32,
    pub right_eye_open_ratio: f32,
}

impl FeatureVector {
    /// Arithmetic mean of left and right eye openness.
    pub fn eye_openness(&self) -> f32 {
        (self.left_eye_open_ratio + self.right_eye_open_ratio) / 2.0
    }
}

/// Converts a raw landmark set into normalized ratio features.
///
/// Pure and stateless apart from the configured anchor mapping.
#[derive(Debug, Clone)]
pub struct FeatureExtractor {
    anchors: FaceAnchors,
}

impl FeatureExtractor {
    pub fn new(anchors: FaceAnchors) -> Self {
        FeatureExtractor { anchors }
    }

    /// extract computes the feature vector for one landmark set.
    ///
    /// Fails fast when the set does not cover every anchor index or when a
    /// resulting ratio is non-finite; the caller must skip such frames.
    pub fn extract(&self, landmarks: &[Coordinate2D]) -> Result<FeatureVector, PipelineError> {
        let required = self.anchors.max_index() + 1;
        if landmarks.len() < required {
            return Err(PipelineError::MalformedLandmarkSet {
                required,
                actual: landmarks.len(),
            });
        }
        let a = &self.anchors;

        let face_width = landmarks[a.face_left].distance(&landmarks[a.face_right]) + EPSILON;
        let mouth_width_ratio =
            landmarks[a.mouth_left].distance(&landmarks[a.mouth_right]) / face_width;
        let mouth_open_ratio =
            landmarks[a.upper_lip].distance(&landmarks[a.lower_lip]) / face_width;

        let left_eye_open_ratio = eye_openness(
            &landmarks[a.left_eye_top],
            &landmarks[a.left_eye_bottom],
            &landmarks[a.left_eye_left],
            &landmarks[a.left_eye_right],
        );
        let right_eye_open_ratio = eye_openness(
            &landmarks[a.right_eye_top],
            &landmarks[a.right_eye_bottom],
            &landmarks[a.right_eye_left],
            &landmarks[a.right_eye_right],
        );

        let features = FeatureVector {
            mouth_width_ratio,
            mouth_open_ratio,
            left_eye_open_ratio,
            right_eye_open_ratio,
        };
        check_finite(features)
    }
}

fn eye_openness(
    top: &Coordinate2D,
    bottom: &Coordinate2D,
    left_corner: &Coordinate2D,
    right_corner: &Coordinate2D,
) -> f32 {
    top.distance(bottom) / (left_corner.distance(right_corner) + EPSILON)
}

fn check_finite(features: FeatureVector) -> Result<FeatureVector, PipelineError> {
    let checks = [
        (features.mouth_width_ratio, "mouth_width"),
        (features.mouth_open_ratio, "mouth_open"),
        (features.left_eye_open_ratio, "left_eye_open"),
        (features.right_eye_open_ratio, "right_eye_open"),
    ];
    for (value, feature) in checks {
        if !value.is_finite() {
            return Err(PipelineError::NonFiniteFeature { feature });
        }
    }
    Ok(features)
}
