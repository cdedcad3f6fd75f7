use serde::{Deserialize, Serialize};

/// Semantic anchor indices into a landmark set.
///
/// Defaults follow the MediaPipe Face Mesh topology; a detector with a
/// different topology supplies its own mapping.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FaceAnchors {
    pub mouth_left: usize,
    pub mouth_right: usize,
    pub upper_lip: usize,
    pub lower_lip: usize,
    pub left_eye_left: usize,
    pub left_eye_right: usize,
    pub left_eye_top: usize,
    pub left_eye_bottom: usize,
    pub right_eye_left: usize,
    pub right_eye_right: usize,
    pub right_eye_top: usize,
    pub right_eye_bottom: usize,
    pub face_left: usize,
    pub face_right: usize,
}

impl FaceAnchors {
    pub fn face_mesh() -> Self {
        FaceAnchors {
            mouth_left: 61,
            mouth_right: 291,
            upper_lip: 13,
            lower_lip: 14,
            left_eye_left: 33,
            left_eye_right: 133,
            left_eye_top: 159,
            left_eye_bottom: 145,
            right_eye_left: 362,
            right_eye_right: 263,
            right_eye_top: 386,
            right_eye_bottom: 374,
            face_left: 234,
            face_right: 454,
        }
    }

    /// Highest index referenced by any anchor; a landmark set must be longer
    /// than this to be usable.
    pub fn max_index(&self) -> usize {
        [
            self.mouth_left,
            self.mouth_right,
            self.upper_lip,
            self.lower_lip,
            self.left_eye_left,
            self.left_eye_right,
            self.left_eye_top,
            self.left_eye_bottom,
            self.right_eye_left,
            self.right_eye_right,
            self.right_eye_top,
            self.right_eye_bottom,
            self.face_left,
            self.face_right,
        ]
        .into_iter()
        .max()
        .unwrap_or(0)
    }
}

impl Default for FaceAnchors {
    fn default() -> Self {
        FaceAnchors::face_mesh()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SmootherConfig {
    /// Exponential moving average factor applied to both signals.
    pub alpha: f32,
}

impl SmootherConfig {
    pub fn new() -> Self {
        SmootherConfig { alpha: 0.25 }
    }
}

impl Default for SmootherConfig {
    fn default() -> Self {
        SmootherConfig::new()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SamplerConfig {
    /// Scheduling tick interval in milliseconds.
    pub tick_interval_ms: u64,
    /// Minimum gap between processed frame timestamps, caps the effective
    /// classification rate at ~10/s.
    pub min_process_interval_ms: u64,
    /// Optional per-call detector timeout; on expiry the frame is treated as
    /// containing no face. Off by default.
    pub detect_timeout_ms: Option<u64>,
}

impl SamplerConfig {
    pub fn new() -> Self {
        SamplerConfig {
            tick_interval_ms: 33,
            min_process_interval_ms: 100,
            detect_timeout_ms: None,
        }
    }
}

impl Default for SamplerConfig {
    fn default() -> Self {
        SamplerConfig::new()
    }
}
