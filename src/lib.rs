//! Facial mood inference pipeline.
//!
//! Reduces per-frame facial landmark geometry to two smoothed scalar signals
//! (smile intensity, eye openness) and classifies them into a discrete mood
//! label with a confidence score:
//! - `modules`: feature extraction, temporal smoothing, mood classification
//! - `pipeline`: detector contract, sampling loop and session lifecycle
//! - `config`: tuned anchor indices, smoothing and scheduling parameters
//! - `utils`: landmark coordinate types and small math helpers

pub mod config;
pub mod error;
pub mod pipeline;
pub mod utils;
mod modules;

pub use error::PipelineError;
pub use modules::classifier::{classify, Mood};
pub use modules::feature_extractor::{FeatureExtractor, FeatureVector};
pub use modules::smoother::{SignalSmoother, SmoothedSignals};
pub use pipeline::pipeline::{
    LandmarkDetector, MoodEstimate, MoodScanner, PipelineStatus, VideoFrame,
};
pub use utils::coordinate::{Coordinate2D, LandmarkSet};
