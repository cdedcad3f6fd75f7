pub mod config;

pub use config::{FaceAnchors, SamplerConfig, SmootherConfig};
