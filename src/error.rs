use thiserror::Error;

/// Contract violations raised by the core pipeline stages.
///
/// Detector failures are transported as `anyhow::Error` at the sampling loop
/// boundary; both are logged and skipped there, never fatal.
#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("landmark set too short: need at least {required} points, got {actual}")]
    MalformedLandmarkSet { required: usize, actual: usize },

    #[error("landmark set produced a non-finite {feature} ratio")]
    NonFiniteFeature { feature: &'static str },
}
