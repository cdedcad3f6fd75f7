use crate::config::SmootherConfig;
use crate::modules::feature_extractor::FeatureVector;
use crate::utils::math::clamp;

// Tuned smile-score boundaries; changing them shifts every mood decision.
const SMILE_WIDTH_OFFSET: f32 = 0.34;
const SMILE_WIDTH_SPAN: f32 = 0.10;
const SMILE_WIDTH_WEIGHT: f32 = 0.7;
const SMILE_OPEN_OFFSET: f32 = 0.02;
const SMILE_OPEN_SPAN: f32 = 0.05;
const SMILE_OPEN_WEIGHT: f32 = 0.3;

/// The two smoothed signals the classifier consumes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SmoothedSignals {
    pub smile_score: f32,
    pub eye_open_score: f32,
}

/// Exponential moving average over the raw smile and eye-openness scores.
///
/// The first valid update passes the raw values through unchanged; every
/// later update blends with `alpha`. State persists across frames and is
/// only touched on frames with a detected face.
#[derive(Debug, Clone)]
pub struct SignalSmoother {
    alpha: f32,
    state: Option<SmoothedSignals>,
}

impl SignalSmoother {
    pub fn new(config: SmootherConfig) -> Self {
        SignalSmoother {
            alpha: config.alpha,
            state: None,
        }
    }

    /// Raw smile intensity derived from unsmoothed mouth ratios.
    pub fn smile_raw(features: &FeatureVector) -> f32 {
        SMILE_WIDTH_WEIGHT
            * clamp(
                (features.mouth_width_ratio - SMILE_WIDTH_OFFSET) / SMILE_WIDTH_SPAN,
                0.0,
                1.0,
            )
            + SMILE_OPEN_WEIGHT
                * clamp(
                    (features.mouth_open_ratio - SMILE_OPEN_OFFSET) / SMILE_OPEN_SPAN,
                    0.0,
                    1.0,
                )
    }

    /// update folds one feature vector into the smoothed state and returns
    /// the updated signals.
    pub fn update(&mut self, features: &FeatureVector) -> SmoothedSignals {
        let smile_raw = Self::smile_raw(features);
        let eye_raw = features.eye_openness();

        let next = match self.state {
            None => SmoothedSignals {
                smile_score: smile_raw,
                eye_open_score: eye_raw,
            },
            Some(prev) => SmoothedSignals {
                smile_score: self.alpha * smile_raw + (1.0 - self.alpha) * prev.smile_score,
                eye_open_score: self.alpha * eye_raw + (1.0 - self.alpha) * prev.eye_open_score,
            },
        };
        self.state = Some(next);
        next
    }

    /// Current smoothed signals, `None` before the first valid update.
    pub fn signals(&self) -> Option<SmoothedSignals> {
        self.state
    }

    /// Drops the state so the next update reinitializes from raw values.
    /// Called when a detection session restarts.
    pub fn reset(&mut self) {
        self.state = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn features(mouth_width: f32, mouth_open: f32, eye_open: f32) -> FeatureVector {
        FeatureVector {
            mouth_width_ratio: mouth_width,
            mouth_open_ratio: mouth_open,
            left_eye_open_ratio: eye_open,
            right_eye_open_ratio: eye_open,
        }
    }

    #[test]
    fn first_update_passes_raw_through() {
        let mut smoother = SignalSmoother::new(SmootherConfig::new());
        let f = features(0.44, 0.07, 0.3);
        let signals = smoother.update(&f);

        // Bit-identical to the raw scores, no blending with an unset prior.
        assert_eq!(signals.smile_score, SignalSmoother::smile_raw(&f));
        assert_eq!(signals.eye_open_score, 0.3);
    }

    #[test]
    fn smile_raw_weights_partial_terms() {
        // Width halfway through its span, mouth fully closed.
        let raw = SignalSmoother::smile_raw(&features(0.39, 0.0, 0.2));
        assert_relative_eq!(raw, 0.35, epsilon = 1e-6);
    }

    #[test]
    fn ema_converges_without_overshoot() {
        let mut smoother = SignalSmoother::new(SmootherConfig::new());
        smoother.update(&features(0.0, 0.0, 0.0));

        // Constant raw input of (smile ~1.0, eye 0.3) from here on.
        let target = features(0.44, 0.07, 0.3);
        let limit = SignalSmoother::smile_raw(&target);
        let mut prev = 0.0f32;
        for _ in 0..32 {
            let signals = smoother.update(&target);
            assert!(signals.smile_score > prev);
            assert!(signals.smile_score <= limit);
            prev = signals.smile_score;
        }
        assert_relative_eq!(prev, limit, epsilon = 1e-3);
    }

    #[test]
    fn blend_uses_alpha_quarter() {
        let mut smoother = SignalSmoother::new(SmootherConfig::new());
        smoother.update(&features(0.0, 0.0, 0.0));
        let signals = smoother.update(&features(0.0, 0.0, 0.4));
        // 0.25 * 0.4 + 0.75 * 0.0
        assert_relative_eq!(signals.eye_open_score, 0.1, epsilon = 1e-6);
    }

    #[test]
    fn reset_reinitializes_from_raw() {
        let mut smoother = SignalSmoother::new(SmootherConfig::new());
        smoother.update(&features(0.44, 0.07, 0.9));
        smoother.reset();
        let signals = smoother.update(&features(0.0, 0.0, 0.3));
        assert_eq!(signals.smile_score, 0.0);
        assert_eq!(signals.eye_open_score, 0.3);
    }
}
