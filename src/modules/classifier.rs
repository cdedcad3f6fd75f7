use std::fmt;

use serde::{Deserialize, Serialize};

use crate::utils::math::clamp;

/// Discrete mood labels, serialized as the lowercase strings the UI layer
/// consumes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mood {
    Happy,
    Angry,
    Sad,
    Tired,
    Focused,
    Calm,
    Neutral,
    Unknown,
}

impl Mood {
    pub fn as_str(&self) -> &'static str {
        match self {
            Mood::Happy => "happy",
            Mood::Angry => "angry",
            Mood::Sad => "sad",
            Mood::Tired => "tired",
            Mood::Focused => "focused",
            Mood::Calm => "calm",
            Mood::Neutral => "neutral",
            Mood::Unknown => "unknown",
        }
    }
}

impl fmt::Display for Mood {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// classify maps the smoothed signals and the unsmoothed mouth-open ratio to
/// a mood label with a confidence in [0,1].
///
/// The rule cascade is ordered and mutually exclusive; the first matching
/// rule wins. Order and numeric literals are tuned decision boundaries and
/// must not be rearranged.
pub fn classify(smile_score: f32, eye_open_score: f32, mouth_open_ratio: f32) -> (Mood, f32) {
    if eye_open_score < 0.10 {
        // Eyes nearly shut.
        (
            Mood::Tired,
            clamp((0.15 - eye_open_score) / 0.15, 0.0, 1.0),
        )
    } else if smile_score > 0.60 {
        // Strong smile beats every remaining rule.
        (Mood::Happy, clamp((smile_score - 0.50) / 0.30, 0.0, 1.0))
    } else if eye_open_score > 0.20 && mouth_open_ratio < 0.03 {
        // Open eyes with a pressed-shut mouth.
        (
            Mood::Angry,
            clamp((0.05 - mouth_open_ratio) / 0.05, 0.0, 1.0),
        )
    } else if eye_open_score > 0.28 && smile_score < 0.25 {
        // Very wide eyes, no smile.
        (
            Mood::Focused,
            clamp((eye_open_score - 0.25) / 0.10, 0.0, 1.0),
        )
    } else if smile_score < 0.20 && eye_open_score > 0.15 {
        (Mood::Sad, clamp((0.25 - smile_score) / 0.25, 0.0, 1.0))
    } else if smile_score > 0.25 && smile_score < 0.60 && eye_open_score > 0.10 && eye_open_score < 0.16
    {
        // Gentle smile with relaxed lids.
        (Mood::Calm, 0.6)
    } else {
        (Mood::Neutral, 0.3)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn nearly_closed_eyes_read_as_tired() {
        let (mood, confidence) = classify(0.5, 0.05, 0.02);
        assert_eq!(mood, Mood::Tired);
        assert_relative_eq!(confidence, (0.15 - 0.05) / 0.15, epsilon = 1e-6);
    }

    #[test]
    fn strong_smile_wins_before_angry_is_evaluated() {
        // Also satisfies the angry condition (eye > 0.20, mouth < 0.03);
        // the earlier happy rule must take it.
        let (mood, confidence) = classify(0.9, 0.25, 0.01);
        assert_eq!(mood, Mood::Happy);
        assert_eq!(confidence, 1.0);
    }

    #[test]
    fn open_eyes_closed_mouth_read_as_angry() {
        let (mood, confidence) = classify(0.3, 0.25, 0.01);
        assert_eq!(mood, Mood::Angry);
        assert_relative_eq!(confidence, 0.8, epsilon = 1e-6);
    }

    #[test]
    fn wide_eyes_without_smile_read_as_focused() {
        let (mood, confidence) = classify(0.22, 0.30, 0.05);
        assert_eq!(mood, Mood::Focused);
        assert_relative_eq!(confidence, 0.5, epsilon = 1e-5);
    }

    #[test]
    fn flat_mouth_open_eyes_read_as_sad() {
        let (mood, confidence) = classify(0.1, 0.18, 0.05);
        assert_eq!(mood, Mood::Sad);
        assert_relative_eq!(confidence, 0.6, epsilon = 1e-6);
    }

    #[test]
    fn gentle_smile_relaxed_lids_read_as_calm() {
        let (mood, confidence) = classify(0.4, 0.13, 0.02);
        assert_eq!(mood, Mood::Calm);
        assert_eq!(confidence, 0.6);
    }

    #[test]
    fn unmatched_inputs_fall_back_to_neutral() {
        let (mood, confidence) = classify(0.22, 0.18, 0.05);
        assert_eq!(mood, Mood::Neutral);
        assert_eq!(confidence, 0.3);
    }

    #[test]
    fn confidence_stays_in_unit_interval_for_extreme_inputs() {
        let extremes = [-1.0e6f32, -1.0, 0.0, 0.5, 1.0, 1.0e6];
        for &smile in &extremes {
            for &eye in &extremes {
                for &mouth in &extremes {
                    let (_, confidence) = classify(smile, eye, mouth);
                    assert!(
                        (0.0..=1.0).contains(&confidence),
                        "confidence {confidence} out of range for ({smile}, {eye}, {mouth})"
                    );
                }
            }
        }
    }

    #[test]
    fn moods_serialize_as_lowercase_labels() {
        assert_eq!(
            serde_json::to_value(Mood::Happy).unwrap(),
            serde_json::json!("happy")
        );
        assert_eq!(
            serde_json::to_value(Mood::Unknown).unwrap(),
            serde_json::json!("unknown")
        );
        assert_eq!(Mood::Focused.to_string(), "focused");
    }
}
