/// clamp restricts `x` to the closed interval `[lo, hi]`.
///
/// Defined as `max(lo, min(hi, x))`, matching the tuned decision boundaries
/// of the classifier; a NaN input resolves to `hi`.
pub fn clamp(x: f32, lo: f32, hi: f32) -> f32 {
    lo.max(hi.min(x))
}

#[cfg(test)]
mod tests {
    use super::clamp;

    #[test]
    fn clamp_bounds() {
        assert_eq!(clamp(0.5, 0.0, 1.0), 0.5);
        assert_eq!(clamp(-2.0, 0.0, 1.0), 0.0);
        assert_eq!(clamp(7.0, 0.0, 1.0), 1.0);
        assert_eq!(clamp(0.0, 0.0, 1.0), 0.0);
        assert_eq!(clamp(1.0, 0.0, 1.0), 1.0);
    }
}
