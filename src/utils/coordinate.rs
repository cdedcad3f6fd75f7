use nalgebra::Point2;
use serde::{Deserialize, Serialize};

/// A single facial keypoint in normalized [0,1] image coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate2D {
    pub x: f32,
    pub y: f32,
}

impl Coordinate2D {
    pub fn new(x: f32, y: f32) -> Self {
        Coordinate2D { x, y }
    }

    pub fn to_point(self) -> Point2<f32> {
        Point2::new(self.x, self.y)
    }

    /// Euclidean distance to another keypoint.
    pub fn distance(&self, other: &Coordinate2D) -> f32 {
        nalgebra::distance(&self.to_point(), &other.to_point())
    }
}

/// An ordered set of facial keypoints produced by the detector for one frame.
pub type LandmarkSet = Vec<Coordinate2D>;

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn distance_is_euclidean() {
        let a = Coordinate2D::new(0.0, 0.0);
        let b = Coordinate2D::new(3.0, 4.0);
        assert_relative_eq!(a.distance(&b), 5.0);
    }

    #[test]
    fn distance_to_self_is_zero() {
        let a = Coordinate2D::new(0.42, 0.17);
        assert_eq!(a.distance(&a), 0.0);
    }
}
