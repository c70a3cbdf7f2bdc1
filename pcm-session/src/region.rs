use pcm_core::nalgebra::Point2;

#[cfg(feature = "serde-serialize")]
use serde::{Deserialize, Serialize};

/// The part of the viewport that samples are taken from.
///
/// The region is a rectangle centred in the viewport whose sides are `screen_part` times the sides
/// of the viewport. Points on its border are outside.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub struct SamplingRegion {
    pub width: f64,
    pub height: f64,
    pub screen_part: f64,
}

impl SamplingRegion {
    pub fn new(width: f64, height: f64, screen_part: f64) -> Self {
        Self {
            width,
            height,
            screen_part,
        }
    }

    /// The whole viewport.
    pub fn full(width: f64, height: f64) -> Self {
        Self::new(width, height, 1.0)
    }

    /// The top-left and bottom-right corners of the region.
    pub fn bounds(&self) -> (Point2<f64>, Point2<f64>) {
        let min_x = (self.width - self.width * self.screen_part) / 2.0;
        let min_y = (self.height - self.height * self.screen_part) / 2.0;
        (
            Point2::new(min_x, min_y),
            Point2::new(min_x + self.width * self.screen_part, min_y + self.height * self.screen_part),
        )
    }

    pub fn contains(&self, screen_point: Point2<f64>) -> bool {
        let (min, max) = self.bounds();
        screen_point.x > min.x
            && screen_point.x < max.x
            && screen_point.y > min.y
            && screen_point.y < max.y
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_region_excludes_the_border() {
        let region = SamplingRegion::full(100.0, 200.0);
        assert!(region.contains(Point2::new(50.0, 100.0)));
        assert!(region.contains(Point2::new(0.5, 199.5)));
        assert!(!region.contains(Point2::new(0.0, 100.0)));
        assert!(!region.contains(Point2::new(50.0, 200.0)));
        assert!(!region.contains(Point2::new(-1.0, 100.0)));
    }

    #[test]
    fn half_region_is_centred() {
        let region = SamplingRegion::new(100.0, 200.0, 0.5);
        assert_eq!(
            region.bounds(),
            (Point2::new(25.0, 50.0), Point2::new(75.0, 150.0))
        );
        assert!(region.contains(Point2::new(30.0, 60.0)));
        assert!(!region.contains(Point2::new(20.0, 100.0)));
        assert!(!region.contains(Point2::new(50.0, 160.0)));
    }

    #[test]
    fn empty_region_contains_nothing() {
        let region = SamplingRegion::new(100.0, 100.0, 0.0);
        assert!(!region.contains(Point2::new(50.0, 50.0)));
    }
}
