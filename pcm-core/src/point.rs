use derive_more::{Display, From, Into};
use nalgebra::{Point2, Point3};

#[cfg(feature = "serde-serialize")]
use serde::{Deserialize, Serialize};

/// The stable identifier the sensor gives a feature point.
///
/// The same physical feature keeps its identifier from one frame to the next, which is what
/// allows two triangulations of the same features to be compared.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display, From, Into)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub struct PointId(pub u64);

/// A feature point sampled from the sensor feed.
///
/// The screen point is in the coordinate frame of the viewport, with the X axis pointing right
/// and the Y axis pointing down. The world point is optional because the sensor can report a
/// feature on screen before it has been able to place it in the world.
///
/// Samples are immutable once created.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub struct SamplePoint {
    id: PointId,
    screen: Point2<f64>,
    #[cfg_attr(feature = "serde-serialize", serde(default))]
    world: Option<Point3<f64>>,
}

impl SamplePoint {
    /// Creates a sample that has been placed in the world.
    pub fn new(id: u64, screen: Point2<f64>, world: Point3<f64>) -> Self {
        Self {
            id: PointId(id),
            screen,
            world: Some(world),
        }
    }

    /// Creates a sample that has only been observed on screen.
    pub fn screen_only(id: u64, screen: Point2<f64>) -> Self {
        Self {
            id: PointId(id),
            screen,
            world: None,
        }
    }

    pub fn id(&self) -> PointId {
        self.id
    }

    /// Retrieve the point on the screen.
    pub fn screen(&self) -> Point2<f64> {
        self.screen
    }

    /// Retrieve the point in the world, if the sensor placed it.
    pub fn world(&self) -> Option<Point3<f64>> {
        self.world
    }
}
