use crate::{PointId, SamplePoint};
use nalgebra::{Point2, Point3, Vector2};

#[cfg(feature = "serde-serialize")]
use serde::{Deserialize, Serialize};

/// The unique circle passing through the three corners of a triangle.
///
/// A circumcircle is derived once from the corners of its triangle and never changes afterwards.
///
/// ```
/// use pcm_core::CircumCircle;
/// use pcm_core::nalgebra::Point2;
///
/// let circle = CircumCircle::through(
///     Point2::new(0.0, 0.0),
///     Point2::new(2.0, 0.0),
///     Point2::new(0.0, 2.0),
///     1e-12,
/// )
/// .unwrap();
/// assert_eq!(circle.center(), Point2::new(1.0, 1.0));
/// assert_eq!(circle.radius_squared(), 2.0);
/// assert!(circle.contains(Point2::new(1.5, 1.5), 1e-10));
/// assert!(!circle.contains(Point2::new(2.0, 2.0), 1e-10));
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub struct CircumCircle {
    center: Point2<f64>,
    radius_squared: f64,
}

impl CircumCircle {
    /// Computes the circle through `a`, `b` and `c`.
    ///
    /// Returns `None` when the points are (nearly) collinear. The `tolerance` is relative: the
    /// doubled signed area of the triangle must exceed `tolerance` times the squared length of
    /// its longest edge.
    pub fn through(a: Point2<f64>, b: Point2<f64>, c: Point2<f64>, tolerance: f64) -> Option<Self> {
        let ab = b - a;
        let ac = c - a;
        let det = perp_dot(ab, ac);
        let scale = ab
            .norm_squared()
            .max(ac.norm_squared())
            .max((c - b).norm_squared());
        if !(det.abs() > tolerance * scale) {
            return None;
        }

        let ab2 = ab.norm_squared();
        let ac2 = ac.norm_squared();
        let offset = Vector2::new(ac.y * ab2 - ab.y * ac2, ab.x * ac2 - ac.x * ab2) / (2.0 * det);
        if !offset.iter().all(|n| n.is_finite()) {
            return None;
        }

        Some(Self {
            center: a + offset,
            radius_squared: offset.norm_squared(),
        })
    }

    pub fn center(&self) -> Point2<f64> {
        self.center
    }

    pub fn radius_squared(&self) -> f64 {
        self.radius_squared
    }

    /// Checks whether `point` lies strictly inside the circle.
    ///
    /// Points whose squared distance to the center is within `tolerance * radius_squared` of the
    /// boundary are considered to lie on the circle, and therefore not inside it.
    pub fn contains(&self, point: Point2<f64>, tolerance: f64) -> bool {
        (point - self.center).norm_squared() < self.radius_squared * (1.0 - tolerance)
    }
}

/// Three sampled points and their circumcircle.
///
/// A `Triangle` is never collinear; [`Triangle::new`] refuses to build one from degenerate input.
/// The corners are stored in the order they were given.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub struct Triangle {
    points: [SamplePoint; 3],
    circumcircle: CircumCircle,
}

impl Triangle {
    /// Builds a triangle, unless its screen-space corners are collinear within `tolerance`.
    ///
    /// See [`CircumCircle::through`] for the meaning of `tolerance`.
    pub fn new(a: SamplePoint, b: SamplePoint, c: SamplePoint, tolerance: f64) -> Option<Self> {
        let circumcircle = CircumCircle::through(a.screen(), b.screen(), c.screen(), tolerance)?;
        Some(Self {
            points: [a, b, c],
            circumcircle,
        })
    }

    pub fn points(&self) -> &[SamplePoint; 3] {
        &self.points
    }

    pub fn ids(&self) -> [PointId; 3] {
        self.points.map(|p| p.id())
    }

    pub fn circumcircle(&self) -> &CircumCircle {
        &self.circumcircle
    }

    /// The corners in screen space.
    pub fn screen_corners(&self) -> [Point2<f64>; 3] {
        self.points.map(|p| p.screen())
    }

    /// Twice the signed area in screen space.
    ///
    /// Positive when the corners turn counter-clockwise in a Y-up frame.
    pub fn doubled_signed_area(&self) -> f64 {
        let [a, b, c] = self.screen_corners();
        perp_dot(b - a, c - a)
    }

    /// The screen-space centroid.
    pub fn centroid(&self) -> Point2<f64> {
        let [a, b, c] = self.screen_corners();
        Point2::from((a.coords + b.coords + c.coords) / 3.0)
    }

    /// Checks whether the screen-space triangle covers `point`, boundary included.
    pub fn contains_screen_point(&self, point: Point2<f64>) -> bool {
        point_in_triangle(point, self.screen_corners())
    }

    /// The closed outline of the triangle in screen space, starting and ending at the first corner.
    pub fn outline(&self) -> [Point2<f64>; 4] {
        let [a, b, c] = self.screen_corners();
        [a, b, c, a]
    }

    /// The world positions of the three corners, if every corner has one.
    pub fn world_positions(&self) -> Option<[Point3<f64>; 3]> {
        let [a, b, c] = self.points;
        Some([a.world()?, b.world()?, c.world()?])
    }

    /// The length of the longest world-space edge, if every corner has a world position.
    pub fn longest_edge(&self) -> Option<f64> {
        let [a, b, c] = self.world_positions()?;
        Some(
            [(a, b), (b, c), (c, a)]
                .iter()
                .map(|(from, to)| (to - from).norm())
                .fold(0.0, f64::max),
        )
    }
}

/// Checks whether `point` lies inside the triangle `corners` or on its boundary, regardless of
/// the winding of the corners.
pub fn point_in_triangle(point: Point2<f64>, corners: [Point2<f64>; 3]) -> bool {
    let [a, b, c] = corners;
    let d0 = perp_dot(b - a, point - a);
    let d1 = perp_dot(c - b, point - b);
    let d2 = perp_dot(a - c, point - c);
    let has_negative = d0 < 0.0 || d1 < 0.0 || d2 < 0.0;
    let has_positive = d0 > 0.0 || d1 > 0.0 || d2 > 0.0;
    !(has_negative && has_positive)
}

fn perp_dot(a: Vector2<f64>, b: Vector2<f64>) -> f64 {
    a.x * b.y - a.y * b.x
}
