use float_ord::FloatOrd;
use log::*;
use pcm_core::{nalgebra::Point2, CircumCircle, SamplePoint, Triangle};
use std::collections::HashMap;

/// Incremental (Bowyer-Watson) Delaunay triangulation of sampled points in screen space.
///
/// The triangulation starts from a synthetic super-triangle enclosing every input point. Points
/// are inserted one at a time: all triangles whose circumcircle strictly contains the new point
/// are removed, and the point is connected to every edge on the boundary of the resulting cavity.
/// When every point is inserted, the triangles touching the super-triangle are discarded.
///
/// Nothing is kept between calls, so a triangulator can be shared freely.
///
/// Points are inserted sorted by screen `x`, then `y`, then id, so the same set of points yields
/// the same triangles whatever order it is passed in. A point lying on the circumcircle of a
/// triangle (within the cocircular tolerance) is not considered to be inside it: for four
/// cocircular points the diagonal starts at the one that sorts first, and a point duplicating an
/// existing position is dropped in favour of the one with the lower id.
///
/// ```
/// use pcm_core::nalgebra::{Point2, Point3};
/// use pcm_core::SamplePoint;
/// use pcm_geom::DelaunayTriangulator;
///
/// let points = [(0.0, 0.0), (2.0, 0.0), (1.0, 2.0), (1.0, 0.5)]
///     .iter()
///     .enumerate()
///     .map(|(id, &(x, y))| SamplePoint::new(id as u64, Point2::new(x, y), Point3::new(x, y, 0.0)))
///     .collect::<Vec<_>>();
/// let triangles = DelaunayTriangulator::new().triangulate(&points);
/// assert_eq!(triangles.len(), 3);
/// ```
#[derive(Copy, Clone, Debug, PartialEq, PartialOrd)]
pub struct DelaunayTriangulator {
    cocircular_tolerance: f64,
    degenerate_tolerance: f64,
    super_triangle_scale: f64,
}

impl DelaunayTriangulator {
    /// Creates a `DelaunayTriangulator` with default values.
    ///
    /// Same as calling [`Default::default`].
    pub fn new() -> Self {
        Default::default()
    }

    /// Set the relative tolerance of the in-circle test.
    ///
    /// A point within `tolerance * radius_squared` of a circumcircle counts as lying on it.
    ///
    /// Default is `1e-10`.
    #[must_use]
    pub fn cocircular_tolerance(self, cocircular_tolerance: f64) -> Self {
        Self {
            cocircular_tolerance,
            ..self
        }
    }

    /// Set the relative area below which a candidate triangle is skipped as degenerate.
    ///
    /// Default is `1e-12`.
    #[must_use]
    pub fn degenerate_tolerance(self, degenerate_tolerance: f64) -> Self {
        Self {
            degenerate_tolerance,
            ..self
        }
    }

    /// Set how many times the extent of the input the super-triangle reaches out.
    ///
    /// Larger values lose fewer sliver triangles along the convex hull.
    ///
    /// Default is `100.0`.
    #[must_use]
    pub fn super_triangle_scale(self, super_triangle_scale: f64) -> Self {
        Self {
            super_triangle_scale,
            ..self
        }
    }

    /// Triangulates `points`, which are left untouched.
    ///
    /// Fewer than three points, or points that are all collinear, produce no triangles.
    /// Every returned triangle winds counter-clockwise in a Y-up frame (clockwise on a Y-down
    /// screen).
    pub fn triangulate(&self, points: &[SamplePoint]) -> Vec<Triangle> {
        if points.len() < 3 {
            return vec![];
        }

        let mut points = points.to_vec();
        points.sort_by_key(|p| (FloatOrd(p.screen().x), FloatOrd(p.screen().y), p.id()));

        let mut vertices: Vec<Point2<f64>> = points.iter().map(|p| p.screen()).collect();
        let supers = match self.super_triangle(&vertices) {
            Some(supers) => supers,
            None => {
                debug!("all {} points coincide, nothing to triangulate", points.len());
                return vec![];
            }
        };
        let first_super = vertices.len();
        vertices.extend_from_slice(&supers);

        let mut active = Vec::with_capacity(2 * vertices.len());
        active.extend(self.candidate(
            &vertices,
            [first_super, first_super + 1, first_super + 2],
        ));

        let mut cavity_edges: Vec<[usize; 2]> = Vec::new();
        let mut edge_counts: HashMap<[usize; 2], usize> = HashMap::new();
        for (ix, &point) in vertices[..first_super].iter().enumerate() {
            cavity_edges.clear();
            edge_counts.clear();

            active.retain(|candidate: &Candidate| {
                if candidate.circle.contains(point, self.cocircular_tolerance) {
                    let [a, b, c] = candidate.corners;
                    cavity_edges.extend([[a, b], [b, c], [c, a]]);
                    false
                } else {
                    true
                }
            });

            if cavity_edges.is_empty() {
                trace!("point {} lies on or outside every circumcircle, skipped", ix);
                continue;
            }

            for edge in &cavity_edges {
                *edge_counts.entry(undirected(*edge)).or_default() += 1;
            }

            // Edges shared by two removed triangles are inside the cavity.
            for &[a, b] in &cavity_edges {
                if edge_counts[&undirected([a, b])] != 1 {
                    continue;
                }
                match self.candidate(&vertices, [a, b, ix]) {
                    Some(candidate) => active.push(candidate),
                    None => trace!("skipped degenerate triangle ({}, {}, {})", a, b, ix),
                }
            }
        }

        let triangles: Vec<Triangle> = active
            .into_iter()
            .filter(|candidate| candidate.corners.iter().all(|&ix| ix < first_super))
            .filter_map(|candidate| {
                let [a, b, c] = candidate.corners.map(|ix| points[ix]);
                Triangle::new(a, b, c, self.degenerate_tolerance)
            })
            .collect();
        debug!(
            "triangulated {} points into {} triangles",
            points.len(),
            triangles.len()
        );
        triangles
    }

    /// Computes the corners of a triangle that comfortably encloses `vertices`.
    fn super_triangle(&self, vertices: &[Point2<f64>]) -> Option<[Point2<f64>; 3]> {
        let min_x = vertices.iter().map(|p| FloatOrd(p.x)).min()?.0;
        let max_x = vertices.iter().map(|p| FloatOrd(p.x)).max()?.0;
        let min_y = vertices.iter().map(|p| FloatOrd(p.y)).min()?.0;
        let max_y = vertices.iter().map(|p| FloatOrd(p.y)).max()?.0;

        let extent = (max_x - min_x).max(max_y - min_y);
        if !(extent > 0.0) || !extent.is_finite() {
            return None;
        }

        let mid = Point2::new((min_x + max_x) * 0.5, (min_y + max_y) * 0.5);
        let reach = self.super_triangle_scale * extent;
        Some([
            Point2::new(mid.x - reach, mid.y - extent),
            Point2::new(mid.x + reach, mid.y - extent),
            Point2::new(mid.x, mid.y + reach),
        ])
    }

    /// Builds a counter-clockwise candidate triangle, unless it is degenerate.
    fn candidate(&self, vertices: &[Point2<f64>], corners: [usize; 3]) -> Option<Candidate> {
        let [a, b, c] = corners;
        let (pa, pb, pc) = (vertices[a], vertices[b], vertices[c]);
        let circle = CircumCircle::through(pa, pb, pc, self.degenerate_tolerance)?;
        let ab = pb - pa;
        let ac = pc - pa;
        let corners = if ab.x * ac.y - ab.y * ac.x > 0.0 {
            [a, b, c]
        } else {
            [a, c, b]
        };
        Some(Candidate { corners, circle })
    }
}

impl Default for DelaunayTriangulator {
    fn default() -> Self {
        Self {
            cocircular_tolerance: 1e-10,
            degenerate_tolerance: 1e-12,
            super_triangle_scale: 100.0,
        }
    }
}

/// A triangle of the working triangulation, by index into the vertex list.
struct Candidate {
    corners: [usize; 3],
    circle: CircumCircle,
}

fn undirected([a, b]: [usize; 2]) -> [usize; 2] {
    if a < b {
        [a, b]
    } else {
        [b, a]
    }
}
