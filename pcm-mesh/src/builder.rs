use crate::{MeshGraph, Quad, Side};
use log::*;
use pcm_core::{nalgebra::Point3, QuadKey, Triangle};

/// Builds quads from triangles and grows skirts of quads around existing ones.
///
/// ```
/// use pcm_core::nalgebra::{Point2, Point3};
/// use pcm_core::{SamplePoint, Triangle};
/// use pcm_mesh::{MeshGraph, QuadMeshBuilder};
///
/// let triangle = Triangle::new(
///     SamplePoint::new(0, Point2::new(10.0, 0.0), Point3::new(0.01, 0.0, 0.0)),
///     SamplePoint::new(1, Point2::new(0.0, 0.0), Point3::new(0.0, 0.0, 0.0)),
///     SamplePoint::new(2, Point2::new(0.0, 10.0), Point3::new(0.0, 0.01, 0.0)),
///     1e-12,
/// )
/// .unwrap();
///
/// let builder = QuadMeshBuilder::new();
/// let mut graph = MeshGraph::new();
/// let key = graph.insert(builder.quad_from_triangle(&triangle).unwrap());
/// assert_eq!(builder.grow(&mut graph, key).len(), 4);
/// assert!(builder.grow(&mut graph, key).is_empty());
/// ```
#[derive(Copy, Clone, Debug, PartialEq, PartialOrd)]
pub struct QuadMeshBuilder {
    skirt_offset: f64,
}

impl QuadMeshBuilder {
    /// Creates a `QuadMeshBuilder` with default values.
    ///
    /// Same as calling [`Default::default`].
    pub fn new() -> Self {
        Default::default()
    }

    /// Set the distance, in world units, that a synthesized skirt vertex is pushed out from the
    /// edge it extends.
    ///
    /// Default is `0.001`.
    #[must_use]
    pub fn skirt_offset(self, skirt_offset: f64) -> Self {
        Self { skirt_offset }
    }

    /// Builds the quad covering a triangle by repeating its second corner as `v3`.
    ///
    /// The two halves of the quad are the triangle itself and the same triangle facing the other
    /// way, so the patch shows from both sides. Returns `None` if a corner has no world position.
    pub fn quad_from_triangle(&self, triangle: &Triangle) -> Option<Quad> {
        let [a, b, c] = triangle.world_positions()?;
        Some(Quad::new(a, b, c, b))
    }

    /// Fills every empty neighbour slot of the quad `key`.
    ///
    /// Corners that a missing neighbour shares with quads that already exist diagonally are
    /// reused verbatim, and the new neighbour is linked to those quads. Other corners are
    /// extrapolated outwards by the skirt offset. The created quads are owned by `key` and leave
    /// the graph when it is removed. Returns their keys, which is empty if all four slots were
    /// already filled or `key` is not in the graph.
    pub fn grow(&self, graph: &mut MeshGraph, key: QuadKey) -> Vec<QuadKey> {
        let mut created = Vec::new();
        for side in Side::GROWTH_ORDER {
            let quad = match graph.get(key) {
                Some(quad) => quad,
                None => break,
            };
            if quad.neighbor(side).is_some() {
                continue;
            }

            let (grown, lateral) = self.neighbor_across(graph, quad, key, side);
            let grown_key = graph.insert_skirt(key, grown);
            let linked = graph.link(key, side, grown_key);
            debug_assert!(linked, "a fresh quad must link into an empty slot");
            for (lateral_side, lateral_key) in lateral.into_iter().flatten() {
                graph.link(grown_key, lateral_side, lateral_key);
            }
            trace!("grew {:?} neighbour {:?} of {:?}", side, grown_key, key);
            created.push(grown_key);
        }
        created
    }

    /// Computes the quad across `side` and the diagonal quads it should be linked to.
    fn neighbor_across(
        &self,
        graph: &MeshGraph,
        quad: &Quad,
        key: QuadKey,
        side: Side,
    ) -> (Quad, [Option<(Side, QuadKey)>; 2]) {
        let [v0, v1, v2, v3] = *quad.vertices();
        // For each new corner: the diagonal quad through which it may already exist, the corner
        // of that quad to reuse, and the near/far pair to extrapolate from otherwise.
        let corner = |first: Side, second: Side, index: usize, near: Point3<f64>, far| {
            match graph.diagonal(key, first, second) {
                Some(diagonal) => {
                    let reused = graph.get(diagonal).map(|q| q.vertices()[index]);
                    (reused.unwrap_or_else(|| self.skirt_vertex(near, far)), Some((first, diagonal)))
                }
                None => (self.skirt_vertex(near, far), None),
            }
        };

        match side {
            Side::Up => {
                let (top_right, right) = corner(Side::Right, Side::Up, 1, v0, v3);
                let (top_left, left) = corner(Side::Left, Side::Up, 0, v1, v2);
                (Quad::new(top_right, top_left, v1, v0), [right, left])
            }
            Side::Down => {
                let (bottom_left, left) = corner(Side::Left, Side::Down, 3, v2, v1);
                let (bottom_right, right) = corner(Side::Right, Side::Down, 2, v3, v0);
                (Quad::new(v3, v2, bottom_left, bottom_right), [left, right])
            }
            Side::Left => {
                let (top_left, up) = corner(Side::Up, Side::Left, 2, v1, v0);
                let (bottom_left, down) = corner(Side::Down, Side::Left, 1, v2, v3);
                (Quad::new(v1, top_left, bottom_left, v2), [up, down])
            }
            Side::Right => {
                let (top_right, up) = corner(Side::Up, Side::Right, 3, v0, v1);
                let (bottom_right, down) = corner(Side::Down, Side::Right, 0, v3, v2);
                (Quad::new(top_right, v0, v3, bottom_right), [up, down])
            }
        }
    }

    /// Pushes `near` away from `far`, along the edge that joins them, by the skirt offset.
    ///
    /// This is the direction of the reflection `2 * near - far` as seen from `near`.
    pub fn skirt_vertex(&self, near: Point3<f64>, far: Point3<f64>) -> Point3<f64> {
        match (near - far).try_normalize(0.0) {
            Some(direction) => near + direction * self.skirt_offset,
            None => near,
        }
    }
}

impl Default for QuadMeshBuilder {
    fn default() -> Self {
        Self {
            skirt_offset: 0.001,
        }
    }
}
