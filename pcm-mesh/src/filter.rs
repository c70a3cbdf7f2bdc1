use crate::MeshGraph;
use log::*;
use pcm_core::{QuadKey, SceneQuery, Triangle};

/// The outcome of running a triangle through the [`TriangleFilter`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Accepted,
    /// A corner has no world position, so the triangle cannot be placed.
    Unplaced,
    /// The longest world-space edge exceeds the threshold.
    TooLarge,
    /// The triangle landed on the given quad, which was removed.
    Overlapping(QuadKey),
}

/// Rejects triangles that are unsuitable for the mesh.
///
/// A triangle is rejected if its longest edge in world space is longer than the threshold, which
/// keeps the mesh from bridging large empty gaps between sparse samples. It is also rejected if
/// its screen-space centroid lands on previously placed geometry; that geometry, along with the
/// skirts grown from it, is then removed from both the scene and the mesh.
///
/// The size rule runs first. An oversized triangle is rejected before the overlap test is made,
/// so it never removes the geometry under its centroid.
#[derive(Copy, Clone, Debug, PartialEq, PartialOrd)]
pub struct TriangleFilter {
    max_edge_length: f64,
}

impl TriangleFilter {
    /// Creates a `TriangleFilter` with default values.
    ///
    /// Same as calling [`Default::default`].
    pub fn new() -> Self {
        Default::default()
    }

    /// Set the longest world-space edge a triangle may have.
    ///
    /// Default is `0.1`.
    #[must_use]
    pub fn max_edge_length(self, max_edge_length: f64) -> Self {
        Self { max_edge_length }
    }

    pub fn accept<S>(&self, triangle: &Triangle, graph: &mut MeshGraph, scene: &mut S) -> bool
    where
        S: SceneQuery + ?Sized,
    {
        self.evaluate(triangle, graph, scene) == Verdict::Accepted
    }

    /// Runs the size rule and then the overlap rule.
    ///
    /// The overlap rule is only consulted for triangles that pass the size rule, so an oversized
    /// triangle never removes anything.
    pub fn evaluate<S>(&self, triangle: &Triangle, graph: &mut MeshGraph, scene: &mut S) -> Verdict
    where
        S: SceneQuery + ?Sized,
    {
        let longest = match triangle.longest_edge() {
            Some(longest) => longest,
            None => {
                trace!("triangle {:?} is not placed in the world", triangle.ids());
                return Verdict::Unplaced;
            }
        };
        if longest > self.max_edge_length {
            trace!(
                "triangle {:?} rejected, edge {} exceeds {}",
                triangle.ids(),
                longest,
                self.max_edge_length
            );
            return Verdict::TooLarge;
        }

        if let Some(key) = scene.remove_intersecting(triangle.centroid()) {
            graph.remove(key);
            trace!(
                "triangle {:?} landed on quad {:?}, which was removed",
                triangle.ids(),
                key
            );
            return Verdict::Overlapping(key);
        }

        Verdict::Accepted
    }
}

impl Default for TriangleFilter {
    fn default() -> Self {
        Self {
            max_edge_length: 0.1,
        }
    }
}
