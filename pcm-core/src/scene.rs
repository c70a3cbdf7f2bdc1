use crate::{SamplePoint, Triangle};
use nalgebra::Point2;
use slotmap::new_key_type;

new_key_type! {
    /// A stable handle to a quad placed in the mesh.
    pub struct QuadKey;
}

/// Answers questions about geometry that has already been placed in the scene.
///
/// The pipeline asks the scene whether a candidate triangle lands on top of previously placed
/// geometry, and if so, tells the scene to take that geometry away. Every call happens inside the
/// same critical section as the mesh mutation it belongs to.
pub trait SceneQuery {
    /// Finds the placed quad whose footprint covers `screen_point`.
    fn hit_test(&self, screen_point: Point2<f64>) -> Option<QuadKey>;

    /// Records the screen footprint of a freshly placed quad.
    fn place(&mut self, key: QuadKey, footprint: [Point2<f64>; 3]);

    /// Takes the quad out of the scene.
    fn remove(&mut self, key: QuadKey);

    /// Checks whether any placed geometry covers `screen_point`.
    fn intersects(&self, screen_point: Point2<f64>) -> bool {
        self.hit_test(screen_point).is_some()
    }

    /// Removes the placed quad under `screen_point` and returns it, if there is one.
    fn remove_intersecting(&mut self, screen_point: Point2<f64>) -> Option<QuadKey> {
        let key = self.hit_test(screen_point)?;
        self.remove(key);
        Some(key)
    }
}

/// Receives the raw triangulation of every pass, before any filtering.
///
/// This is used for outline-only visualization and has no influence on the mesh.
pub trait DebugOverlay {
    fn draw_outlines(&mut self, triangles: &[Triangle]);
}

/// Produces the samples of one sensor tick at a time.
pub trait PointSource {
    /// Retrieves the next tick of samples, or `None` when the feed has ended.
    fn next_samples(&mut self) -> Option<Vec<SamplePoint>>;
}

impl<I> PointSource for I
where
    I: Iterator<Item = Vec<SamplePoint>>,
{
    fn next_samples(&mut self) -> Option<Vec<SamplePoint>> {
        self.next()
    }
}
