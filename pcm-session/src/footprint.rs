use pcm_core::nalgebra::Point2;
use pcm_core::{point_in_triangle, QuadKey, SceneQuery};
use slotmap::SecondaryMap;

/// The screen-space footprints of placed quads.
///
/// Each accepted quad is remembered by the screen triangle it was built from. When footprints
/// overlap, the most recently placed one is hit first, as it would be drawn on top.
#[derive(Debug, Clone, Default)]
pub struct FootprintIndex {
    footprints: SecondaryMap<QuadKey, [Point2<f64>; 3]>,
    /// Keys in placement order.
    order: Vec<QuadKey>,
}

impl FootprintIndex {
    pub fn new() -> Self {
        Default::default()
    }

    pub fn footprint(&self, key: QuadKey) -> Option<&[Point2<f64>; 3]> {
        self.footprints.get(key)
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn clear(&mut self) {
        self.footprints.clear();
        self.order.clear();
    }
}

impl SceneQuery for FootprintIndex {
    fn hit_test(&self, screen_point: Point2<f64>) -> Option<QuadKey> {
        self.order.iter().rev().copied().find(|&key| {
            self.footprints
                .get(key)
                .map_or(false, |&footprint| point_in_triangle(screen_point, footprint))
        })
    }

    fn place(&mut self, key: QuadKey, footprint: [Point2<f64>; 3]) {
        if self.footprints.insert(key, footprint).is_none() {
            self.order.push(key);
        }
    }

    fn remove(&mut self, key: QuadKey) {
        if self.footprints.remove(key).is_some() {
            self.order.retain(|&k| k != key);
        }
    }
}
