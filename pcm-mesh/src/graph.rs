use crate::{Quad, Side};
use log::*;
use pcm_core::QuadKey;
use slotmap::{SecondaryMap, SlotMap};

/// Every quad placed during a session, linked into a four-neighbour graph.
///
/// Quads are only ever added, except when overlap resolution removes one explicitly. Neighbour
/// links are symmetric: if `a` has `b` on its right then `b` has `a` on its left. A filled slot
/// is never overwritten.
///
/// Skirt quads grown from a quad belong to it and are removed along with it.
#[derive(Debug, Clone, Default)]
pub struct MeshGraph {
    quads: SlotMap<QuadKey, Quad>,
    skirts: SecondaryMap<QuadKey, Vec<QuadKey>>,
}

impl MeshGraph {
    pub fn new() -> Self {
        Default::default()
    }

    /// Adds a quad to the graph.
    ///
    /// The quad enters the graph unlinked; use [`MeshGraph::link`] to connect it.
    pub fn insert(&mut self, mut quad: Quad) -> QuadKey {
        quad.neighbors = Default::default();
        self.quads.insert(quad)
    }

    /// Adds a quad grown from `parent`, so that removing `parent` removes it too.
    ///
    /// The quad is still inserted, without an owner, if `parent` is not in the graph.
    pub fn insert_skirt(&mut self, parent: QuadKey, quad: Quad) -> QuadKey {
        let key = self.insert(quad);
        if self.quads.contains_key(parent) {
            match self.skirts.get_mut(parent) {
                Some(skirts) => skirts.push(key),
                None => {
                    self.skirts.insert(parent, vec![key]);
                }
            }
        }
        key
    }

    /// The skirt quads grown from `key` that are still in the graph.
    pub fn skirts(&self, key: QuadKey) -> impl Iterator<Item = QuadKey> + '_ {
        self.skirts
            .get(key)
            .into_iter()
            .flatten()
            .copied()
            .filter(move |&skirt| self.quads.contains_key(skirt))
    }

    pub fn get(&self, key: QuadKey) -> Option<&Quad> {
        self.quads.get(key)
    }

    pub fn contains(&self, key: QuadKey) -> bool {
        self.quads.contains_key(key)
    }

    /// The neighbour of `key` across `side`, if both exist.
    pub fn neighbor(&self, key: QuadKey, side: Side) -> Option<QuadKey> {
        self.quads.get(key)?.neighbor(side)
    }

    /// Follows `first` and then `second` from `key`.
    pub fn diagonal(&self, key: QuadKey, first: Side, second: Side) -> Option<QuadKey> {
        self.neighbor(self.neighbor(key, first)?, second)
    }

    /// Links `b` to `a` across `side` of `a`, and `a` to `b` across the opposite side of `b`.
    ///
    /// Returns `false` without changing anything if either quad is missing, if `a` and `b` are
    /// the same quad, or if either of the two slots is already filled.
    pub fn link(&mut self, a: QuadKey, side: Side, b: QuadKey) -> bool {
        if a == b {
            return false;
        }
        match self.quads.get_disjoint_mut([a, b]) {
            Some([qa, qb]) => {
                if qa.neighbors.get(side).is_some() || qb.neighbors.get(side.opposite()).is_some()
                {
                    return false;
                }
                *qa.neighbors.slot_mut(side) = Some(b);
                *qb.neighbors.slot_mut(side.opposite()) = Some(a);
                true
            }
            None => false,
        }
    }

    /// Removes a quad together with the skirts grown from it, and clears every link pointing at
    /// any of them.
    ///
    /// Returns the quad stored under `key`.
    pub fn remove(&mut self, key: QuadKey) -> Option<Quad> {
        let quad = self.detach(key)?;
        let mut pending = self.skirts.remove(key).unwrap_or_default();
        let mut cascaded = 0;
        while let Some(skirt) = pending.pop() {
            if self.detach(skirt).is_some() {
                cascaded += 1;
                pending.extend(self.skirts.remove(skirt).unwrap_or_default());
            }
        }
        trace!("removed quad {:?} and {} skirt quads", key, cascaded);
        Some(quad)
    }

    fn detach(&mut self, key: QuadKey) -> Option<Quad> {
        let quad = self.quads.remove(key)?;
        for (side, neighbor) in quad.neighbors.iter() {
            if let Some(neighbor) = self.quads.get_mut(neighbor) {
                let slot = neighbor.neighbors.slot_mut(side.opposite());
                if *slot == Some(key) {
                    *slot = None;
                }
            }
        }
        Some(quad)
    }

    pub fn len(&self) -> usize {
        self.quads.len()
    }

    pub fn is_empty(&self) -> bool {
        self.quads.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (QuadKey, &Quad)> + '_ {
        self.quads.iter()
    }

    pub fn keys(&self) -> impl Iterator<Item = QuadKey> + '_ {
        self.quads.keys()
    }

    pub fn quads(&self) -> impl Iterator<Item = &Quad> + '_ {
        self.quads.values()
    }

    pub fn clear(&mut self) {
        self.quads.clear();
        self.skirts.clear();
    }
}
