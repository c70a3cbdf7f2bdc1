use pcm_core::{nalgebra::Point3, QuadKey};

#[cfg(feature = "serde-serialize")]
use serde::{Deserialize, Serialize};

/// One of the four edges of a quad.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub enum Side {
    /// The `v1`-`v0` edge.
    Up,
    /// The `v2`-`v3` edge.
    Down,
    /// The `v1`-`v2` edge.
    Left,
    /// The `v0`-`v3` edge.
    Right,
}

impl Side {
    /// The order in which growth fills missing neighbours.
    pub const GROWTH_ORDER: [Side; 4] = [Side::Up, Side::Left, Side::Down, Side::Right];

    pub fn opposite(self) -> Self {
        match self {
            Side::Up => Side::Down,
            Side::Down => Side::Up,
            Side::Left => Side::Right,
            Side::Right => Side::Left,
        }
    }
}

/// The neighbour handles of a quad, one optional slot per side.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub struct Neighbors {
    pub up: Option<QuadKey>,
    pub down: Option<QuadKey>,
    pub left: Option<QuadKey>,
    pub right: Option<QuadKey>,
}

impl Neighbors {
    pub fn get(&self, side: Side) -> Option<QuadKey> {
        match side {
            Side::Up => self.up,
            Side::Down => self.down,
            Side::Left => self.left,
            Side::Right => self.right,
        }
    }

    pub(crate) fn slot_mut(&mut self, side: Side) -> &mut Option<QuadKey> {
        match side {
            Side::Up => &mut self.up,
            Side::Down => &mut self.down,
            Side::Left => &mut self.left,
            Side::Right => &mut self.right,
        }
    }

    /// Checks whether all four slots are filled.
    pub fn is_complete(&self) -> bool {
        Side::GROWTH_ORDER.iter().all(|&side| self.get(side).is_some())
    }

    /// Iterates over the filled slots.
    pub fn iter(&self) -> impl Iterator<Item = (Side, QuadKey)> + '_ {
        Side::GROWTH_ORDER
            .iter()
            .filter_map(move |&side| self.get(side).map(|key| (side, key)))
    }
}

/// A four vertex patch of the mesh in world space.
///
/// The vertices are immutable once the quad is built. The neighbour slots are owned by the
/// [`MeshGraph`](crate::MeshGraph) the quad is inserted into.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub struct Quad {
    vertices: [Point3<f64>; 4],
    pub(crate) neighbors: Neighbors,
}

impl Quad {
    pub fn new(v0: Point3<f64>, v1: Point3<f64>, v2: Point3<f64>, v3: Point3<f64>) -> Self {
        Self {
            vertices: [v0, v1, v2, v3],
            neighbors: Neighbors::default(),
        }
    }

    pub fn vertices(&self) -> &[Point3<f64>; 4] {
        &self.vertices
    }

    pub fn v0(&self) -> Point3<f64> {
        self.vertices[0]
    }

    pub fn v1(&self) -> Point3<f64> {
        self.vertices[1]
    }

    pub fn v2(&self) -> Point3<f64> {
        self.vertices[2]
    }

    pub fn v3(&self) -> Point3<f64> {
        self.vertices[3]
    }

    pub fn neighbors(&self) -> &Neighbors {
        &self.neighbors
    }

    pub fn neighbor(&self, side: Side) -> Option<QuadKey> {
        self.neighbors.get(side)
    }
}
