//! This crate contains the computational geometry algorithms of the point cloud meshing pipeline.
//!
//! ## Delaunay triangulation
//!
//! Every tick, the sampled feature points are connected into triangles in screen space. Of all
//! the ways to connect a point set, the Delaunay triangulation is the one that avoids long sliver
//! triangles: no point of the set lies inside the circumcircle of any triangle.
//!
//! - `p` the point being inserted
//! - `x` triangles whose circumcircle contains `p`, which together form the cavity
//!
//! ```text
//!   a---------b           a---------b
//!   | x     / |           | \     / |
//!   |     /   |           |   \ /   |
//!   |   /  p  |   ==>     |    p    |
//!   | /     x |           |   / \   |
//!   c---------d           | /     \ |
//!                         c---------d
//! ```
//!
//! The cavity is emptied and `p` is connected to each edge on its boundary.

pub mod delaunay;

pub use delaunay::DelaunayTriangulator;
