//! # Point Cloud Meshing Core
//!
//! This library provides the common types shared by every crate of the point cloud meshing
//! pipeline. A live sensor feed produces a noisy, time-varying set of feature points. Each of those
//! points is seen at a location on the screen and, when the sensor could place it, at a location
//! in the world. The pipeline turns them into a renderable surface:
//!
//! ```text
//!   samples --> PointBuffer --> Delaunay --> TriangleFilter --> Quads --> Vertex/Index buffers
//!                                  |
//!                                  +--> debug overlay
//! ```
//!
//! The crate is deliberately small. It defines the data that flows between the stages
//! ([`SamplePoint`], [`Triangle`], [`CircumCircle`], [`QuadKey`]) and the traits describing the
//! collaborators that live outside the pipeline ([`SceneQuery`], [`DebugOverlay`], [`PointSource`]).
//! Anything that only one stage needs belongs in that stage's crate instead.
//!
//! ## Screen space and world space
//!
//! Triangulation happens in screen space, because that is where the sensor gives us a dense,
//! well-conditioned 2d layout of the features. Everything after triangulation happens in world
//! space, because that is where the mesh is placed. A [`SamplePoint`] carries both.
//!
//! ```text
//!    screen                         world
//!   +---------------+
//!   |    a          |                 A
//!   |   / \         |   unproject    / \
//!   |  b---c        |  ---------->  B---C
//!   +---------------+
//! ```

mod point;
mod scene;
mod triangle;

pub use nalgebra;
pub use point::*;
pub use scene::*;
pub use triangle::*;
