//! Turns accepted triangles into a navigable quad mesh and the quad mesh into render buffers.
//!
//! ## Quads
//!
//! A [`Quad`] is a four vertex patch wound counter-clockwise when seen from the outside. It is
//! drawn as two triangles that share the `v0`-`v2` diagonal:
//!
//! ```text
//!        up
//!   v1 --------v0
//!   |        _/ |
//!   |      _/   |
//! l |    _/     | r
//!   |  _/       |
//!   | /         |
//!   v2 ------- v3
//!       down
//! ```
//!
//! Quads live in a [`MeshGraph`] and refer to their four neighbours through [`QuadKey`] handles
//! rather than references, so the graph can be cyclic without any reference cycles.
//!
//! ## Pipeline stages
//!
//! - [`TriangleFilter`] decides whether a triangle may become part of the mesh.
//! - [`QuadMeshBuilder`] converts triangles to quads and grows skirts around them.
//! - [`GeometryAssembler`] emits interleaved vertices and triangle indices for a [`Renderer`].
//!
//! [`QuadKey`]: pcm_core::QuadKey

mod assemble;
mod builder;
mod error;
mod filter;
mod graph;
mod quad;

pub use assemble::*;
pub use builder::*;
pub use error::*;
pub use filter::*;
pub use graph::*;
pub use quad::*;
