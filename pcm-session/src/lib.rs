//! Runs the meshing pipeline once per frame trigger against a live point feed.
//!
//! A [`MeshSession`] owns everything that persists between frames: the sliding window of samples,
//! the quad graph, and the scene that remembers where quads were placed on screen. Each call to
//! [`MeshSession::trigger`] adds the newest samples, triangulates the whole window from scratch,
//! filters the triangles, turns the survivors into quads and hands freshly assembled buffers to a
//! [`Renderer`](pcm_mesh::Renderer).
//!
//! Only one pass mutates the session at a time. A trigger that arrives while another pass is
//! running is dropped rather than queued, since the next frame will carry newer samples anyway.

mod footprint;
mod point_buffer;
mod region;
mod session;
mod settings;

pub use footprint::*;
pub use point_buffer::*;
pub use region::*;
pub use session::*;
pub use settings::*;
