use crate::{ParseUvModeError, Quad};
use bytemuck::{Pod, Zeroable};
use core::fmt;
use core::str::FromStr;
use log::*;
use pcm_core::nalgebra::{Point3, Vector3};

#[cfg(feature = "serde-serialize")]
use serde::{Deserialize, Serialize};

/// How texture coordinates are laid out over each quad.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub enum UvMode {
    /// One full texture per quad, whatever its shape.
    StretchToFitXY,
    /// Accepted, but laid out with [`UNKNOWN_MODE_FALLBACK`].
    StretchToFitX,
    /// Accepted, but laid out with [`UNKNOWN_MODE_FALLBACK`].
    StretchToFitY,
    /// Texture anchored at `v2`, tiled by true world-space distance along both axes.
    SizeToWorldUnitsXY,
    /// Texture tiled by the longer of each pair of opposite edges.
    SizeToWorldUnitsX,
}

/// The layout used for any mode that has no layout of its own.
pub const UNKNOWN_MODE_FALLBACK: UvMode = UvMode::StretchToFitXY;

impl UvMode {
    pub const ALL: [UvMode; 5] = [
        UvMode::StretchToFitXY,
        UvMode::StretchToFitX,
        UvMode::StretchToFitY,
        UvMode::SizeToWorldUnitsXY,
        UvMode::SizeToWorldUnitsX,
    ];

    pub fn name(self) -> &'static str {
        match self {
            UvMode::StretchToFitXY => "StretchToFitXY",
            UvMode::StretchToFitX => "StretchToFitX",
            UvMode::StretchToFitY => "StretchToFitY",
            UvMode::SizeToWorldUnitsXY => "SizeToWorldUnitsXY",
            UvMode::SizeToWorldUnitsX => "SizeToWorldUnitsX",
        }
    }

    /// Parses a mode, using [`UNKNOWN_MODE_FALLBACK`] for anything unrecognized.
    pub fn parse_or_fallback(s: &str) -> Self {
        s.parse().unwrap_or_else(|e: ParseUvModeError| {
            warn!("{}, using {}", e, UNKNOWN_MODE_FALLBACK);
            UNKNOWN_MODE_FALLBACK
        })
    }
}

impl Default for UvMode {
    fn default() -> Self {
        UvMode::StretchToFitXY
    }
}

impl fmt::Display for UvMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Names are matched ignoring case, `_` and `-`, so `size-to-world-units-xy` works too.
impl FromStr for UvMode {
    type Err = ParseUvModeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted: String = s
            .chars()
            .filter(|c| !matches!(c, '_' | '-'))
            .collect();
        UvMode::ALL
            .iter()
            .copied()
            .find(|mode| mode.name().eq_ignore_ascii_case(wanted.trim()))
            .ok_or_else(|| ParseUvModeError::Unknown(s.to_string()))
    }
}

/// One interleaved render vertex: position, normal and texture coordinate.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
    pub uv: [f32; 2],
}

/// The vertex and index buffers handed to the renderer.
///
/// Every quad contributes four vertices of its own and two triangles, `(v0, v1, v2)` and
/// `(v0, v2, v3)`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MeshBuffers {
    pub vertices: Vec<Vertex>,
    pub indices: Vec<u32>,
}

impl MeshBuffers {
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// The vertex buffer as raw bytes, ready for upload.
    pub fn vertex_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.vertices)
    }

    /// The index buffer as raw bytes, ready for upload.
    pub fn index_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.indices)
    }
}

/// Accepts finished geometry for display.
///
/// Implementations must not block: the caller is still inside the mesh critical section.
pub trait Renderer {
    fn submit(&mut self, buffers: MeshBuffers, uv_mode: UvMode);
}

/// Computes normals and texture coordinates for quads and packs them into render buffers.
///
/// ```
/// use pcm_core::nalgebra::Point3;
/// use pcm_mesh::{GeometryAssembler, Quad, UvMode};
///
/// let quad = Quad::new(
///     Point3::new(1.0, 1.0, 0.0),
///     Point3::new(0.0, 1.0, 0.0),
///     Point3::new(0.0, 0.0, 0.0),
///     Point3::new(1.0, 0.0, 0.0),
/// );
/// let buffers = GeometryAssembler::new().assemble([&quad]);
/// assert_eq!(buffers.vertices.len(), 4);
/// assert_eq!(buffers.indices, vec![0, 1, 2, 0, 2, 3]);
/// assert_eq!(buffers.vertices[0].normal, [0.0, 0.0, 1.0]);
/// ```
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct GeometryAssembler {
    uv_mode: UvMode,
    texture_size: f64,
}

impl GeometryAssembler {
    /// Creates a `GeometryAssembler` with default values.
    ///
    /// Same as calling [`Default::default`].
    pub fn new() -> Self {
        Default::default()
    }

    /// Set the texture coordinate layout.
    ///
    /// Default is [`UvMode::StretchToFitXY`].
    #[must_use]
    pub fn uv_mode(self, uv_mode: UvMode) -> Self {
        Self { uv_mode, ..self }
    }

    /// Set how many world units one repeat of the texture covers in the world-unit modes.
    ///
    /// Default is `1.0`.
    #[must_use]
    pub fn texture_size(self, texture_size: f64) -> Self {
        Self {
            texture_size,
            ..self
        }
    }

    /// Builds the buffers for `quads`, rebuilding everything from scratch.
    pub fn assemble<'a>(&self, quads: impl IntoIterator<Item = &'a Quad>) -> MeshBuffers {
        let mode = self.effective_mode();
        let mut buffers = MeshBuffers::default();
        for quad in quads {
            let base = buffers.vertices.len() as u32;
            let normals = vertex_normals(quad);
            let uvs = self.uvs(mode, quad);
            buffers.vertices.extend(
                quad.vertices()
                    .iter()
                    .zip(normals)
                    .zip(uvs)
                    .map(|((position, normal), uv)| Vertex {
                        position: [position.x as f32, position.y as f32, position.z as f32],
                        normal: [normal.x as f32, normal.y as f32, normal.z as f32],
                        uv: [uv[0] as f32, uv[1] as f32],
                    }),
            );
            buffers
                .indices
                .extend([base, base + 1, base + 2, base, base + 2, base + 3]);
        }
        debug!(
            "assembled {} vertices and {} triangles",
            buffers.vertices.len(),
            buffers.triangle_count()
        );
        buffers
    }

    /// Applies the fallback policy to modes without a layout of their own.
    fn effective_mode(&self) -> UvMode {
        match self.uv_mode {
            UvMode::StretchToFitXY | UvMode::SizeToWorldUnitsXY | UvMode::SizeToWorldUnitsX => {
                self.uv_mode
            }
            UvMode::StretchToFitX | UvMode::StretchToFitY => {
                warn!(
                    "uv mode {} has no layout, using {}",
                    self.uv_mode, UNKNOWN_MODE_FALLBACK
                );
                UNKNOWN_MODE_FALLBACK
            }
        }
    }

    fn uvs(&self, mode: UvMode, quad: &Quad) -> [[f64; 2]; 4] {
        let [v0, v1, v2, v3] = *quad.vertices();
        let scale = 1.0 / self.texture_size;
        match mode {
            UvMode::SizeToWorldUnitsX => {
                let u = distance(v1, v0).max(distance(v2, v3)) * scale;
                let v = distance(v1, v2).max(distance(v0, v3)) * scale;
                [[u, v], [0.0, v], [0.0, 0.0], [u, 0.0]]
            }
            UvMode::SizeToWorldUnitsXY => {
                // A 2d frame at v2 whose U axis runs along v2 -> v3.
                let u_axis = v3 - v2;
                let project = |corner: Point3<f64>| {
                    let edge = corner - v2;
                    let angle = u_axis.angle(&edge);
                    let length = edge.norm() * scale;
                    [angle.cos() * length, angle.sin() * length]
                };
                [project(v0), project(v1), [0.0, 0.0], [u_axis.norm() * scale, 0.0]]
            }
            UvMode::StretchToFitXY | UvMode::StretchToFitX | UvMode::StretchToFitY => {
                [[1.0, 1.0], [0.0, 1.0], [0.0, 0.0], [1.0, 0.0]]
            }
        }
    }
}

impl Default for GeometryAssembler {
    fn default() -> Self {
        Self {
            uv_mode: UvMode::default(),
            texture_size: 1.0,
        }
    }
}

/// Builds render buffers for `quads` with default settings and the given layout.
pub fn assemble<'a>(quads: impl IntoIterator<Item = &'a Quad>, uv_mode: UvMode) -> MeshBuffers {
    GeometryAssembler::new().uv_mode(uv_mode).assemble(quads)
}

/// Normals for `v0..v3`.
///
/// The seam corners `v0` and `v2` belong to both halves and get the normalized sum of both face
/// normals; `v1` and `v3` get the normal of their own half. A degenerate half has no normal and
/// defers to the other one. When the two halves face opposite ways the seam takes the first.
fn vertex_normals(quad: &Quad) -> [Vector3<f64>; 4] {
    let [v0, v1, v2, v3] = *quad.vertices();
    let first = face_normal(v0, v1, v2);
    let second = face_normal(v0, v2, v3);

    let seam = match (first, second) {
        (Some(a), Some(b)) => (a + b).try_normalize(1e-12).unwrap_or(a),
        (Some(n), None) | (None, Some(n)) => n,
        (None, None) => Vector3::zeros(),
    };
    let own_first = first.or(second).unwrap_or_else(Vector3::zeros);
    let own_second = second.or(first).unwrap_or_else(Vector3::zeros);
    [seam, own_first, seam, own_second]
}

fn face_normal(a: Point3<f64>, b: Point3<f64>, c: Point3<f64>) -> Option<Vector3<f64>> {
    (b - a).cross(&(c - a)).try_normalize(0.0)
}

fn distance(a: Point3<f64>, b: Point3<f64>) -> f64 {
    (b - a).norm()
}
