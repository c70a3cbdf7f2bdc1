use crate::{SamplingRegion, DEFAULT_POINT_CAPACITY};
use pcm_geom::DelaunayTriangulator;
use pcm_mesh::{GeometryAssembler, QuadMeshBuilder, TriangleFilter, UvMode};

#[cfg(feature = "serde-serialize")]
use serde::{Deserialize, Deserializer, Serialize};

/// The settings for a meshing session.
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct MeshSettings {
    /// The number of most recent samples that are triangulated each pass
    #[cfg_attr(
        feature = "serde-serialize",
        serde(default = "default_point_capacity")
    )]
    pub point_capacity: usize,
    /// The longest world-space edge an accepted triangle may have
    #[cfg_attr(
        feature = "serde-serialize",
        serde(default = "default_max_edge_length")
    )]
    pub max_edge_length: f64,
    /// The distance a grown boundary vertex is pushed past the edge it extends
    #[cfg_attr(feature = "serde-serialize", serde(default = "default_skirt_offset"))]
    pub skirt_offset: f64,
    /// The central fraction of the viewport that samples are taken from
    #[cfg_attr(feature = "serde-serialize", serde(default = "default_screen_part"))]
    pub screen_part: f64,
    /// The texture coordinate layout; unknown names fall back to stretching
    #[cfg_attr(
        feature = "serde-serialize",
        serde(default = "default_uv_mode", deserialize_with = "deserialize_uv_mode")
    )]
    pub uv_mode: UvMode,
    /// The world-space size of one texture repeat
    #[cfg_attr(feature = "serde-serialize", serde(default = "default_texture_size"))]
    pub texture_size: f64,
    /// The relative tolerance below which a point counts as on a circumcircle
    #[cfg_attr(
        feature = "serde-serialize",
        serde(default = "default_cocircular_tolerance")
    )]
    pub cocircular_tolerance: f64,
    /// The relative area below which a candidate triangle is skipped
    #[cfg_attr(
        feature = "serde-serialize",
        serde(default = "default_degenerate_tolerance")
    )]
    pub degenerate_tolerance: f64,
    /// Whether every accepted quad immediately grows a skirt of neighbours
    #[cfg_attr(feature = "serde-serialize", serde(default = "default_grow_accepted"))]
    pub grow_accepted: bool,
}

impl MeshSettings {
    /// The part of a `width` by `height` viewport that samples are taken from.
    pub fn region(&self, width: f64, height: f64) -> SamplingRegion {
        SamplingRegion::new(width, height, self.screen_part)
    }

    pub fn triangulator(&self) -> DelaunayTriangulator {
        DelaunayTriangulator::new()
            .cocircular_tolerance(self.cocircular_tolerance)
            .degenerate_tolerance(self.degenerate_tolerance)
    }

    pub fn filter(&self) -> TriangleFilter {
        TriangleFilter::new().max_edge_length(self.max_edge_length)
    }

    pub fn builder(&self) -> QuadMeshBuilder {
        QuadMeshBuilder::new().skirt_offset(self.skirt_offset)
    }

    pub fn assembler(&self) -> GeometryAssembler {
        GeometryAssembler::new()
            .uv_mode(self.uv_mode)
            .texture_size(self.texture_size)
    }
}

impl Default for MeshSettings {
    fn default() -> Self {
        Self {
            point_capacity: default_point_capacity(),
            max_edge_length: default_max_edge_length(),
            skirt_offset: default_skirt_offset(),
            screen_part: default_screen_part(),
            uv_mode: default_uv_mode(),
            texture_size: default_texture_size(),
            cocircular_tolerance: default_cocircular_tolerance(),
            degenerate_tolerance: default_degenerate_tolerance(),
            grow_accepted: default_grow_accepted(),
        }
    }
}

fn default_point_capacity() -> usize {
    DEFAULT_POINT_CAPACITY
}

fn default_max_edge_length() -> f64 {
    0.1
}

fn default_skirt_offset() -> f64 {
    0.001
}

fn default_screen_part() -> f64 {
    1.0
}

fn default_uv_mode() -> UvMode {
    UvMode::StretchToFitXY
}

fn default_texture_size() -> f64 {
    1.0
}

fn default_cocircular_tolerance() -> f64 {
    1e-10
}

fn default_degenerate_tolerance() -> f64 {
    1e-12
}

fn default_grow_accepted() -> bool {
    false
}

#[cfg(feature = "serde-serialize")]
fn deserialize_uv_mode<'de, D>(deserializer: D) -> Result<UvMode, D::Error>
where
    D: Deserializer<'de>,
{
    let name = String::deserialize(deserializer)?;
    Ok(UvMode::parse_or_fallback(&name))
}

#[cfg(all(test, feature = "serde-serialize"))]
mod tests {
    use super::*;

    #[test]
    fn partial_settings_fill_in_defaults() {
        let settings: MeshSettings =
            serde_json::from_str(r#"{ "max_edge_length": 0.25, "grow_accepted": true }"#).unwrap();
        assert_eq!(
            settings,
            MeshSettings {
                max_edge_length: 0.25,
                grow_accepted: true,
                ..MeshSettings::default()
            }
        );
    }

    #[test]
    fn uv_modes_are_read_leniently() {
        let settings: MeshSettings =
            serde_json::from_str(r#"{ "uv_mode": "size-to-world-units-x" }"#).unwrap();
        assert_eq!(settings.uv_mode, UvMode::SizeToWorldUnitsX);
        let settings: MeshSettings = serde_json::from_str(r#"{ "uv_mode": "tiled" }"#).unwrap();
        assert_eq!(settings.uv_mode, UvMode::StretchToFitXY);
    }

    #[test]
    fn region_uses_the_screen_part() {
        let settings: MeshSettings = serde_json::from_str(r#"{ "screen_part": 0.5 }"#).unwrap();
        assert_eq!(
            settings.region(100.0, 200.0),
            SamplingRegion::new(100.0, 200.0, 0.5)
        );
    }

    #[test]
    fn settings_survive_serialization() {
        let settings = MeshSettings {
            uv_mode: UvMode::SizeToWorldUnitsXY,
            point_capacity: 12,
            ..MeshSettings::default()
        };
        let json = serde_json::to_string(&settings).unwrap();
        assert_eq!(serde_json::from_str::<MeshSettings>(&json).unwrap(), settings);
    }
}
