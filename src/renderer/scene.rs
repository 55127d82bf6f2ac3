//! Scene graph nodes for building meshes

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::city::building::BuildingType;
use crate::city::upgrade::Level;
use crate::renderer::color::Color;
use crate::renderer::geometry::Geometry;
use crate::spatial::hex::HexCoord;

/// PBR material parameters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StandardMaterial {
    pub color: Color,
    pub roughness: f32,
    pub metalness: f32,
    pub flat_shading: bool,
    /// Blend with what is behind; opacity is ignored when false
    pub transparent: bool,
    pub opacity: f32,
}

impl Default for StandardMaterial {
    fn default() -> Self {
        Self {
            color: Color::new(1.0, 1.0, 1.0, 1.0),
            roughness: 1.0,
            metalness: 0.0,
            flat_shading: false,
            transparent: false,
            opacity: 1.0,
        }
    }
}

/// Metadata linking a node back to the building it shows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildingTag {
    pub building_type: BuildingType,
    pub coord: HexCoord,
    pub level: Level,
}

/// One drawable mesh in the scene
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneNode {
    pub geometry: Geometry,
    pub material: StandardMaterial,
    /// World position of the geometry's center
    pub position: Vec3,
    pub scale: Vec3,
    pub tag: Option<BuildingTag>,
}

impl SceneNode {
    pub fn new(geometry: Geometry, material: StandardMaterial) -> Self {
        Self {
            geometry,
            material,
            position: Vec3::ZERO,
            scale: Vec3::ONE,
            tag: None,
        }
    }

    /// Height after scaling
    pub fn rendered_height(&self) -> f32 {
        self.geometry.height() * self.scale.y
    }
}
