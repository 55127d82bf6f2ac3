//! Building mesh construction and in-place construction updates
//!
//! Geometry is always built at the building's full height for its level.
//! Construction progress is applied through `scale.y`, so updating a node
//! never touches its geometry and repeated updates with the same remaining
//! turns leave the node unchanged.

use crate::city::building::{BuildingType, Shape};
use crate::city::upgrade::Level;
use crate::core::config::{config, RenderConfig};
use crate::core::types::Turn;
use crate::renderer::color::Color;
use crate::renderer::geometry::Geometry;
use crate::renderer::scene::{BuildingTag, SceneNode, StandardMaterial};
use crate::spatial::hex::{HexCoord, HexLayout};

/// Fraction of construction done, in 0..=1
///
/// Zero-duration buildings and finished buildings report 1. Remaining turns
/// beyond the build duration clamp to 0.
pub fn construction_progress(turns_remaining: Turn, turns_to_build: Turn) -> f32 {
    if turns_remaining == 0 || turns_to_build == 0 {
        return 1.0;
    }
    let remaining = turns_remaining.min(turns_to_build) as f32;
    1.0 - remaining / turns_to_build as f32
}

/// Builds and updates scene nodes for buildings
#[derive(Debug, Clone, Copy)]
pub struct MeshBuilder<'a> {
    config: &'a RenderConfig,
    layout: HexLayout,
}

impl<'a> MeshBuilder<'a> {
    pub fn new(config: &'a RenderConfig) -> Self {
        Self {
            config,
            layout: HexLayout::new(config.hex_size),
        }
    }

    /// New node for a building of `building_type` at `coord`
    pub fn create(
        &self,
        building_type: BuildingType,
        coord: HexCoord,
        turns_remaining: Turn,
        level: Level,
    ) -> SceneNode {
        let def = building_type.definition();
        let steps_above_base = (level.number() - 1) as f32;

        let footprint = 1.0 + steps_above_base * self.config.level_footprint_growth;
        let width = def.scale.x * footprint;
        let depth = def.scale.z * footprint;
        let height = def.scale.y * level.multiplier();

        let geometry = match def.shape {
            Shape::Box => Geometry::Box {
                width,
                height,
                depth,
            },
            Shape::Cylinder => Geometry::Cylinder {
                radius_top: width,
                radius_bottom: width,
                height,
                radial_segments: self.config.radial_segments,
            },
            Shape::Cone => Geometry::Cone {
                radius: width,
                height,
                radial_segments: self.config.radial_segments,
            },
        };

        let color = Color::from_hex(def.color).offset_hsl(
            0.0,
            0.0,
            steps_above_base * self.config.level_lightness_step,
        );

        let material = StandardMaterial {
            color,
            roughness: self.config.roughness,
            metalness: self.config.metalness,
            flat_shading: true,
            ..StandardMaterial::default()
        };

        let mut node = SceneNode::new(geometry, material);
        node.position = self.layout.to_world(coord);
        node.tag = Some(BuildingTag {
            building_type,
            coord,
            level,
        });
        self.update(&mut node, building_type, turns_remaining);

        tracing::trace!(
            "Created {} mesh at ({}, {}) level {}, {} turns remaining",
            building_type,
            coord.q,
            coord.r,
            level,
            turns_remaining
        );
        node
    }

    /// Apply construction progress to an existing node
    ///
    /// Writes `scale.y`, `position.y` and the material opacity. The node's
    /// geometry, footprint and ground position are left as they are.
    pub fn update(&self, node: &mut SceneNode, building_type: BuildingType, turns_remaining: Turn) {
        let turns_to_build = building_type.definition().turns_to_build;
        let progress = construction_progress(turns_remaining, turns_to_build);
        let under_construction = turns_remaining > 0;

        let (height_factor, opacity) = if under_construction {
            let min_height = self.config.construction_min_height;
            let min_opacity = self.config.construction_min_opacity;
            (
                min_height + (1.0 - min_height) * progress,
                min_opacity + (1.0 - min_opacity) * progress,
            )
        } else {
            (1.0, 1.0)
        };

        node.scale.y = height_factor;
        node.position.y = self.config.ground_offset + node.rendered_height() / 2.0;
        node.material.transparent = under_construction;
        node.material.opacity = opacity;
    }
}

impl Default for MeshBuilder<'static> {
    fn default() -> Self {
        Self::new(config())
    }
}

/// Create a building node using the global render config
pub fn create_mesh(
    building_type: BuildingType,
    coord: HexCoord,
    turns_remaining: Turn,
    level: Level,
) -> SceneNode {
    MeshBuilder::default().create(building_type, coord, turns_remaining, level)
}

/// Update a building node in place using the global render config
pub fn update_mesh(node: &mut SceneNode, building_type: BuildingType, turns_remaining: Turn) {
    MeshBuilder::default().update(node, building_type, turns_remaining)
}

#[cfg(test)]
mod tests {
    use super::*;

    const ORIGIN: HexCoord = HexCoord { q: 0, r: 0 };

    fn base_y(node: &SceneNode) -> f32 {
        node.position.y - node.rendered_height() / 2.0
    }

    #[test]
    fn test_progress_bounds() {
        assert_eq!(construction_progress(0, 4), 1.0);
        assert_eq!(construction_progress(4, 4), 0.0);
        assert!((construction_progress(1, 4) - 0.75).abs() < 0.001);
        // Zero-duration kinds never divide by zero
        assert_eq!(construction_progress(3, 0), 1.0);
        // Clamped when more turns remain than the build takes
        assert_eq!(construction_progress(9, 4), 0.0);
    }

    #[test]
    fn test_complete_mesh_full_height_opaque() {
        for building_type in BuildingType::ALL {
            let node = create_mesh(building_type, ORIGIN, 0, Level::One);
            let def = building_type.definition();

            assert!((node.rendered_height() - def.scale.y).abs() < 0.001, "{}", building_type);
            assert_eq!(node.material.opacity, 1.0);
            assert!(!node.material.transparent);
        }
    }

    #[test]
    fn test_new_construction_is_short_and_faded() {
        for building_type in BuildingType::ALL {
            let def = building_type.definition();
            if def.turns_to_build == 0 {
                continue;
            }
            let node = create_mesh(building_type, ORIGIN, def.turns_to_build, Level::One);

            assert!(
                (node.rendered_height() - 0.3 * def.scale.y).abs() < 0.001,
                "{}",
                building_type
            );
            assert!((node.material.opacity - 0.5).abs() < 0.001);
            assert!(node.material.transparent);
        }
    }

    #[test]
    fn test_base_sits_on_ground_offset() {
        let node = create_mesh(BuildingType::Barracks, HexCoord::new(1, 0), 2, Level::One);
        assert!((base_y(&node) - 0.3).abs() < 0.001);
        assert!((node.position.x - 3.0_f32.sqrt()).abs() < 0.001);
        assert_eq!(node.position.z, 0.0);
    }

    #[test]
    fn test_level_scales_size_and_lightness() {
        let base = create_mesh(BuildingType::Farm, ORIGIN, 0, Level::One);
        let top = create_mesh(BuildingType::Farm, ORIGIN, 0, Level::Three);

        // 0.2 * 1.6
        assert!((top.rendered_height() - 0.32).abs() < 0.001);
        // 0.6 * (1 + 2 * 0.15)
        assert!((top.geometry.footprint().0 - 0.78).abs() < 0.001);

        let (_, _, l1) = base.material.color.to_hsl();
        let (_, _, l3) = top.material.color.to_hsl();
        assert!((l3 - l1 - 0.16).abs() < 0.005);
    }

    #[test]
    fn test_shape_selects_geometry() {
        let mill = create_mesh(BuildingType::LumberMill, ORIGIN, 0, Level::One);
        assert!(matches!(
            mill.geometry,
            Geometry::Cylinder { radius_top, radial_segments: 8, .. } if (radius_top - 0.25).abs() < 0.001
        ));

        let quarry = create_mesh(BuildingType::Quarry, ORIGIN, 0, Level::One);
        assert!(matches!(quarry.geometry, Geometry::Cone { .. }));

        let farm = create_mesh(BuildingType::Farm, ORIGIN, 0, Level::One);
        assert!(matches!(farm.geometry, Geometry::Box { .. }));
    }

    #[test]
    fn test_material_and_tag() {
        let coord = HexCoord::new(2, -1);
        let node = create_mesh(BuildingType::MageTower, coord, 5, Level::Two);
        assert!(node.material.flat_shading);
        assert!((node.material.roughness - 0.6).abs() < 0.001);
        assert!((node.material.metalness - 0.2).abs() < 0.001);
        assert_eq!(
            node.tag,
            Some(BuildingTag {
                building_type: BuildingType::MageTower,
                coord,
                level: Level::Two,
            })
        );
    }

    #[test]
    fn test_update_is_idempotent() {
        let mut node = create_mesh(BuildingType::Mine, ORIGIN, 4, Level::Two);
        update_mesh(&mut node, BuildingType::Mine, 2);
        let once = node.clone();
        update_mesh(&mut node, BuildingType::Mine, 2);
        assert_eq!(node, once);
    }

    #[test]
    fn test_update_matches_fresh_mesh() {
        let mut node = create_mesh(BuildingType::Mine, ORIGIN, 4, Level::Two);
        for turns in (0..4).rev() {
            update_mesh(&mut node, BuildingType::Mine, turns);
            let fresh = create_mesh(BuildingType::Mine, ORIGIN, turns, Level::Two);
            assert_eq!(node, fresh, "turns_remaining {}", turns);
        }
        // Level multiplier survives updates: 0.35 * 1.3
        assert!((node.rendered_height() - 0.455).abs() < 0.001);
    }

    #[test]
    fn test_custom_config() {
        let config = RenderConfig {
            ground_offset: 0.0,
            radial_segments: 16,
            ..RenderConfig::default()
        };
        let builder = MeshBuilder::new(&config);
        let node = builder.create(BuildingType::MageTower, ORIGIN, 0, Level::One);

        assert!(base_y(&node).abs() < 0.001);
        assert!(matches!(node.geometry, Geometry::Cylinder { radial_segments: 16, .. }));
    }
}
