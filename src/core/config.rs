//! Render configuration with documented constants
//!
//! Every number the mesh builder uses lives here so a renderer can retune
//! the look of buildings without touching the rules tables.

use std::path::Path;

use serde::Deserialize;

use crate::core::error::{HexsteadError, Result};
use crate::renderer::geometry::MAX_RADIAL_SEGMENTS;

/// Configuration for building mesh construction
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    // === PLACEMENT ===
    /// Height of the hex surface above world y = 0
    ///
    /// A building's base sits at this height, so its center is raised by
    /// `ground_offset + height / 2`.
    pub ground_offset: f32,

    /// Distance from hex center to corner (world units)
    pub hex_size: f32,

    // === CONSTRUCTION ANIMATION ===
    /// Fraction of full height shown when construction has just started
    ///
    /// Height grows linearly from this fraction to 1.0 as the remaining
    /// turns count down.
    pub construction_min_height: f32,

    /// Opacity shown when construction has just started
    ///
    /// Fades linearly to fully opaque at completion.
    pub construction_min_opacity: f32,

    // === LEVELS ===
    /// Footprint growth per level above 1
    ///
    /// At 0.15, a level 3 building is 30% wider and deeper than level 1.
    pub level_footprint_growth: f32,

    /// HSL lightness added per level above 1
    pub level_lightness_step: f32,

    // === MATERIAL ===
    pub roughness: f32,
    pub metalness: f32,

    /// Segments around cylinders and cones
    pub radial_segments: u16,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            ground_offset: 0.3,
            hex_size: 1.0,

            construction_min_height: 0.3,
            construction_min_opacity: 0.5,

            level_footprint_growth: 0.15,
            level_lightness_step: 0.08,

            roughness: 0.6,
            metalness: 0.2,
            radial_segments: 8,
        }
    }
}

impl RenderConfig {
    /// Create a new config with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate configuration for internal consistency
    pub fn validate(&self) -> std::result::Result<(), String> {
        if !(0.0..=1.0).contains(&self.construction_min_height) {
            return Err(format!(
                "construction_min_height ({}) must be within 0..=1",
                self.construction_min_height
            ));
        }

        if !(0.0..=1.0).contains(&self.construction_min_opacity) {
            return Err(format!(
                "construction_min_opacity ({}) must be within 0..=1",
                self.construction_min_opacity
            ));
        }

        if self.hex_size <= 0.0 {
            return Err("hex_size must be positive".into());
        }

        // A cylinder needs at least a triangle around its axis, and its
        // vertices must fit u16 indices
        if !(3..=MAX_RADIAL_SEGMENTS).contains(&self.radial_segments) {
            return Err(format!(
                "radial_segments ({}) must be within 3..={}",
                self.radial_segments, MAX_RADIAL_SEGMENTS
            ));
        }

        if self.level_footprint_growth < 0.0 || self.level_lightness_step < 0.0 {
            return Err("Level growth factors must not be negative".into());
        }

        Ok(())
    }

    /// Parse and validate a config from TOML; missing keys keep their defaults
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: RenderConfig = toml::from_str(content)?;
        config.validate().map_err(HexsteadError::InvalidConfig)?;
        Ok(config)
    }

    /// Load a config from a TOML file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Load a config from a TOML file, falling back to defaults on any error
    pub fn load_or_default(path: &Path) -> Self {
        match Self::load(path) {
            Ok(config) => config,
            Err(e) => {
                tracing::warn!("Using default render config ({}): {}", path.display(), e);
                Self::default()
            }
        }
    }
}

// Process-wide render settings read by `create_mesh` and `update_mesh`

use std::sync::OnceLock;

static RENDER_CONFIG: OnceLock<RenderConfig> = OnceLock::new();

/// Render settings the free mesh functions use; defaults until installed
pub fn config() -> &'static RenderConfig {
    RENDER_CONFIG.get_or_init(RenderConfig::default)
}

/// Install render settings before the first mesh is built
///
/// Fails if `config` does not validate, or if meshes have already been
/// built (or settings installed) with another config.
pub fn set_config(config: RenderConfig) -> Result<()> {
    config.validate().map_err(HexsteadError::InvalidConfig)?;
    RENDER_CONFIG
        .set(config)
        .map_err(|_| HexsteadError::ConfigAlreadySet)
}
