//! Scene construction for settlement buildings.
//!
//! Produces renderer-agnostic scene nodes (geometry, material, transform)
//! from building state. A GPU backend consumes `SceneNode`s and uploads the
//! tessellated `MeshData`; nothing here touches a device.

pub mod color;
pub mod geometry;
pub mod mesh;
pub mod scene;

pub use color::Color;
pub use geometry::{Geometry, MeshData, Vertex, MAX_RADIAL_SEGMENTS};
pub use mesh::{construction_progress, create_mesh, update_mesh, MeshBuilder};
pub use scene::{BuildingTag, SceneNode, StandardMaterial};
