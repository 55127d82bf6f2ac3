pub mod config;
pub mod error;
pub mod types;

pub use config::RenderConfig;
pub use error::{HexsteadError, Result};
pub use types::{ResourceAmounts, ResourceType, Terrain, Turn};
