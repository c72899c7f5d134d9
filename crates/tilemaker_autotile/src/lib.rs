//! Material autotiling on a duel grid
//!
//! Cells of a [`MaterialTilemap`] are painted with [`Material`]s. Rendering
//! happens on the duel grid between cells, where [`rules`] picks one or more
//! material tiles per position and a [`Transformation`] that reuses a tile
//! authored for one alignment at another.
//!
//! ```
//! use std::sync::Arc;
//! use tilemaker_autotile::{Material, MaterialTilemap};
//! use tilemaker_core::{SharedTileSet, Tile, TileAlignment, TileRole};
//!
//! let tiles = Arc::new(SharedTileSet::new(vec![
//!     Tile::new("Core", 0, 0).with_material("Brick", TileRole::MatCore, TileAlignment::Core),
//! ]));
//! let brick = Material::new("Brick", tiles);
//!
//! let mut map = MaterialTilemap::new(4, 4);
//! map.paint(&brick, [(1, 1), (2, 1), (1, 2), (2, 2)]);
//! assert_eq!(map.tiles_on_duel_grid(2, 2)[0].tile.name, "Core");
//! ```

pub mod config;
pub mod material;
pub mod rules;
pub mod sample;
pub mod tilemap;
pub mod transform;

pub use config::AutotileConfig;
pub use material::{names_match, Material, TileData};
pub use rules::{Corner, CornerSet, DuelCell};
pub use sample::{MIN_SAMPLE_SIZE, SAMPLE_LAYOUT};
pub use tilemap::{duel_corners, DuelArea, MaterialTilemap};
pub use transform::{Rotation, Transformation};

pub use tilemaker_core;

use thiserror::Error;

/// Errors from grid setup and configuration
#[derive(Debug, Error)]
pub enum AutotileError {
    #[error("Tilemap {width}x{height} is too small, need at least {min}x{min}")]
    GridTooSmall { width: u32, height: u32, min: u32 },

    #[error("IO error: {0}")]
    Io(String),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Serialize error: {0}")]
    Serialize(String),
}

impl From<std::io::Error> for AutotileError {
    fn from(err: std::io::Error) -> Self {
        AutotileError::Io(err.to_string())
    }
}

impl From<toml::de::Error> for AutotileError {
    fn from(err: toml::de::Error) -> Self {
        AutotileError::Parse(err.to_string())
    }
}
