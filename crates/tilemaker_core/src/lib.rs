//! Core data structures for tilemaker
//!
//! This crate provides the plain-data types shared by every part of the
//! tile maker:
//! - `Tile` - One annotated sprite sheet region with its role and alignment
//! - `TileRole` / `TileAlignment` - Structural role and visual facing
//! - `TileSource` - Snapshot provider that materials read tiles through
//! - `SharedTileSet` - Owner-side tile store publishing cheap snapshots
//! - Flat attribute records and JSON lists for the storage layer

mod record;
mod source;
mod tile;

pub use record::{
    tiles_from_json, tiles_to_json, TileRecordError, KEY_ALIGNMENT, KEY_ALIGNMENT_LEGACY,
    KEY_COLUMN, KEY_MATERIAL_NAME, KEY_NAME, KEY_PRIORITY, KEY_ROW, KEY_TYPE,
};
pub use source::{FnSource, SharedTileSet, TileSource};
pub use tile::{Tile, TileAlignment, TileRole};
