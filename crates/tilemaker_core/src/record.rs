//! Flat key/value tile records
//!
//! The storage layer keeps each tile as a list of string attributes. Reading
//! is lenient: missing keys take their defaults and unknown role/alignment
//! names fall back to the default variant. A malformed integer is an error.

use crate::tile::{Tile, TileAlignment, TileRole};
use thiserror::Error;

pub const KEY_NAME: &str = "name";
pub const KEY_TYPE: &str = "type";
pub const KEY_ALIGNMENT: &str = "alignment";
/// Misspelled key written by older files
pub const KEY_ALIGNMENT_LEGACY: &str = "allignment";
pub const KEY_PRIORITY: &str = "priority";
pub const KEY_ROW: &str = "row";
pub const KEY_COLUMN: &str = "column";
pub const KEY_MATERIAL_NAME: &str = "materialname";

/// Errors that can occur when reading tile records
#[derive(Debug, Error)]
pub enum TileRecordError {
    #[error("Invalid integer for '{key}': {value:?}")]
    InvalidInteger { key: String, value: String },
    #[error("Parse error: {0}")]
    ParseError(String),
}

impl From<serde_json::Error> for TileRecordError {
    fn from(err: serde_json::Error) -> Self {
        TileRecordError::ParseError(err.to_string())
    }
}

fn parse_int(key: &str, value: &str) -> Result<i32, TileRecordError> {
    value
        .trim()
        .parse()
        .map_err(|_| TileRecordError::InvalidInteger {
            key: key.to_string(),
            value: value.to_string(),
        })
}

impl Tile {
    /// Build a tile from persisted attributes
    pub fn from_attributes<'a, I>(attributes: I) -> Result<Self, TileRecordError>
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let mut tile = Tile::default();

        for (key, value) in attributes {
            match key {
                KEY_NAME => tile.name = value.to_string(),
                KEY_TYPE => {
                    tile.role = TileRole::from_name(value).unwrap_or_else(|| {
                        tracing::warn!("Unknown tile type {:?}, using Singular", value);
                        TileRole::default()
                    });
                }
                KEY_ALIGNMENT | KEY_ALIGNMENT_LEGACY => {
                    tile.alignment = TileAlignment::from_name(value).unwrap_or_else(|| {
                        tracing::warn!("Unknown tile alignment {:?}, using Core", value);
                        TileAlignment::default()
                    });
                }
                KEY_PRIORITY => tile.priority = parse_int(key, value)?,
                KEY_ROW => tile.row = parse_int(key, value)?,
                KEY_COLUMN => tile.column = parse_int(key, value)?,
                KEY_MATERIAL_NAME => tile.material_name = value.to_string(),
                _ => {}
            }
        }

        Ok(tile)
    }

    /// Persisted attributes for this tile, in a fixed key order
    pub fn to_attributes(&self) -> Vec<(&'static str, String)> {
        vec![
            (KEY_NAME, self.name.clone()),
            (KEY_TYPE, self.role.as_str().to_string()),
            (KEY_ALIGNMENT, self.alignment.as_str().to_string()),
            (KEY_PRIORITY, self.priority.to_string()),
            (KEY_ROW, self.row.to_string()),
            (KEY_COLUMN, self.column.to_string()),
            (KEY_MATERIAL_NAME, self.material_name.clone()),
        ]
    }
}

/// Serialize a tile list to JSON
pub fn tiles_to_json(tiles: &[Tile]) -> Result<String, TileRecordError> {
    Ok(serde_json::to_string_pretty(tiles)?)
}

/// Parse a tile list from JSON
pub fn tiles_from_json(json: &str) -> Result<Vec<Tile>, TileRecordError> {
    Ok(serde_json::from_str(json)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_attributes_use_defaults() {
        let tile = Tile::from_attributes([("name", "Lonely")]).unwrap();
        assert_eq!(tile.name, "Lonely");
        assert_eq!(tile.role, TileRole::Singular);
        assert_eq!(tile.alignment, TileAlignment::Core);
        assert_eq!(tile.priority, 1);
        assert_eq!(tile.position(), (0, 0));
        assert!(tile.material_name.is_empty());
    }

    #[test]
    fn test_unknown_enum_names_fall_back() {
        let tile =
            Tile::from_attributes([("type", "Bogus"), ("alignment", "Sideways")]).unwrap();
        assert_eq!(tile.role, TileRole::Singular);
        assert_eq!(tile.alignment, TileAlignment::Core);
    }

    #[test]
    fn test_legacy_alignment_key() {
        let tile = Tile::from_attributes([("allignment", "LeftEdge")]).unwrap();
        assert_eq!(tile.alignment, TileAlignment::LeftEdge);
    }

    #[test]
    fn test_malformed_integer_is_an_error() {
        let err = Tile::from_attributes([("row", "three")]).unwrap_err();
        match err {
            TileRecordError::InvalidInteger { key, value } => {
                assert_eq!(key, "row");
                assert_eq!(value, "three");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_attributes_round_trip() {
        let tile = Tile::new("Corner", 4, 7)
            .with_material("Stone", TileRole::MatInnerCorner, TileAlignment::BottomLeftInnerCorner)
            .with_priority(-2);
        let attributes = tile.to_attributes();
        let parsed =
            Tile::from_attributes(attributes.iter().map(|(k, v)| (*k, v.as_str()))).unwrap();
        assert_eq!(parsed, tile);
    }

    #[test]
    fn test_json_list() {
        let tiles = vec![
            Tile::new("A", 0, 0),
            Tile::new("B", 0, 1).with_material("Brick", TileRole::MatCore, TileAlignment::Core),
        ];
        let json = tiles_to_json(&tiles).unwrap();
        assert!(json.contains("\"materialname\": \"Brick\""));
        assert_eq!(tiles_from_json(&json).unwrap(), tiles);
        assert!(tiles_from_json("not json").is_err());
    }
}
