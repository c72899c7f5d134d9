//! Autotiling settings loaded from TOML

use crate::tilemap::MaterialTilemap;
use crate::AutotileError;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tilemaker_core::Tile;

fn default_preview_size() -> u32 {
    12
}

fn default_priority() -> i32 {
    1
}

/// Settings for the material preview and newly annotated tiles.
///
/// Every field is optional in the file:
///
/// ```toml
/// preview_width = 16
/// preview_height = 10
/// default_priority = 1
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AutotileConfig {
    #[serde(default = "default_preview_size")]
    pub preview_width: u32,
    #[serde(default = "default_preview_size")]
    pub preview_height: u32,
    /// Priority given to tiles created through [`AutotileConfig::new_tile`]
    #[serde(default = "default_priority")]
    pub default_priority: i32,
}

impl Default for AutotileConfig {
    fn default() -> Self {
        Self {
            preview_width: default_preview_size(),
            preview_height: default_preview_size(),
            default_priority: default_priority(),
        }
    }
}

impl AutotileConfig {
    pub fn from_toml_str(content: &str) -> Result<Self, AutotileError> {
        Ok(toml::from_str(content)?)
    }

    pub fn to_toml_string(&self) -> Result<String, AutotileError> {
        toml::to_string(self).map_err(|e| AutotileError::Serialize(e.to_string()))
    }

    /// Read settings from a file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, AutotileError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        let config = Self::from_toml_str(&content)?;
        tracing::info!("Loaded autotile config from {}", path.display());
        Ok(config)
    }

    /// Read settings from a file, using defaults when it is missing or invalid
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        match Self::load(path) {
            Ok(config) => config,
            Err(e) => {
                tracing::warn!(
                    "Using default autotile config, failed to load {}: {}",
                    path.display(),
                    e
                );
                Self::default()
            }
        }
    }

    /// Write settings to a file
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), AutotileError> {
        std::fs::write(path, self.to_toml_string()?)?;
        Ok(())
    }

    /// An empty grid of the preview size
    pub fn preview_tilemap(&self) -> MaterialTilemap {
        MaterialTilemap::new(self.preview_width, self.preview_height)
    }

    /// A singular tile at a sheet position with the configured priority
    pub fn new_tile(&self, name: impl Into<String>, row: i32, column: i32) -> Tile {
        Tile::new(name, row, column).with_priority(self.default_priority)
    }
}
