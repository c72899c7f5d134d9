//! Tile records, structural roles and visual alignments

use serde::{Deserialize, Serialize};
use std::fmt;

/// Structural role of a tile within a material
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum TileRole {
    /// Stands alone, never part of material compositing
    #[default]
    Singular,
    MatCore,
    MatEdge,
    MatOuterCorner,
    MatInnerCorner,
    MatDiagonal,
}

impl TileRole {
    pub const ALL: [TileRole; 6] = [
        TileRole::Singular,
        TileRole::MatCore,
        TileRole::MatEdge,
        TileRole::MatOuterCorner,
        TileRole::MatInnerCorner,
        TileRole::MatDiagonal,
    ];

    /// Name used in persisted tile records
    pub fn as_str(&self) -> &'static str {
        match self {
            TileRole::Singular => "Singular",
            TileRole::MatCore => "MatCore",
            TileRole::MatEdge => "MatEdge",
            TileRole::MatOuterCorner => "MatOuterCorner",
            TileRole::MatInnerCorner => "MatInnerCorner",
            TileRole::MatDiagonal => "MatDiagonal",
        }
    }

    /// Parse a persisted role name
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|role| role.as_str() == name)
    }

    /// Whether tiles of this role take part in material compositing
    pub fn is_material(&self) -> bool {
        !matches!(self, TileRole::Singular)
    }
}

impl fmt::Display for TileRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How a tile appears visually when used as a boundary piece of a material
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum TileAlignment {
    #[default]
    Core,

    TopEdge,
    RightEdge,
    BottomEdge,
    LeftEdge,

    TopLeftOuterCorner,
    TopRightOuterCorner,
    BottomRightOuterCorner,
    BottomLeftOuterCorner,

    TopLeftInnerCorner,
    TopRightInnerCorner,
    BottomRightInnerCorner,
    BottomLeftInnerCorner,

    DiagonalTopLeftToBottomRight,
    DiagonalTopRightToBottomLeft,
}

impl TileAlignment {
    pub const ALL: [TileAlignment; 15] = [
        TileAlignment::Core,
        TileAlignment::TopEdge,
        TileAlignment::RightEdge,
        TileAlignment::BottomEdge,
        TileAlignment::LeftEdge,
        TileAlignment::TopLeftOuterCorner,
        TileAlignment::TopRightOuterCorner,
        TileAlignment::BottomRightOuterCorner,
        TileAlignment::BottomLeftOuterCorner,
        TileAlignment::TopLeftInnerCorner,
        TileAlignment::TopRightInnerCorner,
        TileAlignment::BottomRightInnerCorner,
        TileAlignment::BottomLeftInnerCorner,
        TileAlignment::DiagonalTopLeftToBottomRight,
        TileAlignment::DiagonalTopRightToBottomLeft,
    ];

    /// Direction the tile surface faces if it were a wall.
    ///
    /// Up is negative y, so `TopEdge` faces `(0, -1)`. Inner corners face
    /// inward, which makes their vectors the inverse of the outer corner with
    /// the same name. `Core` has no direction.
    pub fn face_direction(&self) -> Option<(i32, i32)> {
        match self {
            TileAlignment::Core => None,
            TileAlignment::TopEdge => Some((0, -1)),
            TileAlignment::RightEdge => Some((1, 0)),
            TileAlignment::BottomEdge => Some((0, 1)),
            TileAlignment::LeftEdge => Some((-1, 0)),
            TileAlignment::TopLeftOuterCorner => Some((-1, -1)),
            TileAlignment::TopRightOuterCorner => Some((1, -1)),
            TileAlignment::BottomRightOuterCorner => Some((1, 1)),
            TileAlignment::BottomLeftOuterCorner => Some((-1, 1)),
            TileAlignment::TopLeftInnerCorner => Some((1, 1)),
            TileAlignment::TopRightInnerCorner => Some((-1, 1)),
            TileAlignment::BottomRightInnerCorner => Some((-1, -1)),
            TileAlignment::BottomLeftInnerCorner => Some((1, -1)),
            TileAlignment::DiagonalTopLeftToBottomRight => Some((1, 1)),
            TileAlignment::DiagonalTopRightToBottomLeft => Some((-1, 1)),
        }
    }

    /// Name used in persisted tile records
    pub fn as_str(&self) -> &'static str {
        match self {
            TileAlignment::Core => "Core",
            TileAlignment::TopEdge => "TopEdge",
            TileAlignment::RightEdge => "RightEdge",
            TileAlignment::BottomEdge => "BottomEdge",
            TileAlignment::LeftEdge => "LeftEdge",
            TileAlignment::TopLeftOuterCorner => "TopLeftOuterCorner",
            TileAlignment::TopRightOuterCorner => "TopRightOuterCorner",
            TileAlignment::BottomRightOuterCorner => "BottomRightOuterCorner",
            TileAlignment::BottomLeftOuterCorner => "BottomLeftOuterCorner",
            TileAlignment::TopLeftInnerCorner => "TopLeftInnerCorner",
            TileAlignment::TopRightInnerCorner => "TopRightInnerCorner",
            TileAlignment::BottomRightInnerCorner => "BottomRightInnerCorner",
            TileAlignment::BottomLeftInnerCorner => "BottomLeftInnerCorner",
            TileAlignment::DiagonalTopLeftToBottomRight => "DiagonalTopLeftToBottomRight",
            TileAlignment::DiagonalTopRightToBottomLeft => "DiagonalTopRightToBottomLeft",
        }
    }

    /// Parse a persisted alignment name
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|alignment| alignment.as_str() == name)
    }
}

impl fmt::Display for TileAlignment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single annotated region of the sprite sheet
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tile {
    /// Display label, not unique
    #[serde(default)]
    pub name: String,
    #[serde(rename = "type", default)]
    pub role: TileRole,
    #[serde(alias = "allignment", default)]
    pub alignment: TileAlignment,
    /// Higher wins when several tiles share a role and alignment
    #[serde(default = "default_priority")]
    pub priority: i32,
    #[serde(default)]
    pub row: i32,
    #[serde(default)]
    pub column: i32,
    /// Material grouping key, empty when the tile belongs to no material
    #[serde(rename = "materialname", default)]
    pub material_name: String,
}

fn default_priority() -> i32 {
    1
}

impl Default for Tile {
    fn default() -> Self {
        Self {
            name: String::new(),
            role: TileRole::Singular,
            alignment: TileAlignment::Core,
            priority: default_priority(),
            row: 0,
            column: 0,
            material_name: String::new(),
        }
    }
}

impl Tile {
    /// Create a singular tile at a sheet position
    pub fn new(name: impl Into<String>, row: i32, column: i32) -> Self {
        Self {
            name: name.into(),
            row,
            column,
            ..Default::default()
        }
    }

    /// Tag this tile as part of a material
    pub fn with_material(
        mut self,
        material_name: impl Into<String>,
        role: TileRole,
        alignment: TileAlignment,
    ) -> Self {
        self.material_name = material_name.into();
        self.role = role;
        self.alignment = alignment;
        self
    }

    pub fn with_priority(mut self, priority: i32) -> Self {
        self.priority = priority;
        self
    }

    /// Sheet reading-order key: row first, then column
    pub fn position(&self) -> (i32, i32) {
        (self.row, self.column)
    }

    pub fn has_material(&self) -> bool {
        !self.material_name.is_empty()
    }
}
