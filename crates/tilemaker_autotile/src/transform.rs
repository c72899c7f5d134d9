//! Rotation and flip algebra for reusing one authored tile at other alignments
//!
//! A material only needs one tile per role. When the rule engine asks for an
//! edge facing left but the material only has an edge facing up, the face
//! directions of the two alignments give the rotation/flip that turns one into
//! the other.
//!
//! Conventions (y grows downward, like screen space):
//! - Rotations are clockwise on screen: 90° maps `(x, y)` to `(-y, x)`
//! - Rotation is applied first, then the flips

use serde::{Deserialize, Serialize};
use std::fmt;
use tilemaker_core::TileAlignment;

/// Clockwise quarter-turn rotation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Rotation {
    #[default]
    Deg0,
    Deg90,
    Deg180,
    Deg270,
}

impl Rotation {
    pub const ALL: [Rotation; 4] = [
        Rotation::Deg0,
        Rotation::Deg90,
        Rotation::Deg180,
        Rotation::Deg270,
    ];

    /// Number of clockwise quarter turns
    pub fn quarter_turns(&self) -> u8 {
        match self {
            Rotation::Deg0 => 0,
            Rotation::Deg90 => 1,
            Rotation::Deg180 => 2,
            Rotation::Deg270 => 3,
        }
    }

    pub fn from_quarter_turns(turns: u8) -> Self {
        Self::ALL[(turns % 4) as usize]
    }

    pub fn degrees(&self) -> u16 {
        self.quarter_turns() as u16 * 90
    }

    /// Rotation that undoes this one
    pub fn inverse(&self) -> Self {
        Self::from_quarter_turns(4 - self.quarter_turns())
    }

    fn apply(&self, (x, y): (i32, i32)) -> (i32, i32) {
        match self {
            Rotation::Deg0 => (x, y),
            Rotation::Deg90 => (-y, x),
            Rotation::Deg180 => (-x, -y),
            Rotation::Deg270 => (y, -x),
        }
    }
}

/// How to present a tile: rotate, then flip
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub struct Transformation {
    pub rotation: Rotation,
    pub flip_horizontal: bool,
    pub flip_vertical: bool,
}

const BIT_FLIP_HORIZONTAL: u8 = 0b0100;
const BIT_FLIP_VERTICAL: u8 = 0b1000;

impl Transformation {
    pub const NONE: Self = Self::new(Rotation::Deg0, false, false);
    pub const ROTATE_90: Self = Self::new(Rotation::Deg90, false, false);
    pub const ROTATE_180: Self = Self::new(Rotation::Deg180, false, false);
    pub const ROTATE_270: Self = Self::new(Rotation::Deg270, false, false);
    pub const FLIP_HORIZONTAL: Self = Self::new(Rotation::Deg0, true, false);
    pub const FLIP_VERTICAL: Self = Self::new(Rotation::Deg0, false, true);
    pub const FLIP_BOTH: Self = Self::new(Rotation::Deg0, true, true);

    pub const fn new(rotation: Rotation, flip_horizontal: bool, flip_vertical: bool) -> Self {
        Self {
            rotation,
            flip_horizontal,
            flip_vertical,
        }
    }

    pub fn is_identity(&self) -> bool {
        *self == Self::NONE
    }

    /// All 16 transformations in search order: rotation 0/90/180/270, and for
    /// each rotation no flip, horizontal, vertical, both
    pub fn all() -> impl Iterator<Item = Transformation> {
        Rotation::ALL.into_iter().flat_map(|rotation| {
            [(false, false), (true, false), (false, true), (true, true)]
                .into_iter()
                .map(move |(h, v)| Transformation::new(rotation, h, v))
        })
    }

    /// Apply to a direction vector
    pub fn apply(&self, direction: (i32, i32)) -> (i32, i32) {
        let (mut x, mut y) = self.rotation.apply(direction);
        if self.flip_horizontal {
            x = -x;
        }
        if self.flip_vertical {
            y = -y;
        }
        (x, y)
    }

    /// The transformation that undoes this one
    pub fn inverse(&self) -> Self {
        if self.flip_horizontal != self.flip_vertical {
            // rotate-then-mirror is its own inverse
            *self
        } else {
            Self::new(
                self.rotation.inverse(),
                self.flip_horizontal,
                self.flip_vertical,
            )
        }
    }

    /// Linear map `[[a, b], [c, d]]` with `x' = a*x + b*y`, `y' = c*x + d*y`.
    ///
    /// Renderers build their affine transform about the tile centre from this.
    pub fn matrix(&self) -> [[i32; 2]; 2] {
        let [[a, b], [c, d]] = match self.rotation {
            Rotation::Deg0 => [[1, 0], [0, 1]],
            Rotation::Deg90 => [[0, -1], [1, 0]],
            Rotation::Deg180 => [[-1, 0], [0, -1]],
            Rotation::Deg270 => [[0, 1], [-1, 0]],
        };
        let sx = if self.flip_horizontal { -1 } else { 1 };
        let sy = if self.flip_vertical { -1 } else { 1 };
        [[a * sx, b * sx], [c * sy, d * sy]]
    }

    /// Compact encoding: bits 0-1 rotation, bit 2 horizontal flip, bit 3 vertical flip
    pub fn to_bits(&self) -> u8 {
        let mut bits = self.rotation.quarter_turns();
        if self.flip_horizontal {
            bits |= BIT_FLIP_HORIZONTAL;
        }
        if self.flip_vertical {
            bits |= BIT_FLIP_VERTICAL;
        }
        bits
    }

    pub fn from_bits(bits: u8) -> Option<Self> {
        if bits > 0b1111 {
            return None;
        }
        Some(Self::new(
            Rotation::from_quarter_turns(bits & 0b11),
            bits & BIT_FLIP_HORIZONTAL != 0,
            bits & BIT_FLIP_VERTICAL != 0,
        ))
    }

    /// Transformation that presents a tile authored at `source` as if it were
    /// authored at `target`.
    ///
    /// Returns [`Transformation::NONE`] when the alignments are equal, when
    /// either side is `Core`, or when no rotation/flip maps one face direction
    /// onto the other.
    pub fn for_alignment(source: TileAlignment, target: TileAlignment) -> Self {
        if source == target {
            return Self::NONE;
        }

        let (Some(from), Some(to)) = (source.face_direction(), target.face_direction()) else {
            return Self::NONE;
        };

        Self::all()
            .find(|t| t.apply(from) == to)
            .unwrap_or(Self::NONE)
    }
}

impl fmt::Display for Transformation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_identity() {
            return f.write_str("None");
        }
        let mut parts = Vec::with_capacity(3);
        if self.rotation != Rotation::Deg0 {
            parts.push(format!("Rotate{}", self.rotation.degrees()));
        }
        if self.flip_horizontal {
            parts.push("FlipHorizontal".to_string());
        }
        if self.flip_vertical {
            parts.push("FlipVertical".to_string());
        }
        f.write_str(&parts.join("|"))
    }
}
