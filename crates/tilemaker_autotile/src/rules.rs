//! Duel-grid compositing rules
//!
//! A duel-grid cell sits on the shared corner of four material cells. The
//! rules below decide which material tiles cover its four quadrants. Each
//! quadrant can be claimed by one rule only, and rules run in a fixed
//! priority order: core, inner corner, diagonal, edge, outer corner. The
//! emitted tiles are in draw order, bottom first.

use crate::material::{Material, TileData};
use std::ops::{BitOr, BitOrAssign};
use tilemaker_core::{TileAlignment, TileRole};

/// One quadrant of a duel-grid cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Corner {
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}

impl Corner {
    pub const ALL: [Corner; 4] = [
        Corner::TopLeft,
        Corner::TopRight,
        Corner::BottomLeft,
        Corner::BottomRight,
    ];

    fn index(self) -> usize {
        self as usize
    }

    /// Offset from a duel-grid coordinate to the material cell filling this
    /// quadrant. Duel cell `(x, y)` sits on the top-left corner of material
    /// cell `(x, y)`.
    pub fn cell_offset(self) -> (i32, i32) {
        match self {
            Corner::TopLeft => (-1, -1),
            Corner::TopRight => (0, -1),
            Corner::BottomLeft => (-1, 0),
            Corner::BottomRight => (0, 0),
        }
    }

    /// Alignment requested when only this quadrant is filled
    pub fn outer_corner_alignment(self) -> TileAlignment {
        match self {
            Corner::TopLeft => TileAlignment::TopLeftOuterCorner,
            Corner::TopRight => TileAlignment::TopRightOuterCorner,
            Corner::BottomLeft => TileAlignment::BottomLeftOuterCorner,
            Corner::BottomRight => TileAlignment::BottomRightOuterCorner,
        }
    }

    /// Alignment requested when this quadrant is the notch of an inner corner
    pub fn inner_corner_alignment(self) -> TileAlignment {
        match self {
            Corner::TopLeft => TileAlignment::TopLeftInnerCorner,
            Corner::TopRight => TileAlignment::TopRightInnerCorner,
            Corner::BottomLeft => TileAlignment::BottomLeftInnerCorner,
            Corner::BottomRight => TileAlignment::BottomRightInnerCorner,
        }
    }
}

/// A set of quadrants, one bit per [`Corner`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct CornerSet(u8);

impl CornerSet {
    pub const EMPTY: Self = Self(0);
    pub const ALL: Self = Self(0b1111);
    pub const TOP: Self = Self(0b0011);
    pub const BOTTOM: Self = Self(0b1100);
    pub const LEFT: Self = Self(0b0101);
    pub const RIGHT: Self = Self(0b1010);
    pub const TOP_LEFT_TO_BOTTOM_RIGHT: Self = Self(0b1001);
    pub const TOP_RIGHT_TO_BOTTOM_LEFT: Self = Self(0b0110);

    pub fn only(corner: Corner) -> Self {
        Self(1 << corner.index())
    }

    pub fn contains(&self, corner: Corner) -> bool {
        self.0 & (1 << corner.index()) != 0
    }

    pub fn intersects(&self, other: CornerSet) -> bool {
        self.0 & other.0 != 0
    }

    pub fn without(&self, corner: Corner) -> Self {
        Self(self.0 & !(1 << corner.index()))
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    pub fn len(&self) -> usize {
        self.0.count_ones() as usize
    }

    pub fn iter(self) -> impl Iterator<Item = Corner> {
        Corner::ALL.into_iter().filter(move |c| self.contains(*c))
    }
}

impl BitOr for CornerSet {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl BitOrAssign for CornerSet {
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

const DIAGONAL_RULES: [(CornerSet, TileAlignment); 2] = [
    (
        CornerSet::TOP_LEFT_TO_BOTTOM_RIGHT,
        TileAlignment::DiagonalTopLeftToBottomRight,
    ),
    (
        CornerSet::TOP_RIGHT_TO_BOTTOM_LEFT,
        TileAlignment::DiagonalTopRightToBottomLeft,
    ),
];

// Edges are named after the side of the painted region they border, so a
// filled top pair is the region's bottom edge.
const EDGE_RULES: [(CornerSet, TileAlignment); 4] = [
    (CornerSet::TOP, TileAlignment::BottomEdge),
    (CornerSet::BOTTOM, TileAlignment::TopEdge),
    (CornerSet::LEFT, TileAlignment::RightEdge),
    (CornerSet::RIGHT, TileAlignment::LeftEdge),
];

/// Rule evaluation state for one duel-grid cell
pub struct DuelCell<'a> {
    corners: [Option<&'a Material>; 4],
    claimed: CornerSet,
    tiles: Vec<(CornerSet, TileData)>,
}

impl<'a> DuelCell<'a> {
    /// Corners in [`Corner::ALL`] order
    pub fn new(corners: [Option<&'a Material>; 4]) -> Self {
        Self {
            corners,
            claimed: CornerSet::EMPTY,
            tiles: Vec::new(),
        }
    }

    pub fn material(&self, corner: Corner) -> Option<&'a Material> {
        self.corners[corner.index()]
    }

    pub fn claimed(&self) -> CornerSet {
        self.claimed
    }

    /// Material shared by every corner of `set`, if all of them are
    /// unclaimed and filled with equal materials
    fn shared_material(&self, set: CornerSet) -> Option<&'a Material> {
        if set.is_empty() || self.claimed.intersects(set) {
            return None;
        }
        let mut corners = set.iter();
        let first = self.material(corners.next()?)?;
        corners
            .all(|c| self.material(c) == Some(first))
            .then_some(first)
    }

    fn emit(
        &mut self,
        material: &Material,
        set: CornerSet,
        role: TileRole,
        alignment: TileAlignment,
    ) -> bool {
        let Some(data) = material.try_get_tile_data(role, alignment) else {
            return false;
        };
        tracing::trace!(
            "{} {:?} {} claims {:?} with '{}' ({})",
            material,
            role,
            alignment,
            set,
            data.tile.name,
            data.transformation
        );
        self.tiles.push((set, data));
        self.claimed |= set;
        true
    }

    fn claim(&mut self, set: CornerSet, role: TileRole, alignment: TileAlignment) -> bool {
        match self.shared_material(set) {
            Some(material) => self.emit(material, set, role, alignment),
            None => false,
        }
    }

    fn core_rule(&mut self) {
        self.claim(CornerSet::ALL, TileRole::MatCore, TileAlignment::Core);
    }

    fn inner_corner_rule(&mut self) {
        for notch in Corner::ALL {
            let rest = CornerSet::ALL.without(notch);
            let Some(material) = self.shared_material(rest) else {
                continue;
            };
            // exactly three: an unclaimed notch holding the same material is
            // not a notch
            if !self.claimed.contains(notch) && self.material(notch) == Some(material) {
                continue;
            }
            self.emit(
                material,
                rest,
                TileRole::MatInnerCorner,
                notch.inner_corner_alignment(),
            );
        }
    }

    fn diagonal_rule(&mut self) {
        for (set, alignment) in DIAGONAL_RULES {
            self.claim(set, TileRole::MatDiagonal, alignment);
        }
    }

    fn edge_rule(&mut self) {
        for (set, alignment) in EDGE_RULES {
            self.claim(set, TileRole::MatEdge, alignment);
        }
    }

    fn outer_corner_rule(&mut self) {
        for corner in Corner::ALL {
            self.claim(
                CornerSet::only(corner),
                TileRole::MatOuterCorner,
                corner.outer_corner_alignment(),
            );
        }
    }

    /// Run every rule and return each tile with the quadrants it covers, in
    /// draw order
    pub fn composite_with_claims(mut self) -> Vec<(CornerSet, TileData)> {
        self.core_rule();
        self.inner_corner_rule();
        self.diagonal_rule();
        self.edge_rule();
        self.outer_corner_rule();
        self.tiles
    }

    /// Run every rule and return the tiles in draw order
    pub fn composite(self) -> Vec<TileData> {
        self.composite_with_claims()
            .into_iter()
            .map(|(_, data)| data)
            .collect()
    }
}
