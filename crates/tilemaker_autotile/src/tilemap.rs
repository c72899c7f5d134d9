//! The material grid and its duel-grid view
//!
//! Each material cell holds at most one material. Rendering happens on the
//! duel grid, which is offset by half a cell: duel cell `(x, y)` sits on the
//! shared corner of material cells `(x-1, y-1)`, `(x, y-1)`, `(x-1, y)` and
//! `(x, y)`, so valid duel cells span `0..=width` by `0..=height`.

use crate::material::{Material, TileData};
use crate::rules::{Corner, DuelCell};
use tilemaker_core::Tile;

/// Inclusive duel-grid bounds touched by grid changes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DuelArea {
    pub left: i32,
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
}

impl DuelArea {
    /// Duel cells whose composite depends on material cell `(x, y)`
    pub fn around_cell(x: i32, y: i32) -> Self {
        Self {
            left: x,
            top: y,
            right: x.saturating_add(1),
            bottom: y.saturating_add(1),
        }
    }

    pub fn union(&self, other: &DuelArea) -> Self {
        Self {
            left: self.left.min(other.left),
            top: self.top.min(other.top),
            right: self.right.max(other.right),
            bottom: self.bottom.max(other.bottom),
        }
    }

    pub fn contains(&self, x: i32, y: i32) -> bool {
        x >= self.left && x <= self.right && y >= self.top && y <= self.bottom
    }

    pub fn width(&self) -> i32 {
        self.right - self.left + 1
    }

    pub fn height(&self) -> i32 {
        self.bottom - self.top + 1
    }

    /// Every duel coordinate in the area, row-major
    pub fn iter(&self) -> impl Iterator<Item = (i32, i32)> {
        let Self {
            left,
            top,
            right,
            bottom,
        } = *self;
        (top..=bottom).flat_map(move |y| (left..=right).map(move |x| (x, y)))
    }
}

/// Material cell under each quadrant of duel cell `(x, y)`, in
/// [`Corner::ALL`] order. `None` where the cell lies outside the `i32` range.
pub fn duel_corners(x: i32, y: i32) -> [(Corner, Option<(i32, i32)>); 4] {
    Corner::ALL.map(|corner| {
        let (dx, dy) = corner.cell_offset();
        (corner, x.checked_add(dx).zip(y.checked_add(dy)))
    })
}

/// A fixed-size grid of material cells
#[derive(Debug, Clone)]
pub struct MaterialTilemap {
    width: u32,
    height: u32,
    cells: Vec<Option<Material>>,
    dirty: Option<DuelArea>,
}

impl MaterialTilemap {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            cells: vec![None; (width as usize) * (height as usize)],
            dirty: None,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if x < 0 || y < 0 || x as u32 >= self.width || y as u32 >= self.height {
            return None;
        }
        Some(y as usize * self.width as usize + x as usize)
    }

    pub fn in_bounds(&self, x: i32, y: i32) -> bool {
        self.index(x, y).is_some()
    }

    /// Material at a cell, `None` when empty or out of bounds
    pub fn get(&self, x: i32, y: i32) -> Option<&Material> {
        self.index(x, y).and_then(|i| self.cells[i].as_ref())
    }

    /// Store a material at a cell. Returns whether the cell changed; out of
    /// bounds writes are ignored.
    pub fn set(&mut self, x: i32, y: i32, material: Option<Material>) -> bool {
        let Some(i) = self.index(x, y) else {
            return false;
        };
        if self.cells[i] == material {
            return false;
        }
        self.cells[i] = material;
        self.mark_dirty(DuelArea::around_cell(x, y));
        true
    }

    /// Fill cells with `material`, skipping out of range cells and cells
    /// already holding it. Returns the number of cells changed.
    pub fn paint(
        &mut self,
        material: &Material,
        coords: impl IntoIterator<Item = (i32, i32)>,
    ) -> usize {
        let changed = coords
            .into_iter()
            .filter(|&(x, y)| self.set(x, y, Some(material.clone())))
            .count();
        tracing::debug!("Painted {} cells with {}", changed, material);
        changed
    }

    /// Empty cells. Returns the number of cells changed.
    pub fn erase(&mut self, coords: impl IntoIterator<Item = (i32, i32)>) -> usize {
        let changed = coords
            .into_iter()
            .filter(|&(x, y)| self.set(x, y, None))
            .count();
        tracing::debug!("Erased {} cells", changed);
        changed
    }

    /// Empty every cell
    pub fn clear(&mut self) {
        if self.cells.iter().all(Option::is_none) {
            return;
        }
        self.cells.iter_mut().for_each(|cell| *cell = None);
        if let Some(area) = self.full_duel_area() {
            self.mark_dirty(area);
        }
    }

    /// Every cell, row-major
    pub fn iter(&self) -> impl Iterator<Item = (i32, i32, Option<&Material>)> + '_ {
        let width = self.width as usize;
        self.cells.iter().enumerate().map(move |(i, cell)| {
            ((i % width) as i32, (i / width) as i32, cell.as_ref())
        })
    }

    /// Tiles composited at duel cell `(x, y)`, bottom first. Empty when the
    /// cell touches no material or no rule finds a tile.
    pub fn tiles_on_duel_grid(&self, x: i32, y: i32) -> Vec<TileData> {
        let corners =
            duel_corners(x, y).map(|(_, cell)| cell.and_then(|(cx, cy)| self.get(cx, cy)));
        DuelCell::new(corners).composite()
    }

    /// First tile drawn at duel cell `(x, y)`, the one underneath the rest
    pub fn first_tile_on_duel_grid(&self, x: i32, y: i32) -> Option<Tile> {
        self.tiles_on_duel_grid(x, y)
            .into_iter()
            .next()
            .map(|data| data.tile)
    }

    /// Every duel cell with a non-empty composite, row-major
    pub fn duel_cells(&self) -> Vec<((i32, i32), Vec<TileData>)> {
        let Some(area) = self.full_duel_area() else {
            return Vec::new();
        };
        self.duel_cells_in(&area)
    }

    /// Duel cells with a non-empty composite inside `area`, row-major
    pub fn duel_cells_in(&self, area: &DuelArea) -> Vec<((i32, i32), Vec<TileData>)> {
        area.iter()
            .filter_map(|(x, y)| {
                let tiles = self.tiles_on_duel_grid(x, y);
                (!tiles.is_empty()).then_some(((x, y), tiles))
            })
            .collect()
    }

    /// Whole duel grid, `None` for a zero-sized map
    pub fn full_duel_area(&self) -> Option<DuelArea> {
        if self.width == 0 || self.height == 0 {
            return None;
        }
        Some(DuelArea {
            left: 0,
            top: 0,
            right: self.width as i32,
            bottom: self.height as i32,
        })
    }

    fn mark_dirty(&mut self, area: DuelArea) {
        self.dirty = Some(match self.dirty {
            Some(current) => current.union(&area),
            None => area,
        });
    }

    /// Duel cells touched since the last call
    pub fn dirty_area(&self) -> Option<DuelArea> {
        self.dirty
    }

    /// Return and reset the duel cells touched since the last call
    pub fn take_dirty_area(&mut self) -> Option<DuelArea> {
        self.dirty.take()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transform::Transformation;
    use rand::rngs::SmallRng;
    use rand::{Rng, SeedableRng};
    use std::sync::Arc;
    use tilemaker_core::{TileAlignment, TileRole, TileSource};

    fn tiles() -> Arc<dyn TileSource> {
        let brick = |name: &str, role: TileRole, alignment: TileAlignment| {
            Tile::new(name, 0, 0).with_material("Brick", role, alignment)
        };
        Arc::new(vec![
            brick("BrickCore", TileRole::MatCore, TileAlignment::Core),
            brick("BrickEdge", TileRole::MatEdge, TileAlignment::TopEdge),
            brick("BrickOuter", TileRole::MatOuterCorner, TileAlignment::TopLeftOuterCorner),
            brick("BrickInner", TileRole::MatInnerCorner, TileAlignment::TopLeftInnerCorner),
            brick("BrickDiagonal", TileRole::MatDiagonal, TileAlignment::DiagonalTopLeftToBottomRight),
            Tile::new("WoodPlank", 1, 0).with_material("Wood", TileRole::Singular, TileAlignment::Core),
        ])
    }

    fn brick() -> Material {
        Material::new("Brick", tiles())
    }

    fn names(tiles: &[TileData]) -> Vec<&str> {
        tiles.iter().map(|d| d.tile.name.as_str()).collect()
    }

    #[test]
    fn test_new_is_empty() {
        let map = MaterialTilemap::new(4, 3);
        assert_eq!((map.width(), map.height()), (4, 3));
        assert_eq!(map.iter().count(), 12);
        assert!(map.iter().all(|(_, _, m)| m.is_none()));
        assert!(map.dirty_area().is_none());
    }

    #[test]
    fn test_out_of_bounds_is_silent() {
        let mut map = MaterialTilemap::new(4, 4);
        for (x, y) in [(-1, 0), (0, -1), (4, 0), (0, 4), (i32::MIN, i32::MAX)] {
            assert!(!map.set(x, y, Some(brick())));
            assert!(map.get(x, y).is_none());
        }
        assert!(map.iter().all(|(_, _, m)| m.is_none()));
        assert!(map.take_dirty_area().is_none());
    }

    #[test]
    fn test_core_block() {
        let mut map = MaterialTilemap::new(4, 4);
        map.paint(&brick(), [(1, 1), (2, 1), (1, 2), (2, 2)]);

        let tiles = map.tiles_on_duel_grid(2, 2);
        assert_eq!(names(&tiles), ["BrickCore"]);
        assert_eq!(tiles[0].tile.material_name, "Brick");
        assert_eq!(tiles[0].transformation, Transformation::NONE);
    }

    #[test]
    fn test_top_pair_is_bottom_edge() {
        let mut map = MaterialTilemap::new(4, 4);
        map.paint(&brick(), [(1, 1), (2, 1)]);

        let tiles = map.tiles_on_duel_grid(2, 2);
        assert_eq!(names(&tiles), ["BrickEdge"]);
        assert_eq!(tiles[0].transformation, Transformation::FLIP_VERTICAL);
    }

    #[test]
    fn test_single_corner_is_outer_corner() {
        let mut map = MaterialTilemap::new(4, 4);
        map.paint(&brick(), [(1, 1)]);

        let tiles = map.tiles_on_duel_grid(2, 2);
        assert_eq!(names(&tiles), ["BrickOuter"]);
        assert_eq!(tiles[0].transformation, Transformation::NONE);
    }

    #[test]
    fn test_singular_only_material_emits_nothing() {
        let mut map = MaterialTilemap::new(4, 4);
        let wood = Material::new("Wood", tiles());
        map.paint(&wood, [(1, 1), (2, 2)]);
        assert!(map.tiles_on_duel_grid(2, 2).is_empty());
        assert!(map.first_tile_on_duel_grid(2, 2).is_none());
        assert!(map.duel_cells().is_empty());
    }

    #[test]
    fn test_duel_grid_reaches_past_the_map_edge() {
        let mut map = MaterialTilemap::new(2, 2);
        map.paint(&brick(), [(0, 0)]);
        // duel cells on the map border still see the cells inside it
        assert_eq!(names(&map.tiles_on_duel_grid(0, 0)), ["BrickOuter"]);
        assert_eq!(names(&map.tiles_on_duel_grid(1, 1)), ["BrickOuter"]);
        assert!(map.tiles_on_duel_grid(2, 2).is_empty());
        assert!(map.tiles_on_duel_grid(-5, 9).is_empty());
    }

    #[test]
    fn test_inner_corner_from_grid() {
        let mut map = MaterialTilemap::new(4, 4);
        map.paint(&brick(), [(1, 1), (2, 1), (1, 2)]);

        let tiles = map.tiles_on_duel_grid(2, 2);
        assert_eq!(names(&tiles), ["BrickInner"]);
        assert_eq!(tiles[0].transformation, Transformation::FLIP_BOTH);
    }

    #[test]
    fn test_diagonal_from_grid() {
        let mut map = MaterialTilemap::new(4, 4);
        map.paint(&brick(), [(2, 1), (1, 2)]);

        let tiles = map.tiles_on_duel_grid(2, 2);
        assert_eq!(names(&tiles), ["BrickDiagonal"]);
        assert_eq!(tiles[0].transformation, Transformation::FLIP_HORIZONTAL);
    }

    #[test]
    fn test_query_is_idempotent() {
        let mut map = MaterialTilemap::new(4, 4);
        map.paint(&brick(), [(1, 1), (2, 1), (2, 2)]);
        assert_eq!(map.tiles_on_duel_grid(2, 2), map.tiles_on_duel_grid(2, 2));
        assert_eq!(map.duel_cells(), map.duel_cells());
    }

    #[test]
    fn test_paint_counts_changes() {
        let mut map = MaterialTilemap::new(4, 4);
        let coords = [(0, 0), (1, 0), (9, 9), (-1, 2)];
        assert_eq!(map.paint(&brick(), coords), 2);
        assert_eq!(map.paint(&brick(), coords), 0);

        // same material in different casing is not a change
        let shouting = Material::new("BRICK", tiles());
        assert_eq!(map.paint(&shouting, [(0, 0)]), 0);

        assert_eq!(map.erase([(0, 0), (3, 3)]), 1);
        assert!(map.get(0, 0).is_none());
        assert_eq!(map.get(1, 0), Some(&brick()));
    }

    #[test]
    fn test_clear() {
        let mut map = MaterialTilemap::new(3, 3);
        map.clear();
        assert!(map.take_dirty_area().is_none());

        map.paint(&brick(), [(1, 1)]);
        map.take_dirty_area();
        map.clear();
        assert!(map.get(1, 1).is_none());
        assert_eq!(map.take_dirty_area(), map.full_duel_area());
    }

    #[test]
    fn test_dirty_area_accumulates() {
        let mut map = MaterialTilemap::new(8, 8);
        map.paint(&brick(), [(1, 1)]);
        assert_eq!(
            map.dirty_area(),
            Some(DuelArea {
                left: 1,
                top: 1,
                right: 2,
                bottom: 2
            })
        );

        map.paint(&brick(), [(4, 2)]);
        let area = map.take_dirty_area().unwrap();
        assert_eq!((area.left, area.top, area.right, area.bottom), (1, 1, 5, 3));
        assert_eq!((area.width(), area.height()), (5, 3));
        assert!(map.take_dirty_area().is_none());
    }

    #[test]
    fn test_dirty_area_covers_changed_duel_cells() {
        let mut rng = SmallRng::seed_from_u64(7);
        let mut map = MaterialTilemap::new(6, 6);
        let material = brick();

        for _ in 0..50 {
            let before: Vec<_> = (0..=6)
                .flat_map(|y| (0..=6).map(move |x| (x, y)))
                .map(|(x, y)| map.tiles_on_duel_grid(x, y))
                .collect();
            map.take_dirty_area();

            let (x, y) = (rng.gen_range(0..6), rng.gen_range(0..6));
            if rng.gen_bool(0.5) {
                map.paint(&material, [(x, y)]);
            } else {
                map.erase([(x, y)]);
            }

            let dirty = map.take_dirty_area();
            for (i, old) in before.into_iter().enumerate() {
                let (dx, dy) = ((i % 7) as i32, (i / 7) as i32);
                if map.tiles_on_duel_grid(dx, dy) != old {
                    assert!(dirty.is_some_and(|a| a.contains(dx, dy)), "({dx}, {dy})");
                }
            }
        }
    }

    #[test]
    fn test_duel_corners_convention() {
        let corners = duel_corners(2, 2);
        assert_eq!(corners[0], (Corner::TopLeft, Some((1, 1))));
        assert_eq!(corners[1], (Corner::TopRight, Some((2, 1))));
        assert_eq!(corners[2], (Corner::BottomLeft, Some((1, 2))));
        assert_eq!(corners[3], (Corner::BottomRight, Some((2, 2))));

        let corners = duel_corners(i32::MIN, 0);
        assert_eq!(corners[0].1, None);
        assert_eq!(corners[1].1, Some((i32::MIN, -1)));
    }

    #[test]
    fn test_duel_queries_at_extreme_coordinates() {
        let mut map = MaterialTilemap::new(4, 4);
        map.paint(&brick(), [(0, 0), (3, 3)]);
        for (x, y) in [
            (i32::MIN, 0),
            (0, i32::MIN),
            (i32::MIN, i32::MIN),
            (i32::MAX, i32::MAX),
        ] {
            assert!(map.tiles_on_duel_grid(x, y).is_empty(), "({x}, {y})");
            assert!(map.first_tile_on_duel_grid(x, y).is_none());
        }
        let area = DuelArea {
            left: i32::MIN,
            top: 0,
            right: i32::MIN + 1,
            bottom: 0,
        };
        assert!(map.duel_cells_in(&area).is_empty());
    }

    #[test]
    fn test_duel_cells_row_major() {
        let mut map = MaterialTilemap::new(3, 3);
        map.paint(&brick(), [(1, 1)]);
        let cells: Vec<_> = map.duel_cells().into_iter().map(|(pos, _)| pos).collect();
        assert_eq!(cells, [(1, 1), (2, 1), (1, 2), (2, 2)]);
        assert_eq!(map.first_tile_on_duel_grid(2, 2).unwrap().name, "BrickOuter");
    }
}
