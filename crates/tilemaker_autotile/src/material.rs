//! Materials: named groups of tiles resolved by role and alignment

use crate::transform::Transformation;
use std::collections::HashSet;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;
use tilemaker_core::{Tile, TileAlignment, TileRole, TileSource};

/// A resolved tile and how to present it at one duel-grid position
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TileData {
    pub tile: Tile,
    pub transformation: Transformation,
}

/// Case-insensitive material name comparison
pub fn names_match(a: &str, b: &str) -> bool {
    if a.is_ascii() && b.is_ascii() {
        return a.eq_ignore_ascii_case(b);
    }
    a.chars()
        .flat_map(char::to_lowercase)
        .eq(b.chars().flat_map(char::to_lowercase))
}

/// Per-character lowercase, the key behind [`names_match`] and `Hash`
fn fold_case(name: &str) -> String {
    name.chars().flat_map(char::to_lowercase).collect()
}

/// Highest priority wins, the earliest tile wins a tie
fn highest_priority<'a>(best: Option<&'a Tile>, tile: &'a Tile) -> Option<&'a Tile> {
    match best {
        Some(b) if b.priority >= tile.priority => Some(b),
        _ => Some(tile),
    }
}

/// A read-through view of every tile tagged with one material name.
///
/// The material keeps no tile data of its own: each query takes a fresh
/// snapshot from the shared [`TileSource`]. Cloning is cheap, so grids hold
/// materials by value.
#[derive(Clone)]
pub struct Material {
    name: String,
    source: Arc<dyn TileSource>,
}

impl Material {
    pub fn new(name: impl Into<String>, source: Arc<dyn TileSource>) -> Self {
        Self {
            name: name.into(),
            source,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn source(&self) -> &Arc<dyn TileSource> {
        &self.source
    }

    fn contains(&self, tile: &Tile) -> bool {
        names_match(&tile.material_name, &self.name)
    }

    /// Tiles of this material in the current snapshot
    pub fn tiles(&self) -> Vec<Tile> {
        self.source
            .snapshot()
            .iter()
            .filter(|t| self.contains(t))
            .cloned()
            .collect()
    }

    /// Best tile of `role`, preferring `preferred_alignment`.
    ///
    /// Among tiles with the preferred alignment the highest priority wins;
    /// without any, the highest priority tile of the role is used regardless
    /// of alignment.
    pub fn get_tile(&self, role: TileRole, preferred_alignment: TileAlignment) -> Option<Tile> {
        let snapshot = self.source.snapshot();
        let mut best_aligned: Option<&Tile> = None;
        let mut best_any: Option<&Tile> = None;

        for tile in snapshot.iter().filter(|t| t.role == role && self.contains(t)) {
            if tile.alignment == preferred_alignment {
                best_aligned = highest_priority(best_aligned, tile);
            }
            best_any = highest_priority(best_any, tile);
        }

        best_aligned.or(best_any).cloned()
    }

    pub fn has_tile_role(&self, role: TileRole) -> bool {
        self.source
            .snapshot()
            .iter()
            .any(|t| t.role == role && self.contains(t))
    }

    /// Resolve a tile of `role` and the transformation that presents it at
    /// `target_alignment`
    pub fn try_get_tile_data(
        &self,
        role: TileRole,
        target_alignment: TileAlignment,
    ) -> Option<TileData> {
        let tile = self.get_tile(role, target_alignment)?;
        let transformation = Transformation::for_alignment(tile.alignment, target_alignment);
        Some(TileData {
            tile,
            transformation,
        })
    }

    /// One material per distinct non-empty material name, compared
    /// case-insensitively. The first casing seen names the material.
    pub fn all_from(source: Arc<dyn TileSource>) -> Vec<Material> {
        let mut seen = HashSet::new();
        let mut materials = Vec::new();

        for tile in source.snapshot().iter() {
            if !tile.has_material() {
                continue;
            }
            if seen.insert(fold_case(&tile.material_name)) {
                materials.push(Material::new(tile.material_name.clone(), Arc::clone(&source)));
            }
        }

        tracing::debug!("Collected {} materials", materials.len());
        materials
    }
}

impl PartialEq for Material {
    fn eq(&self, other: &Self) -> bool {
        names_match(&self.name, &other.name)
    }
}

impl Eq for Material {}

impl Hash for Material {
    fn hash<H: Hasher>(&self, state: &mut H) {
        fold_case(&self.name).hash(state);
    }
}

impl fmt::Debug for Material {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Material").field("name", &self.name).finish()
    }
}

impl fmt::Display for Material {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}
