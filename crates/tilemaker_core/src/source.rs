//! Tile sources: read-only snapshot providers
//!
//! Materials never own tile data. They hold a shared [`TileSource`] and ask it
//! for a fresh snapshot on every query, so edits made by the owner of the
//! tiles show up on the next query without any cache to invalidate.

use crate::tile::Tile;
use std::sync::{Arc, RwLock};

/// Supplies a point-in-time snapshot of every tile in the project
pub trait TileSource: Send + Sync {
    /// A snapshot valid for the duration of one logical query
    fn snapshot(&self) -> Arc<[Tile]>;
}

impl TileSource for Arc<[Tile]> {
    fn snapshot(&self) -> Arc<[Tile]> {
        Arc::clone(self)
    }
}

/// Copies the whole list on every snapshot. Fine for fixtures and small
/// sets; long-lived sources should be an `Arc<[Tile]>` or [`SharedTileSet`].
impl TileSource for Vec<Tile> {
    fn snapshot(&self) -> Arc<[Tile]> {
        Arc::from(self.as_slice())
    }
}

/// Adapts a closure into a [`TileSource`]
pub struct FnSource<F>(pub F);

impl<F> TileSource for FnSource<F>
where
    F: Fn() -> Arc<[Tile]> + Send + Sync,
{
    fn snapshot(&self) -> Arc<[Tile]> {
        (self.0)()
    }
}

/// Owner-side tile store that hands out cheap snapshots.
///
/// Every mutation publishes a new snapshot; readers holding an older one keep
/// seeing a consistent view. Tiles are kept in sheet reading order.
#[derive(Debug)]
pub struct SharedTileSet {
    current: RwLock<Arc<[Tile]>>,
}

impl Default for SharedTileSet {
    fn default() -> Self {
        Self {
            current: RwLock::new(Arc::from(Vec::new())),
        }
    }
}

impl SharedTileSet {
    pub fn new(tiles: Vec<Tile>) -> Self {
        let set = Self::default();
        set.replace(tiles);
        set
    }

    /// Number of tiles in the current snapshot
    pub fn len(&self) -> usize {
        self.snapshot().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Replace all tiles
    pub fn replace(&self, mut tiles: Vec<Tile>) {
        tiles.sort_by_key(Tile::position);
        let snapshot: Arc<[Tile]> = Arc::from(tiles);
        match self.current.write() {
            Ok(mut guard) => *guard = snapshot,
            Err(poisoned) => *poisoned.into_inner() = snapshot,
        }
    }

    /// Edit the tiles and publish the result as the new snapshot
    pub fn update<R>(&self, edit: impl FnOnce(&mut Vec<Tile>) -> R) -> R {
        let mut tiles = self.snapshot().to_vec();
        let result = edit(&mut tiles);
        tracing::debug!("Publishing tile snapshot with {} tiles", tiles.len());
        self.replace(tiles);
        result
    }

    /// Add a tile, replacing any tile at the same sheet position
    pub fn insert(&self, tile: Tile) {
        self.update(|tiles| {
            tiles.retain(|t| t.position() != tile.position());
            tiles.push(tile);
        });
    }

    /// Remove the tile at a sheet position
    pub fn remove_at(&self, row: i32, column: i32) -> Option<Tile> {
        self.update(|tiles| {
            let index = tiles.iter().position(|t| t.position() == (row, column))?;
            Some(tiles.remove(index))
        })
    }

    /// Tile at a sheet position in the current snapshot
    pub fn get_at(&self, row: i32, column: i32) -> Option<Tile> {
        self.snapshot()
            .iter()
            .find(|t| t.position() == (row, column))
            .cloned()
    }
}

impl TileSource for SharedTileSet {
    fn snapshot(&self) -> Arc<[Tile]> {
        match self.current.read() {
            Ok(guard) => Arc::clone(&guard),
            Err(poisoned) => Arc::clone(&poisoned.into_inner()),
        }
    }
}
