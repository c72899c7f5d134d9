//! Preview layout used to show a material in context

use crate::material::Material;
use crate::tilemap::MaterialTilemap;
use crate::AutotileError;

/// Smallest grid side that fits [`SAMPLE_LAYOUT`]
pub const MIN_SAMPLE_SIZE: u32 = 8;

/// Cells painted by [`MaterialTilemap::paint_sample`]: solid blocks, notches,
/// lone cells and straight runs.
pub const SAMPLE_LAYOUT: [(i32, i32); 17] = [
    (0, 0),
    (2, 0),
    (0, 1),
    (1, 1),
    (2, 1),
    (3, 1),
    (5, 1),
    (6, 1),
    (7, 1),
    (2, 2),
    (3, 2),
    (6, 2),
    (6, 3),
    (2, 4),
    (3, 4),
    (2, 5),
    (3, 5),
];

impl MaterialTilemap {
    /// Paint the preview layout with `material`. Returns the number of cells
    /// changed.
    pub fn paint_sample(&mut self, material: &Material) -> Result<usize, AutotileError> {
        if self.width() < MIN_SAMPLE_SIZE || self.height() < MIN_SAMPLE_SIZE {
            return Err(AutotileError::GridTooSmall {
                width: self.width(),
                height: self.height(),
                min: MIN_SAMPLE_SIZE,
            });
        }
        Ok(self.paint(material, SAMPLE_LAYOUT))
    }
}
