// Per-tile attribute storage for one region: 4 layers of 64×64 tiles in a
// single flat allocation, indexed layer-major then x then y.

use serde::Serialize;

use super::{LAYERS, REGION_SIZE};

const TILES: usize = LAYERS * REGION_SIZE * REGION_SIZE;

/// One attribute for every tile of a region.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct LayerGrid<T> {
    cells: Vec<T>,
}

impl<T: Copy + Default> Default for LayerGrid<T> {
    fn default() -> Self {
        Self {
            cells: vec![T::default(); TILES],
        }
    }
}

#[inline]
fn index(layer: usize, x: usize, y: usize) -> usize {
    debug_assert!(layer < LAYERS && x < REGION_SIZE && y < REGION_SIZE);
    (layer * REGION_SIZE + x) * REGION_SIZE + y
}

impl<T: Copy> LayerGrid<T> {
    /// Value at `(layer, x, y)`.
    ///
    /// # Panics
    /// Panics if any coordinate is out of range.
    #[inline]
    pub fn get(&self, layer: usize, x: usize, y: usize) -> T {
        self.cells[index(layer, x, y)]
    }

    #[inline]
    pub fn set(&mut self, layer: usize, x: usize, y: usize, value: T) {
        self.cells[index(layer, x, y)] = value;
    }

    /// The 64×64 tiles of one layer, x-major.
    pub fn layer(&self, layer: usize) -> &[T] {
        let start = index(layer, 0, 0);
        &self.cells[start..start + REGION_SIZE * REGION_SIZE]
    }

    pub fn iter(&self) -> impl Iterator<Item = T> + '_ {
        self.cells.iter().copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cells_are_independent() {
        let mut grid = LayerGrid::<i32>::default();
        grid.set(3, 63, 63, 7);
        grid.set(0, 1, 0, -1);
        assert_eq!(grid.get(3, 63, 63), 7);
        assert_eq!(grid.get(0, 1, 0), -1);
        assert_eq!(grid.get(0, 0, 1), 0);
        assert_eq!(grid.iter().filter(|&v| v != 0).count(), 2);
    }

    #[test]
    fn layer_slice() {
        let mut grid = LayerGrid::<u8>::default();
        grid.set(2, 0, 5, 9);
        let layer = grid.layer(2);
        assert_eq!(layer.len(), REGION_SIZE * REGION_SIZE);
        assert_eq!(layer[5], 9);
        assert!(grid.layer(1).iter().all(|&v| v == 0));
    }
}
