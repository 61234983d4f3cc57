// Spatial hash grid for neighbour lookups during grouping.
//
// Instead of comparing every point against every other point, points are
// bucketed into square cells. A box query only visits the cells the box
// touches.

use std::collections::HashMap;

use crate::feature::Coordinate;

/// A spatial hash grid of point indices.
#[derive(Debug, Clone)]
pub struct PointGrid {
    /// Size of each cell in map units.
    cell_size: f64,
    /// Map from cell coordinates to indices of points inside that cell.
    cells: HashMap<(i64, i64), Vec<usize>>,
}

impl PointGrid {
    /// Create a grid with the given cell size. Non-positive sizes fall back to 1.
    pub fn new(cell_size: f64) -> Self {
        let cell_size = if cell_size.is_finite() && cell_size > 0.0 { cell_size } else { 1.0 };
        Self {
            cell_size,
            cells: HashMap::new(),
        }
    }

    fn cell_of(&self, c: Coordinate) -> (i64, i64) {
        // `as` saturates for coordinates far outside the i64 range
        ((c.x / self.cell_size).floor() as i64, (c.y / self.cell_size).floor() as i64)
    }

    /// Insert a point under `index`.
    pub fn insert(&mut self, index: usize, c: Coordinate) {
        let cell = self.cell_of(c);
        self.cells.entry(cell).or_default().push(index);
    }

    /// Indices of points that might lie in the box `center ± half_extent`.
    /// May include false positives; the caller does the exact check.
    /// Returned in ascending index order.
    pub fn query(&self, center: Coordinate, half_extent: f64) -> Vec<usize> {
        let (min_x, min_y) = self.cell_of(center.offset(-half_extent, -half_extent));
        let (max_x, max_y) = self.cell_of(center.offset(half_extent, half_extent));

        let mut result = Vec::new();
        if cell_span(min_x, max_x).saturating_mul(cell_span(min_y, max_y)) > self.cells.len() as u128 {
            // Box covers more cells than are occupied: scan the occupied ones
            for (&(cx, cy), indices) in &self.cells {
                if (min_x..=max_x).contains(&cx) && (min_y..=max_y).contains(&cy) {
                    result.extend_from_slice(indices);
                }
            }
        } else {
            for cx in min_x..=max_x {
                for cy in min_y..=max_y {
                    if let Some(indices) = self.cells.get(&(cx, cy)) {
                        result.extend_from_slice(indices);
                    }
                }
            }
        }
        // Each point lives in exactly one cell, so no dedupe is needed
        result.sort_unstable();
        result
    }
}

/// Number of cells in `min..=max`, zero for an empty range.
fn cell_span(min: i64, max: i64) -> u128 {
    (i128::from(max) - i128::from(min) + 1).max(0) as u128
}
