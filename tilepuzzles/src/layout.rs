//! Fits a puzzle grid onto a drawing surface and maps surface points back to tiles.
//!
//! A puzzle offers one or more [`Arrangement`]s (column x row shapes for the same tiles).
//! The arrangement whose padded aspect ratio is closest to the surface's wins, and tiles
//! are square with a one-tile border split evenly around the grid.
use once_cell::sync::Lazy;

use crate::board::{Coordinate, GridDimensions};

/// A column x row shape for the tiles, with its padded aspect ratio
/// `(width + 1) / (height + 1)`.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Arrangement {
    dim: GridDimensions,
    ratio: f64,
}

impl Arrangement {
    pub fn new(dim: GridDimensions) -> Self {
        let ratio = (dim.width() + 1) as f64 / (dim.height() + 1) as f64;
        Self { dim, ratio }
    }

    pub fn dimensions(&self) -> GridDimensions {
        self.dim
    }

    pub fn ratio(&self) -> f64 {
        self.ratio
    }
}

/// Shapes the 24 memory tiles can be laid out in, sorted by ratio.
pub static MEMORY_ARRANGEMENTS: Lazy<Vec<Arrangement>> = Lazy::new(|| {
    [(3, 8), (4, 6), (6, 4), (8, 3), (12, 2), (24, 1)]
        .iter()
        .map(|&(w, h)| Arrangement::new(GridDimensions::new(w, h)))
        .collect()
});

/// Circular hit area of the restart control in the top-right corner.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct RestartButton {
    pub x: f64,
    pub y: f64,
    pub radius: f64,
}

impl RestartButton {
    /// Strict containment: points on the rim miss.
    pub fn contains(&self, x: f64, y: f64) -> bool {
        let (dx, dy) = (x - self.x, y - self.y);
        dx * dx + dy * dy < self.radius * self.radius
    }
}

/// Placement of the grid on a surface of a given size.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Layout {
    /// Chosen grid shape.
    pub grid: GridDimensions,
    /// Surface size.
    pub width: f64,
    pub height: f64,
    /// Side length of one tile.
    pub tile_dim: f64,
    /// Top-left corner of the grid.
    pub offset_x: f64,
    pub offset_y: f64,
    pub restart: RestartButton,
}

impl Layout {
    /// Lay out a grid on a `width` x `height` surface using the best-fitting arrangement.
    /// `arrangements` must be non-empty and sorted by ratio.
    pub fn compute(arrangements: &[Arrangement], width: f64, height: f64) -> Self {
        let grid = Self::choose(arrangements, width / height);
        let tile_dim = f64::min(
            width / (grid.width() + 1) as f64,
            height / (grid.height() + 1) as f64,
        );
        Self {
            grid,
            width,
            height,
            tile_dim,
            offset_x: (width - grid.width() as f64 * tile_dim) / 2.0,
            offset_y: (height - grid.height() as f64 * tile_dim) / 2.0,
            restart: RestartButton {
                x: width - tile_dim / 4.0,
                y: tile_dim / 4.0,
                radius: tile_dim / 7.0,
            },
        }
    }

    /// Binary search for the pair of arrangements around `ratio`, then take the nearer
    /// one. Ties go to the wider arrangement.
    fn choose(arrangements: &[Arrangement], ratio: f64) -> GridDimensions {
        assert!(!arrangements.is_empty(), "no arrangements to choose from");
        let (mut lo, mut hi) = (0, arrangements.len() - 1);
        while hi > lo + 1 {
            let mid = (lo + hi) / 2;
            if ratio > arrangements[mid].ratio {
                lo = mid;
            } else {
                hi = mid;
            }
        }
        if ratio - arrangements[lo].ratio < arrangements[hi].ratio - ratio {
            arrangements[lo].dim
        } else {
            arrangements[hi].dim
        }
    }

    /// Index of the tile under a surface point, if any.
    pub fn tile_at(&self, x: f64, y: f64) -> Option<usize> {
        let col = ((x - self.offset_x) / self.tile_dim).floor();
        let row = ((y - self.offset_y) / self.tile_dim).floor();
        if !(col >= 0.0 && row >= 0.0) {
            return None;
        }
        self.grid
            .try_linearize(&Coordinate::new(col as usize, row as usize))
    }

    /// Whether a surface point hits the restart control.
    pub fn hits_restart(&self, x: f64, y: f64) -> bool {
        self.restart.contains(x, y)
    }

    /// Top-left corner of the tile at `index`.
    pub fn tile_origin(&self, index: usize) -> (f64, f64) {
        let coord = self.grid.un_linearize(index);
        (
            coord.x as f64 * self.tile_dim + self.offset_x,
            coord.y as f64 * self.tile_dim + self.offset_y,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chosen(width: f64, height: f64) -> (usize, usize) {
        let grid = Layout::compute(&MEMORY_ARRANGEMENTS, width, height).grid;
        (grid.width(), grid.height())
    }

    #[test]
    fn picks_nearest_arrangement() {
        assert_eq!(chosen(800.0, 600.0), (6, 4));
        assert_eq!(chosen(600.0, 800.0), (4, 6));
        assert_eq!(chosen(300.0, 900.0), (3, 8));
        assert_eq!(chosen(1600.0, 400.0), (12, 2));
        assert_eq!(chosen(4000.0, 100.0), (24, 1));
        assert_eq!(chosen(100.0, 4000.0), (3, 8));
    }

    #[test]
    fn square_surface_takes_nearer_ratio() {
        // 1.0 is closer to 5/7 than to 7/5.
        assert_eq!(chosen(500.0, 500.0), (4, 6));
        // An exact ratio match wins outright.
        assert_eq!(chosen(700.0, 500.0), (6, 4));
    }

    #[test]
    fn geometry_for_landscape_surface() {
        let layout = Layout::compute(&MEMORY_ARRANGEMENTS, 700.0, 500.0);
        assert_eq!(layout.grid, GridDimensions::new(6, 4));
        assert_eq!(layout.tile_dim, 100.0);
        assert_eq!(layout.offset_x, 50.0);
        assert_eq!(layout.offset_y, 50.0);
        assert_eq!(layout.tile_origin(7), (150.0, 150.0));
        assert_eq!(layout.restart.x, 675.0);
        assert_eq!(layout.restart.y, 25.0);
    }

    #[test]
    fn hit_testing() {
        let layout = Layout::compute(&MEMORY_ARRANGEMENTS, 700.0, 500.0);
        assert_eq!(layout.tile_at(50.0, 50.0), Some(0));
        assert_eq!(layout.tile_at(649.9, 449.9), Some(23));
        assert_eq!(layout.tile_at(160.0, 260.0), Some(13));
        assert_eq!(layout.tile_at(49.0, 60.0), None);
        assert_eq!(layout.tile_at(650.0, 60.0), None);
        assert_eq!(layout.tile_at(60.0, 450.0), None);

        assert!(layout.hits_restart(675.0, 25.0));
        assert!(layout.hits_restart(680.0, 30.0));
        assert!(!layout.hits_restart(690.0, 25.0));
    }

    #[test]
    fn single_arrangement_is_always_used() {
        let square = [Arrangement::new(GridDimensions::new(4, 4))];
        let layout = Layout::compute(&square, 1000.0, 250.0);
        assert_eq!(layout.grid, GridDimensions::new(4, 4));
        assert_eq!(layout.tile_dim, 50.0);
        assert_eq!(layout.offset_x, 400.0);
    }
}
