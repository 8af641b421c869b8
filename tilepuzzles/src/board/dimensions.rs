//! Implements the rectangular grid that both puzzles are played on.
use std::borrow::Borrow;

use enumflags2::BitFlags;

use crate::board::{Coordinate, Direction};

/// Dimensions of a rectangular puzzle grid. Cells are linearized in row-major order, so
/// index `i` is the cell at `(i % width, i / width)`.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct GridDimensions {
    /// Number of columns. This cooresponds to the `x` [`Coordinate`].
    width: usize,
    /// Number of rows. This cooresponds to the `y` [`Coordinate`].
    height: usize,
}

impl GridDimensions {
    /// Create new [`GridDimensions`] with the specified width and height.
    /// Panics if `width * height` exceeds `usize::max_value()` or if `width` or `height` is 0.
    pub fn new(width: usize, height: usize) -> Self {
        match Self::try_new(width, height) {
            Some(dim) => dim,
            None => {
                if width == 0 || height == 0 {
                    panic!("GridDimensions must be nonzero, got {}x{}", width, height);
                } else {
                    panic!(
                        "GridDimensions too large: {} * {} > {}",
                        width,
                        height,
                        usize::max_value()
                    );
                }
            }
        }
    }

    /// Create new [`GridDimensions`] with the specified width and height.
    /// Returns `None` if `width * height` exceeds `usize::max_value()` or if `width` or
    /// `height` is 0.
    pub fn try_new(width: usize, height: usize) -> Option<Self> {
        if width == 0 || height == 0 {
            None
        } else {
            width.checked_mul(height).map(|_| Self { width, height })
        }
    }

    /// Get the number of columns.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Get the number of rows.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Total number of cells in the grid.
    pub fn total_size(&self) -> usize {
        self.width * self.height
    }

    /// Convert a coordinate to a linear index.
    /// Returns `None` if the coordinate is out of bounds.
    pub fn try_linearize(&self, coord: &Coordinate) -> Option<usize> {
        self.check_bounds(coord)
            .map(|coord| coord.y * self.width + coord.x)
    }

    /// Convert a coordinate to a linear index.
    /// Panics if the coordinate is out of bounds.
    pub fn linearize(&self, coord: &Coordinate) -> usize {
        match self.try_linearize(coord) {
            Some(v) => v,
            None => panic!("{:?} is out of bounds for {:?}", coord, self),
        }
    }

    /// Convert a linear index back into a [`Coordinate`]. The index is not checked.
    pub fn un_linearize(&self, idx: usize) -> Coordinate {
        Coordinate {
            x: idx % self.width,
            y: idx / self.width,
        }
    }

    /// Get the cell one step from `coord` in the given direction, or `None` if that
    /// would leave the grid.
    pub fn step(&self, coord: Coordinate, dir: Direction) -> Option<Coordinate> {
        self.check_bounds(coord)?;
        match dir {
            Direction::Up => coord.y.checked_sub(1).map(|y| Coordinate::new(coord.x, y)),
            Direction::Down => Some(coord.y + 1)
                .filter(|&y| y < self.height)
                .map(|y| Coordinate::new(coord.x, y)),
            Direction::Left => coord.x.checked_sub(1).map(|x| Coordinate::new(x, coord.y)),
            Direction::Right => Some(coord.x + 1)
                .filter(|&x| x < self.width)
                .map(|x| Coordinate::new(x, coord.y)),
        }
    }

    /// Set of directions in which `coord` has a neighbor.
    pub fn open_directions(&self, coord: Coordinate) -> BitFlags<Direction> {
        let mut open = BitFlags::empty();
        for &dir in Direction::ALL {
            if self.step(coord, dir).is_some() {
                open.insert(dir);
            }
        }
        open
    }

    /// Iterate the orthogonal neighbors of the given coordinate. Out-of-bounds
    /// coordinates have no neighbors.
    pub fn neighbors(&self, coord: Coordinate) -> Neighbors {
        Neighbors {
            dim: *self,
            coord,
            next: 0,
        }
    }

    /// Get an iterator over rows of this grid. Each row is an iterator over the coordinates of
    /// that row.
    pub fn iter_coordinates(&self) -> impl Iterator<Item = impl Iterator<Item = Coordinate>> {
        let width = self.width;
        (0..self.height).map(move |y| (0..width).map(move |x| Coordinate { x, y }))
    }

    /// Check if the given [`Coordinate`] is in bounds. If so, return it, otherwise return
    /// `None`.
    #[inline]
    fn check_bounds<B: Borrow<Coordinate>>(&self, coord: B) -> Option<B> {
        let c = coord.borrow();
        if c.x < self.width && c.y < self.height {
            Some(coord)
        } else {
            None
        }
    }
}

/// Iterator over the neighbors of a coordinate, visited in [`Direction::ALL`] order.
pub struct Neighbors {
    dim: GridDimensions,
    coord: Coordinate,
    next: usize,
}

impl Iterator for Neighbors {
    type Item = Coordinate;

    fn next(&mut self) -> Option<Coordinate> {
        while let Some(&dir) = Direction::ALL.get(self.next) {
            self.next += 1;
            if let Some(coord) = self.dim.step(self.coord, dir) {
                return Some(coord);
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn linearize_is_row_major() {
        let dim = GridDimensions::new(6, 4);
        assert_eq!(dim.total_size(), 24);
        assert_eq!(dim.try_linearize(&Coordinate::new(5, 0)), Some(5));
        assert_eq!(dim.try_linearize(&Coordinate::new(0, 1)), Some(6));
        assert_eq!(dim.try_linearize(&Coordinate::new(6, 0)), None);
        assert_eq!(dim.un_linearize(23), Coordinate::new(5, 3));
    }

    #[test]
    fn rejects_empty_and_overflowing() {
        assert!(GridDimensions::try_new(0, 3).is_none());
        assert!(GridDimensions::try_new(3, 0).is_none());
        assert!(GridDimensions::try_new(usize::max_value(), 2).is_none());
    }

    #[test]
    fn neighbors_stop_at_edges() {
        let dim = GridDimensions::new(4, 4);
        let corner: Vec<_> = dim.neighbors(Coordinate::new(0, 0)).collect();
        assert_eq!(corner, vec![Coordinate::new(0, 1), Coordinate::new(1, 0)]);

        let middle: Vec<_> = dim.neighbors(Coordinate::new(1, 2)).collect();
        assert_eq!(
            middle,
            vec![
                Coordinate::new(1, 1),
                Coordinate::new(1, 3),
                Coordinate::new(0, 2),
                Coordinate::new(2, 2),
            ]
        );

        assert_eq!(dim.neighbors(Coordinate::new(4, 0)).count(), 0);
    }

    #[test]
    fn open_directions_on_corner() {
        let dim = GridDimensions::new(4, 4);
        let open = dim.open_directions(Coordinate::new(3, 3));
        assert!(open.contains(Direction::Up));
        assert!(open.contains(Direction::Left));
        assert!(!open.contains(Direction::Down));
        assert!(!open.contains(Direction::Right));
    }

    #[test]
    fn rows_of_coordinates_follow_linear_order() {
        let dim = GridDimensions::new(3, 2);
        let rows: Vec<Vec<usize>> = dim
            .iter_coordinates()
            .map(|row| row.map(|c| dim.linearize(&c)).collect())
            .collect();
        assert_eq!(rows, vec![vec![0, 1, 2], vec![3, 4, 5]]);
    }
}
