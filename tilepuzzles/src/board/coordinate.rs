use enumflags2::BitFlags;

/// The coordinates of a single tile slot on a puzzle grid.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct Coordinate {
    /// Column of the cell, counted from the left.
    pub x: usize,
    /// Row of the cell, counted from the top.
    pub y: usize,
}

impl Coordinate {
    /// Construct a [`Coordinate`] from the given `x` and `y`.
    pub fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }
}

impl From<(usize, usize)> for Coordinate {
    /// Construct a [`Coordinate`] from the given `(x, y)` pair.
    fn from((x, y): (usize, usize)) -> Self {
        Self::new(x, y)
    }
}

impl From<Coordinate> for (usize, usize) {
    /// Convert the [`Coordinate`] into an `(x, y)` pair.
    fn from(coord: Coordinate) -> Self {
        (coord.x, coord.y)
    }
}

/// One of the four orthogonal directions on the grid. Sets of directions are passed
/// around as `BitFlags<Direction>`.
#[derive(BitFlags, Debug, Copy, Clone, Eq, PartialEq, Hash)]
#[repr(u8)]
pub enum Direction {
    /// Toward row 0.
    Up = 0b0001,
    /// Toward the last row.
    Down = 0b0010,
    /// Toward column 0.
    Left = 0b0100,
    /// Toward the last column.
    Right = 0b1000,
}

impl Direction {
    /// All directions, in the order neighbors are visited.
    pub const ALL: &'static [Direction] = &[
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    /// Get the direction pointing the other way.
    pub fn opposite(self) -> Self {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }
}
