//! The sliding puzzle: numbered tiles on a rectangular board with one empty cell. The
//! classic 15-puzzle is the default 4x4 board. Solved when the tiles read in order with
//! the blank in the last cell.
use std::{convert::TryFrom, num::NonZeroU32, time::Instant};

use enumflags2::BitFlags;
use thiserror::Error;
use tracing::{debug, info};

use crate::{
    board::{Coordinate, Direction, GridDimensions},
    score::{Score, Stopwatch},
};

/// Board shape of the classic 15-puzzle.
pub const CLASSIC: (usize, usize) = (4, 4);

/// Most cells a board may have. Solvability checks are quadratic in the cell count.
pub const MAX_CELLS: usize = 64 * 64;

/// Reason a slide was rejected.
#[derive(Debug, Error, Copy, Clone, Eq, PartialEq)]
pub enum CannotSlideReason {
    /// The index does not name a cell.
    #[error("no cell at that position")]
    OutOfBounds,
    /// The selected cell is the blank itself.
    #[error("that cell is empty")]
    Blank,
    /// The selected tile shares neither a row nor a column with the blank.
    #[error("that tile is not in line with the empty cell")]
    NotAligned,
    /// No tile sits on that side of the blank.
    #[error("no tile can move that way")]
    Blocked,
    /// The puzzle is already solved.
    #[error("the puzzle is already solved")]
    AlreadySolved,
}

/// Error building a board from a fixed arrangement.
#[derive(Debug, Error, Clone, Eq, PartialEq)]
pub enum ArrangementError {
    #[error("board must be at least 2 cells in each direction, got {0}x{1}")]
    BadDimensions(usize, usize),
    #[error("board of {0}x{1} is larger than {max} cells", max = MAX_CELLS)]
    TooLarge(usize, usize),
    #[error("expected {expected} cells, got {actual}")]
    WrongCount { expected: usize, actual: usize },
    #[error("cells are not a permutation of the tiles and one blank")]
    NotPermutation,
    #[error("arrangement cannot be solved")]
    Unsolvable,
}

/// Outcome of a successful slide.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum SlideOutcome {
    /// The given number of tiles moved one cell each.
    Moved(u32),
    /// The move completed the puzzle.
    Complete(Score),
}

/// State of one sliding puzzle. Cells hold `None` for the blank.
#[derive(Debug, Clone)]
pub struct Game {
    dim: GridDimensions,
    cells: Box<[Option<NonZeroU32>]>,
    blank: usize,
    moves: u32,
    watch: Stopwatch,
}

impl Game {
    /// Build a board from a row-major arrangement where `0` marks the blank. The cells
    /// must hold `1..width*height` plus one blank, in a solvable order.
    pub fn from_tiles(width: usize, height: usize, tiles: &[u32]) -> Result<Self, ArrangementError> {
        let dim = Self::check_size(width, height)?;
        if tiles.len() != dim.total_size() {
            return Err(ArrangementError::WrongCount {
                expected: dim.total_size(),
                actual: tiles.len(),
            });
        }
        let mut seen = vec![false; tiles.len()];
        for &tile in tiles {
            match seen.get_mut(tile as usize) {
                Some(slot) if !*slot => *slot = true,
                _ => return Err(ArrangementError::NotPermutation),
            }
        }
        let game = Self::from_cells_unchecked(dim, tiles);
        if !game.solvable() {
            return Err(ArrangementError::Unsolvable);
        }
        Ok(game)
    }

    /// Check that a board of `width` x `height` can be played: at least 2x2 and at most
    /// [`MAX_CELLS`] cells.
    pub fn check_size(width: usize, height: usize) -> Result<GridDimensions, ArrangementError> {
        if width < 2 || height < 2 {
            return Err(ArrangementError::BadDimensions(width, height));
        }
        match width.checked_mul(height) {
            Some(cells) if cells <= MAX_CELLS => {}
            _ => return Err(ArrangementError::TooLarge(width, height)),
        }
        GridDimensions::try_new(width, height)
            .ok_or(ArrangementError::BadDimensions(width, height))
    }

    /// A solved board of the given size.
    pub fn solved(width: usize, height: usize) -> Result<Self, ArrangementError> {
        let dim = Self::check_size(width, height)?;
        let size = u32::try_from(dim.total_size())
            .map_err(|_| ArrangementError::TooLarge(width, height))?;
        let mut tiles: Vec<u32> = (1..size).collect();
        tiles.push(0);
        Self::from_tiles(width, height, &tiles)
    }

    /// Deal a random solvable board that is not already solved.
    #[cfg(feature = "rng_gen")]
    pub fn shuffled<R: rand::Rng + ?Sized>(
        width: usize,
        height: usize,
        rng: &mut R,
    ) -> Result<Self, ArrangementError> {
        use rand::seq::SliceRandom;

        let mut game = Self::solved(width, height)?;
        let mut tiles: Vec<u32> = (0..game.cells.len() as u32).collect();
        loop {
            tiles.shuffle(rng);
            game = Self::from_cells_unchecked(game.dim, &tiles);
            if !game.solvable() {
                // Swapping two tiles flips the permutation parity without moving the blank.
                let blank = game.blank;
                let mut numbered = (0..tiles.len()).filter(|&i| i != blank);
                if let (Some(a), Some(b)) = (numbered.next(), numbered.next()) {
                    game.cells.swap(a, b);
                }
            }
            if !game.is_complete() {
                return Ok(game);
            }
        }
    }

    fn from_cells_unchecked(dim: GridDimensions, tiles: &[u32]) -> Self {
        let cells: Box<[_]> = tiles.iter().map(|&t| NonZeroU32::new(t)).collect();
        let blank = cells.iter().position(Option::is_none).unwrap_or(0);
        Self {
            dim,
            cells,
            blank,
            moves: 0,
            watch: Stopwatch::default(),
        }
    }

    /// Dimensions of the board.
    pub fn dimensions(&self) -> GridDimensions {
        self.dim
    }

    /// Tile number at `index`. `None` for the blank or an out-of-range index.
    pub fn tile(&self, index: usize) -> Option<u32> {
        self.cells.get(index).copied().flatten().map(NonZeroU32::get)
    }

    /// Index of the blank cell.
    pub fn blank(&self) -> usize {
        self.blank
    }

    /// Number of single-tile moves made so far.
    pub fn moves(&self) -> u32 {
        self.moves
    }

    /// Current score as of `now`.
    pub fn score(&self, now: Instant) -> Score {
        Score::new(self.moves, self.watch.seconds(now))
    }

    /// True when every tile is in its home cell.
    pub fn is_complete(&self) -> bool {
        let last = self.cells.len() - 1;
        self.cells.iter().enumerate().all(|(i, cell)| match cell {
            Some(tile) => tile.get() as usize == i + 1,
            None => i == last,
        })
    }

    /// Number of tile pairs that are out of order, ignoring the blank.
    pub fn inversions(&self) -> usize {
        let tiles: Vec<u32> = self.cells.iter().flatten().map(|t| t.get()).collect();
        tiles
            .iter()
            .enumerate()
            .map(|(i, a)| tiles[i + 1..].iter().filter(|&b| b < a).count())
            .sum()
    }

    /// Whether the goal can be reached from this arrangement.
    pub fn solvable(&self) -> bool {
        let inversions = self.inversions();
        if self.dim.width() % 2 == 1 {
            inversions % 2 == 0
        } else {
            let blank_row = self.dim.un_linearize(self.blank).y;
            (inversions + (self.dim.height() - 1 - blank_row)) % 2 == 0
        }
    }

    /// Directions accepted by [`Game::push`] right now. `Up` means the tile below the blank
    /// can move up.
    pub fn movable(&self) -> BitFlags<Direction> {
        let blank = self.dim.un_linearize(self.blank);
        let mut dirs = BitFlags::empty();
        for &dir in Direction::ALL {
            if self.dim.step(blank, dir.opposite()).is_some() {
                dirs.insert(dir);
            }
        }
        dirs
    }

    /// Slide the tile at `index`, together with every tile between it and the blank,
    /// one cell toward the blank.
    pub fn slide(&mut self, index: usize, now: Instant) -> Result<SlideOutcome, CannotSlideReason> {
        if index >= self.cells.len() {
            return Err(CannotSlideReason::OutOfBounds);
        }
        if self.is_complete() {
            return Err(CannotSlideReason::AlreadySolved);
        }
        if index == self.blank {
            return Err(CannotSlideReason::Blank);
        }
        let from = self.dim.un_linearize(index);
        let blank = self.dim.un_linearize(self.blank);
        // Direction the tiles travel.
        let dir = match (from.x == blank.x, from.y == blank.y) {
            (true, _) if from.y > blank.y => Direction::Up,
            (true, _) => Direction::Down,
            (_, true) if from.x > blank.x => Direction::Left,
            (_, true) => Direction::Right,
            _ => return Err(CannotSlideReason::NotAligned),
        };

        let mut count = 0;
        let mut hole = blank;
        while hole != from {
            hole = self.shift_into(hole, dir.opposite());
            count += 1;
        }
        Ok(self.finish_move(count, now))
    }

    /// Keyboard move: slide the tile on the far side of the blank in `dir`.
    pub fn push(&mut self, dir: Direction, now: Instant) -> Result<SlideOutcome, CannotSlideReason> {
        if self.is_complete() {
            return Err(CannotSlideReason::AlreadySolved);
        }
        if !self.movable().contains(dir) {
            return Err(CannotSlideReason::Blocked);
        }
        let blank = self.dim.un_linearize(self.blank);
        self.shift_into(blank, dir.opposite());
        Ok(self.finish_move(1, now))
    }

    /// Move the tile next to the hole (on side `toward`) into the hole, returning the new
    /// hole position.
    fn shift_into(&mut self, hole: Coordinate, toward: Direction) -> Coordinate {
        let src = match self.dim.step(hole, toward) {
            Some(src) => src,
            None => unreachable!("shift past the board edge"),
        };
        let (a, b) = (self.dim.linearize(&hole), self.dim.linearize(&src));
        self.cells.swap(a, b);
        self.blank = b;
        src
    }

    fn finish_move(&mut self, count: u32, now: Instant) -> SlideOutcome {
        if self.moves == 0 {
            self.watch.start(now);
        }
        self.moves += count;
        debug!(tiles = count, moves = self.moves, blank = self.blank, "slid");
        if self.is_complete() {
            self.watch.stop(now);
            let score = self.score(now);
            info!(moves = score.moves, time = score.time, "sliding puzzle complete");
            SlideOutcome::Complete(score)
        } else {
            SlideOutcome::Moved(count)
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;

    /// Classic board one move from solved: the blank sits just left of 15.
    fn one_left() -> Game {
        Game::from_tiles(
            4,
            4,
            &[1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12, 13, 14, 0, 15],
        )
        .unwrap()
    }

    #[test]
    fn validates_arrangements() {
        assert_eq!(
            Game::from_tiles(1, 4, &[1, 2, 3, 0]).unwrap_err(),
            ArrangementError::BadDimensions(1, 4)
        );
        assert_eq!(
            Game::from_tiles(2, 2, &[1, 2, 0]).unwrap_err(),
            ArrangementError::WrongCount {
                expected: 4,
                actual: 3
            }
        );
        assert_eq!(
            Game::from_tiles(2, 2, &[1, 1, 2, 0]).unwrap_err(),
            ArrangementError::NotPermutation
        );
        assert_eq!(
            Game::from_tiles(2, 2, &[1, 2, 4, 0]).unwrap_err(),
            ArrangementError::NotPermutation
        );
        // The famous 14-15 swap.
        assert_eq!(
            Game::from_tiles(
                4,
                4,
                &[1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12, 13, 15, 14, 0],
            )
            .unwrap_err(),
            ArrangementError::Unsolvable
        );
    }

    #[test]
    fn board_size_is_capped() {
        assert_eq!(
            Game::solved(65537, 65537).unwrap_err(),
            ArrangementError::TooLarge(65537, 65537)
        );
        assert_eq!(
            Game::solved(usize::MAX, 2).unwrap_err(),
            ArrangementError::TooLarge(usize::MAX, 2)
        );
        assert_eq!(
            Game::from_tiles(65, 64, &[]).unwrap_err(),
            ArrangementError::TooLarge(65, 64)
        );
        let largest = Game::solved(64, 64).unwrap();
        assert_eq!(largest.dimensions().total_size(), MAX_CELLS);
        assert!(largest.is_complete());
    }

    #[test]
    fn solvability_on_odd_width() {
        let game = Game::from_tiles(3, 3, &[1, 2, 3, 4, 5, 6, 8, 7, 0]);
        assert_eq!(game.unwrap_err(), ArrangementError::Unsolvable);
        let game = Game::from_tiles(3, 3, &[1, 2, 3, 4, 5, 6, 0, 7, 8]).unwrap();
        assert!(game.solvable());
        assert!(!game.is_complete());
    }

    #[test]
    fn push_finishes_the_puzzle() {
        let t0 = Instant::now();
        let mut game = one_left();
        let movable = game.movable();
        assert!(movable.contains(Direction::Left));
        assert!(movable.contains(Direction::Right));
        assert!(movable.contains(Direction::Down));
        assert!(!movable.contains(Direction::Up));
        assert_eq!(
            game.push(Direction::Up, t0),
            Err(CannotSlideReason::Blocked)
        );

        let outcome = game.push(Direction::Left, t0 + Duration::from_secs(2));
        assert_eq!(outcome, Ok(SlideOutcome::Complete(Score::new(1, 0))));
        assert!(game.is_complete());
        assert_eq!(
            game.push(Direction::Right, t0),
            Err(CannotSlideReason::AlreadySolved)
        );
    }

    #[test]
    fn slide_moves_a_whole_row() {
        let t0 = Instant::now();
        let mut game =
            Game::from_tiles(4, 4, &[1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12, 0, 13, 14, 15])
                .unwrap();
        assert_eq!(game.slide(1, t0), Err(CannotSlideReason::NotAligned));
        assert_eq!(game.slide(12, t0), Err(CannotSlideReason::Blank));
        assert_eq!(game.slide(16, t0), Err(CannotSlideReason::OutOfBounds));

        assert_eq!(game.slide(14, t0), Ok(SlideOutcome::Moved(2)));
        assert_eq!(game.tile(12), Some(13));
        assert_eq!(game.tile(13), Some(14));
        assert_eq!(game.blank(), 14);
        assert_eq!(game.moves(), 2);

        let outcome = game.slide(15, t0 + Duration::from_secs(7)).unwrap();
        assert_eq!(outcome, SlideOutcome::Complete(Score::new(3, 7)));
    }

    #[test]
    fn slide_moves_a_column() {
        let t0 = Instant::now();
        let mut game = Game::from_tiles(3, 3, &[0, 2, 3, 1, 5, 6, 4, 7, 8]).unwrap();
        assert_eq!(game.slide(6, t0), Ok(SlideOutcome::Moved(2)));
        assert_eq!(game.tile(0), Some(1));
        assert_eq!(game.tile(3), Some(4));
        assert_eq!(game.blank(), 6);
        assert_eq!(game.slide(8, t0), Ok(SlideOutcome::Complete(Score::new(4, 0))));
    }

    #[cfg(feature = "rng_gen")]
    #[test]
    fn shuffled_boards_are_solvable() {
        use rand::{rngs::StdRng, SeedableRng};

        let mut rng = StdRng::seed_from_u64(15);
        for _ in 0..50 {
            let game = Game::shuffled(4, 4, &mut rng).unwrap();
            assert!(game.solvable());
            assert!(!game.is_complete());
        }
        let game = Game::shuffled(3, 5, &mut rng).unwrap();
        assert!(game.solvable());
    }
}
