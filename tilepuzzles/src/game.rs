//! The puzzles themselves, and the [`Puzzle`] trait that lets a session drive either one.
//!
//! [`memory`] is the tile-matching game: 24 covered tiles, 12 pairs, two picks per move.
//!
//! [`sliding`] is the sliding puzzle: numbered tiles and one blank, 4x4 by default.
use std::time::Instant;

use thiserror::Error;

use crate::{
    board::{Direction, GridDimensions},
    layout::{Arrangement, MEMORY_ARRANGEMENTS},
    score::Score,
};

pub use self::memory::Symbol;

pub mod memory;
pub mod sliding;

/// Which puzzle is being played. Best scores are kept per variant.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Variant {
    Memory,
    Sliding,
}

impl Variant {
    /// Storage keys for the fewest-moves and fastest-time records.
    pub fn best_keys(self) -> (&'static str, &'static str) {
        match self {
            Variant::Memory => ("bestMoves", "bestTime"),
            Variant::Sliding => ("slidingBestMoves", "slidingBestTime"),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Variant::Memory => "memory",
            Variant::Sliding => "sliding",
        }
    }
}

/// What a tile slot should show.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum TileFace {
    /// A face-down memory tile.
    Hidden,
    /// A memory tile showing its symbol.
    Symbol { symbol: Symbol, solved: bool },
    /// A numbered sliding tile.
    Number(u32),
    /// The empty cell of the sliding puzzle.
    Blank,
}

/// Result of an accepted input.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Progress {
    /// State changed but no move was completed (first pick of a memory move).
    Picked,
    /// A move was completed.
    Moved,
    /// The puzzle was solved with the given score.
    Solved(Score),
}

/// Reason an input was rejected.
#[derive(Debug, Error, Copy, Clone, Eq, PartialEq)]
pub enum MoveError {
    #[error(transparent)]
    Flip(#[from] memory::CannotFlipReason),
    #[error(transparent)]
    Slide(#[from] sliding::CannotSlideReason),
    /// The puzzle has no direct keyboard moves.
    #[error("this puzzle has no directional moves")]
    Unsupported,
}

/// Common interface over both puzzles, as seen by the input session and the renderer.
pub trait Puzzle {
    fn variant(&self) -> Variant;

    /// Grid shapes this puzzle can be shown in, sorted by padded aspect ratio.
    fn arrangements(&self) -> Vec<Arrangement>;

    fn tile_count(&self) -> usize;

    /// What the tile at `index` shows right now.
    fn tile_face(&self, index: usize) -> TileFace;

    /// Act on a tile selected by pointer, touch or keyboard cursor.
    fn click(&mut self, index: usize, now: Instant) -> Result<Progress, MoveError>;

    /// Directional keyboard move. Puzzles without one return
    /// [`MoveError::Unsupported`].
    fn push(&mut self, dir: Direction, now: Instant) -> Result<Progress, MoveError>;

    /// Whether the keyboard picks tiles with a cursor. Puzzles with directional moves use
    /// the arrow keys for those instead and have no cursor.
    fn has_cursor(&self) -> bool;

    fn score(&self, now: Instant) -> Score;

    fn is_complete(&self) -> bool;
}

impl Puzzle for memory::Game {
    fn variant(&self) -> Variant {
        Variant::Memory
    }

    fn arrangements(&self) -> Vec<Arrangement> {
        MEMORY_ARRANGEMENTS.clone()
    }

    fn tile_count(&self) -> usize {
        memory::TILE_COUNT
    }

    fn tile_face(&self, index: usize) -> TileFace {
        match self.symbol(index) {
            Some(symbol) if self.face_up(index) => TileFace::Symbol {
                symbol,
                solved: self.state(index) == Some(memory::TileState::Solved),
            },
            _ => TileFace::Hidden,
        }
    }

    fn click(&mut self, index: usize, now: Instant) -> Result<Progress, MoveError> {
        Ok(match self.flip(index, now)? {
            memory::FlipOutcome::First => Progress::Picked,
            memory::FlipOutcome::Match(_) | memory::FlipOutcome::Mismatch => Progress::Moved,
            memory::FlipOutcome::Complete(score) => Progress::Solved(score),
        })
    }

    fn push(&mut self, _dir: Direction, _now: Instant) -> Result<Progress, MoveError> {
        Err(MoveError::Unsupported)
    }

    fn has_cursor(&self) -> bool {
        true
    }

    fn score(&self, now: Instant) -> Score {
        memory::Game::score(self, now)
    }

    fn is_complete(&self) -> bool {
        memory::Game::is_complete(self)
    }
}

impl Puzzle for sliding::Game {
    fn variant(&self) -> Variant {
        Variant::Sliding
    }

    fn arrangements(&self) -> Vec<Arrangement> {
        let dim: GridDimensions = self.dimensions();
        vec![Arrangement::new(dim)]
    }

    fn tile_count(&self) -> usize {
        self.dimensions().total_size()
    }

    fn tile_face(&self, index: usize) -> TileFace {
        match self.tile(index) {
            Some(number) => TileFace::Number(number),
            None => TileFace::Blank,
        }
    }

    fn click(&mut self, index: usize, now: Instant) -> Result<Progress, MoveError> {
        Ok(slide_progress(self.slide(index, now)?))
    }

    fn push(&mut self, dir: Direction, now: Instant) -> Result<Progress, MoveError> {
        Ok(slide_progress(sliding::Game::push(self, dir, now)?))
    }

    fn has_cursor(&self) -> bool {
        false
    }

    fn score(&self, now: Instant) -> Score {
        sliding::Game::score(self, now)
    }

    fn is_complete(&self) -> bool {
        sliding::Game::is_complete(self)
    }
}

fn slide_progress(outcome: sliding::SlideOutcome) -> Progress {
    match outcome {
        sliding::SlideOutcome::Moved(_) => Progress::Moved,
        sliding::SlideOutcome::Complete(score) => Progress::Solved(score),
    }
}
