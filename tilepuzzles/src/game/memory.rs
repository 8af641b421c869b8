//! The tile-matching memory game: 24 face-down tiles hiding 12 pairs of symbols. Two tiles
//! are turned per move; a matching pair stays solved, a mismatched pair stays visible
//! until the next pick.
use std::time::Instant;

use thiserror::Error;
use tracing::{debug, info};

use crate::score::{Score, Stopwatch};

/// Number of tiles on the board.
pub const TILE_COUNT: usize = 24;
/// Number of distinct pairs.
pub const PAIR_COUNT: usize = TILE_COUNT / 2;

/// Shape drawn on a tile face.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Shape {
    Star,
    Triangle,
    Circle,
    Square,
}

/// Color of the shape drawn on a tile face.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Hue {
    Orange,
    Blue,
    Red,
}

/// The symbol hidden under a tile. Values run from 0 to 11 and each appears on exactly two
/// tiles.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub struct Symbol(u8);

impl Symbol {
    const SHAPES: [Shape; 4] = [Shape::Star, Shape::Triangle, Shape::Circle, Shape::Square];
    const HUES: [Hue; 3] = [Hue::Orange, Hue::Blue, Hue::Red];

    /// Get the symbol with the given pair value, if it is in range.
    pub fn new(value: u8) -> Option<Self> {
        if (value as usize) < PAIR_COUNT {
            Some(Symbol(value))
        } else {
            None
        }
    }

    /// The pair value of this symbol.
    pub fn value(self) -> u8 {
        self.0
    }

    pub fn shape(self) -> Shape {
        Self::SHAPES[self.0 as usize % Self::SHAPES.len()]
    }

    pub fn hue(self) -> Hue {
        Self::HUES[self.0 as usize / Self::SHAPES.len()]
    }
}

/// Whether a tile is face-down, turned up as part of the current pick, or matched.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum TileState {
    Covered,
    Uncovered,
    Solved,
}

/// Tiles the player has turned over that are still showing.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
enum Selection {
    Empty,
    /// First tile of a move.
    One(usize),
    /// A mismatched pair, face-up until the next pick. Both tiles are already `Covered`
    /// and can be picked again.
    Mismatch(usize, usize),
}

/// Reason why a tile could not be flipped.
#[derive(Debug, Error, Copy, Clone, Eq, PartialEq)]
pub enum CannotFlipReason {
    /// The index does not name a tile.
    #[error("no tile at that position")]
    OutOfBounds,
    /// The tile is already turned up or already solved.
    #[error("that tile is not face down")]
    NotCovered,
}

/// Error building a game from a fixed deal.
#[derive(Debug, Error, Clone, Eq, PartialEq)]
pub enum DealError {
    #[error("expected {expected} tiles, got {actual}")]
    WrongCount { expected: usize, actual: usize },
    #[error("symbol {0} is out of range")]
    BadSymbol(u8),
    #[error("symbol {0} does not appear exactly twice")]
    Unpaired(u8),
}

/// Outcome of a successful flip.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum FlipOutcome {
    /// The first tile of a move was turned up.
    First,
    /// The second tile matched the first.
    Match(Symbol),
    /// The second tile did not match. Both stay visible until the next pick.
    Mismatch,
    /// The final pair was matched.
    Complete(Score),
}

/// State of one memory game.
#[derive(Debug, Clone)]
pub struct Game {
    symbols: [Symbol; TILE_COUNT],
    states: [TileState; TILE_COUNT],
    selection: Selection,
    solved: usize,
    moves: u32,
    watch: Stopwatch,
}

impl Game {
    /// Build a game from a fixed deal. The deal must hold each value in `0..12` exactly
    /// twice.
    pub fn from_symbols(deal: &[u8]) -> Result<Self, DealError> {
        if deal.len() != TILE_COUNT {
            return Err(DealError::WrongCount {
                expected: TILE_COUNT,
                actual: deal.len(),
            });
        }
        let mut counts = [0u8; PAIR_COUNT];
        let mut symbols = [Symbol(0); TILE_COUNT];
        for (slot, &value) in symbols.iter_mut().zip(deal) {
            *slot = Symbol::new(value).ok_or(DealError::BadSymbol(value))?;
            counts[value as usize] += 1;
        }
        if let Some(value) = counts.iter().position(|&count| count != 2) {
            return Err(DealError::Unpaired(value as u8));
        }
        Ok(Self {
            symbols,
            states: [TileState::Covered; TILE_COUNT],
            selection: Selection::Empty,
            solved: 0,
            moves: 0,
            watch: Stopwatch::default(),
        })
    }

    /// Deal a fresh game with the pairs shuffled uniformly.
    #[cfg(feature = "rng_gen")]
    pub fn shuffled<R: rand::Rng + ?Sized>(rng: &mut R) -> Self {
        use rand::seq::SliceRandom;

        let mut deal: Vec<u8> = (0..TILE_COUNT).map(|i| (i / 2) as u8).collect();
        deal.shuffle(rng);
        match Self::from_symbols(&deal) {
            Ok(game) => game,
            // Every value appears twice by construction.
            Err(_) => unreachable!(),
        }
    }

    /// Get the symbol under the tile at `index`, if the index is in range.
    pub fn symbol(&self, index: usize) -> Option<Symbol> {
        self.symbols.get(index).copied()
    }

    /// Get the state of the tile at `index`, if the index is in range.
    pub fn state(&self, index: usize) -> Option<TileState> {
        self.states.get(index).copied()
    }

    /// Whether the tile's symbol is showing. This includes a mismatched pair that is
    /// still displayed after its move.
    pub fn face_up(&self, index: usize) -> bool {
        match self.state(index) {
            None => false,
            Some(TileState::Covered) => self.selected(index),
            Some(_) => true,
        }
    }

    /// Number of pairs matched so far.
    pub fn solved_pairs(&self) -> usize {
        self.solved
    }

    /// Number of completed moves (pairs of picks).
    pub fn moves(&self) -> u32 {
        self.moves
    }

    /// True once every pair is matched.
    pub fn is_complete(&self) -> bool {
        self.solved >= PAIR_COUNT
    }

    /// Current score as of `now`.
    pub fn score(&self, now: Instant) -> Score {
        Score::new(self.moves, self.watch.seconds(now))
    }

    /// Turn over the tile at `index`.
    pub fn flip(&mut self, index: usize, now: Instant) -> Result<FlipOutcome, CannotFlipReason> {
        match self.state(index) {
            None => return Err(CannotFlipReason::OutOfBounds),
            Some(TileState::Covered) => {}
            Some(_) => return Err(CannotFlipReason::NotCovered),
        }

        if let Selection::Mismatch(..) = self.selection {
            // Both tiles of the pair are already Covered; they just stop showing.
            self.selection = Selection::Empty;
        }

        self.states[index] = TileState::Uncovered;
        let first = match self.selection {
            Selection::One(first) => first,
            _ => {
                self.selection = Selection::One(index);
                debug!(index, "picked first tile");
                return Ok(FlipOutcome::First);
            }
        };

        let outcome = if self.symbols[first] == self.symbols[index] {
            self.states[first] = TileState::Solved;
            self.states[index] = TileState::Solved;
            self.selection = Selection::Empty;
            self.solved += 1;
            FlipOutcome::Match(self.symbols[index])
        } else {
            self.states[first] = TileState::Covered;
            self.states[index] = TileState::Covered;
            self.selection = Selection::Mismatch(first, index);
            FlipOutcome::Mismatch
        };

        if self.moves == 0 {
            self.watch.start(now);
        }
        self.moves += 1;
        debug!(first, second = index, moves = self.moves, ?outcome, "completed move");

        if self.is_complete() {
            self.watch.stop(now);
            let score = self.score(now);
            info!(moves = score.moves, time = score.time, "memory game complete");
            return Ok(FlipOutcome::Complete(score));
        }
        Ok(outcome)
    }

    fn selected(&self, index: usize) -> bool {
        match self.selection {
            Selection::Empty => false,
            Selection::One(a) => a == index,
            Selection::Mismatch(a, b) => a == index || b == index,
        }
    }
}
