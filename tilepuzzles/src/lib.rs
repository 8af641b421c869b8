//! Two small tile puzzles and everything needed to play them on a drawing surface.
//!
//! * [`game::memory`]: a tile-matching memory game with 12 hidden pairs.
//! * [`game::sliding`]: the sliding 15-puzzle, on any rectangular board.
//!
//! [`layout`] fits the grid to a surface and maps points back to tiles, [`render`] draws
//! a frame onto any [`render::Surface`], [`score`] and [`storage`] track and persist the
//! best results, and [`session::Session`] ties them together around pointer, touch and
//! keyboard input.
//!
//! Random deals need the `rng_gen` feature.

pub mod board;
pub mod game;
pub mod layout;
pub mod render;
pub mod score;
pub mod session;
pub mod storage;

pub use crate::{
    game::{Progress, Puzzle, TileFace, Variant},
    score::{BestScores, Score},
    session::{InputEvent, Key, Response, Session},
};
