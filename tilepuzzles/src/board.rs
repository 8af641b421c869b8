//! Grid geometry shared by both puzzles.

pub use self::{
    coordinate::{Coordinate, Direction},
    dimensions::{GridDimensions, Neighbors},
};

mod coordinate;
mod dimensions;
