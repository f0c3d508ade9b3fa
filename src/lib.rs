#![warn(missing_docs)]

//! # `tilelink`
//!
//! The matching engine for [Onet](https://en.wikipedia.org/wiki/Onet_(video_game))-style tile matching games,
//! where two tiles of the same kind are removed when they can be joined by a path with few enough bends.
//! Begin by building a board object using [`BoardBuilder`](builder::BoardBuilder) or [`generate`](generator::generate),
//! then call [`find_connection()`](crate::Board::find_connection) to look for the path joining two tiles.
//! A [`Game`](game::Game) wraps a board and judges the pairs a player selects, one at a time.
//!
//! # Rules
//! A connection is a sequence of unit orthogonal steps from one tile to the other.
//! It may not pass through any tile which has not been cleared, but it may leave the board by a single cell on any side and travel around the border.
//! It may change direction between horizontal and vertical at most [`MAX_TURNS`] times.
//!
//! # Internals
//! The search is breadth-first over states `(location, axis of arrival, turns so far)`.
//! Each move extends in a straight line over any number of passable cells and costs a turn only when it changes axis;
//! the first move out of the starting tile is free.
//! The search is run with a turn budget of 0, then 1, 2 and 3, and the first budget admitting any path wins.
//! Within that budget the path with the fewest cells is kept.

pub use board::Board;
pub use builder::BoardBuilder;
pub use location::Location;
pub use path::Path;
pub use solver::{ConnectionSolver, SolverFailure, MAX_TURNS};
pub use tile::KindID;

pub(crate) mod board;
mod tests;
pub(crate) mod location;
pub(crate) mod path;
pub mod shape;
pub(crate) mod tile;
pub mod builder;
pub mod config;
pub mod game;
pub mod generator;
pub(crate) mod solver;
#[cfg(feature = "wasm")]
pub mod wasm;
