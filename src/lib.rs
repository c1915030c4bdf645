//! A depth-limited solver for the board game 'Connect 4'
//!
//! Given a position and a search depth (or time budget), the solver
//! returns the game-theoretic verdict of the position: a score, the best
//! column to play, and the number of plies until the verdict is forced.
//!
//! # Basic Usage
//!
//! ```
//! use connect4_solver::{bitboard::BitBoard, solver::Solver};
//!
//!# use std::error::Error;
//!# fn main() -> Result<(), Box<dyn Error>> {
//! let board = BitBoard::from_cfef("ry/ry/ry////")?;
//! let mut solver = Solver::new(board);
//! let eval = solver.evaluate(6);
//!
//! assert_eq!((eval.score, eval.column, eval.win_in), (1, Some(3), 1));
//!# Ok(())
//!# }
//! ```

use static_assertions::*;
pub use anyhow;

pub mod alignment;

pub mod bitboard;

pub mod solver;

pub mod transposition_table;


pub use bitboard::{BitBoard, Cell};
pub use solver::{Evaluation, Outcome, SearchStats, Solver};
pub use transposition_table::TranspositionTable;

/// The width of the game board in tiles
pub const WIDTH: usize = 7;

/// The height of the game board in tiles
pub const HEIGHT: usize = 6;

// ensure that the given dimensions fit in a u64 for the bitboard
// representation, leaving bit 63 free as the cache's vacant sentinel
const_assert!(WIDTH * HEIGHT < 63);
