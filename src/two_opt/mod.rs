//! 2-opt local search.
//!
//! Deterministic descent over segment reversals. Each move removes two
//! edges and reconnects the tour with the crossed pair; the search stops at
//! the first pass that finds no shortening move, i.e. at a local optimum.
//!
//! # References
//!
//! - Croes, G.A. (1958). "A method for solving traveling salesman problems",
//!   *Operations Research* 6(6), 791-812.

mod config;
mod runner;

pub use config::{TwoOptConfig, TwoOptStrategy};
pub use runner::{TwoOptResult, TwoOptRunner};
