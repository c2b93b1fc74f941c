//! Approximate solver for the planar Euclidean Traveling Salesman Problem.
//!
//! Provides a small tour-construction-and-improvement engine:
//!
//! - **Instance**: re-indexed point sets and a dense symmetric Euclidean
//!   distance matrix, built once and shared read-only.
//! - **Tour**: closed visiting order with a cached cost and the single
//!   cost evaluator every algorithm uses.
//! - **Construction**: nearest insertion, the seed for every improvement
//!   method.
//! - **2-opt**: deterministic segment-reversal descent to a local optimum.
//! - **Simulated Annealing (SA)**: random swap moves with Metropolis
//!   acceptance and geometric cooling over a fixed iteration budget.
//! - **TSPLIB** reading and a batch **solver** pipeline around the core.
//!
//! # Architecture
//!
//! All computation is synchronous and single-threaded per run. The
//! distance matrix is immutable after construction, so independent runs
//! (one per instance) can share nothing but read-only data; the
//! `parallel` feature runs such batches on rayon.
//!
//! ```
//! use u_tsp::construction::nearest_insertion;
//! use u_tsp::instance::{DistanceMatrix, PointSet};
//! use u_tsp::two_opt::{TwoOptConfig, TwoOptRunner};
//!
//! let coords = [(0.0, 0.0), (2.0, 0.0), (2.0, 2.0), (0.0, 2.0), (1.0, 3.0)];
//! let points = PointSet::from_coords(&coords).unwrap();
//! let matrix = DistanceMatrix::from_point_set(&points);
//! let initial = nearest_insertion(&matrix);
//! let improved = TwoOptRunner::run(&initial, &matrix, &TwoOptConfig::default()).unwrap();
//! assert!(improved.best.cost() <= initial.cost());
//! ```

pub mod construction;
pub mod error;
pub mod instance;
pub mod sa;
pub mod solver;
pub mod tour;
pub mod tsplib;
pub mod two_opt;

pub use error::{Result, TspError};
