//! Simulated Annealing (SA) over tours.
//!
//! Each iteration swaps the points at two distinct interior positions of
//! the current tour and accepts the result by the Metropolis criterion.
//! The temperature decays geometrically every iteration and the run
//! length is fixed. The best tour seen is returned, so the result is
//! never worse than the starting tour.
//!
//! # References
//!
//! - Kirkpatrick, Gelatt & Vecchi (1983), "Optimization by Simulated Annealing"
//! - Cerny (1985), "Thermodynamical Approach to the Travelling Salesman Problem"

mod config;
mod runner;

pub use config::SaConfig;
pub use runner::{SaResult, SaRunner};
