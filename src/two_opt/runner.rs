//! 2-opt descent loop.
//!
//! For cut points `1 <= i < len-2` and `i+1 <= j < len` (positions in the
//! closed order, whose first and last entries stay fixed), reversing
//! `order[i..j]` removes edges `(order[i-1], order[i])` and
//! `(order[j-1], order[j])` and reconnects the tour with
//!
//! ```text
//! delta = d(a, c) + d(b, d) - d(a, b) - d(c, d)
//! a = order[i-1], b = order[i], c = order[j-1], d = order[j]
//! ```
//!
//! Passes repeat until one finds no improving reversal.

use log::{debug, info};

use super::config::{TwoOptConfig, TwoOptStrategy};
use crate::error::{Result, TspError};
use crate::instance::DistanceMatrix;
use crate::tour::{tour_cost, Tour};

/// A move must shorten the tour by more than this to count.
const IMPROVEMENT_EPS: f64 = 1e-10;

/// Result of a 2-opt descent.
#[derive(Debug, Clone)]
pub struct TwoOptResult {
    /// The locally optimal tour (or the tour at the pass limit).
    pub best: Tour,

    /// Full passes executed, including the final non-improving one.
    pub passes: usize,

    /// Number of reversals applied.
    pub improving_moves: usize,

    /// Whether the pass limit stopped the descent before a local optimum.
    pub pass_limited: bool,

    /// Tour cost at the end of each pass.
    pub cost_history: Vec<f64>,
}

/// Executes 2-opt descent.
pub struct TwoOptRunner;

impl TwoOptRunner {
    /// Improves `tour` until no single segment reversal shortens it.
    ///
    /// Deterministic: the same tour and matrix always give the same result.
    ///
    /// # Examples
    ///
    /// ```
    /// use u_tsp::instance::{DistanceMatrix, PointSet};
    /// use u_tsp::tour::Tour;
    /// use u_tsp::two_opt::{TwoOptConfig, TwoOptRunner};
    ///
    /// let square = [(0.0, 0.0), (0.0, 1.0), (1.0, 1.0), (1.0, 0.0)];
    /// let points = PointSet::from_coords(&square).unwrap();
    /// let dm = DistanceMatrix::from_point_set(&points);
    /// let crossed = Tour::from_order(vec![0, 2, 1, 3, 0], &dm).unwrap();
    ///
    /// let result = TwoOptRunner::run(&crossed, &dm, &TwoOptConfig::default()).unwrap();
    /// assert!((result.best.cost() - 4.0).abs() < 1e-10);
    /// ```
    pub fn run(
        tour: &Tour,
        matrix: &DistanceMatrix,
        config: &TwoOptConfig,
    ) -> Result<TwoOptResult> {
        if !tour.is_valid(matrix.size()) {
            return Err(TspError::invalid_tour(format!(
                "tour does not cover the {} points of the matrix",
                matrix.size()
            )));
        }

        let mut order = tour.order().to_vec();
        let mut cost = tour.recompute_cost(matrix);
        let initial_cost = cost;
        let len = order.len();
        info!(
            "2-opt: n={} {:?} max_passes={}",
            len.saturating_sub(1),
            config.strategy,
            config.max_passes
        );

        let mut passes = 0usize;
        let mut improving_moves = 0usize;
        let mut pass_limited = false;
        let mut cost_history = vec![cost];

        loop {
            passes += 1;
            let moves = match config.strategy {
                TwoOptStrategy::FirstImprovement => first_improvement_pass(&mut order, matrix),
                TwoOptStrategy::BestImprovement => best_improvement_pass(&mut order, matrix),
            };

            if moves > 0 {
                // Resync from the matrix so the cached cost never drifts.
                cost = tour_cost(&order, matrix);
                improving_moves += moves;
            }
            cost_history.push(cost);
            debug!("2-opt pass {passes}: {moves} moves, cost={cost:.4}");

            if moves == 0 {
                break;
            }
            if config.max_passes > 0 && passes >= config.max_passes {
                pass_limited = true;
                break;
            }
        }

        info!(
            "2-opt: n={} cost {:.4} -> {:.4} in {passes} passes",
            len.saturating_sub(1),
            initial_cost,
            cost
        );

        Ok(TwoOptResult {
            best: Tour::with_cost(order, cost),
            passes,
            improving_moves,
            pass_limited,
            cost_history,
        })
    }
}

/// Cost change from reversing `order[i..j]`.
#[inline]
fn reversal_delta(order: &[usize], matrix: &DistanceMatrix, i: usize, j: usize) -> f64 {
    let a = order[i - 1];
    let b = order[i];
    let c = order[j - 1];
    let d = order[j];
    (matrix.get(a, c) + matrix.get(b, d)) - (matrix.get(a, b) + matrix.get(c, d))
}

/// One pass applying every improving reversal in place. Returns the move count.
fn first_improvement_pass(order: &mut [usize], matrix: &DistanceMatrix) -> usize {
    let len = order.len();
    let mut moves = 0;
    for i in 1..len.saturating_sub(2) {
        for j in (i + 1)..len {
            if reversal_delta(order, matrix, i, j) < -IMPROVEMENT_EPS {
                order[i..j].reverse();
                moves += 1;
            }
        }
    }
    moves
}

/// One pass applying only the best reversal of the pass-start tour.
fn best_improvement_pass(order: &mut [usize], matrix: &DistanceMatrix) -> usize {
    let len = order.len();
    let mut best: Option<(usize, usize)> = None;
    let mut best_delta = -IMPROVEMENT_EPS;
    for i in 1..len.saturating_sub(2) {
        for j in (i + 1)..len {
            let delta = reversal_delta(order, matrix, i, j);
            if delta < best_delta {
                best_delta = delta;
                best = Some((i, j));
            }
        }
    }
    match best {
        Some((i, j)) => {
            order[i..j].reverse();
            1
        }
        None => 0,
    }
}
