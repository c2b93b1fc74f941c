//! End-to-end pipeline: matrix, construction, then one improvement method.

use std::time::{Duration, Instant};

use log::info;

use crate::construction::nearest_insertion;
use crate::error::Result;
use crate::instance::{DistanceMatrix, PointSet};
use crate::sa::{SaConfig, SaRunner};
use crate::tour::Tour;
use crate::two_opt::{TwoOptConfig, TwoOptRunner};

/// Which improvement phase follows construction.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Method {
    /// Construction only.
    NearestInsertion,
    /// Construction followed by 2-opt descent.
    TwoOpt(TwoOptConfig),
    /// Construction followed by simulated annealing.
    Annealing(SaConfig),
}

impl Method {
    pub fn name(&self) -> &'static str {
        match self {
            Method::NearestInsertion => "nearest-insertion",
            Method::TwoOpt(_) => "2-opt",
            Method::Annealing(_) => "simulated-annealing",
        }
    }
}

/// Outcome of one pipeline run.
#[derive(Debug, Clone)]
pub struct Solution {
    /// Final tour.
    pub tour: Tour,
    /// Cost of the nearest-insertion tour the method started from.
    pub initial_cost: f64,
    /// Wall time for the whole pipeline, matrix included.
    pub elapsed: Duration,
}

impl Solution {
    pub fn cost(&self) -> f64 {
        self.tour.cost()
    }
}

/// Solves one instance.
///
/// # Examples
///
/// ```
/// use u_tsp::instance::PointSet;
/// use u_tsp::solver::{solve, Method};
/// use u_tsp::two_opt::TwoOptConfig;
///
/// let points = PointSet::from_coords(&[(0.0, 0.0), (1.0, 0.0), (2.0, 0.0)]).unwrap();
/// let solution = solve(&points, &Method::TwoOpt(TwoOptConfig::default())).unwrap();
/// assert!((solution.cost() - 4.0).abs() < 1e-10);
/// ```
pub fn solve(points: &PointSet, method: &Method) -> Result<Solution> {
    let start = Instant::now();
    let matrix = DistanceMatrix::from_point_set(points);
    let initial = nearest_insertion(&matrix);
    let initial_cost = initial.cost();

    let tour = match method {
        Method::NearestInsertion => initial,
        Method::TwoOpt(config) => TwoOptRunner::run(&initial, &matrix, config)?.best,
        Method::Annealing(config) => SaRunner::run(&initial, &matrix, config)?.best,
    };

    Ok(Solution {
        tour,
        initial_cost,
        elapsed: start.elapsed(),
    })
}

/// Solves independent named instances with the same method.
///
/// Results come back in input order. With the `parallel` feature the
/// instances run concurrently; each run owns its tours and RNG.
pub fn solve_batch<S>(instances: &[(S, PointSet)], method: &Method) -> Vec<(S, Result<Solution>)>
where
    S: Clone + std::fmt::Display + Send + Sync,
{
    let run = |(name, points): &(S, PointSet)| {
        let result = solve(points, method);
        if let Ok(solution) = &result {
            info!(
                "{name}: {} n={} cost={:.4} ({:?})",
                method.name(),
                points.len(),
                solution.cost(),
                solution.elapsed
            );
        }
        (name.clone(), result)
    };

    #[cfg(feature = "parallel")]
    {
        use rayon::prelude::*;
        instances.par_iter().map(run).collect()
    }

    #[cfg(not(feature = "parallel"))]
    {
        instances.iter().map(run).collect()
    }
}
