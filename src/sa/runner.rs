//! SA execution loop.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use log::{info, trace};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::config::SaConfig;
use crate::error::{Result, TspError};
use crate::instance::DistanceMatrix;
use crate::tour::{tour_cost, Tour};

/// Iterations between cost history samples.
const HISTORY_INTERVAL: usize = 100;

/// Result of a Simulated Annealing run.
#[derive(Debug, Clone)]
pub struct SaResult {
    /// The best tour observed during the run.
    pub best: Tour,

    /// Total number of iterations (neighbor evaluations).
    pub iterations: usize,

    /// Temperature after the last cooling step.
    pub final_temperature: f64,

    /// Number of accepted moves (including improvements).
    pub accepted_moves: usize,

    /// Number of improving moves.
    pub improving_moves: usize,

    /// Whether cancelled externally.
    pub cancelled: bool,

    /// Best cost sampled every 100 iterations, plus the final value.
    pub cost_history: Vec<f64>,
}

/// Executes Simulated Annealing with random swap moves.
pub struct SaRunner;

impl SaRunner {
    /// Runs SA starting from `tour`.
    ///
    /// The returned best tour is never longer than `tour`. Tours over
    /// fewer than three points have no distinct interior positions to
    /// swap and are returned unchanged after zero iterations.
    ///
    /// # Examples
    ///
    /// ```
    /// use u_tsp::construction::nearest_insertion;
    /// use u_tsp::instance::{DistanceMatrix, PointSet};
    /// use u_tsp::sa::{SaConfig, SaRunner};
    ///
    /// let coords = [(0.0, 0.0), (4.0, 0.0), (4.0, 3.0), (0.0, 3.0), (2.0, 5.0)];
    /// let points = PointSet::from_coords(&coords).unwrap();
    /// let dm = DistanceMatrix::from_point_set(&points);
    /// let initial = nearest_insertion(&dm);
    ///
    /// let result = SaRunner::run(&initial, &dm, &SaConfig::default().with_seed(42)).unwrap();
    /// assert!(result.best.cost() <= initial.cost());
    /// assert_eq!(result.iterations, 10_000);
    /// ```
    pub fn run(tour: &Tour, matrix: &DistanceMatrix, config: &SaConfig) -> Result<SaResult> {
        Self::run_with_cancel(tour, matrix, config, None)
    }

    /// Runs SA with an optional cancellation token, checked every iteration.
    pub fn run_with_cancel(
        tour: &Tour,
        matrix: &DistanceMatrix,
        config: &SaConfig,
        cancel: Option<Arc<AtomicBool>>,
    ) -> Result<SaResult> {
        config.validate()?;
        if !tour.is_valid(matrix.size()) {
            return Err(TspError::invalid_tour(format!(
                "tour does not cover the {} points of the matrix",
                matrix.size()
            )));
        }

        let mut rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::seed_from_u64(rand::random()),
        };

        info!(
            "sa: n={} T0={} cooling={} iterations={}",
            tour.num_points(),
            config.initial_temperature,
            config.cooling_rate,
            config.iterations
        );

        let mut current = tour.order().to_vec();
        let mut current_cost = tour.recompute_cost(matrix);
        let initial_cost = current_cost;
        let mut best = current.clone();
        let mut best_cost = current_cost;
        let mut candidate = current.clone();

        let mut temperature = config.initial_temperature;
        let decay = config.decay_factor();
        let mut total_iterations = 0usize;
        let mut accepted_moves = 0usize;
        let mut improving_moves = 0usize;
        let mut cancelled = false;
        let mut cost_history = vec![best_cost];

        // Interior positions 1..len-1; need at least two to draw a swap.
        if current.len() >= 4 {
            for _ in 0..config.iterations {
                if let Some(ref flag) = cancel {
                    if flag.load(Ordering::Relaxed) {
                        cancelled = true;
                        break;
                    }
                }

                // Positions are drawn from the best tour's bounds; both
                // orders always have the same length.
                let upper = best.len() - 1;
                let i = rng.random_range(1..upper);
                let mut j = i;
                while j == i {
                    j = rng.random_range(1..upper);
                }

                candidate.clone_from(&current);
                candidate.swap(i, j);
                let candidate_cost = tour_cost(&candidate, matrix);
                let delta = candidate_cost - current_cost;

                // Metropolis acceptance criterion
                let accept = if delta < 0.0 {
                    improving_moves += 1;
                    true
                } else if temperature > 0.0 {
                    let probability = (-delta / temperature).exp();
                    rng.random_range(0.0..1.0) < probability
                } else {
                    false
                };

                if accept {
                    std::mem::swap(&mut current, &mut candidate);
                    current_cost = candidate_cost;
                    accepted_moves += 1;
                }

                if current_cost < best_cost {
                    best.clone_from(&current);
                    best_cost = current_cost;
                }

                temperature *= decay;
                total_iterations += 1;

                if total_iterations.is_multiple_of(HISTORY_INTERVAL) {
                    cost_history.push(best_cost);
                }
            }
        }

        if cost_history
            .last()
            .is_none_or(|&last| (last - best_cost).abs() > 1e-15)
        {
            cost_history.push(best_cost);
        }

        trace!(
            "sa: accepted {accepted_moves}/{total_iterations}, improving {improving_moves}, final T={temperature:e}"
        );
        info!(
            "sa: n={} cost {:.4} -> {:.4} in {total_iterations} iterations",
            tour.num_points(),
            initial_cost,
            best_cost
        );

        Ok(SaResult {
            best: Tour::with_cost(best, best_cost),
            iterations: total_iterations,
            final_temperature: temperature,
            accepted_moves,
            improving_moves,
            cancelled,
            cost_history,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::construction::nearest_insertion;
    use crate::instance::PointSet;
    use crate::two_opt::{TwoOptConfig, TwoOptRunner};

    fn matrix(coords: &[(f64, f64)]) -> DistanceMatrix {
        DistanceMatrix::from_point_set(&PointSet::from_coords(coords).unwrap())
    }

    fn scattered(n: usize) -> DistanceMatrix {
        let coords: Vec<(f64, f64)> = (0..n)
            .map(|k| {
                let a = (k * 37 % 101) as f64;
                let b = (k * 61 % 97) as f64;
                (a, b)
            })
            .collect();
        matrix(&coords)
    }

    #[test]
    fn test_sa_never_worse_than_initial() {
        let dm = scattered(40);
        let initial = Tour::identity(&dm);
        for seed in 0..5 {
            let config = SaConfig::default().with_iterations(2_000).with_seed(seed);
            let result = SaRunner::run(&initial, &dm, &config).unwrap();
            assert!(result.best.cost() <= initial.cost());
            assert!(result.best.is_valid(40));
            assert_eq!(result.best.start(), Some(0));
        }
    }

    #[test]
    fn test_sa_improves_random_order() {
        let dm = scattered(30);
        let initial = Tour::identity(&dm);
        let config = SaConfig::default()
            .with_initial_temperature(50.0)
            .with_cooling_rate(0.001)
            .with_iterations(20_000)
            .with_seed(42);
        let result = SaRunner::run(&initial, &dm, &config).unwrap();
        assert!(
            result.best.cost() < initial.cost(),
            "expected improvement over {}, got {}",
            initial.cost(),
            result.best.cost()
        );
        assert!(result.improving_moves > 0);
        assert!(result.accepted_moves >= result.improving_moves);
    }

    #[test]
    fn test_sa_runs_exact_iteration_budget() {
        let dm = scattered(12);
        let config = SaConfig::default().with_iterations(777).with_seed(1);
        let result = SaRunner::run(&Tour::identity(&dm), &dm, &config).unwrap();
        assert_eq!(result.iterations, 777);
        assert!(!result.cancelled);
        let expected = 1000.0 * 0.95f64.powi(777);
        assert!((result.final_temperature - expected).abs() <= expected * 1e-9);
    }

    #[test]
    fn test_sa_seed_reproducible() {
        let dm = scattered(25);
        let initial = nearest_insertion(&dm);
        let config = SaConfig::default().with_iterations(3_000).with_seed(99);
        let a = SaRunner::run(&initial, &dm, &config).unwrap();
        let b = SaRunner::run(&initial, &dm, &config).unwrap();
        assert_eq!(a.best, b.best);
        assert_eq!(a.accepted_moves, b.accepted_moves);
    }

    #[test]
    fn test_sa_cost_consistent_with_matrix() {
        let dm = scattered(20);
        let config = SaConfig::default().with_iterations(5_000).with_seed(3);
        let result = SaRunner::run(&Tour::identity(&dm), &dm, &config).unwrap();
        assert_eq!(result.best.cost(), result.best.recompute_cost(&dm));
    }

    #[test]
    fn test_sa_cost_history_non_increasing() {
        let dm = scattered(20);
        let config = SaConfig::default().with_iterations(5_000).with_seed(5);
        let result = SaRunner::run(&Tour::identity(&dm), &dm, &config).unwrap();
        assert_eq!(result.cost_history[0], Tour::identity(&dm).cost());
        for window in result.cost_history.windows(2) {
            assert!(
                window[1] <= window[0] + 1e-10,
                "best cost history should be non-increasing: {} > {}",
                window[1],
                window[0]
            );
        }
    }

    #[test]
    fn test_sa_high_temperature_accepts_uphill() {
        let dm = scattered(15);
        let config = SaConfig::default()
            .with_initial_temperature(1e9)
            .with_cooling_rate(1e-6)
            .with_iterations(1_000)
            .with_seed(42);
        let result = SaRunner::run(&Tour::identity(&dm), &dm, &config).unwrap();
        let ratio = result.accepted_moves as f64 / result.iterations as f64;
        assert!(ratio > 0.9, "expected high acceptance at high temp, got {ratio}");
    }

    #[test]
    fn test_sa_does_not_regress_local_optimum() {
        let dm = scattered(30);
        let local = TwoOptRunner::run(&nearest_insertion(&dm), &dm, &TwoOptConfig::default())
            .unwrap()
            .best;
        let result = SaRunner::run(&local, &dm, &SaConfig::default().with_seed(11)).unwrap();
        assert!(result.best.cost() <= local.cost());
    }

    #[test]
    fn test_sa_cancellation() {
        let dm = scattered(10);
        let cancel = Arc::new(AtomicBool::new(true));
        let config = SaConfig::default().with_seed(42);
        let result = SaRunner::run_with_cancel(&Tour::identity(&dm), &dm, &config, Some(cancel))
            .unwrap();
        assert!(result.cancelled);
        assert_eq!(result.iterations, 0);
    }

    #[test]
    fn test_sa_small_instances_unchanged() {
        for coords in [vec![(0.0, 0.0)], vec![(0.0, 0.0), (1.0, 1.0)]] {
            let dm = matrix(&coords);
            let tour = Tour::identity(&dm);
            let result = SaRunner::run(&tour, &dm, &SaConfig::default().with_seed(1)).unwrap();
            assert_eq!(result.best, tour);
            assert_eq!(result.iterations, 0);
        }
    }

    #[test]
    fn test_sa_three_points_swaps_interior() {
        let dm = matrix(&[(0.0, 0.0), (1.0, 0.0), (2.0, 0.0)]);
        let tour = Tour::identity(&dm);
        let result = SaRunner::run(&tour, &dm, &SaConfig::default().with_seed(4)).unwrap();
        assert!(result.best.is_valid(3));
        assert!((result.best.cost() - 4.0).abs() < 1e-10);
    }

    #[test]
    fn test_sa_ignores_stale_cached_cost() {
        let dm = matrix(&[(0.0, 0.0), (1.0, 0.0), (1.0, 1.0)]);
        let stale = Tour::with_cost(vec![0, 1, 2, 0], -100.0);
        let result = SaRunner::run(&stale, &dm, &SaConfig::default().with_seed(2)).unwrap();
        assert_eq!(result.best.cost(), result.best.recompute_cost(&dm));
        assert!((result.best.cost() - (2.0 + 2f64.sqrt())).abs() < 1e-12);
        assert!((result.cost_history[0] - result.best.cost()).abs() < 1e-12);
    }

    #[test]
    fn test_sa_rejects_invalid_config() {
        let dm = scattered(5);
        let config = SaConfig::default().with_cooling_rate(1.0);
        let err = SaRunner::run(&Tour::identity(&dm), &dm, &config).unwrap_err();
        assert!(matches!(err, TspError::InvalidConfig(_)));
    }
}
