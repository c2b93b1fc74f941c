//! Nearest-insertion tour construction.
//!
//! # Algorithm
//!
//! 1. Start from point 0 and its nearest neighbor: path = `[0, nearest]`.
//! 2. While unvisited points remain, find the pair (path position `i`,
//!    unvisited point `j`) minimizing `D[path[i]][j]` and insert `j`
//!    right after position `i`.
//! 3. Close the path by returning to 0.
//!
//! Ties resolve to the first minimum in scan order: path position first,
//! then point index. The scan is the naive O(n²) per step, O(n³) overall.
//!
//! # Reference
//!
//! Rosenkrantz, D.J., Stearns, R.E. & Lewis, P.M. (1977). "An analysis of
//! several heuristics for the traveling salesman problem",
//! *SIAM Journal on Computing* 6(3), 563-581.

use log::info;

use crate::instance::DistanceMatrix;
use crate::tour::Tour;

/// Builds an initial tour by nearest insertion.
///
/// Degenerate sizes are valid: zero points give an empty tour and one
/// point gives `[0, 0]`, both with cost 0.
///
/// # Examples
///
/// ```
/// use u_tsp::construction::nearest_insertion;
/// use u_tsp::instance::{DistanceMatrix, PointSet};
///
/// let points = PointSet::from_coords(&[(0.0, 0.0), (0.0, 1.0), (1.0, 1.0), (1.0, 0.0)]).unwrap();
/// let dm = DistanceMatrix::from_point_set(&points);
/// let tour = nearest_insertion(&dm);
/// assert_eq!(tour.order().len(), 5);
/// assert!((tour.cost() - 4.0).abs() < 1e-10);
/// ```
pub fn nearest_insertion(matrix: &DistanceMatrix) -> Tour {
    let n = matrix.size();
    let Some(nearest) = matrix.nearest_to(0) else {
        return Tour::identity(matrix);
    };

    info!("nearest insertion: n={n}");

    let mut visited = vec![false; n];
    visited[0] = true;
    visited[nearest] = true;

    let mut path = Vec::with_capacity(n + 1);
    path.push(0);
    path.push(nearest);

    while path.len() < n {
        // (position, point, distance); the first unvisited candidate is
        // always taken so the choice exists even for infinite distances.
        let mut best: Option<(usize, usize, f64)> = None;

        for (i, &from) in path.iter().enumerate() {
            let row = matrix.row(from);
            for (j, &d) in row.iter().enumerate() {
                if !visited[j] && best.is_none_or(|(_, _, bd)| d < bd) {
                    best = Some((i, j, d));
                }
            }
        }

        // Unvisited points remain while the path is short.
        let Some((position, point, _)) = best else {
            break;
        };
        path.insert(position + 1, point);
        visited[point] = true;
    }

    path.push(0);
    let tour = Tour::new_unchecked(path, matrix);
    info!("nearest insertion: n={n} cost={:.4}", tour.cost());
    tour
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::instance::{Point, PointSet};

    fn matrix(coords: &[(f64, f64)]) -> DistanceMatrix {
        DistanceMatrix::from_point_set(&PointSet::from_coords(coords).unwrap())
    }

    #[test]
    fn test_unit_square_perimeter() {
        let dm = matrix(&[(0.0, 0.0), (0.0, 1.0), (1.0, 1.0), (1.0, 0.0)]);
        let tour = nearest_insertion(&dm);
        assert!(tour.is_valid(4));
        assert!((tour.cost() - 4.0).abs() < 1e-10);
    }

    #[test]
    fn test_tie_break_scan_order() {
        // From 0, points 1 and 3 tie at distance 1: 1 is chosen first.
        // Then position 0 (point 0) reaches 3 at distance 1 before
        // position 1 (point 1) reaches 2 at distance 1, so 3 is inserted
        // right after 0.
        let dm = matrix(&[(0.0, 0.0), (0.0, 1.0), (1.0, 1.0), (1.0, 0.0)]);
        let tour = nearest_insertion(&dm);
        assert_eq!(tour.order(), &[0, 3, 2, 1, 0]);
    }

    #[test]
    fn test_collinear_points() {
        let dm = matrix(&[(0.0, 0.0), (1.0, 0.0), (2.0, 0.0)]);
        let tour = nearest_insertion(&dm);
        assert!(tour.is_valid(3));
        assert!((tour.cost() - 4.0).abs() < 1e-10);
    }

    #[test]
    fn test_degenerate_sizes() {
        let single = matrix(&[(1.0, 1.0)]);
        let tour = nearest_insertion(&single);
        assert_eq!(tour.order(), &[0, 0]);
        assert_eq!(tour.cost(), 0.0);

        let empty = DistanceMatrix::from_points(&[]);
        let tour = nearest_insertion(&empty);
        assert!(tour.order().is_empty());
        assert_eq!(tour.cost(), 0.0);

        let pair = matrix(&[(0.0, 0.0), (3.0, 4.0)]);
        let tour = nearest_insertion(&pair);
        assert_eq!(tour.order(), &[0, 1, 0]);
        assert!((tour.cost() - 10.0).abs() < 1e-12);
    }

    #[test]
    fn test_insertion_follows_closest_path_point() {
        let dm = matrix(&[(0.0, 0.0), (10.0, 0.0), (1.0, 0.0), (5.0, 5.0)]);
        let tour = nearest_insertion(&dm);
        // 2 is nearest to 0; 3 is closest to 2; 1 is closest to 3.
        assert_eq!(tour.order(), &[0, 2, 3, 1, 0]);
    }

    #[test]
    fn test_deterministic() {
        let coords: Vec<(f64, f64)> = (0..30)
            .map(|i| {
                let t = i as f64 * 0.7;
                (t.cos() * (10.0 + i as f64), t.sin() * (7.0 + i as f64))
            })
            .collect();
        let dm = matrix(&coords);
        let a = nearest_insertion(&dm);
        let b = nearest_insertion(&dm);
        assert_eq!(a, b);
        assert!(a.is_valid(30));
        assert_eq!(a.cost(), a.recompute_cost(&dm));
    }

    #[test]
    fn test_wide_instance_completes() {
        let dm = matrix(&[(0.0, 0.0), (1e200, 0.0), (-1e200, 0.0)]);
        let tour = nearest_insertion(&dm);
        assert!(tour.is_valid(3));
        assert!(tour.cost().is_finite());
        assert!((tour.cost() - 4e200).abs() <= 4e200 * 1e-12);
    }

    #[test]
    fn test_infinite_distances_still_yield_valid_tour() {
        // Built from raw points, so no span check: 1 -> 2 and 0 -> 2 overflow.
        let points = [
            Point::new(0, -1.5e308, 0.0),
            Point::new(1, -1.4e308, 0.0),
            Point::new(2, 1.5e308, 0.0),
        ];
        let dm = DistanceMatrix::from_points(&points);
        assert!(dm.get(1, 2).is_infinite());
        let tour = nearest_insertion(&dm);
        assert!(tour.is_valid(3));
        assert_eq!(tour.order(), &[0, 2, 1, 0]);
    }
}
