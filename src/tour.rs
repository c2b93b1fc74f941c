//! Closed tours and the shared cost evaluator.

use crate::error::{Result, TspError};
use crate::instance::DistanceMatrix;

/// Total length of a visiting order: the sum of `matrix[order[k]][order[k+1]]`
/// over consecutive positions.
///
/// Orders with fewer than two entries cost 0. This is the single source of
/// truth every algorithm uses to compare tours.
///
/// # Examples
///
/// ```
/// use u_tsp::instance::{DistanceMatrix, PointSet};
/// use u_tsp::tour::tour_cost;
///
/// let points = PointSet::from_coords(&[(0.0, 0.0), (0.0, 1.0), (1.0, 1.0), (1.0, 0.0)]).unwrap();
/// let dm = DistanceMatrix::from_point_set(&points);
/// assert!((tour_cost(&[0, 1, 2, 3, 0], &dm) - 4.0).abs() < 1e-12);
/// assert_eq!(tour_cost(&[2], &dm), 0.0);
/// ```
pub fn tour_cost(order: &[usize], matrix: &DistanceMatrix) -> f64 {
    order.windows(2).map(|w| matrix.get(w[0], w[1])).sum()
}

/// Checks that `order` is a closed tour over `0..n`: `n + 1` entries,
/// first equals last, and the first `n` entries are a permutation.
///
/// For `n == 0` the only valid order is the empty one.
pub fn validate_order(order: &[usize], n: usize) -> Result<()> {
    if n == 0 {
        if order.is_empty() {
            return Ok(());
        }
        return Err(TspError::invalid_tour("a tour over zero points must be empty"));
    }
    if order.len() != n + 1 {
        return Err(TspError::invalid_tour(format!(
            "expected {} entries for {n} points, got {}",
            n + 1,
            order.len()
        )));
    }
    if order[0] != order[n] {
        return Err(TspError::invalid_tour(format!(
            "tour is not closed: starts at {} but ends at {}",
            order[0], order[n]
        )));
    }
    let mut seen = vec![false; n];
    for &p in &order[..n] {
        if p >= n {
            return Err(TspError::invalid_tour(format!("point {p} out of range 0..{n}")));
        }
        if seen[p] {
            return Err(TspError::invalid_tour(format!("point {p} visited twice")));
        }
        seen[p] = true;
    }
    Ok(())
}

/// A Hamiltonian cycle as an index sequence with its cached length.
///
/// `order[0] == order[n]` closes the loop; the cached cost always equals
/// [`tour_cost`] over the order.
///
/// With the `serde` feature a tour serializes but does not deserialize:
/// rebuild one with [`Tour::from_order`] so the cost comes from a matrix.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Tour {
    order: Vec<usize>,
    cost: f64,
}

impl Tour {
    /// Validates `order` against the matrix size and computes its cost.
    pub fn from_order(order: Vec<usize>, matrix: &DistanceMatrix) -> Result<Self> {
        validate_order(&order, matrix.size())?;
        Ok(Self::new_unchecked(order, matrix))
    }

    /// The tour visiting `0, 1, .., n-1` in index order and returning to 0.
    pub fn identity(matrix: &DistanceMatrix) -> Self {
        let n = matrix.size();
        let mut order: Vec<usize> = (0..n).collect();
        if n > 0 {
            order.push(0);
        }
        Self::new_unchecked(order, matrix)
    }

    /// Wraps an order the caller already knows to be valid.
    pub(crate) fn new_unchecked(order: Vec<usize>, matrix: &DistanceMatrix) -> Self {
        let cost = tour_cost(&order, matrix);
        Self { order, cost }
    }

    /// Wraps an order whose cost was just computed with [`tour_cost`].
    pub(crate) fn with_cost(order: Vec<usize>, cost: f64) -> Self {
        Self { order, cost }
    }

    /// The closed visiting order (`n + 1` entries).
    pub fn order(&self) -> &[usize] {
        &self.order
    }

    pub fn into_order(self) -> Vec<usize> {
        self.order
    }

    /// Cached total length.
    pub fn cost(&self) -> f64 {
        self.cost
    }

    /// Number of distinct points visited.
    pub fn num_points(&self) -> usize {
        self.order.len().saturating_sub(1)
    }

    /// Starting (and closing) point, if any.
    pub fn start(&self) -> Option<usize> {
        self.order.first().copied()
    }

    /// Consecutive `(from, to)` pairs, closing edge included.
    pub fn edges(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.order.windows(2).map(|w| (w[0], w[1]))
    }

    /// Whether this tour is a closed permutation of `0..n`.
    pub fn is_valid(&self, n: usize) -> bool {
        validate_order(&self.order, n).is_ok()
    }

    /// Recomputes the length from the matrix, ignoring the cache.
    pub fn recompute_cost(&self, matrix: &DistanceMatrix) -> f64 {
        tour_cost(&self.order, matrix)
    }
}
