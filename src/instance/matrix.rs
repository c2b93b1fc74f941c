//! Dense symmetric Euclidean distance matrix.

use super::point::{Point, PointSet};

/// A dense n×n distance matrix stored in row-major order.
///
/// Built once from a point set and read-only afterwards; it can be shared
/// by reference across any number of independent runs.
///
/// # Examples
///
/// ```
/// use u_tsp::instance::{DistanceMatrix, PointSet};
///
/// let points = PointSet::from_coords(&[(0.0, 0.0), (3.0, 4.0), (6.0, 8.0)]).unwrap();
/// let dm = DistanceMatrix::from_point_set(&points);
/// assert!((dm.get(0, 1) - 5.0).abs() < 1e-10);
/// assert_eq!(dm.get(2, 0), dm.get(0, 2));
/// assert_eq!(dm.size(), 3);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct DistanceMatrix {
    data: Vec<f64>,
    size: usize,
}

impl DistanceMatrix {
    /// Computes pairwise Euclidean distances.
    ///
    /// Each unordered pair is computed once and written to both cells, so
    /// the result is exactly symmetric. An empty or single-point slice
    /// yields an empty or 1×1 zero matrix.
    pub fn from_points(points: &[Point]) -> Self {
        let n = points.len();
        let mut data = vec![0.0; n * n];
        for i in 0..n {
            for j in (i + 1)..n {
                let d = points[i].distance_to(&points[j]);
                data[i * n + j] = d;
                data[j * n + i] = d;
            }
        }
        Self { data, size: n }
    }

    pub fn from_point_set(points: &PointSet) -> Self {
        Self::from_points(points.points())
    }

    /// Returns the distance between points `from` and `to`.
    ///
    /// # Panics
    ///
    /// Panics if either index is out of bounds.
    #[inline]
    pub fn get(&self, from: usize, to: usize) -> f64 {
        self.data[from * self.size + to]
    }

    /// Row `from` as a slice.
    pub fn row(&self, from: usize) -> &[f64] {
        &self.data[from * self.size..(from + 1) * self.size]
    }

    /// Number of points in this matrix.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Returns `true` if `D[i][j] == D[j][i]` within `tol` and the diagonal is zero.
    pub fn is_symmetric(&self, tol: f64) -> bool {
        for i in 0..self.size {
            if self.get(i, i).abs() > tol {
                return false;
            }
            for j in (i + 1)..self.size {
                if (self.get(i, j) - self.get(j, i)).abs() > tol {
                    return false;
                }
            }
        }
        true
    }

    /// Checks `D[i][k] <= D[i][j] + D[j][k]` for every triple. O(n³).
    pub fn satisfies_triangle_inequality(&self, tol: f64) -> bool {
        let n = self.size;
        for i in 0..n {
            for j in 0..n {
                for k in 0..n {
                    if self.get(i, k) > self.get(i, j) + self.get(j, k) + tol {
                        return false;
                    }
                }
            }
        }
        true
    }

    /// Nearest other point to `from`. Ties resolve to the lowest index.
    ///
    /// Returns `None` when the matrix has fewer than two points.
    pub fn nearest_to(&self, from: usize) -> Option<usize> {
        let mut best: Option<(usize, f64)> = None;
        for (j, &d) in self.row(from).iter().enumerate() {
            if j == from {
                continue;
            }
            if best.is_none_or(|(_, bd)| d < bd) {
                best = Some((j, d));
            }
        }
        best.map(|(j, _)| j)
    }
}
