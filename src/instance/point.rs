//! Points and the re-indexed point set.

use std::collections::HashSet;

use crate::error::{Result, TspError};

/// A labeled 2-D coordinate. `id` is the point's 0-based position in
/// its [`PointSet`].
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Point {
    pub id: usize,
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(id: usize, x: f64, y: f64) -> Self {
        Self { id, x, y }
    }

    /// Euclidean distance to another point.
    pub fn distance_to(&self, other: &Point) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

/// A raw `(id, x, y)` record as produced by an instance reader.
///
/// Ids are arbitrary labels: they need not be contiguous or 0-based.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Record {
    pub id: i64,
    pub x: f64,
    pub y: f64,
}

impl From<(i64, f64, f64)> for Record {
    fn from((id, x, y): (i64, f64, f64)) -> Self {
        Self { id, x, y }
    }
}

/// Immutable, non-empty collection of points with `points[i].id == i`.
///
/// # Examples
///
/// ```
/// use u_tsp::instance::PointSet;
///
/// // 1-based ids are re-indexed by input position.
/// let set = PointSet::from_records([(1i64, 0.0, 0.0), (2, 3.0, 4.0)]).unwrap();
/// assert_eq!(set.len(), 2);
/// assert_eq!(set.get(1).id, 1);
/// assert!((set.get(0).distance_to(set.get(1)) - 5.0).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "Vec<Point>", into = "Vec<Point>"))]
pub struct PointSet {
    points: Vec<Point>,
}

impl PointSet {
    /// Builds a point set from raw records, re-indexing to `0..n` in
    /// input order.
    ///
    /// Fails on an empty input, on duplicate input ids, on non-finite
    /// coordinates and on coordinate spreads so wide that a tour length
    /// would overflow `f64`.
    pub fn from_records<I, R>(records: I) -> Result<Self>
    where
        I: IntoIterator<Item = R>,
        R: Into<Record>,
    {
        let mut seen = HashSet::new();
        let mut points = Vec::new();

        for record in records {
            let record = record.into();
            if !seen.insert(record.id) {
                return Err(TspError::DuplicateId { id: record.id });
            }
            if !record.x.is_finite() || !record.y.is_finite() {
                return Err(TspError::NonFiniteCoordinate { id: record.id });
            }
            points.push(Point::new(points.len(), record.x, record.y));
        }

        if points.is_empty() {
            return Err(TspError::EmptyInstance);
        }
        check_span(&points)?;
        Ok(Self { points })
    }

    /// Builds a point set from bare coordinates; ids follow input order.
    pub fn from_coords(coords: &[(f64, f64)]) -> Result<Self> {
        Self::from_records(
            coords
                .iter()
                .enumerate()
                .map(|(i, &(x, y))| Record { id: i as i64, x, y }),
        )
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Always `false`: construction rejects empty inputs.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Returns the point with the given index.
    ///
    /// # Panics
    ///
    /// Panics if `id >= self.len()`.
    pub fn get(&self, id: usize) -> &Point {
        &self.points[id]
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Point> {
        self.points.iter()
    }
}

/// Rejects point clouds whose bounding-box diagonal times `n` is not
/// finite. Every edge is at most the diagonal, so any tour length fits.
fn check_span(points: &[Point]) -> Result<()> {
    let (mut min_x, mut max_x) = (f64::INFINITY, f64::NEG_INFINITY);
    let (mut min_y, mut max_y) = (f64::INFINITY, f64::NEG_INFINITY);
    for p in points {
        min_x = min_x.min(p.x);
        max_x = max_x.max(p.x);
        min_y = min_y.min(p.y);
        max_y = max_y.max(p.y);
    }
    let diagonal = (max_x - min_x).hypot(max_y - min_y);
    if (diagonal * points.len() as f64).is_finite() {
        Ok(())
    } else {
        Err(TspError::CoordinateRange)
    }
}

impl TryFrom<Vec<Point>> for PointSet {
    type Error = TspError;

    /// Points are treated as records keyed by their `id`, then re-indexed.
    fn try_from(points: Vec<Point>) -> Result<Self> {
        Self::from_records(points.into_iter().map(|p| Record {
            id: p.id as i64,
            x: p.x,
            y: p.y,
        }))
    }
}

impl From<PointSet> for Vec<Point> {
    fn from(set: PointSet) -> Self {
        set.points
    }
}

impl<'a> IntoIterator for &'a PointSet {
    type Item = &'a Point;
    type IntoIter = std::slice::Iter<'a, Point>;

    fn into_iter(self) -> Self::IntoIter {
        self.points.iter()
    }
}
