//! Problem instance: points and their distance matrix.
//!
//! Raw `(id, x, y)` records are re-indexed to `0..n` when a [`PointSet`]
//! is built, so a point's id is always its row in the [`DistanceMatrix`].

mod matrix;
mod point;

pub use matrix::DistanceMatrix;
pub use point::{Point, PointSet, Record};
