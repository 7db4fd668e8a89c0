//! Incremental growth of the colour solid.
//!
//! The solid is the Minkowski sum of the segments `[0, p]` over the generator
//! points `p`: the working set starts at the origin, is extended by each of
//! the first D points to form the initial parallelepiped, and every further
//! point is folded in by extend-then-prune. Pruning the working set to the
//! current hull's vertices after each insertion bounds its size at the cost
//! of one hull computation per point.

use tracing::debug;

use crate::error::Result;
use crate::math::{Matrix, Vector};

use super::{convex_hull, Hull};

/// Grows the hull of achievable responses from an ordered sequence of
/// generator points (one per row).
///
/// A one-channel input skips geometric computation entirely and returns the
/// fixed `[0, 1]` segment.
///
/// # Errors
///
/// Propagates [`GeometryError`](crate::error::GeometryError) from the hull
/// primitive when an intermediate or final point set is degenerate.
pub fn grow(points: &Matrix) -> Result<Hull> {
    let n = points.nrows();
    let d = points.ncols();

    if d == 1 {
        return Ok(Hull::unit_segment());
    }

    let mut working: Vec<Vector> = vec![Vector::zeros(d)];
    let seed = n.min(d);
    for i in 0..seed {
        extend(&mut working, &points.row(i).transpose());
    }

    for i in seed..n {
        extend(&mut working, &points.row(i).transpose());
        let hull = convex_hull(&to_matrix(&working, d))?;
        let pruned = hull.vertex_points();
        working = (0..pruned.nrows()).map(|r| pruned.row(r).transpose()).collect();
        debug!(
            inserted = i + 1,
            total = n,
            working = working.len(),
            "pruned working set to hull vertices"
        );
    }

    convex_hull(&to_matrix(&working, d))
}

/// Doubles the working set with a copy translated by `point`.
fn extend(working: &mut Vec<Vector>, point: &Vector) {
    let shifted: Vec<Vector> = working.iter().map(|w| w + point).collect();
    working.extend(shifted);
}

fn to_matrix(rows: &[Vector], d: usize) -> Matrix {
    Matrix::from_fn(rows.len(), d, |r, c| rows[r][c])
}
