//! Cross-sections of a hull's 1-skeleton.
//!
//! Every hull point is projected onto the slicing direction to a scalar
//! coordinate; an edge crosses the slicing plane when its endpoints' scalars
//! straddle the plane offset strictly. The crossing points are returned as an
//! unordered cloud — callers wanting a drawable polygon re-hull them in 2-D.

use crate::error::{GeometryError, Result};
use crate::math::{Matrix, Vector, TOLERANCE};

/// Intersects the given edges with the hyperplane at `offset` along
/// `direction`.
///
/// The direction is scaled by the sum of its components, not its Euclidean
/// norm; this matches the reference behaviour slice-for-slice and is pinned
/// by a test below.
///
/// # Errors
///
/// Returns [`GeometryError::ZeroVector`] if the direction components sum
/// to zero.
pub fn slice_edges(
    points: &Matrix,
    edges: &[Vec<usize>],
    offset: f64,
    direction: &Vector,
) -> Result<Vec<Vector>> {
    let total: f64 = direction.iter().sum();
    if total.abs() < TOLERANCE {
        return Err(GeometryError::ZeroVector.into());
    }
    let scaled = direction / total;

    let zs: Vec<f64> = (0..points.nrows())
        .map(|r| points.row(r).transpose().dot(&scaled))
        .collect();

    let mut crossings = Vec::new();
    for edge in edges {
        let (i0, i1) = (edge[0], edge[1]);
        let (z0, z1) = (zs[i0], zs[i1]);

        let crosses = if z0 < offset { offset < z1 } else { offset > z1 };
        if crosses {
            let f = (offset - z0).abs() / (z1 - z0).abs();
            let p = points.row(i1).transpose() * f + points.row(i0).transpose() * (1.0 - f);
            crossings.push(p);
        }
    }

    Ok(crossings)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn unit_cube() -> (Matrix, Vec<Vec<usize>>) {
        let points = Matrix::from_fn(8, 3, |r, c| f64::from(u8::from(((r >> c) & 1) != 0)));
        let mut edges = Vec::new();
        for a in 0..8_usize {
            for b in (a + 1)..8 {
                if (a ^ b).count_ones() == 1 {
                    edges.push(vec![a, b]);
                }
            }
        }
        (points, edges)
    }

    #[test]
    fn mid_cube_slice_hits_the_four_vertical_edges() {
        let (points, edges) = unit_cube();
        let direction = Vector::from_row_slice(&[0.0, 0.0, 1.0]);

        let slice = slice_edges(&points, &edges, 0.5, &direction).unwrap();

        assert_eq!(slice.len(), 4);
        for p in &slice {
            assert_relative_eq!(p[2], 0.5);
            assert!(p[0].abs() < 1e-12 || (p[0] - 1.0).abs() < 1e-12);
            assert!(p[1].abs() < 1e-12 || (p[1] - 1.0).abs() < 1e-12);
        }
    }

    #[test]
    fn offsets_outside_the_solid_cross_nothing() {
        let (points, edges) = unit_cube();
        let direction = Vector::from_row_slice(&[0.0, 0.0, 1.0]);

        assert!(slice_edges(&points, &edges, 1.5, &direction).unwrap().is_empty());
        assert!(slice_edges(&points, &edges, -0.5, &direction).unwrap().is_empty());
    }

    #[test]
    fn touching_endpoints_do_not_count_as_crossings() {
        let (points, edges) = unit_cube();
        let direction = Vector::from_row_slice(&[0.0, 0.0, 1.0]);

        // The plane through z = 0 contains four edges and touches the other
        // eight at an endpoint; none straddle it strictly.
        assert!(slice_edges(&points, &edges, 0.0, &direction).unwrap().is_empty());
    }

    #[test]
    fn crossing_points_interpolate_linearly() {
        let points = Matrix::from_fn(2, 3, |r, c| {
            if c == 2 {
                f64::from(u8::from(r == 1)) * 4.0
            } else {
                0.0
            }
        });
        let edges = vec![vec![0, 1]];
        let direction = Vector::from_row_slice(&[0.0, 0.0, 1.0]);

        let slice = slice_edges(&points, &edges, 1.0, &direction).unwrap();
        assert_eq!(slice.len(), 1);
        assert_relative_eq!(slice[0][2], 1.0);
    }

    #[test]
    fn direction_scaled_by_component_sum() {
        // The direction is deliberately scaled by its component sum, not its
        // Euclidean norm. For the diagonal edge below that puts the offset-0.5
        // crossing at the midpoint; unit-norm scaling would place it at
        // 0.5 / sqrt(2) along the edge instead.
        let points = Matrix::from_fn(2, 3, |r, c| {
            if r == 1 && c < 2 {
                1.0
            } else {
                0.0
            }
        });
        let edges = vec![vec![0, 1]];
        let direction = Vector::from_row_slice(&[1.0, 1.0, 0.0]);

        let slice = slice_edges(&points, &edges, 0.5, &direction).unwrap();
        assert_eq!(slice.len(), 1);
        assert_relative_eq!(slice[0][0], 0.5);
        assert_relative_eq!(slice[0][1], 0.5);
    }

    #[test]
    fn zero_sum_direction_is_an_error() {
        let (points, edges) = unit_cube();
        let direction = Vector::from_row_slice(&[1.0, -1.0, 0.0]);
        assert!(slice_edges(&points, &edges, 0.5, &direction).is_err());
    }
}
