use crate::error::{GeometryError, Result};

use super::{Matrix, Vector, TOLERANCE};

/// An implicit representation `A x = b` of the line through two points.
///
/// Starting from the parametric form `x = p + k (q - p)`, the component with
/// the largest-magnitude direction entry (the pivot) is solved for `k` and
/// substituted into the remaining components. The pivot row becomes the
/// trivial identity `x_pivot = x_pivot` and is dropped, leaving a rank
/// `D - 1` system whose solution set is exactly the line.
#[derive(Debug, Clone)]
pub struct ImplicitLine {
    matrix: Matrix,
    rhs: Vector,
}

impl ImplicitLine {
    /// Builds the implicit line through `p` and `q`.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::ZeroVector`] if `p == q` (no unique line) and
    /// [`GeometryError::Degenerate`] if the points have different lengths.
    pub fn through(p: &Vector, q: &Vector) -> Result<Self> {
        let n = p.len();
        if q.len() != n {
            return Err(GeometryError::Degenerate(format!(
                "line endpoints have different lengths ({} vs {})",
                n,
                q.len()
            ))
            .into());
        }

        let r = q - p;

        // Pivot on the largest-magnitude direction component.
        let mut pivot = 0;
        for i in 1..n {
            if r[i].abs() > r[pivot].abs() {
                pivot = i;
            }
        }
        let r_pivot = r[pivot];
        if r_pivot.abs() < TOLERANCE {
            return Err(GeometryError::ZeroVector.into());
        }

        let mut matrix = Matrix::identity(n, n);
        matrix.set_column(pivot, &(-&r / r_pivot));
        let matrix = matrix.remove_row(pivot);

        let rhs = p - &r * (p[pivot] / r_pivot);
        let rhs = rhs.remove_row(pivot);

        Ok(Self { matrix, rhs })
    }

    /// The `(D-1) x D` coefficient matrix `A`.
    #[must_use]
    pub fn matrix(&self) -> &Matrix {
        &self.matrix
    }

    /// The length `D-1` right-hand side `b`.
    #[must_use]
    pub fn rhs(&self) -> &Vector {
        &self.rhs
    }

    /// Whether `x` satisfies `A x = b` within [`TOLERANCE`].
    #[must_use]
    pub fn contains(&self, x: &Vector) -> bool {
        let residual = &self.matrix * x - &self.rhs;
        residual.amax() < TOLERANCE
    }
}
