//! Assembly of the boundary-spectrum linear program.
//!
//! "Find the farthest achievable response toward a target colour" becomes an
//! LP over the K sample weights: maximize the signed response along
//! `target - centre`, with every weight boxed to `[0, 1]` and the response
//! point pinned to the line through the centre and the target by the
//! implicit-line equalities applied to the generator curves.

use crate::error::{GeometryError, Result, ShapeError};
use crate::math::implicit_line::ImplicitLine;
use crate::math::{Matrix, Vector, TOLERANCE};

use super::{LpProblem, LpSolver};

/// The solid's centre: the all-0.5 response vector.
#[must_use]
pub fn centre(channels: usize) -> Vector {
    Vector::from_element(channels, 0.5)
}

/// Solves for the extreme spectrum whose response lies on the solid boundary
/// in the direction of `colour`, seen from the centre.
///
/// `curves` is the K x D normalized generator-curve matrix; the returned
/// vector has one weight per sample row.
///
/// # Errors
///
/// Returns [`ShapeError::ColourLength`] for a wrong-size target,
/// [`GeometryError::UndefinedDirection`] when every channel of the target is
/// within [`TOLERANCE`] of the centre (checked before any solve), and the
/// solver's
/// [`OptimizationError`](crate::error::OptimizationError) when the program
/// has no optimum.
pub fn boundary_spectrum(
    curves: &Matrix,
    colour: &Vector,
    solver: &dyn LpSolver,
) -> Result<Vector> {
    let channels = curves.ncols();
    if colour.len() != channels {
        return Err(ShapeError::ColourLength {
            expected: channels,
            actual: colour.len(),
        }
        .into());
    }

    let centre = centre(channels);
    let direction = colour - &centre;
    // Same threshold the implicit line pivots on, so a target this close to
    // the centre reports a missing direction rather than a zero line vector.
    if direction.amax() < TOLERANCE {
        return Err(GeometryError::UndefinedDirection.into());
    }

    let line = ImplicitLine::through(&centre, colour)?;

    let problem = LpProblem {
        objective: -(curves * &direction),
        eq_matrix: line.matrix() * curves.transpose(),
        eq_rhs: line.rhs().clone(),
    };

    solver.solve(&problem)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::error::SolidError;
    use crate::optimize::ClarabelSolver;
    use approx::assert_relative_eq;
    use std::cell::RefCell;

    /// Captures the assembled program instead of solving it.
    struct Capture(RefCell<Option<LpProblem>>);

    impl Capture {
        fn new() -> Self {
            Self(RefCell::new(None))
        }
    }

    impl LpSolver for Capture {
        fn solve(&self, problem: &LpProblem) -> Result<Vector> {
            *self.0.borrow_mut() = Some(problem.clone());
            Ok(Vector::zeros(problem.objective.len()))
        }
    }

    fn identity_curves() -> Matrix {
        Matrix::identity(2, 2)
    }

    #[test]
    fn centre_target_is_rejected_before_any_solve() {
        let capture = Capture::new();
        let err = boundary_spectrum(
            &identity_curves(),
            &Vector::from_row_slice(&[0.5, 0.5]),
            &capture,
        )
        .unwrap_err();

        assert!(matches!(
            err,
            SolidError::Geometry(GeometryError::UndefinedDirection)
        ));
        assert!(capture.0.borrow().is_none(), "no program should be assembled");
    }

    #[test]
    fn near_centre_targets_have_no_direction_either() {
        let capture = Capture::new();
        let err = boundary_spectrum(
            &identity_curves(),
            &Vector::from_row_slice(&[0.5 + 1e-12, 0.5 - 1e-12]),
            &capture,
        )
        .unwrap_err();

        assert!(matches!(
            err,
            SolidError::Geometry(GeometryError::UndefinedDirection)
        ));
        assert!(capture.0.borrow().is_none(), "no program should be assembled");
    }

    #[test]
    fn wrong_length_target_is_a_shape_error() {
        let capture = Capture::new();
        let err = boundary_spectrum(
            &identity_curves(),
            &Vector::from_row_slice(&[0.5, 0.5, 0.5]),
            &capture,
        )
        .unwrap_err();

        assert!(matches!(err, SolidError::Shape(ShapeError::ColourLength { .. })));
    }

    #[test]
    fn assembles_the_expected_program() {
        let capture = Capture::new();
        boundary_spectrum(
            &identity_curves(),
            &Vector::from_row_slice(&[1.0, 0.5]),
            &capture,
        )
        .unwrap();

        let problem = capture.0.borrow().clone().unwrap();

        // Objective rewards weight on the first channel only.
        assert_relative_eq!(problem.objective[0], -0.5);
        assert_relative_eq!(problem.objective[1], 0.0);

        // The line through centre and target is "second response = 0.5".
        assert_eq!(problem.eq_matrix.nrows(), 1);
        assert_relative_eq!(problem.eq_matrix[(0, 0)], 0.0);
        assert_relative_eq!(problem.eq_matrix[(0, 1)], 1.0);
        assert_relative_eq!(problem.eq_rhs[0], 0.5);
    }

    #[test]
    fn recovers_the_extreme_spectrum_through_clarabel() {
        let spectrum = boundary_spectrum(
            &identity_curves(),
            &Vector::from_row_slice(&[1.0, 0.5]),
            &ClarabelSolver::default(),
        )
        .unwrap();

        assert_relative_eq!(spectrum[0], 1.0, epsilon = 1e-6);
        assert_relative_eq!(spectrum[1], 0.5, epsilon = 1e-6);
    }
}
