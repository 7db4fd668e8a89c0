pub mod boundary;
pub mod clarabel;

pub use boundary::{boundary_spectrum, centre};
pub use clarabel::ClarabelSolver;

use crate::error::Result;
use crate::math::{Matrix, Vector};

/// A linear program over sample weights boxed to `[0, 1]`.
///
/// Minimize `objective . x` subject to `eq_matrix * x = eq_rhs` and
/// `0 <= x[i] <= 1` for every component.
#[derive(Debug, Clone)]
pub struct LpProblem {
    /// Linear objective coefficients, one per sample weight.
    pub objective: Vector,
    /// Equality constraint coefficients, one row per constraint.
    pub eq_matrix: Matrix,
    /// Equality constraint right-hand sides.
    pub eq_rhs: Vector,
}

/// A pluggable linear-programming backend.
///
/// Keeping the backend behind a trait means the boundary optimizer's
/// constraint assembly never needs to know which solver runs underneath, and
/// tests can substitute instrumented implementations.
pub trait LpSolver {
    /// Solves the program, returning the optimal sample-weight vector.
    ///
    /// # Errors
    ///
    /// Returns [`OptimizationError`](crate::error::OptimizationError) with
    /// the solver's status preserved when no optimum is found.
    fn solve(&self, problem: &LpProblem) -> Result<Vector>;
}
