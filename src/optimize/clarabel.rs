use clarabel::algebra::*;
use clarabel::solver::*;

use crate::error::{OptimizationError, Result};
use crate::math::Vector;

use super::{LpProblem, LpSolver};

/// [`LpSolver`] backend built on the Clarabel interior-point solver.
pub struct ClarabelSolver(DefaultSettings<f64>);

impl Default for ClarabelSolver {
    fn default() -> Self {
        Self(DefaultSettings {
            verbose: false,
            ..DefaultSettings::default()
        })
    }
}

impl ClarabelSolver {
    /// Creates a backend with explicit solver settings.
    #[must_use]
    pub fn new(settings: DefaultSettings<f64>) -> Self {
        Self(settings)
    }
}

impl LpSolver for ClarabelSolver {
    fn solve(&self, problem: &LpProblem) -> Result<Vector> {
        let k = problem.objective.len();
        let n_eq = problem.eq_rhs.len();
        debug_assert_eq!(problem.eq_matrix.nrows(), n_eq);
        debug_assert_eq!(problem.eq_matrix.ncols(), k);

        // Clarabel takes constraints as Ax + s = b with s in a cone product:
        // the first n_eq rows are pinned to zero slack (equalities), then one
        // row per variable for each side of the [0, 1] box.
        let mut b = Vec::with_capacity(n_eq + 2 * k);
        b.extend(problem.eq_rhs.iter().copied());
        b.extend(std::iter::repeat(1.0).take(k)); // x_j + s = 1
        b.extend(std::iter::repeat(0.0).take(k)); // -x_j + s = 0
        let cones = [ZeroConeT(n_eq), NonnegativeConeT(2 * k)];

        // Constraint matrix in CSC form, column per variable; rows within a
        // column must stay in increasing order.
        let mut nzval = Vec::new();
        let mut rowval = Vec::new();
        let mut colptr = Vec::with_capacity(k + 1);
        for j in 0..k {
            colptr.push(nzval.len());
            for i in 0..n_eq {
                let v = problem.eq_matrix[(i, j)];
                if v.abs() > 0.0 {
                    nzval.push(v);
                    rowval.push(i);
                }
            }
            nzval.push(1.0);
            rowval.push(n_eq + j);
            nzval.push(-1.0);
            rowval.push(n_eq + k + j);
        }
        colptr.push(nzval.len());

        let a = CscMatrix {
            m: b.len(),
            n: k,
            colptr,
            rowval,
            nzval,
        };

        // Pure LP: the quadratic term is a zero diagonal.
        let p = CscMatrix {
            m: k,
            n: k,
            colptr: (0..=k).collect(),
            rowval: (0..k).collect(),
            nzval: vec![0.0; k],
        };

        let q: Vec<f64> = problem.objective.iter().copied().collect();

        let mut solver = DefaultSolver::new(&p, &q, &a, &b, &cones, self.0.clone())
            .map_err(|e| OptimizationError::Solver(format!("{e:?}")))?;
        solver.solve();

        match solver.solution.status {
            SolverStatus::Solved => Ok(Vector::from_vec(solver.solution.x.clone())),
            SolverStatus::PrimalInfeasible | SolverStatus::AlmostPrimalInfeasible => {
                Err(OptimizationError::Infeasible.into())
            }
            SolverStatus::DualInfeasible | SolverStatus::AlmostDualInfeasible => {
                Err(OptimizationError::Unbounded.into())
            }
            SolverStatus::MaxIterations => Err(OptimizationError::IterationLimit.into()),
            status => Err(OptimizationError::Solver(format!("{status:?}")).into()),
        }
    }
}
