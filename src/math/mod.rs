pub mod implicit_line;
pub mod interp;
pub mod simplex;

/// Dynamically sized column vector.
pub type Vector = nalgebra::DVector<f64>;

/// Dynamically sized matrix.
pub type Matrix = nalgebra::DMatrix<f64>;

/// Global geometric tolerance for floating-point comparisons.
pub const TOLERANCE: f64 = 1e-10;
