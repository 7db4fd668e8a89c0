use thiserror::Error;

/// Top-level error type for the chromasolid kernel.
#[derive(Debug, Error)]
pub enum SolidError {
    #[error(transparent)]
    Shape(#[from] ShapeError),

    #[error(transparent)]
    Geometry(#[from] GeometryError),

    #[error(transparent)]
    Optimization(#[from] OptimizationError),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Errors raised when an input array violates a shape precondition.
#[derive(Debug, Error)]
pub enum ShapeError {
    #[error("expected {expected} wavelength entries to match the curve samples, got {actual}")]
    WavelengthCount { expected: usize, actual: usize },

    #[error("expected a colour vector with {expected} entries, got {actual}")]
    ColourLength { expected: usize, actual: usize },

    #[error("expected a reflectance with {expected} entries, got {actual}")]
    ReflectanceLength { expected: usize, actual: usize },

    #[error("no wavelengths were supplied at construction, cannot resample")]
    MissingWavelengths,
}

/// Errors related to hull and simplex computations.
#[derive(Debug, Error)]
pub enum GeometryError {
    #[error("degenerate geometry: {0}")]
    Degenerate(String),

    #[error("zero-length vector")]
    ZeroVector,

    #[error("dimension {dimension} is out of range [0, {max}]")]
    InvalidDimension { dimension: usize, max: usize },

    #[error("the centre of the solid has no boundary direction")]
    UndefinedDirection,
}

/// Errors reported by the linear-programming backend.
///
/// The solver status is preserved so callers can tell an infeasible model
/// from a solver that simply ran out of iterations.
#[derive(Debug, Error)]
pub enum OptimizationError {
    #[error("problem appears to be infeasible")]
    Infeasible,

    #[error("problem appears to be unbounded")]
    Unbounded,

    #[error("iteration limit reached")]
    IterationLimit,

    #[error("solver failed: {0}")]
    Solver(String),
}

/// Convenience type alias for results using [`SolidError`].
pub type Result<T> = std::result::Result<T, SolidError>;
