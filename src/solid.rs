//! The colour solid: construction, lazy geometry, and colour queries.
//!
//! A [`ColourSolid`] is built from a matrix of photoreceptor sensitivity
//! curves, one column per channel. Columns are normalized to unit sum so that
//! a flat unit reflectance lands at the all-ones corner, then consecutive
//! sample rows are pooled into generator points. The hull of achievable
//! responses is grown on demand and memoized; colour and boundary queries
//! work directly on the normalized curves and never need the hull.

use std::fmt;

use tracing::{info, warn};

use crate::error::{GeometryError, Result, ShapeError};
use crate::geometry::{self, Hull};
use crate::math::{interp, Matrix, Vector};
use crate::optimize::{self, centre, ClarabelSolver, LpSolver};

/// Construction-time knobs for [`ColourSolid`].
#[derive(Debug, Clone)]
pub struct SolidOptions {
    /// Sample positions for the curve rows, enabling resampling of
    /// reflectances given on a different grid.
    pub wavelengths: Option<Vector>,
    /// Pooling threshold: consecutive rows are merged until some channel of
    /// the running sum exceeds this value.
    pub pool_tolerance: f64,
    /// Number of pooled points above which the lazy hull computation logs an
    /// advisory before running.
    pub max_points: usize,
    /// Grow the hull during construction instead of on first access.
    pub force_calculate: bool,
}

impl Default for SolidOptions {
    fn default() -> Self {
        Self {
            wavelengths: None,
            pool_tolerance: 0.05,
            max_points: 50,
            force_calculate: false,
        }
    }
}

/// The solid of responses a set of photoreceptor channels can reach from
/// reflectances bounded to `[0, 1]`.
pub struct ColourSolid {
    /// K x D sensitivity curves, each column normalized to unit sum.
    base_curves: Matrix,
    wavelengths: Option<Vector>,
    /// Pooled generator points, one per row.
    pooled: Matrix,
    max_points: usize,
    hull: Option<Hull>,
    solver: Box<dyn LpSolver>,
}

// The boxed solver has no Debug bound, so the derive is unavailable.
impl fmt::Debug for ColourSolid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ColourSolid")
            .field("channels", &self.channels())
            .field("samples", &self.samples())
            .field("pooled", &self.pooled.nrows())
            .field("hull", &self.hull.is_some())
            .finish_non_exhaustive()
    }
}

impl ColourSolid {
    /// Builds a solid from sensitivity curves (samples x channels) with
    /// default options.
    ///
    /// # Errors
    ///
    /// See [`ColourSolid::with_options`].
    pub fn new(curves: Matrix) -> Result<Self> {
        Self::with_options(curves, SolidOptions::default())
    }

    /// Builds a solid from sensitivity curves (samples x channels).
    ///
    /// # Errors
    ///
    /// Returns [`ShapeError::WavelengthCount`] when the supplied wavelengths
    /// do not match the curve rows, and [`GeometryError::Degenerate`] for an
    /// empty matrix or a channel with no positive yield.
    pub fn with_options(curves: Matrix, options: SolidOptions) -> Result<Self> {
        let samples = curves.nrows();
        let channels = curves.ncols();
        if samples == 0 || channels == 0 {
            return Err(GeometryError::Degenerate("empty curve matrix".into()).into());
        }
        if let Some(w) = &options.wavelengths {
            if w.len() != samples {
                return Err(ShapeError::WavelengthCount {
                    expected: samples,
                    actual: w.len(),
                }
                .into());
            }
        }

        let mut base_curves = curves;
        for c in 0..channels {
            let total: f64 = base_curves.column(c).sum();
            if total <= 0.0 {
                return Err(GeometryError::Degenerate(format!(
                    "channel {c} has no positive yield"
                ))
                .into());
            }
            for r in 0..samples {
                base_curves[(r, c)] /= total;
            }
        }

        let pooled = pool(&base_curves, options.pool_tolerance);
        info!(
            channels,
            samples,
            pooled = pooled.nrows(),
            "constructed colour solid"
        );

        let mut solid = Self {
            base_curves,
            wavelengths: options.wavelengths,
            pooled,
            max_points: options.max_points,
            hull: None,
            solver: Box::new(ClarabelSolver::default()),
        };
        if options.force_calculate {
            solid.calculate()?;
        }
        Ok(solid)
    }

    /// Number of photoreceptor channels D.
    #[must_use]
    pub fn channels(&self) -> usize {
        self.base_curves.ncols()
    }

    /// Number of spectral samples K.
    #[must_use]
    pub fn samples(&self) -> usize {
        self.base_curves.nrows()
    }

    /// The normalized sensitivity curves, one column per channel.
    #[must_use]
    pub fn curves(&self) -> &Matrix {
        &self.base_curves
    }

    /// The pooled generator points the solid is grown from, one per row.
    #[must_use]
    pub fn pooled_points(&self) -> &Matrix {
        &self.pooled
    }

    /// Replaces the linear-programming backend used by boundary queries.
    pub fn set_solver(&mut self, solver: Box<dyn LpSolver>) {
        self.solver = solver;
    }

    /// Grows and memoizes the hull now instead of on first geometric access.
    ///
    /// Idempotent; a second call is free.
    ///
    /// # Errors
    ///
    /// Propagates [`GeometryError`](crate::error::GeometryError) when the
    /// pooled points do not span the channel space.
    pub fn calculate(&mut self) -> Result<()> {
        if self.hull.is_some() {
            return Ok(());
        }
        info!(
            channels = self.channels(),
            points = self.pooled.nrows(),
            "growing colour solid hull"
        );
        self.hull = Some(geometry::grow(&self.pooled)?);
        Ok(())
    }

    /// The hull of achievable responses, grown on first access.
    ///
    /// # Errors
    ///
    /// See [`ColourSolid::calculate`].
    pub fn hull(&mut self) -> Result<&Hull> {
        if self.hull.is_none() {
            if self.pooled.nrows() > self.max_points {
                warn!(
                    points = self.pooled.nrows(),
                    threshold = self.max_points,
                    "growing a hull over many generator points; consider a \
                     coarser pooling tolerance or calling calculate() upfront"
                );
            }
            self.calculate()?;
        }
        match self.hull.as_ref() {
            Some(hull) => Ok(hull),
            None => Err(GeometryError::Degenerate("hull unavailable".into()).into()),
        }
    }

    /// Coordinates of the hull vertices, one row per vertex.
    ///
    /// # Errors
    ///
    /// See [`ColourSolid::calculate`].
    pub fn points(&mut self) -> Result<Matrix> {
        Ok(self.hull()?.vertex_points())
    }

    /// The `dimension`-dimensional boundary simplices, in hull-vertex
    /// indices.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::InvalidDimension`] for a dimension above the
    /// hull's facet dimension, plus anything [`ColourSolid::calculate`]
    /// raises.
    pub fn simplices(&mut self, dimension: usize) -> Result<Vec<Vec<usize>>> {
        geometry::simplices(self.hull()?, dimension)
    }

    /// The hull's edges as vertex-index pairs.
    ///
    /// # Errors
    ///
    /// See [`ColourSolid::simplices`].
    pub fn edges(&mut self) -> Result<Vec<Vec<usize>>> {
        self.simplices(1)
    }

    /// The hull's triangular faces.
    ///
    /// # Errors
    ///
    /// See [`ColourSolid::simplices`].
    pub fn faces(&mut self) -> Result<Vec<Vec<usize>>> {
        self.simplices(2)
    }

    /// The hull's tetrahedral cells (meaningful from D = 4 up).
    ///
    /// # Errors
    ///
    /// See [`ColourSolid::simplices`].
    pub fn cells(&mut self) -> Result<Vec<Vec<usize>>> {
        self.simplices(3)
    }

    /// Intersects the hull's edges with the plane at `offset` along
    /// `direction`, returning the crossing points as an unordered cloud.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::InvalidDimension`] unless the solid is
    /// three-channel, [`GeometryError::ZeroVector`] for a direction whose
    /// components sum to zero, plus anything [`ColourSolid::calculate`]
    /// raises.
    pub fn cross_section(&mut self, offset: f64, direction: &Vector) -> Result<Vec<Vector>> {
        if self.channels() != 3 {
            return Err(GeometryError::InvalidDimension {
                dimension: self.channels(),
                max: 3,
            }
            .into());
        }
        let edges = self.edges()?;
        let points = self.points()?;
        geometry::slice_edges(&points, &edges, offset, direction)
    }

    /// The response (quantum catch per channel) of a reflectance spectrum.
    ///
    /// With `wavelengths` given, the reflectance is resampled from that grid
    /// onto the solid's construction grid first.
    ///
    /// # Errors
    ///
    /// Returns [`ShapeError::ReflectanceLength`] on a length mismatch and
    /// [`ShapeError::MissingWavelengths`] when resampling is requested but no
    /// construction grid exists.
    pub fn colour(&self, reflectance: &Vector, wavelengths: Option<&Vector>) -> Result<Vector> {
        let resampled = match wavelengths {
            None => {
                if reflectance.len() != self.samples() {
                    return Err(ShapeError::ReflectanceLength {
                        expected: self.samples(),
                        actual: reflectance.len(),
                    }
                    .into());
                }
                reflectance.clone()
            }
            Some(grid) => {
                if reflectance.len() != grid.len() {
                    return Err(ShapeError::ReflectanceLength {
                        expected: grid.len(),
                        actual: reflectance.len(),
                    }
                    .into());
                }
                let own = self
                    .wavelengths
                    .as_ref()
                    .ok_or(ShapeError::MissingWavelengths)?;
                interp::resample(own, grid, reflectance)
            }
        };
        Ok(self.base_curves.transpose() * resampled)
    }

    /// The extreme spectrum whose response sits on the boundary in the
    /// direction of `colour` from the centre.
    ///
    /// # Errors
    ///
    /// See [`optimize::boundary_spectrum`].
    pub fn boundary_spectrum(&self, colour: &Vector) -> Result<Vector> {
        optimize::boundary_spectrum(&self.base_curves, colour, self.solver.as_ref())
    }

    /// The boundary response in the direction of `colour` from the centre.
    ///
    /// # Errors
    ///
    /// See [`optimize::boundary_spectrum`].
    pub fn boundary_colour(&self, colour: &Vector) -> Result<Vector> {
        let spectrum = self.boundary_spectrum(colour)?;
        self.colour(&spectrum, None)
    }

    /// Distance from the centre to the boundary in the direction of
    /// `colour`. Exactly zero when `colour` is the centre itself, without
    /// touching the solver.
    ///
    /// # Errors
    ///
    /// See [`optimize::boundary_spectrum`].
    pub fn boundary_distance(&self, colour: &Vector) -> Result<f64> {
        if colour.len() != self.channels() {
            return Err(ShapeError::ColourLength {
                expected: self.channels(),
                actual: colour.len(),
            }
            .into());
        }
        let displacement: f64 = colour.iter().map(|v| (v - 0.5).abs()).sum();
        if displacement <= 0.0 {
            return Ok(0.0);
        }
        let boundary = self.boundary_colour(colour)?;
        Ok((boundary - centre(self.channels())).norm())
    }

    /// Vividness of a response: its distance from the centre as a fraction
    /// of the boundary distance in the same direction. Boundary responses
    /// score 1, the centre itself is 0 / 0 and comes back as NaN.
    ///
    /// # Errors
    ///
    /// See [`optimize::boundary_spectrum`].
    pub fn vividness_from_colour(&self, colour: &Vector) -> Result<f64> {
        // boundary_distance validates the colour length before any algebra.
        let outer = self.boundary_distance(colour)?;
        let inner = (colour - centre(self.channels())).norm();
        Ok(inner / outer)
    }

    /// Vividness of a reflectance spectrum's response.
    ///
    /// # Errors
    ///
    /// See [`ColourSolid::colour`] and [`ColourSolid::vividness_from_colour`].
    pub fn vividness(&self, reflectance: &Vector, wavelengths: Option<&Vector>) -> Result<f64> {
        let colour = self.colour(reflectance, wavelengths)?;
        self.vividness_from_colour(&colour)
    }
}

/// Pools consecutive curve rows into generator points.
///
/// Rows accumulate in order until some channel of the running sum exceeds
/// `tolerance`; the sum is then committed and the walk restarts at the next
/// row. The final remainder is always committed, so pooling preserves column
/// sums.
fn pool(curves: &Matrix, tolerance: f64) -> Matrix {
    let mut committed: Vec<Vector> = Vec::new();
    let mut current = curves.row(0).transpose();
    for i in 1..curves.nrows() {
        if current.iter().any(|&v| v > tolerance) {
            committed.push(current);
            current = curves.row(i).transpose();
        } else {
            current += curves.row(i).transpose();
        }
    }
    committed.push(current);

    let d = curves.ncols();
    Matrix::from_fn(committed.len(), d, |r, c| committed[r][c])
}
