pub mod growth;
pub mod quickhull;
pub mod simplices;
pub mod slicer;

pub use growth::grow;
pub use quickhull::convex_hull;
pub use simplices::simplices;
pub use slicer::slice_edges;

use crate::math::Matrix;

/// The convex hull of a point set in D-space.
///
/// `points` holds every input point (rows); `vertices` indexes the subset on
/// the hull, counter-clockwise for D = 2 and ascending otherwise; `facets`
/// are the top-dimension boundary simplices, each a list of D point indices.
///
/// A rank-1 point configuration is represented as a degenerate hull: two
/// vertices and a single 1-simplex facet spanning them.
#[derive(Debug, Clone)]
pub struct Hull {
    pub(crate) points: Matrix,
    pub(crate) vertices: Vec<usize>,
    pub(crate) facets: Vec<Vec<usize>>,
}

impl Hull {
    /// The ambient dimension D.
    #[must_use]
    pub fn dim(&self) -> usize {
        self.points.ncols()
    }

    /// Every point the hull was built from, one row per point.
    #[must_use]
    pub fn points(&self) -> &Matrix {
        &self.points
    }

    /// Indices of the points on the hull boundary.
    #[must_use]
    pub fn vertices(&self) -> &[usize] {
        &self.vertices
    }

    /// Top-dimension facets, as tuples of indices into [`Hull::points`].
    #[must_use]
    pub fn facets(&self) -> &[Vec<usize>] {
        &self.facets
    }

    /// Coordinates of the hull vertices, one row per vertex, in
    /// [`Hull::vertices`] order.
    #[must_use]
    pub fn vertex_points(&self) -> Matrix {
        Matrix::from_fn(self.vertices.len(), self.points.ncols(), |r, c| {
            self.points[(self.vertices[r], c)]
        })
    }

    /// The fixed `[0, 1]` segment a one-channel solid degenerates to.
    ///
    /// No geometric computation is involved; the two endpoints are the only
    /// vertices and double as the (0-simplex) facets.
    #[must_use]
    pub fn unit_segment() -> Self {
        Self {
            points: Matrix::from_column_slice(2, 1, &[0.0, 1.0]),
            vertices: vec![0, 1],
            facets: vec![vec![0], vec![1]],
        }
    }
}
