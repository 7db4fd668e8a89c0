//! Dimension-indexed extraction of the hull's boundary simplices.
//!
//! The hull's facets are the top-dimension simplices; every lower dimension
//! is derived by an iterative descent, reducing each simplex to its faces and
//! deduplicating on the sorted index tuple at each level. Results are
//! expressed in hull-vertex indices (positions in [`Hull::vertices`]), not
//! raw point indices.

use std::collections::HashMap;

use crate::error::{GeometryError, Result};
use crate::math::simplex::{dedup_simplices, simplex_faces};

use super::Hull;

/// Returns the `dimension`-dimensional simplices of the hull boundary.
///
/// `dimension` ranges over `[0, D-1]`: `D-1` gives the facets themselves
/// (reindexed to hull vertices), `0` one singleton per hull vertex in vertex
/// order, and anything between the deduplicated faces of the level above.
///
/// # Errors
///
/// Returns [`GeometryError::InvalidDimension`] when `dimension` exceeds the
/// hull's top simplex dimension.
pub fn simplices(hull: &Hull, dimension: usize) -> Result<Vec<Vec<usize>>> {
    // Degenerate hulls carry facets one level below the ambient dimension,
    // so read the top level off the facets themselves.
    let top = hull.facets().first().map_or(0, |f| f.len() - 1);
    if dimension > top {
        return Err(GeometryError::InvalidDimension {
            dimension,
            max: top,
        }
        .into());
    }

    if dimension == 0 {
        return Ok((0..hull.vertices().len()).map(|i| vec![i]).collect());
    }

    let position: HashMap<usize, usize> = hull
        .vertices()
        .iter()
        .enumerate()
        .map(|(pos, &point)| (point, pos))
        .collect();

    let mut current: Vec<Vec<usize>> = hull
        .facets()
        .iter()
        .map(|facet| facet.iter().map(|point| position[point]).collect())
        .collect();

    for _ in dimension..top {
        let faces = current.iter().flat_map(|s| simplex_faces(s)).collect();
        current = dedup_simplices(faces);
    }

    Ok(current)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::geometry::convex_hull;
    use crate::math::simplex::canonical_key;
    use crate::math::Matrix;

    fn octahedron() -> Hull {
        let mut points = Matrix::zeros(6, 3);
        for i in 0..3 {
            points[(2 * i, i)] = 1.0;
            points[(2 * i + 1, i)] = -1.0;
        }
        convex_hull(&points).unwrap()
    }

    #[test]
    fn octahedron_face_edge_vertex_counts() {
        let hull = octahedron();

        assert_eq!(simplices(&hull, 2).unwrap().len(), 8);
        assert_eq!(simplices(&hull, 1).unwrap().len(), 12);
        assert_eq!(simplices(&hull, 0).unwrap().len(), 6);
    }

    #[test]
    fn top_dimension_matches_the_facets() {
        let hull = octahedron();
        let position: HashMap<usize, usize> = hull
            .vertices()
            .iter()
            .enumerate()
            .map(|(pos, &point)| (point, pos))
            .collect();

        let mut expected: Vec<Vec<usize>> = hull
            .facets()
            .iter()
            .map(|f| canonical_key(&f.iter().map(|p| position[p]).collect::<Vec<_>>()))
            .collect();
        expected.sort();

        let mut actual: Vec<Vec<usize>> = simplices(&hull, 2)
            .unwrap()
            .iter()
            .map(|s| canonical_key(s))
            .collect();
        actual.sort();

        assert_eq!(actual, expected);
    }

    #[test]
    fn every_simplex_is_a_face_of_the_level_above() {
        let hull = octahedron();
        for dimension in 0..2 {
            let lower = simplices(&hull, dimension).unwrap();
            let upper = simplices(&hull, dimension + 1).unwrap();
            for s in &lower {
                let is_face = upper
                    .iter()
                    .any(|u| s.iter().all(|v| u.contains(v)));
                assert!(is_face, "{s:?} is not a face of any {:?}-simplex", dimension + 1);
            }
        }
    }

    #[test]
    fn no_duplicate_canonical_forms_survive() {
        let hull = octahedron();
        for dimension in 0..3 {
            let level = simplices(&hull, dimension).unwrap();
            let mut keys: Vec<Vec<usize>> = level.iter().map(|s| canonical_key(s)).collect();
            keys.sort();
            let before = keys.len();
            keys.dedup();
            assert_eq!(keys.len(), before, "duplicates at dimension {dimension}");
        }
    }

    #[test]
    fn indices_reference_the_vertex_array() {
        let hull = octahedron();
        for dimension in 0..3 {
            for s in simplices(&hull, dimension).unwrap() {
                for v in s {
                    assert!(v < hull.vertices().len());
                }
            }
        }
    }

    #[test]
    fn four_dimensional_cross_polytope_levels() {
        let mut points = Matrix::zeros(8, 4);
        for i in 0..4 {
            points[(2 * i, i)] = 1.0;
            points[(2 * i + 1, i)] = -1.0;
        }
        let hull = convex_hull(&points).unwrap();

        assert_eq!(simplices(&hull, 3).unwrap().len(), 16);
        assert_eq!(simplices(&hull, 2).unwrap().len(), 32);
        assert_eq!(simplices(&hull, 1).unwrap().len(), 24);
        assert_eq!(simplices(&hull, 0).unwrap().len(), 8);
    }

    #[test]
    fn out_of_range_dimension_is_an_error() {
        let hull = octahedron();
        assert!(matches!(
            simplices(&hull, 5),
            Err(crate::SolidError::Geometry(
                GeometryError::InvalidDimension { dimension: 5, max: 2 }
            ))
        ));
    }

    #[test]
    fn unit_segment_exposes_its_endpoints() {
        let hull = Hull::unit_segment();
        assert_eq!(simplices(&hull, 0).unwrap(), vec![vec![0], vec![1]]);
        assert!(simplices(&hull, 1).is_err());
    }
}
