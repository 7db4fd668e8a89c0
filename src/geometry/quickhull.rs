//! Dimension-generic incremental convex hull.
//!
//! Works for ambient dimensions 2 through 6 and moderate point counts, which
//! is all the growth protocol ever asks for. Hull combinatorics are computed
//! on a deterministically perturbed copy of the input so that exactly-flat
//! faces (ubiquitous in zonotope-like solids) triangulate cleanly; the
//! reported coordinates are always the exact input values.

use std::collections::BTreeMap;

use crate::error::{GeometryError, Result};
use crate::math::simplex::{canonical_key, simplex_faces};
use crate::math::{Matrix, Vector};

use super::Hull;

/// Magnitude of the symbolic perturbation applied before classification.
const PERTURBATION: f64 = 1e-7;

/// Strict-visibility threshold on perturbed coordinates. Must sit well below
/// [`PERTURBATION`] and well above f64 rounding noise.
const VISIBILITY_EPSILON: f64 = 1e-12;

/// Residual threshold for the affine-rank probe on the exact input.
const RANK_EPSILON: f64 = 1e-9;

struct Facet {
    vertices: Vec<usize>,
    normal: Vector,
    offset: f64,
}

/// Computes the convex hull of a point set (one point per row).
///
/// Rank-1 inputs produce the degenerate segment hull described on [`Hull`].
///
/// # Errors
///
/// Returns [`GeometryError::Degenerate`] when the points coincide, span an
/// intermediate affine rank below the ambient dimension, or produce a
/// degenerate facet.
pub fn convex_hull(points: &Matrix) -> Result<Hull> {
    let n = points.nrows();
    let d = points.ncols();

    if d < 2 {
        return Err(degenerate("ambient dimension must be at least 2"));
    }
    if n < 2 {
        return Err(degenerate("at least two points are required"));
    }

    let unique = unique_points(points);
    let (simplex, basis) = affine_basis(points, &unique);
    let rank = basis.len();

    if rank == 0 {
        return Err(degenerate("all points coincide"));
    }
    if rank == 1 {
        return Ok(segment_hull(points, &unique, &basis[0]));
    }
    if rank < d {
        return Err(degenerate(&format!(
            "points span only {rank} of {d} dimensions"
        )));
    }

    build(points, &unique, &simplex)
}

fn degenerate(reason: &str) -> crate::SolidError {
    GeometryError::Degenerate(reason.to_owned()).into()
}

/// Indices of the first occurrence of each distinct point, in input order.
fn unique_points(points: &Matrix) -> Vec<usize> {
    let mut unique: Vec<usize> = Vec::new();
    for i in 0..points.nrows() {
        let duplicate = unique.iter().any(|&j| {
            (0..points.ncols()).all(|c| (points[(i, c)] - points[(j, c)]).abs() < 1e-12)
        });
        if !duplicate {
            unique.push(i);
        }
    }
    unique
}

/// Greedily selects affinely independent points, returning their indices
/// (first entry is the base point) and an orthonormal basis of the spanned
/// directions.
fn affine_basis(points: &Matrix, candidates: &[usize]) -> (Vec<usize>, Vec<Vector>) {
    let d = points.ncols();
    let base = candidates[0];
    let mut simplex = vec![base];
    let mut basis: Vec<Vector> = Vec::new();

    while basis.len() < d {
        let mut best: Option<(usize, Vector, f64)> = None;
        for &i in &candidates[1..] {
            if simplex.contains(&i) {
                continue;
            }
            let mut r = row(points, i) - row(points, base);
            for u in &basis {
                let coeff = r.dot(u);
                r -= u * coeff;
            }
            let norm = r.norm();
            if best.as_ref().is_none_or(|(_, _, n)| norm > *n) {
                best = Some((i, r, norm));
            }
        }
        match best {
            Some((i, r, norm)) if norm > RANK_EPSILON => {
                simplex.push(i);
                basis.push(r / norm);
            }
            _ => break,
        }
    }

    (simplex, basis)
}

/// The degenerate hull of collinear points: extremes along the spanned
/// direction, joined by a single 1-simplex facet.
fn segment_hull(points: &Matrix, unique: &[usize], direction: &Vector) -> Hull {
    let mut lo = unique[0];
    let mut hi = unique[0];
    let mut lo_t = row(points, lo).dot(direction);
    let mut hi_t = lo_t;
    for &i in &unique[1..] {
        let t = row(points, i).dot(direction);
        if t < lo_t {
            lo = i;
            lo_t = t;
        }
        if t > hi_t {
            hi = i;
            hi_t = t;
        }
    }
    Hull {
        points: points.clone(),
        vertices: vec![lo, hi],
        facets: vec![vec![lo, hi]],
    }
}

fn build(points: &Matrix, unique: &[usize], simplex: &[usize]) -> Result<Hull> {
    let d = points.ncols();
    let coords = perturb(points);

    let mut interior = Vector::zeros(d);
    for &i in simplex {
        interior += row(&coords, i);
    }
    #[allow(clippy::cast_precision_loss)]
    {
        interior /= simplex.len() as f64;
    }

    let mut facets: Vec<Facet> = simplex_faces(simplex)
        .into_iter()
        .map(|verts| make_facet(&coords, verts, &interior))
        .collect::<Result<_>>()?;

    for &pi in unique {
        if simplex.contains(&pi) {
            continue;
        }
        let p = row(&coords, pi);

        let visible: Vec<usize> = (0..facets.len())
            .filter(|&fi| {
                let f = &facets[fi];
                f.normal.dot(&p) - f.offset > VISIBILITY_EPSILON
            })
            .collect();
        if visible.is_empty() {
            // Interior of the current hull.
            continue;
        }

        // A ridge of the visible region belonging to exactly one visible
        // facet sits on the horizon; every horizon ridge plus the new point
        // forms a replacement facet.
        let mut ridge_count: BTreeMap<Vec<usize>, usize> = BTreeMap::new();
        for &fi in &visible {
            for ridge in simplex_faces(&facets[fi].vertices) {
                *ridge_count.entry(canonical_key(&ridge)).or_insert(0) += 1;
            }
        }

        let mut replacements = Vec::new();
        for (ridge, count) in ridge_count {
            if count == 1 {
                let mut verts = ridge;
                verts.push(pi);
                replacements.push(make_facet(&coords, verts, &interior)?);
            }
        }

        let mut keep = vec![true; facets.len()];
        for &fi in &visible {
            keep[fi] = false;
        }
        let mut kept: Vec<Facet> = facets
            .into_iter()
            .zip(keep)
            .filter_map(|(f, k)| k.then_some(f))
            .collect();
        kept.append(&mut replacements);
        facets = kept;
    }

    let mut vertices: Vec<usize> = facets
        .iter()
        .flat_map(|f| f.vertices.iter().copied())
        .collect();
    vertices.sort_unstable();
    vertices.dedup();
    if d == 2 {
        order_counter_clockwise(points, &mut vertices);
    }

    Ok(Hull {
        points: points.clone(),
        vertices,
        facets: facets.into_iter().map(|f| f.vertices).collect(),
    })
}

/// Builds the oriented facet through `verts`, outward with respect to the
/// interior reference point.
fn make_facet(coords: &Matrix, verts: Vec<usize>, interior: &Vector) -> Result<Facet> {
    let Some((mut normal, mut offset)) = hyperplane(coords, &verts) else {
        return Err(degenerate("facet vertices are affinely dependent"));
    };
    let side = normal.dot(interior) - offset;
    if side.abs() < VISIBILITY_EPSILON {
        return Err(degenerate("interior reference point lies on a facet"));
    }
    if side > 0.0 {
        normal = -normal;
        offset = -offset;
    }
    Ok(Facet {
        vertices: verts,
        normal,
        offset,
    })
}

/// Unit normal and offset of the hyperplane through `d` points, via the
/// generalized cross product (cofactor expansion of the edge matrix).
fn hyperplane(coords: &Matrix, verts: &[usize]) -> Option<(Vector, f64)> {
    let d = coords.ncols();
    let mut edges = Matrix::zeros(d - 1, d);
    for (r, &v) in verts[1..].iter().enumerate() {
        for c in 0..d {
            edges[(r, c)] = coords[(v, c)] - coords[(verts[0], c)];
        }
    }

    let mut normal = Vector::zeros(d);
    let mut sign = 1.0;
    for j in 0..d {
        normal[j] = sign * edges.clone().remove_column(j).determinant();
        sign = -sign;
    }

    let norm = normal.norm();
    if norm < 1e-12 {
        return None;
    }
    normal /= norm;
    let offset = normal.dot(&row(coords, verts[0]));
    Some((normal, offset))
}

/// Deterministic perturbed copy of the points, used only for classification.
fn perturb(points: &Matrix) -> Matrix {
    Matrix::from_fn(points.nrows(), points.ncols(), |r, c| {
        points[(r, c)] + PERTURBATION * (unit_hash(r, c) - 0.5)
    })
}

#[allow(clippy::cast_precision_loss)]
fn unit_hash(r: usize, c: usize) -> f64 {
    let mut z = ((r as u64) << 32) ^ (c as u64);
    z = z.wrapping_add(0x9E37_79B9_7F4A_7C15);
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^= z >> 31;
    z as f64 / u64::MAX as f64
}

fn row(points: &Matrix, i: usize) -> Vector {
    points.row(i).transpose()
}

fn order_counter_clockwise(points: &Matrix, vertices: &mut [usize]) {
    #[allow(clippy::cast_precision_loss)]
    let count = vertices.len() as f64;
    let cx = vertices.iter().map(|&v| points[(v, 0)]).sum::<f64>() / count;
    let cy = vertices.iter().map(|&v| points[(v, 1)]).sum::<f64>() / count;
    vertices.sort_by(|&a, &b| {
        let ta = (points[(a, 1)] - cy).atan2(points[(a, 0)] - cx);
        let tb = (points[(b, 1)] - cy).atan2(points[(b, 0)] - cx);
        ta.partial_cmp(&tb).unwrap_or(std::cmp::Ordering::Equal)
    });
}
