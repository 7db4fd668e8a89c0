//! Wavefront OBJ output for two- and three-channel solids.

use std::io::Write;

use crate::error::{GeometryError, Result};
use crate::geometry;
use crate::math::{Matrix, Vector};
use crate::optimize::centre;
use crate::solid::ColourSolid;

/// Writes an n-by-3 vertex matrix and 0-indexed face lists as OBJ text.
///
/// # Errors
///
/// Propagates I/O errors from the writer.
pub fn write_mesh<W: Write>(
    vertices: &Matrix,
    faces: &[Vec<usize>],
    out: &mut W,
) -> Result<()> {
    for r in 0..vertices.nrows() {
        writeln!(
            out,
            "v {} {} {}",
            vertices[(r, 0)],
            vertices[(r, 1)],
            vertices[(r, 2)]
        )?;
    }
    for face in faces {
        write!(out, "f")?;
        for &index in face {
            write!(out, " {}", index + 1)?;
        }
        writeln!(out)?;
    }
    Ok(())
}

/// Writes the solid's boundary as an OBJ mesh.
///
/// A two-channel solid becomes a single flat polygon with a zero-padded
/// third coordinate; a three-channel solid is triangulated with every face
/// wound to point away from the centre.
///
/// # Errors
///
/// Returns [`GeometryError::InvalidDimension`] for channel counts other than
/// 2 and 3; otherwise propagates hull and I/O errors.
pub fn write_solid<W: Write>(solid: &mut ColourSolid, out: &mut W) -> Result<()> {
    match solid.channels() {
        2 => {
            // Hull vertices come back in a circular order, so the outline is
            // a single face listing them as-is.
            let flat = solid.points()?;
            let vertices = Matrix::from_fn(flat.nrows(), 3, |r, c| {
                if c < 2 {
                    flat[(r, c)]
                } else {
                    0.0
                }
            });
            let outline: Vec<usize> = (0..flat.nrows()).collect();
            write_mesh(&vertices, &[outline], out)
        }
        3 => {
            // Re-hull the vertex subset so facet indices line up with the
            // vertex rows being written.
            let vertices = solid.points()?;
            let hull = geometry::convex_hull(&vertices)?;
            let centre = centre(3);
            let faces: Vec<Vec<usize>> = hull
                .facets()
                .iter()
                .map(|facet| orient_outward(&vertices, facet, &centre))
                .collect();
            write_mesh(&vertices, &faces, out)
        }
        dimension => Err(GeometryError::InvalidDimension { dimension, max: 3 }.into()),
    }
}

/// Returns the triangle wound so its normal points away from the centre.
fn orient_outward(vertices: &Matrix, face: &[usize], centre: &Vector) -> Vec<usize> {
    let p1 = vertices.row(face[0]).transpose();
    let p2 = vertices.row(face[1]).transpose();
    let p3 = vertices.row(face[2]).transpose();

    let normal = (&p1 - &p3).cross(&(&p2 - &p3));
    if normal.dot(&(&p1 - centre)) > 0.0 {
        vec![face[0], face[1], face[2]]
    } else {
        vec![face[2], face[1], face[0]]
    }
}
