//! Mesh export of the solid surface.

pub mod obj;

pub use obj::{write_mesh, write_solid};
