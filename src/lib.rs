pub mod error;
pub mod export;
pub mod geometry;
pub mod math;
pub mod optimize;
pub mod solid;
pub mod spectrum;

pub use error::{Result, SolidError};
pub use solid::{ColourSolid, SolidOptions};
