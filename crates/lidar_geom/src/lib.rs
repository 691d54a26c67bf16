//! Validated triangle mesh storage for the LiDAR ray-cast engine.

mod error;
mod triangle_store;

pub use error::GeometryError;
pub use triangle_store::TriangleStore;
