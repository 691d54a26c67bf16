use lidar_geom::GeometryError;
use lidar_sensor::ConfigError;
use thiserror::Error;

/// Errors a [`crate::Simulator`] can report. Both variants wrap a lower
/// crate's validation error; neither is recoverable locally.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SimulatorError {
    #[error("invalid sensor config: {0}")]
    InvalidConfig(#[from] ConfigError),

    #[error("invalid geometry: {0}")]
    InvalidGeometry(#[from] GeometryError),
}
