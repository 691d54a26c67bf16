//! Sensor configuration, ray generation and scan driving for a rotating
//! multi-beam LiDAR.

mod config;
mod error;
mod pose;
mod rays;
mod scan;

pub use config::{presets, SensorConfig};
pub use error::ConfigError;
pub use pose::Pose;
pub use rays::{generate as generate_rays, ray_for};
pub use scan::scan_into;
