//! Rotating multi-beam LiDAR ray-cast simulator.
//!
//! `Simulator` is the top-level facade: it owns a sensor config, a
//! triangle mesh and its BVH, and a reusable hit buffer, and exposes
//! load-geometry / scan / set-config / free.

mod error;
mod simulator;

pub use error::SimulatorError;
pub use simulator::Simulator;

pub use lidar_sensor::{presets, ConfigError, Pose, SensorConfig};
