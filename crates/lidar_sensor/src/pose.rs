use lidar_math::{Quat, Vec3};

/// Rigid-body position and orientation of a sensor in world space.
///
/// `rotation` defaults to the identity quaternion. It is assumed unit
/// length; the caller is responsible for normalization. A non-unit
/// quaternion produces non-unit ray directions rather than being rejected.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pose {
    pub position: Vec3,
    pub rotation: Quat,
}

impl Pose {
    /// A pose at `position` with identity rotation.
    pub fn at(position: Vec3) -> Self {
        Self {
            position,
            rotation: Quat::IDENTITY,
        }
    }

    /// A pose at `position` with the given rotation.
    pub fn new(position: Vec3, rotation: Quat) -> Self {
        Self { position, rotation }
    }
}

impl Default for Pose {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Quat::IDENTITY,
        }
    }
}
