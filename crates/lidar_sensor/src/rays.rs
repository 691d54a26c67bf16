use lidar_math::{rotate_vector, Ray, Vec3};

use crate::{Pose, SensorConfig};

/// Elevation angle (radians) of ring `v` out of `vertical_channels` rings
/// spanning `[vertical_fov_lower, vertical_fov_upper]` degrees.
///
/// Ring 0 is the lowest. A single-ring sensor uses the upper bound as its
/// one elevation.
fn elevation_radians(cfg: &SensorConfig, v: u32) -> f32 {
    let elev_deg = if cfg.vertical_channels == 1 {
        cfg.vertical_fov_upper
    } else {
        cfg.vertical_fov_lower
            + v as f32 * (cfg.vertical_fov_upper - cfg.vertical_fov_lower)
                / (cfg.vertical_channels - 1) as f32
    };
    elev_deg.to_radians()
}

/// Azimuth angle (radians) of step `h` out of `horizontal_resolution`
/// samples around the full sweep. Step 0 points along +x locally.
fn azimuth_radians(cfg: &SensorConfig, h: u32) -> f32 {
    std::f32::consts::TAU * h as f32 / cfg.horizontal_resolution as f32
}

/// Local-frame (pre-rotation) unit direction for ring `v`, azimuth step `h`.
///
/// `y` is up; rings sweep counter-clockwise when viewed from +y.
fn local_direction(cfg: &SensorConfig, v: u32, h: u32) -> Vec3 {
    let elev = elevation_radians(cfg, v);
    let az = azimuth_radians(cfg, h);
    Vec3::new(elev.cos() * az.cos(), elev.sin(), elev.cos() * az.sin())
}

/// Generate the world-space ray for ring `v`, azimuth step `h`.
pub fn ray_for(cfg: &SensorConfig, pose: &Pose, v: u32, h: u32) -> Ray {
    let local = local_direction(cfg, v, h);
    let world_dir = rotate_vector(pose.rotation, local);
    Ray::new(pose.position, world_dir)
}

/// Enumerate every ray of a full scan, elevation-major then azimuth, as
/// `for v in 0..vertical_channels: for h in 0..horizontal_resolution`.
///
/// Ordering here is load-bearing: the scan driver writes hits into the
/// output buffer in the same order rays are produced, and callers rely on
/// that for reproducibility.
pub fn generate(cfg: &SensorConfig, pose: &Pose) -> impl Iterator<Item = Ray> + '_ {
    (0..cfg.vertical_channels)
        .flat_map(move |v| (0..cfg.horizontal_resolution).map(move |h| (v, h)))
        .map(move |(v, h)| ray_for(cfg, pose, v, h))
}

#[cfg(test)]
mod tests {
    use super::*;
    use lidar_math::Quat;

    fn config() -> SensorConfig {
        SensorConfig {
            horizontal_resolution: 4,
            vertical_channels: 3,
            vertical_fov_upper: 10.0,
            vertical_fov_lower: -10.0,
            min_range: 0.1,
            max_range: 20.0,
            noise_stddev: 0.0,
        }
    }

    #[test]
    fn test_single_ring_uses_upper_fov() {
        let cfg = SensorConfig {
            vertical_channels: 1,
            ..config()
        };
        assert!((elevation_radians(&cfg, 0) - 10f32.to_radians()).abs() < 1e-6);
    }

    #[test]
    fn test_ring_zero_is_lowest() {
        let cfg = config();
        assert!((elevation_radians(&cfg, 0) - (-10f32.to_radians())).abs() < 1e-6);
        assert!((elevation_radians(&cfg, 2) - 10f32.to_radians()).abs() < 1e-6);
    }

    #[test]
    fn test_azimuth_step_zero_is_zero() {
        let cfg = config();
        assert_eq!(azimuth_radians(&cfg, 0), 0.0);
    }

    #[test]
    fn test_generated_directions_are_unit_length() {
        let cfg = config();
        let pose = Pose::default();
        for ray in generate(&cfg, &pose) {
            assert!((ray.direction.length() - 1.0).abs() < 1e-5);
        }
    }

    #[test]
    fn test_ray_count_matches_h_times_v() {
        let cfg = config();
        let pose = Pose::default();
        let count = generate(&cfg, &pose).count();
        assert_eq!(count, (cfg.horizontal_resolution * cfg.vertical_channels) as usize);
    }

    #[test]
    fn test_order_is_elevation_major_azimuth_minor() {
        let cfg = config();
        let pose = Pose::default();
        let rays: Vec<Ray> = generate(&cfg, &pose).collect();

        // First H rays all belong to ring 0 (lowest elevation).
        let ring0_elev = local_direction(&cfg, 0, 0).y;
        for ray in &rays[0..cfg.horizontal_resolution as usize] {
            assert!((ray.direction.y - ring0_elev).abs() < 1e-5);
        }
    }

    #[test]
    fn test_pose_equivariance_rotating_pose_rotates_local_hits_identically() {
        // Rotating the pose by some q must rotate every ray direction by the
        // same q, so the set of pose-relative (local) directions is
        // unchanged.
        let cfg = config();
        let base_pose = Pose::default();
        let rotation = Quat::from_axis_angle(Vec3::Y, 1.2);
        let rotated_pose = Pose::new(Vec3::ZERO, rotation);

        let base: Vec<Ray> = generate(&cfg, &base_pose).collect();
        let rotated: Vec<Ray> = generate(&cfg, &rotated_pose).collect();

        for (b, r) in base.iter().zip(rotated.iter()) {
            let expected = rotation * b.direction;
            assert!((expected - r.direction).length() < 1e-5);
        }
    }

    #[test]
    fn test_identity_rotation_matches_unrotated_pose() {
        let cfg = config();
        let identity_pose = Pose::new(Vec3::ZERO, Quat::IDENTITY);
        let default_pose = Pose::default();

        let a: Vec<Ray> = generate(&cfg, &identity_pose).collect();
        let b: Vec<Ray> = generate(&cfg, &default_pose).collect();

        for (ra, rb) in a.iter().zip(b.iter()) {
            assert!((ra.direction - rb.direction).length() < 1e-6);
        }
    }
}
