use lidar_accel::Bvh;
use lidar_geom::TriangleStore;
use lidar_sensor::{Pose, SensorConfig};
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::SimulatorError;

/// Owns a sensor config, a triangle mesh and its BVH, and a reusable hit
/// buffer. One instance corresponds to one simulated sensor; it is not
/// safe to share across threads.
pub struct Simulator {
    config: SensorConfig,
    store: Option<TriangleStore>,
    bvh: Option<Bvh>,
    rng: StdRng,
    out_buffer: Vec<f32>,
    last_hit_count: usize,
}

impl Simulator {
    /// Create a simulator with no geometry loaded yet, seeding the noise
    /// RNG from OS entropy.
    pub fn create(config: SensorConfig) -> Result<Self, SimulatorError> {
        config.validate()?;
        Ok(Self {
            config,
            store: None,
            bvh: None,
            rng: StdRng::from_entropy(),
            out_buffer: Vec::new(),
            last_hit_count: 0,
        })
    }

    /// Create a simulator whose noise RNG is seeded deterministically, so
    /// scans with `noise_stddev > 0` become reproducible in tests.
    pub fn with_seed(config: SensorConfig, seed: u64) -> Result<Self, SimulatorError> {
        config.validate()?;
        Ok(Self {
            config,
            store: None,
            bvh: None,
            rng: StdRng::seed_from_u64(seed),
            out_buffer: Vec::new(),
            last_hit_count: 0,
        })
    }

    /// Replace the triangle mesh and rebuild the BVH over it. The
    /// previous mesh and BVH are dropped atomically with this call; a
    /// failed validation leaves the simulator's prior geometry untouched.
    pub fn load_geometry(&mut self, vertices: &[f32], indices: &[u32]) -> Result<(), SimulatorError> {
        let store = TriangleStore::new(vertices, indices)?;
        let bvh = Bvh::build(&store);

        log::info!(
            "loaded geometry: {} vertices, {} triangles",
            store.vertex_count(),
            store.triangle_count()
        );

        self.store = Some(store);
        self.bvh = bvh;
        Ok(())
    }

    /// Replace the sensor config. The BVH and triangle store are left as
    /// they were; only ray generation and the scan driver's range gate
    /// and noise model observe the new values.
    pub fn set_config(&mut self, config: SensorConfig) -> Result<(), SimulatorError> {
        config.validate()?;
        self.config = config;
        Ok(())
    }

    /// Cast one full scan from `pose` and return the resulting points as
    /// `[x, y, z, ...]`.
    ///
    /// The returned slice borrows the simulator's internal buffer; it is
    /// only valid until the next call to `scan` or `load_geometry`. If no
    /// geometry has been loaded yet, this returns an empty slice rather
    /// than an error.
    pub fn scan(&mut self, pose: Pose) -> &[f32] {
        let Some(store) = self.store.as_ref() else {
            self.out_buffer.clear();
            self.last_hit_count = 0;
            return &self.out_buffer;
        };

        let hit_count = lidar_sensor::scan_into(
            &self.config,
            &pose,
            store,
            self.bvh.as_ref(),
            &mut self.rng,
            &mut self.out_buffer,
        );
        self.last_hit_count = hit_count;
        &self.out_buffer
    }

    /// Number of hits produced by the most recent scan, 0 if none has run yet.
    pub fn last_hit_count(&self) -> usize {
        self.last_hit_count
    }

    /// Release the owned mesh, BVH and hit buffer. Idempotent: calling
    /// this more than once, or on a simulator that never loaded geometry,
    /// is a no-op beyond the first call.
    ///
    /// Rust's ownership model means the underlying allocations are freed
    /// automatically when `self` is dropped regardless of whether this is
    /// called; this method exists to match the facade contract of
    /// releasing storage on demand rather than only at scope exit.
    pub fn free(&mut self) {
        self.store = None;
        self.bvh = None;
        self.out_buffer = Vec::new();
        self.last_hit_count = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lidar_math::Vec3;

    fn looking_down_config() -> SensorConfig {
        SensorConfig {
            horizontal_resolution: 36,
            vertical_channels: 4,
            vertical_fov_upper: -10.0,
            vertical_fov_lower: -20.0,
            min_range: 0.1,
            max_range: 20.0,
            noise_stddev: 0.0,
        }
    }

    fn plane_at(y: f32) -> (Vec<f32>, Vec<u32>) {
        let vertices = vec![
            -10.0, y, -10.0, 10.0, y, -10.0, 10.0, y, 10.0, -10.0, y, 10.0,
        ];
        let indices = vec![0, 1, 2, 0, 2, 3];
        (vertices, indices)
    }

    #[test]
    fn test_scan_before_load_geometry_is_empty_not_error() {
        let mut sim = Simulator::create(looking_down_config()).unwrap();
        let hits = sim.scan(Pose::at(Vec3::new(0.0, 1.0, 0.0)));
        assert!(hits.is_empty());
        assert_eq!(sim.last_hit_count(), 0);
    }

    #[test]
    fn test_create_rejects_invalid_config() {
        let mut cfg = looking_down_config();
        cfg.horizontal_resolution = 0;
        assert!(Simulator::create(cfg).is_err());
    }

    #[test]
    fn test_scenario_s5_geometry_replacement_has_no_residue() {
        let mut sim = Simulator::with_seed(looking_down_config(), 1).unwrap();

        let (v1, i1) = plane_at(0.0);
        sim.load_geometry(&v1, &i1).unwrap();
        let hits = sim.scan(Pose::at(Vec3::new(0.0, 1.0, 0.0))).to_vec();
        assert_eq!(hits.len() / 3, 144);

        let (v2, i2) = plane_at(0.5);
        sim.load_geometry(&v2, &i2).unwrap();
        let hits = sim.scan(Pose::at(Vec3::new(0.0, 1.0, 0.0))).to_vec();

        assert_eq!(hits.len() / 3, 144);
        for chunk in hits.chunks_exact(3) {
            assert!((chunk[1] - 0.5).abs() < 0.01);
        }
    }

    #[test]
    fn test_set_config_does_not_require_geometry_reload() {
        let mut sim = Simulator::with_seed(looking_down_config(), 1).unwrap();
        let (vertices, indices) = plane_at(0.0);
        sim.load_geometry(&vertices, &indices).unwrap();

        let mut narrower = looking_down_config();
        narrower.max_range = 0.5;
        sim.set_config(narrower).unwrap();

        let hits = sim.scan(Pose::at(Vec3::new(0.0, 1.0, 0.0)));
        assert!(hits.is_empty());
    }

    #[test]
    fn test_free_is_idempotent_and_clears_state() {
        let mut sim = Simulator::with_seed(looking_down_config(), 1).unwrap();
        let (vertices, indices) = plane_at(0.0);
        sim.load_geometry(&vertices, &indices).unwrap();
        sim.scan(Pose::at(Vec3::new(0.0, 1.0, 0.0)));
        assert!(sim.last_hit_count() > 0);

        sim.free();
        assert_eq!(sim.last_hit_count(), 0);
        sim.free();

        let hits = sim.scan(Pose::at(Vec3::new(0.0, 1.0, 0.0)));
        assert!(hits.is_empty());
    }

    #[test]
    fn test_invalid_geometry_rejected() {
        let mut sim = Simulator::create(looking_down_config()).unwrap();
        let err = sim.load_geometry(&[0.0, 0.0], &[]).unwrap_err();
        assert!(matches!(err, SimulatorError::InvalidGeometry(_)));
    }
}
