use lidar_accel::Bvh;
use lidar_geom::TriangleStore;
use lidar_math::Interval;
use rand::Rng;
use rand_distr::{Distribution, Normal};

use crate::{rays, Pose, SensorConfig};

/// Entry distance below which a ray/triangle intersection is ignored, to
/// avoid a ray re-hitting the surface it was just cast from.
const T_EPSILON: f32 = 1e-6;

/// Cast every ray of one full scan against `bvh`/`store`, gate and
/// perturb the hits, and append `[x, y, z]` triples to `out`.
///
/// `out` is cleared first; the simulator is expected to reuse the same
/// buffer across scans rather than reallocate. Returns the number of hits
/// written (`out.len() / 3`).
pub fn scan_into(
    cfg: &SensorConfig,
    pose: &Pose,
    store: &TriangleStore,
    bvh: Option<&Bvh>,
    rng: &mut impl Rng,
    out: &mut Vec<f32>,
) -> usize {
    out.clear();

    let Some(bvh) = bvh else {
        return 0;
    };

    let noise = if cfg.noise_stddev > 0.0 {
        Some(Normal::new(0.0, cfg.noise_stddev).expect("noise_stddev validated non-negative"))
    } else {
        None
    };

    let ray_t = Interval::new(T_EPSILON, cfg.max_range);
    let mut hit_count = 0usize;

    for ray in rays::generate(cfg, pose) {
        let Some(hit) = bvh.closest_hit(store, &ray, ray_t) else {
            continue;
        };

        if hit.t < cfg.min_range {
            continue;
        }

        let t = match &noise {
            Some(dist) => {
                let perturbed = hit.t + dist.sample(rng);
                perturbed.clamp(cfg.min_range, cfg.max_range)
            }
            None => hit.t,
        };

        let point = ray.at(t);
        out.push(point.x);
        out.push(point.y);
        out.push(point.z);
        hit_count += 1;
    }

    hit_count
}
