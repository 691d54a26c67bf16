use lidar_math::{Ray, Vec3};

/// Barycentric/parametric epsilon for rejecting near-parallel rays.
const EPS_B: f32 = 1e-6;
/// Minimum determinant magnitude below which a ray/triangle pair is
/// treated as too close to parallel to resolve reliably.
const EPS_DET: f32 = 1e-8;

/// Double-sided Moller-Trumbore ray/triangle intersection.
///
/// Returns `Some((t, u, v))` when the ray hits the triangle `(a, b, c)`
/// with `t` inside `(t_min, t_max]`. `u`/`v` are the barycentric
/// coordinates of the hit relative to `a`, following `b` and `c`
/// respectively; `w = 1 - u - v` is the remaining weight on `a`.
pub fn intersect(
    ray: &Ray,
    a: Vec3,
    b: Vec3,
    c: Vec3,
    t_min: f32,
    t_max: f32,
) -> Option<(f32, f32, f32)> {
    let edge1 = b - a;
    let edge2 = c - a;

    let p = ray.direction.cross(edge2);
    let det = edge1.dot(p);

    if det.abs() < EPS_DET {
        return None;
    }

    let inv_det = 1.0 / det;
    let t_vec = ray.origin - a;

    let u = t_vec.dot(p) * inv_det;
    if u < -EPS_B || u > 1.0 + EPS_B {
        return None;
    }

    let q = t_vec.cross(edge1);
    let v = ray.direction.dot(q) * inv_det;
    if v < -EPS_B || u + v > 1.0 + EPS_B {
        return None;
    }

    let t = edge2.dot(q) * inv_det;
    if t <= t_min || t > t_max {
        return None;
    }

    Some((t, u, v))
}
