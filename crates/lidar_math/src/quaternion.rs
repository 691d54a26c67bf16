use crate::Vec3;
use glam::Quat;

/// Rotate a vector by a quaternion.
///
/// Implements `v' = v + 2w(q x v) + 2(q x (q x v))`, where `q` is the
/// quaternion's vector part `(x, y, z)` and `w` its scalar part. This is
/// the standard quaternion-sandwich rotation expanded to avoid a full
/// quaternion multiply/conjugate pair.
///
/// `rotation` is expected to be unit length; non-unit input is not
/// normalized here and will scale the result accordingly (the caller is
/// responsible for supplying a unit quaternion).
pub fn rotate_vector(rotation: Quat, v: Vec3) -> Vec3 {
    let q = Vec3::new(rotation.x, rotation.y, rotation.z);
    let w = rotation.w;

    let qv = q.cross(v);
    let q_qv = q.cross(qv);

    v + qv * (2.0 * w) + q_qv * 2.0
}
