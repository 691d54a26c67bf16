use crate::{Interval, Ray, Vec3};

/// Axis-Aligned Bounding Box for spatial acceleration structures (BVH).
///
/// An AABB is defined by three intervals (one per axis) that bound a 3D
/// volume. The empty box uses `Interval::EMPTY` on every axis, so it unions
/// with anything to produce that other box exactly (`min > max` on each
/// axis means "nothing contained yet").
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Aabb {
    pub x: Interval,
    pub y: Interval,
    pub z: Interval,
}

impl Aabb {
    /// Create a new AABB from three intervals.
    pub fn new(x: Interval, y: Interval, z: Interval) -> Self {
        Self { x, y, z }
    }

    /// Create an empty AABB (contains nothing).
    pub fn empty() -> Self {
        Self::EMPTY
    }

    /// Create an AABB from two corner points (order-independent).
    pub fn from_points(a: Vec3, b: Vec3) -> Self {
        Self {
            x: Interval::new(a.x.min(b.x), a.x.max(b.x)),
            y: Interval::new(a.y.min(b.y), a.y.max(b.y)),
            z: Interval::new(a.z.min(b.z), a.z.max(b.z)),
        }
    }

    /// Create an AABB that surrounds two other AABBs.
    pub fn surrounding(box0: &Aabb, box1: &Aabb) -> Self {
        Self {
            x: Interval::surrounding(&box0.x, &box1.x),
            y: Interval::surrounding(&box0.y, &box1.y),
            z: Interval::surrounding(&box0.z, &box1.z),
        }
    }

    /// Get the interval for a specific axis (0=X, 1=Y, 2=Z).
    pub fn axis_interval(&self, n: usize) -> Interval {
        match n {
            0 => self.x,
            1 => self.y,
            _ => self.z,
        }
    }

    /// Lower corner of the box.
    pub fn min(&self) -> Vec3 {
        Vec3::new(self.x.min, self.y.min, self.z.min)
    }

    /// Upper corner of the box.
    pub fn max(&self) -> Vec3 {
        Vec3::new(self.x.max, self.y.max, self.z.max)
    }

    /// Test if a ray intersects this AABB within the given interval.
    ///
    /// Slab method using the ray's precomputed reciprocal direction. Returns
    /// `false` for a degenerate/empty box, where `ray_t.max <= ray_t.min`
    /// immediately on the first axis.
    pub fn hit(&self, r: &Ray, ray_t: Interval) -> bool {
        self.hit_enter(r, ray_t).is_some()
    }

    /// Ray/AABB slab test that also returns the entry distance `t_enter`.
    ///
    /// Used by BVH traversal to order child descent front-to-back: the
    /// child with the smaller `t_enter` is visited first, and the other is
    /// pushed onto the stack (pruned outright if its `t_enter` is already
    /// past the current best hit).
    pub fn hit_enter(&self, r: &Ray, mut ray_t: Interval) -> Option<f32> {
        let origin = r.origin;
        let inv_dir = r.inv_direction;

        let mut t0 = (self.x.min - origin.x) * inv_dir.x;
        let mut t1 = (self.x.max - origin.x) * inv_dir.x;
        if inv_dir.x < 0.0 {
            std::mem::swap(&mut t0, &mut t1);
        }
        ray_t.min = t0.max(ray_t.min);
        ray_t.max = t1.min(ray_t.max);
        if ray_t.max <= ray_t.min {
            return None;
        }

        let mut t0 = (self.y.min - origin.y) * inv_dir.y;
        let mut t1 = (self.y.max - origin.y) * inv_dir.y;
        if inv_dir.y < 0.0 {
            std::mem::swap(&mut t0, &mut t1);
        }
        ray_t.min = t0.max(ray_t.min);
        ray_t.max = t1.min(ray_t.max);
        if ray_t.max <= ray_t.min {
            return None;
        }

        let mut t0 = (self.z.min - origin.z) * inv_dir.z;
        let mut t1 = (self.z.max - origin.z) * inv_dir.z;
        if inv_dir.z < 0.0 {
            std::mem::swap(&mut t0, &mut t1);
        }
        ray_t.min = t0.max(ray_t.min);
        ray_t.max = t1.min(ray_t.max);
        if ray_t.max <= ray_t.min {
            return None;
        }

        Some(ray_t.min)
    }

    /// Returns the index (0=X, 1=Y, 2=Z) of the axis with the longest extent.
    pub fn longest_axis(&self) -> usize {
        let x_size = self.x.size();
        let y_size = self.y.size();
        let z_size = self.z.size();

        if x_size > y_size && x_size > z_size {
            0
        } else if y_size > z_size {
            1
        } else {
            2
        }
    }

    /// Returns the center point of the bounding box.
    pub fn centroid(&self) -> Vec3 {
        Vec3::new(
            (self.x.min + self.x.max) * 0.5,
            (self.y.min + self.y.max) * 0.5,
            (self.z.min + self.z.max) * 0.5,
        )
    }

    /// The empty AABB: unions with anything to produce that other box.
    pub const EMPTY: Aabb = Aabb {
        x: Interval::EMPTY,
        y: Interval::EMPTY,
        z: Interval::EMPTY,
    };
}
