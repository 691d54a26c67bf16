use lidar_geom::TriangleStore;
use lidar_math::{Aabb, Interval};

/// Triangle count at or below which a node becomes a leaf rather than
/// splitting further.
const LEAF_THRESHOLD: usize = 4;

#[derive(Debug, Clone, Copy)]
enum BvhNode {
    Leaf {
        bbox: Aabb,
        start: u32,
        count: u32,
    },
    Internal {
        bbox: Aabb,
        left: u32,
        right: u32,
    },
}

impl BvhNode {
    fn bbox(&self) -> Aabb {
        match self {
            BvhNode::Leaf { bbox, .. } => *bbox,
            BvhNode::Internal { bbox, .. } => *bbox,
        }
    }
}

/// A bounding volume hierarchy over a [`TriangleStore`].
///
/// Nodes live in a single flat `Vec` and reference each other by index
/// rather than by pointer, so traversal can use an explicit stack instead
/// of recursion. Triangle indices are stored in a permutation array that
/// the builder reorders in place; each leaf references a contiguous
/// `[start, start+count)` range of it.
#[derive(Debug, Clone)]
pub struct Bvh {
    nodes: Vec<BvhNode>,
    perm: Vec<u32>,
    root: u32,
}

/// Result of a closest-hit query.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hit {
    pub t: f32,
    pub u: f32,
    pub v: f32,
    pub triangle_index: u32,
}

impl Bvh {
    /// Build a BVH over every triangle in `store`.
    ///
    /// Returns `None` if the store has no triangles; a scan over an empty
    /// BVH never hits anything, so callers should treat this as "no
    /// acceleration structure needed" rather than an error.
    pub fn build(store: &TriangleStore) -> Option<Self> {
        let triangle_count = store.triangle_count();
        if triangle_count == 0 {
            return None;
        }

        let mut perm: Vec<u32> = (0..triangle_count as u32).collect();
        let mut nodes = Vec::with_capacity(triangle_count * 2);
        let root = Self::build_range(store, &mut perm, &mut nodes, 0, triangle_count);

        log::debug!(
            "built bvh over {} triangles into {} nodes",
            triangle_count,
            nodes.len()
        );

        Some(Self { nodes, perm, root })
    }

    /// Recursively partitions `perm[start..end]` and appends nodes for the
    /// resulting subtree, returning the index of the node just appended.
    fn build_range(
        store: &TriangleStore,
        perm: &mut [u32],
        nodes: &mut Vec<BvhNode>,
        start: usize,
        end: usize,
    ) -> u32 {
        let range = &mut perm[start..end];
        let count = range.len();

        let bbox = range
            .iter()
            .map(|&i| store.triangle_aabb(i as usize))
            .fold(Aabb::EMPTY, |acc, b| Aabb::surrounding(&acc, &b));

        let centroid_bounds = range.iter().map(|&i| store.triangle_centroid(i as usize)).fold(
            Aabb::EMPTY,
            |acc, c| Aabb::surrounding(&acc, &Aabb::from_points(c, c)),
        );

        let axis = centroid_bounds.longest_axis();
        let degenerate = centroid_bounds.axis_interval(axis).size() < 1e-9;

        if count <= LEAF_THRESHOLD || degenerate {
            nodes.push(BvhNode::Leaf {
                bbox,
                start: start as u32,
                count: count as u32,
            });
            return (nodes.len() - 1) as u32;
        }

        let mid = count / 2;
        range.select_nth_unstable_by(mid, |&a, &b| {
            let ca = store.triangle_centroid(a as usize);
            let cb = store.triangle_centroid(b as usize);
            let va = match axis {
                0 => ca.x,
                1 => ca.y,
                _ => ca.z,
            };
            let vb = match axis {
                0 => cb.x,
                1 => cb.y,
                _ => cb.z,
            };
            va.partial_cmp(&vb).unwrap().then_with(|| a.cmp(&b))
        });

        let left = Self::build_range(store, perm, nodes, start, start + mid);
        let right = Self::build_range(store, perm, nodes, start + mid, end);

        nodes.push(BvhNode::Internal { bbox, left, right });
        (nodes.len() - 1) as u32
    }

    /// Find the closest triangle hit by `ray` within `ray_t`, if any.
    ///
    /// Traversal visits the nearer child first and prunes the farther one
    /// whenever its entry distance is already past the current best hit.
    pub fn closest_hit(
        &self,
        store: &TriangleStore,
        ray: &lidar_math::Ray,
        ray_t: Interval,
    ) -> Option<Hit> {
        let mut stack: Vec<u32> = Vec::with_capacity(64);
        stack.push(self.root);

        let mut best: Option<Hit> = None;
        let mut closest = ray_t.max;

        while let Some(idx) = stack.pop() {
            match &self.nodes[idx as usize] {
                BvhNode::Leaf { start, count, .. } => {
                    let range = *start as usize..(*start + *count) as usize;
                    for &tri_idx in &self.perm[range] {
                        let (a, b, c) = store.triangle_vertices(tri_idx as usize);
                        if let Some((t, u, v)) =
                            crate::triangle::intersect(ray, a, b, c, ray_t.min, closest)
                        {
                            // `intersect`'s upper bound is inclusive, so a
                            // tie (t == closest) would otherwise overwrite
                            // an earlier-found triangle with the same
                            // distance; only a strictly closer hit (or the
                            // first hit at all) replaces `best`, which
                            // keeps ties resolved by permutation order.
                            if best.is_none() || t < closest {
                                closest = t;
                                best = Some(Hit {
                                    t,
                                    u,
                                    v,
                                    triangle_index: tri_idx,
                                });
                            }
                        }
                    }
                }
                BvhNode::Internal { left, right, .. } => {
                    let (left, right) = (*left, *right);
                    let search = Interval::new(ray_t.min, closest);
                    let t_left = self.nodes[left as usize].bbox().hit_enter(ray, search);
                    let t_right = self.nodes[right as usize].bbox().hit_enter(ray, search);

                    match (t_left, t_right) {
                        (Some(tl), Some(tr)) => {
                            if tl <= tr {
                                stack.push(right);
                                stack.push(left);
                            } else {
                                stack.push(left);
                                stack.push(right);
                            }
                        }
                        (Some(_), None) => stack.push(left),
                        (None, Some(_)) => stack.push(right),
                        (None, None) => {}
                    }
                }
            }
        }

        best
    }

    /// Total number of nodes in the flat array (for diagnostics/tests).
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }
}
