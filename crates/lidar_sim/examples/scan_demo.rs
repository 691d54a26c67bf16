//! Scans a flat ground plane with a VLP-16-shaped sensor and prints the
//! resulting hit count and bounding box.

use lidar_sim::{presets, Pose, Simulator};

fn main() {
    env_logger::init();

    let mut sim = Simulator::create(presets::VLP16).expect("preset config is valid");

    // A 20x20m ground plane centered at the origin.
    let vertices = vec![
        -10.0, 0.0, -10.0, 10.0, 0.0, -10.0, 10.0, 0.0, 10.0, -10.0, 0.0, 10.0,
    ];
    let indices = vec![0, 1, 2, 0, 2, 3];
    sim.load_geometry(&vertices, &indices)
        .expect("ground plane geometry is valid");

    let pose = Pose::at(lidar_math::Vec3::new(0.0, 2.0, 0.0));
    let hits = sim.scan(pose).to_vec();

    println!("scan produced {} hits", sim.last_hit_count());

    let mut min = lidar_math::Vec3::splat(f32::INFINITY);
    let mut max = lidar_math::Vec3::splat(f32::NEG_INFINITY);
    for chunk in hits.chunks_exact(3) {
        let p = lidar_math::Vec3::new(chunk[0], chunk[1], chunk[2]);
        min = min.min(p);
        max = max.max(p);
    }
    println!("hit bounds: min={:?} max={:?}", min, max);
}
