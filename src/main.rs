use std::time::Instant;

use segment_traffic::math::Point2d;
use segment_traffic::{GeneratorConfig, Result, Simulation, VehicleConfig};

/// Builds a road of three straight segments joined by two curves, with a light
/// at the end of the first straight, fed by a mix of cars and trucks.
fn build() -> Result<Simulation> {
    let mut sim = Simulation::new();
    let a = sim.add_segment(&[Point2d::new(0.0, 0.0), Point2d::new(300.0, 0.0)])?;
    let b = sim.add_quadratic_bezier(
        Point2d::new(300.0, 0.0),
        Point2d::new(350.0, 0.0),
        Point2d::new(350.0, 50.0),
    )?;
    let c = sim.add_segment(&[Point2d::new(350.0, 50.0), Point2d::new(350.0, 400.0)])?;
    let d = sim.add_cubic_bezier(
        Point2d::new(350.0, 400.0),
        Point2d::new(350.0, 450.0),
        Point2d::new(300.0, 450.0),
        Point2d::new(250.0, 450.0),
    )?;
    let e = sim.add_segment(&[Point2d::new(250.0, 450.0), Point2d::new(0.0, 450.0)])?;
    sim.add_traffic_light(a, 290.0, 20.0)?;

    let path = vec![a, b, c, d, e];
    sim.add_weighted_generator(&GeneratorConfig {
        vehicle_rate: 40.0,
        vehicles: vec![
            (
                4,
                VehicleConfig {
                    path: path.clone(),
                    ..Default::default()
                },
            ),
            (
                1,
                VehicleConfig {
                    path,
                    length: 10.0,
                    max_vel: 12.0,
                    max_acc: 0.8,
                    ..Default::default()
                },
            ),
        ],
        seed: Some(1),
    })?;
    Ok(sim)
}

fn main() -> Result<()> {
    env_logger::init();
    let mut sim = build()?;

    println!("Simulating...");
    const NUM_FRAMES: u32 = 3600;
    for _ in 0..10 {
        let start = Instant::now();
        sim.run(NUM_FRAMES as usize);
        let frame = start.elapsed() / NUM_FRAMES;
        println!(
            "t = {:.0} s, avg. frame: {:?} --> {:.0}x speedup ({} vehs, {} exited)",
            sim.t(),
            frame,
            sim.dt() / frame.as_secs_f64(),
            sim.vehicle_count(),
            sim.exited_count(),
        );
    }
    Ok(())
}
