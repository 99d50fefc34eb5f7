use std::time::Instant;

use crate::error::Result;
use crate::simulation::collision::detect_collisions;
use crate::simulation::engine::NewtonianUniverse;
use crate::simulation::params::Parameters;
use crate::simulation::states::{Body, NVec3};

/// Helper to build a universe of `n` unit masses on a deterministic spiral
pub fn make_universe(n: usize) -> Result<NewtonianUniverse> {
    let bodies = (0..n)
        .map(|i| {
            let i_f = i as f64;
            let x = NVec3::new(
                (i_f * 0.37).sin() * 5.0,
                (i_f * 0.13).cos() * 5.0,
                (i_f * 0.07).sin() * 5.0,
            );
            Body::new(x, NVec3::zeros(), 1.0, "w")
        })
        .collect::<Result<Vec<_>>>()?;

    let mut params = Parameters::with_step(0.001);
    params.G = 0.1;

    NewtonianUniverse::new(params, bodies)
}

/// Time a full step and the collision scan alone for a range of n.
/// Output is CSV so it can be pasted into a spreadsheet
pub fn bench_step() {
    let ns = [50, 100, 200, 400, 800, 1600];
    let steps = 5;

    println!("N,step_ms,scan_ms");

    for n in ns {
        let mut universe = match make_universe(n) {
            Ok(u) => u,
            Err(e) => {
                println!("{n},error: {e}");
                continue;
            }
        };

        // Warm up
        if let Err(e) = universe.step_once() {
            println!("{n},error: {e}");
            continue;
        }

        let t0 = Instant::now();
        for _ in 0..steps {
            if let Err(e) = universe.step_once() {
                println!("{n},error: {e}");
                break;
            }
        }
        let ms_step = t0.elapsed().as_secs_f64() * 1000.0 / steps as f64;

        let t1 = Instant::now();
        for _ in 0..steps {
            std::hint::black_box(detect_collisions(universe.bodies()));
        }
        let ms_scan = t1.elapsed().as_secs_f64() * 1000.0 / steps as f64;

        println!("{},{:.6},{:.6}", n, ms_step, ms_scan);
    }
}
