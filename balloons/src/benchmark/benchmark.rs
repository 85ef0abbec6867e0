use std::time::Instant;

use crate::simulation::model::SimulationModel;
use crate::simulation::params::FRAME_MS;
use crate::simulation::states::{BalloonId, NVec2};

/// Build a model with both balloons out and charged by `strokes` rubs each
fn make_charged_model(strokes: usize) -> SimulationModel {
    let mut model = SimulationModel::default();
    model.set_balloon_visible(BalloonId::Green, true);

    for id in BalloonId::ALL {
        model.drag_balloon(id, NVec2::new(150.0, 120.0));
        for k in 0..strokes {
            let dy = if k % 2 == 0 { 20.0 } else { -20.0 };
            let target = model.balloon(id).position() + NVec2::new(0.0, dy);
            model.drag_balloon(id, target);
            model.step(FRAME_MS);
        }
    }

    // let them drift from the middle of the play area
    model.drag_balloon(BalloonId::Yellow, NVec2::new(420.0, 100.0));
    model.drag_balloon(BalloonId::Green, NVec2::new(300.0, 200.0));
    for id in BalloonId::ALL {
        model.set_dragged(id, false);
    }
    model
}

/// Time `SimulationModel::step` with two charged, drifting balloons
/// Prints one csv row per run length; paste into a spreadsheet to graph
pub fn bench_step() {
    println!("steps,total_ms,us_per_step");

    for steps in [1_000, 10_000, 100_000, 1_000_000] {
        let mut model = make_charged_model(40);

        // Warm up
        for _ in 0..100 {
            model.step(FRAME_MS);
        }

        let t0 = Instant::now();
        for _ in 0..steps {
            model.step(FRAME_MS);
        }
        let elapsed_ms = t0.elapsed().as_secs_f64() * 1000.0;

        println!("{},{:.3},{:.4}", steps, elapsed_ms, elapsed_ms * 1000.0 / steps as f64);
    }
}
