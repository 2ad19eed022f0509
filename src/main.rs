//! Blade Rush entry point
//!
//! Headless demo: a scripted pointer sweep stands in for the gesture
//! tracker and a logging presenter stands in for the renderer, so the
//! whole loop (spawning, slicing, countdown, rank feedback) can be watched
//! from a terminal.

use std::sync::Arc;
use std::time::Duration;

use glam::Vec2;

use blade_rush::driver::{FrameDriver, PointerSample, PointerSource, Presenter, StopHandle};
use blade_rush::feedback::RankTable;
use blade_rush::sim::{GamePhase, RenderSnapshot, SimState};
use blade_rush::tuning::Tuning;

/// Sweeps the pointer along a lissajous figure across the view, the way a
/// waving hand would
struct SweepSource {
    t: f32,
}

impl PointerSource for SweepSource {
    fn sample(&mut self) -> PointerSample {
        self.t += 1.0 / 60.0;
        let x = 0.5 + 0.45 * (self.t * 2.3).sin();
        let y = 0.55 + 0.35 * (self.t * 3.1).cos();
        PointerSample {
            pos: Some(Vec2::new(x, y)),
            hand_present: true,
        }
    }
}

/// Logs score changes and prints the final result, then stops the driver
struct ConsolePresenter {
    stop: StopHandle,
    last_score: u32,
    done: bool,
}

impl Presenter for ConsolePresenter {
    fn present(&mut self, frame: &RenderSnapshot<'_>) {
        if frame.score != self.last_score {
            log::info!(
                "score {} | {}s left | {} live, {} halves, {} particles",
                frame.score,
                frame.time_left,
                frame.projectiles.len(),
                frame.halves.len(),
                frame.particles.len()
            );
            self.last_score = frame.score;
        }

        if frame.phase == GamePhase::GameOver && !frame.analyzing && !self.done {
            if let Some(result) = frame.result {
                if let Ok(json) = serde_json::to_string_pretty(result) {
                    println!("{json}");
                }
            }
            self.done = true;
            self.stop.stop();
        }
    }
}

fn main() {
    env_logger::init();
    log::info!("Blade Rush (headless demo) starting...");

    // Short round so the demo wraps up in a few seconds
    let tuning = Tuning {
        round_duration_secs: 10,
        ..Tuning::default()
    };
    let state = SimState::with_tuning(0xB1ADE, tuning);
    let view = Vec2::new(1280.0, 720.0);

    let stop = StopHandle::new();
    let presenter = ConsolePresenter {
        stop: stop.clone(),
        last_score: 0,
        done: false,
    };
    let oracle = Arc::new(RankTable::with_latency(Duration::from_millis(800)));

    let mut driver = FrameDriver::new(state, view, SweepSource { t: 0.0 }, presenter, oracle, stop);
    driver.request_start();
    driver.run();
}
