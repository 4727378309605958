use macroquad::prelude::*;

mod agent;
mod body;
mod camera;
mod config;
mod creatures;
mod orient;
mod qa;
mod renderer;
mod segment;
mod stats;
mod steering;
mod tank;
mod vivarium;

use camera::CameraController;
use stats::VivariumStats;
use vivarium::VivariumState;

fn window_conf() -> Conf {
    Conf {
        window_title: "VIVARIUM — Articulated Life Tank".to_string(),
        window_width: 1280,
        window_height: 800,
        window_resizable: true,
        high_dpi: true,
        ..Default::default()
    }
}

const QA_REPORT_PATH: &str = "vivarium_qa.json";

#[macroquad::main(window_conf)]
async fn main() {
    // Headless QA mode: `vivarium --qa <scenario> [ticks]`
    let args: Vec<String> = std::env::args().collect();
    if let Some(i) = args.iter().position(|a| a == "--qa") {
        let scenario = args
            .get(i + 1)
            .and_then(|s| qa::QaScenario::parse_cli(s))
            .unwrap_or(qa::QaScenario::Baseline);
        let ticks = args.get(i + 2).and_then(|s| s.parse().ok()).unwrap_or(600);
        let report = qa::run(scenario, 42, ticks);
        match qa::write_report(&report, QA_REPORT_PATH) {
            Ok(()) => eprintln!(
                "[VIVARIUM] QA {} finished: {} ({QA_REPORT_PATH})",
                report.scenario, report.overall_status
            ),
            Err(e) => eprintln!("[VIVARIUM] QA report failed: {e}"),
        }
        return;
    }

    let mut viv = VivariumState::new(42);
    let mut camera = CameraController::new();
    let mut sim_stats = VivariumStats::new(1000);
    let mut accumulator = 0.0f64;
    let mut show_bounds = false;

    loop {
        let frame_time = get_frame_time() as f64;
        accumulator += frame_time.min(0.1);

        if is_key_pressed(KeyCode::Space) {
            viv.paused = !viv.paused;
        }
        if is_key_pressed(KeyCode::B) {
            show_bounds = !show_bounds;
        }
        if is_key_pressed(KeyCode::P) {
            if let Err(e) = viv.spawn_random_prey() {
                eprintln!("[VIVARIUM] spawn prey failed: {e}");
            }
        }
        if is_key_pressed(KeyCode::O) {
            if let Err(e) = viv.spawn_random_predator() {
                eprintln!("[VIVARIUM] spawn predator failed: {e}");
            }
        }
        if is_key_pressed(KeyCode::Equal) {
            viv.speed_multiplier = (viv.speed_multiplier * 2.0).min(8.0);
        }
        if is_key_pressed(KeyCode::Minus) {
            viv.speed_multiplier = (viv.speed_multiplier * 0.5).max(0.25);
        }

        let effective_dt = config::FIXED_DT as f64 / viv.speed_multiplier as f64;
        if !viv.paused {
            while accumulator >= effective_dt {
                viv.tick();
                sim_stats.record(&viv);
                accumulator -= effective_dt;
            }
        } else {
            accumulator = 0.0;
        }

        camera.update(get_frame_time());
        renderer::draw(&viv, &camera, show_bounds);
        renderer::draw_hud(&viv, &sim_stats);

        next_frame().await;
    }
}
