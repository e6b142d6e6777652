//! Capy Run native entry point
//!
//! Runs a headless demo: a scripted pilot plays one run through the same
//! input adapter a real host would use, and the result is logged.
//!
//! Usage: `capy-run [seed] [tuning.json]`

use capy_run::Tuning;
use capy_run::consts::*;
use capy_run::platform::{HeadlessRun, Key, RawInput};
use capy_run::sim::{Avoidance, GameEvent};

/// Longest demo run before giving up (seconds of sim time)
const DEMO_LIMIT_SECS: f32 = 180.0;
/// Host frame rate for the demo loop
const FRAME_DT: f32 = 1.0 / 60.0;

/// Scripted player for demo mode
#[derive(Debug, Default)]
struct DemoPilot {
    crouch_down: bool,
}

impl DemoPilot {
    /// Look at the next obstacle and press keys like a player would
    fn drive(&mut self, run: &mut HeadlessRun) {
        let player_left = PLAYER_X - PLAYER_WIDTH / 2.0;
        let player_right = PLAYER_X + PLAYER_WIDTH / 2.0;

        // Closest obstacle not yet fully behind the player
        let next = run
            .state
            .obstacles
            .iter()
            .filter(|o| o.pos.x + o.size.x / 2.0 >= player_left)
            .min_by(|a, b| a.pos.x.total_cmp(&b.pos.x))
            .map(|o| {
                let half_width = o.size.x / 2.0;
                (o.pos.x - half_width - player_right, half_width, o.avoidance())
            });

        let Some((gap, half_width, avoidance)) = next else {
            self.release_crouch(run);
            return;
        };
        let lead = run.state.run.game_speed * 0.05;

        match avoidance {
            Avoidance::Crouch => {
                if gap < lead * 2.0 && !self.crouch_down {
                    run.send(RawInput::KeyDown(Key::Char('s')));
                    self.crouch_down = true;
                }
            }
            Avoidance::Jump => {
                self.release_crouch(run);
                let grounded = run.state.player.is_grounded();
                // Second jump when the first one won't clear a wide obstacle
                let falling_short = !grounded
                    && run.body.vel.y > 0.0
                    && run.body.bottom() > GROUND_TOP_Y - 20.0
                    && gap < 0.0;
                if (grounded && gap < lead && gap > -half_width) || falling_short {
                    run.send(RawInput::KeyDown(Key::Char('a')));
                    run.send(RawInput::KeyUp(Key::Char('a')));
                }
            }
        }
    }

    fn release_crouch(&mut self, run: &mut HeadlessRun) {
        if self.crouch_down {
            run.send(RawInput::KeyUp(Key::Char('s')));
            self.crouch_down = false;
        }
    }
}

fn load_tuning(path: Option<&str>) -> Tuning {
    let Some(path) = path else {
        return Tuning::default();
    };
    match std::fs::read_to_string(path) {
        Ok(json) => match Tuning::from_json(&json) {
            Ok(tuning) => {
                log::info!("Loaded tuning from {}", path);
                tuning
            }
            Err(e) => {
                log::warn!("Bad tuning file {}: {} (using defaults)", path, e);
                Tuning::default()
            }
        },
        Err(e) => {
            log::warn!("Can't read {}: {} (using defaults)", path, e);
            Tuning::default()
        }
    }
}

fn main() {
    env_logger::init();

    let args: Vec<String> = std::env::args().collect();
    let seed = args
        .get(1)
        .and_then(|s| s.parse::<u64>().ok())
        .unwrap_or(0xCA9B_0A7A);
    let tuning = load_tuning(args.get(2).map(String::as_str));

    log::info!("Capy Run (headless demo) starting, seed {}", seed);

    let mut run = HeadlessRun::with_tuning(seed, tuning);
    let mut pilot = DemoPilot::default();
    let mut avoided = 0u32;
    let frames = (DEMO_LIMIT_SECS / FRAME_DT) as u32;

    for _ in 0..frames {
        pilot.drive(&mut run);
        for out in run.frame(FRAME_DT) {
            for event in &out.events {
                match event {
                    GameEvent::ObstacleSpawned { kind, .. } => {
                        log::debug!("{} incoming", kind.as_str());
                    }
                    GameEvent::ObstaclePruned { .. } => avoided += 1,
                    _ => {}
                }
            }
        }
        if !run.state.is_running() {
            break;
        }
    }

    log::info!("{}", run.state.diagnostics());
    match run.state.summary() {
        Some(summary) => println!(
            "GAME OVER - final score {} ({:.1}s, {} obstacles cleared, seed {})",
            summary.final_score,
            summary.elapsed_ms / 1000.0,
            avoided,
            summary.seed
        ),
        None => println!(
            "Demo limit reached - score {} ({} obstacles cleared, seed {})",
            run.state.score(),
            avoided,
            seed
        ),
    }
}
