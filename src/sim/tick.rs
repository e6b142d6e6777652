//! Fixed timestep simulation tick
//!
//! Runs the per-tick pipeline in a fixed order: score/speed, spawn and
//! advance, player signals and intents, overlap resolution, terminal check.
//! Player changes made earlier in a tick are visible to overlap resolution
//! in the same tick.

use super::collision::{CollisionResult, resolve_overlap};
use super::intent::{Intent, QueuedIntent};
use super::player::JumpOutcome;
use super::scoring::{score_for, speed_for};
use super::spawner;
use super::state::{GameEvent, GamePhase, GameState, ScheduledRelease, TickOutput};

/// Signals from the motion host for a single tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Player body is touching the ground this tick
    pub grounded: bool,
    /// Player body center Y, if the host moved it
    pub player_center_y: Option<f32>,
    /// Obstacle IDs overlapping the player this tick
    pub overlaps: Vec<u32>,
}

/// Queue an intent for the next tick (dropped once the run is over)
pub fn push_intent(state: &mut GameState, intent: QueuedIntent) {
    if state.is_running() {
        state.intents.push(intent);
    } else {
        log::trace!("Intent {:?} dropped, run is over", intent.intent);
    }
}

/// Advance the run by one fixed timestep (`dt` in seconds)
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32) -> TickOutput {
    let mut out = TickOutput::default();

    if state.phase == GamePhase::GameOver {
        return out;
    }

    state.time_ticks += 1;

    // Score and difficulty
    state.run.elapsed_ms += f64::from(dt) * 1000.0;
    state.run.score = score_for(state.run.elapsed_ms, &state.tuning);
    let speed = speed_for(state.run.elapsed_ms, &state.tuning);
    if speed > state.run.game_speed {
        log::debug!("Speed up: {} -> {}", state.run.game_speed, speed);
        state.run.game_speed = speed;
    }

    // Obstacles
    spawner::maybe_spawn(state, &mut out.events);
    spawner::advance(
        &mut state.obstacles,
        state.run.game_speed,
        dt,
        &mut out.events,
    );

    // Player
    if let Some(center_y) = input.player_center_y {
        state.player.sync_center_y(center_y);
    }
    if state.player.on_grounded_signal(input.grounded) {
        out.events.push(GameEvent::Landed);
    }
    let intents: Vec<QueuedIntent> = state.intents.drain().collect();
    for queued in intents {
        apply_intent(state, queued, &mut out);
    }
    fire_pending_release(state, &mut out);

    // Overlaps, in spawn order
    let mut fatal = None;
    for obstacle in state
        .obstacles
        .iter()
        .filter(|o| input.overlaps.contains(&o.id))
    {
        match resolve_overlap(&state.player, obstacle) {
            CollisionResult::Avoided => out.events.push(GameEvent::ObstacleAvoided {
                id: obstacle.id,
                kind: obstacle.kind,
            }),
            CollisionResult::Hit => {
                fatal = Some(obstacle.id);
                break;
            }
        }
    }

    if let Some(id) = fatal {
        state.obstacles.retain(|o| o.id != id);
        end_run(state, &mut out);
    }

    out
}

fn apply_intent(state: &mut GameState, queued: QueuedIntent, out: &mut TickOutput) {
    if queued.is_press() {
        state.history.record(queued);
    }

    match queued.intent {
        Intent::Jump => {
            if let JumpOutcome::Jumped(jumps_used) = state.player.request_jump(&mut out.commands) {
                out.events.push(GameEvent::Jumped { jumps_used });
            }
        }
        Intent::Crouch {
            active,
            auto_release_ms,
        } => {
            // Any crouch command preempts a pending auto-release
            if state.run.pending_release.take().is_some() {
                log::trace!("Pending crouch release cancelled");
            }
            if state.player.set_crouch(active, &mut out.commands) {
                out.events.push(GameEvent::CrouchChanged { crouching: active });
            }
            if let Some(delay) = auto_release_ms {
                if active && state.player.crouching {
                    state.run.pending_release = Some(ScheduledRelease {
                        due_ms: state.run.elapsed_ms + delay,
                    });
                }
            }
        }
    }
}

fn fire_pending_release(state: &mut GameState, out: &mut TickOutput) {
    let Some(release) = state.run.pending_release else {
        return;
    };
    if state.run.elapsed_ms < release.due_ms {
        return;
    }
    state.run.pending_release = None;
    log::debug!("Auto-releasing crouch");
    if state.player.set_crouch(false, &mut out.commands) {
        out.events.push(GameEvent::CrouchChanged { crouching: false });
    }
}

fn end_run(state: &mut GameState, out: &mut TickOutput) {
    state.phase = GamePhase::GameOver;
    state.run.pending_release = None;
    state.intents.clear();
    let final_score = state.run.score;
    log::info!(
        "Run ended: score {} after {:.1}s",
        final_score,
        state.run.elapsed_ms / 1000.0
    );
    out.events.push(GameEvent::RunEnded { final_score });
}

/// Start a fresh run, discarding everything from the previous one
pub fn restart(state: &mut GameState, seed: u64) {
    log::info!("Restarting (previous score {})", state.run.score);
    let tuning = state.tuning.clone();
    *state = GameState::with_tuning(seed, tuning);
}
