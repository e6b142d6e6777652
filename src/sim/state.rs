//! Game state and core simulation types
//!
//! Everything a run owns lives in `GameState`; a restart replaces it wholesale.

use std::fmt;

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::catalog::{Avoidance, ObstacleKind};
use super::intent::{IntentHistory, IntentQueue};
use super::player::{MotionCommand, PlayerState};
use crate::consts::*;
use crate::tuning::Tuning;

/// Current phase of the run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Active gameplay
    Running,
    /// Run ended; state is frozen until restart
    GameOver,
}

/// An obstacle in flight
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Obstacle {
    pub id: u32,
    pub kind: ObstacleKind,
    /// Hitbox center
    pub pos: Vec2,
    /// Hitbox size (width, height)
    pub size: Vec2,
}

impl Obstacle {
    /// Place a new obstacle of `kind` at the spawn line
    pub fn spawn(id: u32, kind: ObstacleKind) -> Self {
        let def = kind.def();
        Self {
            id,
            kind,
            pos: Vec2::new(OBSTACLE_SPAWN_X, def.center_y),
            size: def.size,
        }
    }

    pub fn avoidance(&self) -> Avoidance {
        self.kind.avoidance()
    }

    /// Past the left edge and ready to prune
    pub fn is_off_screen(&self) -> bool {
        self.pos.x < OBSTACLE_PRUNE_X
    }
}

/// Something that happened during a tick, for presentation/audio
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    ObstacleSpawned { id: u32, kind: ObstacleKind },
    ObstaclePruned { id: u32 },
    ObstacleAvoided { id: u32, kind: ObstacleKind },
    Jumped { jumps_used: u8 },
    Landed,
    CrouchChanged { crouching: bool },
    /// Terminal: the run is over
    RunEnded { final_score: u64 },
}

/// A pending one-shot crouch release (swipe auto-release)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScheduledRelease {
    /// Run time (ms) at which the release fires
    pub due_ms: f64,
}

/// Time, score and difficulty for the current run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunState {
    /// Survival time in ms
    pub elapsed_ms: f64,
    pub score: u64,
    /// Obstacle speed (pixels/s), never decreases within a run
    pub game_speed: f32,
    /// Run time of the most recent spawn
    pub last_spawn_ms: f64,
    /// Required gap before the next spawn
    pub next_spawn_delay_ms: f64,
    /// Pending swipe auto-release, if any
    pub pending_release: Option<ScheduledRelease>,
}

impl RunState {
    pub fn new(base_speed: f32, first_delay_ms: f64) -> Self {
        Self {
            elapsed_ms: 0.0,
            score: 0,
            game_speed: base_speed,
            last_spawn_ms: 0.0,
            next_spawn_delay_ms: first_delay_ms,
            pending_release: None,
        }
    }
}

/// Complete state of one run (deterministic, serializable)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    /// Run RNG (obstacle kinds and spawn delays)
    pub rng: Pcg32,
    pub tuning: Tuning,
    pub phase: GamePhase,
    /// Simulation tick counter
    pub time_ticks: u64,
    pub run: RunState,
    pub player: PlayerState,
    /// Obstacles in flight, in spawn order
    pub obstacles: Vec<Obstacle>,
    /// Intents waiting for the next tick
    pub intents: IntentQueue,
    pub history: IntentHistory,
    /// Next entity ID
    next_id: u32,
}

impl GameState {
    /// Create a fresh run with the given seed and default balance
    pub fn new(seed: u64) -> Self {
        Self::with_tuning(seed, Tuning::default())
    }

    /// Create a fresh run with the given seed and balance
    pub fn with_tuning(seed: u64, tuning: Tuning) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);
        let first_delay = super::spawner::draw_spawn_delay(&mut rng, &tuning);
        let state = Self {
            seed,
            rng,
            phase: GamePhase::Running,
            time_ticks: 0,
            run: RunState::new(tuning.base_speed, first_delay),
            player: PlayerState::new(tuning.max_jumps),
            obstacles: Vec::new(),
            intents: IntentQueue::new(),
            history: IntentHistory::new(tuning.intent_history_len),
            tuning,
            next_id: 1,
        };
        log::info!("Run started (seed {})", seed);
        state
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    pub fn is_running(&self) -> bool {
        self.phase == GamePhase::Running
    }

    pub fn score(&self) -> u64 {
        self.run.score
    }

    /// Read-only view for the HUD / debug overlay
    pub fn diagnostics(&self) -> DiagnosticSnapshot {
        DiagnosticSnapshot {
            jumps_used: self.player.jumps_used,
            grounded: self.player.is_grounded(),
            crouching: self.player.crouching,
            recent_intents: self.history.labels().into_iter().map(String::from).collect(),
            score: self.run.score,
            game_speed: self.run.game_speed,
            obstacles: self.obstacles.len(),
            phase: self.phase,
        }
    }

    /// Final results, available once the run has ended
    pub fn summary(&self) -> Option<RunSummary> {
        match self.phase {
            GamePhase::GameOver => Some(RunSummary {
                final_score: self.run.score,
                elapsed_ms: self.run.elapsed_ms,
                seed: self.seed,
            }),
            GamePhase::Running => None,
        }
    }
}

/// What a tick produced for the host
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TickOutput {
    /// Physics instructions, in the order they were issued
    pub commands: Vec<MotionCommand>,
    pub events: Vec<GameEvent>,
}

impl TickOutput {
    /// Final score if the run ended this tick
    pub fn run_ended(&self) -> Option<u64> {
        self.events.iter().find_map(|e| match e {
            GameEvent::RunEnded { final_score } => Some(*final_score),
            _ => None,
        })
    }
}

/// Player/run status for the debug overlay
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiagnosticSnapshot {
    pub jumps_used: u8,
    pub grounded: bool,
    pub crouching: bool,
    /// Newest first
    pub recent_intents: Vec<String>,
    pub score: u64,
    pub game_speed: f32,
    pub obstacles: usize,
    pub phase: GamePhase,
}

impl fmt::Display for DiagnosticSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let yn = |b: bool| if b { "Y" } else { "N" };
        let keys = if self.recent_intents.is_empty() {
            "None".to_string()
        } else {
            self.recent_intents.join(" ")
        };
        write!(
            f,
            "Jumps: {} | Ground: {} | Crouch: {} | Keys: {}",
            self.jumps_used,
            yn(self.grounded),
            yn(self.crouching),
            keys
        )
    }
}

/// Game-over screen data
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RunSummary {
    pub final_score: u64,
    pub elapsed_ms: f64,
    pub seed: u64,
}
