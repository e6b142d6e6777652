//! Deterministic gameplay core
//!
//! All gameplay decisions live here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (obstacles in spawn order)
//! - No rendering, physics integration or platform dependencies

pub mod catalog;
pub mod collision;
pub mod intent;
pub mod player;
pub mod scoring;
pub mod spawner;
pub mod state;
pub mod tick;

pub use catalog::{Avoidance, CATALOG, ObstacleDef, ObstacleKind};
pub use collision::{CollisionResult, resolve_overlap};
pub use intent::{Intent, IntentHistory, IntentQueue, IntentSource, QueuedIntent};
pub use player::{JumpOutcome, MotionCommand, PlayerState, VerticalState};
pub use scoring::{score_for, speed_for};
pub use state::{
    DiagnosticSnapshot, GameEvent, GamePhase, GameState, Obstacle, RunState, RunSummary,
    ScheduledRelease, TickOutput,
};
pub use tick::{TickInput, push_intent, restart, tick};
