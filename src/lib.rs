//! Capy Run - A side-scrolling capybara endless runner
//!
//! Core modules:
//! - `sim`: Deterministic gameplay core (player state machine, obstacles, scoring, run loop)
//! - `platform`: Adapters that turn host input/physics into core intents and signals
//! - `tuning`: Data-driven game balance

pub mod platform;
pub mod sim;
pub mod tuning;

pub use tuning::{Tuning, TuningError};

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (120 Hz)
    pub const SIM_DT: f32 = 1.0 / 120.0;
    /// Fixed simulation timestep in milliseconds
    pub const SIM_DT_MS: f64 = 1000.0 / 120.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// World dimensions
    pub const WORLD_WIDTH: f32 = 1200.0;
    pub const WORLD_HEIGHT: f32 = 400.0;
    /// Top edge of the running surface (screen Y grows downward)
    pub const GROUND_TOP_Y: f32 = 300.0;

    /// Player defaults - 10% in from the left edge
    pub const PLAYER_X: f32 = WORLD_WIDTH * 0.1;
    pub const PLAYER_WIDTH: f32 = 60.0;
    pub const PLAYER_NORMAL_HEIGHT: f32 = 80.0;
    pub const PLAYER_CROUCH_HEIGHT: f32 = 40.0;
    /// Vertical velocity applied on jump (negative = up)
    pub const JUMP_VELOCITY: f32 = -500.0;
    /// World gravity used by the reference motion host (pixels/s²)
    pub const GRAVITY: f32 = 1200.0;

    /// Obstacles enter just beyond the right edge
    pub const OBSTACLE_SPAWN_X: f32 = 1250.0;
    /// Obstacles left of this X are off-screen and pruned
    pub const OBSTACLE_PRUNE_X: f32 = -50.0;
}

/// Axis-aligned overlap test between two center/size boxes
#[inline]
pub fn boxes_overlap(center_a: Vec2, size_a: Vec2, center_b: Vec2, size_b: Vec2) -> bool {
    let delta = (center_a - center_b).abs();
    let reach = (size_a + size_b) * 0.5;
    delta.x < reach.x && delta.y < reach.y
}

/// Bottom edge Y of a center-anchored box of the given height
#[inline]
pub fn bottom_edge(center_y: f32, height: f32) -> f32 {
    center_y + height / 2.0
}

/// Center Y that keeps a box of the given height resting on `bottom_y`
#[inline]
pub fn center_for_bottom(bottom_y: f32, height: f32) -> f32 {
    bottom_y - height / 2.0
}
