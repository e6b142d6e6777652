//! Headless reference host
//!
//! A minimal stand-in for the engine side: integrates gravity for the player
//! body, reports ground contact and AABB overlaps, applies motion commands,
//! and steps the core on a fixed timestep. Used by the native binary and
//! integration tests; a real engine replaces all of this.

use glam::Vec2;

use super::input::{InputAdapter, InputCommand, RawInput};
use crate::boxes_overlap;
use crate::consts::*;
use crate::sim::{GameState, MotionCommand, TickInput, TickOutput, push_intent, restart, tick};
use crate::tuning::Tuning;

/// The player's physics body
#[derive(Debug, Clone)]
pub struct Body {
    /// Center position
    pub pos: Vec2,
    pub vel: Vec2,
    pub size: Vec2,
}

impl Default for Body {
    fn default() -> Self {
        Self {
            pos: Vec2::new(PLAYER_X, GROUND_TOP_Y - PLAYER_NORMAL_HEIGHT / 2.0),
            vel: Vec2::ZERO,
            size: Vec2::new(PLAYER_WIDTH, PLAYER_NORMAL_HEIGHT),
        }
    }
}

impl Body {
    pub fn bottom(&self) -> f32 {
        self.pos.y + self.size.y / 2.0
    }

    pub fn on_floor(&self) -> bool {
        self.bottom() >= GROUND_TOP_Y && self.vel.y >= 0.0
    }

    /// Gravity, velocity integration and ground clamp
    pub fn integrate(&mut self, dt: f32) {
        self.vel.y += GRAVITY * dt;
        self.pos += self.vel * dt;
        if self.bottom() >= GROUND_TOP_Y {
            self.pos.y = GROUND_TOP_Y - self.size.y / 2.0;
            self.vel.y = self.vel.y.min(0.0);
        }
    }

    pub fn apply(&mut self, command: MotionCommand) {
        match command {
            MotionCommand::ApplyUpwardImpulse { velocity_y } => self.vel.y = velocity_y,
            MotionCommand::SetHitboxSize { width, height } => self.size = Vec2::new(width, height),
            MotionCommand::SetVerticalPosition { center_y } => self.pos.y = center_y,
        }
    }
}

/// A run hosted without a renderer
#[derive(Debug, Clone)]
pub struct HeadlessRun {
    pub state: GameState,
    pub body: Body,
    pub input: InputAdapter,
    accumulator: f32,
    /// Runs completed so far (seeds the next restart)
    runs: u64,
}

impl HeadlessRun {
    pub fn new(seed: u64) -> Self {
        Self::with_tuning(seed, Tuning::default())
    }

    pub fn with_tuning(seed: u64, tuning: Tuning) -> Self {
        Self {
            input: InputAdapter::new(&tuning),
            state: GameState::with_tuning(seed, tuning),
            body: Body::default(),
            accumulator: 0.0,
            runs: 0,
        }
    }

    /// Feed a device event
    pub fn send(&mut self, event: RawInput) {
        match self.input.handle(event, self.state.phase) {
            Some(InputCommand::Intent(intent)) => push_intent(&mut self.state, intent),
            Some(InputCommand::Restart) => self.restart(),
            None => {}
        }
    }

    /// Start the next run with a seed derived from the first one
    pub fn restart(&mut self) {
        self.runs += 1;
        let seed = self.state.seed.wrapping_add(self.runs);
        restart(&mut self.state, seed);
        self.body = Body::default();
        self.input.reset();
        self.accumulator = 0.0;
    }

    /// IDs of obstacles currently overlapping the player body, in spawn order
    pub fn overlaps(&self) -> Vec<u32> {
        self.state
            .obstacles
            .iter()
            .filter(|o| boxes_overlap(self.body.pos, self.body.size, o.pos, o.size))
            .map(|o| o.id)
            .collect()
    }

    /// Physics step, then one core tick, then apply its commands
    pub fn step(&mut self) -> TickOutput {
        if self.state.is_running() {
            self.body.integrate(SIM_DT);
        }
        if let Some(repeat) = self.input.held_repeat() {
            push_intent(&mut self.state, repeat);
        }

        let input = TickInput {
            grounded: self.body.on_floor(),
            player_center_y: Some(self.body.pos.y),
            overlaps: self.overlaps(),
        };
        let out = tick(&mut self.state, &input, SIM_DT);
        for command in &out.commands {
            self.body.apply(*command);
        }
        out
    }

    /// Run as many fixed steps as `frame_dt` (seconds) covers
    pub fn frame(&mut self, frame_dt: f32) -> Vec<TickOutput> {
        self.accumulator += frame_dt.min(0.1);
        let mut outputs = Vec::new();
        let mut substeps = 0;
        while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
            outputs.push(self.step());
            self.accumulator -= SIM_DT;
            substeps += 1;
        }
        outputs
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::input::Key;

    #[test]
    fn test_body_rests_on_ground() {
        let mut body = Body::default();
        for _ in 0..10 {
            body.integrate(SIM_DT);
        }
        assert!(body.on_floor());
        assert_eq!(body.bottom(), GROUND_TOP_Y);
    }

    #[test]
    fn test_jump_leaves_and_returns_to_ground() {
        let mut run = HeadlessRun::new(5);
        run.send(RawInput::KeyDown(Key::Char('a')));
        run.step();
        assert!(run.body.vel.y < 0.0);

        run.step();
        assert!(!run.body.on_floor());

        // Flight time at -500 px/s under 1200 px/s² is well under a second
        for _ in 0..120 {
            run.step();
        }
        assert!(run.body.on_floor());
        assert_eq!(run.state.player.jumps_used, 0);
    }

    #[test]
    fn test_frame_caps_substeps() {
        let mut run = HeadlessRun::new(5);
        let outputs = run.frame(1.0);
        assert_eq!(outputs.len(), MAX_SUBSTEPS as usize);
    }
}
