//! Player action state machine
//!
//! Vertical state (grounded/airborne) plus an orthogonal crouch flag. The jump
//! budget is a resource: `request_jump` spends it, and only a verified landing
//! edge from the motion host refills it, so key repeat can't chain jumps.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::{bottom_edge, center_for_bottom};

/// Vertical contact with the running surface
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum VerticalState {
    Grounded,
    Airborne,
}

/// Instruction for the host's physics body
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum MotionCommand {
    /// Set vertical velocity (negative = up)
    ApplyUpwardImpulse { velocity_y: f32 },
    /// Resize the player hitbox
    SetHitboxSize { width: f32, height: f32 },
    /// Move the player's center to this Y
    SetVerticalPosition { center_y: f32 },
}

/// Result of a jump request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JumpOutcome {
    /// Impulse applied; carries jumps used so far
    Jumped(u8),
    /// Budget exhausted, ignored
    Ignored,
}

/// The player
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerState {
    pub vertical: VerticalState,
    pub crouching: bool,
    pub jumps_used: u8,
    pub max_jumps: u8,
    /// Hitbox center, as last reported by the host (or moved by a crouch)
    pub pos: Vec2,
    pub hit_width: f32,
    pub normal_height: f32,
    pub crouch_height: f32,
    /// Last grounded signal from the host (for edge detection)
    was_grounded: bool,
}

impl PlayerState {
    /// Fresh player standing on the ground
    pub fn new(max_jumps: u8) -> Self {
        Self {
            vertical: VerticalState::Grounded,
            crouching: false,
            jumps_used: 0,
            max_jumps,
            pos: Vec2::new(
                PLAYER_X,
                center_for_bottom(GROUND_TOP_Y, PLAYER_NORMAL_HEIGHT),
            ),
            hit_width: PLAYER_WIDTH,
            normal_height: PLAYER_NORMAL_HEIGHT,
            crouch_height: PLAYER_CROUCH_HEIGHT,
            was_grounded: true,
        }
    }

    pub fn is_grounded(&self) -> bool {
        self.vertical == VerticalState::Grounded
    }

    pub fn is_airborne(&self) -> bool {
        self.vertical == VerticalState::Airborne
    }

    /// Current hitbox height (depends on crouch)
    pub fn hit_height(&self) -> f32 {
        if self.crouching {
            self.crouch_height
        } else {
            self.normal_height
        }
    }

    pub fn hit_size(&self) -> Vec2 {
        Vec2::new(self.hit_width, self.hit_height())
    }

    /// Y of the hitbox bottom edge (feet)
    pub fn bottom(&self) -> f32 {
        bottom_edge(self.pos.y, self.hit_height())
    }

    pub fn jumps_remaining(&self) -> u8 {
        self.max_jumps.saturating_sub(self.jumps_used)
    }

    /// Spend one jump if any remain
    pub fn request_jump(&mut self, commands: &mut Vec<MotionCommand>) -> JumpOutcome {
        if self.jumps_used >= self.max_jumps {
            log::trace!("Jump ignored, budget exhausted ({})", self.jumps_used);
            return JumpOutcome::Ignored;
        }
        self.jumps_used += 1;
        self.vertical = VerticalState::Airborne;
        commands.push(MotionCommand::ApplyUpwardImpulse {
            velocity_y: JUMP_VELOCITY,
        });
        log::debug!("Jump executed, count: {}", self.jumps_used);
        JumpOutcome::Jumped(self.jumps_used)
    }

    /// Enter/leave crouch, keeping the feet planted
    ///
    /// Returns true if the crouch flag changed.
    pub fn set_crouch(&mut self, active: bool, commands: &mut Vec<MotionCommand>) -> bool {
        if active == self.crouching {
            return false;
        }
        if active && !self.is_grounded() {
            log::trace!("Crouch ignored while airborne");
            return false;
        }

        let feet = self.bottom();
        self.crouching = active;
        let height = self.hit_height();
        self.pos.y = center_for_bottom(feet, height);

        commands.push(MotionCommand::SetHitboxSize {
            width: self.hit_width,
            height,
        });
        commands.push(MotionCommand::SetVerticalPosition {
            center_y: self.pos.y,
        });
        log::debug!("Crouch {}", if active { "on" } else { "off" });
        true
    }

    /// Consume the host's grounded report for this tick
    ///
    /// Returns true on a landing edge.
    pub fn on_grounded_signal(&mut self, grounded: bool) -> bool {
        let landed = grounded && !self.was_grounded;
        if landed {
            self.jumps_used = 0;
            self.vertical = VerticalState::Grounded;
            log::debug!("Landed, jump count reset");
        } else if !grounded && self.was_grounded {
            self.vertical = VerticalState::Airborne;
        }
        self.was_grounded = grounded;
        landed
    }

    /// Sync the hitbox center with the host's body position
    pub fn sync_center_y(&mut self, center_y: f32) {
        self.pos.y = center_y;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn impulses(commands: &[MotionCommand]) -> usize {
        commands
            .iter()
            .filter(|c| matches!(c, MotionCommand::ApplyUpwardImpulse { .. }))
            .count()
    }

    #[test]
    fn test_double_jump_budget() {
        let mut player = PlayerState::new(2);
        let mut commands = Vec::new();

        assert_eq!(player.request_jump(&mut commands), JumpOutcome::Jumped(1));
        player.on_grounded_signal(false);
        assert_eq!(player.request_jump(&mut commands), JumpOutcome::Jumped(2));
        assert_eq!(player.request_jump(&mut commands), JumpOutcome::Ignored);
        assert_eq!(impulses(&commands), 2);
        assert_eq!(player.jumps_used, 2);
        assert!(player.is_airborne());
    }

    #[test]
    fn test_landing_resets_budget() {
        let mut player = PlayerState::new(2);
        let mut commands = Vec::new();
        player.request_jump(&mut commands);
        player.on_grounded_signal(false);
        player.request_jump(&mut commands);

        assert!(player.on_grounded_signal(true));
        assert_eq!(player.jumps_used, 0);
        assert!(player.is_grounded());
    }

    #[test]
    fn test_no_reset_without_landing_edge() {
        let mut player = PlayerState::new(2);
        let mut commands = Vec::new();
        player.request_jump(&mut commands);
        // Host still reports ground contact on the jump tick: not a landing
        assert!(!player.on_grounded_signal(true));
        assert_eq!(player.jumps_used, 1);
        assert!(player.is_airborne());
    }

    #[test]
    fn test_crouch_keeps_feet_planted() {
        let mut player = PlayerState::new(2);
        let mut commands = Vec::new();
        let bottom_before = player.bottom();

        assert!(player.set_crouch(true, &mut commands));
        assert_eq!(player.hit_height(), PLAYER_CROUCH_HEIGHT);
        assert_eq!(player.bottom(), bottom_before);
        assert!(commands.contains(&MotionCommand::SetHitboxSize {
            width: PLAYER_WIDTH,
            height: PLAYER_CROUCH_HEIGHT,
        }));

        assert!(player.set_crouch(false, &mut commands));
        assert_eq!(player.hit_height(), PLAYER_NORMAL_HEIGHT);
        assert_eq!(player.bottom(), bottom_before);
    }

    #[test]
    fn test_crouch_ignored_while_airborne() {
        let mut player = PlayerState::new(2);
        let mut commands = Vec::new();
        player.request_jump(&mut commands);
        commands.clear();

        assert!(!player.set_crouch(true, &mut commands));
        assert!(!player.crouching);
        assert!(commands.is_empty());
    }

    #[test]
    fn test_crouch_matching_state_is_noop() {
        let mut player = PlayerState::new(2);
        let mut commands = Vec::new();
        assert!(!player.set_crouch(false, &mut commands));
        player.set_crouch(true, &mut commands);
        commands.clear();
        assert!(!player.set_crouch(true, &mut commands));
        assert!(commands.is_empty());
    }

    proptest! {
        #[test]
        fn impulses_never_exceed_budget(requests in 0usize..20) {
            let mut player = PlayerState::new(2);
            let mut commands = Vec::new();
            for _ in 0..requests {
                player.request_jump(&mut commands);
                player.on_grounded_signal(false);
            }
            prop_assert_eq!(impulses(&commands), requests.min(2));
        }
    }
}
