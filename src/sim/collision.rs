//! Overlap outcome resolution
//!
//! The motion host detects overlaps; this module only decides whether the
//! player was in the right state to pass. An avoided overlap keeps being
//! reported every tick until the obstacle moves past, and resolves the same
//! way each time.

use super::catalog::Avoidance;
use super::player::PlayerState;
use super::state::Obstacle;

/// Outcome of one overlap
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollisionResult {
    /// Player passed the obstacle; nothing happens
    Avoided,
    /// Player hit the obstacle; the run ends
    Hit,
}

impl CollisionResult {
    pub fn is_hit(self) -> bool {
        self == CollisionResult::Hit
    }
}

/// Whether the player state satisfies an avoidance requirement
pub fn satisfies(avoidance: Avoidance, player: &PlayerState) -> bool {
    match avoidance {
        Avoidance::Crouch => player.crouching,
        Avoidance::Jump => player.is_airborne(),
    }
}

/// Decide the outcome of the player overlapping `obstacle`
pub fn resolve_overlap(player: &PlayerState, obstacle: &Obstacle) -> CollisionResult {
    if satisfies(obstacle.avoidance(), player) {
        log::trace!("Avoided {} #{}", obstacle.kind.as_str(), obstacle.id);
        CollisionResult::Avoided
    } else {
        log::debug!(
            "Hit {} #{} (airborne: {}, crouching: {})",
            obstacle.kind.as_str(),
            obstacle.id,
            player.is_airborne(),
            player.crouching
        );
        CollisionResult::Hit
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::catalog::ObstacleKind;

    fn grounded() -> PlayerState {
        PlayerState::new(2)
    }

    fn airborne() -> PlayerState {
        let mut player = PlayerState::new(2);
        player.request_jump(&mut Vec::new());
        player
    }

    fn crouched() -> PlayerState {
        let mut player = PlayerState::new(2);
        player.set_crouch(true, &mut Vec::new());
        player
    }

    #[test]
    fn test_low_branch() {
        let branch = Obstacle::spawn(1, ObstacleKind::LowBranch);
        assert_eq!(resolve_overlap(&crouched(), &branch), CollisionResult::Avoided);
        assert_eq!(resolve_overlap(&grounded(), &branch), CollisionResult::Hit);
        // Jumping into a branch is not enough
        assert_eq!(resolve_overlap(&airborne(), &branch), CollisionResult::Hit);
    }

    #[test]
    fn test_fallen_log() {
        let fallen = Obstacle::spawn(1, ObstacleKind::FallenLog);
        assert_eq!(resolve_overlap(&airborne(), &fallen), CollisionResult::Avoided);
        assert_eq!(resolve_overlap(&grounded(), &fallen), CollisionResult::Hit);
        assert_eq!(resolve_overlap(&crouched(), &fallen), CollisionResult::Hit);
    }

    #[test]
    fn test_river() {
        let river = Obstacle::spawn(1, ObstacleKind::River);
        assert_eq!(resolve_overlap(&airborne(), &river), CollisionResult::Avoided);
        assert_eq!(resolve_overlap(&grounded(), &river), CollisionResult::Hit);
    }

    #[test]
    fn test_crouch_jump_passes_both() {
        // Crouch held into a jump stays set while airborne
        let mut player = crouched();
        player.request_jump(&mut Vec::new());
        assert!(!resolve_overlap(&player, &Obstacle::spawn(1, ObstacleKind::LowBranch)).is_hit());
        assert!(!resolve_overlap(&player, &Obstacle::spawn(2, ObstacleKind::River)).is_hit());
    }
}
