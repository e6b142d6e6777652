//! Obstacle spawning and motion
//!
//! Spawns are gated only by the randomized delay; nothing enforces spacing
//! between consecutive obstacles, so fast runs can produce tight pairs.

use rand::Rng;
use rand_pcg::Pcg32;

use super::catalog::ObstacleKind;
use super::state::{GameEvent, GameState, Obstacle};
use crate::tuning::Tuning;

/// Draw the delay (ms) before the next spawn, uniform over the tuned range
pub fn draw_spawn_delay(rng: &mut Pcg32, tuning: &Tuning) -> f64 {
    rng.random_range(tuning.spawn_delay_min_ms..=tuning.spawn_delay_max_ms) as f64
}

/// Pick an archetype uniformly from the catalog
pub fn pick_kind(rng: &mut Pcg32) -> ObstacleKind {
    ObstacleKind::ALL[rng.random_range(0..ObstacleKind::ALL.len())]
}

/// Spawn one obstacle if the delay since the last spawn has passed
///
/// Returns the ID of the spawned obstacle.
pub fn maybe_spawn(state: &mut GameState, events: &mut Vec<GameEvent>) -> Option<u32> {
    let now = state.run.elapsed_ms;
    if now - state.run.last_spawn_ms <= state.run.next_spawn_delay_ms {
        return None;
    }

    let kind = pick_kind(&mut state.rng);
    let id = state.next_entity_id();
    state.obstacles.push(Obstacle::spawn(id, kind));
    state.run.last_spawn_ms = now;
    state.run.next_spawn_delay_ms = draw_spawn_delay(&mut state.rng, &state.tuning);

    log::debug!(
        "Spawned {} #{} at {:.0}ms, next in {:.0}ms",
        kind.as_str(),
        id,
        now,
        state.run.next_spawn_delay_ms
    );
    events.push(GameEvent::ObstacleSpawned { id, kind });
    Some(id)
}

/// Move every obstacle left by `speed * dt` and prune the ones off-screen
pub fn advance(obstacles: &mut Vec<Obstacle>, speed: f32, dt: f32, events: &mut Vec<GameEvent>) {
    let dx = speed * dt;
    for obstacle in obstacles.iter_mut() {
        obstacle.pos.x -= dx;
    }

    obstacles.retain(|o| {
        if o.is_off_screen() {
            log::trace!("Pruned obstacle #{}", o.id);
            events.push(GameEvent::ObstaclePruned { id: o.id });
            false
        } else {
            true
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::*;
    use rand::SeedableRng;

    #[test]
    fn test_no_spawn_before_delay() {
        let mut state = GameState::new(7);
        let mut events = Vec::new();
        state.run.elapsed_ms = state.run.next_spawn_delay_ms;
        assert_eq!(maybe_spawn(&mut state, &mut events), None);
        assert!(state.obstacles.is_empty());
    }

    #[test]
    fn test_spawn_after_delay() {
        let mut state = GameState::new(7);
        let mut events = Vec::new();
        state.run.elapsed_ms = state.run.next_spawn_delay_ms + 1.0;

        let id = maybe_spawn(&mut state, &mut events).unwrap();
        assert_eq!(state.obstacles.len(), 1);
        assert_eq!(state.obstacles[0].id, id);
        assert_eq!(state.obstacles[0].pos.x, OBSTACLE_SPAWN_X);
        assert_eq!(state.run.last_spawn_ms, state.run.elapsed_ms);
        assert!(matches!(events[0], GameEvent::ObstacleSpawned { .. }));
    }

    #[test]
    fn test_spawn_delay_within_range() {
        let tuning = Tuning::default();
        let mut rng = Pcg32::seed_from_u64(42);
        for _ in 0..1000 {
            let delay = draw_spawn_delay(&mut rng, &tuning);
            assert!((2500.0..=4500.0).contains(&delay));
        }
    }

    #[test]
    fn test_all_kinds_get_picked() {
        let mut rng = Pcg32::seed_from_u64(3);
        let mut seen = std::collections::HashSet::new();
        for _ in 0..200 {
            seen.insert(pick_kind(&mut rng));
        }
        assert_eq!(seen.len(), ObstacleKind::ALL.len());
    }

    #[test]
    fn test_advance_moves_and_prunes() {
        let mut events = Vec::new();
        let mut near = Obstacle::spawn(1, ObstacleKind::FallenLog);
        near.pos.x = -40.0;
        let far = Obstacle::spawn(2, ObstacleKind::River);
        let mut obstacles = vec![near, far];

        advance(&mut obstacles, 80.0, 0.25, &mut events);

        assert_eq!(obstacles.len(), 1);
        assert_eq!(obstacles[0].id, 2);
        assert_eq!(obstacles[0].pos.x, OBSTACLE_SPAWN_X - 20.0);
        assert_eq!(events, vec![GameEvent::ObstaclePruned { id: 1 }]);
    }

    #[test]
    fn test_advance_keeps_spawn_order() {
        let mut events = Vec::new();
        let mut obstacles: Vec<_> = (1..=3)
            .map(|id| {
                let mut o = Obstacle::spawn(id, ObstacleKind::LowBranch);
                o.pos.x = 100.0 * id as f32;
                o
            })
            .collect();
        advance(&mut obstacles, 240.0, 0.5, &mut events);
        let ids: Vec<_> = obstacles.iter().map(|o| o.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }
}
