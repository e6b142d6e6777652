//! Obstacle archetypes
//!
//! The catalog is closed: every `ObstacleKind` has exactly one definition, so
//! hitbox and required avoidance are fixed per kind.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Obstacle types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ObstacleKind {
    /// Fallen tree trunk lying on the ground
    FallenLog,
    /// Spiky branch hanging at head height
    LowBranch,
    /// River with crocodiles cutting across the path
    River,
}

/// Player state needed at the moment of overlap to pass an obstacle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Avoidance {
    /// Player must be airborne
    Jump,
    /// Player must be crouching
    Crouch,
}

/// Static definition of an obstacle archetype
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ObstacleDef {
    pub kind: ObstacleKind,
    /// Hitbox size (width, height)
    pub size: Vec2,
    /// Hitbox center Y when placed in the world
    pub center_y: f32,
    pub avoidance: Avoidance,
}

/// All archetypes, in the order the spawner picks from
pub const CATALOG: [ObstacleDef; 3] = [
    ObstacleDef {
        kind: ObstacleKind::FallenLog,
        size: Vec2::new(80.0, 60.0),
        center_y: 270.0,
        avoidance: Avoidance::Jump,
    },
    ObstacleDef {
        kind: ObstacleKind::LowBranch,
        size: Vec2::new(80.0, 40.0),
        center_y: 230.0,
        avoidance: Avoidance::Crouch,
    },
    ObstacleDef {
        kind: ObstacleKind::River,
        size: Vec2::new(120.0, 60.0),
        center_y: 280.0,
        avoidance: Avoidance::Jump,
    },
];

impl ObstacleKind {
    pub const ALL: [ObstacleKind; 3] = [
        ObstacleKind::FallenLog,
        ObstacleKind::LowBranch,
        ObstacleKind::River,
    ];

    /// Catalog entry for this kind
    pub fn def(self) -> &'static ObstacleDef {
        match self {
            ObstacleKind::FallenLog => &CATALOG[0],
            ObstacleKind::LowBranch => &CATALOG[1],
            ObstacleKind::River => &CATALOG[2],
        }
    }

    pub fn avoidance(self) -> Avoidance {
        self.def().avoidance
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ObstacleKind::FallenLog => "fallen log",
            ObstacleKind::LowBranch => "low branch",
            ObstacleKind::River => "river",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_entries_match_kind() {
        for kind in ObstacleKind::ALL {
            assert_eq!(kind.def().kind, kind);
        }
    }

    #[test]
    fn test_avoidance_table() {
        assert_eq!(ObstacleKind::FallenLog.avoidance(), Avoidance::Jump);
        assert_eq!(ObstacleKind::River.avoidance(), Avoidance::Jump);
        assert_eq!(ObstacleKind::LowBranch.avoidance(), Avoidance::Crouch);
    }

    #[test]
    fn test_river_is_widest() {
        let river = ObstacleKind::River.def().size;
        assert!(river.x > ObstacleKind::FallenLog.def().size.x);
        assert_eq!(river.y, ObstacleKind::FallenLog.def().size.y);
    }
}
