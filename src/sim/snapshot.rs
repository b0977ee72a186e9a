//! Read-only view of the engine for the rendering layer

use std::collections::BTreeSet;

use glam::Vec2;
use serde::Serialize;

use super::hazard::Hazard;
use super::particles::Particle;
use super::state::{ActiveMessage, GamePhase};
use crate::catalog::Level;

/// End-of-run numbers shown on the game over / victory screens
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RunSummary {
    pub items_collected: usize,
    pub total_items: usize,
    pub levels_completed: usize,
    pub lives_left: u32,
    pub total_hazards: usize,
}

/// Everything a renderer may look at, borrowed from the engine
#[derive(Debug, Clone, Serialize)]
pub struct Snapshot<'a> {
    pub revision: u64,
    pub now_ms: u64,
    pub phase: GamePhase,
    pub character: Vec2,
    pub level_index: usize,
    pub level_count: usize,
    pub level: Option<&'a Level>,
    pub collected: &'a BTreeSet<u32>,
    /// Items of the current level already collected
    pub level_collected: usize,
    pub score: u64,
    pub lives: u32,
    pub invincible: bool,
    pub message: Option<&'a ActiveMessage>,
    pub particles: &'a [Particle],
    pub hazards: &'a [Hazard],
    /// Bonus of the most recently completed level
    pub time_bonus: u64,
    pub game_over: bool,
    pub all_levels_complete: bool,
    pub playing: bool,
    pub summary: RunSummary,
}

impl Snapshot<'_> {
    /// Current level cleared, next one loading
    pub fn level_complete(&self) -> bool {
        self.phase == GamePhase::LevelTransition
    }

    /// Serialize for external consumers
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use crate::catalog::Catalog;
    use crate::sim::Engine;

    #[test]
    fn test_snapshot_reflects_engine() {
        let mut engine = Engine::new(Arc::new(Catalog::builtin().unwrap()));
        engine.start();

        let snapshot = engine.snapshot();
        assert!(snapshot.playing);
        assert!(!snapshot.game_over);
        assert!(!snapshot.all_levels_complete);
        assert!(!snapshot.level_complete());
        assert_eq!(snapshot.level_index, 0);
        assert_eq!(snapshot.level_count, 8);
        assert_eq!(snapshot.level.map(|l| l.items.len()), Some(4));
        assert_eq!(snapshot.lives, 10);
        assert_eq!(snapshot.hazards.len(), 1);
        assert_eq!(snapshot.summary.total_items, 57);
        assert_eq!(snapshot.summary.total_hazards, 24);
    }

    #[test]
    fn test_snapshot_serializes() {
        let mut engine = Engine::new(Arc::new(Catalog::builtin().unwrap()));
        engine.start();
        let json = engine.snapshot().to_json().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["phase"], "Playing");
        assert_eq!(value["lives"], 10);
        assert_eq!(value["level"]["name"], "Rose Garden 🌹");
        assert_eq!(value["hazards"][0]["pattern"], "horizontal");
    }
}
