//! Run state and core simulation types
//!
//! Everything the engine owns for one run lives in [`RunState`].

use std::collections::BTreeSet;

use glam::Vec2;
use serde::Serialize;

use crate::consts::*;

/// Current phase of the game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum GamePhase {
    /// Title screen, nothing has started
    Start,
    /// Active gameplay (including the post-hit invincibility window)
    Playing,
    /// Level cleared, waiting to load the next one
    LevelTransition,
    /// Out of lives
    GameOver,
    /// Every level cleared
    Victory,
}

impl GamePhase {
    /// Run ended, only a restart leaves this phase
    pub fn is_terminal(&self) -> bool {
        matches!(self, GamePhase::GameOver | GamePhase::Victory)
    }
}

/// Reward message currently on screen
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ActiveMessage {
    pub item_id: u32,
    pub text: String,
    pub glyph: String,
    /// Engine time when the message is dismissed
    pub until_ms: u64,
}

/// Something that happened during a command, for logging and UI cues
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum GameEvent {
    Started,
    Restarted,
    ItemCollected { item_id: u32, level: usize },
    Hit { lives_left: u32 },
    LevelComplete { level: usize, time_bonus: u64 },
    LevelStarted { level: usize },
    GameOver { score: u64 },
    Victory { score: u64 },
}

/// Clamp a coordinate to the playable range
#[inline]
pub fn clamp_to_field(v: f32) -> f32 {
    v.clamp(FIELD_MIN, FIELD_MAX)
}

/// Spawn point at the play-field center
#[inline]
pub fn spawn_point() -> Vec2 {
    Vec2::new(SPAWN_X, SPAWN_Y)
}

/// Per-run mutable state
#[derive(Debug, Clone, Serialize)]
pub struct RunState {
    pub phase: GamePhase,
    /// Character anchor (top-left of the footprint)
    pub character: Vec2,
    /// Ids of every item collected this run
    pub collected: BTreeSet<u32>,
    pub level_index: usize,
    pub score: u64,
    pub lives: u32,
    pub invincible: bool,
    /// Engine time the invincibility window ends
    pub invincible_until_ms: Option<u64>,
    /// Engine time the current level started
    pub level_started_ms: u64,
    /// Bonus awarded for the most recently completed level
    pub last_time_bonus: u64,
    /// Levels fully cleared this run
    pub levels_completed: usize,
    pub message: Option<ActiveMessage>,
}

impl Default for RunState {
    fn default() -> Self {
        Self::new(0)
    }
}

impl RunState {
    /// Fresh state on the title screen
    pub fn new(now_ms: u64) -> Self {
        Self {
            phase: GamePhase::Start,
            character: spawn_point(),
            collected: BTreeSet::new(),
            level_index: 0,
            score: 0,
            lives: START_LIVES,
            invincible: false,
            invincible_until_ms: None,
            level_started_ms: now_ms,
            last_time_bonus: 0,
            levels_completed: 0,
            message: None,
        }
    }

    /// Fresh state entering the first level
    pub fn new_run(now_ms: u64) -> Self {
        Self {
            phase: GamePhase::Playing,
            ..Self::new(now_ms)
        }
    }

    pub fn is_game_over(&self) -> bool {
        self.phase == GamePhase::GameOver
    }

    pub fn all_levels_complete(&self) -> bool {
        self.phase == GamePhase::Victory
    }

    /// Neither game over nor victory
    pub fn is_playing(&self) -> bool {
        !self.phase.is_terminal()
    }
}

/// Time bonus for clearing a level after `elapsed_ms`
pub fn time_bonus(elapsed_ms: u64) -> u64 {
    let elapsed_secs = elapsed_ms as f64 / 1000.0;
    ((TIME_BONUS_SECS - elapsed_secs) * TIME_BONUS_RATE)
        .floor()
        .max(0.0) as u64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_run_defaults() {
        let state = RunState::new_run(1_234);
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.character, Vec2::new(50.0, 50.0));
        assert_eq!(state.lives, 10);
        assert_eq!(state.score, 0);
        assert!(state.collected.is_empty());
        assert_eq!(state.level_started_ms, 1_234);
        assert!(state.is_playing());
    }

    #[test]
    fn test_terminal_flags_are_exclusive() {
        for phase in [
            GamePhase::Start,
            GamePhase::Playing,
            GamePhase::LevelTransition,
            GamePhase::GameOver,
            GamePhase::Victory,
        ] {
            let state = RunState {
                phase,
                ..RunState::default()
            };
            let flags = [
                state.is_game_over(),
                state.all_levels_complete(),
                state.is_playing(),
            ];
            assert_eq!(flags.iter().filter(|f| **f).count(), 1, "{:?}", phase);
        }
    }

    #[test]
    fn test_time_bonus() {
        assert_eq!(time_bonus(0), 600);
        assert_eq!(time_bonus(10_000), 500);
        assert_eq!(time_bonus(12_345), 476);
        assert_eq!(time_bonus(60_000), 0);
        assert_eq!(time_bonus(95_000), 0);
    }

    #[test]
    fn test_clamp_to_field() {
        assert_eq!(clamp_to_field(-3.0), 2.0);
        assert_eq!(clamp_to_field(99.5), 98.0);
        assert_eq!(clamp_to_field(42.0), 42.0);
    }
}
