//! Love Quest - A top-down collect-and-dodge arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (movement, collisions, hazards, run state)
//! - `catalog`: The eight hand-authored levels
//! - `driver`: Fixed-cadence game loop and input timers
//! - `input`: Translation of raw key/touch/button input into move intents
//! - `settings`: Data-driven driver tunables
//! - `autopilot`: Demo player used by the headless runner

pub mod autopilot;
pub mod catalog;
pub mod driver;
pub mod error;
pub mod input;
pub mod settings;
pub mod sim;

pub use catalog::{Catalog, Level};
pub use driver::{GameLoop, InputEvent};
pub use error::{CatalogError, ConfigError, GameError};
pub use input::{Direction, InputSource, MoveIntent};
pub use settings::Settings;

/// Game configuration constants
///
/// Level geometry was authored against these values; they are not tunable.
pub mod consts {
    /// Simulation tick cadence (ms)
    pub const TICK_MS: u64 = 50;

    /// Play-field bounds (percent units) the character is clamped to
    pub const FIELD_MIN: f32 = 2.0;
    pub const FIELD_MAX: f32 = 98.0;
    /// Where the character appears on start, hit, and level change
    pub const SPAWN_X: f32 = 50.0;
    pub const SPAWN_Y: f32 = 50.0;

    /// Edge of the character's square footprint (obstacle collision)
    pub const CHARACTER_SIZE: f32 = 4.0;
    /// Proximity radius for item pickup and hazard contact
    pub const INTERACTION_RADIUS: f32 = 6.0;

    /// Default movement steps per input source
    pub const KEY_STEP: f32 = 2.5;
    pub const BUTTON_STEP: f32 = 2.0;
    pub const SWIPE_STEP: f32 = 1.5;

    /// Lives at the start of a run
    pub const START_LIVES: u32 = 10;
    /// Score per collected item
    pub const ITEM_SCORE: u64 = 100;
    /// Time bonus: (TIME_BONUS_SECS - elapsed) * TIME_BONUS_RATE, floored at 0
    pub const TIME_BONUS_SECS: f64 = 60.0;
    pub const TIME_BONUS_RATE: f64 = 10.0;

    /// Timer durations (ms)
    pub const INVINCIBILITY_MS: u64 = 2_000;
    pub const MESSAGE_MS: u64 = 3_000;
    pub const PARTICLE_TTL_MS: u64 = 1_000;
    pub const LEVEL_TRANSITION_MS: u64 = 2_000;

    /// Particles spawned per pickup
    pub const PARTICLE_BATCH: usize = 20;

    /// Number of levels in a complete catalog
    pub const LEVEL_COUNT: usize = 8;
}
