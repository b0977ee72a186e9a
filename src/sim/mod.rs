//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Virtual millisecond clock only, advanced by the caller
//! - No randomness
//! - Stable iteration order (catalog order for items and hazards)
//! - No rendering or platform dependencies

pub mod collision;
pub mod engine;
pub mod hazard;
pub mod particles;
pub mod snapshot;
pub mod state;
pub mod timers;

pub use collision::{Rect, distance, footprint_blocked, rect_overlap, within_reach};
pub use engine::Engine;
pub use hazard::{Hazard, HazardConfig, MotionPattern, position_at, spawn_hazards};
pub use particles::{Particle, ParticleSystem};
pub use snapshot::{RunSummary, Snapshot};
pub use state::{ActiveMessage, GameEvent, GamePhase, RunState, time_bonus};
pub use timers::{Scheduler, TimerKind};
