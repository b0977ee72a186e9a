//! Simulation state machine
//!
//! The [`Engine`] is the single owner of a run. Commands (`start`, `restart`,
//! `move_character`, `tick`) and the virtual clock (`advance_to`) are the only
//! ways in; [`Engine::snapshot`] is the only way out. Every command runs its
//! checks synchronously in a fixed order: movement, obstacle collision, item
//! pickup, level completion, hazard contact.

use std::sync::Arc;

use glam::Vec2;

use super::collision::{footprint_blocked, within_reach};
use super::hazard::{Hazard, spawn_hazards};
use super::particles::{Particle, ParticleSystem};
use super::snapshot::{RunSummary, Snapshot};
use super::state::{
    ActiveMessage, GameEvent, GamePhase, RunState, clamp_to_field, spawn_point, time_bonus,
};
use super::timers::{Scheduler, TimerKind};
use crate::catalog::{Catalog, Level};
use crate::consts::*;
use crate::input::MoveIntent;

/// Authoritative game simulation
#[derive(Debug, Clone)]
pub struct Engine {
    catalog: Arc<Catalog>,
    state: RunState,
    hazards: Vec<Hazard>,
    particles: ParticleSystem,
    timers: Scheduler,
    /// Virtual clock (ms)
    now_ms: u64,
    /// Bumped on every state change
    revision: u64,
    events: Vec<GameEvent>,
}

impl Engine {
    /// Create an engine sitting on the title screen
    pub fn new(catalog: Arc<Catalog>) -> Self {
        Self {
            catalog,
            state: RunState::new(0),
            hazards: Vec::new(),
            particles: ParticleSystem::new(),
            timers: Scheduler::new(),
            now_ms: 0,
            revision: 0,
            events: Vec::new(),
        }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn state(&self) -> &RunState {
        &self.state
    }

    pub fn phase(&self) -> GamePhase {
        self.state.phase
    }

    pub fn hazards(&self) -> &[Hazard] {
        &self.hazards
    }

    pub fn particles(&self) -> &[Particle] {
        self.particles.particles()
    }

    pub fn now_ms(&self) -> u64 {
        self.now_ms
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Level the run is currently on
    pub fn current_level(&self) -> Option<&Level> {
        self.catalog.level(self.state.level_index)
    }

    /// Take the events recorded since the last call
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Leave the title screen
    pub fn start(&mut self) {
        if self.state.phase != GamePhase::Start {
            log::debug!("start() ignored in {:?}", self.state.phase);
            return;
        }
        self.begin_run(GameEvent::Started);
    }

    /// Throw the current run away and start over from level 1
    pub fn restart(&mut self) {
        self.begin_run(GameEvent::Restarted);
    }

    fn begin_run(&mut self, event: GameEvent) {
        // Anything still scheduled belongs to the old run
        self.timers.reset();
        self.particles.clear();
        self.state = RunState::new_run(self.now_ms);
        self.hazards = self
            .catalog
            .level(0)
            .map(|level| spawn_hazards(&level.hazards))
            .unwrap_or_default();
        log::info!("Run started (generation {})", self.timers.generation());
        self.events.push(event);
        self.events.push(GameEvent::LevelStarted { level: 0 });
        self.touch();
        self.pickup_check();
    }

    /// Where `intent` would put the character, after clamping
    pub fn candidate(&self, intent: MoveIntent) -> Vec2 {
        let step = intent.step.unwrap_or(KEY_STEP);
        let target = self.state.character + intent.direction.offset() * step;
        Vec2::new(clamp_to_field(target.x), clamp_to_field(target.y))
    }

    /// Whether `intent` would run the character into an obstacle
    pub fn is_blocked(&self, intent: MoveIntent) -> bool {
        let candidate = self.candidate(intent);
        self.current_level()
            .is_some_and(|level| footprint_blocked(candidate, &level.obstacles))
    }

    /// Try to move one step; returns whether the character moved
    ///
    /// Blocked and out-of-bounds moves are silently dropped.
    pub fn move_character(&mut self, intent: MoveIntent) -> bool {
        if self.state.phase != GamePhase::Playing {
            return false;
        }
        if !intent.step.is_none_or(|s| s.is_finite() && s > 0.0) {
            log::warn!("Ignoring move with invalid step {:?}", intent.step);
            return false;
        }

        let candidate = self.candidate(intent);
        if candidate == self.state.character || self.is_blocked(intent) {
            return false;
        }

        self.state.character = candidate;
        self.touch();
        self.pickup_check();
        self.check_hazard_contact();
        true
    }

    /// One simulation tick: advance hazards, then check contact
    pub fn tick(&mut self) {
        if self.state.phase != GamePhase::Playing {
            return;
        }

        let catalog = Arc::clone(&self.catalog);
        let Some(level) = catalog.level(self.state.level_index) else {
            return;
        };
        for hazard in &mut self.hazards {
            if let Some(config) = level.hazards.get(hazard.index) {
                hazard.advance(config);
            }
        }
        self.touch();
        self.check_hazard_contact();
    }

    /// Collect every uncollected item in reach; returns how many were taken
    fn pickup_check(&mut self) -> usize {
        if self.state.phase != GamePhase::Playing {
            return 0;
        }

        let catalog = Arc::clone(&self.catalog);
        let Some(level) = catalog.level(self.state.level_index) else {
            return 0;
        };

        let mut picked = 0;
        for item in &level.items {
            if self.state.collected.contains(&item.id)
                || !within_reach(self.state.character, item.pos())
            {
                continue;
            }

            self.state.collected.insert(item.id);
            self.state.score += ITEM_SCORE;

            let until_ms = self.now_ms + MESSAGE_MS;
            self.state.message = Some(ActiveMessage {
                item_id: item.id,
                text: item.message.clone(),
                glyph: item.glyph.clone(),
                until_ms,
            });
            self.timers
                .schedule(until_ms, TimerKind::DismissMessage { item_id: item.id });

            let batch = self.particles.spawn_burst(item.pos());
            self.timers.schedule(
                self.now_ms + PARTICLE_TTL_MS,
                TimerKind::ExpireParticles { batch },
            );

            log::debug!("Collected item {} (score {})", item.id, self.state.score);
            self.events.push(GameEvent::ItemCollected {
                item_id: item.id,
                level: self.state.level_index,
            });
            picked += 1;
        }

        if picked > 0 {
            self.touch();
            self.level_completion_check();
        }
        picked
    }

    /// Start the level transition once every item of the level is collected
    fn level_completion_check(&mut self) {
        if self.state.phase != GamePhase::Playing || self.state.collected.is_empty() {
            return;
        }
        let Some(level) = self.catalog.level(self.state.level_index) else {
            return;
        };
        if !level.item_ids().all(|id| self.state.collected.contains(&id)) {
            return;
        }

        let elapsed = self.now_ms.saturating_sub(self.state.level_started_ms);
        let bonus = time_bonus(elapsed);
        self.state.score += bonus;
        self.state.last_time_bonus = bonus;
        self.state.levels_completed += 1;
        self.state.phase = GamePhase::LevelTransition;
        self.timers
            .schedule(self.now_ms + LEVEL_TRANSITION_MS, TimerKind::AdvanceLevel);

        log::info!(
            "Level {} complete in {:.1}s, time bonus {}",
            self.state.level_index + 1,
            elapsed as f64 / 1000.0,
            bonus
        );
        self.events.push(GameEvent::LevelComplete {
            level: self.state.level_index,
            time_bonus: bonus,
        });
        self.touch();
    }

    /// Hit the character if a hazard is in reach; returns whether it was hit
    fn check_hazard_contact(&mut self) -> bool {
        if self.state.phase != GamePhase::Playing || self.state.invincible {
            return false;
        }
        let character = self.state.character;
        if self.hazards.iter().any(|h| within_reach(character, h.pos)) {
            self.on_hit();
            true
        } else {
            false
        }
    }

    fn on_hit(&mut self) {
        self.state.lives = self.state.lives.saturating_sub(1);
        self.events.push(GameEvent::Hit {
            lives_left: self.state.lives,
        });
        self.touch();

        if self.state.lives == 0 {
            self.state.phase = GamePhase::GameOver;
            log::info!(
                "Game over on level {} with score {}",
                self.state.level_index + 1,
                self.state.score
            );
            self.events.push(GameEvent::GameOver {
                score: self.state.score,
            });
            return;
        }

        log::debug!("Hit! {} lives left", self.state.lives);
        self.state.character = spawn_point();
        self.state.invincible = true;
        let until_ms = self.now_ms + INVINCIBILITY_MS;
        self.state.invincible_until_ms = Some(until_ms);
        self.timers.schedule(until_ms, TimerKind::ClearInvincibility);
        self.pickup_check();
    }

    /// Move to the next level, or finish the run after the last one
    fn advance_level(&mut self) {
        if self.state.phase != GamePhase::LevelTransition {
            return;
        }

        let next = self.state.level_index + 1;
        let catalog = Arc::clone(&self.catalog);
        match catalog.level(next) {
            Some(level) => {
                self.state.level_index = next;
                self.state.character = spawn_point();
                self.state.level_started_ms = self.now_ms;
                self.state.phase = GamePhase::Playing;
                self.hazards = spawn_hazards(&level.hazards);
                log::info!("Level {}: {} ({})", next + 1, level.name, level.difficulty.as_str());
                self.events.push(GameEvent::LevelStarted { level: next });
                self.touch();
                self.pickup_check();
                // Item-less levels have nothing to pick up
                self.level_completion_check();
            }
            None => {
                self.state.phase = GamePhase::Victory;
                log::info!("All levels complete! Final score {}", self.state.score);
                self.events.push(GameEvent::Victory {
                    score: self.state.score,
                });
                self.touch();
            }
        }
    }

    /// Timers of the current run still waiting to fire
    pub fn pending_timers(&self) -> usize {
        self.timers.pending()
    }

    /// Deadline of the next pending timer
    pub fn next_timer_due(&mut self) -> Option<u64> {
        self.timers.next_due()
    }

    /// Advance the clock to `now_ms`, firing due timers in order
    pub fn advance_to(&mut self, now_ms: u64) {
        while let Some(fired) = self.timers.pop_due(now_ms) {
            self.now_ms = self.now_ms.max(fired.due_ms);
            self.fire(fired.kind);
        }
        self.now_ms = self.now_ms.max(now_ms);
    }

    /// Advance the clock by `dt_ms`
    pub fn advance_by(&mut self, dt_ms: u64) {
        self.advance_to(self.now_ms + dt_ms);
    }

    fn fire(&mut self, kind: TimerKind) {
        match kind {
            TimerKind::ClearInvincibility => {
                if self.state.invincible {
                    self.state.invincible = false;
                    self.state.invincible_until_ms = None;
                    self.touch();
                    self.check_hazard_contact();
                }
            }
            TimerKind::DismissMessage { item_id } => {
                if self.state.message.as_ref().is_some_and(|m| m.item_id == item_id) {
                    self.state.message = None;
                    self.touch();
                }
            }
            TimerKind::ExpireParticles { batch } => {
                if self.particles.expire(batch) > 0 {
                    self.touch();
                }
            }
            TimerKind::AdvanceLevel => self.advance_level(),
        }
    }

    /// Read-only view for rendering
    pub fn snapshot(&self) -> Snapshot<'_> {
        let state = &self.state;
        let level = self.current_level();
        let level_collected = level.map_or(0, |l| {
            l.item_ids().filter(|id| state.collected.contains(id)).count()
        });

        Snapshot {
            revision: self.revision,
            now_ms: self.now_ms,
            phase: state.phase,
            character: state.character,
            level_index: state.level_index,
            level_count: self.catalog.len(),
            level,
            collected: &state.collected,
            level_collected,
            score: state.score,
            lives: state.lives,
            invincible: state.invincible,
            message: state.message.as_ref(),
            particles: self.particles.particles(),
            hazards: &self.hazards,
            time_bonus: state.last_time_bonus,
            game_over: state.is_game_over(),
            all_levels_complete: state.all_levels_complete(),
            playing: state.is_playing(),
            summary: RunSummary {
                items_collected: state.collected.len(),
                total_items: self.catalog.total_items(),
                levels_completed: state.levels_completed,
                lives_left: state.lives,
                total_hazards: self.catalog.total_hazards(),
            },
        }
    }

    fn touch(&mut self) {
        self.revision += 1;
    }
}
