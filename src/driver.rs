//! Game loop driver
//!
//! Owns the engine and the two repeating timers that feed it: the 50 ms
//! simulation tick (armed only while the engine is `Playing`) and the repeat
//! timer of a held on-screen button. Frame updates walk simulated time one
//! deadline at a time, so engine timers, ticks and button repeats fire in the
//! order they are due no matter how coarse the frames are.

use glam::Vec2;

use crate::consts::TICK_MS;
use crate::error::ConfigError;
use crate::input::{Direction, InputSource, MoveIntent, SwipeTracker};
use crate::settings::Settings;
use crate::sim::{Engine, GameEvent, GamePhase, Snapshot};

/// Platform input after key/touch/button wiring
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    /// Leave the title screen
    Start,
    /// Start a fresh run
    Restart,
    /// Key press by key name
    Key(String),
    TouchStart(Vec2),
    TouchMove(Vec2),
    TouchEnd,
    /// On-screen direction button pressed and held
    ButtonPress(Direction),
    ButtonRelease,
    PointerLeave,
}

#[derive(Debug, Clone, Copy)]
struct HeldButton {
    direction: Direction,
    next_due_ms: u64,
}

/// Fixed-cadence driver around an [`Engine`]
#[derive(Debug, Clone)]
pub struct GameLoop {
    engine: Engine,
    settings: Settings,
    swipe: SwipeTracker,
    /// Next simulation tick, `None` while not playing
    tick_due_ms: Option<u64>,
    held: Option<HeldButton>,
    last_revision: u64,
}

impl GameLoop {
    /// Wrap `engine`; rejects settings that would stall the loop
    pub fn new(engine: Engine, settings: Settings) -> Result<Self, ConfigError> {
        settings.validate()?;
        let last_revision = engine.revision();
        Ok(Self {
            engine,
            settings,
            swipe: SwipeTracker::new(),
            tick_due_ms: None,
            held: None,
            last_revision,
        })
    }

    pub fn engine(&self) -> &Engine {
        &self.engine
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn snapshot(&self) -> Snapshot<'_> {
        self.engine.snapshot()
    }

    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        self.engine.drain_events()
    }

    pub fn tick_timer_active(&self) -> bool {
        self.tick_due_ms.is_some()
    }

    pub fn button_held(&self) -> Option<Direction> {
        self.held.map(|h| h.direction)
    }

    /// Apply one input event; returns whether the snapshot changed
    pub fn handle(&mut self, event: InputEvent) -> bool {
        let now = self.engine.now_ms();
        match event {
            InputEvent::Start => {
                self.engine.start();
            }
            InputEvent::Restart => {
                self.held = None;
                self.tick_due_ms = None;
                self.engine.restart();
            }
            InputEvent::Key(key) => {
                if let Some(direction) = Direction::from_key(&key) {
                    self.move_from(direction, InputSource::Key);
                }
            }
            InputEvent::TouchStart(point) => self.swipe.touch_start(point),
            InputEvent::TouchMove(point) => {
                if let Some(direction) = self.swipe.touch_move(point, self.settings.swipe_threshold)
                {
                    self.move_from(direction, InputSource::Swipe);
                }
            }
            InputEvent::TouchEnd => self.swipe.touch_end(),
            InputEvent::ButtonPress(direction) => {
                self.held = Some(HeldButton {
                    direction,
                    next_due_ms: now + self.settings.button_repeat_ms,
                });
            }
            InputEvent::ButtonRelease | InputEvent::PointerLeave => {
                self.held = None;
            }
        }
        self.sync_tick_timer();
        self.take_changed()
    }

    /// Advance simulated time by `dt_ms`; returns whether the snapshot changed
    pub fn update(&mut self, dt_ms: u64) -> bool {
        let dt_ms = dt_ms.min(self.settings.max_frame_ms);
        let target = self.engine.now_ms() + dt_ms;

        loop {
            self.sync_tick_timer();

            let next = [
                self.engine.next_timer_due(),
                self.tick_due_ms,
                self.held.map(|h| h.next_due_ms),
            ]
            .into_iter()
            .flatten()
            .filter(|&due| due <= target)
            .min();
            let Some(next) = next else {
                break;
            };

            // Engine timers due at `next` fire first
            self.engine.advance_to(next);

            if self.tick_due_ms == Some(next) {
                self.tick_due_ms = Some(next + TICK_MS);
                self.engine.tick();
            }

            if let Some(held) = self.held.as_mut().filter(|h| h.next_due_ms == next) {
                held.next_due_ms = next + self.settings.button_repeat_ms;
                let direction = held.direction;
                self.move_from(direction, InputSource::Button);
            }
        }

        self.engine.advance_to(target);
        self.sync_tick_timer();
        self.take_changed()
    }

    fn move_from(&mut self, direction: Direction, source: InputSource) -> bool {
        let intent = MoveIntent::from_source(direction, source, &self.settings);
        self.engine.move_character(intent)
    }

    /// Arm the tick timer while playing, tear it down otherwise
    fn sync_tick_timer(&mut self) {
        if self.engine.phase() == GamePhase::Playing {
            if self.tick_due_ms.is_none() {
                self.tick_due_ms = Some(self.engine.now_ms() + TICK_MS);
                log::debug!("Tick timer armed at {}ms", self.engine.now_ms());
            }
        } else if self.tick_due_ms.take().is_some() {
            log::debug!(
                "Tick timer stopped at {}ms ({:?})",
                self.engine.now_ms(),
                self.engine.phase()
            );
        }
    }

    fn take_changed(&mut self) -> bool {
        let revision = self.engine.revision();
        let changed = revision != self.last_revision;
        self.last_revision = revision;
        changed
    }
}
