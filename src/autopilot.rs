//! Idle/demo mode player
//!
//! Picks one direction per call: get away from a nearby hazard if there is
//! one, otherwise walk toward the nearest uncollected item along the axis
//! with the larger gap. When an obstacle is in the way it sidesteps in a
//! seeded random perpendicular direction for a few moves.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use crate::consts::KEY_STEP;
use crate::input::{Direction, MoveIntent};
use crate::settings::Settings;
use crate::sim::{Engine, GamePhase};

/// Hazards closer than this make the autopilot back off
const DANGER_RADIUS: f32 = 10.0;
/// Moves spent on a sidestep once committed
const DETOUR_MOVES: u32 = 6;

#[derive(Debug, Clone)]
pub struct Autopilot {
    rng: Pcg32,
    detour: Option<(Direction, u32)>,
    step: f32,
}

impl Autopilot {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Pcg32::seed_from_u64(seed),
            detour: None,
            step: KEY_STEP,
        }
    }

    /// Seeded from the settings, stepping like a key press
    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            step: settings.key_step,
            ..Self::new(settings.autopilot_seed)
        }
    }

    /// Direction for the next step, `None` when there is nothing to do
    pub fn next_direction(&mut self, engine: &Engine) -> Option<Direction> {
        if engine.phase() != GamePhase::Playing {
            self.detour = None;
            return None;
        }
        let pos = engine.state().character;

        if !engine.state().invincible
            && let Some(threat) = nearest_hazard(engine, pos)
        {
            let away = dominant_direction(pos - threat)?;
            let [a, b] = away.perpendicular();
            return self.first_open(engine, &[away, a, b]);
        }

        if let Some((direction, left)) = self.detour {
            if left > 0 && self.can_move(engine, direction) {
                self.detour = Some((direction, left - 1));
                return Some(direction);
            }
            self.detour = None;
        }

        let target = nearest_item(engine, pos)?;
        let delta = target - pos;
        let primary = dominant_direction(delta)?;
        if self.can_move(engine, primary) {
            return Some(primary);
        }

        // Other axis, if it still closes the gap
        let secondary = if primary.is_horizontal() {
            axis_direction(delta.y, Direction::Up, Direction::Down)
        } else {
            axis_direction(delta.x, Direction::Left, Direction::Right)
        };
        if let Some(secondary) = secondary.filter(|d| self.can_move(engine, *d)) {
            return Some(secondary);
        }

        let [a, b] = primary.perpendicular();
        let (first, second) = if self.rng.random_bool(0.5) {
            (a, b)
        } else {
            (b, a)
        };
        let sidestep = self.first_open(engine, &[first, second, primary.opposite()])?;
        log::debug!("Autopilot blocked going {:?}, detouring {:?}", primary, sidestep);
        self.detour = Some((sidestep, DETOUR_MOVES));
        Some(sidestep)
    }

    fn can_move(&self, engine: &Engine, direction: Direction) -> bool {
        let intent = MoveIntent::with_step(direction, self.step);
        engine.candidate(intent) != engine.state().character && !engine.is_blocked(intent)
    }

    fn first_open(&self, engine: &Engine, options: &[Direction]) -> Option<Direction> {
        options.iter().copied().find(|d| self.can_move(engine, *d))
    }
}

fn nearest_item(engine: &Engine, pos: Vec2) -> Option<Vec2> {
    let collected = &engine.state().collected;
    engine
        .current_level()?
        .items
        .iter()
        .filter(|item| !collected.contains(&item.id))
        .map(|item| item.pos())
        .min_by(|a, b| {
            a.distance(pos)
                .partial_cmp(&b.distance(pos))
                .unwrap_or(std::cmp::Ordering::Equal)
        })
}

fn nearest_hazard(engine: &Engine, pos: Vec2) -> Option<Vec2> {
    engine
        .hazards()
        .iter()
        .map(|h| h.pos)
        .filter(|p| p.distance(pos) < DANGER_RADIUS)
        .min_by(|a, b| {
            a.distance(pos)
                .partial_cmp(&b.distance(pos))
                .unwrap_or(std::cmp::Ordering::Equal)
        })
}

fn axis_direction(delta: f32, negative: Direction, positive: Direction) -> Option<Direction> {
    if delta > 0.0 {
        Some(positive)
    } else if delta < 0.0 {
        Some(negative)
    } else {
        None
    }
}

fn dominant_direction(delta: Vec2) -> Option<Direction> {
    if delta.x.abs() >= delta.y.abs() {
        axis_direction(delta.x, Direction::Left, Direction::Right)
            .or_else(|| axis_direction(delta.y, Direction::Up, Direction::Down))
    } else {
        axis_direction(delta.y, Direction::Up, Direction::Down)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::catalog::Catalog;

    fn calm_engine() -> Engine {
        let mut levels = Catalog::builtin().unwrap().levels().to_vec();
        for level in &mut levels {
            level.hazards.clear();
        }
        let mut engine = Engine::new(Arc::new(Catalog::from_levels(levels).unwrap()));
        engine.start();
        engine
    }

    #[test]
    fn test_dominant_direction() {
        assert_eq!(dominant_direction(Vec2::new(-30.0, -20.0)), Some(Direction::Left));
        assert_eq!(dominant_direction(Vec2::new(3.0, 9.0)), Some(Direction::Down));
        assert_eq!(dominant_direction(Vec2::new(0.0, -1.0)), Some(Direction::Up));
        assert_eq!(dominant_direction(Vec2::ZERO), None);
    }

    #[test]
    fn test_idle_outside_play() {
        let catalog = Arc::new(Catalog::builtin().unwrap());
        let engine = Engine::new(catalog);
        let mut pilot = Autopilot::new(1);
        assert_eq!(pilot.next_direction(&engine), None);
    }

    #[test]
    fn test_heads_for_nearest_item() {
        // From the spawn point, item 1 at (20,30) is closest
        let engine = calm_engine();
        let mut pilot = Autopilot::new(1);
        assert_eq!(pilot.next_direction(&engine), Some(Direction::Left));
    }

    #[test]
    fn test_clears_first_level() {
        let mut engine = calm_engine();
        let mut pilot = Autopilot::new(7);
        for _ in 0..3_000 {
            let Some(direction) = pilot.next_direction(&engine) else {
                break;
            };
            engine.move_character(MoveIntent::new(direction));
        }
        assert_eq!(engine.phase(), GamePhase::LevelTransition);
        assert_eq!(engine.state().collected.len(), 4);
    }

    #[test]
    fn test_backs_off_from_hazard() {
        let catalog = Arc::new(Catalog::builtin().unwrap());
        let mut engine = Engine::new(catalog);
        engine.start();
        // Level 1 hazard rests at (30,50); step toward it without touching
        for _ in 0..5 {
            engine.move_character(MoveIntent::new(Direction::Left));
        }
        assert_eq!(engine.state().character, Vec2::new(37.5, 50.0));

        let mut pilot = Autopilot::new(3);
        assert_eq!(pilot.next_direction(&engine), Some(Direction::Right));
    }
}
