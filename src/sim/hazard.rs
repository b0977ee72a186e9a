//! Hazard motion model
//!
//! A hazard's position is a pure function of its config and an ever-growing
//! phase angle. The phase advances by the config's speed once per tick and is
//! only reset when a level's hazards are rebuilt.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Motion pattern of a hazard
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MotionPattern {
    /// Sine sweep along x around the anchor
    Horizontal,
    /// Sine sweep along y around the anchor
    Vertical,
    /// Orbit of radius `range` around the anchor
    Circle,
}

/// Immutable hazard definition from the level catalog
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HazardConfig {
    pub id: String,
    pub start_x: f32,
    pub start_y: f32,
    pub pattern: MotionPattern,
    /// Amplitude of the sweep / orbit radius
    pub range: f32,
    /// Phase advance per tick (radians)
    pub speed: f32,
    /// Display glyph
    pub glyph: String,
}

impl HazardConfig {
    /// Anchor point
    #[inline]
    pub fn anchor(&self) -> Vec2 {
        Vec2::new(self.start_x, self.start_y)
    }
}

/// Position of a hazard at phase `theta`
pub fn position_at(config: &HazardConfig, theta: f32) -> Vec2 {
    let anchor = config.anchor();
    match config.pattern {
        MotionPattern::Horizontal => Vec2::new(anchor.x + theta.sin() * config.range, anchor.y),
        MotionPattern::Vertical => Vec2::new(anchor.x, anchor.y + theta.sin() * config.range),
        MotionPattern::Circle => anchor + Vec2::new(theta.cos(), theta.sin()) * config.range,
    }
}

/// Runtime hazard: the level's config index plus its phase
#[derive(Debug, Clone, Serialize)]
pub struct Hazard {
    /// Index into the current level's hazard configs
    pub index: usize,
    pub id: String,
    pub pattern: MotionPattern,
    pub glyph: String,
    /// Phase angle (radians), never wrapped
    pub phase: f32,
    /// Derived position for `phase`
    pub pos: Vec2,
}

impl Hazard {
    pub fn new(index: usize, config: &HazardConfig) -> Self {
        Self {
            index,
            id: config.id.clone(),
            pattern: config.pattern,
            glyph: config.glyph.clone(),
            phase: 0.0,
            pos: position_at(config, 0.0),
        }
    }

    /// Advance one tick and re-derive the position
    pub fn advance(&mut self, config: &HazardConfig) {
        self.phase += config.speed;
        self.pos = position_at(config, self.phase);
    }
}

/// Build fresh hazards (phase 0) for a level's configs
pub fn spawn_hazards(configs: &[HazardConfig]) -> Vec<Hazard> {
    configs
        .iter()
        .enumerate()
        .map(|(index, config)| Hazard::new(index, config))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::f32::consts::{FRAC_PI_2, PI};

    fn config(pattern: MotionPattern) -> HazardConfig {
        HazardConfig {
            id: "v1".into(),
            start_x: 30.0,
            start_y: 50.0,
            pattern,
            range: 20.0,
            speed: 0.3,
            glyph: "x".into(),
        }
    }

    #[test]
    fn test_horizontal_keeps_y() {
        let cfg = config(MotionPattern::Horizontal);
        let pos = position_at(&cfg, FRAC_PI_2);
        assert!((pos.x - 50.0).abs() < 1e-4);
        assert_eq!(pos.y, 50.0);
    }

    #[test]
    fn test_vertical_keeps_x() {
        let cfg = config(MotionPattern::Vertical);
        let pos = position_at(&cfg, -FRAC_PI_2);
        assert_eq!(pos.x, 30.0);
        assert!((pos.y - 30.0).abs() < 1e-4);
    }

    #[test]
    fn test_circle_starts_on_rim() {
        let cfg = config(MotionPattern::Circle);
        let pos = position_at(&cfg, 0.0);
        assert!((pos - Vec2::new(50.0, 50.0)).length() < 1e-4);
        let pos = position_at(&cfg, PI);
        assert!((pos - Vec2::new(10.0, 50.0)).length() < 1e-4);
    }

    #[test]
    fn test_advance_accumulates_phase() {
        let cfg = config(MotionPattern::Horizontal);
        let mut hazard = Hazard::new(0, &cfg);
        assert_eq!(hazard.phase, 0.0);
        assert_eq!(hazard.pos, Vec2::new(30.0, 50.0));

        for _ in 0..10 {
            hazard.advance(&cfg);
        }
        assert!((hazard.phase - 3.0).abs() < 1e-4);
        assert_eq!(hazard.pos, position_at(&cfg, hazard.phase));
    }

    #[test]
    fn test_spawn_hazards_resets_phase() {
        let configs = vec![config(MotionPattern::Circle), config(MotionPattern::Vertical)];
        let hazards = spawn_hazards(&configs);
        assert_eq!(hazards.len(), 2);
        assert!(hazards.iter().all(|h| h.phase == 0.0));
        assert_eq!(hazards[1].index, 1);
    }

    proptest! {
        #[test]
        fn prop_circle_stays_at_range(theta in -1000.0f32..1000.0, range in 0.0f32..50.0) {
            let cfg = HazardConfig { range, ..config(MotionPattern::Circle) };
            let pos = position_at(&cfg, theta);
            prop_assert!((pos.distance(cfg.anchor()) - range).abs() < 1e-3);
        }

        #[test]
        fn prop_sweeps_stay_within_range(theta in -1000.0f32..1000.0) {
            let h = config(MotionPattern::Horizontal);
            let v = config(MotionPattern::Vertical);
            prop_assert!((position_at(&h, theta).x - h.start_x).abs() <= h.range + 1e-3);
            prop_assert!((position_at(&v, theta).y - v.start_y).abs() <= v.range + 1e-3);
        }
    }
}
