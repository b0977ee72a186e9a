//! Input translation
//!
//! Raw platform input (key names, touch points, on-screen buttons) is reduced
//! to [`MoveIntent`]s: a direction plus an optional step override. The engine
//! never sees where an intent came from.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::settings::Settings;

/// Movement direction on the play-field (y grows downward)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    /// Unit offset in play-field coordinates
    pub fn offset(&self) -> Vec2 {
        match self {
            Direction::Up => Vec2::new(0.0, -1.0),
            Direction::Down => Vec2::new(0.0, 1.0),
            Direction::Left => Vec2::new(-1.0, 0.0),
            Direction::Right => Vec2::new(1.0, 0.0),
        }
    }

    pub fn opposite(&self) -> Direction {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }

    /// The two directions at right angles to this one
    pub fn perpendicular(&self) -> [Direction; 2] {
        match self {
            Direction::Up | Direction::Down => [Direction::Left, Direction::Right],
            Direction::Left | Direction::Right => [Direction::Up, Direction::Down],
        }
    }

    pub fn is_horizontal(&self) -> bool {
        matches!(self, Direction::Left | Direction::Right)
    }

    /// Map a keyboard key name (arrows or WASD)
    pub fn from_key(key: &str) -> Option<Direction> {
        match key {
            "ArrowUp" | "w" | "W" => Some(Direction::Up),
            "ArrowDown" | "s" | "S" => Some(Direction::Down),
            "ArrowLeft" | "a" | "A" => Some(Direction::Left),
            "ArrowRight" | "d" | "D" => Some(Direction::Right),
            _ => None,
        }
    }

    /// Arrow key name for this direction
    pub fn key_name(&self) -> &'static str {
        match self {
            Direction::Up => "ArrowUp",
            Direction::Down => "ArrowDown",
            Direction::Left => "ArrowLeft",
            Direction::Right => "ArrowRight",
        }
    }
}

/// Where a move came from; decides the default step size
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputSource {
    Key,
    Button,
    Swipe,
}

impl InputSource {
    pub fn step(&self, settings: &Settings) -> f32 {
        match self {
            InputSource::Key => settings.key_step,
            InputSource::Button => settings.button_step,
            InputSource::Swipe => settings.swipe_step,
        }
    }
}

/// A single movement request
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MoveIntent {
    pub direction: Direction,
    /// Step override; the key step is used when absent
    pub step: Option<f32>,
}

impl MoveIntent {
    pub fn new(direction: Direction) -> Self {
        Self {
            direction,
            step: None,
        }
    }

    pub fn with_step(direction: Direction, step: f32) -> Self {
        Self {
            direction,
            step: Some(step),
        }
    }

    pub fn from_source(direction: Direction, source: InputSource, settings: &Settings) -> Self {
        Self::with_step(direction, source.step(settings))
    }
}

/// Turns a touch drag into a stream of swipe moves
///
/// Each touch-move is compared with the previous touch point; the dominant axis
/// wins and the anchor moves to the new point whether or not a move fired.
#[derive(Debug, Clone, Default)]
pub struct SwipeTracker {
    anchor: Option<Vec2>,
}

impl SwipeTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn touch_start(&mut self, point: Vec2) {
        self.anchor = Some(point);
    }

    /// Returns the swipe direction for this drag segment, if any
    pub fn touch_move(&mut self, point: Vec2, threshold: f32) -> Option<Direction> {
        let anchor = self.anchor?;
        let delta = point - anchor;
        self.anchor = Some(point);

        if delta.x.abs() > delta.y.abs() {
            if delta.x > threshold {
                Some(Direction::Right)
            } else if delta.x < -threshold {
                Some(Direction::Left)
            } else {
                None
            }
        } else if delta.y > threshold {
            Some(Direction::Down)
        } else if delta.y < -threshold {
            Some(Direction::Up)
        } else {
            None
        }
    }

    pub fn touch_end(&mut self) {
        self.anchor = None;
    }

    pub fn is_tracking(&self) -> bool {
        self.anchor.is_some()
    }
}
