//! Collision detection for the play-field
//!
//! Everything here is pure: point distances for proximity checks and a
//! closed-interval overlap test between the character's square footprint and
//! an axis-aligned obstacle rectangle.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::{CHARACTER_SIZE, INTERACTION_RADIUS};

/// Axis-aligned rectangle in play-field percent units
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Right edge
    #[inline]
    pub fn max_x(&self) -> f32 {
        self.x + self.width
    }

    /// Bottom edge
    #[inline]
    pub fn max_y(&self) -> f32 {
        self.y + self.height
    }
}

/// Euclidean distance between two points
#[inline]
pub fn distance(a: Vec2, b: Vec2) -> f32 {
    a.distance(b)
}

/// Check if a square footprint anchored at `point` (edge = `size`) overlaps `rect`
///
/// Edges that merely touch do not count as overlap.
#[inline]
pub fn rect_overlap(point: Vec2, size: f32, rect: &Rect) -> bool {
    point.x < rect.max_x()
        && point.x + size > rect.x
        && point.y < rect.max_y()
        && point.y + size > rect.y
}

/// Check the character footprint against every obstacle
pub fn footprint_blocked(point: Vec2, obstacles: &[Rect]) -> bool {
    obstacles
        .iter()
        .any(|obs| rect_overlap(point, CHARACTER_SIZE, obs))
}

/// Proximity test shared by item pickup and hazard contact
#[inline]
pub fn within_reach(a: Vec2, b: Vec2) -> bool {
    distance(a, b) < INTERACTION_RADIUS
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_distance() {
        assert!((distance(Vec2::new(0.0, 0.0), Vec2::new(3.0, 4.0)) - 5.0).abs() < 1e-6);
        assert_eq!(distance(Vec2::new(7.0, 7.0), Vec2::new(7.0, 7.0)), 0.0);
    }

    #[test]
    fn test_rect_overlap_inside_and_outside() {
        let rect = Rect::new(40.0, 40.0, 8.0, 8.0);

        // Footprint fully inside
        assert!(rect_overlap(Vec2::new(42.0, 42.0), 4.0, &rect));
        // Footprint hanging over the left edge
        assert!(rect_overlap(Vec2::new(37.0, 42.0), 4.0, &rect));
        // Far away
        assert!(!rect_overlap(Vec2::new(10.0, 10.0), 4.0, &rect));
    }

    #[test]
    fn test_rect_overlap_touching_edges_do_not_collide() {
        let rect = Rect::new(40.0, 40.0, 8.0, 8.0);

        // Footprint right edge exactly on obstacle left edge
        assert!(!rect_overlap(Vec2::new(36.0, 42.0), 4.0, &rect));
        // Footprint left edge exactly on obstacle right edge
        assert!(!rect_overlap(Vec2::new(48.0, 42.0), 4.0, &rect));
        // Footprint bottom edge on obstacle top edge
        assert!(!rect_overlap(Vec2::new(42.0, 36.0), 4.0, &rect));
    }

    #[test]
    fn test_within_reach_is_strict() {
        let origin = Vec2::new(50.0, 50.0);
        assert!(within_reach(origin, Vec2::new(55.9, 50.0)));
        assert!(!within_reach(origin, Vec2::new(56.0, 50.0)));
    }

    #[test]
    fn test_footprint_blocked_any() {
        let obstacles = [Rect::new(10.0, 10.0, 5.0, 5.0), Rect::new(60.0, 30.0, 10.0, 6.0)];
        assert!(footprint_blocked(Vec2::new(58.0, 31.0), &obstacles));
        assert!(!footprint_blocked(Vec2::new(50.0, 50.0), &obstacles));
        assert!(!footprint_blocked(Vec2::new(50.0, 50.0), &[]));
    }

    proptest! {
        #[test]
        fn prop_overlap_matches_interval_intersection(
            px in 0.0f32..100.0, py in 0.0f32..100.0,
            rx in 0.0f32..90.0, ry in 0.0f32..90.0,
            rw in 0.5f32..10.0, rh in 0.5f32..10.0,
        ) {
            let rect = Rect::new(rx, ry, rw, rh);
            let x_overlap = px < rx + rw && rx < px + CHARACTER_SIZE;
            let y_overlap = py < ry + rh && ry < py + CHARACTER_SIZE;
            prop_assert_eq!(rect_overlap(Vec2::new(px, py), CHARACTER_SIZE, &rect), x_overlap && y_overlap);
        }

        #[test]
        fn prop_distance_is_symmetric(
            ax in 0.0f32..100.0, ay in 0.0f32..100.0,
            bx in 0.0f32..100.0, by in 0.0f32..100.0,
        ) {
            let a = Vec2::new(ax, ay);
            let b = Vec2::new(bx, by);
            prop_assert!((distance(a, b) - distance(b, a)).abs() < 1e-4);
            prop_assert!(distance(a, b) >= 0.0);
        }
    }
}
