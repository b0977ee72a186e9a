//! Pickup burst particles
//!
//! Purely cosmetic: a burst is a ring of particles at the pickup point. The
//! emission angle is for the renderer; the simulation only tracks lifetime.

use glam::Vec2;
use serde::Serialize;

use crate::consts::PARTICLE_BATCH;

/// A particle for the pickup burst
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Particle {
    pub id: u64,
    /// Burst this particle belongs to
    pub batch: u64,
    pub pos: Vec2,
    /// Emission angle (radians)
    pub angle: f32,
}

/// Live particle set
#[derive(Debug, Clone, Default)]
pub struct ParticleSystem {
    particles: Vec<Particle>,
    next_batch: u64,
    next_id: u64,
}

impl ParticleSystem {
    pub fn new() -> Self {
        Self::default()
    }

    /// Spawn one burst at `pos`, returning its batch id
    pub fn spawn_burst(&mut self, pos: Vec2) -> u64 {
        let batch = self.next_batch;
        self.next_batch += 1;

        for i in 0..PARTICLE_BATCH {
            let angle = std::f32::consts::TAU * i as f32 / PARTICLE_BATCH as f32;
            self.particles.push(Particle {
                id: self.next_id,
                batch,
                pos,
                angle,
            });
            self.next_id += 1;
        }
        batch
    }

    /// Remove every particle of `batch`, returning how many were removed
    pub fn expire(&mut self, batch: u64) -> usize {
        let before = self.particles.len();
        self.particles.retain(|p| p.batch != batch);
        before - self.particles.len()
    }

    /// Drop everything (run restart)
    pub fn clear(&mut self) {
        self.particles.clear();
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::{PI, TAU};

    #[test]
    fn test_burst_is_evenly_spaced_ring() {
        let mut system = ParticleSystem::new();
        let batch = system.spawn_burst(Vec2::new(20.0, 30.0));

        assert_eq!(system.len(), PARTICLE_BATCH);
        for (i, p) in system.particles().iter().enumerate() {
            assert_eq!(p.batch, batch);
            assert_eq!(p.pos, Vec2::new(20.0, 30.0));
            assert!((p.angle - TAU * i as f32 / 20.0).abs() < 1e-6);
        }
        assert!((system.particles()[10].angle - PI).abs() < 1e-6);
    }

    #[test]
    fn test_expire_only_touches_its_batch() {
        let mut system = ParticleSystem::new();
        let first = system.spawn_burst(Vec2::new(10.0, 10.0));
        let second = system.spawn_burst(Vec2::new(90.0, 90.0));
        assert_ne!(first, second);
        assert_eq!(system.len(), 2 * PARTICLE_BATCH);

        assert_eq!(system.expire(first), PARTICLE_BATCH);
        assert_eq!(system.len(), PARTICLE_BATCH);
        assert!(system.particles().iter().all(|p| p.batch == second));

        // Expiring twice is harmless
        assert_eq!(system.expire(first), 0);
    }

    #[test]
    fn test_particle_ids_are_unique() {
        let mut system = ParticleSystem::new();
        system.spawn_burst(Vec2::ZERO);
        system.spawn_burst(Vec2::ZERO);
        let mut ids: Vec<_> = system.particles().iter().map(|p| p.id).collect();
        ids.dedup();
        assert_eq!(ids.len(), 2 * PARTICLE_BATCH);
    }
}
