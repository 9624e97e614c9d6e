//! Pointer trail particles
//!
//! A fixed-size ring of particles. Spawning always succeeds: once the ring
//! is full the oldest slot is overwritten.

use glam::Vec3;
use rand::Rng;

/// Upward drift of trail particles, units per second
const TRAIL_RISE: f32 = 0.15;
/// Spread of burst particles, units per second
const BURST_SPEED: f32 = 1.2;

#[derive(Debug, Clone, Copy)]
pub struct TrailParticle {
    pub position: Vec3,
    pub velocity: Vec3,
    /// Remaining life in seconds. Inert at or below zero.
    pub life: f32,
    pub max_life: f32,
}

impl Default for TrailParticle {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            velocity: Vec3::ZERO,
            life: 0.0,
            max_life: 1.0,
        }
    }
}

impl TrailParticle {
    pub fn is_alive(&self) -> bool {
        self.life > 0.0
    }

    /// 1.0 when freshly spawned, 0.0 when expired
    pub fn fade(&self) -> f32 {
        if self.max_life <= 0.0 {
            0.0
        } else {
            (self.life / self.max_life).clamp(0.0, 1.0)
        }
    }
}

pub struct TrailPool {
    particles: Vec<TrailParticle>,
    next: usize,
    lifetime: f32,
}

impl TrailPool {
    pub fn new(size: usize, lifetime: f32) -> Self {
        Self {
            particles: vec![TrailParticle::default(); size],
            next: 0,
            lifetime,
        }
    }

    pub fn capacity(&self) -> usize {
        self.particles.len()
    }

    /// Returns the slot that was written, None for an empty pool.
    pub fn spawn(&mut self, position: Vec3) -> Option<usize> {
        self.spawn_with_velocity(position, Vec3::Y * TRAIL_RISE)
    }

    pub fn spawn_with_velocity(&mut self, position: Vec3, velocity: Vec3) -> Option<usize> {
        if self.particles.is_empty() {
            return None;
        }

        let slot = self.next;
        self.particles[slot] = TrailParticle {
            position,
            velocity,
            life: self.lifetime,
            max_life: self.lifetime,
        };
        self.next = (self.next + 1) % self.particles.len();

        Some(slot)
    }

    /// Scatters `count` particles outward from `center`.
    pub fn burst(&mut self, center: Vec3, count: usize, rng: &mut impl Rng) {
        for _ in 0..count {
            let direction = Vec3::new(
                rng.gen_range(-1.0..1.0),
                rng.gen_range(0.2..1.0),
                rng.gen_range(-1.0..1.0),
            )
            .normalize_or_zero();
            let speed = BURST_SPEED * rng.gen_range(0.5..1.0);

            self.spawn_with_velocity(center, direction * speed);
        }
    }

    pub fn update(&mut self, dt: f32) {
        for particle in self.particles.iter_mut().filter(|p| p.is_alive()) {
            particle.life -= dt;
            particle.position += particle.velocity * dt;
        }
    }

    pub fn get(&self, slot: usize) -> Option<&TrailParticle> {
        self.particles.get(slot)
    }

    pub fn live(&self) -> impl Iterator<Item = &TrailParticle> {
        self.particles.iter().filter(|p| p.is_alive())
    }

    pub fn live_count(&self) -> usize {
        self.live().count()
    }
}
