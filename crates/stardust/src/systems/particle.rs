//! A single particle of the field.

use glam::DVec2;

use crate::renderer::color::Rgba;

/// A particle with spring-damper physics and rendering state.
///
/// `origin`, `target` and `size` are fixed for the particle's lifetime;
/// the whole population is rebuilt instead of editing them.
#[derive(Debug, Clone, PartialEq)]
pub struct Particle {
    pub position: DVec2,
    pub velocity: DVec2,
    /// Resting attractor while the letter is idle.
    pub origin: DVec2,
    /// Glyph-derived attractor for the veil.
    pub target: DVec2,
    pub size: f64,
    pub friction: f64,
    pub stiffness: f64,
    pub color: Rgba,
}

impl Particle {
    pub const DEFAULT_FRICTION: f64 = 0.95;
    pub const DEFAULT_STIFFNESS: f64 = 0.03;

    pub fn new(position: DVec2, origin: DVec2, target: DVec2, size: f64, color: Rgba) -> Self {
        Particle {
            position,
            velocity: DVec2::ZERO,
            origin,
            target,
            size,
            friction: Self::DEFAULT_FRICTION,
            stiffness: Self::DEFAULT_STIFFNESS,
            color,
        }
    }

    pub fn with_physics(mut self, stiffness: f64, friction: f64) -> Self {
        self.stiffness = stiffness;
        self.friction = friction;
        self
    }

    /// One spring-damper step toward `attractor`, applied per axis:
    /// `v = (v + (attractor - p) * stiffness) * friction; p += v`.
    pub fn integrate(&mut self, attractor: DVec2) {
        let acceleration = (attractor - self.position) * self.stiffness;
        self.velocity = (self.velocity + acceleration) * self.friction;
        self.position += self.velocity;
    }

    /// Sinusoidal drift phased by the particle's own origin, so neighbours
    /// never move in lockstep and nothing settles completely.
    pub fn drift(&mut self, elapsed_ms: f64, rate: f64, amplitude: f64) {
        let phase = elapsed_ms * rate;
        self.position.x += (phase + self.origin.x).sin() * amplitude;
        self.position.y += (phase + self.origin.y).cos() * amplitude;
    }
}
