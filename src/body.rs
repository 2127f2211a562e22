use std::f64::consts::PI;
use std::fmt;

use bevy::math::DVec2;

use crate::vector::Vector;

/// Stable identity of a body; equal to its index in the simulation arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BodyTag(pub usize);

impl fmt::Display for BodyTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A point mass modeled as a uniform sphere for overlap purposes.
#[derive(Debug, Clone, PartialEq)]
pub struct Body {
    tag: BodyTag,
    pub mass: f64,
    pub density: f64,
    pub position: DVec2,
    /// Stored as configured; the integrator applies it with the axes swapped
    /// and inverted (see [`Body::world_velocity`]).
    pub velocity: Vector,
    radius: f64,
}

impl Body {
    /// Creates a body; `velocity` is `(dx, dy)` exactly as configured.
    pub fn new(tag: BodyTag, mass: f64, density: f64, position: DVec2, velocity: DVec2) -> Self {
        Self {
            tag,
            mass,
            density,
            position,
            velocity: Vector::new(velocity.x, velocity.y),
            radius: sphere_radius(mass, density),
        }
    }

    pub fn tag(&self) -> BodyTag {
        self.tag
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }

    pub fn refresh_radius(&mut self) {
        self.radius = sphere_radius(self.mass, self.density);
    }

    /// Rate at which `position` changes per unit of simulated time.
    ///
    /// The integrator moves a body against its stored velocity with the axes
    /// swapped, so this is `(-v.y, -v.x)`.
    pub fn world_velocity(&self) -> DVec2 {
        DVec2::new(-self.velocity.y(), -self.velocity.x())
    }

    pub fn distance_to(&self, other: &Body) -> f64 {
        self.position.distance(other.position)
    }

    /// True when `point` lies within this body's radius of its center.
    pub fn contains(&self, point: DVec2) -> bool {
        self.position.distance(point) <= self.radius
    }
}

/// `((mass / density) · 0.75 · π)^(1/3)`
pub fn sphere_radius(mass: f64, density: f64) -> f64 {
    ((mass / density) * 0.75 * PI).cbrt()
}
