use std::f64::consts::PI;

use crate::body::Body;

/// Newtonian attraction softened by a volume-proportional repulsion once two
/// bodies interpenetrate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ForceModel {
    pub gravity_const: f64,
}

impl ForceModel {
    pub fn new(gravity_const: f64) -> Self {
        Self { gravity_const }
    }

    /// Acceleration magnitude applied to `a` by `b` at separation `dist`.
    ///
    /// Positive values pull `a` toward `b`; negative values push it away.
    pub fn accelerate(&self, a: &Body, b: &Body, dist: f64) -> f64 {
        if a.tag() == b.tag() {
            return 0.0;
        }
        debug_assert!(dist >= 0.0, "negative distance {} between {} and {}", dist, a.tag(), b.tag());
        debug_assert!(
            a.mass > 0.0 && b.mass > 0.0,
            "non-positive mass in pair {} / {}",
            a.tag(),
            b.tag()
        );
        let dist = dist.max(0.0);

        let attraction = self.attraction(a.mass, b.mass, dist);
        let overlap = overlap_volume(a.radius(), b.radius(), dist);
        let correction = (b.density * attraction / a.mass * overlap
            + a.density * attraction / b.mass * overlap)
            / 4.0;

        (attraction - correction) / a.mass
    }

    /// `G·m₁·m₂/d²`, or zero for coincident centers.
    pub fn attraction(&self, m1: f64, m2: f64, dist: f64) -> f64 {
        if dist > 0.0 {
            self.gravity_const * m1 * m2 / (dist * dist)
        } else {
            0.0
        }
    }
}

/// Volume shared by two spheres whose centers are `dist` apart, as the sum of
/// the two spherical caps cut by the radical plane.
///
/// Coincident centers count as full overlap of both spheres.
pub fn overlap_volume(r1: f64, r2: f64, dist: f64) -> f64 {
    let (h1, h2) = if dist > 0.0 {
        let plane = (r1 * r1 - r2 * r2) / (2.0 * dist) + dist / 2.0;
        (r1 - plane, plane - (dist - r2))
    } else {
        (2.0 * r1, 2.0 * r2)
    };
    cap_volume(r1, h1.clamp(0.0, 2.0 * r1)) + cap_volume(r2, h2.clamp(0.0, 2.0 * r2))
}

fn cap_volume(r: f64, h: f64) -> f64 {
    PI * h * h * (r - h / 3.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::body::BodyTag;
    use bevy::math::DVec2;

    const G: f64 = 6.67e-11;

    fn body(tag: usize, mass: f64, density: f64, x: f64) -> Body {
        Body::new(BodyTag(tag), mass, density, DVec2::new(x, 0.0), DVec2::ZERO)
    }

    #[test]
    fn self_pair_is_zero() {
        let model = ForceModel::new(G);
        let a = body(0, 5.97e24, 5520.0, 0.0);
        assert_eq!(model.accelerate(&a, &a, 0.0), 0.0);
        assert_eq!(model.accelerate(&a, &a, 10.0), 0.0);
    }

    #[test]
    fn separated_bodies_feel_pure_newtonian_attraction() {
        let model = ForceModel::new(G);
        let earth = body(0, 5.97e24, 5520.0, 0.0);
        let moon = body(1, 7.35e22, 3340.0, 3.84e8);
        let dist = earth.distance_to(&moon);

        assert_eq!(overlap_volume(earth.radius(), moon.radius(), dist), 0.0);
        let touching = earth.radius() + moon.radius();
        assert_eq!(overlap_volume(earth.radius(), moon.radius(), touching * 1.5), 0.0);

        let expected = G * moon.mass / (dist * dist);
        let actual = model.accelerate(&earth, &moon, dist);
        assert!((actual - expected).abs() <= expected * 1e-12);
    }

    #[test]
    fn coincident_distinct_bodies_give_finite_zero() {
        let model = ForceModel::new(G);
        let a = body(0, 1.0e3, 10.0, 0.0);
        let b = body(1, 1.0e3, 10.0, 0.0);
        let acc = model.accelerate(&a, &b, 0.0);
        assert!(acc.is_finite());
        assert_eq!(acc, 0.0);
    }

    #[test]
    fn deep_overlap_turns_attraction_into_repulsion() {
        let model = ForceModel::new(1.0);
        let a = body(0, 1.0e3, 10.0, 0.0);
        let b = body(1, 1.0e3, 10.0, 0.0);
        let r = a.radius();

        for fraction in [0.5, 0.1, 0.01, 1e-4] {
            let acc = model.accelerate(&a, &b, r * fraction);
            assert!(acc.is_finite());
            assert!(acc < 0.0, "expected repulsion at {}r, got {}", fraction, acc);
        }
    }

    #[test]
    fn shallow_overlap_weakens_attraction() {
        let model = ForceModel::new(1.0);
        let a = body(0, 1.0e3, 10.0, 0.0);
        let b = body(1, 1.0e3, 10.0, 0.0);
        let dist = a.radius() * 1.9;

        let newtonian = model.attraction(a.mass, b.mass, dist) / a.mass;
        let actual = model.accelerate(&a, &b, dist);
        assert!(actual > 0.0);
        assert!(actual < newtonian);
    }

    #[test]
    fn overlap_of_equal_spheres_matches_lens_formula() {
        let r = 2.0;
        let d = 1.0;
        // lens volume for equal spheres: π (4r + d)(2r - d)² / 12
        let expected = PI * (4.0 * r + d) * (2.0 * r - d).powi(2) / 12.0;
        assert!((overlap_volume(r, r, d) - expected).abs() < 1e-9);
    }

    #[test]
    fn contained_sphere_overlaps_with_its_full_volume() {
        let small = 1.0;
        let big = 10.0;
        let volume = overlap_volume(big, small, 2.0);
        let full = 4.0 / 3.0 * PI * small.powi(3);
        assert!((volume - full).abs() < 1e-9);
    }

    #[test]
    fn zero_distance_counts_both_spheres_fully() {
        let full = |r: f64| 4.0 / 3.0 * PI * r.powi(3);
        assert!((overlap_volume(1.0, 2.0, 0.0) - (full(1.0) + full(2.0))).abs() < 1e-9);
    }

    #[test]
    fn force_is_directional_per_mass() {
        let model = ForceModel::new(G);
        let heavy = body(0, 1.0e6, 1.0, 0.0);
        let light = body(1, 1.0, 1.0, 1.0e4);
        let dist = heavy.distance_to(&light);
        let on_light = model.accelerate(&light, &heavy, dist);
        let on_heavy = model.accelerate(&heavy, &light, dist);
        assert!((on_light / on_heavy - 1.0e6).abs() < 1e-3);
    }

    #[cfg(debug_assertions)]
    #[test]
    #[should_panic(expected = "negative distance")]
    fn negative_distance_is_fatal_in_debug_builds() {
        let model = ForceModel::new(G);
        let a = body(0, 1.0, 1.0, 0.0);
        let b = body(1, 1.0, 1.0, 1.0);
        model.accelerate(&a, &b, -1.0);
    }
}
