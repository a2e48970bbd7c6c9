//! Directions for emitted and reflected rays.

use rand::{distributions::Uniform, prelude::Distribution, Rng};

use crate::{
    math::{
        distributions::{FibonacciSphere, Samplable, Samples},
        vec::{Vec3, Vec3SameSideExt},
    },
    ray::Ray,
};

/// Spreads `count` rays over a sphere, or over the half of it selected by a normal and a side.
///
/// Directions come from a [FibonacciSphere] whose phase is drawn from the rng on every call, so
/// two calls from the same point do not produce the same rays.
#[derive(Debug, Clone, Copy)]
pub struct HemisphereSampler {
    pub count: usize,
}

impl HemisphereSampler {
    pub fn new(count: usize) -> Self {
        Self { count }
    }

    fn directions<R: Rng + ?Sized>(&self, rng: &mut R) -> Vec<Vec3> {
        let phase = Uniform::new(0.0, 1.0).sample(rng);
        FibonacciSphere::new(self.count).sample_with(Samples([phase]))
    }

    /// Rays on the side of `normal` given by the sign of `valid_side`.
    ///
    /// A direction `d` is flipped when `sign(normal . d) != sign(valid_side)`.
    pub fn hemisphere<R: Rng + ?Sized>(
        &self,
        origin: Vec3,
        normal: Vec3,
        valid_side: f64,
        distance: f64,
        level: f64,
        rng: &mut R,
    ) -> Vec<Ray> {
        self.directions(rng)
            .into_iter()
            .map(|d| Ray::new(origin, d.same_side(normal, valid_side), distance, level))
            .collect()
    }

    /// Rays over the whole sphere
    pub fn sphere<R: Rng + ?Sized>(
        &self,
        origin: Vec3,
        distance: f64,
        level: f64,
        rng: &mut R,
    ) -> Vec<Ray> {
        self.directions(rng)
            .into_iter()
            .map(|d| Ray::new(origin, d, distance, level))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;

    use super::*;

    #[test]
    fn samples_stay_on_the_valid_side() {
        let sampler = HemisphereSampler::new(100);
        let mut rng = crate::Rng::seed_from_u64(3);
        let normal = Vec3::new(1.0, 2.0, -0.5).normalize();

        for side in [1.0, -0.3] {
            for _ in 0..20 {
                let rays = sampler.hemisphere(Vec3::ONE, normal, side, 2.0, 80.0, &mut rng);
                assert_eq!(rays.len(), 100);
                for ray in &rays {
                    let dot = normal.dot(ray.direction);
                    assert!(dot != 0.0);
                    assert_eq!(dot.signum(), side.signum());
                    assert!((ray.direction.length() - 1.0).abs() < 1e-12);
                    assert_eq!(ray.origin, Vec3::ONE);
                    assert_eq!(ray.distance, 2.0);
                    assert_eq!(ray.level, 80.0);
                }
            }
        }
    }

    #[test]
    fn calls_differ() {
        let sampler = HemisphereSampler::new(10);
        let mut rng = crate::Rng::seed_from_u64(11);
        let a = sampler.sphere(Vec3::ZERO, 0.0, 120.0, &mut rng);
        let b = sampler.sphere(Vec3::ZERO, 0.0, 120.0, &mut rng);
        assert!(a.iter().zip(&b).any(|(a, b)| a.direction != b.direction));
    }

    #[test]
    fn sphere_covers_both_sides() {
        let sampler = HemisphereSampler::new(100);
        let mut rng = crate::Rng::seed_from_u64(5);
        let rays = sampler.sphere(Vec3::ZERO, 0.0, 120.0, &mut rng);
        assert!(rays.iter().any(|r| r.direction.z > 0.5));
        assert!(rays.iter().any(|r| r.direction.z < -0.5));
    }

    #[test]
    fn empty() {
        let sampler = HemisphereSampler::new(0);
        let mut rng = crate::Rng::seed_from_u64(0);
        assert!(sampler.sphere(Vec3::ZERO, 0.0, 120.0, &mut rng).is_empty());
    }
}
