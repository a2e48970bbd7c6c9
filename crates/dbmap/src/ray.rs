use std::ops::RangeInclusive;

use crate::math::vec::Vec3;

/// Rays do not intersect anything closer than this, which keeps a reflected ray from hitting
/// the face it starts on.
pub const RAY_EPSILON: f64 = 1e-7;

/// A sound ray: where it starts, where it goes, how far it already travelled from the source and
/// how loud it is at its origin.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    pub origin: Vec3,
    pub direction: Vec3,
    /// Distance travelled from the source up to `origin`
    pub distance: f64,
    /// Sound level at `origin`, in dB
    pub level: f64,
}

impl Ray {
    /// `direction` is normalized
    pub fn new(origin: Vec3, direction: Vec3, distance: f64, level: f64) -> Self {
        Self {
            origin,
            direction: direction.normalize(),
            distance,
            level,
        }
    }

    pub fn with_level(self, level: f64) -> Self {
        Self { level, ..self }
    }

    pub fn range(&self) -> RangeInclusive<f64> {
        RAY_EPSILON..=f64::INFINITY
    }

    pub fn at(&self, t: f64) -> Vec3 {
        if !self.range().contains(&t) {
            crate::utils::log_once::error_once!("a ray has been accessed out of bounds");
        }

        self.at_unchecked(t)
    }
    pub fn at_unchecked(&self, t: f64) -> Vec3 {
        self.origin + t * self.direction
    }
}

#[cfg(test)]
mod tests {
    use crate::math::vec::Vec3;

    use super::Ray;

    #[test]
    fn ray() {
        let eps = 1e-9;
        let ray = Ray::new(Vec3::new(1., 0., 0.), Vec3::new(-1., 1., 0.), 0.0, 120.0);

        assert!((ray.direction.length() - 1.0).abs() < eps);
        assert!(ray.at(1.0).distance_squared(ray.origin + ray.direction) < eps);
        assert_eq!(ray.with_level(3.0).level, 3.0);
    }
}
