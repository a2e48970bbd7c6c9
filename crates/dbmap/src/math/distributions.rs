use std::ops::Deref;

use super::vec::Vec3;

/// Samples are expected to be in [0;1(^N
pub struct Samples<const N: usize>(pub [f64; N]);

impl<const N: usize> Deref for Samples<N> {
    type Target = [f64; N];

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

pub trait Samplable<T, const N: usize> {
    fn sample_with(&self, samples: Samples<N>) -> T;
}

/// `count` near-uniform directions over the unit sphere, laid out on a Fibonacci lattice.
///
/// Point `i` sits at height $y = \frac{2i + 1}{N} - 1$ and azimuth
/// $((i + \phi) \bmod N) \cdot \pi (3 - \sqrt 5)$, where $\phi \in [0, N[$ is a phase that
/// rotates the whole lattice.
#[derive(Debug, Clone, Copy)]
pub struct FibonacciSphere {
    pub count: usize,
}

impl FibonacciSphere {
    pub fn new(count: usize) -> Self {
        Self { count }
    }

    pub fn golden_angle() -> f64 {
        std::f64::consts::PI * (3.0 - f64::sqrt(5.0))
    }

    /// The `i`-th lattice direction for a given phase
    pub fn direction(&self, i: usize, phase: f64) -> Vec3 {
        let n = self.count as f64;
        let y = (2.0 * i as f64 + 1.0) / n - 1.0;
        let r = f64::sqrt(f64::max(0.0, 1.0 - y * y));
        let azimuth = ((i as f64 + phase) % n) * Self::golden_angle();
        let (s, c) = f64::sin_cos(azimuth);

        // y² + r² == 1 so this never degenerates
        Vec3::new(c * r, y, s * r).normalize()
    }
}

impl Samplable<Vec<Vec3>, 1> for FibonacciSphere {
    /// `samples[0]` is mapped to the lattice phase in [0, count[
    fn sample_with(&self, samples: Samples<1>) -> Vec<Vec3> {
        let phase = samples[0] * self.count as f64;
        (0..self.count).map(|i| self.direction(i, phase)).collect()
    }
}
