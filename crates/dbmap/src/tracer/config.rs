use crate::{
    error::{DomainError, Result},
    material::Band,
    math::vec::Vec3,
    reflection::{BrdfReflector, EnergyModel},
};

/// How the primary rays leave the source
#[derive(Debug, Clone, PartialEq)]
pub enum Emission {
    /// `count` directions spread over the whole sphere
    Sphere { count: usize },
    /// Exactly these directions, normalized on use
    Directions(Vec<Vec3>),
}

impl Emission {
    pub fn count(&self) -> usize {
        match self {
            Emission::Sphere { count } => *count,
            Emission::Directions(directions) => directions.len(),
        }
    }
}

impl Default for Emission {
    fn default() -> Self {
        Emission::Sphere {
            count: TraceConfig::DEFAULT_RAYS,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExecutionMode {
    Monothreaded,
    #[default]
    Multithreaded,
}

/// Parameters of one trace
#[derive(Debug, Clone, PartialEq)]
pub struct TraceConfig {
    pub emission: Emission,
    /// Level at the source, in dB
    pub level: f64,
    pub band: Band,
    /// Maximum reflection depth, 0 only follows the primary rays
    pub reflections: u32,
    /// Scattered rays per reflection, the mirror ray comes on top of them
    pub samples: usize,
    pub energy_model: EnergyModel,
    /// Distances under this are clamped before computing the attenuation
    pub min_distance: f64,
    pub seed: u64,
    pub execution_mode: ExecutionMode,
    /// Largest accepted value of [`TraceConfig::max_rays`]
    pub ray_limit: usize,
}

impl TraceConfig {
    pub const DEFAULT_RAYS: usize = 1000;
    pub const DEFAULT_LEVEL: f64 = 120.0;
    pub const DEFAULT_MIN_DISTANCE: f64 = 0.01;
    /// A whole wave is kept in memory, this keeps it to a few gigabytes at most
    pub const DEFAULT_RAY_LIMIT: usize = 20_000_000;

    pub fn builder() -> TraceConfigBuilder {
        TraceConfigBuilder::default()
    }

    pub fn reflector(&self) -> BrdfReflector {
        BrdfReflector::new(self.samples, self.energy_model)
    }

    /// Upper bound of the number of rays a trace casts, reached when no ray ever escapes
    pub fn max_rays(&self) -> usize {
        let branching = self.samples.saturating_add(1);
        let mut wave = self.emission.count();
        let mut total = wave;
        for _ in 0..self.reflections {
            wave = wave.saturating_mul(branching);
            total = total.saturating_add(wave);
        }
        total
    }
}

impl Default for TraceConfig {
    fn default() -> Self {
        Self {
            emission: Emission::default(),
            level: Self::DEFAULT_LEVEL,
            band: Band::Hz1000,
            reflections: 0,
            samples: BrdfReflector::DEFAULT_SAMPLES,
            energy_model: EnergyModel::Reference,
            min_distance: Self::DEFAULT_MIN_DISTANCE,
            seed: 0,
            execution_mode: ExecutionMode::Multithreaded,
            ray_limit: Self::DEFAULT_RAY_LIMIT,
        }
    }
}

#[derive(Default)]
pub struct TraceConfigBuilder {
    config: TraceConfig,
}

impl TraceConfigBuilder {
    pub fn rays(mut self, count: usize) -> Self {
        self.config.emission = Emission::Sphere { count };
        self
    }
    pub fn directions(mut self, directions: Vec<Vec3>) -> Self {
        self.config.emission = Emission::Directions(directions);
        self
    }
    pub fn level(mut self, level: f64) -> Self {
        self.config.level = level;
        self
    }
    pub fn band(mut self, band: Band) -> Self {
        self.config.band = band;
        self
    }
    pub fn reflections(mut self, reflections: u32) -> Self {
        self.config.reflections = reflections;
        self
    }
    pub fn samples(mut self, samples: usize) -> Self {
        self.config.samples = samples;
        self
    }
    pub fn energy_model(mut self, energy_model: EnergyModel) -> Self {
        self.config.energy_model = energy_model;
        self
    }
    pub fn min_distance(mut self, min_distance: f64) -> Self {
        self.config.min_distance = min_distance;
        self
    }
    pub fn seed(mut self, seed: u64) -> Self {
        self.config.seed = seed;
        self
    }
    pub fn execution_mode(mut self, execution_mode: ExecutionMode) -> Self {
        self.config.execution_mode = execution_mode;
        self
    }
    pub fn ray_limit(mut self, ray_limit: usize) -> Self {
        self.config.ray_limit = ray_limit;
        self
    }

    /// Fails when the minimal distance is not positive or when the trace could cast more
    /// rays than the limit
    pub fn build(self) -> Result<TraceConfig> {
        if self.config.min_distance <= 0.0 {
            return Err(DomainError::NonPositiveDistance {
                d1: self.config.min_distance,
                d2: self.config.min_distance,
            });
        }
        let max_rays = self.config.max_rays();
        if max_rays > self.config.ray_limit {
            return Err(DomainError::TooManyRays {
                max_rays,
                limit: self.config.ray_limit,
            });
        }
        Ok(self.config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = TraceConfig::builder().build().unwrap();
        assert_eq!(config, TraceConfig::default());
        assert_eq!(config.emission.count(), 1000);
        assert_eq!(config.level, 120.0);
        assert_eq!(config.band.hz(), 1000);
        assert_eq!(config.reflections, 0);
        assert_eq!(config.samples, 100);
        assert_eq!(config.energy_model, EnergyModel::Reference);
        assert_eq!(config.min_distance, 0.01);
        assert_eq!(config.execution_mode, ExecutionMode::Multithreaded);
    }

    #[test]
    fn builder() {
        let config = TraceConfig::builder()
            .directions(vec![Vec3::X, Vec3::Y])
            .level(90.0)
            .band(Band::Hz250)
            .reflections(2)
            .samples(3)
            .seed(12)
            .execution_mode(ExecutionMode::Monothreaded)
            .build()
            .unwrap();
        assert_eq!(config.emission.count(), 2);
        assert_eq!(config.level, 90.0);
        assert_eq!(config.band, Band::Hz250);
        assert_eq!(config.seed, 12);
        // 2 + 2 * 4 + 2 * 16
        assert_eq!(config.max_rays(), 42);

        assert!(TraceConfig::builder().min_distance(0.0).build().is_err());
    }

    #[test]
    fn max_rays_saturates() {
        let config = TraceConfig {
            samples: usize::MAX,
            reflections: 3,
            ..TraceConfig::default()
        };
        assert_eq!(config.max_rays(), usize::MAX);
    }

    #[test]
    fn ray_limit() {
        // 1000 * (1 + 101 + 101^2)
        let config = TraceConfig::builder().reflections(2).build().unwrap();
        assert_eq!(config.max_rays(), 10_303_000);

        let err = TraceConfig::builder().reflections(6).build().unwrap_err();
        assert!(matches!(
            err,
            DomainError::TooManyRays {
                limit: TraceConfig::DEFAULT_RAY_LIMIT,
                ..
            }
        ));

        // 10 * (1 + 3 + 9)
        let small = |limit| {
            TraceConfig::builder()
                .rays(10)
                .reflections(2)
                .samples(2)
                .ray_limit(limit)
                .build()
        };
        assert!(small(129).is_err());
        assert_eq!(small(130).unwrap().max_rays(), 130);
    }
}
