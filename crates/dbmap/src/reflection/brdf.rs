use crate::{
    math::vec::ReflVecExt,
    ray::Ray,
    sampler::HemisphereSampler,
    shape::Face,
    utils::counter::counter,
};

use super::{EnergyModel, Reflected, Reflector};

/// Diffuse + specular reflection.
///
/// The mirror ray carries `level * ks`. Around it, `samples` rays are spread over the hemisphere
/// of the mirror direction, each one weighted by
/// $level \cdot (k_d (d \cdot n) + k_s (r \cdot s))$.
#[derive(Debug, Clone, Copy)]
pub struct BrdfReflector {
    pub sampler: HemisphereSampler,
    pub energy_model: EnergyModel,
}

impl BrdfReflector {
    pub const DEFAULT_SAMPLES: usize = 100;

    pub fn new(samples: usize, energy_model: EnergyModel) -> Self {
        Self {
            sampler: HemisphereSampler::new(samples),
            energy_model,
        }
    }
}

impl Default for BrdfReflector {
    fn default() -> Self {
        Self::new(Self::DEFAULT_SAMPLES, EnergyModel::default())
    }
}

impl Reflector for BrdfReflector {
    fn reflect(&self, incident: &Ray, face: &Face, rng: &mut crate::Rng) -> Reflected {
        counter!("Reflections");

        let d = incident.direction;
        let n = face.normal;
        let level = incident.level;
        let r = d.reflect(n);

        let diffuse = face.kd * d.dot(n);
        let scattered = self
            .sampler
            .hemisphere(incident.origin, n, n.dot(r), incident.distance, level, rng)
            .into_iter()
            .map(|s| {
                let specular = face.ks * r.dot(s.direction);
                s.with_level(self.energy_model.apply(level, level * (diffuse + specular)))
            })
            .collect();

        let mirror = Ray::new(
            incident.origin,
            r,
            incident.distance,
            self.energy_model.apply(level, level * face.ks),
        );

        Reflected { mirror, scattered }
    }
}
