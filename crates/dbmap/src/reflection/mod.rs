mod brdf;

pub use brdf::BrdfReflector;

use crate::{ray::Ray, shape::Face};

/// How the weights of reflected rays relate to the incoming level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EnergyModel {
    /// `level * (kd * cos_in + ks * cos_out)` as is. The weights are not normalized, so a
    /// reflected ray can be louder than the incoming one.
    #[default]
    Reference,
    /// Same weights, but no outgoing ray is louder than the incoming one
    Clamped,
}

impl EnergyModel {
    pub fn apply(self, incoming: f64, outgoing: f64) -> f64 {
        match self {
            EnergyModel::Reference => outgoing,
            EnergyModel::Clamped => f64::min(incoming, outgoing),
        }
    }
}

/// Rays leaving a surface after a hit
#[derive(Debug, Clone)]
pub struct Reflected {
    pub mirror: Ray,
    pub scattered: Vec<Ray>,
}

impl Reflected {
    pub fn len(&self) -> usize {
        1 + self.scattered.len()
    }

    pub fn is_empty(&self) -> bool {
        false
    }

    /// The mirror ray first, then the scattered ones
    pub fn into_rays(self) -> Vec<Ray> {
        let mut rays = Vec::with_capacity(self.len());
        rays.push(self.mirror);
        rays.extend(self.scattered);
        rays
    }
}

pub trait Reflector: Sync + Send {
    /// `incident` must already be moved to the hit point: its origin is the hit position, its
    /// distance the total distance travelled and its level the level on arrival.
    fn reflect(&self, incident: &Ray, face: &Face, rng: &mut crate::Rng) -> Reflected;
}
