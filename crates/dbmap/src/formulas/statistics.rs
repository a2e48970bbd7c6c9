use crate::{error::Result, math::vec::Vec3, mesh::Mesh};

use super::{center, crit_dist, rt60, surface_area, volume};

/// Everything the formulas can tell about a room
#[derive(Debug, Clone, PartialEq)]
pub struct RoomStatistics {
    pub volume: f64,
    pub surface_area: f64,
    pub center: Option<Vec3>,
    pub rt60: Result<f64>,
    pub crit_dist: Result<f64>,
}

impl RoomStatistics {
    pub fn compute(mesh: &Mesh) -> Self {
        let volume = volume(&mesh.faces);
        Self {
            volume,
            surface_area: surface_area(&mesh.faces),
            center: center(&mesh.faces),
            rt60: rt60(volume, &mesh.faces),
            crit_dist: crit_dist(volume, &mesh.faces),
        }
    }
}
