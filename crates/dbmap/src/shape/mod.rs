//! Geometry that sound rays can hit.
//!
//! The only explicit shape is the triangular [Face]; a [crate::mesh::Mesh] is a list of them and
//! is a [Shape] as well.

pub mod face;

pub use face::Face;

use crate::ray::Ray;

/// A shape to be raytraced.
///
/// To trace a shape we only need to know whether a ray intersect it and if so,
///  some information about the shape at the intersection point
pub trait Shape: Sync + Send {
    /// Check whether `ray` intersect the shape defined by `self` closer than `t_max`, if so,
    /// gives all the information needed
    fn intersection_full(&self, ray: &Ray, t_max: f64) -> FullIntersectionResult;
}

pub mod local_info {
    use crate::{material::MaterialId, math::vec::Vec3};

    /// Contains all the local information that could be needed
    #[derive(Debug, Clone, Copy)]
    pub struct Full {
        pub pos: Vec3,
        pub normal: Vec3,
        pub material: MaterialId,
        /// Index of the face in its mesh, 0 for a lone face
        pub face: usize,
    }
}

/// Holds local informations and the time of a colision between a ray and a shape.
#[derive(Debug, Clone, Copy)]
pub struct RayIntersection<LocalInfo> {
    pub t: f64,
    pub local_info: LocalInfo,
}

/// A `Result`-like type that takes care of intersections data.
#[derive(Debug, Clone, Copy)]
pub enum IntersectionResult<LocalInfo> {
    Intersection(RayIntersection<LocalInfo>),
    NoIntersection,
}

impl<T> IntersectionResult<T> {
    pub fn into_option(self) -> Option<RayIntersection<T>> {
        match self {
            Self::Intersection(record) => Some(record),
            Self::NoIntersection => None,
        }
    }

    pub fn min(self, other: Self) -> Self {
        let Self::Intersection(RayIntersection { t: t1, .. }) = self else {
            return other;
        };
        let Self::Intersection(RayIntersection { t: t2, .. }) = other else {
            return self;
        };

        if t1 <= t2 {
            self
        } else {
            other
        }
    }
}

pub type FullIntersectionResult = IntersectionResult<local_info::Full>;
