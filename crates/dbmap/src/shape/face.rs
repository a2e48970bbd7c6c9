use crate::{
    error::Result,
    material::MaterialId,
    math::vec::{Vec3, Vec3NormalizeExt},
    ray::Ray,
};

use super::{local_info, FullIntersectionResult, IntersectionResult, RayIntersection, Shape};

/// Barycentric coordinates may be this much outside of [0, 1] and still count as a hit, so that a
/// ray going exactly through a shared edge hits at least one of the two triangles.
const BARYCENTRIC_TOLERANCE: f64 = 1e-9;

/// A triangular surface of the room.
///
/// Geometry is fixed at construction; only the material can change afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct Face {
    pub vertices: [Vec3; 3],
    /// Unit normal, pointing out of the room for a well-formed mesh
    pub normal: Vec3,
    pub surface_area: f64,
    /// Diffuse reflection coefficient
    pub kd: f64,
    /// Specular reflection coefficient
    pub ks: f64,
    pub material: MaterialId,
}

impl Face {
    pub const DEFAULT_KD: f64 = 0.1;
    pub const DEFAULT_KS: f64 = 0.9;

    /// Builds a face. Without a `normal`, it is derived from the winding:
    /// $\frac{(v_1 - v_0) \times (v_2 - v_0)}{\|(v_1 - v_0) \times (v_2 - v_0)\|}$.
    ///
    /// Fails on a degenerate (zero area) triangle or a zero `normal`.
    pub fn new(vertices: [Vec3; 3], normal: Option<Vec3>, material: MaterialId) -> Result<Self> {
        let cross = (vertices[1] - vertices[0]).cross(vertices[2] - vertices[0]);
        let winding_normal = cross.normalize_checked()?;
        let normal = match normal {
            Some(normal) => normal.normalize_checked()?,
            None => winding_normal,
        };

        Ok(Self {
            vertices,
            normal,
            surface_area: 0.5 * cross.length(),
            kd: Self::DEFAULT_KD,
            ks: Self::DEFAULT_KS,
            material,
        })
    }

    /// A face made of the default material, with the normal taken from the winding
    pub fn from_vertices(vertices: [Vec3; 3]) -> Result<Self> {
        Self::new(vertices, None, MaterialId::default())
    }

    pub fn with_material(self, material: MaterialId) -> Self {
        Self { material, ..self }
    }

    pub fn center(&self) -> Vec3 {
        (self.vertices[0] + self.vertices[1] + self.vertices[2]) / 3.0
    }

    /// Signed volume of the tetrahedron (origin, v0, v1, v2)
    pub fn signed_volume(&self) -> f64 {
        let [v0, v1, v2] = self.vertices;
        v0.dot(v1.cross(v2)) / 6.0
    }
}

/// A private type that stores the result of the Möller-Trumbore algorithm
enum MollerTrumboreResult {
    Result { u: f64, v: f64, t: f64 },
    NoResult,
}

impl MollerTrumboreResult {
    /// Solves `origin + t * direction = u * v0 + v * v1 + (1 - u - v) * v2`
    fn moller_trumbore(vertices: [Vec3; 3], ray: &Ray) -> Self {
        #[allow(non_snake_case)]
        let M = glam::DMat3::from_cols(
            vertices[2] - vertices[0],
            vertices[2] - vertices[1],
            ray.direction,
        );

        // Parallel to the triangle plane
        if M.determinant().abs() < 1e-12 {
            MollerTrumboreResult::NoResult
        } else {
            let [u, v, t] = M.inverse().mul_vec3(vertices[2] - ray.origin).to_array();
            MollerTrumboreResult::Result { u, v, t }
        }
    }
}

impl Shape for Face {
    fn intersection_full(&self, ray: &Ray, t_max: f64) -> FullIntersectionResult {
        let barycentric = -BARYCENTRIC_TOLERANCE..=1.0 + BARYCENTRIC_TOLERANCE;
        match MollerTrumboreResult::moller_trumbore(self.vertices, ray) {
            MollerTrumboreResult::Result { u, v, t } => {
                let w = 1.0 - u - v;
                if barycentric.contains(&u)
                    && barycentric.contains(&v)
                    && barycentric.contains(&w)
                    && ray.range().contains(&t)
                    && t < t_max
                {
                    IntersectionResult::Intersection(RayIntersection {
                        t,
                        local_info: local_info::Full {
                            pos: ray.at(t),
                            normal: self.normal,
                            material: self.material,
                            face: 0,
                        },
                    })
                } else {
                    IntersectionResult::NoIntersection
                }
            }
            MollerTrumboreResult::NoResult => IntersectionResult::NoIntersection,
        }
    }
}
