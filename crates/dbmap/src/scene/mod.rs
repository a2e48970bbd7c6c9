//! Ready made rooms.

pub mod examples;

use crate::{error::Result, material::MaterialId, math::vec::Vec3, shape::Face};

/// The two triangles of the parallelogram `origin, origin + a, origin + a + b, origin + b`.
///
/// Both normals are along `a x b`.
pub fn quad(origin: Vec3, a: Vec3, b: Vec3, material: MaterialId) -> Result<[Face; 2]> {
    Ok([
        Face::new([origin, origin + a, origin + a + b], None, material)?,
        Face::new([origin, origin + a + b, origin + b], None, material)?,
    ])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quad_normals() {
        let [t0, t1] = quad(Vec3::ZERO, Vec3::X, 2.0 * Vec3::Y, MaterialId::BRICK).unwrap();
        assert_eq!(t0.normal, Vec3::Z);
        assert_eq!(t1.normal, Vec3::Z);
        assert_eq!(t0.surface_area + t1.surface_area, 2.0);
        assert_eq!(t1.material, MaterialId::BRICK);

        assert!(quad(Vec3::ZERO, Vec3::X, Vec3::X, MaterialId::BRICK).is_err());
    }
}
