use crate::{error::Result, material::MaterialId, math::vec::Vec3, mesh::Mesh};

use super::quad;

/// Rectangular room spanning `[0, size.x] x [0, size.y] x [0, size.z]`, 12 triangles with outward
/// normals.
pub fn shoebox(size: Vec3, material: MaterialId) -> Result<Mesh> {
    let Vec3 { x, y, z } = size;
    let (dx, dy, dz) = (Vec3::X * x, Vec3::Y * y, Vec3::Z * z);

    let walls = [
        // floor and ceiling
        (Vec3::ZERO, dy, dx),
        (dz, dx, dy),
        // y = 0 and y = size.y
        (Vec3::ZERO, dx, dz),
        (dy, dz, dx),
        // x = 0 and x = size.x
        (Vec3::ZERO, dz, dy),
        (dx, dy, dz),
    ];

    let mut faces = Vec::with_capacity(12);
    for (origin, a, b) in walls {
        faces.extend(quad(origin, a, b, material)?);
    }
    Ok(Mesh::new(faces))
}

/// The `[0, 1]³` cube
pub fn unit_cube(material: MaterialId) -> Result<Mesh> {
    shoebox(Vec3::ONE, material)
}

#[cfg(test)]
mod tests {
    use crate::formulas::geometric::signed_volume;

    use super::*;

    #[test]
    fn cube_is_closed_and_outward() {
        let cube = unit_cube(MaterialId::CONCRETE).unwrap();
        assert_eq!(cube.len(), 12);

        let center = Vec3::splat(0.5);
        for face in &cube {
            // The normal points away from the center of the room
            assert!(face.normal.dot(face.center() - center) > 0.0);
            assert!((face.surface_area - 0.5).abs() < 1e-12);
            assert_eq!(face.material, MaterialId::CONCRETE);
        }

        let volume: f64 = cube.iter().map(|f| signed_volume(f.vertices)).sum();
        assert!((volume - 1.0).abs() < 1e-12);
    }

    #[test]
    fn flat_box_is_rejected() {
        assert!(shoebox(Vec3::new(1.0, 1.0, 0.0), MaterialId::CONCRETE).is_err());
    }
}
