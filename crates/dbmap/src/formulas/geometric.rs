//! Geometry of a closed triangle mesh

use crate::{math::vec::Vec3, shape::Face};

pub fn triangle_area([v0, v1, v2]: [Vec3; 3]) -> f64 {
    0.5 * (v1 - v0).cross(v2 - v0).length()
}

pub fn triangle_center([v0, v1, v2]: [Vec3; 3]) -> Vec3 {
    (v0 + v1 + v2) / 3.0
}

/// Signed volume of the tetrahedron made of the origin and the triangle
pub fn signed_volume([v0, v1, v2]: [Vec3; 3]) -> f64 {
    v0.dot(v1.cross(v2)) / 6.0
}

/// Volume enclosed by a closed mesh, whatever the orientation of its faces
pub fn volume(faces: &[Face]) -> f64 {
    faces
        .iter()
        .map(|f| signed_volume(f.vertices))
        .sum::<f64>()
        .abs()
}

pub fn surface_area(faces: &[Face]) -> f64 {
    faces.iter().map(|f| f.surface_area).sum()
}

/// Mean of the triangle centers, `None` without faces
pub fn center(faces: &[Face]) -> Option<Vec3> {
    if faces.is_empty() {
        return None;
    }
    let sum: Vec3 = faces.iter().map(|f| triangle_center(f.vertices)).sum();
    Some(sum / faces.len() as f64)
}

#[cfg(test)]
mod tests {
    use crate::{
        material::MaterialId,
        math::transform::{Transform, Transformer, Position},
        scene::examples::{shoebox, unit_cube},
    };

    use super::*;

    #[test]
    fn unit_cube_geometry() {
        let cube = unit_cube(MaterialId::CONCRETE).unwrap();
        assert!((volume(&cube.faces) - 1.0).abs() < 1e-12);
        assert!((surface_area(&cube.faces) - 6.0).abs() < 1e-12);
        let c = center(&cube.faces).unwrap();
        assert!((c - Vec3::splat(0.5)).length() < 1e-12);
    }

    #[test]
    fn volume_does_not_depend_on_position() {
        let room = shoebox(Vec3::new(4.0, 3.0, 2.5), MaterialId::DRYWALL).unwrap();
        let moved: Vec<Face> = room
            .iter()
            .map(|f| {
                let t = Transform {
                    translation: Vec3::new(-10.0, 3.0, 7.0),
                    ..Transform::IDENTITY
                };
                let vertices = f.vertices.map(|v| t.apply(Position(v)).0);
                Face::new(vertices, None, f.material).unwrap()
            })
            .collect();
        assert!((volume(&room.faces) - 30.0).abs() < 1e-9);
        assert!((volume(&moved) - 30.0).abs() < 1e-9);
        assert!((surface_area(&moved) - 2.0 * (12.0 + 10.0 + 7.5)).abs() < 1e-9);
    }

    #[test]
    fn triangles() {
        let t = [Vec3::ZERO, Vec3::new(3.0, 0.0, 0.0), Vec3::new(0.0, 3.0, 0.0)];
        assert_eq!(triangle_area(t), 4.5);
        assert_eq!(triangle_center(t), Vec3::new(1.0, 1.0, 0.0));
        assert_eq!(signed_volume(t), 0.0);

        let t = [Vec3::X, Vec3::Y, Vec3::Z];
        assert!((signed_volume(t) - 1.0 / 6.0).abs() < 1e-12);
        assert!((signed_volume([Vec3::X, Vec3::Z, Vec3::Y]) + 1.0 / 6.0).abs() < 1e-12);
    }

    #[test]
    fn empty() {
        assert_eq!(volume(&[]), 0.0);
        assert_eq!(surface_area(&[]), 0.0);
        assert_eq!(center(&[]), None);
    }
}
