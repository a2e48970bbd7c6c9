use std::path::Path;

use crate::{
    error::LoadError,
    material::MaterialId,
    math::{
        transform::{Direction, Position, Transform, Transformer},
        vec::Vec3,
    },
    mesh::Mesh,
    shape::Face,
    utils::counter::counter,
};

/// Loads every triangle of an OBJ file as a [Mesh] made of `material`.
///
/// Polygons are triangulated. When the file has vertex normals, a face takes the opposite of the
/// mean of its three vertex normals, otherwise its normal follows the winding. The winding is
/// reversed when `transform` mirrors the mesh. Degenerate triangles are skipped.
pub fn load_obj<P: AsRef<Path>>(
    path: P,
    transform: Transform,
    material: MaterialId,
) -> Result<Mesh, LoadError> {
    let path = path.as_ref();
    let mut options = tobj::GPU_LOAD_OPTIONS;
    options.single_index = true;

    // Materials of the file are irrelevant, acoustic materials are assigned afterwards
    let (models, _) = tobj::load_obj(path, &options).map_err(|source| LoadError::Obj {
        path: path.to_owned(),
        source,
    })?;

    let flip = transform.flips_winding();
    let mut faces = Vec::new();
    for model in &models {
        let mesh = &model.mesh;
        log::debug!("loading model {}", model.name);

        if mesh.positions.len() % 3 != 0 || mesh.normals.len() % 3 != 0 {
            return Err(LoadError::MalformedPositions(model.name.clone()));
        }
        let positions: Vec<Vec3> = bytemuck::cast_slice::<f32, [f32; 3]>(&mesh.positions)
            .iter()
            .map(|&p| transform.apply(Position(glam::Vec3::from_array(p).as_dvec3())).0)
            .collect();
        let normals: Vec<Vec3> = bytemuck::cast_slice::<f32, [f32; 3]>(&mesh.normals)
            .iter()
            .map(|&n| transform.apply(Direction(glam::Vec3::from_array(n).as_dvec3())).0)
            .collect();

        for triangle in mesh.indices.chunks_exact(3) {
            let [a, b, c] = [triangle[0], triangle[1], triangle[2]].map(|i| i as usize);
            let (Some(&va), Some(&vb), Some(&vc)) =
                (positions.get(a), positions.get(b), positions.get(c))
            else {
                return Err(LoadError::MalformedPositions(model.name.clone()));
            };

            let normal = match (normals.get(a), normals.get(b), normals.get(c)) {
                (Some(&na), Some(&nb), Some(&nc)) => Some(-(na + nb + nc) / 3.0),
                _ => None,
            };

            let vertices = if flip { [va, vc, vb] } else { [va, vb, vc] };
            match Face::new(vertices, normal, material) {
                Ok(face) => faces.push(face),
                Err(err) => {
                    counter!("Skipped triangles");
                    log::warn!("skipping a triangle of {}: {err}", model.name);
                }
            }
        }
    }

    if faces.is_empty() {
        return Err(LoadError::Empty(path.to_owned()));
    }
    log::info!("loaded {} triangles from {}", faces.len(), path.display());
    Ok(Mesh::new(faces))
}
