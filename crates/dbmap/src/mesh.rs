use crate::{
    material::MaterialId,
    ray::Ray,
    shape::{Face, FullIntersectionResult, IntersectionResult, Shape},
    utils::counter::counter,
};

/// Which faces a material edit applies to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FaceSelection {
    One(usize),
    All,
}

/// The room: an ordered list of faces, expected to be closed with outward normals.
#[derive(Debug, Clone, Default)]
pub struct Mesh {
    pub faces: Vec<Face>,
}

impl Mesh {
    pub fn new(faces: Vec<Face>) -> Self {
        Self { faces }
    }

    pub fn len(&self) -> usize {
        self.faces.len()
    }

    pub fn is_empty(&self) -> bool {
        self.faces.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Face> {
        self.faces.iter()
    }

    /// Sets the material of the selected faces, returns how many faces were changed.
    ///
    /// An out of bounds [FaceSelection::One] changes nothing.
    pub fn assign_material(&mut self, selection: FaceSelection, material: MaterialId) -> usize {
        match selection {
            FaceSelection::One(index) => match self.faces.get_mut(index) {
                Some(face) => {
                    face.material = material;
                    1
                }
                None => {
                    log::warn!("no face {index} in a mesh of {} faces", self.faces.len());
                    0
                }
            },
            FaceSelection::All => {
                for face in &mut self.faces {
                    face.material = material;
                }
                self.faces.len()
            }
        }
    }
}

impl FromIterator<Face> for Mesh {
    fn from_iter<T: IntoIterator<Item = Face>>(iter: T) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a Mesh {
    type Item = &'a Face;
    type IntoIter = std::slice::Iter<'a, Face>;

    fn into_iter(self) -> Self::IntoIter {
        self.faces.iter()
    }
}

impl Shape for Mesh {
    /// Tests every face and keeps the nearest hit
    fn intersection_full(&self, ray: &Ray, t_max: f64) -> FullIntersectionResult {
        let mut res = IntersectionResult::NoIntersection;
        let mut t_max = t_max;

        for (index, face) in self.faces.iter().enumerate() {
            counter!("Ray-face tests");
            if let IntersectionResult::Intersection(mut record) = face.intersection_full(ray, t_max)
            {
                t_max = record.t;
                record.local_info.face = index;
                res = IntersectionResult::Intersection(record);
            }
        }
        res
    }
}
