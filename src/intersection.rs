use crate::vec3::Vec3;

/// Nearest hit of a ray against the scene.
#[derive(Copy, Clone, Debug)]
pub struct Intersection {
    /// Index of the hit object in `Scene::objects`.
    pub index: usize,
    pub t: f64,
    pub point: Vec3<f64>,
    /// Outward unit normal, `(point - center) / radius`.
    pub normal: Vec3<f64>,
}

impl Intersection {
    pub fn new(index: usize, t: f64, point: Vec3<f64>, normal: Vec3<f64>) -> Self {
        Self {
            index,
            t,
            point,
            normal,
        }
    }
}
