use serde::{Deserialize, Serialize};

use crate::color::Color;

mod sphere;

pub use self::sphere::Sphere;

/// How a surface splits incoming light between mirror and diffuse bounces.
#[derive(Copy, Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct Material {
    /// Mirror share in `[0, 1]`; the rest is diffuse.
    pub reflectivity: f64,
    /// Per-channel tint applied to everything leaving the surface.
    pub albedo: Color,
}

#[derive(Copy, Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct Model {
    #[serde(flatten)]
    pub geometry: Sphere,
    pub material: Material,
}

impl Model {
    pub const fn new(geometry: Sphere, material: Material) -> Self {
        Self { geometry, material }
    }
}
