use serde::{Deserialize, Serialize};

use crate::color::Color;
use crate::vec3::Vec3;

#[derive(Copy, Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct PointLight {
    pub position: Vec3<f64>,
    /// Radiant power per channel, may well exceed 1.
    pub power: Color,
}

impl PointLight {
    pub const fn new(position: Vec3<f64>, power: Color) -> Self {
        Self { position, power }
    }

    /// Unshadowed Lambertian contribution at a surface point.
    ///
    /// `offset` is the unnormalized surface vector `point - center` whose
    /// length is `radius`. The squared distance appears twice in the
    /// denominator: once for the inverse-square falloff, once to normalize
    /// the light vector. Lights behind the surface contribute nothing.
    pub fn irradiance(&self, point: Vec3<f64>, offset: &Vec3<f64>, radius: f64) -> Color {
        let v = point - self.position;
        let len_sq = v.len_sq();

        let light_from = -offset.dot(&v) / (len_sq * radius * len_sq.sqrt());
        if light_from > 0.0 {
            self.power * light_from
        } else {
            Color::BLACK
        }
    }
}

/// Light "at infinity".
///
/// Part of the scene description only: shading iterates point lights.
#[derive(Copy, Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct DirectionalLight {
    /// Must be a unit vector; `Scene::validate` rejects anything else.
    pub direction: Vec3<f64>,
    pub power: Color,
}

impl DirectionalLight {
    pub const fn new(direction: Vec3<f64>, power: Color) -> Self {
        Self { direction, power }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn head_on_follows_inverse_square() {
        let light = PointLight::new(Vec3::ZERO, Color::gray(2.0));
        // Front point of a unit sphere at z = 5, facing the light.
        let point = Vec3::new(0.0, 0.0, 4.0);
        let offset = Vec3::new(0.0, 0.0, -1.0);

        let c = light.irradiance(point, &offset, 1.0);
        assert!((c.red - 2.0 / 16.0).abs() < 1e-12);
    }

    #[test]
    fn includes_cosine() {
        let light = PointLight::new(Vec3::new(3.0, 0.0, 0.0), Color::gray(1.0));
        let point = Vec3::new(0.0, 0.0, 4.0);
        // Radius 2 sphere below the point, normal +z.
        let offset = Vec3::new(0.0, 0.0, 2.0);

        // to light = (3, 0, -4), distance 5, cos = -4/5 against +z: behind.
        assert_eq!(Color::BLACK, light.irradiance(point, &offset, 2.0));

        let offset = Vec3::new(2.0, 0.0, 0.0);
        // normal +x, cos = 3/5, distance² = 25.
        let c = light.irradiance(point, &offset, 2.0);
        assert!((c.green - 0.6 / 25.0).abs() < 1e-12);
    }
}
