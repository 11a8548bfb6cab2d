use std::fs;
use std::path::Path;

use serde::Deserialize;
use tracing::debug;

use crate::background::Background;
use crate::color::Color;
use crate::error::{Error, Result};
use crate::geometry::{Material, Model, Sphere};
use crate::intersection::Intersection;
use crate::light::{DirectionalLight, PointLight};
use crate::ray::Ray;
use crate::vec3::Vec3;

/// Allowed deviation from length 1 for directional light directions.
const UNIT_TOLERANCE: f64 = 1.0e-9;

/// Read-only world description shared by every shading call.
#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
pub struct Scene {
    pub objects: Vec<Model>,
    #[serde(default)]
    pub lights: Vec<PointLight>,
    #[serde(default)]
    pub directional: Vec<DirectionalLight>,
    #[serde(default)]
    pub background: Background,
}

const fn sphere(x: f64, y: f64, z: f64, radius: f64, reflectivity: f64, albedo: Color) -> Model {
    Model::new(
        Sphere::new(Vec3::new(x, y, z), radius),
        Material {
            reflectivity,
            albedo,
        },
    )
}

impl Scene {
    pub fn new(background: Background) -> Self {
        Self {
            objects: Vec::new(),
            lights: Vec::new(),
            directional: Vec::new(),
            background,
        }
    }

    /// Two mirror balls stacked on the left, green diffuse balls, a partly
    /// reflective red ball, a dim light in the middle and a very bright one
    /// far below.
    pub fn reference() -> Self {
        const MIRROR: Color = Color::gray(0.95);
        const GREEN: Color = Color::new(0.5, 0.9, 0.5);
        const RED: Color = Color::new(0.9, 0.5, 0.5);

        Self {
            objects: vec![
                sphere(-1.2, 1.1, 4.5, 0.9, 1.0, MIRROR),
                sphere(-1.2, -1.0, 4.5, 0.9, 1.0, MIRROR),
                sphere(1.2, 1.0, 4.5, 0.6, 0.0, GREEN),
                sphere(-1.2, 1.1, 2.0, 0.6, 0.0, GREEN),
                sphere(0.9, -1.0, 4.5, 1.0, 0.6, RED),
            ],
            lights: vec![
                PointLight::new(Vec3::new(0.0, 0.3, 4.5), Color::gray(0.5)),
                PointLight::new(Vec3::new(0.0, -100.0, 0.0), Color::gray(7000.0)),
            ],
            directional: vec![DirectionalLight::new(Vec3::new(1.0, 0.0, 0.0), Color::gray(0.5))],
            background: Background::default(),
        }
    }

    pub fn from_json(json: &str) -> Result<Self> {
        let scene: Scene = serde_json::from_str(json)?;
        scene.validate()?;
        debug!(
            objects = scene.objects.len(),
            lights = scene.lights.len(),
            "parsed scene"
        );

        Ok(scene)
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let json = fs::read_to_string(path).map_err(|err| Error::io("reading", path, err))?;

        Self::from_json(&json)
    }

    pub fn validate(&self) -> Result<()> {
        for (index, model) in self.objects.iter().enumerate() {
            let invalid = |reason: &'static str| -> Result<()> { Err(Error::InvalidSphere { index, reason }) };

            let radius = model.geometry.radius;
            if !(radius > 0.0) || !radius.is_finite() {
                return invalid("radius must be positive");
            }
            let reflectivity = model.material.reflectivity;
            if !(0.0..=1.0).contains(&reflectivity) {
                return invalid("reflectivity must lie in [0, 1]");
            }
            let albedo = model.material.albedo;
            if !(albedo.min_channel() >= 0.0) {
                return invalid("albedo must be non-negative");
            }
            // Significance is scaled by the darkest channel and must not grow.
            if !(albedo.max_channel() <= 1.0) {
                return invalid("albedo must not exceed 1");
            }
        }

        for (index, light) in self.directional.iter().enumerate() {
            if !((light.direction.len() - 1.0).abs() <= UNIT_TOLERANCE) {
                return Err(Error::InvalidLight {
                    index,
                    reason: "direction must be a unit vector",
                });
            }
        }

        Ok(())
    }

    /// Nearest object hit by `ray`, skipping `exclude`.
    ///
    /// Objects are scanned in order and a later object only wins with a
    /// strictly smaller `t`.
    pub fn closest_intersection(&self, ray: &Ray<f64>, exclude: Option<usize>) -> Option<Intersection> {
        let mut closest: Option<(usize, f64)> = None;

        for (index, model) in self.objects.iter().enumerate() {
            if Some(index) == exclude {
                continue;
            }

            if let Some(t) = model.geometry.intersection(ray) {
                if closest.map_or(true, |(_, best)| t < best) {
                    closest = Some((index, t));
                }
            }
        }

        closest.map(|(index, t)| {
            let point = ray.offset(t);
            let normal = self.objects[index].geometry.normal(point);
            Intersection::new(index, t, point, normal)
        })
    }
}
