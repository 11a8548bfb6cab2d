use serde::{Deserialize, Serialize};

use crate::ray::Ray;
use crate::vec3::Vec3;

/// Below this the ray direction is treated as degenerate.
const MIN_DIRECTION_LEN_SQ: f64 = 1.0e-22;

#[derive(Copy, Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct Sphere {
    pub center: Vec3<f64>,
    pub radius: f64,
}

impl Sphere {
    pub const fn new(center: Vec3<f64>, radius: f64) -> Self {
        Self { center, radius }
    }

    /// Ray parameter of the near intersection.
    ///
    /// Solves `t²(V·V) − 2t(V·(C−O)) + ((C−O)·(C−O) − r²) = 0` and keeps only
    /// the smaller root. `None` if the ray misses or if that root is not
    /// strictly positive, which also covers rays starting inside the sphere.
    pub fn intersection(&self, ray: &Ray<f64>) -> Option<f64> {
        let direction = ray.direction();
        let oc = self.center - ray.origin();

        let a = direction.len_sq();
        if a < MIN_DIRECTION_LEN_SQ {
            return None;
        }
        let b = -2.0 * direction.dot(&oc);
        let c = oc.len_sq() - self.radius * self.radius;

        let discriminant = b * b - 4.0 * a * c;
        if discriminant < 0.0 {
            return None;
        }

        let t = (-b - discriminant.sqrt()) / (2.0 * a);
        if t <= 0.0 {
            return None;
        }

        Some(t)
    }

    /// Vector from the center to a surface point; its length is the radius.
    #[inline]
    pub fn offset(&self, point: Vec3<f64>) -> Vec3<f64> {
        point - self.center
    }

    #[inline]
    pub fn normal(&self, point: Vec3<f64>) -> Vec3<f64> {
        self.offset(point) / self.radius
    }
}
