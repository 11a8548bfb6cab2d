use crate::vec3::Vec3;

/// Half-line `origin + t * direction`, `t > 0`.
///
/// The direction is kept as given: primary rays point through the view
/// plane at `z = 1` and sampled rays carry whatever length the sampler
/// produced. Intersection code divides by `direction.len_sq()` instead.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Ray<T> {
    origin: Vec3<T>,
    direction: Vec3<T>,
}

impl Ray<f64> {
    #[inline]
    pub fn new(origin: Vec3<f64>, direction: Vec3<f64>) -> Self {
        Self { origin, direction }
    }

    #[inline]
    pub fn origin(&self) -> Vec3<f64> {
        self.origin
    }

    #[inline]
    pub fn direction(&self) -> &Vec3<f64> {
        &self.direction
    }

    #[inline]
    pub fn offset(&self, t: f64) -> Vec3<f64> {
        self.origin + self.direction.scale(t)
    }
}
