use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::vec3::Vec3;
use crate::EPS;

/// Source of diffuse sample directions.
///
/// Owns its generator so a frame is a pure function of scene, settings and
/// seed.
#[derive(Clone, Debug)]
pub struct Sampler<R = StdRng> {
    rng: R,
}

impl Sampler<StdRng> {
    pub fn seeded(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> Sampler<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }

    /// Uniformly distributed direction, not normalized.
    ///
    /// Rejection samples the unit ball, which also throws away vectors too
    /// short to have a reliable direction.
    pub fn direction(&mut self) -> Vec3<f64> {
        loop {
            let v = Vec3::new(
                self.rng.random_range(-1.0..1.0),
                self.rng.random_range(-1.0..1.0),
                self.rng.random_range(-1.0..1.0),
            );

            let len_sq = v.len_sq();
            if len_sq >= EPS && len_sq <= 1.0 {
                return v;
            }
        }
    }

    /// Random direction on the side of the surface that `offset` points to,
    /// with its cosine weight `(d·offset) / (radius·|d|)`.
    ///
    /// The direction is uniform over the sphere and then folded into the
    /// hemisphere, it is not drawn from a cosine distribution. The weight
    /// accounts for the Lambertian falloff instead.
    pub fn hemisphere(&mut self, offset: &Vec3<f64>, radius: f64) -> (Vec3<f64>, f64) {
        let mut v = self.direction();
        let mut dot = v.dot(offset);

        if dot < 0.0 {
            v = -v;
            dot = -dot;
        }

        (v, dot / (radius * v.len()))
    }
}

/// Mirror of `incoming` (hit point back to where the ray came from) about the
/// surface normal `offset / radius`.
///
/// The result is scaled by `1 / |incoming|`. `None` when `incoming` has no
/// usable direction.
pub fn reflect(incoming: &Vec3<f64>, offset: &Vec3<f64>, radius: f64) -> Option<Vec3<f64>> {
    let len_sq = incoming.len_sq();
    if len_sq < EPS {
        return None;
    }

    let mult = 2.0 * incoming.dot(offset) / (radius * radius * len_sq);
    Some(-*incoming / len_sq + *offset * mult)
}
