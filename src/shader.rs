//! Recursive stochastic radiance estimate at a sphere surface point.
//!
//! Every call combines three terms:
//!
//! * direct light from every visible point light,
//! * a diffuse term averaged over random hemisphere directions,
//! * a single deterministic mirror bounce.
//!
//! Secondary rays that hit another sphere recurse with a smaller
//! *significance*, an estimate of how much the result can still change the
//! pixel. The number of diffuse samples is proportional to it, and the
//! recursion stops once it is negligible or the depth limit is passed.

use rand::rngs::StdRng;
use rand::Rng;

use crate::color::Color;
use crate::config::{Normalization, RenderSettings};
use crate::ray::Ray;
use crate::sampler::{self, Sampler};
use crate::scene::Scene;
use crate::shadow::is_shadowed;
use crate::vec3::Vec3;
use crate::EPS;

/// Counters accumulated over the lifetime of a shader.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct ShadeStats {
    /// Calls to `shade`, including the ones cut off immediately.
    pub calls: u64,
    /// Calls that returned black because of depth or significance.
    pub pruned: u64,
    /// Deepest `depth` argument seen.
    pub deepest: u32,
}

/// Significance handed to a mirror bounce.
#[inline]
pub fn reflection_significance(significance: f64, reflectivity: f64) -> f64 {
    significance * reflectivity
}

/// Significance handed to one diffuse bounce.
///
/// `weight_sum` is whatever normalizer the active [`Normalization`] uses; it
/// always includes `weight` itself so the ratio never exceeds one.
#[inline]
pub fn diffuse_significance(significance: f64, reflectivity: f64, weight: f64, weight_sum: f64) -> f64 {
    significance * (1.0 - reflectivity) * weight / weight_sum
}

/// One `shade` invocation, kept when call recording is on.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ShadeCall {
    /// Position in [`Shader::calls`] of the call that spawned this one.
    pub parent: Option<usize>,
    pub object: usize,
    pub depth: u32,
    /// Significance passed in by the parent.
    pub received: f64,
    /// Significance after the surface's darkest albedo channel.
    pub retained: f64,
}

pub struct Shader<'a, R = StdRng> {
    scene: &'a Scene,
    settings: &'a RenderSettings,
    sampler: Sampler<R>,
    stats: ShadeStats,
    calls: Option<Vec<ShadeCall>>,
    current: Option<usize>,
}

impl<'a, R: Rng> Shader<'a, R> {
    pub fn new(scene: &'a Scene, settings: &'a RenderSettings, sampler: Sampler<R>) -> Self {
        Self {
            scene,
            settings,
            sampler,
            stats: ShadeStats::default(),
            calls: None,
            current: None,
        }
    }

    /// Keeps a [`ShadeCall`] for every `shade` invocation from now on.
    pub fn recording(mut self) -> Self {
        self.calls = Some(Vec::new());
        self
    }

    /// Recorded calls in invocation order, empty unless recording.
    pub fn calls(&self) -> &[ShadeCall] {
        self.calls.as_deref().unwrap_or(&[])
    }

    #[inline]
    pub fn stats(&self) -> ShadeStats {
        self.stats
    }

    /// Outgoing color at `point` on object `index`, seen from `from`.
    pub fn shade(&mut self, index: usize, from: Vec3<f64>, point: Vec3<f64>, depth: u32, significance: f64) -> Color {
        self.stats.calls += 1;
        self.stats.deepest = self.stats.deepest.max(depth);

        let model = &self.scene.objects[index];
        let albedo = model.material.albedo;
        let retained = significance * albedo.min_channel();

        let call = self.calls.as_mut().map(|calls| {
            calls.push(ShadeCall {
                parent: self.current,
                object: index,
                depth,
                received: significance,
                retained,
            });
            calls.len() - 1
        });

        if depth > self.settings.max_depth {
            self.stats.pruned += 1;
            return Color::BLACK;
        }

        // Written so that a NaN significance is pruned too.
        if !(retained > self.settings.negligible_significance) {
            self.stats.pruned += 1;
            return Color::BLACK;
        }

        let parent = std::mem::replace(&mut self.current, call);
        let color = self.shade_surface(index, from, point, depth, retained);
        self.current = parent;

        color
    }

    fn shade_surface(&mut self, index: usize, from: Vec3<f64>, point: Vec3<f64>, depth: u32, significance: f64) -> Color {
        let model = &self.scene.objects[index];
        let albedo = model.material.albedo;

        let surface = Surface {
            index,
            point,
            offset: model.geometry.offset(point),
            radius: model.geometry.radius,
            reflectivity: model.material.reflectivity,
        };

        let fully_reflective = surface.reflectivity > 1.0 - EPS;
        let fully_nonreflective = surface.reflectivity < EPS;

        let mut color = if fully_reflective {
            Color::BLACK
        } else {
            let count = self.settings.sample_count(significance);
            self.diffuse(&surface, depth, significance, count)
        };

        for light in &self.scene.lights {
            if is_shadowed(self.scene, point, light.position, index) {
                continue;
            }

            color += light.irradiance(point, &surface.offset, surface.radius);
        }

        if !fully_nonreflective {
            let reflection = self.reflection(&surface, from, depth, significance);
            color = reflection * surface.reflectivity + color * (1.0 - surface.reflectivity);
        }

        color * albedo
    }

    /// Weighted average of `count` hemisphere samples around the surface
    /// normal, black when the weights sum to nothing.
    fn diffuse(&mut self, surface: &Surface, depth: u32, significance: f64, count: usize) -> Color {
        let mut weight_sum = 0.0;
        let mut accumulated = Color::BLACK;

        match self.settings.normalization {
            Normalization::Streaming => {
                for _ in 0..count {
                    let (direction, weight) = self.sampler.hemisphere(&surface.offset, surface.radius);
                    weight_sum += weight;

                    let share = diffuse_significance(significance, surface.reflectivity, weight, weight_sum);
                    accumulated += self.trace(surface, direction, depth, share) * weight;
                }
            }
            Normalization::Buffered => {
                let samples: Vec<_> = (0..count)
                    .map(|_| self.sampler.hemisphere(&surface.offset, surface.radius))
                    .collect();
                weight_sum = samples.iter().map(|&(_, weight)| weight).sum();

                for (direction, weight) in samples {
                    let share = diffuse_significance(significance, surface.reflectivity, weight, weight_sum);
                    accumulated += self.trace(surface, direction, depth, share) * weight;
                }
            }
        }

        if weight_sum > EPS {
            accumulated * (1.0 / weight_sum)
        } else {
            Color::BLACK
        }
    }

    fn reflection(&mut self, surface: &Surface, from: Vec3<f64>, depth: u32, significance: f64) -> Color {
        match sampler::reflect(&(from - surface.point), &surface.offset, surface.radius) {
            Some(direction) => {
                let share = reflection_significance(significance, surface.reflectivity);
                self.trace(surface, direction, depth, share)
            }
            None => Color::BLACK,
        }
    }

    /// Radiance arriving at the surface along `direction`: the next sphere
    /// shaded one level deeper, or the sky.
    fn trace(&mut self, surface: &Surface, direction: Vec3<f64>, depth: u32, significance: f64) -> Color {
        let ray = Ray::new(surface.point, direction);

        match self.scene.closest_intersection(&ray, Some(surface.index)) {
            Some(hit) => self.shade(hit.index, surface.point, hit.point, depth + 1, significance),
            None => self.scene.background.color(&direction),
        }
    }
}

/// Point being shaded, with what the bounces need to know about it.
struct Surface {
    index: usize,
    point: Vec3<f64>,
    /// `point - center`, length `radius`.
    offset: Vec3<f64>,
    radius: f64,
    reflectivity: f64,
}
