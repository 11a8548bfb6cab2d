use std::time::{Duration, Instant};

use image::{Rgb, RgbImage};
use rand::Rng;
use tracing::{debug, info, warn};

use crate::color::Color;
use crate::config::RenderSettings;
use crate::ray::Ray;
use crate::sampler::Sampler;
use crate::scene::Scene;
use crate::shader::{ShadeStats, Shader};
use crate::vec3::Vec3;
use crate::EPS;

/// Brightest channel value that still encodes below 256 after gamma.
const MAX_DISPLAYABLE: f64 = 1.0 - 256.0 * EPS - EPS;

/// Pinhole projection onto the plane `z = 1` in front of the eye.
#[derive(Copy, Clone, Debug)]
pub struct Viewport {
    width: u32,
    height: u32,
    horiz_ratio: f64,
    vert_ratio: f64,
}

impl Viewport {
    pub fn new(settings: &RenderSettings) -> Self {
        Self {
            width: settings.width,
            height: settings.height,
            horiz_ratio: settings.horiz_ratio,
            vert_ratio: settings.vert_ratio,
        }
    }

    /// Direction through column `i`, row `j`, rows counted from the bottom.
    ///
    /// Not normalized, the z component is always 1.
    pub fn direction(&self, i: u32, j: u32) -> Vec3<f64> {
        let cx = self.horiz_ratio * 2.0 * (i64::from(i) - i64::from(self.width / 2)) as f64 / f64::from(self.width);
        let cy = self.vert_ratio * 2.0 * (i64::from(j) - i64::from(self.height / 2)) as f64 / f64::from(self.height);

        Vec3::new(cx, cy, 1.0)
    }
}

/// Display value of a linear color, and whether it had to be darkened.
///
/// Colors too bright to encode are scaled down as a whole, which keeps the
/// hue but loses the absolute brightness.
pub fn to_pixel(color: Color, gamma: f64) -> (Rgb<u8>, bool) {
    let max = color.max_channel();
    let clamped = max >= MAX_DISPLAYABLE;
    let color = if clamped {
        color * (MAX_DISPLAYABLE / max)
    } else {
        color
    };

    let encode = |c: f64| (256.0 * c.max(0.0).powf(gamma)) as u8;
    (Rgb([encode(color.red), encode(color.green), encode(color.blue)]), clamped)
}

#[derive(Copy, Clone, Debug, Default)]
pub struct RenderReport {
    /// Pixels whose primary ray hit a sphere.
    pub primary_hits: u64,
    /// Pixels rescaled because they were too bright.
    pub clamped: u64,
    pub shading: ShadeStats,
    pub elapsed: Duration,
}

pub struct Frame {
    /// Top row first, as `image` stores it.
    pub image: RgbImage,
    pub report: RenderReport,
}

/// Renders a frame with the generator seeded from `settings.seed`.
pub fn render(scene: &Scene, settings: &RenderSettings) -> Frame {
    render_with(scene, settings, Sampler::seeded(settings.seed))
}

pub fn render_with<R: Rng>(scene: &Scene, settings: &RenderSettings, sampler: Sampler<R>) -> Frame {
    info!(
        width = settings.width,
        height = settings.height,
        objects = scene.objects.len(),
        lights = scene.lights.len(),
        "start drawing"
    );
    let now = Instant::now();

    let viewport = Viewport::new(settings);
    let eye = Vec3::ZERO;
    let mut shader = Shader::new(scene, settings, sampler);
    let mut image = RgbImage::new(settings.width, settings.height);
    let mut report = RenderReport::default();

    for j in 0..settings.height {
        for i in 0..settings.width {
            let direction = viewport.direction(i, j);
            let ray = Ray::new(eye, direction);

            let color = match scene.closest_intersection(&ray, None) {
                Some(hit) => {
                    report.primary_hits += 1;
                    shader.shade(hit.index, eye, hit.point, 0, 1.0)
                }
                None => scene.background.color(&direction),
            };

            let (pixel, clamped) = to_pixel(color, settings.gamma);
            if clamped {
                report.clamped += 1;
                warn!(
                    x = i,
                    y = j,
                    peak = color.max_channel(),
                    "color too bright to display, scaling down to preserve hue"
                );
            }

            image.put_pixel(i, settings.height - 1 - j, pixel);
        }
        debug!(row = j, calls = shader.stats().calls, "row done");
    }

    report.shading = shader.stats();
    report.elapsed = now.elapsed();
    info!(
        elapsed_ms = report.elapsed.as_millis() as u64,
        primary_hits = report.primary_hits,
        clamped = report.clamped,
        shade_calls = report.shading.calls,
        deepest = report.shading.deepest,
        "finished drawing"
    );

    Frame { image, report }
}
