//! Photon renders a small scene of spheres lit by point lights.
//!
//! Rays leave a pinhole eye at the origin through the plane `z = 1`. Each hit
//! is shaded by a recursive Monte-Carlo estimator mixing direct light, random
//! diffuse bounces and one mirror bounce, with the sample count scaled by how
//! much the path can still matter. The frame ends up in a 24-bit bitmap.

pub mod background;
pub mod bmp;
pub mod color;
pub mod config;
pub mod error;
pub mod geometry;
pub mod intersection;
pub mod light;
pub mod ray;
pub mod render;
pub mod sampler;
pub mod scene;
pub mod shader;
pub mod shadow;
pub mod vec3;

pub use crate::color::Color;
pub use crate::config::{Normalization, RenderSettings};
pub use crate::error::{Error, Result};
pub use crate::intersection::Intersection;
pub use crate::render::{render, render_with, Frame, RenderReport};
pub use crate::scene::Scene;
pub use crate::vec3::Vec3;

/// Tolerance for degenerate lengths and for "fully" (non-)reflective.
pub const EPS: f64 = 1.0e-11;
