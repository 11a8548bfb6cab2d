use std::ops::{Add, AddAssign, Mul};

use serde::{Deserialize, Serialize};

/// Linear radiance, one `f64` per channel.
///
/// Channels are never clamped while shading, only when a pixel is converted
/// for display.
#[derive(Copy, Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
pub struct Color {
    pub red: f64,
    pub green: f64,
    pub blue: f64,
}

impl Color {
    pub const BLACK: Color = Color::new(0.0, 0.0, 0.0);

    #[inline]
    pub const fn new(red: f64, green: f64, blue: f64) -> Self {
        Self { red, green, blue }
    }

    #[inline]
    pub const fn gray(value: f64) -> Self {
        Self::new(value, value, value)
    }

    #[inline]
    pub fn min_channel(&self) -> f64 {
        self.red.min(self.green).min(self.blue)
    }

    #[inline]
    pub fn max_channel(&self) -> f64 {
        self.red.max(self.green).max(self.blue)
    }

    #[inline]
    pub fn map<F: Fn(f64) -> f64>(&self, f: F) -> Color {
        Color::new(f(self.red), f(self.green), f(self.blue))
    }

    #[inline]
    pub fn is_finite(&self) -> bool {
        self.red.is_finite() && self.green.is_finite() && self.blue.is_finite()
    }
}

impl Add for Color {
    type Output = Color;

    #[inline]
    fn add(self, other: Color) -> Self::Output {
        Color::new(
            self.red + other.red,
            self.green + other.green,
            self.blue + other.blue,
        )
    }
}

impl AddAssign for Color {
    #[inline]
    fn add_assign(&mut self, other: Color) {
        *self = *self + other;
    }
}

impl Mul<f64> for Color {
    type Output = Color;

    #[inline]
    fn mul(self, factor: f64) -> Self::Output {
        self.map(|c| c * factor)
    }
}

/// Per-channel tint.
impl Mul for Color {
    type Output = Color;

    #[inline]
    fn mul(self, other: Color) -> Self::Output {
        Color::new(
            self.red * other.red,
            self.green * other.green,
            self.blue * other.blue,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn channel_extremes() {
        let c = Color::new(0.5, 0.9, 0.2);

        assert_eq!(0.2, c.min_channel());
        assert_eq!(0.9, c.max_channel());
    }

    #[test]
    fn tint_is_per_channel() {
        let light = Color::new(2.0, 1.0, 0.5);
        let albedo = Color::new(0.5, 0.9, 0.5);

        assert_eq!(Color::new(1.0, 0.9, 0.25), light * albedo);
    }

    #[test]
    fn accumulate() {
        let mut c = Color::BLACK;
        c += Color::gray(0.25);
        c += Color::gray(0.25) * 2.0;

        assert_eq!(Color::gray(0.75), c);
    }
}
