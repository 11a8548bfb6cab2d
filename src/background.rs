use serde::{Deserialize, Serialize};

use crate::color::Color;
use crate::vec3::Vec3;
use crate::EPS;

/// Steepness of the logistic horizon blend.
const STEEPNESS: f64 = 10.0;

/// Procedural sky seen by rays that leave the scene.
#[derive(Copy, Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct Background {
    /// Color far below the horizon.
    pub low: Color,
    /// Color far above the horizon.
    pub high: Color,
}

impl Default for Background {
    fn default() -> Self {
        Self {
            low: Color::new(0.2, 0.2, 0.5),
            high: Color::new(0.5, 0.5, 0.5),
        }
    }
}

impl Background {
    /// Sky color along `direction`.
    ///
    /// Nearly vertical directions have no meaningful elevation and get black.
    pub fn color(&self, direction: &Vec3<f64>) -> Color {
        let nonvert = direction.horizontal_len();
        if nonvert < EPS {
            return Color::BLACK;
        }

        self.gradient(direction.y / nonvert)
    }

    /// Logistic blend from `low` to `high` by pseudo-elevation `vy / |vxz|`.
    pub fn gradient(&self, elevation: f64) -> Color {
        let mult = 1.0 / (1.0 + (-STEEPNESS * elevation).exp());

        Color::new(
            self.low.red + (self.high.red - self.low.red) * mult,
            self.low.green + (self.high.green - self.low.green) * mult,
            self.low.blue + (self.high.blue - self.low.blue) * mult,
        )
    }
}
