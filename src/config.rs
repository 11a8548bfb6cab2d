use std::path::PathBuf;

use serde::Deserialize;
use tracing::debug;

use crate::error::{Error, Result};

/// How a diffuse sample's share of the significance is normalized.
#[derive(Copy, Clone, Debug, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Normalization {
    /// Each sample's weight is divided by the running sum of the weights drawn
    /// so far, including its own. The first sample therefore inherits the
    /// whole diffuse significance and later ones progressively less.
    #[default]
    Streaming,
    /// All directions are drawn first and every weight is divided by the
    /// final sum, so the children's significances add up exactly to the
    /// diffuse share. Changes both noise and pruning compared to streaming.
    Buffered,
}

/// Every tuning constant of a frame.
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct RenderSettings {
    pub width: u32,
    pub height: u32,
    /// Half-width of the view plane at `z = 1`.
    pub horiz_ratio: f64,
    /// Half-height of the view plane at `z = 1`.
    pub vert_ratio: f64,
    /// Deepest recursion level that is still shaded.
    pub max_depth: u32,
    /// Paths whose significance drops to this or below contribute black.
    pub negligible_significance: f64,
    /// Diffuse samples drawn per unit of significance.
    pub samples_per_significance: f64,
    pub gamma: f64,
    pub seed: u64,
    pub normalization: Normalization,
    pub output: PathBuf,
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            width: 700,
            height: 700,
            horiz_ratio: 0.5,
            vert_ratio: 0.5,
            max_depth: 10,
            // 1/256 is the smallest visible step, stay well below it.
            negligible_significance: 0.001,
            samples_per_significance: 2000.0,
            gamma: 2.2,
            seed: 0x5eed,
            normalization: Normalization::Streaming,
            output: PathBuf::from("out.bmp"),
        }
    }
}

impl RenderSettings {
    pub fn from_json(json: &str) -> Result<Self> {
        let settings: RenderSettings = serde_json::from_str(json)?;
        settings.validate()?;
        debug!(?settings, "parsed render settings");

        Ok(settings)
    }

    pub fn validate(&self) -> Result<()> {
        if self.width == 0 || self.height == 0 {
            return Err(Error::Settings(format!(
                "image must not be empty, got {}x{}",
                self.width, self.height
            )));
        }
        if !(self.horiz_ratio > 0.0 && self.vert_ratio > 0.0) {
            return Err(Error::Settings("view plane ratios must be positive".into()));
        }
        if !(self.negligible_significance >= 0.0) {
            return Err(Error::Settings("negligible significance must be non-negative".into()));
        }
        if !(self.samples_per_significance >= 0.0) || !self.samples_per_significance.is_finite() {
            return Err(Error::Settings("sample density must be a finite non-negative number".into()));
        }
        if !(self.gamma > 0.0) {
            return Err(Error::Settings("gamma must be positive".into()));
        }

        Ok(())
    }

    /// Diffuse sample count for a shading call of the given significance.
    #[inline]
    pub fn sample_count(&self, significance: f64) -> usize {
        (self.samples_per_significance * significance) as usize
    }
}
