use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use constants::render_settings::{
    BASELINE_RATIO, PIXELS_PER_METRE, SEA_LINE_COLOUR, SEA_LINE_WIDTH, SUBMERGED_FILL_COLOUR,
};

/// Tunable overlay appearance. The defaults are demo values, not calibrated.
#[derive(Resource, Debug, Clone, PartialEq, Serialize)]
pub struct OverlaySettings {
    /// Fraction of the surface height where a zero rise sits.
    pub baseline_ratio: f64,
    pub pixels_per_metre: f64,
    pub line_width: f64,
    pub line_colour: String,
    pub fill_colour: String,
}

impl Default for OverlaySettings {
    fn default() -> Self {
        Self {
            baseline_ratio: BASELINE_RATIO,
            pixels_per_metre: PIXELS_PER_METRE,
            line_width: SEA_LINE_WIDTH,
            line_colour: SEA_LINE_COLOUR.to_string(),
            fill_colour: SUBMERGED_FILL_COLOUR.to_string(),
        }
    }
}

/// Partial update accepted from the host page; absent fields are kept.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct OverlaySettingsPatch {
    pub baseline_ratio: Option<f64>,
    pub pixels_per_metre: Option<f64>,
    pub line_width: Option<f64>,
    pub line_colour: Option<String>,
    pub fill_colour: Option<String>,
}

impl OverlaySettings {
    pub fn apply(&mut self, patch: OverlaySettingsPatch) {
        if let Some(baseline_ratio) = patch.baseline_ratio {
            self.baseline_ratio = baseline_ratio;
        }
        if let Some(pixels_per_metre) = patch.pixels_per_metre {
            self.pixels_per_metre = pixels_per_metre;
        }
        if let Some(line_width) = patch.line_width {
            self.line_width = line_width;
        }
        if let Some(line_colour) = patch.line_colour {
            self.line_colour = line_colour;
        }
        if let Some(fill_colour) = patch.fill_colour {
            self.fill_colour = fill_colour;
        }
    }
}

/// Where the sea line and the submerged region land on a surface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OverlayGeometry {
    pub width: f64,
    pub height: f64,
    pub line_y: f64,
}

impl OverlayGeometry {
    pub fn compute(width: f64, height: f64, rise_m: f64, settings: &OverlaySettings) -> Self {
        Self {
            width,
            height,
            line_y: sea_line_y(height, rise_m, settings),
        }
    }

    /// Height of the filled region below the line. Not clamped: a line above
    /// the top edge still fills the whole surface.
    pub fn submerged_height(&self) -> f64 {
        self.height - self.line_y
    }
}

/// `height * baseline_ratio - rise * pixels_per_metre`.
pub fn sea_line_y(height: f64, rise_m: f64, settings: &OverlaySettings) -> f64 {
    height * settings.baseline_ratio - rise_m * settings.pixels_per_metre
}
