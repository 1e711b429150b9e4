use bevy::prelude::*;

use constants::render_settings::DEFAULT_SEA_LEVEL_RISE;

/// Simulated sea-level rise in metres, read by the render system every frame.
///
/// Any value is accepted; the selector only offers 0.5, 1.0 and 2.0.
#[derive(Resource, Debug, Clone, Copy, PartialEq)]
pub struct SeaLevel {
    rise_m: f64,
}

impl Default for SeaLevel {
    fn default() -> Self {
        Self {
            rise_m: DEFAULT_SEA_LEVEL_RISE,
        }
    }
}

impl SeaLevel {
    pub fn set_level(&mut self, rise_m: f64) {
        self.rise_m = rise_m;
    }

    pub fn level(&self) -> f64 {
        self.rise_m
    }
}
