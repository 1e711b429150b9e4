use bevy::prelude::*;

use crate::engine::core::host::{CameraDevice, OverlayCanvas};
use crate::engine::overlay::geometry::{OverlayGeometry, OverlaySettings};
use crate::engine::overlay::sea_level::SeaLevel;

/// 2D drawing surface layered over the video.
pub trait OverlaySurface {
    /// Match the surface to the video's native resolution.
    fn resize(&mut self, width: u32, height: u32);
    fn size(&self) -> (f64, f64);
    fn clear(&mut self);
    fn stroke_line(&mut self, from: (f64, f64), to: (f64, f64), line_width: f64, colour: &str);
    fn fill_rect(&mut self, x: f64, y: f64, width: f64, height: f64, colour: &str);
}

#[derive(Resource, Debug, Default, Clone, Copy)]
pub struct OverlayStats {
    pub frames_drawn: u64,
    /// Frames where the video had not buffered enough to draw over.
    pub frames_skipped: u64,
}

/// Clear the surface, then draw the sea line and the submerged region below it.
pub fn paint_overlay(
    surface: &mut dyn OverlaySurface,
    geometry: &OverlayGeometry,
    settings: &OverlaySettings,
) {
    surface.clear();
    surface.stroke_line(
        (0.0, geometry.line_y),
        (geometry.width, geometry.line_y),
        settings.line_width,
        &settings.line_colour,
    );
    surface.fill_rect(
        0.0,
        geometry.line_y,
        geometry.width,
        geometry.submerged_height(),
        &settings.fill_colour,
    );
}

/// Per-frame overlay pass, active only while rendering.
pub fn render_overlay(
    sea_level: Res<SeaLevel>,
    settings: Res<OverlaySettings>,
    camera: NonSend<CameraDevice>,
    mut canvas: NonSendMut<OverlayCanvas>,
    mut stats: ResMut<OverlayStats>,
) {
    if !camera.0.has_enough_data() {
        stats.frames_skipped += 1;
        return;
    }

    let (width, height) = canvas.0.size();
    let geometry = OverlayGeometry::compute(width, height, sea_level.level(), &settings);
    paint_overlay(canvas.0.as_mut(), &geometry, &settings);
    stats.frames_drawn += 1;
}
