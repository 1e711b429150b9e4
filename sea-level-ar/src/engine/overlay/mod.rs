//! Sea-level overlay: the rise value, its geometry and the per-frame draw.

use bevy::prelude::*;

use crate::engine::capture::pipeline::no_stop_pending;
use crate::engine::core::app_setup::ArSystems;
use crate::engine::core::app_state::CaptureState;
use crate::engine::core::signals::{SignalQueue, forward_signals};

pub mod geometry;
pub mod render;
pub mod scenario;
pub mod sea_level;

use geometry::OverlaySettings;
use render::{OverlayStats, render_overlay};
use scenario::{UiSignal, handle_ui_signals};
use sea_level::SeaLevel;

pub struct OverlayPlugin;

impl Plugin for OverlayPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<SeaLevel>()
            .init_resource::<OverlaySettings>()
            .init_resource::<OverlayStats>()
            .init_resource::<SignalQueue<UiSignal>>()
            .add_event::<UiSignal>()
            .add_systems(PreUpdate, forward_signals::<UiSignal>)
            .add_systems(Update, handle_ui_signals.in_set(ArSystems::Input))
            .add_systems(
                Update,
                render_overlay
                    .in_set(ArSystems::Render)
                    .run_if(in_state(CaptureState::Rendering))
                    .run_if(no_stop_pending),
            );
    }
}
