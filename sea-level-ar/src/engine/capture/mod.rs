//! Camera capture lifecycle.
//!
//! Requests a camera stream, binds it to the video element, starts playback
//! and sizes the overlay surface, moving [`CaptureState`] forward on each
//! completion signal from the host.
//!
//! ```text
//! Idle ─> RequestingCamera ─┬─> Unsupported
//!                           ├─> Failed
//!                           └─> StreamBound ─┬─> PlaybackFailed
//!                                            └─> Rendering ─> Stopped
//! ```

use bevy::prelude::*;

use crate::engine::core::app_setup::ArSystems;
use crate::engine::core::app_state::{CaptureState, transition_to_requesting_camera};
use crate::engine::core::signals::{SignalQueue, forward_signals};

/// Browser camera abstraction and capture signals.
pub mod camera;

/// Capture failure taxonomy and status texts.
pub mod error;

/// State machine systems.
pub mod pipeline;

use camera::CaptureSignal;
use pipeline::{
    CaptureConstraints, PendingStop, StopOverlay, handle_capture_signals, handle_stop_requests,
    request_camera,
};

pub struct CapturePlugin;

impl Plugin for CapturePlugin {
    fn build(&self, app: &mut App) {
        app.init_state::<CaptureState>()
            .init_resource::<CaptureConstraints>()
            .init_resource::<PendingStop>()
            .init_resource::<SignalQueue<CaptureSignal>>()
            .add_event::<CaptureSignal>()
            .add_event::<StopOverlay>()
            .add_systems(Startup, transition_to_requesting_camera)
            .add_systems(PreUpdate, forward_signals::<CaptureSignal>)
            .add_systems(OnEnter(CaptureState::RequestingCamera), request_camera)
            .add_systems(Update, handle_capture_signals.in_set(ArSystems::Capture))
            .add_systems(Update, handle_stop_requests.in_set(ArSystems::Teardown));
    }
}
