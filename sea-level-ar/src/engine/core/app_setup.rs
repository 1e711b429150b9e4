// Standard library and external crates
use bevy::app::ScheduleRunnerPlugin;
use bevy::prelude::*;
use bevy::state::app::StatesPlugin;

// Crate engine modules
use crate::engine::capture::CapturePlugin;
use crate::engine::core::host::{
    CameraDevice, GeolocationDevice, HostPlatform, OverlayCanvas, UiDevice,
};
use crate::engine::core::status::{ArStatus, publish_status};
use crate::engine::location::LocationGatePlugin;
use crate::engine::overlay::OverlayPlugin;

// Create Web RPC modules
use crate::rpc::web_rpc::WebRpcPlugin;

/// Per-frame ordering inside `Update`.
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub enum ArSystems {
    /// Page controls, RPC requests and the location fix.
    Input,
    /// Capture state machine.
    Capture,
    /// Overlay drawing.
    Render,
    /// Stop requests, after this frame's draw so a stopped surface stays blank.
    Teardown,
}

/// Install the overlay engine into `app` around the given host.
///
/// Neither logging nor a runner is installed; the caller decides what
/// drives `App::update` (animation frames in the browser, a single pass
/// natively, manual ticks in tests).
pub fn configure_app(app: &mut App, host: HostPlatform) -> &mut App {
    app.add_plugins(MinimalPlugins.build().disable::<ScheduleRunnerPlugin>())
        .add_plugins(StatesPlugin);

    app.insert_non_send_resource(CameraDevice(host.camera))
        .insert_non_send_resource(OverlayCanvas(host.surface))
        .insert_non_send_resource(GeolocationDevice(host.geolocator))
        .insert_non_send_resource(UiDevice(host.ui));

    app.configure_sets(
        Update,
        (
            ArSystems::Input,
            ArSystems::Capture,
            ArSystems::Render,
            ArSystems::Teardown,
        )
            .chain(),
    );

    app.init_resource::<ArStatus>()
        .add_plugins(WebRpcPlugin)
        .add_plugins(CapturePlugin)
        .add_plugins(OverlayPlugin)
        .add_plugins(LocationGatePlugin)
        .add_systems(PostUpdate, publish_status)
}
