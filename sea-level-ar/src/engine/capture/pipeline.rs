use bevy::prelude::*;

use crate::engine::capture::camera::{CaptureSignal, StreamConstraints};
use crate::engine::capture::error::CaptureError;
use crate::engine::core::app_state::CaptureState;
use crate::engine::core::host::{CameraDevice, OverlayCanvas};
use crate::engine::core::signals::SignalQueue;
use crate::engine::core::status::{
    ArStatus, STATUS_AR_ACTIVE, STATUS_AR_STOPPED, STATUS_CAMERA_CONNECTED,
    STATUS_REQUESTING_CAMERA,
};

/// Request to end the render loop.
#[derive(Event, Debug, Clone, Copy, Default)]
pub struct StopOverlay;

/// Stop request waiting for the render loop to start.
#[derive(Resource, Debug, Default)]
pub struct PendingStop(bool);

/// Run condition keeping the overlay blank once a stop is pending.
pub fn no_stop_pending(pending: Res<PendingStop>) -> bool {
    !pending.0
}

/// Constraints used for the next stream request.
#[derive(Resource, Default, Clone)]
pub struct CaptureConstraints(pub StreamConstraints);

/// Entering `RequestingCamera`: check for a capture API, then ask for a stream.
pub fn request_camera(
    mut camera: NonSendMut<CameraDevice>,
    constraints: Res<CaptureConstraints>,
    queue: Res<SignalQueue<CaptureSignal>>,
    mut status: ResMut<ArStatus>,
    mut next_state: ResMut<NextState<CaptureState>>,
) {
    status.set(STATUS_REQUESTING_CAMERA, CaptureState::RequestingCamera);

    if !camera.0.is_supported() {
        let error = CaptureError::Unsupported;
        error!("Capture API unavailable: {error}");
        status.set(error.to_string(), CaptureState::Unsupported);
        next_state.set(CaptureState::Unsupported);
        return;
    }

    debug!("Requesting stream with {:?}", constraints.0);
    camera.0.request_stream(&constraints.0, queue.sender());
}

/// Drive the capture state machine from host completion signals.
///
/// Signals are applied in arrival order against a running copy of the
/// state, so a frame that delivers several completions still walks through
/// each transition.
pub fn handle_capture_signals(
    mut signals: EventReader<CaptureSignal>,
    state: Res<State<CaptureState>>,
    mut next_state: ResMut<NextState<CaptureState>>,
    mut camera: NonSendMut<CameraDevice>,
    mut canvas: NonSendMut<OverlayCanvas>,
    queue: Res<SignalQueue<CaptureSignal>>,
    mut status: ResMut<ArStatus>,
) {
    let initial = *state.get();
    if initial.is_terminal() {
        for signal in signals.read() {
            debug!("Ignoring {signal:?} after reaching {initial:?}");
        }
        return;
    }
    let mut current = initial;

    for signal in signals.read() {
        match (current, signal) {
            (CaptureState::RequestingCamera, CaptureSignal::StreamGranted) => {
                match camera.0.bind_stream(queue.sender()) {
                    Ok(()) => {
                        current = CaptureState::StreamBound;
                        status.set(STATUS_CAMERA_CONNECTED, current);
                    }
                    Err(bind_error) => {
                        let error = CaptureError::AcquisitionFailed(bind_error.to_string());
                        error!("Failed to bind camera stream: {bind_error}");
                        current = CaptureState::Failed;
                        status.set(error.to_string(), current);
                    }
                }
            }
            (CaptureState::RequestingCamera, CaptureSignal::StreamFailed(message)) => {
                let error = CaptureError::AcquisitionFailed(message.clone());
                error!("Camera request rejected: {message}");
                current = CaptureState::Failed;
                status.set(error.to_string(), current);
            }
            (CaptureState::StreamBound, CaptureSignal::MetadataLoaded) => {
                debug!("Video metadata loaded, starting playback");
                camera.0.start_playback(queue.sender());
            }
            (CaptureState::StreamBound, CaptureSignal::PlaybackStarted { width, height }) => {
                canvas.0.resize(*width, *height);
                info!("Overlay surface sized to {width}x{height}");
                current = CaptureState::Rendering;
                status.set(STATUS_AR_ACTIVE, current);
            }
            (CaptureState::StreamBound, CaptureSignal::PlaybackFailed(message)) => {
                let error = CaptureError::PlaybackFailed(message.clone());
                error!("Video playback failed: {message}");
                current = CaptureState::PlaybackFailed;
                status.set(error.to_string(), current);
            }
            (_, CaptureSignal::VideoError(message)) => {
                let error = CaptureError::VideoLoad(message.clone());
                error!("Video element error: {message}");
                status.set(error.to_string(), current);
            }
            (state, signal) => {
                warn!("Ignoring {signal:?} while in {state:?}");
            }
        }
    }

    if current != initial {
        info!("→ Transitioning to {current:?} state");
        next_state.set(current);
    }
}

/// Honour stop requests; the surface is left blank.
///
/// A request made before rendering starts is held and applied on the first
/// rendering frame. Terminal states drop it.
pub fn handle_stop_requests(
    mut requests: EventReader<StopOverlay>,
    mut pending: ResMut<PendingStop>,
    state: Res<State<CaptureState>>,
    mut next_state: ResMut<NextState<CaptureState>>,
    mut canvas: NonSendMut<OverlayCanvas>,
    mut status: ResMut<ArStatus>,
) {
    if !requests.is_empty() {
        requests.clear();
        if !pending.0 {
            info!("Stop requested while in {:?}", state.get());
        }
        pending.0 = true;
    }
    if !pending.0 {
        return;
    }

    match *state.get() {
        CaptureState::Rendering => {
            pending.0 = false;
            canvas.0.clear();
            status.set(STATUS_AR_STOPPED, CaptureState::Stopped);
            next_state.set(CaptureState::Stopped);
        }
        current if current.is_terminal() => {
            pending.0 = false;
            warn!("Stop requested while in {current:?}; nothing to stop");
        }
        _ => {}
    }
}
