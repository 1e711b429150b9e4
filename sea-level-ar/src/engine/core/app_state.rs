use bevy::prelude::*;
use serde::Serialize;

/// Camera capture lifecycle.
///
/// `Unsupported`, `Failed` and `PlaybackFailed` are terminal for the page
/// session; recovering from them takes a reload. `Rendering` is left only
/// through an explicit stop request.
#[derive(Debug, Clone, Copy, Default, Eq, PartialEq, Hash, States, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CaptureState {
    #[default]
    Idle,
    RequestingCamera,
    StreamBound,
    Rendering,
    Stopped,
    Unsupported,
    Failed,
    PlaybackFailed,
}

impl CaptureState {
    pub fn is_terminal(self) -> bool {
        matches!(
            self,
            Self::Stopped | Self::Unsupported | Self::Failed | Self::PlaybackFailed
        )
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::RequestingCamera => "requesting_camera",
            Self::StreamBound => "stream_bound",
            Self::Rendering => "rendering",
            Self::Stopped => "stopped",
            Self::Unsupported => "unsupported",
            Self::Failed => "failed",
            Self::PlaybackFailed => "playback_failed",
        }
    }
}

/// Startup kicks the capture pipeline off on the first frame.
pub fn transition_to_requesting_camera(mut next_state: ResMut<NextState<CaptureState>>) {
    info!("→ Transitioning to RequestingCamera state");
    next_state.set(CaptureState::RequestingCamera);
}
