use bevy::prelude::*;
use serde::Serialize;

use crate::engine::capture::error::CaptureError;
use crate::engine::core::signals::SignalSender;
use constants::camera::{FACING_MODE, IDEAL_HEIGHT, IDEAL_WIDTH};

/// Completion of an asynchronous capture step, posted by the host.
#[derive(Event, Debug, Clone, PartialEq)]
pub enum CaptureSignal {
    StreamGranted,
    StreamFailed(String),
    /// The video element reported an error after the stream was attached.
    VideoError(String),
    MetadataLoaded,
    PlaybackStarted { width: u32, height: u32 },
    PlaybackFailed(String),
}

/// Camera access as the capture state machine sees it.
///
/// Asynchronous operations return immediately and report their outcome by
/// sending a [`CaptureSignal`].
pub trait CameraHost {
    /// Whether the host exposes a capture API at all.
    fn is_supported(&self) -> bool;

    /// Ask for a stream; answers with `StreamGranted` or `StreamFailed`.
    fn request_stream(
        &mut self,
        constraints: &StreamConstraints,
        signals: SignalSender<CaptureSignal>,
    );

    /// Attach the granted stream to the video element. Afterwards the host
    /// sends `MetadataLoaded` and `VideoError` as they happen.
    fn bind_stream(&mut self, signals: SignalSender<CaptureSignal>) -> Result<(), CaptureError>;

    /// Start playback; answers with `PlaybackStarted` or `PlaybackFailed`.
    fn start_playback(&mut self, signals: SignalSender<CaptureSignal>);

    /// True when the video has buffered enough to present a frame.
    fn has_enough_data(&self) -> bool;
}

/// `getUserMedia` constraints, serialised in the browser's own shape.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct StreamConstraints {
    pub video: VideoConstraints,
    pub audio: bool,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct VideoConstraints {
    pub facing_mode: String,
    pub width: IdealValue,
    pub height: IdealValue,
}

#[derive(Serialize, Debug, Clone, Copy, PartialEq)]
pub struct IdealValue {
    pub ideal: u32,
}

impl Default for StreamConstraints {
    fn default() -> Self {
        Self {
            video: VideoConstraints {
                facing_mode: FACING_MODE.to_string(),
                width: IdealValue { ideal: IDEAL_WIDTH },
                height: IdealValue {
                    ideal: IDEAL_HEIGHT,
                },
            },
            audio: false,
        }
    }
}
