use thiserror::Error;

/// Failures surfaced by the capture pipeline and the location gate.
///
/// The `Display` text is the status line shown to the user.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CaptureError {
    #[error("Camera access not supported")]
    Unsupported,

    #[error("Error accessing camera: {0}")]
    AcquisitionFailed(String),

    #[error("Video element not found")]
    VideoElementMissing,

    #[error("Error loading video: {0}")]
    VideoLoad(String),

    #[error("Error starting playback: {0}")]
    PlaybackFailed(String),

    #[error("Error getting location: {0}")]
    LocationUnavailable(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_text_carries_underlying_message() {
        let error = CaptureError::AcquisitionFailed("Permission denied".to_string());
        assert_eq!(error.to_string(), "Error accessing camera: Permission denied");

        let nested = CaptureError::AcquisitionFailed(CaptureError::VideoElementMissing.to_string());
        assert_eq!(
            nested.to_string(),
            "Error accessing camera: Video element not found"
        );
    }
}
