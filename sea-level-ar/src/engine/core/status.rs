use bevy::prelude::*;

use crate::engine::core::app_state::CaptureState;
use crate::engine::core::host::UiDevice;
use crate::rpc::web_rpc::WebRpcInterface;

pub const STATUS_REQUESTING_CAMERA: &str = "Requesting camera access...";
pub const STATUS_CAMERA_CONNECTED: &str = "Camera connected!";
pub const STATUS_AR_ACTIVE: &str = "AR active";
pub const STATUS_AR_STOPPED: &str = "AR stopped";

/// Human-readable status line shown to the user.
///
/// Every update is kept until [`publish_status`] forwards it, so a frame that
/// sets two messages still shows both in the log and the page. Each message
/// carries the state it describes, since `NextState` only lands next frame.
#[derive(Resource, Default)]
pub struct ArStatus {
    message: String,
    unpublished: Vec<(String, CaptureState)>,
}

impl ArStatus {
    pub fn set(&mut self, message: impl Into<String>, state: CaptureState) {
        let message = message.into();
        self.unpublished.push((message.clone(), state));
        self.message = message;
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Push new status lines to the page, the log and the RPC host.
pub fn publish_status(
    mut status: ResMut<ArStatus>,
    mut ui: NonSendMut<UiDevice>,
    mut rpc_interface: ResMut<WebRpcInterface>,
) {
    if status.unpublished.is_empty() {
        return;
    }

    for (message, state) in std::mem::take(&mut status.unpublished) {
        info!("{message}");
        ui.0.set_status(&message);
        rpc_interface.send_notification(
            "status_changed",
            serde_json::json!({
                "status": message,
                "state": state.as_str(),
            }),
        );
    }
}
