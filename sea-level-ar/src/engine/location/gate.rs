use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::engine::capture::error::CaptureError;
use crate::engine::core::host::{GeolocationDevice, UiDevice};
use crate::engine::core::signals::{SignalQueue, SignalSender};
use crate::engine::location::haversine::{GeoPoint, haversine_km};
use crate::rpc::web_rpc::WebRpcInterface;
use constants::coordinate_system::{
    DEMO_MODE_RADIUS_KM, REFERENCE_LATITUDE, REFERENCE_LONGITUDE, REFERENCE_NAME,
};

/// Outcome of the single position request made at startup.
#[derive(Event, Debug, Clone, PartialEq)]
pub enum LocationSignal {
    PositionFixed(GeoPoint),
    PositionFailed(String),
}

pub trait Geolocator {
    fn is_available(&self) -> bool;

    /// One-shot request; answers with a single [`LocationSignal`].
    fn request_position(&mut self, signals: SignalSender<LocationSignal>);
}

#[derive(Resource, Debug, Clone, PartialEq, Serialize)]
pub struct LocationSettings {
    pub reference: GeoPoint,
    pub reference_name: String,
    pub demo_radius_km: f64,
}

impl Default for LocationSettings {
    fn default() -> Self {
        Self {
            reference: GeoPoint::new(REFERENCE_LATITUDE, REFERENCE_LONGITUDE),
            reference_name: REFERENCE_NAME.to_string(),
            demo_radius_km: DEMO_MODE_RADIUS_KM,
        }
    }
}

/// Partial update accepted from the host page; absent fields are kept.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LocationSettingsPatch {
    pub reference: Option<GeoPoint>,
    pub reference_name: Option<String>,
    pub demo_radius_km: Option<f64>,
}

impl LocationSettingsPatch {
    /// Coordinates and radius must be finite; the radius must not be negative.
    pub fn validate(&self) -> Result<(), String> {
        if let Some(reference) = self.reference {
            if !reference.latitude.is_finite() || !reference.longitude.is_finite() {
                return Err("reference coordinates must be finite".to_string());
            }
        }
        if let Some(radius) = self.demo_radius_km {
            if !radius.is_finite() || radius < 0.0 {
                return Err("demo_radius_km must be a non-negative number".to_string());
            }
        }
        Ok(())
    }
}

impl LocationSettings {
    pub fn apply(&mut self, patch: LocationSettingsPatch) {
        if let Some(reference) = patch.reference {
            self.reference = reference;
        }
        if let Some(reference_name) = patch.reference_name {
            self.reference_name = reference_name;
        }
        if let Some(demo_radius_km) = patch.demo_radius_km {
            self.demo_radius_km = demo_radius_km;
        }
    }

    pub fn demo_notice(&self) -> String {
        format!(
            "You are outside the {} area. The app will run in demonstration mode.",
            self.reference_name
        )
    }
}

/// What the gate learned about the user's position.
#[derive(Resource, Debug, Default, Clone)]
pub struct LocationGate {
    pub position: Option<GeoPoint>,
    pub distance_km: Option<f64>,
    pub demo_mode: bool,
    pub notice_shown: bool,
}

pub fn request_position(
    mut geolocator: NonSendMut<GeolocationDevice>,
    queue: Res<SignalQueue<LocationSignal>>,
) {
    if !geolocator.0.is_available() {
        debug!("Positioning unavailable, skipping location check");
        return;
    }
    geolocator.0.request_position(queue.sender());
}

/// Compare the fix against the reference and warn once when far away.
///
/// The last fix is compared again whenever the settings change. Failures are
/// logged only; they never block the camera pipeline.
pub fn handle_location_signals(
    mut signals: EventReader<LocationSignal>,
    settings: Res<LocationSettings>,
    mut gate: ResMut<LocationGate>,
    mut ui: NonSendMut<UiDevice>,
    mut rpc_interface: ResMut<WebRpcInterface>,
) {
    let mut fresh_fix = false;
    for signal in signals.read() {
        match signal {
            LocationSignal::PositionFixed(position) => {
                gate.position = Some(*position);
                fresh_fix = true;
            }
            LocationSignal::PositionFailed(message) => {
                let error = CaptureError::LocationUnavailable(message.clone());
                error!("{error}");
            }
        }
    }

    if !fresh_fix && !settings.is_changed() {
        return;
    }
    let Some(position) = gate.position else {
        return;
    };

    let distance_km = haversine_km(position, settings.reference);
    gate.distance_km = Some(distance_km);
    gate.demo_mode = distance_km > settings.demo_radius_km;
    info!(
        "Position is {distance_km:.2} km from {}",
        settings.reference_name
    );

    if gate.demo_mode && !gate.notice_shown {
        gate.notice_shown = true;
        ui.0.show_notice(&settings.demo_notice());
        rpc_interface.send_notification(
            "demo_mode",
            serde_json::json!({ "distance_km": distance_km }),
        );
    }
}
