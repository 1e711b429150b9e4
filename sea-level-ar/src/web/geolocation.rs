use bevy::prelude::*;
use wasm_bindgen::prelude::*;
use web_sys::{GeolocationPosition, GeolocationPositionError, Window};

use crate::engine::core::signals::SignalSender;
use crate::engine::location::gate::{Geolocator, LocationSignal};
use crate::engine::location::haversine::GeoPoint;
use crate::web::js_error_message;

/// `navigator.geolocation`, queried once with platform defaults.
pub struct BrowserGeolocator {
    window: Window,
}

impl BrowserGeolocator {
    pub fn new(window: Window) -> Self {
        Self { window }
    }
}

impl Geolocator for BrowserGeolocator {
    fn is_available(&self) -> bool {
        js_sys::Reflect::has(&self.window.navigator(), &JsValue::from_str("geolocation"))
            .unwrap_or(false)
    }

    fn request_position(&mut self, signals: SignalSender<LocationSignal>) {
        let geolocation = match self.window.navigator().geolocation() {
            Ok(geolocation) => geolocation,
            Err(e) => {
                signals.send(LocationSignal::PositionFailed(js_error_message(&e)));
                return;
            }
        };

        let fixed_signals = signals.clone();
        // `once_into_js` frees each callback after it runs; only one of the
        // two ever fires.
        let on_position = Closure::once_into_js(move |position: GeolocationPosition| {
            let coords = position.coords();
            fixed_signals.send(LocationSignal::PositionFixed(GeoPoint::new(
                coords.latitude(),
                coords.longitude(),
            )));
        });
        let failed_signals = signals.clone();
        let on_error = Closure::once_into_js(move |error: GeolocationPositionError| {
            failed_signals.send(LocationSignal::PositionFailed(error.message()));
        });

        if let Err(e) = geolocation.get_current_position_with_error_callback(
            on_position.unchecked_ref(),
            Some(on_error.unchecked_ref()),
        ) {
            signals.send(LocationSignal::PositionFailed(js_error_message(&e)));
        } else {
            debug!("Position requested");
        }
    }
}
