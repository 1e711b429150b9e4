use crate::engine::capture::camera::CameraHost;
use crate::engine::location::gate::Geolocator;
use crate::engine::overlay::render::OverlaySurface;

/// Page elements the engine writes to.
pub trait UiSink {
    fn set_status(&mut self, message: &str);
    fn set_scenario_info(&mut self, text: &str);
    /// One-shot advisory shown to the user (an `alert` in the browser).
    fn show_notice(&mut self, message: &str);
    fn set_info_panel_visible(&mut self, visible: bool);
}

/// Host capabilities handed to the app at construction.
///
/// Browser builds wire these to web APIs; tests and native builds pass
/// substitutes.
pub struct HostPlatform {
    pub camera: Box<dyn CameraHost>,
    pub surface: Box<dyn OverlaySurface>,
    pub geolocator: Box<dyn Geolocator>,
    pub ui: Box<dyn UiSink>,
}

// Non-send resources: browser handles are tied to the main thread.
pub struct CameraDevice(pub Box<dyn CameraHost>);
pub struct OverlayCanvas(pub Box<dyn OverlaySurface>);
pub struct GeolocationDevice(pub Box<dyn Geolocator>);
pub struct UiDevice(pub Box<dyn UiSink>);

/// Stand-in for hosts without a page: no camera, no positioning, nothing drawn.
#[cfg(not(target_arch = "wasm32"))]
pub mod headless {
    use super::*;
    use crate::engine::capture::camera::{CaptureSignal, StreamConstraints};
    use crate::engine::capture::error::CaptureError;
    use crate::engine::core::signals::SignalSender;
    use crate::engine::location::gate::LocationSignal;

    pub fn platform() -> HostPlatform {
        HostPlatform {
            camera: Box::new(NoCamera),
            surface: Box::new(NoSurface),
            geolocator: Box::new(NoGeolocator),
            ui: Box::new(NoUi),
        }
    }

    struct NoCamera;

    impl CameraHost for NoCamera {
        fn is_supported(&self) -> bool {
            false
        }

        fn request_stream(
            &mut self,
            _constraints: &StreamConstraints,
            _signals: SignalSender<CaptureSignal>,
        ) {
        }

        fn bind_stream(&mut self, _signals: SignalSender<CaptureSignal>) -> Result<(), CaptureError> {
            Err(CaptureError::VideoElementMissing)
        }

        fn start_playback(&mut self, _signals: SignalSender<CaptureSignal>) {}

        fn has_enough_data(&self) -> bool {
            false
        }
    }

    struct NoSurface;

    impl OverlaySurface for NoSurface {
        fn resize(&mut self, _width: u32, _height: u32) {}

        fn size(&self) -> (f64, f64) {
            (0.0, 0.0)
        }

        fn clear(&mut self) {}

        fn stroke_line(&mut self, _from: (f64, f64), _to: (f64, f64), _line_width: f64, _colour: &str) {
        }

        fn fill_rect(&mut self, _x: f64, _y: f64, _width: f64, _height: f64, _colour: &str) {}
    }

    struct NoGeolocator;

    impl Geolocator for NoGeolocator {
        fn is_available(&self) -> bool {
            false
        }

        fn request_position(&mut self, _signals: SignalSender<LocationSignal>) {}
    }

    struct NoUi;

    impl UiSink for NoUi {
        fn set_status(&mut self, _message: &str) {}
        fn set_scenario_info(&mut self, _text: &str) {}
        fn show_notice(&mut self, _message: &str) {}
        fn set_info_panel_visible(&mut self, _visible: bool) {}
    }
}
