//! Headless app with recording fakes in place of the browser.

use std::cell::RefCell;
use std::rc::Rc;

use bevy::prelude::*;

use crate::engine::capture::camera::{CameraHost, CaptureSignal, StreamConstraints};
use crate::engine::capture::error::CaptureError;
use crate::engine::core::app_setup::configure_app;
use crate::engine::core::app_state::CaptureState;
use crate::engine::core::host::{HostPlatform, UiSink};
use crate::engine::core::signals::{SignalQueue, SignalSender};
use crate::engine::location::gate::{Geolocator, LocationSignal};
use crate::engine::overlay::render::OverlaySurface;
use crate::engine::overlay::scenario::UiSignal;
use crate::engine::overlay::sea_level::SeaLevel;
use crate::rpc::web_rpc::{
    IncomingRpcMessage, RpcNotification, WebRpcInterface, send_outgoing_messages,
};

#[derive(Debug, Default)]
pub struct CameraLog {
    pub supported: bool,
    pub fail_bind: bool,
    pub has_enough_data: bool,
    pub requests: Vec<StreamConstraints>,
    pub binds: usize,
    pub playbacks: usize,
}

struct FakeCamera(Rc<RefCell<CameraLog>>);

impl CameraHost for FakeCamera {
    fn is_supported(&self) -> bool {
        self.0.borrow().supported
    }

    fn request_stream(
        &mut self,
        constraints: &StreamConstraints,
        _signals: SignalSender<CaptureSignal>,
    ) {
        self.0.borrow_mut().requests.push(constraints.clone());
    }

    fn bind_stream(&mut self, _signals: SignalSender<CaptureSignal>) -> Result<(), CaptureError> {
        let mut log = self.0.borrow_mut();
        if log.fail_bind {
            return Err(CaptureError::VideoElementMissing);
        }
        log.binds += 1;
        Ok(())
    }

    fn start_playback(&mut self, _signals: SignalSender<CaptureSignal>) {
        self.0.borrow_mut().playbacks += 1;
    }

    fn has_enough_data(&self) -> bool {
        self.0.borrow().has_enough_data
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum DrawOp {
    Resize(u32, u32),
    Clear,
    Line {
        from: (f64, f64),
        to: (f64, f64),
        width: f64,
        colour: String,
    },
    Fill {
        x: f64,
        y: f64,
        width: f64,
        height: f64,
        colour: String,
    },
}

#[derive(Debug, Default)]
pub struct SurfaceLog {
    pub size: (f64, f64),
    pub ops: Vec<DrawOp>,
}

impl SurfaceLog {
    pub fn lines(&self) -> Vec<&DrawOp> {
        self.ops
            .iter()
            .filter(|op| matches!(op, DrawOp::Line { .. }))
            .collect()
    }
}

struct FakeSurface(Rc<RefCell<SurfaceLog>>);

impl OverlaySurface for FakeSurface {
    fn resize(&mut self, width: u32, height: u32) {
        let mut log = self.0.borrow_mut();
        log.size = (f64::from(width), f64::from(height));
        log.ops.push(DrawOp::Resize(width, height));
    }

    fn size(&self) -> (f64, f64) {
        self.0.borrow().size
    }

    fn clear(&mut self) {
        self.0.borrow_mut().ops.push(DrawOp::Clear);
    }

    fn stroke_line(&mut self, from: (f64, f64), to: (f64, f64), line_width: f64, colour: &str) {
        self.0.borrow_mut().ops.push(DrawOp::Line {
            from,
            to,
            width: line_width,
            colour: colour.to_string(),
        });
    }

    fn fill_rect(&mut self, x: f64, y: f64, width: f64, height: f64, colour: &str) {
        self.0.borrow_mut().ops.push(DrawOp::Fill {
            x,
            y,
            width,
            height,
            colour: colour.to_string(),
        });
    }
}

#[derive(Debug, Default)]
pub struct GeoLog {
    pub available: bool,
    pub requests: usize,
}

struct FakeGeolocator(Rc<RefCell<GeoLog>>);

impl Geolocator for FakeGeolocator {
    fn is_available(&self) -> bool {
        self.0.borrow().available
    }

    fn request_position(&mut self, _signals: SignalSender<LocationSignal>) {
        self.0.borrow_mut().requests += 1;
    }
}

#[derive(Debug, Default)]
pub struct UiLog {
    pub statuses: Vec<String>,
    pub scenario_info: Vec<String>,
    pub notices: Vec<String>,
    pub info_panel: Vec<bool>,
}

struct FakeUi(Rc<RefCell<UiLog>>);

impl UiSink for FakeUi {
    fn set_status(&mut self, message: &str) {
        self.0.borrow_mut().statuses.push(message.to_string());
    }

    fn set_scenario_info(&mut self, text: &str) {
        self.0.borrow_mut().scenario_info.push(text.to_string());
    }

    fn show_notice(&mut self, message: &str) {
        self.0.borrow_mut().notices.push(message.to_string());
    }

    fn set_info_panel_visible(&mut self, visible: bool) {
        self.0.borrow_mut().info_panel.push(visible);
    }
}

/// Notifications that left for the host page, in send order.
#[derive(Resource, Default)]
pub struct SentNotifications(pub Vec<RpcNotification>);

fn record_notifications(
    rpc_interface: Res<WebRpcInterface>,
    mut sent: ResMut<SentNotifications>,
) {
    sent.0.extend(rpc_interface.pending_notifications().iter().cloned());
}

/// Overlay app driven frame by frame, with every host call recorded.
pub struct TestAr {
    pub app: App,
    pub camera: Rc<RefCell<CameraLog>>,
    pub surface: Rc<RefCell<SurfaceLog>>,
    pub geo: Rc<RefCell<GeoLog>>,
    pub ui: Rc<RefCell<UiLog>>,
}

impl TestAr {
    /// Camera supported and buffering, positioning unavailable.
    pub fn new() -> Self {
        Self::with_host(true, false)
    }

    pub fn with_host(camera_supported: bool, geolocation_available: bool) -> Self {
        let camera = Rc::new(RefCell::new(CameraLog {
            supported: camera_supported,
            has_enough_data: true,
            ..Default::default()
        }));
        let surface = Rc::new(RefCell::new(SurfaceLog::default()));
        let geo = Rc::new(RefCell::new(GeoLog {
            available: geolocation_available,
            requests: 0,
        }));
        let ui = Rc::new(RefCell::new(UiLog::default()));

        let mut app = App::new();
        configure_app(
            &mut app,
            HostPlatform {
                camera: Box::new(FakeCamera(camera.clone())),
                surface: Box::new(FakeSurface(surface.clone())),
                geolocator: Box::new(FakeGeolocator(geo.clone())),
                ui: Box::new(FakeUi(ui.clone())),
            },
        );
        app.init_resource::<SentNotifications>().add_systems(
            Last,
            record_notifications.before(send_outgoing_messages),
        );

        Self {
            app,
            camera,
            surface,
            geo,
            ui,
        }
    }

    pub fn tick(&mut self) {
        self.app.update();
    }

    pub fn tick_n(&mut self, frames: usize) {
        for _ in 0..frames {
            self.app.update();
        }
    }

    pub fn send_capture(&mut self, signal: CaptureSignal) {
        self.app
            .world()
            .resource::<SignalQueue<CaptureSignal>>()
            .sender()
            .send(signal);
    }

    pub fn send_ui(&mut self, signal: UiSignal) {
        self.app
            .world()
            .resource::<SignalQueue<UiSignal>>()
            .sender()
            .send(signal);
    }

    pub fn send_location(&mut self, signal: LocationSignal) {
        self.app
            .world()
            .resource::<SignalQueue<LocationSignal>>()
            .sender()
            .send(signal);
    }

    pub fn send_rpc(&mut self, request: serde_json::Value) {
        self.app
            .world()
            .resource::<SignalQueue<IncomingRpcMessage>>()
            .sender()
            .send(IncomingRpcMessage {
                content: request.to_string(),
            });
    }

    pub fn state(&self) -> CaptureState {
        *self.app.world().resource::<State<CaptureState>>().get()
    }

    pub fn sea_level(&self) -> f64 {
        self.app.world().resource::<SeaLevel>().level()
    }

    /// Params of every sent notification named `method`.
    pub fn notifications(&self, method: &str) -> Vec<serde_json::Value> {
        self.resource::<SentNotifications>()
            .0
            .iter()
            .filter(|notification| notification.method == method)
            .map(|notification| notification.params.clone())
            .collect()
    }

    pub fn resource<R: Resource>(&self) -> &R {
        self.app.world().resource::<R>()
    }

    /// Walk the capture pipeline to `Rendering` with a `width`x`height` video.
    pub fn start_rendering(&mut self, width: u32, height: u32) {
        self.tick();
        self.send_capture(CaptureSignal::StreamGranted);
        self.tick();
        self.tick();
        self.send_capture(CaptureSignal::MetadataLoaded);
        self.tick();
        self.send_capture(CaptureSignal::PlaybackStarted { width, height });
        self.tick();
        self.tick();
        assert_eq!(self.state(), CaptureState::Rendering);
    }
}
