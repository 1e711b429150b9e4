//! Browser bindings for the host capability traits.
//!
//! Compiled for `wasm32` only. Every element lookup is optional: a page
//! missing the canvas or status line still runs, with those outputs
//! silently dropped.

use thiserror::Error;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, Window};

use crate::engine::core::host::HostPlatform;
use crate::engine::core::signals::SignalSender;
use crate::engine::overlay::scenario::UiSignal;

pub mod camera;
pub mod canvas;
pub mod dom;
pub mod frame_runner;
pub mod geolocation;

#[derive(Debug, Error)]
pub enum HostError {
    #[error("window object not available")]
    NoWindow,

    #[error("document not available")]
    NoDocument,

    #[error("JavaScript error: {0}")]
    Js(String),
}

/// Best-effort readable text for a thrown JavaScript value.
pub fn js_error_message(value: &JsValue) -> String {
    if let Some(error) = value.dyn_ref::<js_sys::Error>() {
        return String::from(error.message());
    }
    if let Some(text) = value.as_string() {
        return text;
    }
    js_sys::Reflect::get(value, &JsValue::from_str("message"))
        .ok()
        .and_then(|message| message.as_string())
        .unwrap_or_else(|| format!("{value:?}"))
}

pub fn window_and_document() -> Result<(Window, Document), HostError> {
    let window = web_sys::window().ok_or(HostError::NoWindow)?;
    let document = window.document().ok_or(HostError::NoDocument)?;
    Ok((window, document))
}

/// Look up the page elements and wrap them as the app's host platform.
///
/// `ui_signals` receives selector and info-panel input from the page.
pub fn connect(ui_signals: SignalSender<UiSignal>) -> Result<HostPlatform, HostError> {
    let (window, document) = window_and_document()?;

    let ui = dom::DomUi::new(window.clone(), &document);
    ui.attach_controls(ui_signals)?;

    Ok(HostPlatform {
        camera: Box::new(camera::BrowserCamera::new(window.clone(), &document)),
        surface: Box::new(canvas::CanvasSurface::new(&document)),
        geolocator: Box::new(geolocation::BrowserGeolocator::new(window)),
        ui: Box::new(ui),
    })
}
