use std::cell::RefCell;
use std::rc::Rc;

use bevy::prelude::*;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::{JsFuture, spawn_local};
use web_sys::{Document, Event, HtmlVideoElement, MediaStream, MediaStreamConstraints, Window};

use crate::engine::capture::camera::{CameraHost, CaptureSignal, StreamConstraints};
use crate::engine::capture::error::CaptureError;
use crate::engine::core::signals::SignalSender;
use crate::web::js_error_message;
use constants::camera::HAVE_ENOUGH_DATA;
use constants::dom::VIDEO_ELEMENT_ID;

/// `navigator.mediaDevices` camera bound to the page's video element.
pub struct BrowserCamera {
    window: Window,
    video: Option<HtmlVideoElement>,
    /// Filled by the `getUserMedia` task once the user grants access.
    stream: Rc<RefCell<Option<MediaStream>>>,
}

impl BrowserCamera {
    pub fn new(window: Window, document: &Document) -> Self {
        let video = document
            .get_element_by_id(VIDEO_ELEMENT_ID)
            .and_then(|element| element.dyn_into::<HtmlVideoElement>().ok());
        Self {
            window,
            video,
            stream: Rc::new(RefCell::new(None)),
        }
    }

    fn media_devices(&self) -> Option<web_sys::MediaDevices> {
        let navigator = self.window.navigator();
        let devices = js_sys::Reflect::get(&navigator, &JsValue::from_str("mediaDevices")).ok()?;
        if devices.is_undefined() || devices.is_null() {
            return None;
        }
        let get_user_media =
            js_sys::Reflect::get(&devices, &JsValue::from_str("getUserMedia")).ok()?;
        if !get_user_media.is_function() {
            return None;
        }
        Some(devices.unchecked_into())
    }
}

fn build_constraints(constraints: &StreamConstraints) -> Result<MediaStreamConstraints, String> {
    let json = serde_json::to_string(constraints).map_err(|e| e.to_string())?;
    let value = js_sys::JSON::parse(&json).map_err(|e| js_error_message(&e))?;
    Ok(value.unchecked_into())
}

impl CameraHost for BrowserCamera {
    fn is_supported(&self) -> bool {
        self.media_devices().is_some()
    }

    fn request_stream(
        &mut self,
        constraints: &StreamConstraints,
        signals: SignalSender<CaptureSignal>,
    ) {
        let Some(devices) = self.media_devices() else {
            signals.send(CaptureSignal::StreamFailed(
                CaptureError::Unsupported.to_string(),
            ));
            return;
        };

        let request = build_constraints(constraints).and_then(|constraints| {
            devices
                .get_user_media_with_constraints(&constraints)
                .map_err(|e| js_error_message(&e))
        });
        let promise = match request {
            Ok(promise) => promise,
            Err(message) => {
                signals.send(CaptureSignal::StreamFailed(message));
                return;
            }
        };

        let stream_slot = self.stream.clone();
        spawn_local(async move {
            match JsFuture::from(promise).await {
                Ok(stream) => {
                    *stream_slot.borrow_mut() = Some(stream.unchecked_into::<MediaStream>());
                    signals.send(CaptureSignal::StreamGranted);
                }
                Err(e) => {
                    let name = js_sys::Reflect::get(&e, &JsValue::from_str("name"))
                        .ok()
                        .and_then(|name| name.as_string())
                        .unwrap_or_default();
                    let message = js_error_message(&e);
                    error!("getUserMedia rejected: {name} {message}");
                    signals.send(CaptureSignal::StreamFailed(message));
                }
            }
        });
    }

    fn bind_stream(&mut self, signals: SignalSender<CaptureSignal>) -> Result<(), CaptureError> {
        let video = self.video.as_ref().ok_or(CaptureError::VideoElementMissing)?;
        let stream = self.stream.borrow();
        video.set_src_object((*stream).as_ref());

        let error_signals = signals.clone();
        let on_error = Closure::<dyn FnMut(Event)>::wrap(Box::new(move |event: Event| {
            error_signals.send(CaptureSignal::VideoError(event.type_()));
        }));
        video.set_onerror(Some(on_error.as_ref().unchecked_ref()));
        on_error.forget();

        let on_metadata = Closure::<dyn FnMut()>::wrap(Box::new(move || {
            signals.send(CaptureSignal::MetadataLoaded);
        }));
        video.set_onloadedmetadata(Some(on_metadata.as_ref().unchecked_ref()));
        on_metadata.forget();

        Ok(())
    }

    fn start_playback(&mut self, signals: SignalSender<CaptureSignal>) {
        let Some(video) = self.video.clone() else {
            signals.send(CaptureSignal::PlaybackFailed(
                CaptureError::VideoElementMissing.to_string(),
            ));
            return;
        };

        let promise = match video.play() {
            Ok(promise) => promise,
            Err(e) => {
                signals.send(CaptureSignal::PlaybackFailed(js_error_message(&e)));
                return;
            }
        };

        spawn_local(async move {
            match JsFuture::from(promise).await {
                Ok(_) => signals.send(CaptureSignal::PlaybackStarted {
                    width: video.video_width(),
                    height: video.video_height(),
                }),
                Err(e) => signals.send(CaptureSignal::PlaybackFailed(js_error_message(&e))),
            }
        });
    }

    fn has_enough_data(&self) -> bool {
        self.video
            .as_ref()
            .is_some_and(|video| video.ready_state() == HAVE_ENOUGH_DATA)
    }
}
