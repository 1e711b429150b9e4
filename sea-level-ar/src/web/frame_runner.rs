use std::cell::RefCell;
use std::rc::Rc;

use bevy::app::PluginsState;
use bevy::prelude::*;
use wasm_bindgen::prelude::*;

type FrameCallback = Closure<dyn FnMut(f64)>;

/// Bevy runner that ticks the app once per display refresh.
///
/// Every frame is rescheduled unconditionally; the loop ends only when the
/// app requests exit. Returns immediately, the browser owns the loop.
pub fn animation_frame_runner(mut app: App) -> AppExit {
    if app.plugins_state() != PluginsState::Cleaned {
        app.finish();
        app.cleanup();
    }

    let app = Rc::new(RefCell::new(app));
    let callback: Rc<RefCell<Option<FrameCallback>>> = Rc::new(RefCell::new(None));
    let reschedule = callback.clone();

    *callback.borrow_mut() = Some(Closure::wrap(Box::new(move |_timestamp: f64| {
        let mut app = app.borrow_mut();
        app.update();

        if let Some(exit) = app.should_exit() {
            info!("Frame loop finished: {exit:?}");
            return;
        }

        if let Some(next) = reschedule.borrow().as_ref() {
            request_frame(next);
        }
    }) as Box<dyn FnMut(f64)>));

    if let Some(first) = callback.borrow().as_ref() {
        request_frame(first);
    }

    AppExit::Success
}

fn request_frame(callback: &FrameCallback) {
    let Some(window) = web_sys::window() else {
        error!("Window object not available, frame loop halted");
        return;
    };
    if let Err(e) = window.request_animation_frame(callback.as_ref().unchecked_ref()) {
        error!("requestAnimationFrame failed: {e:?}");
    }
}
