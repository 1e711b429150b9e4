use bevy::log::LogPlugin;
use bevy::prelude::*;

use crate::engine::core::app_setup::configure_app;

mod engine;
mod rpc;
#[cfg(target_arch = "wasm32")]
mod web;

#[cfg(test)]
mod test_harness;

fn main() {
    let mut app = App::new();
    app.add_plugins(LogPlugin::default());

    #[cfg(target_arch = "wasm32")]
    {
        use crate::engine::core::signals::SignalQueue;
        use crate::engine::overlay::scenario::UiSignal;

        // Page controls need a sender before the app owns the queue.
        let ui_signals = SignalQueue::<UiSignal>::default();
        match web::connect(ui_signals.sender()) {
            Ok(host) => {
                configure_app(&mut app, host)
                    .insert_resource(ui_signals)
                    .set_runner(web::frame_runner::animation_frame_runner);
                app.run();
            }
            Err(e) => error!("Unable to attach to the page: {e}"),
        }
    }

    #[cfg(not(target_arch = "wasm32"))]
    {
        use bevy::app::ScheduleRunnerPlugin;

        use crate::engine::core::host::headless;

        info!("No browser host; running a single headless frame");
        configure_app(&mut app, headless::platform())
            .add_plugins(ScheduleRunnerPlugin::run_once());
        app.run();
    }
}
