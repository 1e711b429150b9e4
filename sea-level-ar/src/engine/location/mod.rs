//! Location gate: one position fix at startup, compared against the
//! reference town to decide whether to warn about demonstration mode.

use bevy::prelude::*;

use crate::engine::core::app_setup::ArSystems;
use crate::engine::core::signals::{SignalQueue, forward_signals};

pub mod gate;
pub mod haversine;

use gate::{
    LocationGate, LocationSettings, LocationSignal, handle_location_signals, request_position,
};

pub struct LocationGatePlugin;

impl Plugin for LocationGatePlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<LocationSettings>()
            .init_resource::<LocationGate>()
            .init_resource::<SignalQueue<LocationSignal>>()
            .add_event::<LocationSignal>()
            .add_systems(Startup, request_position)
            .add_systems(PreUpdate, forward_signals::<LocationSignal>)
            .add_systems(Update, handle_location_signals.in_set(ArSystems::Input));
    }
}
