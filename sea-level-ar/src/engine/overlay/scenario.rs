use bevy::prelude::*;

use crate::engine::core::host::UiDevice;
use crate::engine::overlay::sea_level::SeaLevel;

/// Input from page controls.
#[derive(Event, Debug, Clone, PartialEq)]
pub enum UiSignal {
    /// Raw selector value, e.g. `"1.0"`.
    ScenarioSelected(String),
    InfoPanel(bool),
}

/// Description shown under the selector; empty for unknown keys.
pub fn scenario_info(key: &str) -> &'static str {
    match key {
        "0.5" => "0.5m rise: moderate impact on the coastline, possible beach erosion.",
        "1.0" => "1.0m rise: significant flooding of low-lying areas, risk to coastal structures.",
        "2.0" => "2.0m rise: severe impact, large coastal areas submerged, relocation needed.",
        _ => "",
    }
}

/// Selector value in metres; `inf` and `NaN` are rejected like any other junk.
pub fn parse_scenario_level(key: &str) -> Option<f64> {
    key.trim()
        .parse::<f64>()
        .ok()
        .filter(|level| level.is_finite())
}

/// Apply selector and info-panel input.
///
/// An unparsable scenario keeps the current level but still replaces the
/// info text.
pub fn handle_ui_signals(
    mut signals: EventReader<UiSignal>,
    mut sea_level: ResMut<SeaLevel>,
    mut ui: NonSendMut<UiDevice>,
) {
    for signal in signals.read() {
        match signal {
            UiSignal::ScenarioSelected(key) => {
                match parse_scenario_level(key) {
                    Some(level) => {
                        sea_level.set_level(level);
                        info!("Sea level rise set to {level}m");
                    }
                    None => warn!("Ignoring unparsable scenario value {key:?}"),
                }
                ui.0.set_scenario_info(scenario_info(key));
            }
            UiSignal::InfoPanel(visible) => ui.0.set_info_panel_visible(*visible),
        }
    }
}
