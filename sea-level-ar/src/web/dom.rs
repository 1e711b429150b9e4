use bevy::prelude::*;
use wasm_bindgen::prelude::*;
use web_sys::{Document, Element, HtmlSelectElement, Window};

use crate::engine::core::host::UiSink;
use crate::engine::core::signals::SignalSender;
use crate::engine::overlay::scenario::UiSignal;
use crate::web::{HostError, js_error_message};
use constants::dom::{
    CLOSE_INFO_ID, HIDDEN_CLASS, INFO_BUTTON_ID, INFO_PANEL_ID, SCENARIO_INFO_ID,
    SCENARIO_SELECT_ID, STATUS_ELEMENT_ID,
};

/// Status line, scenario text, info panel and alerts.
pub struct DomUi {
    window: Window,
    document: Document,
    status: Option<Element>,
    scenario_info: Option<Element>,
    info_panel: Option<Element>,
}

impl DomUi {
    pub fn new(window: Window, document: &Document) -> Self {
        Self {
            window,
            document: document.clone(),
            status: document.get_element_by_id(STATUS_ELEMENT_ID),
            scenario_info: document.get_element_by_id(SCENARIO_INFO_ID),
            info_panel: document.get_element_by_id(INFO_PANEL_ID),
        }
    }

    /// Wire the scenario selector and info buttons to `signals`.
    pub fn attach_controls(&self, signals: SignalSender<UiSignal>) -> Result<(), HostError> {
        if let Some(select) = self
            .document
            .get_element_by_id(SCENARIO_SELECT_ID)
            .and_then(|element| element.dyn_into::<HtmlSelectElement>().ok())
        {
            let sender = signals.clone();
            let select_handle = select.clone();
            let on_change = Closure::<dyn FnMut()>::wrap(Box::new(move || {
                sender.send(UiSignal::ScenarioSelected(select_handle.value()));
            }));
            select
                .add_event_listener_with_callback("change", on_change.as_ref().unchecked_ref())
                .map_err(|e| HostError::Js(js_error_message(&e)))?;
            on_change.forget();
        } else {
            warn!("#{SCENARIO_SELECT_ID} not found, scenario selection disabled");
        }

        for (id, visible) in [(INFO_BUTTON_ID, true), (CLOSE_INFO_ID, false)] {
            let Some(button) = self.document.get_element_by_id(id) else {
                warn!("#{id} not found");
                continue;
            };
            let sender = signals.clone();
            let on_click = Closure::<dyn FnMut()>::wrap(Box::new(move || {
                sender.send(UiSignal::InfoPanel(visible));
            }));
            button
                .add_event_listener_with_callback("click", on_click.as_ref().unchecked_ref())
                .map_err(|e| HostError::Js(js_error_message(&e)))?;
            on_click.forget();
        }

        Ok(())
    }
}

impl UiSink for DomUi {
    fn set_status(&mut self, message: &str) {
        if let Some(status) = &self.status {
            status.set_text_content(Some(message));
        }
    }

    fn set_scenario_info(&mut self, text: &str) {
        if let Some(info) = &self.scenario_info {
            info.set_text_content(Some(text));
        }
    }

    fn show_notice(&mut self, message: &str) {
        if let Err(e) = self.window.alert_with_message(message) {
            error!("Failed to show notice: {}", js_error_message(&e));
        }
    }

    fn set_info_panel_visible(&mut self, visible: bool) {
        let Some(panel) = &self.info_panel else {
            return;
        };
        let classes = panel.class_list();
        let result = if visible {
            classes.remove_1(HIDDEN_CLASS)
        } else {
            classes.add_1(HIDDEN_CLASS)
        };
        if let Err(e) = result {
            error!("Failed to toggle info panel: {}", js_error_message(&e));
        }
    }
}
