use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::engine::capture::pipeline::StopOverlay;
use crate::engine::core::app_setup::ArSystems;
use crate::engine::core::app_state::CaptureState;
use crate::engine::core::signals::{SignalQueue, forward_signals};
use crate::engine::core::status::ArStatus;
use crate::engine::location::gate::{LocationSettings, LocationSettingsPatch};
use crate::engine::overlay::geometry::{OverlaySettings, OverlaySettingsPatch};
use crate::engine::overlay::render::OverlayStats;
use crate::engine::overlay::scenario::{UiSignal, handle_ui_signals};
use crate::engine::overlay::sea_level::SeaLevel;

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::JsValue;

#[cfg(target_arch = "wasm32")]
use web_sys::{MessageEvent, window};

/// JSON-RPC 2.0 request structure.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct RpcRequest {
    pub jsonrpc: String,
    pub method: String,
    #[serde(default)]
    pub params: serde_json::Value,
    pub id: Option<serde_json::Value>,
}

/// JSON-RPC 2.0 response structure.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct RpcResponse {
    pub jsonrpc: String,
    pub result: Option<serde_json::Value>,
    pub error: Option<RpcError>,
    pub id: Option<serde_json::Value>,
}

/// JSON-RPC 2.0 notification structure for one-way communication.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct RpcNotification {
    pub jsonrpc: String,
    pub method: String,
    pub params: serde_json::Value,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct RpcError {
    pub code: i32,
    pub message: String,
    pub data: Option<serde_json::Value>,
}

impl RpcError {
    pub fn invalid_request(message: &str) -> Self {
        Self {
            code: -32600,
            message: message.to_string(),
            data: None,
        }
    }

    pub fn method_not_found(method: &str) -> Self {
        Self {
            code: -32601,
            message: "Method not found".to_string(),
            data: Some(serde_json::json!({ "method": method })),
        }
    }

    pub fn invalid_params(message: &str) -> Self {
        Self {
            code: -32602,
            message: message.to_string(),
            data: None,
        }
    }
}

/// Outgoing messages waiting for the end of the frame.
#[derive(Resource, Default)]
pub struct WebRpcInterface {
    outgoing_notifications: Vec<RpcNotification>,
    outgoing_responses: Vec<RpcResponse>,
}

impl WebRpcInterface {
    /// Send notification to the host page without expecting a response.
    pub fn send_notification(&mut self, method: &str, params: serde_json::Value) {
        self.outgoing_notifications.push(RpcNotification {
            jsonrpc: "2.0".to_string(),
            method: method.to_string(),
            params,
        });
    }

    fn queue_response(&mut self, response: RpcResponse) {
        self.outgoing_responses.push(response);
    }

    #[cfg(test)]
    pub fn pending_notifications(&self) -> &[RpcNotification] {
        &self.outgoing_notifications
    }
}

/// Raw message received through `postMessage`.
#[derive(Event, Debug, Clone)]
pub struct IncomingRpcMessage {
    pub content: String,
}

pub struct WebRpcPlugin;

impl Plugin for WebRpcPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<WebRpcInterface>()
            .init_resource::<SignalQueue<IncomingRpcMessage>>()
            .add_event::<IncomingRpcMessage>()
            .add_systems(PreUpdate, forward_signals::<IncomingRpcMessage>)
            .add_systems(
                Update,
                handle_rpc_messages
                    .in_set(ArSystems::Input)
                    .before(handle_ui_signals),
            )
            .add_systems(Last, send_outgoing_messages);

        #[cfg(target_arch = "wasm32")]
        app.add_systems(Startup, setup_message_listener);
    }
}

#[cfg(target_arch = "wasm32")]
fn setup_message_listener(queue: Res<SignalQueue<IncomingRpcMessage>>) {
    let sender = queue.sender();

    let closure = Closure::wrap(Box::new(move |event: MessageEvent| {
        // Only string payloads that look like JSON-RPC are queued.
        if let Ok(data) = event.data().dyn_into::<js_sys::JsString>() {
            let content: String = data.into();
            if content.contains("jsonrpc") {
                sender.send(IncomingRpcMessage { content });
            }
        }
    }) as Box<dyn FnMut(MessageEvent)>);

    let Some(window) = window() else {
        error!("Window object not available, RPC bridge disabled");
        return;
    };
    if let Err(e) =
        window.add_event_listener_with_callback("message", closure.as_ref().unchecked_ref())
    {
        error!("Failed to register message listener: {:?}", e);
        return;
    }

    // Listener lives for the page session.
    closure.forget();
}

/// Resources an RPC request may read or change.
pub struct RpcContext<'a> {
    pub sea_level: &'a mut SeaLevel,
    pub settings: &'a mut OverlaySettings,
    pub location: &'a mut LocationSettings,
    pub status: &'a str,
    pub state: CaptureState,
    pub stats: OverlayStats,
    /// Selector input to replay through the UI path.
    pub ui_signals: Vec<UiSignal>,
    pub stop_requested: bool,
}

fn handle_rpc_messages(
    mut events: EventReader<IncomingRpcMessage>,
    mut sea_level: ResMut<SeaLevel>,
    mut settings: ResMut<OverlaySettings>,
    mut location: ResMut<LocationSettings>,
    status: Res<ArStatus>,
    state: Res<State<CaptureState>>,
    stats: Res<OverlayStats>,
    mut ui_signals: EventWriter<UiSignal>,
    mut stop_requests: EventWriter<StopOverlay>,
    mut rpc_interface: ResMut<WebRpcInterface>,
) {
    for event in events.read() {
        let request = match serde_json::from_str::<RpcRequest>(&event.content) {
            Ok(request) => request,
            Err(parse_error) => {
                warn!("Discarding malformed RPC message: {parse_error}");
                continue;
            }
        };
        debug!("Processing RPC method: {}", request.method);

        let mut context = RpcContext {
            sea_level: &mut sea_level,
            settings: &mut settings,
            location: &mut location,
            status: status.message(),
            state: *state.get(),
            stats: *stats,
            ui_signals: Vec::new(),
            stop_requested: false,
        };

        let response = handle_rpc_request(&request, &mut context);

        for signal in context.ui_signals {
            ui_signals.write(signal);
        }
        if context.stop_requested {
            stop_requests.write(StopOverlay);
        }
        if let Some(response) = response {
            rpc_interface.queue_response(response);
        }
    }
}

/// Apply one request. Returns a response only for requests carrying an id.
pub fn handle_rpc_request(request: &RpcRequest, context: &mut RpcContext) -> Option<RpcResponse> {
    let result = if request.jsonrpc != "2.0" {
        Err(RpcError::invalid_request("Expected jsonrpc \"2.0\""))
    } else {
        match request.method.as_str() {
            "set_scenario" => handle_set_scenario(&request.params, context),
            "set_sea_level" => handle_set_sea_level(&request.params, context),
            "get_state" => Ok(handle_get_state(context)),
            "set_overlay_settings" => handle_set_overlay_settings(&request.params, context),
            "set_location_settings" => handle_set_location_settings(&request.params, context),
            "stop_overlay" => {
                context.stop_requested = true;
                Ok(serde_json::json!({ "success": true }))
            }
            _ => {
                warn!("Unknown RPC method: {}", request.method);
                Err(RpcError::method_not_found(&request.method))
            }
        }
    };

    let id = request.id.clone()?;

    Some(match result {
        Ok(result_value) => RpcResponse {
            jsonrpc: "2.0".to_string(),
            result: Some(result_value),
            error: None,
            id: Some(id),
        },
        Err(error) => RpcResponse {
            jsonrpc: "2.0".to_string(),
            result: None,
            error: Some(error),
            id: Some(id),
        },
    })
}

fn handle_set_scenario(
    params: &serde_json::Value,
    context: &mut RpcContext,
) -> Result<serde_json::Value, RpcError> {
    #[derive(Deserialize)]
    struct ScenarioParams {
        scenario: String,
    }

    let scenario_params = serde_json::from_value::<ScenarioParams>(params.clone())
        .map_err(|_| RpcError::invalid_params("Expected 'scenario' parameter"))?;

    context
        .ui_signals
        .push(UiSignal::ScenarioSelected(scenario_params.scenario.clone()));

    Ok(serde_json::json!({
        "success": true,
        "scenario": scenario_params.scenario
    }))
}

fn handle_set_sea_level(
    params: &serde_json::Value,
    context: &mut RpcContext,
) -> Result<serde_json::Value, RpcError> {
    #[derive(Deserialize)]
    struct LevelParams {
        level: f64,
    }

    let level_params = serde_json::from_value::<LevelParams>(params.clone())
        .map_err(|_| RpcError::invalid_params("Expected numeric 'level' parameter"))?;

    if !level_params.level.is_finite() {
        return Err(RpcError::invalid_params("'level' must be finite"));
    }

    context.sea_level.set_level(level_params.level);
    info!("Sea level rise set to {}m via RPC", level_params.level);

    Ok(serde_json::json!({
        "success": true,
        "level": context.sea_level.level()
    }))
}

fn handle_get_state(context: &RpcContext) -> serde_json::Value {
    serde_json::json!({
        "level": context.sea_level.level(),
        "status": context.status,
        "state": context.state.as_str(),
        "frames_drawn": context.stats.frames_drawn,
        "frames_skipped": context.stats.frames_skipped,
        "settings": &*context.settings,
        "location": &*context.location,
    })
}

fn handle_set_overlay_settings(
    params: &serde_json::Value,
    context: &mut RpcContext,
) -> Result<serde_json::Value, RpcError> {
    let patch = serde_json::from_value::<OverlaySettingsPatch>(params.clone())
        .map_err(|e| RpcError::invalid_params(&format!("Invalid overlay settings: {e}")))?;

    context.settings.apply(patch);

    serde_json::to_value(&*context.settings)
        .map_err(|e| RpcError::invalid_params(&format!("Unserialisable settings: {e}")))
}

fn handle_set_location_settings(
    params: &serde_json::Value,
    context: &mut RpcContext,
) -> Result<serde_json::Value, RpcError> {
    let patch = serde_json::from_value::<LocationSettingsPatch>(params.clone())
        .map_err(|e| RpcError::invalid_params(&format!("Invalid location settings: {e}")))?;
    patch
        .validate()
        .map_err(|message| RpcError::invalid_params(&message))?;

    context.location.apply(patch);
    info!(
        "Location reference set to {} within {} km",
        context.location.reference_name, context.location.demo_radius_km
    );

    serde_json::to_value(&*context.location)
        .map_err(|e| RpcError::invalid_params(&format!("Unserialisable settings: {e}")))
}

/// Send queued notifications and responses to the host page.
pub(crate) fn send_outgoing_messages(mut rpc_interface: ResMut<WebRpcInterface>) {
    // Notifications first, then responses, to keep ordering stable.
    for notification in rpc_interface.outgoing_notifications.drain(..) {
        send_message_to_parent(&notification);
    }

    for response in rpc_interface.outgoing_responses.drain(..) {
        send_message_to_parent(&response);
    }
}

fn send_message_to_parent<T: Serialize>(message: &T) {
    #[cfg(target_arch = "wasm32")]
    {
        match serde_json::to_string(message) {
            Ok(json) => {
                if let Some(window) = window() {
                    if let Some(parent) = window.parent().ok().flatten() {
                        if let Err(e) = parent.post_message(&JsValue::from_str(&json), "*") {
                            error!("Failed to send message to parent: {:?}", e);
                        }
                    } else {
                        debug!("No parent window available for message transmission");
                    }
                } else {
                    error!("Window object not available");
                }
            }
            Err(e) => {
                error!("Failed to serialize message: {}", e);
            }
        }
    }

    #[cfg(not(target_arch = "wasm32"))]
    {
        // No host page outside the browser.
        let _ = message;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(method: &str, params: serde_json::Value, id: Option<u64>) -> RpcRequest {
        RpcRequest {
            jsonrpc: "2.0".to_string(),
            method: method.to_string(),
            params,
            id: id.map(serde_json::Value::from),
        }
    }

    struct Fixture {
        sea_level: SeaLevel,
        settings: OverlaySettings,
        location: LocationSettings,
    }

    impl Fixture {
        fn new() -> Self {
            Self {
                sea_level: SeaLevel::default(),
                settings: OverlaySettings::default(),
                location: LocationSettings::default(),
            }
        }

        fn context(&mut self) -> RpcContext<'_> {
            RpcContext {
                sea_level: &mut self.sea_level,
                settings: &mut self.settings,
                location: &mut self.location,
                status: "AR active",
                state: CaptureState::Rendering,
                stats: OverlayStats {
                    frames_drawn: 12,
                    frames_skipped: 3,
                },
                ui_signals: Vec::new(),
                stop_requested: false,
            }
        }
    }

    #[test]
    fn set_sea_level_updates_level_and_echoes_it() {
        let mut fixture = Fixture::new();
        let mut context = fixture.context();

        let response = handle_rpc_request(
            &request("set_sea_level", serde_json::json!({ "level": 1.75 }), Some(7)),
            &mut context,
        )
        .unwrap();

        assert_eq!(response.id, Some(serde_json::json!(7)));
        assert_eq!(response.result.unwrap()["level"], 1.75);
        assert_eq!(fixture.sea_level.level(), 1.75);
    }

    #[test]
    fn set_sea_level_without_number_is_invalid_params() {
        let mut fixture = Fixture::new();
        let mut context = fixture.context();

        let response = handle_rpc_request(
            &request("set_sea_level", serde_json::json!({ "level": "high" }), Some(1)),
            &mut context,
        )
        .unwrap();

        assert_eq!(response.error.unwrap().code, -32602);
        assert_eq!(fixture.sea_level.level(), 0.5);
    }

    #[test]
    fn set_scenario_is_replayed_through_ui_path() {
        let mut fixture = Fixture::new();
        let mut context = fixture.context();

        handle_rpc_request(
            &request("set_scenario", serde_json::json!({ "scenario": "2.0" }), None),
            &mut context,
        );

        assert_eq!(
            context.ui_signals,
            vec![UiSignal::ScenarioSelected("2.0".to_string())]
        );
    }

    #[test]
    fn requests_without_id_get_no_response() {
        let mut fixture = Fixture::new();
        let mut context = fixture.context();

        let response = handle_rpc_request(
            &request("set_sea_level", serde_json::json!({ "level": 2.0 }), None),
            &mut context,
        );

        assert!(response.is_none());
        assert_eq!(fixture.sea_level.level(), 2.0);
    }

    #[test]
    fn get_state_reports_snapshot() {
        let mut fixture = Fixture::new();
        let mut context = fixture.context();

        let result = handle_rpc_request(
            &request("get_state", serde_json::Value::Null, Some(2)),
            &mut context,
        )
        .and_then(|response| response.result)
        .unwrap();

        assert_eq!(result["level"], 0.5);
        assert_eq!(result["status"], "AR active");
        assert_eq!(result["state"], "rendering");
        assert_eq!(result["frames_drawn"], 12);
        assert_eq!(result["frames_skipped"], 3);
        assert_eq!(result["settings"]["pixels_per_metre"], 50.0);
        assert_eq!(result["location"]["demo_radius_km"], 10.0);
    }

    #[test]
    fn overlay_settings_patch_is_merged() {
        let mut fixture = Fixture::new();
        let mut context = fixture.context();

        handle_rpc_request(
            &request(
                "set_overlay_settings",
                serde_json::json!({ "baseline_ratio": 0.5, "fill_colour": "rgba(0, 0, 0, 0.1)" }),
                Some(3),
            ),
            &mut context,
        );

        assert_eq!(fixture.settings.baseline_ratio, 0.5);
        assert_eq!(fixture.settings.fill_colour, "rgba(0, 0, 0, 0.1)");
        assert_eq!(fixture.settings.pixels_per_metre, 50.0);
    }

    #[test]
    fn location_settings_patch_is_merged() {
        let mut fixture = Fixture::new();
        let mut context = fixture.context();

        let result = handle_rpc_request(
            &request(
                "set_location_settings",
                serde_json::json!({
                    "reference": { "latitude": -3.7319, "longitude": -38.5267 },
                    "reference_name": "Fortaleza"
                }),
                Some(8),
            ),
            &mut context,
        )
        .and_then(|response| response.result)
        .unwrap();

        assert_eq!(result["reference_name"], "Fortaleza");
        assert_eq!(fixture.location.reference.latitude, -3.7319);
        assert_eq!(fixture.location.demo_radius_km, 10.0);
    }

    #[test]
    fn negative_location_radius_is_invalid_params() {
        let mut fixture = Fixture::new();
        let mut context = fixture.context();

        let response = handle_rpc_request(
            &request(
                "set_location_settings",
                serde_json::json!({ "demo_radius_km": -5.0 }),
                Some(9),
            ),
            &mut context,
        )
        .unwrap();

        assert_eq!(response.error.unwrap().code, -32602);
        assert_eq!(fixture.location, LocationSettings::default());
    }

    #[test]
    fn stop_overlay_sets_stop_flag() {
        let mut fixture = Fixture::new();
        let mut context = fixture.context();

        handle_rpc_request(&request("stop_overlay", serde_json::Value::Null, Some(4)), &mut context);

        assert!(context.stop_requested);
    }

    #[test]
    fn unknown_method_and_wrong_version_are_rejected() {
        let mut fixture = Fixture::new();
        let mut context = fixture.context();

        let unknown = handle_rpc_request(
            &request("get_fps", serde_json::Value::Null, Some(5)),
            &mut context,
        )
        .unwrap();
        assert_eq!(unknown.error.unwrap().code, -32601);

        let mut old = request("get_state", serde_json::Value::Null, Some(6));
        old.jsonrpc = "1.0".to_string();
        let rejected = handle_rpc_request(&old, &mut context).unwrap();
        assert_eq!(rejected.error.unwrap().code, -32600);
    }

    #[test]
    fn request_params_default_to_null() {
        let parsed: RpcRequest =
            serde_json::from_str(r#"{"jsonrpc":"2.0","method":"get_state","id":1}"#).unwrap();
        assert!(parsed.params.is_null());
    }
}
