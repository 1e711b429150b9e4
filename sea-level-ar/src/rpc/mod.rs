//! JSON-RPC 2.0 bridge for pages that embed the overlay in an iframe.
//!
//! The embedding page can drive the overlay without touching the DOM
//! controls, and receives status updates as notifications.
//!
//! ## Message Flow
//!
//! ```text
//! Host page (parent)  <──postMessage──>  Overlay (iframe)
//!        │                                     │
//!        ├─ Request (with ID) ───────────────> │
//!        │                                     ├─ Apply to ECS resources
//!        │ <──────────────── Response (with ID) ┤
//!        │                                     │
//!        │ <─────────── Notification (no ID) ──┤
//! ```
//!
//! ## Methods
//!
//! - `set_scenario {scenario}`: same path as the scenario selector
//! - `set_sea_level {level}`: set the rise in metres (finite numbers only)
//! - `get_state`: level, status line, capture state and frame counters
//! - `set_overlay_settings {..}`: partial update of baseline, scale, colours
//! - `stop_overlay`: end the render loop
//!
//! Requests without an `id` are applied but never answered.
//!
//! ## Notifications
//!
//! - `status_changed {status, state}`
//! - `demo_mode {distance_km}`
//!
//! ## Error Codes
//!
//! - `-32600`: Invalid request
//! - `-32601`: Method not found
//! - `-32602`: Invalid params

/// Message types, request dispatch and the postMessage listener.
pub mod web_rpc;
