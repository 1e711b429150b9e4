//! Core application setup and state management.
//!
//! Handles app construction around a host platform, the capture state
//! machine's states, the status line and the queue that carries browser
//! callbacks into the ECS world.

/// App construction and system ordering.
pub mod app_setup;

/// Capture lifecycle states and the startup transition.
pub mod app_state;

/// Host capability traits and their non-send resource wrappers.
pub mod host;

/// Callback-to-event bridge.
pub mod signals;

/// User-facing status line.
pub mod status;
