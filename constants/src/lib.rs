//! Demo constants shared by the sea-level overlay engine.
//!
//! Values here are illustrative defaults, not calibrated measurements. The
//! engine copies them into runtime settings resources so an embedding page
//! can adjust them.

pub mod camera;
pub mod coordinate_system;
pub mod dom;
pub mod render_settings;
