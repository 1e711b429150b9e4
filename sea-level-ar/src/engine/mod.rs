pub mod capture;
pub mod core;
pub mod location;
pub mod overlay;
