/// Fraction of the surface height where a zero-metre sea level sits.
pub const BASELINE_RATIO: f64 = 0.6;

/// Vertical pixels the sea line moves per metre of rise.
pub const PIXELS_PER_METRE: f64 = 50.0;

pub const SEA_LINE_WIDTH: f64 = 3.0;
pub const SEA_LINE_COLOUR: &str = "rgba(0, 100, 255, 0.8)";
pub const SUBMERGED_FILL_COLOUR: &str = "rgba(0, 100, 255, 0.2)";

/// Sea-level rise applied before the user picks a scenario, in metres.
pub const DEFAULT_SEA_LEVEL_RISE: f64 = 0.5;

/// Scenario selector values offered by the page.
pub const SCENARIO_KEYS: [&str; 3] = ["0.5", "1.0", "2.0"];
