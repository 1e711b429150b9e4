// Element ids the host page provides.
pub const SCENARIO_SELECT_ID: &str = "scenario-select";
pub const SCENARIO_INFO_ID: &str = "scenario-info";
pub const INFO_BUTTON_ID: &str = "info-button";
pub const INFO_PANEL_ID: &str = "info-panel";
pub const CLOSE_INFO_ID: &str = "close-info";
pub const VIDEO_ELEMENT_ID: &str = "camera-feed";
pub const CANVAS_ELEMENT_ID: &str = "arCanvas";
pub const STATUS_ELEMENT_ID: &str = "status";

/// Class that hides the info panel.
pub const HIDDEN_CLASS: &str = "hidden";
