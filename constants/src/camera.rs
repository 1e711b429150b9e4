/// `facingMode` requested from `getUserMedia` (rear camera on phones).
pub const FACING_MODE: &str = "environment";

pub const IDEAL_WIDTH: u32 = 1280;
pub const IDEAL_HEIGHT: u32 = 720;

/// `HTMLMediaElement.HAVE_ENOUGH_DATA`.
pub const HAVE_ENOUGH_DATA: u16 = 4;
