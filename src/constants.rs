// Page and interaction tuning for the web front-end. Scene tuning lives in
// `galaxy_core::constants`; nothing here touches web types.

pub const CANVAS_ID: &str = "app-canvas";

// Pointer drag and wheel scaling applied before the orbit controls see input
pub const ROTATE_SENSITIVITY: f32 = 1.0;
pub const WHEEL_SENSITIVITY: f32 = 1.0;
// Wheel deltas below this are treated as noise (trackpad jitter)
pub const WHEEL_DEADZONE: f32 = 0.5;

// Label text, as fractions of the atlas cell height
pub const LABEL_FONT_FAMILY: &str = "Arial";
pub const LABEL_FONT_SCALE: f64 = 70.0 / 256.0;
pub const LABEL_BASELINE_OFFSET: f64 = 30.0 / 256.0;

/// CSS font shorthand for a label cell `cell_height` pixels tall.
pub fn label_font(cell_height: u32) -> String {
    let px = (cell_height as f64 * LABEL_FONT_SCALE).round().max(1.0);
    format!("bold {px}px {LABEL_FONT_FAMILY}")
}
