/// Minimum pixel count (h*w) to use row-level Rayon parallelism when rendering.
pub const PARALLEL_PIXEL_THRESHOLD: usize = 65_536;

/// Lower bound on the viewport zoom factor.
pub const MIN_SCALE: f32 = 0.05;

/// Upper bound on the viewport zoom factor.
pub const MAX_SCALE: f32 = 30.0;

/// Window width bounds (contrast range of the grayscale remap).
pub const MIN_WINDOW_WIDTH: f32 = 1.0;
pub const MAX_WINDOW_WIDTH: f32 = 65_535.0;

/// Window center bounds (brightness midpoint of the grayscale remap).
pub const MIN_WINDOW_CENTER: f32 = -65_535.0;
pub const MAX_WINDOW_CENTER: f32 = 65_535.0;

/// Per-drag-pixel multiplier applied to window width/center adjustments.
/// Fixed UX convention: horizontal drag -> width, vertical drag -> center.
pub const WINDOW_LEVEL_DRAG_GAIN: f32 = 2.0;

/// Zoom factor for one mouse-wheel tick toward the viewer.
pub const WHEEL_ZOOM_IN: f32 = 1.1;

/// Zoom factor for one mouse-wheel tick away from the viewer.
pub const WHEEL_ZOOM_OUT: f32 = 0.9;

/// Scroll distance (surface points) of one wheel detent. Deltas
/// accumulate across events, so N detents yield N zoom ticks.
pub const WHEEL_TICK_POINTS: f32 = 50.0;

/// Two single-touch starts within this window count as a double-tap.
pub const DOUBLE_TAP_WINDOW_MS: u64 = 300;

/// Cine playback rate bounds. The UI slider stays within 1..=30.
pub const MIN_CINE_FPS: u32 = 1;
pub const MAX_CINE_FPS: u32 = 60;

/// Bounds on the cine tick interval after fps clamping.
pub const MIN_CINE_INTERVAL_MS: u64 = 16;
pub const MAX_CINE_INTERVAL_MS: u64 = 1000;

/// Overlay marker radius in surface pixels.
pub const MARKER_RADIUS: f32 = 4.0;
