/// Smallest half-width the viewport accepts, in image pixels.
pub const MIN_HALF_WIDTH: f64 = 1e-3;

/// Small epsilon to avoid division by zero in floating-point comparisons.
pub const EPSILON: f64 = 1e-9;

/// Magnification below which the renderer switches to linear filtering.
pub const SMOOTH_MAGNIFICATION_LIMIT: f64 = 4.0;

/// Wheel delta reported for one notch when zooming (mouse angle units).
pub const WHEEL_ZOOM_DIVISOR: f64 = 120.0;

/// Wheel delta divisor used when the wheel pans instead of zooming.
pub const WHEEL_PAN_DIVISOR: f64 = 40.0;

/// Zoom step per wheel notch: factor = (1 + step * notches) ^ sign.
pub const WHEEL_ZOOM_STEP: f64 = 0.1;

/// Wheel angle delta produced by one line of scroll.
pub const WHEEL_ANGLE_PER_LINE: f64 = 120.0;

/// Arrow keys move the view by `half_width / KEY_PAN_DIVISOR`.
pub const KEY_PAN_DIVISOR: f64 = 10.0;

/// Distance from a display edge (points) that triggers pointer wrapping while panning.
pub const WRAP_MARGIN: f64 = 2.0;

/// Distance from the opposite edge where a wrapped pointer lands.
/// Must exceed twice `WRAP_MARGIN` so a warp never lands inside a margin.
pub const WRAP_INSET: f64 = 5.0;

/// Distance (points) from a warp target within which a move counts as the
/// warp's own echo.
pub const WARP_ECHO_TOLERANCE: f64 = 2.0;

/// Moves ignored while waiting for a warp echo before re-anchoring anyway.
/// Covers platforms that refuse to move the pointer.
pub const WARP_ECHO_MAX_EVENTS: u32 = 64;

/// Quiet time after the last pinch update that ends the gesture.
pub const PINCH_QUIET_MS: u64 = 150;

/// Idle time before the pointer is hidden.
pub const CURSOR_IDLE_MS: u64 = 1000;

/// Window size used when no geometry has been persisted yet.
pub const DEFAULT_WINDOW_SIZE: [u32; 2] = [800, 600];

/// Smallest persisted window size that is honoured on startup.
pub const MIN_WINDOW_SIZE: [u32; 2] = [200, 150];
