//! Shared numeric constants for the diagram crate.

// ── Geometry ────────────────────────────────────────────────────

/// Orientation of the reflecting surface, in degrees. Vertical in screen space.
pub const SURFACE_ANGLE_DEG: f64 = -90.0;

/// Half-length of the drawn mirror, measured along the surface from `end`.
pub const SURFACE_HALF_LENGTH: f64 = 120.0;

/// Radius of the draggable start handle.
pub const HANDLE_RADIUS: f64 = 10.0;

// ── Layout ──────────────────────────────────────────────────────

/// Default margins around the drawing group: top, right, bottom, left.
pub const MARGIN_TOP: f64 = 50.0;
pub const MARGIN_RIGHT: f64 = 20.0;
pub const MARGIN_BOTTOM: f64 = 50.0;
pub const MARGIN_LEFT: f64 = 20.0;

/// Drawing widths below this reserve extra room on the right for page chrome.
pub const NARROW_WIDTH: f64 = 500.0;

/// Right margin applied to narrow containers.
pub const NARROW_MARGIN_RIGHT: f64 = 50.0;

/// The drawing area never gets shorter than this.
pub const MIN_HEIGHT: f64 = 200.0;

// ── Occluder ────────────────────────────────────────────────────

/// Half-length of the paper segment that blocks the reflected ray.
pub const OCCLUDER_HALF_LENGTH: f64 = 15.0;

/// Vertical extent of the target guide above the paper.
pub const TARGET_GUIDE_HEIGHT: f64 = 20.0;

/// Radius of the circular target (the apple).
pub const TARGET_RADIUS: f64 = 20.0;

/// Horizontal offset of the target from the occluder anchor.
pub const TARGET_OFFSET_X: f64 = 50.0;

// ── Arrowhead ───────────────────────────────────────────────────

/// Marker box edge length for the reflected ray's arrowhead.
pub const MARKER_BOX: f64 = 5.0;

/// Marker element id referenced by `marker-start`.
pub const ARROW_MARKER_ID: &str = "arrow";

/// Arrowhead fill.
pub const ARROW_FILL: &str = "#ff6347";

// ── Timing ──────────────────────────────────────────────────────

/// Resize events settle for this long before a relayout runs.
pub const RESIZE_SETTLE_MS: u32 = 100;

/// Class toggled on the container while the reflected ray hits the target.
pub const HIGHLIGHT_CLASS: &str = "intersected";
