// Shared geometry and choreography tuning constants for the intro.

// Globe geometry
pub const EARTH_RADIUS: f32 = 5.0;

// Highlighted location (India)
pub const TARGET_LAT_DEG: f32 = 20.5937;
pub const TARGET_LON_DEG: f32 = 78.9629;

// Marker sits slightly above the surface so it never z-fights the globe
pub const MARKER_ALTITUDE: f32 = 0.1;

// Stage durations (milliseconds). ZoomToTarget has no timer of its own;
// it advances when the tween chain reports completion, with a watchdog
// so a lost completion still reaches the terminal stage.
pub const INITIAL_HOLD_MS: u64 = 2000;
pub const EARTH_ROTATION_MS: u64 = 3000;
pub const MARKER_HOLD_MS: u64 = 1500;
pub const MANUAL_STAGE_FALLBACK_MS: u64 = 8000;

// Tween durations (milliseconds)
pub const ZOOM_DURATION_MS: u64 = 2500;
pub const MARKER_POP_MS: u64 = 500;
pub const CAMERA_RETURN_MS: u64 = 2000;

// Rotation speeds (radians per second). The ambient speed is the
// perpetual background rate once the main content is up.
pub const INTRO_ROTATION_SPEED: f32 = 0.3;
pub const AMBIENT_ROTATION_SPEED: f32 = 0.03;

// Camera
pub const CAMERA_HOME_EYE: [f32; 3] = [0.0, 0.0, 20.0];
// How far out from the marker the zoomed-in camera settles, as a
// multiple of the globe radius.
pub const ZOOM_DISTANCE_FACTOR: f32 = 1.6;

// Gentle vertical bob applied to the whole globe group
pub const FLOAT_AMPLITUDE: f32 = 0.2;
pub const FLOAT_FREQUENCY_HZ: f32 = 0.16;
