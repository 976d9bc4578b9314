/// Render-side tuning constants.
///
/// These express intended visual behavior and keep magic numbers out of
/// the pipeline code.
// Star field (background point cloud, released at handoff)
pub const STAR_COUNT: usize = 1000;
pub const STAR_FIELD_EXTENT: f32 = 100.0;

// Sphere tessellation
pub const GLOBE_SEGMENTS: u32 = 64;
pub const GLOBE_RINGS: u32 = 32;

// Marker cone
pub const MARKER_CONE_HEIGHT: f32 = 0.3;
pub const MARKER_CONE_RADIUS: f32 = 0.1;
pub const MARKER_CONE_SIDES: u32 = 8;

// Camera projection
pub const CAMERA_FOV_Y_RADIANS: f32 = std::f32::consts::FRAC_PI_4;
pub const CAMERA_Z_NEAR: f32 = 0.1;
pub const CAMERA_Z_FAR: f32 = 1000.0;

// Palette
pub const OCEAN_COLOR: [f32; 4] = [0.10, 0.40, 0.80, 1.0];
pub const MARKER_COLOR: [f32; 4] = [1.0, 0.32, 0.32, 1.0];
pub const CLEAR_COLOR: [f64; 4] = [0.01, 0.01, 0.03, 1.0];

// Directional light for the globe shading
pub const LIGHT_DIRECTION: [f32; 3] = [0.55, 0.55, 0.28];
