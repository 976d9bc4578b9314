pub mod constants;
pub mod geo;
pub mod scene;
pub mod stage;
pub mod tween;

pub use constants::*;
pub use geo::{project, surface_direction, GeoError, GeoPoint};
pub use scene::{CameraState, GlobeState, SceneChoreographer};
pub use stage::{AnimationStage, Progression, StageClock, StageSchedule};
pub use tween::{Easing, Lerp, Tween};

// Shaders bundled as string constants
pub static SCENE_WGSL: &str = include_str!("../../shaders/scene.wgsl");
