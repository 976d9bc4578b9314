use std::time::Duration;

use glam::{Quat, Vec3};

use super::constants::{
    AMBIENT_ROTATION_SPEED, CAMERA_HOME_EYE, CAMERA_RETURN_MS, EARTH_RADIUS, FLOAT_AMPLITUDE,
    FLOAT_FREQUENCY_HZ, INTRO_ROTATION_SPEED, MARKER_ALTITUDE, MARKER_POP_MS,
    ZOOM_DISTANCE_FACTOR, ZOOM_DURATION_MS,
};
use super::geo::{project, surface_direction, GeoPoint};
use super::stage::{AnimationStage, StageClock};
use super::tween::{Easing, Tween};

/// Globe-side animation state. Mutated once per frame (rotation) and by
/// tween steps (marker scale, speed changes on stage entry).
#[derive(Clone, Debug)]
pub struct GlobeState {
    /// Monotonic rotation accumulator, radians.
    pub rotation_angle: f32,
    /// Radians per second; zero while the zoom tween owns the rotation.
    pub rotation_speed: f32,
    pub marker_visible: bool,
    /// Marker reveal scale. Eases from 0 toward 1; the pop's back-out
    /// easing takes it transiently past 1 before it settles at exactly 1.
    pub marker_scale: f32,
}

#[derive(Clone, Debug)]
pub struct CameraState {
    pub eye: Vec3,
    pub target: Vec3,
}

/// The ZoomToTarget tween chain as an explicit state machine: camera
/// dolly + rotation alignment run together, then the marker pop, then
/// the stage advance. Dropping the value abandons whatever remains, so
/// cancellation never fires a completion.
enum ZoomPhase {
    Approach {
        dolly: Tween<Vec3>,
        align: Tween<f32>,
    },
    MarkerPop {
        pop: Tween<f32>,
    },
}

/// Translates stage transitions into sequenced visual effects and tells
/// the clock when a manually progressed stage has finished. Owns all
/// camera and globe state; the clock never touches either.
pub struct SceneChoreographer {
    target: GeoPoint,
    globe: GlobeState,
    camera: CameraState,
    zoom: Option<ZoomPhase>,
    return_dolly: Option<Tween<Vec3>>,
    last_stage: Option<AnimationStage>,
    bob_time: f32,
}

impl SceneChoreographer {
    pub fn new(target: GeoPoint) -> Self {
        Self {
            target,
            globe: GlobeState {
                rotation_angle: 0.0,
                rotation_speed: 0.0,
                marker_visible: false,
                marker_scale: 0.0,
            },
            camera: CameraState {
                eye: Vec3::from_array(CAMERA_HOME_EYE),
                target: Vec3::ZERO,
            },
            zoom: None,
            return_dolly: None,
            last_stage: None,
            bob_time: 0.0,
        }
    }

    pub fn globe(&self) -> &GlobeState {
        &self.globe
    }

    pub fn camera(&self) -> &CameraState {
        &self.camera
    }

    pub fn target(&self) -> GeoPoint {
        self.target
    }

    /// Vertical bob applied to the globe group.
    pub fn float_offset(&self) -> f32 {
        (self.bob_time * std::f32::consts::TAU * FLOAT_FREQUENCY_HZ).sin() * FLOAT_AMPLITUDE
    }

    /// Marker position in the globe's local frame, slightly above the
    /// surface.
    pub fn marker_local_position(&self) -> Vec3 {
        project(self.target, EARTH_RADIUS + MARKER_ALTITUDE)
    }

    /// Marker position in world space, following the globe's rotation
    /// and bob.
    pub fn marker_world_position(&self) -> Vec3 {
        Quat::from_rotation_y(self.globe.rotation_angle) * self.marker_local_position()
            + Vec3::new(0.0, self.float_offset(), 0.0)
    }

    /// Where the zoomed-in camera settles: out along the marker's own
    /// direction from the globe center.
    pub fn zoom_eye(&self) -> Vec3 {
        surface_direction(self.target) * EARTH_RADIUS * ZOOM_DISTANCE_FACTOR
    }

    /// Step the scene by one frame. Reads the clock's stage, runs
    /// continuous rotation and any in-flight tween chain, and requests
    /// the next stage when a chain completes.
    pub fn update(&mut self, clock: &mut StageClock, dt: Duration) {
        let stage = clock.stage();
        if self.last_stage != Some(stage) {
            self.enter_stage(stage);
            self.last_stage = Some(stage);
        }

        let dt_sec = dt.as_secs_f32();
        self.bob_time += dt_sec;
        self.globe.rotation_angle += self.globe.rotation_speed * dt_sec;

        if let Some(phase) = self.zoom.take() {
            self.zoom = self.step_zoom(phase, clock, dt);
        }

        if let Some(mut dolly) = self.return_dolly.take() {
            self.camera.eye = dolly.step(dt);
            if !dolly.finished() {
                self.return_dolly = Some(dolly);
            }
        }
    }

    /// Abandon all in-flight tweens. Called on teardown; an abandoned
    /// chain never advances the clock.
    pub fn cancel(&mut self) {
        self.zoom = None;
        self.return_dolly = None;
    }

    /// Snap straight to the post-intro steady state (skip-intro). The
    /// caller is expected to move the clock forward as well.
    pub fn skip_to_overview(&mut self) {
        self.cancel();
        self.camera.eye = Vec3::from_array(CAMERA_HOME_EYE);
        self.camera.target = Vec3::ZERO;
        self.globe.rotation_speed = AMBIENT_ROTATION_SPEED;
        self.globe.marker_visible = true;
        self.globe.marker_scale = 1.0;
    }

    fn enter_stage(&mut self, stage: AnimationStage) {
        match stage {
            AnimationStage::Initial => {
                self.globe.rotation_speed = 0.0;
            }
            AnimationStage::EarthRotation => {
                self.globe.rotation_speed = INTRO_ROTATION_SPEED;
            }
            AnimationStage::ZoomToTarget => {
                // Rotation freezes; the align tween owns the angle until
                // the marker faces the camera.
                self.globe.rotation_speed = 0.0;
                self.camera.target = project(self.target, EARTH_RADIUS);
                let duration = Duration::from_millis(ZOOM_DURATION_MS);
                self.zoom = Some(ZoomPhase::Approach {
                    dolly: Tween::new(
                        self.camera.eye,
                        self.zoom_eye(),
                        duration,
                        Easing::SmoothInOut,
                    ),
                    align: Tween::new(
                        self.globe.rotation_angle,
                        shortest_arc_to_zero(self.globe.rotation_angle),
                        duration,
                        Easing::SmoothInOut,
                    ),
                });
            }
            AnimationStage::TargetMarkerShown => {}
            AnimationStage::MainContent => {
                // The watchdog can land here mid-chain; make the steady
                // state consistent regardless of how we arrived.
                self.zoom = None;
                self.globe.marker_visible = true;
                self.globe.marker_scale = 1.0;
                self.globe.rotation_speed = AMBIENT_ROTATION_SPEED;
                self.camera.target = Vec3::ZERO;
                self.return_dolly = Some(Tween::new(
                    self.camera.eye,
                    Vec3::from_array(CAMERA_HOME_EYE),
                    Duration::from_millis(CAMERA_RETURN_MS),
                    Easing::SmoothInOut,
                ));
            }
        }
    }

    fn step_zoom(
        &mut self,
        phase: ZoomPhase,
        clock: &mut StageClock,
        dt: Duration,
    ) -> Option<ZoomPhase> {
        match phase {
            ZoomPhase::Approach {
                mut dolly,
                mut align,
            } => {
                self.camera.eye = dolly.step(dt);
                self.globe.rotation_angle = align.step(dt);
                if dolly.finished() && align.finished() {
                    self.globe.marker_visible = true;
                    Some(ZoomPhase::MarkerPop {
                        pop: Tween::new(
                            0.0,
                            1.0,
                            Duration::from_millis(MARKER_POP_MS),
                            Easing::BackOut,
                        ),
                    })
                } else {
                    Some(ZoomPhase::Approach { dolly, align })
                }
            }
            ZoomPhase::MarkerPop { mut pop } => {
                self.globe.marker_scale = pop.step(dt);
                if pop.finished() {
                    self.globe.marker_scale = 1.0;
                    // Guard against a racing skip/watchdog: only request
                    // the advance if the zoom stage is still current.
                    if clock.stage() == AnimationStage::ZoomToTarget {
                        clock.advance();
                    }
                    None
                } else {
                    Some(ZoomPhase::MarkerPop { pop })
                }
            }
        }
    }
}

/// End angle for the alignment tween: the multiple-of-tau equivalent of
/// zero nearest to `angle`, so the globe takes the short way around to
/// present the marker.
fn shortest_arc_to_zero(angle: f32) -> f32 {
    use std::f32::consts::{PI, TAU};
    let wrapped = angle.rem_euclid(TAU);
    if wrapped <= PI {
        angle - wrapped
    } else {
        angle + (TAU - wrapped)
    }
}
