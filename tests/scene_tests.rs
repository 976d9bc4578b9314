// Host-side tests for the scene choreography: the full intro sequence
// simulated frame by frame against the stage clock.
// The main crate is wasm-only, so we include the pure-Rust modules directly.

#![allow(dead_code)]
mod constants {
    include!("../src/core/constants.rs");
}
mod geo {
    include!("../src/core/geo.rs");
}
mod tween {
    include!("../src/core/tween.rs");
}
mod stage {
    include!("../src/core/stage.rs");
}
mod scene {
    include!("../src/core/scene.rs");
}

use constants::*;
use geo::GeoPoint;
use scene::SceneChoreographer;
use stage::{AnimationStage, StageClock, StageSchedule};
use std::time::Duration;

const FRAME: Duration = Duration::from_millis(16);

fn make_pair() -> (StageClock, SceneChoreographer) {
    let target = GeoPoint::new(TARGET_LAT_DEG, TARGET_LON_DEG).unwrap();
    (
        StageClock::new(StageSchedule::default()),
        SceneChoreographer::new(target),
    )
}

fn step(clock: &mut StageClock, scene: &mut SceneChoreographer, frames: usize) {
    for _ in 0..frames {
        clock.tick(FRAME);
        scene.update(clock, FRAME);
    }
}

fn run_until(
    clock: &mut StageClock,
    scene: &mut SceneChoreographer,
    target: AnimationStage,
    max_frames: usize,
) {
    for _ in 0..max_frames {
        if clock.stage() == target {
            return;
        }
        step(clock, scene, 1);
    }
    panic!("never reached {:?}", target);
}

#[test]
fn initial_stage_keeps_the_globe_still() {
    let (mut clock, mut scene) = make_pair();
    step(&mut clock, &mut scene, 10);
    assert_eq!(clock.stage(), AnimationStage::Initial);
    assert_eq!(scene.globe().rotation_angle, 0.0);
    assert!(!scene.globe().marker_visible);
}

#[test]
fn earth_rotation_is_frame_delta_scaled() {
    let (mut clock, mut scene) = make_pair();
    run_until(&mut clock, &mut scene, AnimationStage::EarthRotation, 300);

    let before = scene.globe().rotation_angle;
    step(&mut clock, &mut scene, 1);
    let per_frame = scene.globe().rotation_angle - before;
    let expected = INTRO_ROTATION_SPEED * FRAME.as_secs_f32();
    assert!((per_frame - expected).abs() < 1e-5);

    // Doubling the delta doubles the step
    clock.tick(FRAME * 2);
    let before = scene.globe().rotation_angle;
    scene.update(&mut clock, FRAME * 2);
    assert!((scene.globe().rotation_angle - before - 2.0 * expected).abs() < 1e-5);
}

#[test]
fn zoom_freezes_rotation_and_flies_the_camera_to_the_marker() {
    let (mut clock, mut scene) = make_pair();
    run_until(&mut clock, &mut scene, AnimationStage::ZoomToTarget, 1000);
    step(&mut clock, &mut scene, 1);
    assert_eq!(scene.globe().rotation_speed, 0.0);

    // Let the dolly + align finish, then the marker pop
    let zoom_frames = (ZOOM_DURATION_MS / 16 + 4) as usize;
    step(&mut clock, &mut scene, zoom_frames);
    let eye = scene.camera().eye;
    assert!((eye - scene.zoom_eye()).length() < 1e-3);
    assert!(scene.globe().marker_visible);

    // After the align tween the marker faces its projected position:
    // world position equals the local projection (modulo the bob).
    let world = scene.marker_world_position();
    let local = scene.marker_local_position();
    assert!((world.x - local.x).abs() < 1e-3);
    assert!((world.z - local.z).abs() < 1e-3);
}

#[test]
fn marker_pop_completes_the_chain_and_advances_exactly_once() {
    let (mut clock, mut scene) = make_pair();
    run_until(&mut clock, &mut scene, AnimationStage::ZoomToTarget, 1000);

    let mut entered_hold = 0;
    let frames = ((ZOOM_DURATION_MS + MARKER_POP_MS) / 16 + 20) as usize;
    let mut prev = clock.stage();
    for _ in 0..frames {
        step(&mut clock, &mut scene, 1);
        if prev != clock.stage() {
            assert_eq!(clock.stage(), AnimationStage::TargetMarkerShown);
            entered_hold += 1;
            prev = clock.stage();
        }
    }
    assert_eq!(entered_hold, 1);
    assert!((scene.globe().marker_scale - 1.0).abs() < 1e-6);
}

#[test]
fn marker_pop_overshoots_then_settles_at_one() {
    let (mut clock, mut scene) = make_pair();
    run_until(&mut clock, &mut scene, AnimationStage::ZoomToTarget, 1000);

    let mut peak = 0.0_f32;
    let frames = ((ZOOM_DURATION_MS + MARKER_POP_MS) / 16 + 20) as usize;
    for _ in 0..frames {
        step(&mut clock, &mut scene, 1);
        peak = peak.max(scene.globe().marker_scale);
    }
    assert!(peak > 1.0, "the pop should swing past full scale");
    assert_eq!(scene.globe().marker_scale, 1.0);
}

#[test]
fn main_content_returns_the_camera_and_keeps_a_slow_spin() {
    let (mut clock, mut scene) = make_pair();
    run_until(&mut clock, &mut scene, AnimationStage::MainContent, 2000);

    let return_frames = (CAMERA_RETURN_MS / 16 + 4) as usize;
    step(&mut clock, &mut scene, return_frames);
    let home = glam::Vec3::from_array(CAMERA_HOME_EYE);
    assert!((scene.camera().eye - home).length() < 1e-3);
    assert_eq!(scene.globe().rotation_speed, AMBIENT_ROTATION_SPEED);
    assert!(AMBIENT_ROTATION_SPEED < INTRO_ROTATION_SPEED);

    // Perpetual steady state: the globe keeps turning, the stage stays put
    let before = scene.globe().rotation_angle;
    step(&mut clock, &mut scene, 100);
    assert!(scene.globe().rotation_angle > before);
    assert_eq!(clock.stage(), AnimationStage::MainContent);
}

#[test]
fn cancel_mid_zoom_never_advances_the_clock() {
    let (mut clock, mut scene) = make_pair();
    run_until(&mut clock, &mut scene, AnimationStage::ZoomToTarget, 1000);
    // Part-way into the dolly, tear the scene down
    step(&mut clock, &mut scene, 30);
    scene.cancel();

    let eye = scene.camera().eye;
    for _ in 0..500 {
        scene.update(&mut clock, FRAME);
    }
    assert_eq!(clock.stage(), AnimationStage::ZoomToTarget);
    assert_eq!(scene.camera().eye, eye, "no tween should move a cancelled camera");
    assert!(!scene.globe().marker_visible);
}

#[test]
fn skip_lands_in_a_consistent_overview_state() {
    let (mut clock, mut scene) = make_pair();
    run_until(&mut clock, &mut scene, AnimationStage::EarthRotation, 300);

    scene.skip_to_overview();
    clock.go_to(AnimationStage::MainContent);
    step(&mut clock, &mut scene, 2);

    assert_eq!(clock.stage(), AnimationStage::MainContent);
    assert!(scene.globe().marker_visible);
    assert!((scene.globe().marker_scale - 1.0).abs() < 1e-6);
    assert_eq!(scene.globe().rotation_speed, AMBIENT_ROTATION_SPEED);
    let home = glam::Vec3::from_array(CAMERA_HOME_EYE);
    assert!((scene.camera().eye - home).length() < 1e-3);
}

#[test]
fn watchdog_path_still_produces_a_sane_steady_state() {
    // Drop the choreographer's chain as if its completion was lost, and
    // let the clock's fallback carry the session to the terminal stage.
    let (mut clock, mut scene) = make_pair();
    run_until(&mut clock, &mut scene, AnimationStage::ZoomToTarget, 1000);
    step(&mut clock, &mut scene, 10);
    scene.cancel();

    let mut safety = 0;
    while clock.stage() != AnimationStage::MainContent {
        clock.tick(FRAME);
        scene.update(&mut clock, FRAME);
        safety += 1;
        assert!(safety < 4000, "fallback never reached the terminal stage");
    }
    step(&mut clock, &mut scene, 5);
    assert!(scene.globe().marker_visible);
    assert_eq!(scene.globe().rotation_speed, AMBIENT_ROTATION_SPEED);
}
