// Host-side tests for constants and their relationships.
// The main crate is wasm-only, so we include the pure-Rust modules directly.

#![allow(dead_code)]
mod constants {
    include!("../src/constants.rs");
}
mod core_constants {
    include!("../src/core/constants.rs");
}

use constants::*;
use core_constants::*;

#[test]
#[allow(clippy::assertions_on_constants)]
fn durations_are_positive_and_the_watchdog_is_generous() {
    assert!(INITIAL_HOLD_MS > 0);
    assert!(EARTH_ROTATION_MS > 0);
    assert!(MARKER_HOLD_MS > 0);
    assert!(ZOOM_DURATION_MS > 0);
    assert!(MARKER_POP_MS > 0);
    assert!(CAMERA_RETURN_MS > 0);
    // The fallback must outlast the chain it is guarding
    assert!(MANUAL_STAGE_FALLBACK_MS > ZOOM_DURATION_MS + MARKER_POP_MS);
}

#[test]
#[allow(clippy::assertions_on_constants)]
fn ambient_rotation_is_much_slower_than_the_intro() {
    assert!(AMBIENT_ROTATION_SPEED > 0.0);
    assert!(AMBIENT_ROTATION_SPEED < INTRO_ROTATION_SPEED / 2.0);
}

#[test]
#[allow(clippy::assertions_on_constants)]
fn target_coordinate_is_in_range() {
    assert!((-90.0..=90.0).contains(&TARGET_LAT_DEG));
    assert!((-180.0..=180.0).contains(&TARGET_LON_DEG));
}

#[test]
#[allow(clippy::assertions_on_constants)]
fn camera_geometry_is_consistent() {
    assert!(EARTH_RADIUS > 0.0);
    assert!(MARKER_ALTITUDE > 0.0);
    assert!(ZOOM_DISTANCE_FACTOR > 1.0, "camera must stay outside the globe");
    // The zoomed-in eye is closer than the overview eye
    let home_dist = (CAMERA_HOME_EYE[0].powi(2)
        + CAMERA_HOME_EYE[1].powi(2)
        + CAMERA_HOME_EYE[2].powi(2))
    .sqrt();
    assert!(EARTH_RADIUS * ZOOM_DISTANCE_FACTOR < home_dist);
    assert!(CAMERA_Z_NEAR > 0.0 && CAMERA_Z_NEAR < CAMERA_Z_FAR);
    assert!(CAMERA_FOV_Y_RADIANS > 0.0 && CAMERA_FOV_Y_RADIANS < std::f32::consts::PI);
}

#[test]
#[allow(clippy::assertions_on_constants)]
fn star_field_parameters_are_sane() {
    assert!(STAR_COUNT > 0);
    assert!(STAR_FIELD_EXTENT > EARTH_RADIUS * 2.0, "stars surround the globe");
    assert!(GLOBE_SEGMENTS >= 3 && GLOBE_RINGS >= 2);
    assert!(MARKER_CONE_SIDES >= 3);
}
