// Host-side tests for the tween primitive.
// The main crate is wasm-only, so we include the pure-Rust module directly.

#![allow(dead_code)]
mod tween {
    include!("../src/core/tween.rs");
}

use glam::Vec3;
use std::time::Duration;
use tween::*;

const FRAME: Duration = Duration::from_millis(16);

#[test]
fn easings_hit_their_endpoints() {
    for easing in [Easing::Linear, Easing::SmoothInOut, Easing::BackOut] {
        assert!(easing.apply(0.0).abs() < 1e-6);
        assert!((easing.apply(1.0) - 1.0).abs() < 1e-6);
    }
}

#[test]
fn smooth_in_out_is_monotone() {
    let mut prev = 0.0;
    for i in 0..=100 {
        let v = Easing::SmoothInOut.apply(i as f32 / 100.0);
        assert!(v >= prev);
        prev = v;
    }
}

#[test]
fn back_out_overshoots_then_settles() {
    let mut peak = 0.0_f32;
    for i in 0..=100 {
        peak = peak.max(Easing::BackOut.apply(i as f32 / 100.0));
    }
    assert!(peak > 1.0, "back-out should overshoot its target");
    assert!((Easing::BackOut.apply(1.0) - 1.0).abs() < 1e-6);
}

#[test]
fn tween_runs_from_start_to_end() {
    let mut t = Tween::new(2.0_f32, 6.0, Duration::from_millis(500), Easing::Linear);
    assert!((t.value() - 2.0).abs() < 1e-6);
    assert!(!t.finished());
    let mut last = t.value();
    while !t.finished() {
        last = t.step(FRAME);
    }
    assert!((last - 6.0).abs() < 1e-6);
    // Further steps hold the end value
    assert!((t.step(FRAME) - 6.0).abs() < 1e-6);
}

#[test]
fn zero_duration_tween_completes_immediately() {
    let mut t = Tween::new(0.0_f32, 1.0, Duration::ZERO, Easing::SmoothInOut);
    let v = t.step(FRAME);
    assert!((v - 1.0).abs() < 1e-6);
    assert!(t.finished());
}

#[test]
fn vec3_tween_interpolates_componentwise() {
    let from = Vec3::new(0.0, 0.0, 20.0);
    let to = Vec3::new(4.0, 2.0, 8.0);
    let mut t = Tween::new(from, to, Duration::from_millis(1000), Easing::Linear);
    let mid = t.step(Duration::from_millis(500));
    assert!((mid - from.lerp(to, 0.5)).length() < 1e-5);
    let end = t.step(Duration::from_millis(600));
    assert!((end - to).length() < 1e-6);
    assert!(t.finished());
}
