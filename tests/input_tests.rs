// Host-side tests for the interaction gate.
// The main crate is wasm-only, so we include the pure-Rust module directly.

#![allow(dead_code)]
mod input {
    include!("../src/input.rs");
}

use input::*;

#[test]
fn gate_fires_exactly_once() {
    let mut gate = InteractionGate::new();
    assert!(!gate.has_fired());
    assert!(gate.acknowledge());
    assert!(gate.has_fired());
    assert!(!gate.acknowledge());
}

#[test]
fn repeated_events_never_refire_the_gate() {
    let mut gate = InteractionGate::new();
    let fired: usize = (0..100).filter(|_| gate.acknowledge()).count();
    assert_eq!(fired, 1);
    assert!(gate.has_fired());
}
