// Host-side tests for animation-frame coalescing.
// The main crate is wasm-only, so we include the pure-Rust modules directly.

#![allow(dead_code)]
mod frame_gate {
    include!("../src/core/frame_gate.rs");
}

use frame_gate::*;

#[test]
fn burst_of_events_schedules_one_frame() {
    let mut gate = FrameGate::default();
    let scheduled = (0..1_000).filter(|_| gate.request()).count();
    assert_eq!(scheduled, 1);
    assert!(gate.is_pending());
    assert_eq!(gate.coalesced(), 999);
}

#[test]
fn next_request_after_frame_schedules_again() {
    let mut gate = FrameGate::default();
    assert!(gate.request());
    assert!(!gate.request());
    gate.begin_frame();
    assert_eq!(gate.phase(), FramePhase::Idle);
    assert!(gate.request());
}

#[test]
fn cancel_releases_the_gate() {
    let mut gate = FrameGate::default();
    assert!(gate.request());
    gate.cancel();
    assert!(!gate.is_pending());
    assert!(gate.request());
}

#[test]
fn frames_never_outnumber_display_refreshes() {
    let mut gate = FrameGate::default();
    let mut pending = 0usize;
    let mut frames = 0usize;
    for refresh in 0..60 {
        // uneven bursts between refreshes, sometimes none
        for _ in 0..(refresh % 7) {
            if gate.request() {
                pending += 1;
            }
            assert!(pending <= 1, "more than one frame pending");
        }
        if pending == 1 {
            gate.begin_frame();
            pending = 0;
            frames += 1;
        }
    }
    assert!(frames <= 60);
    assert_eq!(frames, (0..60).filter(|r| r % 7 != 0).count());
}
