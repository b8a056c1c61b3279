// Host-side tests for scroll progress, text visuals and the panel reveal ramp.
// The main crate is wasm-only, so we include the pure-Rust modules directly.

#![allow(dead_code)]
mod constants {
    include!("../src/core/constants.rs");
}
mod easing {
    include!("../src/core/easing.rs");
}
mod scroll {
    include!("../src/core/scroll.rs");
}

use easing::Easing;
use scroll::*;

const EPS: f64 = 1e-9;

fn curves() -> [Easing; 4] {
    [
        Easing::Linear,
        Easing::Cubic,
        Easing::Quintic,
        Easing::Spring {
            damping_ratio: 0.8,
            frequency: 0.3,
        },
    ]
}

#[test]
fn half_viewport_threshold_scenario() {
    let state = ScrollState::sample(200.0, 800.0, Threshold::ViewportFraction(0.5));
    assert!((state.progress - 0.5).abs() < EPS);

    let visual = TextVisual::from_state(&state, Easing::Linear, 0.9);
    assert!((visual.scale - 0.55).abs() < EPS);
    assert!((visual.opacity - 0.5).abs() < EPS);
    assert!((visual.translate_y + 400.0).abs() < EPS);
    assert_eq!(
        visual.transform_css(),
        "translate(-50%, calc(-50% + -400.00px)) scale(0.5500)"
    );
    assert_eq!(visual.opacity_css(), "0.5000");
}

#[test]
fn offsets_past_threshold_are_fully_faded() {
    for offset in [400.0, 401.0, 1_000.0, 1e9] {
        let state = ScrollState::sample(offset, 800.0, Threshold::ViewportFraction(0.5));
        assert_eq!(state.progress, 1.0, "offset {offset}");
        for curve in curves() {
            let visual = TextVisual::from_state(&state, curve, 0.9);
            assert_eq!(visual.opacity, 0.0, "offset {offset} with {curve}");
        }
    }
}

#[test]
fn offsets_at_or_above_top_leave_text_untouched() {
    for offset in [0.0, -10.0, -1e6] {
        let state = ScrollState::sample(offset, 800.0, Threshold::Pixels(1800.0));
        assert_eq!(state.progress, 0.0);
        for curve in curves() {
            let visual = TextVisual::from_state(&state, curve, 0.9);
            assert_eq!(visual.scale, 1.0);
            assert_eq!(visual.translate_y, 0.0);
            assert!(visual.translate_y.is_sign_positive());
            assert_eq!(visual.opacity, 1.0);
        }
    }
}

#[test]
fn opacity_ignores_the_easing_curve() {
    let state = ScrollState::sample(200.0, 800.0, Threshold::ViewportFraction(0.5));
    let quintic = TextVisual::from_state(&state, Easing::Quintic, 0.9);
    assert!((quintic.opacity - 0.5).abs() < EPS);
    // quintic(0.5) = 1 - 1/32
    assert!((quintic.scale - (1.0 - 0.96875 * 0.9)).abs() < EPS);
    assert!((quintic.translate_y + 0.96875 * 800.0).abs() < EPS);
}

#[test]
fn zero_threshold_completes_immediately() {
    assert_eq!(progress(0.0, 0.0), 1.0);
    assert_eq!(progress(100.0, 0.0), 1.0);
    assert_eq!(progress(100.0, -5.0), 1.0);
    let state = ScrollState::sample(0.0, 800.0, Threshold::Pixels(0.0));
    assert_eq!(state.progress, 1.0);
    let state = ScrollState::sample(0.0, 0.0, Threshold::ViewportFraction(0.5));
    assert_eq!(state.progress, 1.0);
}

#[test]
fn nan_offset_counts_as_top() {
    assert_eq!(progress(f64::NAN, 400.0), 0.0);
}

#[test]
fn threshold_resolution() {
    assert_eq!(Threshold::Pixels(1800.0).resolve(800.0), 1800.0);
    assert_eq!(Threshold::ViewportFraction(0.5).resolve(800.0), 400.0);
    assert_eq!(Threshold::Pixels(-20.0).resolve(800.0), 0.0);
}

#[test]
fn larger_viewport_stretches_the_threshold() {
    let small = ScrollState::sample(300.0, 800.0, Threshold::ViewportFraction(0.5));
    let large = ScrollState::sample(300.0, 1200.0, Threshold::ViewportFraction(0.5));
    assert!((small.progress - 0.75).abs() < EPS);
    assert!((large.progress - 0.5).abs() < EPS);
}

#[test]
fn bottom_of_document_scenario() {
    let distance = distance_from_bottom(3000.0, 800.0, 2200.0);
    assert_eq!(distance, 0.0);
    let ramp = RevealRamp {
        start: 0.0,
        end: 800.0,
    };
    assert_eq!(ramp.progress(distance), 1.0);
}

#[test]
fn distance_from_bottom_never_negative() {
    assert_eq!(distance_from_bottom(3000.0, 800.0, 2500.0), 0.0);
    // document shorter than the viewport
    assert_eq!(distance_from_bottom(500.0, 800.0, 0.0), 0.0);
    assert_eq!(distance_from_bottom(3000.0, 800.0, 1000.0), 1200.0);
}

#[test]
fn reveal_ramp_endpoints() {
    let ramp = RevealRamp {
        start: 100.0,
        end: 800.0,
    };
    assert_eq!(ramp.progress(800.0), 0.0);
    assert_eq!(ramp.progress(5_000.0), 0.0);
    assert_eq!(ramp.progress(100.0), 1.0);
    assert_eq!(ramp.progress(50.0), 1.0);
    assert!((ramp.progress(450.0) - 0.5).abs() < EPS);
    assert_eq!(ramp.progress(f64::NAN), 0.0);
}

#[test]
fn reveal_is_monotonic_as_bottom_approaches() {
    let ramp = RevealRamp {
        start: 0.0,
        end: 800.0,
    };
    let mut prev = 0.0;
    let mut distance = 1_000.0;
    while distance >= 0.0 {
        let p = ramp.progress(distance);
        assert!(p >= prev, "reveal dropped at distance {distance}");
        assert!((0.0..=1.0).contains(&p));
        prev = p;
        distance -= 10.0;
    }
    assert_eq!(prev, 1.0);
}

#[test]
fn degenerate_ramp_is_a_step() {
    let ramp = RevealRamp {
        start: 300.0,
        end: 300.0,
    };
    assert_eq!(ramp.progress(300.0), 1.0);
    assert_eq!(ramp.progress(301.0), 0.0);
}

#[test]
fn staggered_panels_trail_each_other() {
    let reveals = staggered(0.5, 4, 0.1);
    assert_eq!(reveals.len(), 4);
    assert!((reveals[0] - 0.5 / 0.7).abs() < EPS);
    assert!((reveals[3] - 0.2 / 0.7).abs() < EPS);
    for pair in reveals.windows(2) {
        assert!(pair[0] >= pair[1]);
    }
}

#[test]
fn staggered_panels_share_endpoints() {
    assert!(staggered(0.0, 4, 0.1).iter().all(|&p| p == 0.0));
    assert!(staggered(1.0, 4, 0.1).iter().all(|&p| (p - 1.0).abs() < EPS));
}

#[test]
fn oversized_stagger_falls_back_to_unison() {
    let reveals = staggered(0.4, 4, 0.5);
    assert!(reveals.iter().all(|&p| p == 0.4));
    assert!(staggered(0.4, 0, 0.1).is_empty());
}

#[test]
fn embed_pins_until_threshold() {
    assert_eq!(embed_placement(100.0, Some(400.0)), EmbedPlacement::Pinned);
    assert_eq!(
        embed_placement(400.0, Some(400.0)),
        EmbedPlacement::Released { top: 400.0 }
    );
    assert_eq!(
        embed_placement(2_000.0, Some(400.0)),
        EmbedPlacement::Released { top: 400.0 }
    );
    assert_eq!(embed_placement(2_000.0, None), EmbedPlacement::Pinned);
}
