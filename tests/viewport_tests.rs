// Host-side tests for the viewport-height corrector.
// The main crate is wasm-only, so we include the pure-Rust modules directly.

#![allow(dead_code)]
mod constants {
    include!("../src/core/constants.rs");
}
mod viewport {
    include!("../src/core/viewport.rs");
}

use viewport::*;

fn metrics(inner: f64, visual: Option<f64>) -> ViewportMetrics {
    ViewportMetrics {
        inner_height: inner,
        visual_height: visual,
        visual_scale: visual.map(|_| 1.0),
    }
}

/// Records the period and lets the test fire ticks by hand.
#[derive(Default)]
struct ManualTicker {
    period_ms: Option<u32>,
    tick: Option<Box<dyn FnMut()>>,
}

impl ManualTicker {
    fn fire(&mut self) {
        if let Some(tick) = self.tick.as_mut() {
            tick();
        }
    }
}

impl Ticker for ManualTicker {
    fn start(&mut self, period_ms: u32, tick: Box<dyn FnMut()>) {
        self.period_ms = Some(period_ms);
        self.tick = Some(tick);
    }

    fn stop(&mut self) {
        self.period_ms = None;
        self.tick = None;
    }

    fn is_running(&self) -> bool {
        self.tick.is_some()
    }
}

#[test]
fn prefers_visual_viewport_height() {
    assert_eq!(metrics(900.0, Some(812.0)).visible_height(), 812.0);
    assert_eq!(metrics(900.0, None).visible_height(), 900.0);
    assert_eq!(metrics(900.0, Some(0.0)).visible_height(), 900.0);
    assert_eq!(metrics(900.0, Some(f64::NAN)).visible_height(), 900.0);
}

#[test]
fn pinch_zoom_falls_back_to_inner_height() {
    let zoomed = ViewportMetrics {
        inner_height: 900.0,
        visual_height: Some(450.0),
        visual_scale: Some(2.0),
    };
    assert_eq!(zoomed.visible_height(), 900.0);

    let mut corrector = ViewportCorrector::new(None);
    assert_eq!(corrector.refresh(metrics(900.0, Some(812.0))).unwrap().height_px, 812.0);
    // zooming in must not drag --vh along with it
    assert_eq!(corrector.refresh(zoomed).unwrap().height_px, 900.0);

    let unknown_scale = ViewportMetrics {
        visual_scale: None,
        ..zoomed
    };
    assert_eq!(unknown_scale.visible_height(), 450.0);
}

#[test]
fn publishes_one_percent_of_visible_height() {
    let mut corrector = ViewportCorrector::new(None);
    let update = corrector.refresh(metrics(900.0, Some(812.0))).unwrap();
    assert!((update.unit_px - 8.12).abs() < 1e-9);
    assert_eq!(update.height_px, 812.0);
    assert_eq!(update.unit_css(), "8.120px");
    assert_eq!(update.height_css(), "812.0px");
    assert_eq!(corrector.last_height(), Some(812.0));
}

#[test]
fn ignores_sub_pixel_jitter() {
    let mut corrector = ViewportCorrector::new(None);
    assert!(corrector.refresh(metrics(800.0, None)).is_some());
    assert!(corrector.refresh(metrics(800.0, None)).is_none());
    assert!(corrector.refresh(metrics(800.4, None)).is_none());
    // address bar collapsed
    let update = corrector.refresh(metrics(856.0, None)).unwrap();
    assert_eq!(update.height_px, 856.0);
}

#[test]
fn zero_height_is_never_published() {
    let mut corrector = ViewportCorrector::new(None);
    assert!(corrector.refresh(metrics(0.0, None)).is_none());
    assert!(corrector.refresh(metrics(-20.0, Some(0.0))).is_none());
    assert_eq!(corrector.last_height(), None);
}

#[test]
fn polling_runs_on_the_configured_period() {
    use std::cell::Cell;
    use std::rc::Rc;

    let corrector = ViewportCorrector::new(Some(500));
    let mut ticker = ManualTicker::default();
    let ticks = Rc::new(Cell::new(0));
    let counter = ticks.clone();
    assert!(corrector.start_polling(&mut ticker, Box::new(move || counter.set(counter.get() + 1))));
    assert_eq!(ticker.period_ms, Some(500));

    ticker.fire();
    ticker.fire();
    assert_eq!(ticks.get(), 2);

    ticker.stop();
    ticker.fire();
    assert_eq!(ticks.get(), 2);
    assert!(!ticker.is_running());
}

#[test]
fn polling_can_be_disabled() {
    let mut ticker = ManualTicker::default();
    assert!(!ViewportCorrector::new(None).start_polling(&mut ticker, Box::new(|| {})));
    assert!(!ViewportCorrector::new(Some(0)).start_polling(&mut ticker, Box::new(|| {})));
    assert!(!ticker.is_running());

    let mut disabled = DisabledTicker;
    assert!(ViewportCorrector::new(Some(500)).start_polling(&mut disabled, Box::new(|| {})));
    assert!(!disabled.is_running());
}
