use crate::constants::{ORIENTATION_SETTLE_MS, VH_PROPERTY};
use crate::core::{Ticker, ViewportCorrector};
use crate::dom::{self, IntervalTicker, Listener, Timeout};
use crate::frame::FrameScheduler;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::JsCast;
use web_sys as web;

/// Listeners and the fallback poll keeping `--vh` in step with the visible
/// viewport. Dropping it stops everything.
pub struct ViewportWiring {
    pub listeners: Vec<Listener>,
    pub ticker: IntervalTicker,
}

pub fn wire_viewport(window: &web::Window, scheduler: &Rc<FrameScheduler>) -> ViewportWiring {
    let poll_ms = scheduler.scene().borrow().config.viewport_poll_ms;
    let corrector = Rc::new(RefCell::new(ViewportCorrector::new(poll_ms)));
    refresh(&corrector, scheduler);

    let mut listeners = Vec::new();

    let on_resize = {
        let corrector = corrector.clone();
        let scheduler = scheduler.clone();
        move |_: web::Event| refresh(&corrector, &scheduler)
    };
    listeners.extend(Listener::new(window, "resize", on_resize.clone()));
    if let Some(visual) = window.visual_viewport() {
        listeners.extend(Listener::new(&visual, "resize", on_resize));
    }

    // Dimensions are stale when orientationchange fires; measure a little later.
    let pending: Rc<RefCell<Option<Timeout>>> = Rc::new(RefCell::new(None));
    {
        let corrector = corrector.clone();
        let scheduler = scheduler.clone();
        listeners.extend(Listener::new(window, "orientationchange", move |_| {
            let corrector = corrector.clone();
            let scheduler = scheduler.clone();
            *pending.borrow_mut() = Timeout::new(ORIENTATION_SETTLE_MS, move || {
                refresh(&corrector, &scheduler)
            });
        }));
    }

    let mut ticker = IntervalTicker::default();
    let polling = {
        let corrector_for_tick = corrector.clone();
        let scheduler = scheduler.clone();
        corrector.borrow().start_polling(
            &mut ticker,
            Box::new(move || refresh(&corrector_for_tick, &scheduler)),
        )
    };
    log::info!(
        "[viewport] listening (poll {})",
        if polling && ticker.is_running() { "on" } else { "off" }
    );

    ViewportWiring { listeners, ticker }
}

/// Re-measure, publish `--vh` and the embed height if they moved, then ask
/// for a frame so the next threshold uses the new height.
fn refresh(corrector: &RefCell<ViewportCorrector>, scheduler: &Rc<FrameScheduler>) {
    let scene_rc = scheduler.scene();
    {
        let mut scene = scene_rc.borrow_mut();
        let metrics = dom::viewport_metrics(&scene.window);
        if let Some(update) = corrector.borrow_mut().refresh(metrics) {
            scene.viewport_height = update.height_px;
            if let Some(root) = scene
                .document
                .document_element()
                .and_then(|e| e.dyn_into::<web::HtmlElement>().ok())
            {
                dom::set_style(&root, VH_PROPERTY, &update.unit_css());
            }
            dom::set_style(&scene.refs.embed, "height", &update.height_css());
            log::debug!("[viewport] visible height {:.0}px", update.height_px);
        }
    }
    scheduler.request();
}
