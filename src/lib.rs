#![cfg(target_arch = "wasm32")]
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use web_sys as web;

mod constants;
mod core;
mod dom;
mod embed;
mod events;
mod frame;
mod markup;

thread_local! {
    static VIEW: RefCell<Option<View>> = const { RefCell::new(None) };
}

/// A mounted page. Dropping it releases every listener, timer and pending
/// frame so nothing acts on detached elements.
struct View {
    scroll_listeners: Vec<dom::Listener>,
    panel_listeners: Vec<dom::Listener>,
    viewport: events::ViewportWiring,
    scheduler: Rc<frame::FrameScheduler>,
}

impl Drop for View {
    fn drop(&mut self) {
        embed::unmount();
        self.scroll_listeners.clear();
        self.panel_listeners.clear();
        self.viewport.listeners.clear();
        self.scheduler.scene().borrow_mut().clear_timers();
        self.scheduler.cancel();
        log::info!("[view] torn down");
    }
}

fn mount_view() -> anyhow::Result<View> {
    let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
    let document = window
        .document()
        .ok_or_else(|| anyhow::anyhow!("no document"))?;

    let refs = markup::render(&document)?;
    let config = dom::read_config(&refs.root);
    log::info!(
        "[view] threshold={:?} easing={} shrink={} reveal={:.0}..{:.0}px",
        config.threshold,
        config.easing,
        config.shrink,
        config.reveal.start,
        config.reveal.end
    );

    let embed_el = refs.embed.clone();
    let scene = Rc::new(RefCell::new(frame::Scene::new(
        window.clone(),
        document.clone(),
        refs,
        config,
    )));
    // Paint the current scroll position before any event arrives.
    scene.borrow_mut().render();

    let scheduler = frame::FrameScheduler::new(window.clone(), scene);
    let scroll_listeners = events::wire_scroll(&window, &document, &scheduler);
    let panel_listeners = events::wire_panels(&scheduler);
    let viewport = events::wire_viewport(&window, &scheduler);

    embed::mount(&document, &embed_el);

    Ok(View {
        scroll_listeners,
        panel_listeners,
        viewport,
        scheduler,
    })
}

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("folio-web starting");
    mount()
}

/// Mount the view; a no-op if it is already mounted.
#[wasm_bindgen]
pub fn mount() -> Result<(), JsValue> {
    if VIEW.with(|v| v.borrow().is_some()) {
        return Ok(());
    }
    let view = mount_view().map_err(|e| {
        log::error!("mount error: {:?}", e);
        JsValue::from_str(&e.to_string())
    })?;
    VIEW.with(|v| *v.borrow_mut() = Some(view));
    Ok(())
}

/// Tear the view down. The engine is not re-initialized by a later mount.
#[wasm_bindgen]
pub fn unmount() {
    let view = VIEW.with(|v| v.borrow_mut().take());
    drop(view);
}

#[wasm_bindgen(js_name = embedInitialized)]
pub fn embed_initialized() -> bool {
    embed::is_initialized()
}
