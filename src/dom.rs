use crate::core::{PageConfig, Ticker, ViewportMetrics, CONFIG_KEYS};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys as web;

#[inline]
pub fn window_document() -> Option<web::Document> {
    web::window().and_then(|w| w.document())
}

#[inline]
pub fn set_style(el: &web::HtmlElement, property: &str, value: &str) {
    _ = el.style().set_property(property, value);
}

/// Current vertical scroll offset. Engines disagree on which accessor is
/// populated, so take the first one that yields a number.
pub fn scroll_offset(window: &web::Window) -> f64 {
    if let Ok(y) = window.scroll_y() {
        if y.is_finite() {
            return y;
        }
    }
    if let Ok(y) = window.page_y_offset() {
        if y.is_finite() {
            return y;
        }
    }
    let Some(document) = window.document() else {
        return 0.0;
    };
    if let Some(root) = document.document_element() {
        let top = root.scroll_top();
        if top != 0 {
            return top as f64;
        }
    }
    document.body().map(|b| b.scroll_top() as f64).unwrap_or(0.0)
}

pub fn viewport_metrics(window: &web::Window) -> ViewportMetrics {
    let inner_height = window
        .inner_height()
        .ok()
        .and_then(|v| v.as_f64())
        .unwrap_or(0.0);
    let visual = window.visual_viewport();
    ViewportMetrics {
        inner_height,
        visual_height: visual.as_ref().map(|vv| vv.height()),
        visual_scale: visual.as_ref().map(|vv| vv.scale()),
    }
}

pub fn document_scroll_height(document: &web::Document) -> f64 {
    let root = document.document_element().map(|e| e.scroll_height()).unwrap_or(0);
    let body = document.body().map(|b| b.scroll_height()).unwrap_or(0);
    root.max(body) as f64
}

/// Page overrides from `data-*` attributes on the root element.
pub fn read_config(root: &web::Element) -> PageConfig {
    let overrides: Vec<(&str, String)> = CONFIG_KEYS
        .iter()
        .filter_map(|key| {
            root.get_attribute(&format!("data-{key}"))
                .map(|value| (*key, value))
        })
        .collect();
    let (config, errors) =
        PageConfig::from_pairs(overrides.iter().map(|(k, v)| (*k, v.as_str())));
    for e in errors {
        log::warn!("[config] {}", e);
    }
    config
}

/// An event listener that unregisters itself when dropped.
pub struct Listener {
    target: web::EventTarget,
    event: &'static str,
    callback: Closure<dyn FnMut(web::Event)>,
}

impl Listener {
    pub fn new(
        target: &web::EventTarget,
        event: &'static str,
        handler: impl FnMut(web::Event) + 'static,
    ) -> Option<Self> {
        let callback = Closure::<dyn FnMut(web::Event)>::new(handler);
        let options = web::AddEventListenerOptions::new();
        options.set_passive(true);
        if let Err(e) = target.add_event_listener_with_callback_and_add_event_listener_options(
            event,
            callback.as_ref().unchecked_ref(),
            &options,
        ) {
            log::warn!("failed to listen for {}: {:?}", event, e);
            return None;
        }
        Some(Self {
            target: target.clone(),
            event,
            callback,
        })
    }
}

impl Drop for Listener {
    fn drop(&mut self) {
        _ = self
            .target
            .remove_event_listener_with_callback(self.event, self.callback.as_ref().unchecked_ref());
    }
}

/// One-shot timer, cleared on drop if it has not fired.
pub struct Timeout {
    handle: i32,
    _callback: Closure<dyn FnMut()>,
}

impl Timeout {
    pub fn new(ms: i32, handler: impl FnOnce() + 'static) -> Option<Self> {
        let window = web::window()?;
        let callback = Closure::once(handler);
        let handle = window
            .set_timeout_with_callback_and_timeout_and_arguments_0(
                callback.as_ref().unchecked_ref(),
                ms,
            )
            .ok()?;
        Some(Self {
            handle,
            _callback: callback,
        })
    }
}

impl Drop for Timeout {
    fn drop(&mut self) {
        if let Some(w) = web::window() {
            w.clear_timeout_with_handle(self.handle);
        }
    }
}

/// `setInterval`-backed [`Ticker`].
#[derive(Default)]
pub struct IntervalTicker {
    handle: Option<i32>,
    callback: Option<Closure<dyn FnMut()>>,
}

impl Ticker for IntervalTicker {
    fn start(&mut self, period_ms: u32, mut tick: Box<dyn FnMut()>) {
        self.stop();
        let Some(window) = web::window() else {
            return;
        };
        let callback = Closure::<dyn FnMut()>::new(move || tick());
        match window.set_interval_with_callback_and_timeout_and_arguments_0(
            callback.as_ref().unchecked_ref(),
            period_ms.min(i32::MAX as u32) as i32,
        ) {
            Ok(handle) => {
                self.handle = Some(handle);
                self.callback = Some(callback);
            }
            Err(e) => log::warn!("failed to start interval: {:?}", e),
        }
    }

    fn stop(&mut self) {
        if let (Some(handle), Some(w)) = (self.handle.take(), web::window()) {
            w.clear_interval_with_handle(handle);
        }
        self.callback = None;
    }

    fn is_running(&self) -> bool {
        self.handle.is_some()
    }
}

impl Drop for IntervalTicker {
    fn drop(&mut self) {
        self.stop();
    }
}

/// Resolves after `ms` milliseconds.
pub async fn sleep_ms(ms: i32) {
    let promise = js_sys::Promise::new(&mut |resolve, _reject| {
        let scheduled = web::window().and_then(|w| {
            w.set_timeout_with_callback_and_timeout_and_arguments_0(&resolve, ms)
                .ok()
        });
        if scheduled.is_none() {
            _ = resolve.call0(&JsValue::NULL);
        }
    });
    _ = wasm_bindgen_futures::JsFuture::from(promise).await;
}

/// Resolves once the document is interactive, plus a short settle delay so
/// freshly rendered markup is attached.
pub async fn wait_for_dom(settle_ms: i32) {
    if let Some(document) = window_document() {
        if document.ready_state() == "loading" {
            let promise = js_sys::Promise::new(&mut |resolve, _reject| {
                let options = web::AddEventListenerOptions::new();
                options.set_once(true);
                _ = document.add_event_listener_with_callback_and_add_event_listener_options(
                    "DOMContentLoaded",
                    &resolve,
                    &options,
                );
            });
            _ = wasm_bindgen_futures::JsFuture::from(promise).await;
        }
    }
    sleep_ms(settle_ms).await;
}
