use crate::constants::{DOM_SETTLE_MS, ENGINE_GLOBAL, ENGINE_SCRIPT_MARKER, ENGINE_SCRIPT_URL};
use crate::core::{EmbedLoader, EngineHost, LoadStep, LoaderError, RetryPolicy};
use crate::dom;
use std::cell::RefCell;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::spawn_local;
use web_sys as web;

// The loader outlives any single view so the engine is initialized once per page.
thread_local! {
    static EMBED: RefCell<EmbedSlot> = RefCell::new(EmbedSlot {
        loader: EmbedLoader::new(RetryPolicy::default()),
        host: None,
    });
    // Load/error callbacks of the injected script; they must outlive the view.
    static SCRIPT_HOOKS: RefCell<Option<ScriptHooks>> = const { RefCell::new(None) };
}

struct EmbedSlot {
    loader: EmbedLoader,
    host: Option<WebHost>,
}

struct ScriptHooks {
    _onload: Closure<dyn FnMut()>,
    _onerror: Closure<dyn FnMut()>,
}

pub fn is_initialized() -> bool {
    EMBED.with(|slot| slot.borrow().loader.is_initialized())
}

/// Start (or resume) bringing up the engine for `container`.
pub fn mount(document: &web::Document, container: &web::HtmlElement) {
    let host = WebHost {
        document: document.clone(),
        container: container.clone(),
    };
    EMBED.with(|slot| slot.borrow_mut().host = Some(host));

    spawn_local(async move {
        dom::wait_for_dom(DOM_SETTLE_MS).await;
        // The view may have been remounted while we waited; polls belong to
        // whichever epoch is current when the loader actually starts.
        let Some((step, epoch)) = with_host(|loader, host| loader.mount_sequence(host)) else {
            return;
        };
        follow(step, epoch).await;
    });
}

/// Drop the view's container and stop any pending polls.
pub fn unmount() {
    EMBED.with(|slot| {
        let mut slot = slot.borrow_mut();
        slot.loader.suspend();
        slot.host = None;
    });
}

/// Runs `f` against the mounted host. `None` once the view is gone.
fn with_host<R>(f: impl FnOnce(&mut EmbedLoader, &mut WebHost) -> R) -> Option<R> {
    EMBED.with(|slot| {
        let mut slot = slot.borrow_mut();
        let EmbedSlot { loader, host } = &mut *slot;
        host.as_mut().map(|host| f(loader, host))
    })
}

async fn follow(mut step: LoadStep, epoch: u32) {
    while let LoadStep::RetryAfter(ms) = step {
        dom::sleep_ms(ms.min(i32::MAX as u32) as i32).await;
        step = with_host(|loader, host| loader.poll(host, epoch)).unwrap_or(LoadStep::Stale);
    }
    if step.announces_engine() {
        announce_scroll();
    }
    // failures are logged by the loader itself
    match step {
        LoadStep::Ready => log::info!("[embed] engine initialized"),
        LoadStep::AwaitScript => log::debug!("[embed] waiting for engine script"),
        other => log::debug!("[embed] load sequence ended: {:?}", other),
    }
}

/// Let the engine pick up the current scroll position. Runs with the loader
/// released, since page scroll listeners may call back into this module.
fn announce_scroll() {
    if let (Some(window), Ok(event)) = (web::window(), web::Event::new("scroll")) {
        _ = window.dispatch_event(&event);
    }
}

fn on_script_load() {
    let (step, epoch, mounted) = EMBED.with(|slot| {
        let mut slot = slot.borrow_mut();
        let step = slot.loader.script_loaded();
        let mounted = slot.host.is_some();
        if !mounted {
            slot.loader.suspend();
        }
        (step, slot.loader.epoch(), mounted)
    });
    if mounted {
        spawn_local(follow(step, epoch));
    }
}

fn on_script_error() {
    // The dead tag goes whether or not a view is mounted; otherwise every
    // later mount would wait on it instead of injecting a fresh one.
    discard_script();
    EMBED.with(|slot| {
        slot.borrow_mut()
            .loader
            .script_failed(LoaderError::ScriptLoad(ENGINE_SCRIPT_URL.to_string()));
    });
}

fn discard_script() {
    let Some(document) = dom::window_document() else {
        return;
    };
    if let Ok(Some(el)) = document.query_selector(&script_selector()) {
        el.remove();
    }
}

struct WebHost {
    document: web::Document,
    container: web::HtmlElement,
}

impl EngineHost for WebHost {
    fn engine_ready(&self) -> bool {
        engine_init().is_some()
    }

    fn container_attached(&self) -> bool {
        self.container.is_connected()
    }

    fn script_present(&self) -> bool {
        matches!(self.document.query_selector(&script_selector()), Ok(Some(_)))
    }

    fn inject_script(&mut self) -> Result<(), LoaderError> {
        let inject_err = |e: JsValue| LoaderError::Inject(format!("{:?}", e));
        let script = self
            .document
            .create_element("script")
            .map_err(inject_err)?
            .dyn_into::<web::HtmlScriptElement>()
            .map_err(|_| LoaderError::Inject("created element is not a script".into()))?;
        script.set_src(ENGINE_SCRIPT_URL);
        script.set_async(true);
        script.set_cross_origin(Some("anonymous"));

        let onload = Closure::<dyn FnMut()>::new(on_script_load);
        let onerror = Closure::<dyn FnMut()>::new(on_script_error);
        script.set_onload(Some(onload.as_ref().unchecked_ref()));
        script.set_onerror(Some(onerror.as_ref().unchecked_ref()));

        let parent: web::Node = match (self.document.head(), self.document.body()) {
            (Some(head), _) => head.into(),
            (None, Some(body)) => body.into(),
            (None, None) => return Err(LoaderError::Inject("document has no head or body".into())),
        };
        parent.append_child(&script).map_err(inject_err)?;

        SCRIPT_HOOKS.with(|hooks| {
            *hooks.borrow_mut() = Some(ScriptHooks {
                _onload: onload,
                _onerror: onerror,
            })
        });
        Ok(())
    }

    fn call_init(&mut self) -> Result<(), LoaderError> {
        let (engine, init) = engine_init().ok_or(LoaderError::EngineMissing)?;
        init.call0(&engine)
            .map(|_| ())
            .map_err(|e| LoaderError::InitFailed(format!("{:?}", e)))
    }
}

fn script_selector() -> String {
    format!("script[src*=\"{ENGINE_SCRIPT_MARKER}\"]")
}

/// The engine global and its `init` function, if both exist.
fn engine_init() -> Option<(JsValue, js_sys::Function)> {
    let window = web::window()?;
    let engine = js_sys::Reflect::get(&window, &JsValue::from_str(ENGINE_GLOBAL)).ok()?;
    if engine.is_undefined() || engine.is_null() {
        return None;
    }
    let init = js_sys::Reflect::get(&engine, &JsValue::from_str("init"))
        .ok()?
        .dyn_into::<js_sys::Function>()
        .ok()?;
    Some((engine, init))
}
