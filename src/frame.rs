use crate::core::constants::PANEL_COUNT;
use crate::core::{
    distance_from_bottom, embed_placement, staggered, EmbedPlacement, FrameGate, PageConfig,
    PanelState, ScrollState, TextVisual, TransformOrigin,
};
use crate::dom::{self, Timeout};
use crate::markup::PageRefs;
use smallvec::SmallVec;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

/// Everything the scroll pass reads and writes.
pub struct Scene {
    pub window: web::Window,
    pub document: web::Document,
    pub refs: PageRefs,
    pub config: PageConfig,
    pub panels: SmallVec<[PanelState; PANEL_COUNT]>,
    /// Pending release timers, one slot per panel.
    pub release_timers: SmallVec<[Option<Timeout>; PANEL_COUNT]>,
    pub viewport_height: f64,
    gate: FrameGate,
    raf_handle: Option<i32>,
}

impl Scene {
    pub fn new(window: web::Window, document: web::Document, refs: PageRefs, config: PageConfig) -> Self {
        let panels = refs
            .panels
            .iter()
            .map(|_| {
                PanelState::new(config.panel_pressed_scale, TransformOrigin::Bottom)
                    .with_release_ms(config.panel_release_ms)
            })
            .collect();
        let release_timers = refs.panels.iter().map(|_| None).collect();
        let viewport_height = dom::viewport_metrics(&window).visible_height();
        Self {
            window,
            document,
            refs,
            config,
            panels,
            release_timers,
            viewport_height,
            gate: FrameGate::default(),
            raf_handle: None,
        }
    }

    /// Animation-frame callback.
    fn on_frame(&mut self) {
        self.gate.begin_frame();
        self.raf_handle = None;
        self.render();
    }

    /// One scroll pass: sample, derive, apply. Leaves any pending frame alone.
    pub fn render(&mut self) {
        let offset = dom::scroll_offset(&self.window);
        let state = ScrollState::sample(offset, self.viewport_height, self.config.threshold);

        self.apply_text(&state);
        if self.config.pin_embed {
            self.apply_embed(&state);
        }
        self.apply_panels(&state);
    }

    fn apply_text(&self, state: &ScrollState) {
        let visual = TextVisual::from_state(state, self.config.easing, self.config.shrink);
        dom::set_style(&self.refs.bio, "transform", &visual.transform_css());
        dom::set_style(&self.refs.bio, "opacity", &visual.opacity_css());
    }

    fn apply_embed(&self, state: &ScrollState) {
        let pin = self.config.threshold.resolve(state.viewport_height);
        let embed = &self.refs.embed;
        match embed_placement(state.raw_offset, Some(pin)) {
            EmbedPlacement::Pinned => {
                dom::set_style(embed, "position", "fixed");
                dom::set_style(embed, "top", "0");
            }
            EmbedPlacement::Released { top } => {
                dom::set_style(embed, "position", "absolute");
                dom::set_style(embed, "top", &format!("{:.0}px", top));
            }
        }
        dom::set_style(embed, "left", "50%");
        dom::set_style(embed, "transform", "translateX(-50%)");
    }

    fn apply_panels(&mut self, state: &ScrollState) {
        let scroll_height = dom::document_scroll_height(&self.document);
        let distance = distance_from_bottom(scroll_height, state.viewport_height, state.raw_offset);
        let reveal = self.config.reveal.progress(distance);
        let reveals = staggered(reveal, self.panels.len(), self.config.panel_stagger);

        for ((panel, el), reveal) in self
            .panels
            .iter_mut()
            .zip(self.refs.panels.iter())
            .zip(reveals)
        {
            let visual = panel.visual(reveal, self.config.panel_min_scale);
            dom::set_style(el, "opacity", &visual.opacity_css());
            dom::set_style(el, "transform-origin", visual.transform_origin.as_css());
            // A press or release transition owns the transform until it settles.
            if let Some(transform) = visual.transform_css() {
                dom::set_style(el, "transform", &transform);
            }
        }
    }

    /// Release timers must not outlive the view.
    pub fn clear_timers(&mut self) {
        for slot in self.release_timers.iter_mut() {
            *slot = None;
        }
    }
}

/// Coalesces frame requests onto `requestAnimationFrame`.
pub struct FrameScheduler {
    window: web::Window,
    scene: Rc<RefCell<Scene>>,
    callback: Closure<dyn FnMut()>,
}

impl FrameScheduler {
    pub fn new(window: web::Window, scene: Rc<RefCell<Scene>>) -> Rc<Self> {
        let scene_for_frame = scene.clone();
        let callback = Closure::<dyn FnMut()>::new(move || {
            scene_for_frame.borrow_mut().on_frame();
        });
        Rc::new(Self {
            window,
            scene,
            callback,
        })
    }

    pub fn request(&self) {
        let mut scene = self.scene.borrow_mut();
        if !scene.gate.request() {
            return;
        }
        match self
            .window
            .request_animation_frame(self.callback.as_ref().unchecked_ref())
        {
            Ok(handle) => scene.raf_handle = Some(handle),
            Err(e) => {
                log::warn!("requestAnimationFrame failed: {:?}", e);
                scene.gate.cancel();
            }
        }
    }

    pub fn cancel(&self) {
        let mut scene = self.scene.borrow_mut();
        if let Some(handle) = scene.raf_handle.take() {
            _ = self.window.cancel_animation_frame(handle);
        }
        scene.gate.cancel();
    }

    #[inline]
    pub fn scene(&self) -> &Rc<RefCell<Scene>> {
        &self.scene
    }
}

impl Drop for FrameScheduler {
    fn drop(&mut self) {
        self.cancel();
    }
}
