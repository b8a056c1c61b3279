use crate::constants::{PRESSED_CLASS, RELEASING_CLASS};
use crate::core::Release;
use crate::dom::{self, Listener, Timeout};
use crate::frame::{FrameScheduler, Scene};
use std::cell::RefCell;
use std::rc::{Rc, Weak};

#[derive(Clone, Copy, Debug)]
enum PanelAction {
    Press,
    Release,
    Leave,
}

// Pointer and touch both fire on most phones; the panel machine ignores
// whichever arrives second.
const PANEL_EVENTS: [(&str, PanelAction); 7] = [
    ("pointerdown", PanelAction::Press),
    ("touchstart", PanelAction::Press),
    ("pointerup", PanelAction::Release),
    ("touchend", PanelAction::Release),
    ("pointerleave", PanelAction::Leave),
    ("pointercancel", PanelAction::Leave),
    ("touchcancel", PanelAction::Leave),
];

pub fn wire_panels(scheduler: &Rc<FrameScheduler>) -> Vec<Listener> {
    let elements = scheduler.scene().borrow().refs.panels.clone();
    let mut listeners = Vec::with_capacity(elements.len() * PANEL_EVENTS.len());
    for (index, el) in elements.iter().enumerate() {
        for (event, action) in PANEL_EVENTS {
            let scheduler = scheduler.clone();
            listeners.extend(Listener::new(el, event, move |_| {
                handle_panel(&scheduler, index, action)
            }));
        }
    }
    listeners
}

fn handle_panel(scheduler: &Rc<FrameScheduler>, index: usize, action: PanelAction) {
    let scene_rc = scheduler.scene();
    let resume_scroll_pass = {
        let mut scene = scene_rc.borrow_mut();
        let Some(el) = scene.refs.panels.get(index).cloned() else {
            return;
        };
        let classes = el.class_list();
        match action {
            PanelAction::Press => {
                if let Some(transform) = scene.panels[index].press() {
                    // a re-press cancels any release still settling
                    scene.release_timers[index] = None;
                    _ = classes.remove_1(RELEASING_CLASS);
                    _ = el.style().remove_property("transition-duration");
                    _ = classes.add_1(PRESSED_CLASS);
                    dom::set_style(&el, "transform", &transform);
                }
                false
            }
            PanelAction::Leave => match scene.panels[index].leave() {
                Some(transform) => {
                    _ = classes.remove_1(PRESSED_CLASS);
                    dom::set_style(&el, "transform", &transform);
                    true
                }
                None => false,
            },
            PanelAction::Release => {
                if let Some(Release {
                    token,
                    transform,
                    duration_css,
                    duration_ms,
                }) = scene.panels[index].release()
                {
                    _ = classes.remove_1(PRESSED_CLASS);
                    dom::set_style(&el, "transition-duration", &duration_css);
                    _ = classes.add_1(RELEASING_CLASS);
                    dom::set_style(&el, "transform", &transform);

                    let ms = duration_ms.min(i32::MAX as u32) as i32;
                    let weak_scene = Rc::downgrade(scene_rc);
                    let weak_scheduler = Rc::downgrade(scheduler);
                    scene.release_timers[index] = Timeout::new(ms, move || {
                        settle_panel(&weak_scene, &weak_scheduler, index, token)
                    });
                    log::debug!("[panel] {} releasing (token {})", index, token);
                }
                false
            }
        }
    };
    if resume_scroll_pass {
        scheduler.request();
    }
}

fn settle_panel(
    scene: &Weak<RefCell<Scene>>,
    scheduler: &Weak<FrameScheduler>,
    index: usize,
    token: u32,
) {
    let (Some(scene), Some(scheduler)) = (scene.upgrade(), scheduler.upgrade()) else {
        return;
    };
    {
        let mut scene = scene.borrow_mut();
        if !scene.panels[index].settle(token) {
            return;
        }
        if let Some(el) = scene.refs.panels.get(index) {
            _ = el.class_list().remove_1(RELEASING_CLASS);
            _ = el.style().remove_property("transition-duration");
        }
    }
    scheduler.request();
}
