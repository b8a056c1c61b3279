use crate::dom::Listener;
use crate::frame::FrameScheduler;
use std::rc::Rc;
use web_sys as web;

/// Any of these can move the page; each one only asks for a frame.
const WINDOW_EVENTS: [&str; 3] = ["scroll", "wheel", "touchmove"];

pub fn wire_scroll(
    window: &web::Window,
    document: &web::Document,
    scheduler: &Rc<FrameScheduler>,
) -> Vec<Listener> {
    let window_target: &web::EventTarget = window;
    let document_target: &web::EventTarget = document;

    let mut listeners: Vec<Listener> = WINDOW_EVENTS
        .iter()
        .filter_map(|&event| {
            let scheduler = scheduler.clone();
            Listener::new(window_target, event, move |_| scheduler.request())
        })
        .collect();

    // Some engines only deliver scroll to the document.
    let scheduler = scheduler.clone();
    listeners.extend(Listener::new(document_target, "scroll", move |_| {
        scheduler.request()
    }));
    listeners
}
