use crate::constants::{
    REDUCED_MOTION_QUERY, RIPPLE_CONTAINER_SELECTOR, TRAIL_RIPPLE_CLASS, TRAIL_RIPPLE_SELECTOR,
};
use crate::core::constants::{TRAIL_LIFETIME_MS, TRAIL_RIPPLE_SIZE_PX};
use crate::core::trail::RippleTrail;
use crate::dom;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::JsCast;
use web_sys as web;

fn spawn_ripple(
    document: &web::Document,
    container: &web::Element,
    trail: &RippleTrail,
    x: i32,
    y: i32,
) {
    if let Ok(live) = container.query_selector_all(TRAIL_RIPPLE_SELECTOR) {
        let evict = trail.evictions(live.length() as usize) as u32;
        for i in 0..evict {
            if let Some(old) = live.item(i).and_then(|n| n.dyn_into::<web::Element>().ok()) {
                old.remove();
            }
        }
    }
    let Some(ripple) = document
        .create_element("div")
        .ok()
        .and_then(|e| e.dyn_into::<web::HtmlElement>().ok())
    else {
        return;
    };
    ripple.set_class_name(TRAIL_RIPPLE_CLASS);
    let style = ripple.style();
    let size = format!("{}px", TRAIL_RIPPLE_SIZE_PX);
    _ = style.set_property("left", &format!("{}px", x));
    _ = style.set_property("top", &format!("{}px", y));
    _ = style.set_property("width", &size);
    _ = style.set_property("height", &size);
    _ = style.set_property("pointer-events", "none");
    if container.append_child(&ripple).is_err() {
        return;
    }
    dom::set_timeout(TRAIL_LIFETIME_MS, move || ripple.remove());
}

/// Leaves a fading ring behind the mouse on pages that carry a ripple
/// container. Off entirely under reduced motion.
pub fn wire_cursor_trail(document: &web::Document) {
    let Some(window) = web::window() else {
        return;
    };
    if dom::media_matches(&window, REDUCED_MOTION_QUERY) {
        log::info!("[trail] reduced motion; cursor trail off");
        return;
    }
    let trail = Rc::new(RefCell::new(RippleTrail::default()));
    let doc = document.clone();
    dom::add_listener(document, "mousemove", move |ev: web::MouseEvent| {
        // looked up per event: router swaps add and remove the container
        let Some(container) = dom::query(&doc, RIPPLE_CONTAINER_SELECTOR) else {
            return;
        };
        if !trail.borrow_mut().admit(instant::now()) {
            return;
        }
        spawn_ripple(&doc, &container, &trail.borrow(), ev.page_x(), ev.page_y());
    });
}
