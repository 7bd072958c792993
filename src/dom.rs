use crate::core::quality::{backing_size, QualityTier};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::convert::FromWasmAbi;
use wasm_bindgen::JsCast;
use web_sys as web;

#[inline]
pub fn query(document: &web::Document, selector: &str) -> Option<web::Element> {
    document.query_selector(selector).ok().flatten()
}

#[inline]
pub fn add_click_listener(
    document: &web::Document,
    element_id: &str,
    mut handler: impl FnMut() + 'static,
) {
    if let Some(el) = document.get_element_by_id(element_id) {
        let closure = Closure::wrap(Box::new(move || handler()) as Box<dyn FnMut()>);
        _ = el.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
        closure.forget();
    }
}

/// Attaches `handler` for the lifetime of the page.
pub fn add_listener<E: FromWasmAbi + 'static>(
    target: &web::EventTarget,
    event: &str,
    handler: impl FnMut(E) + 'static,
) {
    let closure = Closure::wrap(Box::new(handler) as Box<dyn FnMut(E)>);
    _ = target.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref());
    closure.forget();
}

/// Capture-phase variant of [`add_listener`].
pub fn add_capture_listener<E: FromWasmAbi + 'static>(
    target: &web::EventTarget,
    event: &str,
    handler: impl FnMut(E) + 'static,
) {
    let closure = Closure::wrap(Box::new(handler) as Box<dyn FnMut(E)>);
    _ = target.add_event_listener_with_callback_and_bool(
        event,
        closure.as_ref().unchecked_ref(),
        true,
    );
    closure.forget();
}

/// Self-rescheduling `requestAnimationFrame` callback slot.
pub type FrameTick = Rc<RefCell<Option<Closure<dyn FnMut()>>>>;

pub fn request_frame(tick: &FrameTick) {
    let Some(w) = web::window() else {
        return;
    };
    if let Some(cb) = tick.borrow().as_ref() {
        _ = w.request_animation_frame(cb.as_ref().unchecked_ref());
    }
}

pub fn media_matches(window: &web::Window, query: &str) -> bool {
    window
        .match_media(query)
        .ok()
        .flatten()
        .is_some_and(|m| m.matches())
}

/// One-shot `setTimeout`.
pub fn set_timeout(ms: i32, f: impl FnOnce() + 'static) {
    if let Some(w) = web::window() {
        let cb = Closure::once_into_js(f);
        _ = w.set_timeout_with_callback_and_timeout_and_arguments_0(cb.unchecked_ref(), ms);
    }
}

/// True when the event target (or an ancestor) matches `selector`.
pub fn target_closest(target: Option<web::EventTarget>, selector: &str) -> Option<web::Element> {
    target
        .and_then(|t| t.dyn_into::<web::Element>().ok())
        .and_then(|el| el.closest(selector).ok().flatten())
}

/// Visual viewport when available, else the layout viewport, in CSS pixels.
pub fn viewport_size(window: &web::Window) -> (f64, f64) {
    if let Some(vv) = window.visual_viewport() {
        return (vv.width(), vv.height());
    }
    let w = window
        .inner_width()
        .ok()
        .and_then(|v| v.as_f64())
        .unwrap_or(1.0);
    let h = window
        .inner_height()
        .ok()
        .and_then(|v| v.as_f64())
        .unwrap_or(1.0);
    (w, h)
}

/// Sizes the canvas to the viewport and its backing store to
/// viewport x DPR x tier scale. Returns the new backing size.
pub fn sync_canvas_backing_size(canvas: &web::HtmlCanvasElement, tier: QualityTier) -> (u32, u32) {
    let Some(w) = web::window() else {
        return (canvas.width(), canvas.height());
    };
    let dpr = w.device_pixel_ratio();
    let (css_w, css_h) = viewport_size(&w);
    let style = canvas.style();
    _ = style.set_property("width", &format!("{}px", css_w));
    _ = style.set_property("height", &format!("{}px", css_h));
    let (w_px, h_px) = backing_size(css_w, css_h, dpr, tier);
    if canvas.width() != w_px {
        canvas.set_width(w_px);
    }
    if canvas.height() != h_px {
        canvas.set_height(h_px);
    }
    (w_px, h_px)
}

pub fn local_storage_get(key: &str) -> Option<String> {
    let storage = match web::window().map(|w| w.local_storage()) {
        Some(Ok(Some(s))) => s,
        Some(Err(e)) => {
            log::warn!("[storage] unavailable: {:?}", e);
            return None;
        }
        _ => return None,
    };
    match storage.get_item(key) {
        Ok(v) => v,
        Err(e) => {
            log::warn!("[storage] read of {} failed: {:?}", key, e);
            None
        }
    }
}

pub fn local_storage_set(key: &str, value: &str) {
    match web::window().map(|w| w.local_storage()) {
        Some(Ok(Some(s))) => {
            if let Err(e) = s.set_item(key, value) {
                log::warn!("[storage] unable to persist {}: {:?}", key, e);
            }
        }
        Some(Err(e)) => log::warn!("[storage] unavailable: {:?}", e),
        _ => {}
    }
}
