use crate::constants::*;
use crate::dom;
use js_sys::{Function, Object, Promise, Reflect};
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::{spawn_local, JsFuture};
use web_sys as web;

// ---------------- Updates overlay ----------------

/// Opens every updates overlay on the page (page load and after each swap).
pub fn open_overlays(document: &web::Document) {
    let Ok(list) = document.query_selector_all(OVERLAY_SELECTOR) else {
        return;
    };
    let has_overlay = list.length() > 0;
    if let Some(body) = document.body() {
        _ = body
            .class_list()
            .toggle_with_force(HAS_OVERLAY_CLASS, has_overlay);
    }
    for i in 0..list.length() {
        if let Some(el) = list.item(i).and_then(|n| n.dyn_into::<web::HtmlElement>().ok()) {
            // reflow so the open transition starts from the closed style
            _ = el.offset_width();
            _ = el.class_list().add_1(OVERLAY_OPEN_CLASS);
            _ = el.set_attribute("aria-hidden", "false");
        }
    }
    if has_overlay {
        if let Some(w) = web::window() {
            w.scroll_to_with_x_and_y(0.0, 0.0);
        }
    }
}

#[inline]
pub fn open_overlay(document: &web::Document) -> Option<web::Element> {
    dom::query(document, OPEN_OVERLAY_SELECTOR)
}

#[inline]
pub fn is_open(document: &web::Document) -> bool {
    open_overlay(document).is_some()
}

fn dismiss_url_of(link: Option<web::Element>) -> String {
    link.and_then(|l| l.get_attribute(DISMISS_URL_ATTR))
        .filter(|u| !u.is_empty())
        .unwrap_or_else(|| DEFAULT_DISMISS_URL.to_owned())
}

/// URL the overlay's dismiss link points at, `/` if none.
pub fn dismiss_url(overlay: &web::Element) -> String {
    dismiss_url_of(overlay.query_selector(DISMISS_SELECTOR).ok().flatten())
}

/// Plays the closing transition, then navigates to `url`.
pub fn close_and_navigate(document: &web::Document, overlay: &web::Element, url: String) {
    let cl = overlay.class_list();
    _ = cl.add_1(OVERLAY_CLOSING_CLASS);
    _ = cl.remove_1(OVERLAY_OPEN_CLASS);
    _ = overlay.set_attribute("aria-hidden", "true");
    if let Some(body) = document.body() {
        _ = body.class_list().remove_1(HAS_OVERLAY_CLASS);
    }
    dom::set_timeout(OVERLAY_CLOSE_MS, move || navigate(&url));
}

/// Closes the open overlay, if any. Returns `true` when one was closed.
pub fn close_open_overlay(document: &web::Document) -> bool {
    let Some(overlay) = open_overlay(document) else {
        return false;
    };
    let url = dismiss_url(&overlay);
    close_and_navigate(document, &overlay, url);
    true
}

/// Swaps the page through the router when present, else a full navigation.
pub fn navigate(url: &str) {
    let Some(window) = web::window() else {
        return;
    };
    if let Err(e) = router_swap(&window, url) {
        log::warn!("[overlay] router unavailable ({:?}), loading {}", e, url);
        _ = window.location().set_href(url);
    }
}

fn router_swap(window: &web::Window, url: &str) -> Result<(), JsValue> {
    let htmx = Reflect::get(window, &JsValue::from_str("htmx"))?;
    if !htmx.is_object() {
        return Err(JsValue::from_str("htmx missing"));
    }
    let ajax: Function = Reflect::get(&htmx, &JsValue::from_str("ajax"))?.dyn_into()?;
    let opts = Object::new();
    Reflect::set(&opts, &"target".into(), &ROUTER_TARGET.into())?;
    Reflect::set(&opts, &"swap".into(), &"outerHTML".into())?;
    let pending = ajax.call3(&htmx, &"GET".into(), &url.into(), &opts)?;
    let promise: Promise = pending.dyn_into()?;
    let url = url.to_owned();
    spawn_local(async move {
        if JsFuture::from(promise).await.is_ok() {
            if let Some(history) = web::window().and_then(|w| w.history().ok()) {
                _ = history.push_state_with_url(&JsValue::NULL, "", Some(&url));
            }
        }
    });
    Ok(())
}

/// Opening on every swap, dismiss-link clicks and background clicks.
pub fn wire_overlay(document: &web::Document) {
    open_overlays(document);
    let Some(body) = document.body() else {
        return;
    };

    let doc_settle = document.clone();
    dom::add_listener(&body, AFTER_SETTLE_EVENT, move |_: web::Event| {
        open_overlays(&doc_settle);
    });

    let doc_dismiss = document.clone();
    dom::add_capture_listener(&body, "click", move |ev: web::MouseEvent| {
        let Some(link) = dom::target_closest(ev.target(), DISMISS_SELECTOR) else {
            return;
        };
        ev.prevent_default();
        ev.stop_propagation();
        if let Ok(Some(overlay)) = link.closest(OVERLAY_SELECTOR) {
            let url = dismiss_url_of(Some(link));
            close_and_navigate(&doc_dismiss, &overlay, url);
        }
    });

    let doc_bg = document.clone();
    dom::add_listener(&body, "click", move |ev: web::MouseEvent| {
        let Some(overlay) = open_overlay(&doc_bg) else {
            return;
        };
        let target = ev.target();
        let keeps_overlay = [OVERLAY_LETTER_SELECTOR, DISMISS_SELECTOR, "a"]
            .iter()
            .any(|sel| dom::target_closest(target.clone(), sel).is_some());
        if keeps_overlay {
            return;
        }
        let url = dismiss_url(&overlay);
        close_and_navigate(&doc_bg, &overlay, url);
    });
}

// ---------------- FPS overlay ----------------

#[inline]
pub fn show_fps(document: &web::Document) {
    if let Some(el) = document.get_element_by_id(FPS_ID) {
        _ = el.class_list().add_1(VISIBLE_CLASS);
    }
}

#[inline]
pub fn update_fps(document: &web::Document, text: &str) {
    if let Some(el) = document.get_element_by_id(FPS_ID) {
        el.set_text_content(Some(text));
    }
}
