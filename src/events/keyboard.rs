use crate::dom;
use crate::overlay;
use web_sys as web;

#[inline]
pub fn is_dismiss_key(key: &str) -> bool {
    matches!(key, "Escape" | "Esc")
}

/// Escape closes an open updates overlay and follows its dismiss link.
pub fn wire_global_keydown(document: &web::Document) {
    let doc = document.clone();
    dom::add_listener(document, "keydown", move |ev: web::KeyboardEvent| {
        if !is_dismiss_key(&ev.key()) {
            return;
        }
        if overlay::close_open_overlay(&doc) {
            ev.prevent_default();
            log::info!("[overlay] closed via keyboard");
        }
    });
}
