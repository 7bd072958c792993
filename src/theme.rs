use crate::constants::{
    DARK_SCHEME_QUERY, THEME_NIGHT_CLASS, THEME_STORAGE_KEY, THEME_TOGGLE_ID, THEME_VALUE_SELECTOR,
};
use crate::core::{SceneState, ThemeMode};
use crate::dom;
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use web_sys as web;

/// Stored mode; unreadable or unknown values mean `Auto`.
pub fn load_mode() -> ThemeMode {
    ThemeMode::from_stored(dom::local_storage_get(THEME_STORAGE_KEY).as_deref())
}

pub fn dark_scheme_query(window: &web::Window) -> Option<web::MediaQueryList> {
    window.match_media(DARK_SCHEME_QUERY).ok().flatten()
}

/// Body class and toggle label for the current mode.
pub fn apply(document: &web::Document, mode: ThemeMode, prefers_dark: bool) {
    if let Some(body) = document.body() {
        _ = body
            .class_list()
            .toggle_with_force(THEME_NIGHT_CLASS, mode.is_night(prefers_dark));
    }
    if let Some(toggle) = document.get_element_by_id(THEME_TOGGLE_ID) {
        if let Ok(Some(value)) = toggle.query_selector(THEME_VALUE_SELECTOR) {
            value.set_text_content(Some(mode.label()));
        }
        _ = toggle.set_attribute("aria-label", &format!("Appearance: {}", mode.label()));
    }
}

/// Wires the toggle button and the OS colour-scheme listener.
///
/// `prefers_dark` is shared with the frame loop, which resolves the night
/// blend target from it every frame.
pub fn wire_theme(
    document: &web::Document,
    scene: Rc<RefCell<SceneState>>,
    prefers_dark: Rc<Cell<bool>>,
) {
    apply(document, scene.borrow().theme_mode(), prefers_dark.get());

    let doc_click = document.clone();
    let scene_click = scene.clone();
    let dark_click = prefers_dark.clone();
    dom::add_click_listener(document, THEME_TOGGLE_ID, move || {
        let mode = {
            let mut s = scene_click.borrow_mut();
            let next = s.theme_mode().next();
            s.set_theme_mode(next);
            next
        };
        dom::local_storage_set(THEME_STORAGE_KEY, mode.as_str());
        apply(&doc_click, mode, dark_click.get());
        log::info!("[theme] mode -> {}", mode);
    });

    let Some(mql) = web::window().and_then(|w| dark_scheme_query(&w)) else {
        return;
    };
    let doc_media = document.clone();
    let mql_read = mql.clone();
    dom::add_listener(&mql, "change", move |_: web::Event| {
        prefers_dark.set(mql_read.matches());
        apply(&doc_media, scene.borrow().theme_mode(), prefers_dark.get());
    });
}
