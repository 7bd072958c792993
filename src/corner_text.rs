use crate::constants::{
    CORNER_TEXT_SELECTOR, ELVEN_TEXT_SELECTOR, ENGLISH_TEXT_SELECTOR, MORPH_INITIALIZED_ATTR,
    NARROW_SCREEN_QUERY,
};
use crate::core::morph::{CornerStyle, TextMorph, TextStyle};
use crate::dom;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys as web;

struct Corner {
    elven: web::HtmlElement,
    english: web::HtmlElement,
    morph: TextMorph,
    scheduled: bool,
}

fn style_span(span: &web::HtmlElement, style: TextStyle) {
    let css = span.style();
    _ = css.set_property("filter", &style.filter_css());
    _ = css.set_property("opacity", &style.opacity.to_string());
}

impl Corner {
    fn apply(&self, style: CornerStyle) {
        style_span(&self.elven, style.elven);
        style_span(&self.english, style.english);
    }
}

/// Touch devices and narrow screens get click-only toggling.
fn hover_capable(window: &web::Window) -> bool {
    let touch = js_sys::Reflect::has(window, &JsValue::from_str("ontouchstart")).unwrap_or(false)
        || window.navigator().max_touch_points() > 0;
    !(touch || dom::media_matches(window, NARROW_SCREEN_QUERY))
}

fn span(el: &web::Element, selector: &str) -> Option<web::HtmlElement> {
    el.query_selector(selector)
        .ok()
        .flatten()
        .and_then(|e| e.dyn_into::<web::HtmlElement>().ok())
}

/// Animates until the morph settles; a pending frame is never doubled.
fn schedule(corner: &Rc<RefCell<Corner>>, tick: &dom::FrameTick) {
    {
        let mut c = corner.borrow_mut();
        if c.scheduled {
            return;
        }
        c.scheduled = true;
    }
    dom::request_frame(tick);
}

fn wire_corner(el: web::Element, hover: bool) {
    let (Some(elven), Some(english)) = (
        span(&el, ELVEN_TEXT_SELECTOR),
        span(&el, ENGLISH_TEXT_SELECTOR),
    ) else {
        log::warn!("[morph] corner text without both spellings");
        return;
    };
    for s in [&elven, &english] {
        _ = s.style().set_property("transition", "none");
        style_span(s, TextStyle::HIDDEN);
    }
    let corner = Rc::new(RefCell::new(Corner {
        elven,
        english,
        morph: TextMorph::default(),
        scheduled: false,
    }));

    let tick: dom::FrameTick = Rc::new(RefCell::new(None));
    let handle = tick.clone();
    let c = corner.clone();
    *tick.borrow_mut() = Some(Closure::wrap(Box::new(move || {
        let again = {
            let mut corner = c.borrow_mut();
            let style = corner.morph.evaluate(instant::now());
            corner.apply(style);
            corner.scheduled = corner.morph.is_animating();
            corner.scheduled
        };
        if again {
            dom::request_frame(&handle);
        }
    }) as Box<dyn FnMut()>));

    if hover {
        let (c, t) = (corner.clone(), tick.clone());
        dom::add_listener(&el, "mouseenter", move |_: web::MouseEvent| {
            c.borrow_mut().morph.pointer_enter();
            schedule(&c, &t);
        });
        let (c, t) = (corner.clone(), tick.clone());
        dom::add_listener(&el, "mouseleave", move |_: web::MouseEvent| {
            c.borrow_mut().morph.pointer_leave();
            schedule(&c, &t);
        });
    }
    let (c, t) = (corner.clone(), tick.clone());
    dom::add_listener(&el, "click", move |_: web::MouseEvent| {
        c.borrow_mut().morph.click();
        log::info!("[morph] default {:?}", c.borrow().morph.default_language());
        schedule(&c, &t);
    });

    schedule(&corner, &tick);
}

/// Starts the elven reveal and wires hover/click morphing on every
/// corner text not yet wired.
pub fn init_corner_texts(document: &web::Document) {
    let Some(window) = web::window() else {
        return;
    };
    let Ok(list) = document.query_selector_all(CORNER_TEXT_SELECTOR) else {
        return;
    };
    let hover = hover_capable(&window);
    let mut wired = 0;
    for i in 0..list.length() {
        let Some(el) = list.item(i).and_then(|n| n.dyn_into::<web::Element>().ok()) else {
            continue;
        };
        if el.has_attribute(MORPH_INITIALIZED_ATTR) {
            continue;
        }
        _ = el.set_attribute(MORPH_INITIALIZED_ATTR, "true");
        wire_corner(el, hover);
        wired += 1;
    }
    if wired > 0 {
        log::info!("[morph] {} corner text(s), hover={}", wired, hover);
    }
}
