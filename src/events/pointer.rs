use crate::constants::INTERACTIVE_UI_SELECTOR;
use crate::core::projection::{client_to_canvas_px, sky_sample, splat_burst};
use crate::core::SceneState;
use crate::dom;
use crate::overlay;
use glam::Vec2;
use rand::rngs::StdRng;
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use web_sys as web;

#[derive(Clone)]
pub struct InputWiring {
    pub document: web::Document,
    pub canvas: web::HtmlCanvasElement,
    pub scene: Rc<RefCell<SceneState>>,
    pub drawing: Rc<Cell<bool>>,
    pub rng: Rc<RefCell<StdRng>>,
}

pub fn wire_input_handlers(w: InputWiring) {
    wire_pointerdown(&w);
    wire_pointermove(&w);
    wire_pointerup(&w);
    wire_canvas_click(&w);
}

/// Canvas rectangle origin and size in CSS pixels.
fn canvas_rect(canvas: &web::HtmlCanvasElement) -> (Vec2, Vec2) {
    let r = canvas.get_bounding_client_rect();
    (
        Vec2::new(r.left() as f32, r.top() as f32),
        Vec2::new(r.width() as f32, r.height() as f32),
    )
}

#[inline]
fn canvas_size(canvas: &web::HtmlCanvasElement) -> Vec2 {
    Vec2::new(canvas.width() as f32, canvas.height() as f32)
}

/// Pointer position in canvas device pixels (y up), if it maps onto the canvas.
pub fn pointer_canvas_px(ev: &web::MouseEvent, canvas: &web::HtmlCanvasElement) -> Option<Vec2> {
    let (origin, size) = canvas_rect(canvas);
    client_to_canvas_px(
        Vec2::new(ev.client_x() as f32, ev.client_y() as f32),
        origin,
        size,
        canvas_size(canvas),
    )
}

/// Queues one burst of light splats under the pointer.
fn paint_at(w: &InputWiring, ev: &web::MouseEvent) {
    let Some(px) = pointer_canvas_px(ev, &w.canvas) else {
        return;
    };
    let size = canvas_size(&w.canvas);
    let (_, rect_size) = canvas_rect(&w.canvas);
    if rect_size.x <= 0.0 {
        return;
    }
    let canvas_scale = size.x / rect_size.x * 2.0;
    let mut scene = w.scene.borrow_mut();
    let Some(sample) = sky_sample(px, size, scene.pose().tilt_offset) else {
        return;
    };
    let burst = splat_burst(&sample, canvas_scale, &mut *w.rng.borrow_mut());
    scene.queue_splats(burst);
}

fn starts_stroke(w: &InputWiring, ev: &web::PointerEvent) -> bool {
    !overlay::is_open(&w.document)
        && dom::target_closest(ev.target(), INTERACTIVE_UI_SELECTOR).is_none()
}

fn wire_pointerdown(w: &InputWiring) {
    let w = w.clone();
    let Some(wnd) = web::window() else {
        return;
    };
    dom::add_listener(&wnd, "pointerdown", move |ev: web::PointerEvent| {
        if !starts_stroke(&w, &ev) {
            return;
        }
        w.drawing.set(true);
        paint_at(&w, &ev);
    });
}

fn wire_pointermove(w: &InputWiring) {
    let w = w.clone();
    let Some(wnd) = web::window() else {
        return;
    };
    dom::add_listener(&wnd, "pointermove", move |ev: web::PointerEvent| {
        if w.drawing.get() {
            paint_at(&w, &ev);
        }
    });
}

fn wire_pointerup(w: &InputWiring) {
    let drawing = w.drawing.clone();
    let Some(wnd) = web::window() else {
        return;
    };
    for event in ["pointerup", "pointercancel"] {
        let drawing = drawing.clone();
        dom::add_listener(&wnd, event, move |_: web::PointerEvent| {
            drawing.set(false);
        });
    }
}

fn wire_canvas_click(w: &InputWiring) {
    let w = w.clone();
    let canvas = w.canvas.clone();
    dom::add_listener(&canvas, "click", move |ev: web::MouseEvent| {
        if overlay::is_open(&w.document) {
            return;
        }
        let Some(px) = pointer_canvas_px(&ev, &w.canvas) else {
            return;
        };
        let size = canvas_size(&w.canvas);
        if size.y <= 0.0 {
            return;
        }
        let screen = px / size;
        let aspect = size.x / size.y;
        let hit = w
            .scene
            .borrow_mut()
            .add_ripple_at(screen, aspect, instant::now());
        if let Some(r) = hit {
            log::info!("[ripple] at ({:.2}, {:.2})", r.origin.x, r.origin.y);
        }
    });
}
