#![cfg(target_arch = "wasm32")]
use crate::core::{PageConfig, PageKind, SceneState};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys as web;

mod constants;
mod core;
mod corner_text;
mod dom;
mod events;
mod frame;
mod logo;
mod overlay;
mod render;
mod signup;
mod theme;
mod trail;

use constants::{AFTER_SETTLE_EVENT, CANVAS_ID, PAGE_SELECTOR};

fn current_page_kind(document: &web::Document) -> PageKind {
    let page_type = dom::query(document, PAGE_SELECTOR).and_then(|p| p.get_attribute("data-page-type"));
    PageKind::from_page_type(page_type.as_deref())
}

/// Keeps the backing store and logo placement in step with the viewport.
fn wire_canvas_resize(
    document: &web::Document,
    canvas: &web::HtmlCanvasElement,
    scene: &Rc<RefCell<SceneState>>,
) {
    let resize = {
        let document = document.clone();
        let canvas = canvas.clone();
        let scene = scene.clone();
        move || {
            let tier = scene.borrow().quality();
            dom::sync_canvas_backing_size(&canvas, tier);
            logo::update_placement(&document, &canvas, &scene);
        }
    };
    resize();
    let Some(window) = web::window() else {
        return;
    };
    let on_window = resize.clone();
    dom::add_listener(&window, "resize", move |_: web::Event| on_window());
    if let Some(vv) = window.visual_viewport() {
        dom::add_listener(&vv, "resize", move |_: web::Event| resize());
    }
}

/// Router swaps replace `.page`; re-read its kind and wire any new form or corner text.
fn wire_page_swaps(document: &web::Document, scene: &Rc<RefCell<SceneState>>) {
    let Some(body) = document.body() else {
        return;
    };
    let doc = document.clone();
    let scene = scene.clone();
    dom::add_listener(&body, AFTER_SETTLE_EVENT, move |_: web::Event| {
        let page = current_page_kind(&doc);
        if page != scene.borrow().page() {
            log::info!("[page] {:?}", page);
            scene.borrow_mut().set_page(page);
        }
        signup::init_form(&doc);
        corner_text::init_corner_texts(&doc);
    });
}

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("ocean background starting");

    spawn_local(async move {
        if let Err(e) = init().await {
            log::error!("init error: {:?}", e);
        }
    });
    Ok(())
}

async fn init() -> anyhow::Result<()> {
    let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
    let document = window
        .document()
        .ok_or_else(|| anyhow::anyhow!("no document"))?;

    let canvas: web::HtmlCanvasElement = document
        .get_element_by_id(CANVAS_ID)
        .ok_or_else(|| anyhow::anyhow!("missing #{}", CANVAS_ID))?
        .dyn_into::<web::HtmlCanvasElement>()
        .map_err(|e| anyhow::anyhow!(format!("{:?}", e)))?;

    let config = PageConfig::from_query(&window.location().search().unwrap_or_default());
    let theme_mode = theme::load_mode();
    let prefers_dark = theme::dark_scheme_query(&window).is_some_and(|m| m.matches());
    let page = current_page_kind(&document);
    log::info!(
        "[config] quality={} auto={} fps={} theme={} page={:?}",
        config.initial_quality,
        config.auto_quality,
        config.show_fps,
        theme_mode,
        page
    );

    let scene = Rc::new(RefCell::new(SceneState::new(
        &config,
        theme_mode,
        prefers_dark,
        page,
    )));
    let prefers_dark = Rc::new(Cell::new(prefers_dark));

    wire_canvas_resize(&document, &canvas, &scene);
    wire_page_swaps(&document, &scene);
    theme::wire_theme(&document, scene.clone(), prefers_dark.clone());
    overlay::wire_overlay(&document);
    if config.show_fps {
        overlay::show_fps(&document);
    }
    events::wire_global_keydown(&document);
    events::wire_input_handlers(events::InputWiring {
        document: document.clone(),
        canvas: canvas.clone(),
        scene: scene.clone(),
        drawing: Rc::new(Cell::new(false)),
        rng: Rc::new(RefCell::new(StdRng::from_entropy())),
    });
    trail::wire_cursor_trail(&document);
    signup::init_form(&document);
    corner_text::init_corner_texts(&document);
    logo::start_intro(&document);

    let tier = scene.borrow().quality();
    let gpu = frame::init_gpu(&canvas, tier).await;
    let frame_ctx = Rc::new(RefCell::new(frame::FrameContext {
        document: document.clone(),
        canvas: canvas.clone(),
        scene: scene.clone(),
        prefers_dark,
        gpu,
        show_fps: config.show_fps,
        shader_ready: false,
    }));

    {
        let frame_ctx = frame_ctx.clone();
        spawn_local(async move {
            match logo::load_raster(&document).await {
                Ok(raster) => {
                    scene.borrow_mut().set_logo_aspect(raster.aspect);
                    logo::update_placement(&document, &canvas, &scene);
                    if let Some(g) = frame_ctx.borrow_mut().gpu.as_mut() {
                        g.set_logo(raster.width, raster.height, &raster.rgba);
                    }
                    log::info!("[logo] {}x{} texture ready", raster.width, raster.height);
                }
                Err(e) => log::warn!("[logo] unable to load logo for texture: {:?}", e),
            }
        });
    }

    frame::start_loop(frame_ctx);
    Ok(())
}
