use crate::constants::*;
use crate::core::constants::{LOGO_DEFAULT_ASPECT, LOGO_FADE_DELAY_MS, LOGO_FADE_DURATION_MS, LOGO_FADE_TARGET};
use crate::core::projection::logo_sky_rect;
use crate::core::SceneState;
use crate::dom;
use glam::Vec2;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys as web;

/// The logo rasterised to RGBA8 rows, top row first.
pub struct LogoRaster {
    pub width: u32,
    pub height: u32,
    pub aspect: f32,
    pub rgba: Vec<u8>,
}

fn js_err(e: wasm_bindgen::JsValue) -> anyhow::Error {
    anyhow::anyhow!("{:?}", e)
}

/// Loads the logo SVG and rasterises it at a fixed width.
pub async fn load_raster(document: &web::Document) -> anyhow::Result<LogoRaster> {
    let img = web::HtmlImageElement::new().map_err(js_err)?;
    img.set_src(LOGO_SVG_URL);
    JsFuture::from(img.decode()).await.map_err(js_err)?;

    let (nw, nh) = (img.natural_width(), img.natural_height());
    let aspect = if nw > 0 && nh > 0 {
        nw as f32 / nh as f32
    } else {
        LOGO_DEFAULT_ASPECT
    };
    let width = LOGO_RASTER_WIDTH;
    let height = ((width as f32 / aspect).round() as u32).max(1);

    let canvas: web::HtmlCanvasElement = document
        .create_element("canvas")
        .map_err(js_err)?
        .dyn_into()
        .map_err(|e| anyhow::anyhow!("{:?}", e))?;
    canvas.set_width(width);
    canvas.set_height(height);
    let ctx: web::CanvasRenderingContext2d = canvas
        .get_context("2d")
        .map_err(js_err)?
        .ok_or_else(|| anyhow::anyhow!("no 2d context"))?
        .dyn_into()
        .map_err(|e| anyhow::anyhow!("{:?}", e))?;
    ctx.clear_rect(0.0, 0.0, width as f64, height as f64);
    ctx.draw_image_with_html_image_element_and_dw_and_dh(
        &img,
        0.0,
        0.0,
        width as f64,
        height as f64,
    )
    .map_err(js_err)?;
    let data = ctx
        .get_image_data(0.0, 0.0, width as f64, height as f64)
        .map_err(js_err)?;

    Ok(LogoRaster {
        width,
        height,
        aspect,
        rgba: data.data().0,
    })
}

/// Recomputes the logo's sky rectangle from the DOM `#logo` box.
pub fn update_placement(
    document: &web::Document,
    canvas: &web::HtmlCanvasElement,
    scene: &Rc<RefCell<SceneState>>,
) {
    let Some(logo) = document.get_element_by_id(LOGO_ID) else {
        return;
    };
    let c = canvas.get_bounding_client_rect();
    if c.width() <= 0.0 || c.height() <= 0.0 || canvas.height() == 0 {
        return;
    }
    let l = logo.get_bounding_client_rect();
    let center = Vec2::new(
        ((l.left() + l.width() / 2.0 - c.left()) / c.width()) as f32,
        (1.0 - (l.top() + l.height() / 2.0 - c.top()) / c.height()) as f32,
    );
    let half = Vec2::new(
        (l.width() / 2.0 / c.width()) as f32,
        (l.height() / 2.0 / c.height()) as f32,
    );
    let aspect = canvas.width() as f32 / canvas.height() as f32;

    let mut s = scene.borrow_mut();
    let fallback = s.logo_rect().size;
    if let Some(rect) = logo_sky_rect(center, half, aspect, s.pose().tilt_offset, fallback) {
        s.set_logo_rect(rect);
    }
}

fn fade_in(el: &web::HtmlElement) {
    let style = el.style();
    _ = style.set_property(
        "transition",
        &format!("opacity {}s ease", LOGO_FADE_DURATION_MS / 1000.0),
    );
    _ = style.set_property("opacity", &LOGO_FADE_TARGET.to_string());
}

/// Fades the DOM logo and its links in, unless the page opts out.
pub fn start_intro(document: &web::Document) {
    let Some(body) = document.body() else {
        return;
    };
    if body.class_list().contains(SKIP_INTRO_CLASS) {
        _ = body.class_list().add_1(LOADED_CLASS);
        return;
    }
    let doc = document.clone();
    dom::set_timeout(LOGO_FADE_DELAY_MS as i32, move || {
        for el in [
            doc.get_element_by_id(LOGO_ID),
            dom::query(&doc, LOGO_LINKS_SELECTOR),
        ]
        .into_iter()
        .flatten()
        {
            if let Ok(el) = el.dyn_into::<web::HtmlElement>() {
                fade_in(&el);
            }
        }
        dom::set_timeout(LOGO_FADE_DURATION_MS as i32, move || {
            _ = body.class_list().add_1(LOADED_CLASS);
        });
    });
}
