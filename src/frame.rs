use crate::constants::SHADER_READY_CLASS;
use crate::core::auto_quality::fps_report;
use crate::core::{FrameInput, QualityTier, SceneState};
use crate::dom;
use crate::overlay;
use crate::render;
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use web_sys as web;

pub struct FrameContext<'a> {
    pub document: web::Document,
    pub canvas: web::HtmlCanvasElement,
    pub scene: Rc<RefCell<SceneState>>,
    pub prefers_dark: Rc<Cell<bool>>,
    pub gpu: Option<render::GpuState<'a>>,
    pub show_fps: bool,
    pub shader_ready: bool,
}

impl<'a> FrameContext<'a> {
    pub fn frame(&mut self) {
        let Some(gpu) = self.gpu.as_mut() else {
            return;
        };
        let dpr = web::window().map(|w| w.device_pixel_ratio()).unwrap_or(1.0);
        let input = FrameInput {
            now_ms: instant::now(),
            device_pixel_ratio: dpr,
            prefers_dark: self.prefers_dark.get(),
        };
        let (params, decay) = {
            let mut scene = self.scene.borrow_mut();
            let params = scene.advance(&input);
            (params, *scene.decay())
        };

        if params.quality_changed {
            dom::sync_canvas_backing_size(&self.canvas, params.quality);
            gpu.set_quality(params.quality);
        }
        gpu.resize_if_needed(self.canvas.width(), self.canvas.height());

        if let Some(fps) = params.fps {
            if self.show_fps {
                let (w, h) = gpu.size();
                overlay::update_fps(&self.document, &fps_report(fps, w, h, params.quality));
            }
        }

        // A program that failed validation would only produce errors
        if gpu.is_failed() {
            return;
        }
        match gpu.render(&params, &decay) {
            Ok(()) => {
                if !self.shader_ready {
                    self.shader_ready = true;
                    _ = self.canvas.class_list().add_1(SHADER_READY_CLASS);
                }
            }
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => gpu.reconfigure(),
            Err(e) => log::error!("render error: {:?}", e),
        }
    }
}

pub async fn init_gpu(
    canvas: &web::HtmlCanvasElement,
    tier: QualityTier,
) -> Option<render::GpuState<'static>> {
    // leak a canvas clone to satisfy 'static lifetime for surface
    let leaked_canvas = Box::leak(Box::new(canvas.clone()));
    match render::GpuState::new(leaked_canvas, tier).await {
        Ok(g) => Some(g),
        Err(e) => {
            log::error!("WebGPU init error: {:?}", e);
            None
        }
    }
}

pub fn start_loop(frame_ctx: Rc<RefCell<FrameContext<'static>>>) {
    let tick: dom::FrameTick = Rc::new(RefCell::new(None));
    let tick_clone = tick.clone();
    let frame_ctx_tick = frame_ctx.clone();
    *tick.borrow_mut() = Some(Closure::wrap(Box::new(move || {
        frame_ctx_tick.borrow_mut().frame();
        dom::request_frame(&tick_clone);
    }) as Box<dyn FnMut()>));
    dom::request_frame(&tick);
}
