use std::cell::RefCell;
use std::rc::Rc;

use instant::Instant;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

use crate::core::{AnimationStage, SceneChoreographer, StageClock};
use crate::{dom, overlay, render};

/// Everything the per-frame tick touches. The rAF loop is the only
/// writer; event handlers reach the clock and scene through their own
/// clones of the shared cells, which is safe because the browser never
/// runs them concurrently with a frame.
pub struct FrameContext<'a> {
    pub clock: Rc<RefCell<StageClock>>,
    pub scene: Rc<RefCell<SceneChoreographer>>,
    pub gpu: Option<render::GpuState<'a>>,
    pub canvas: web::HtmlCanvasElement,

    pub last_instant: Instant,
    pub loading_hidden: bool,
    pub handoff_done: bool,
}

impl<'a> FrameContext<'a> {
    pub fn frame(&mut self) {
        let now = Instant::now();
        let dt = now - self.last_instant;
        self.last_instant = now;

        // Stage timing first, then choreography: a transition this tick
        // is visible to the scene in the same frame.
        {
            let mut clock = self.clock.borrow_mut();
            if let Some(entered) = clock.tick(dt) {
                log::info!("[stage] entered {:?}", entered);
            }
            self.scene.borrow_mut().update(&mut clock, dt);
        }

        let stage = self.clock.borrow().stage();
        if let Some(document) = dom::window_document() {
            match stage {
                AnimationStage::Initial => {
                    overlay::set_loading_progress(&document, self.clock.borrow().progress());
                }
                _ if !self.loading_hidden => {
                    overlay::hide_loading(&document);
                    self.loading_hidden = true;
                }
                _ => {}
            }

            // The handoff: exactly once, irreversible. The star field is
            // intro-only; the globe stays on as the slowly rotating
            // backdrop of the main page.
            if stage >= AnimationStage::MainContent && !self.handoff_done {
                overlay::reveal_main_content(&document);
                if let Some(g) = &mut self.gpu {
                    g.release_star_field();
                }
                self.handoff_done = true;
                log::info!("[handoff] main content revealed");
            }
        }

        if let Some(g) = &mut self.gpu {
            g.resize_if_needed(self.canvas.width(), self.canvas.height());
            if let Err(e) = g.render(&self.scene.borrow()) {
                log::error!("render error: {:?}", e);
            }
        }
    }
}

pub async fn init_gpu(canvas: &web::HtmlCanvasElement) -> Option<render::GpuState<'static>> {
    // leak a canvas clone to satisfy 'static lifetime for surface
    let leaked_canvas = Box::leak(Box::new(canvas.clone()));
    match render::GpuState::new(leaked_canvas).await {
        Ok(g) => Some(g),
        Err(e) => {
            log::error!("WebGPU init error: {:?}", e);
            None
        }
    }
}

pub fn start_loop(frame_ctx: Rc<RefCell<FrameContext<'static>>>) {
    let tick: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
    let tick_clone = tick.clone();
    let frame_ctx_tick = frame_ctx.clone();
    *tick.borrow_mut() = Some(Closure::wrap(Box::new(move || {
        frame_ctx_tick.borrow_mut().frame();
        if let Some(w) = web::window() {
            if let Some(cb) = tick_clone.borrow().as_ref() {
                _ = w.request_animation_frame(cb.as_ref().unchecked_ref());
            }
        }
    }) as Box<dyn FnMut()>));
    if let Some(w) = web::window() {
        if let Some(cb) = tick.borrow().as_ref() {
            _ = w.request_animation_frame(cb.as_ref().unchecked_ref());
        }
    }
}
