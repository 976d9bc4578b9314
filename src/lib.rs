#![cfg(target_arch = "wasm32")]
use std::cell::RefCell;
use std::rc::Rc;
use std::sync::atomic::{AtomicBool, Ordering};

use instant::Instant;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys as web;

use crate::core::{GeoPoint, SceneChoreographer, StageClock, StageSchedule};
use crate::core::{TARGET_LAT_DEG, TARGET_LON_DEG};
use crate::input::InteractionGate;

mod audio;
mod constants;
mod core;
mod dom;
mod events;
mod frame;
mod input;
mod overlay;
mod render;

fn wire_canvas_resize(canvas: &web::HtmlCanvasElement) {
    dom::sync_canvas_backing_size(canvas);
    let canvas_resize = canvas.clone();
    let resize_closure = Closure::wrap(Box::new(move || {
        dom::sync_canvas_backing_size(&canvas_resize);
    }) as Box<dyn FnMut()>);
    if let Some(window) = web::window() {
        _ = window
            .add_event_listener_with_callback("resize", resize_closure.as_ref().unchecked_ref());
    }
    resize_closure.forget();
}

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("intro-web starting");

    spawn_local(async move {
        if let Err(e) = init().await {
            log::error!("init error: {:?}", e);
        }
    });
    Ok(())
}

async fn init() -> anyhow::Result<()> {
    static STARTED: AtomicBool = AtomicBool::new(false);
    if STARTED.swap(true, Ordering::SeqCst) {
        return Ok(());
    }

    let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
    let document = window
        .document()
        .ok_or_else(|| anyhow::anyhow!("no document"))?;

    let canvas_el = document
        .get_element_by_id("app-canvas")
        .ok_or_else(|| anyhow::anyhow!("missing #app-canvas"))?;
    let canvas: web::HtmlCanvasElement = canvas_el
        .dyn_into::<web::HtmlCanvasElement>()
        .map_err(|e| anyhow::anyhow!(format!("{:?}", e)))?;

    // Maintain canvas internal pixel size to match CSS size * devicePixelRatio
    wire_canvas_resize(&canvas);

    // The target coordinate is configuration; a malformed one fails
    // here, before any animation starts.
    let target = GeoPoint::new(TARGET_LAT_DEG, TARGET_LON_DEG)
        .map_err(|e| anyhow::anyhow!("bad target coordinate: {}", e))?;

    let clock = Rc::new(RefCell::new(StageClock::new(StageSchedule::default())));
    let scene = Rc::new(RefCell::new(SceneChoreographer::new(target)));
    let gate = Rc::new(RefCell::new(InteractionGate::new()));

    // Audio is optional: if the graph cannot be built the intro runs
    // silent rather than failing.
    let audio_handles = audio::build_audio().ok().map(Rc::new);

    events::wire_first_interaction(gate.clone(), audio_handles.clone());
    events::wire_global_keydown(
        clock.clone(),
        scene.clone(),
        gate.clone(),
        audio_handles.clone(),
    );

    let gpu = frame::init_gpu(&canvas).await;

    let frame_ctx = Rc::new(RefCell::new(frame::FrameContext {
        clock,
        scene,
        gpu,
        canvas,
        last_instant: Instant::now(),
        loading_hidden: false,
        handoff_done: false,
    }));
    frame::start_loop(frame_ctx);

    Ok(())
}
