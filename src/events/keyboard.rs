use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::JsCast;
use web_sys as web;

use crate::audio::{self, AudioHandles};
use crate::core::{AnimationStage, SceneChoreographer, StageClock};
use crate::input::InteractionGate;

pub fn handle_global_keydown(
    ev: &web::KeyboardEvent,
    clock: &Rc<RefCell<StageClock>>,
    scene: &Rc<RefCell<SceneChoreographer>>,
    gate: &Rc<RefCell<InteractionGate>>,
    audio: &Option<Rc<AudioHandles>>,
) {
    // Any key qualifies as the first interaction
    super::fire_gate(gate, audio);

    match ev.key().as_str() {
        "Escape" | " " => {
            // Skip intro: scene first so the clock's stage entry sees a
            // consistent overview state, then jump the clock forward.
            let mut clk = clock.borrow_mut();
            if !clk.stage().is_terminal() {
                scene.borrow_mut().skip_to_overview();
                clk.go_to(AnimationStage::MainContent);
                log::info!("[keys] intro skipped");
            }
            ev.prevent_default();
        }
        "m" | "M" => {
            if let Some(handles) = audio {
                let muted = !audio::is_muted(handles);
                audio::set_muted(handles, muted);
                log::info!("[keys] muted={}", muted);
            }
        }
        _ => {}
    }
}

pub fn wire_global_keydown(
    clock: Rc<RefCell<StageClock>>,
    scene: Rc<RefCell<SceneChoreographer>>,
    gate: Rc<RefCell<InteractionGate>>,
    audio: Option<Rc<AudioHandles>>,
) {
    if let Some(window) = web::window() {
        let closure =
            wasm_bindgen::closure::Closure::wrap(Box::new(move |ev: web::KeyboardEvent| {
                handle_global_keydown(&ev, &clock, &scene, &gate, &audio);
            }) as Box<dyn FnMut(_)>);
        _ = window.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
        closure.forget();
    }
}
