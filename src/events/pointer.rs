use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::JsCast;
use web_sys as web;

use crate::audio::AudioHandles;
use crate::input::InteractionGate;

/// Listen for the first pointer gesture anywhere on the page. The gate
/// makes this a one-shot; the listener stays attached but does nothing
/// after the first firing.
pub fn wire_first_interaction(
    gate: Rc<RefCell<InteractionGate>>,
    audio: Option<Rc<AudioHandles>>,
) {
    let closure = wasm_bindgen::closure::Closure::wrap(Box::new(move |_ev: web::PointerEvent| {
        super::fire_gate(&gate, &audio);
    }) as Box<dyn FnMut(_)>);
    if let Some(wnd) = web::window() {
        _ = wnd.add_event_listener_with_callback("pointerdown", closure.as_ref().unchecked_ref());
    }
    closure.forget();
}
