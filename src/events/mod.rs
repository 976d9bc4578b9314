mod keyboard;
mod pointer;

pub use keyboard::wire_global_keydown;
pub use pointer::wire_first_interaction;

use std::cell::RefCell;
use std::rc::Rc;

use crate::audio::{self, AudioHandles};
use crate::input::InteractionGate;

/// Run the one-time unlock if this is the first qualifying gesture.
/// Both the pointer and keyboard paths funnel through here, so whichever
/// comes first wins and the other becomes a no-op.
fn fire_gate(gate: &Rc<RefCell<InteractionGate>>, audio: &Option<Rc<AudioHandles>>) {
    if !gate.borrow_mut().acknowledge() {
        return;
    }
    log::info!("[gate] first interaction, unlocking audio");
    if let Some(handles) = audio {
        audio::unlock(handles);
        if audio::start_ambient(handles).is_err() {
            log::error!("[gate] ambient pad failed to start");
        }
        audio::play_chime(handles);
    }
}
