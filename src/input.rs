/// Write-once latch over the first qualifying user gesture. Browsers
/// refuse to start audio before a user interaction, so the first
/// pointer/key event flips this flag and unlocks the audio graph; every
/// later event is ignored for that purpose.
#[derive(Default, Clone, Copy, Debug)]
pub struct InteractionGate {
    fired: bool,
}

impl InteractionGate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true exactly once, on the first call.
    pub fn acknowledge(&mut self) -> bool {
        if self.fired {
            false
        } else {
            self.fired = true;
            true
        }
    }

    pub fn has_fired(&self) -> bool {
        self.fired
    }
}
