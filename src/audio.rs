use web_sys as web;

// Levels for the two things the intro plays: a looping ambient pad and
// a short acknowledgment chime on the first interaction.
const MASTER_LEVEL: f32 = 0.25;
const AMBIENT_LEVEL: f32 = 0.08;
const AMBIENT_BASE_HZ: f32 = 110.0;
const AMBIENT_DETUNE_HZ: f32 = 0.7;
const AMBIENT_LOWPASS_HZ: f32 = 900.0;
const CHIME_NOTES_HZ: [f32; 3] = [523.25, 659.25, 783.99]; // C5 E5 G5
const CHIME_NOTE_GAP_SEC: f64 = 0.12;
const CHIME_NOTE_SEC: f64 = 0.5;

pub struct AudioHandles {
    pub ctx: web::AudioContext,
    pub master_gain: web::GainNode,
}

fn create_gain(
    audio_ctx: &web::AudioContext,
    value: f32,
    label: &str,
) -> Result<web::GainNode, ()> {
    match web::GainNode::new(audio_ctx) {
        Ok(g) => {
            g.gain().set_value(value);
            Ok(g)
        }
        Err(e) => {
            log::error!("{} GainNode error: {:?}", label, e);
            Err(())
        }
    }
}

/// Build the audio graph in a muted state. The context starts suspended
/// by autoplay policy; [`unlock`] resumes it once the interaction gate
/// fires.
pub fn build_audio() -> Result<AudioHandles, ()> {
    let ctx = web::AudioContext::new().map_err(|e| {
        log::error!("AudioContext error: {:?}", e);
    })?;
    let master_gain = create_gain(&ctx, 0.0, "Master")?;
    _ = master_gain.connect_with_audio_node(&ctx.destination());
    Ok(AudioHandles { ctx, master_gain })
}

/// Resume the context and bring the master bus up. Called exactly once,
/// from the first-interaction handler.
pub fn unlock(handles: &AudioHandles) {
    _ = handles.ctx.resume();
    handles.master_gain.gain().set_value(MASTER_LEVEL);
}

pub fn set_muted(handles: &AudioHandles, muted: bool) {
    handles
        .master_gain
        .gain()
        .set_value(if muted { 0.0 } else { MASTER_LEVEL });
}

pub fn is_muted(handles: &AudioHandles) -> bool {
    handles.master_gain.gain().value() <= f32::EPSILON
}

/// Start the looping background pad: two slightly detuned sines through
/// a lowpass, running for the rest of the session.
pub fn start_ambient(handles: &AudioHandles) -> Result<(), ()> {
    let pad_gain = create_gain(&handles.ctx, AMBIENT_LEVEL, "Pad")?;
    let lowpass = web::BiquadFilterNode::new(&handles.ctx).map_err(|e| {
        log::error!("BiquadFilterNode error: {:?}", e);
    })?;
    lowpass.set_type(web::BiquadFilterType::Lowpass);
    lowpass.frequency().set_value(AMBIENT_LOWPASS_HZ);
    _ = lowpass.connect_with_audio_node(&pad_gain);
    _ = pad_gain.connect_with_audio_node(&handles.master_gain);

    for detune in [0.0, AMBIENT_DETUNE_HZ] {
        let osc = web::OscillatorNode::new(&handles.ctx).map_err(|e| {
            log::error!("OscillatorNode error: {:?}", e);
        })?;
        osc.set_type(web::OscillatorType::Sine);
        osc.frequency().set_value(AMBIENT_BASE_HZ + detune);
        _ = osc.connect_with_audio_node(&lowpass);
        _ = osc.start();
    }
    Ok(())
}

/// One-shot acknowledgment arpeggio played when the interaction gate
/// fires.
pub fn play_chime(handles: &AudioHandles) {
    let now = handles.ctx.current_time();
    for (i, freq) in CHIME_NOTES_HZ.iter().enumerate() {
        let t0 = now + 0.01 + i as f64 * CHIME_NOTE_GAP_SEC;
        if let Ok(src) = web::OscillatorNode::new(&handles.ctx) {
            src.set_type(web::OscillatorType::Triangle);
            src.frequency().set_value(*freq);
            if let Ok(g) = web::GainNode::new(&handles.ctx) {
                g.gain().set_value(0.0);
                _ = g.gain().linear_ramp_to_value_at_time(0.5, t0 + 0.02);
                _ = g.gain().linear_ramp_to_value_at_time(0.0, t0 + CHIME_NOTE_SEC);
                _ = src.connect_with_audio_node(&g);
                _ = g.connect_with_audio_node(&handles.master_gain);
                _ = src.start_with_when(t0);
                _ = src.stop_with_when(t0 + CHIME_NOTE_SEC + 0.05);
            }
        }
    }
}
