use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::SpeechSynthesisUtterance;

use alifba_core::{Cue, SpeechRequest};

/// Speak with the browser's synthesizer. Skipped when there is none.
pub fn speak(request: &SpeechRequest) {
    let synth = match web_sys::window().map(|w| w.speech_synthesis()) {
        Some(Ok(synth)) => synth,
        _ => {
            log::info!("speech synthesis unavailable; not speaking {}", request.text);
            return;
        }
    };
    let utterance = match SpeechSynthesisUtterance::new_with_text(&request.text) {
        Ok(u) => u,
        Err(err) => {
            log::warn!("cannot create utterance: {:?}", err);
            return;
        }
    };
    utterance.set_lang(request.lang);
    utterance.set_rate(request.rate);
    utterance.set_pitch(request.pitch);

    let button = crate::dom::document().and_then(|d| d.query_selector(".speak-btn").ok().flatten());
    if let Some(button) = button {
        let _ = button.class_list().add_1("speaking");
        let done = Closure::once_into_js(move || {
            let _ = button.class_list().remove_1("speaking");
        });
        utterance.set_onend(Some(done.unchecked_ref()));
    }

    synth.cancel();
    synth.speak(&utterance);
}

/// Sound cues have no audio yet; they are logged.
pub fn play(cue: Cue) {
    log::debug!("cue: {}", cue.name());
}
