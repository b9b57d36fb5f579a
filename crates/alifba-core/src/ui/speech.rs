/// A request to read text aloud through the host's speech synthesis.
#[derive(Debug, Clone, PartialEq)]
pub struct SpeechRequest {
    pub text: String,
    /// BCP 47 language tag.
    pub lang: &'static str,
    pub rate: f32,
    pub pitch: f32,
}

impl SpeechRequest {
    /// Pronounce a single letter, slowed down for young listeners.
    pub fn for_letter(glyph: char) -> Self {
        Self {
            text: glyph.to_string(),
            lang: "ar-SA",
            rate: 0.8,
            pitch: 1.0,
        }
    }
}
