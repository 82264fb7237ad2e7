use tracing::info;

/// A line to be spoken.
#[derive(Debug, Clone, PartialEq)]
pub struct Utterance {
    pub text: String,
    pub volume: f32,
    pub rate: f32,
    pub pitch: f32,
}

impl Utterance {
    pub fn greeting(text: &str) -> Self {
        Self { text: text.to_string(), volume: 1.0, rate: 0.9, pitch: 1.1 }
    }
}

/// Speech output. Hosts without one simply pass no speaker.
pub trait Speech {
    fn speak(&mut self, utterance: &Utterance);
}

/// Writes utterances to the log instead of a voice.
#[derive(Debug, Default)]
pub struct LoggedSpeech;

impl Speech for LoggedSpeech {
    fn speak(&mut self, utterance: &Utterance) {
        info!(
            rate = utterance.rate,
            pitch = utterance.pitch,
            volume = utterance.volume,
            "speaking: {}",
            utterance.text
        );
    }
}
