//! Background music control.
//!
//! Playback itself sits behind the [`Audio`] trait; [`Music`] owns the
//! user-facing label and the play-once-then-toggle behaviour.

use thiserror::Error;
use tracing::{debug, warn};

#[derive(Debug, Error)]
pub enum AudioError {
    #[error("no audio output available")]
    Unavailable,
    #[error("playback was refused: {0}")]
    Refused(String),
}

/// A single looping track.
pub trait Audio {
    fn play(&mut self) -> Result<(), AudioError>;
    fn pause(&mut self);
    fn is_paused(&self) -> bool;
    fn set_volume(&mut self, volume: f32);
}

/// A track that keeps transport state but produces no sound. With
/// `available == false` every play attempt is refused.
#[derive(Debug)]
pub struct SilentTrack {
    available: bool,
    paused: bool,
    volume: f32,
}

impl SilentTrack {
    pub fn new(available: bool) -> Self {
        Self { available, paused: true, volume: 1.0 }
    }

    pub fn volume(&self) -> f32 {
        self.volume
    }
}

impl Audio for SilentTrack {
    fn play(&mut self) -> Result<(), AudioError> {
        if !self.available {
            return Err(AudioError::Unavailable);
        }
        self.paused = false;
        Ok(())
    }

    fn pause(&mut self) {
        self.paused = true;
    }

    fn is_paused(&self) -> bool {
        self.paused
    }

    fn set_volume(&mut self, volume: f32) {
        self.volume = volume.clamp(0.0, 1.0);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MusicLabel {
    Off,
    On,
    Paused,
}

impl MusicLabel {
    pub fn as_str(&self) -> &'static str {
        match self {
            MusicLabel::Off => "Music: OFF",
            MusicLabel::On => "Music: ON",
            MusicLabel::Paused => "Music: PAUSED",
        }
    }
}

pub struct Music<A: Audio> {
    track: A,
    volume: f32,
    initialized: bool,
    label: MusicLabel,
}

impl<A: Audio> Music<A> {
    pub fn new(track: A, volume: f32) -> Self {
        Self { track, volume, initialized: false, label: MusicLabel::Off }
    }

    /// Start the music the first time this is called; later calls do nothing.
    /// A refused start is logged and otherwise ignored.
    pub fn init(&mut self) {
        if self.initialized {
            return;
        }
        self.initialized = true;
        self.track.set_volume(self.volume);
        match self.track.play() {
            Ok(()) => {
                debug!(volume = self.volume, "music started");
                self.label = MusicLabel::On;
            }
            Err(e) => warn!("audio play failed: {}", e),
        }
    }

    pub fn toggle(&mut self) {
        if self.track.is_paused() {
            match self.track.play() {
                Ok(()) => self.label = MusicLabel::On,
                Err(e) => warn!("audio play failed: {}", e),
            }
        } else {
            self.track.pause();
            self.label = MusicLabel::Paused;
        }
    }

    pub fn label(&self) -> MusicLabel {
        self.label
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    pub fn track(&self) -> &A {
        &self.track
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Refuses playback a fixed number of times before letting it through.
    struct Stubborn {
        refusals: u32,
        plays: u32,
        paused: bool,
    }

    impl Audio for Stubborn {
        fn play(&mut self) -> Result<(), AudioError> {
            self.plays += 1;
            if self.refusals > 0 {
                self.refusals -= 1;
                return Err(AudioError::Refused("autoplay blocked".to_string()));
            }
            self.paused = false;
            Ok(())
        }

        fn pause(&mut self) {
            self.paused = true;
        }

        fn is_paused(&self) -> bool {
            self.paused
        }

        fn set_volume(&mut self, _volume: f32) {}
    }

    #[test]
    fn test_init_plays_once_at_configured_volume() {
        let mut music = Music::new(SilentTrack::new(true), 0.5);
        assert_eq!(music.label(), MusicLabel::Off);
        music.init();
        assert_eq!(music.label(), MusicLabel::On);
        assert_eq!(music.track().volume(), 0.5);
        assert!(!music.track().is_paused());

        music.toggle();
        music.init();
        assert_eq!(music.label(), MusicLabel::Paused);
        assert!(music.track().is_paused());
    }

    #[test]
    fn test_refused_start_is_swallowed_without_retry() {
        let mut music = Music::new(Stubborn { refusals: 1, plays: 0, paused: true }, 0.5);
        music.init();
        assert!(music.is_initialized());
        assert_eq!(music.label(), MusicLabel::Off);
        music.init();
        assert_eq!(music.track().plays, 1);
    }

    #[test]
    fn test_toggle_flips_between_on_and_paused() {
        let mut music = Music::new(SilentTrack::new(true), 0.5);
        music.toggle();
        assert_eq!(music.label(), MusicLabel::On);
        music.toggle();
        assert_eq!(music.label(), MusicLabel::Paused);
        music.toggle();
        assert_eq!(music.label(), MusicLabel::On);
    }

    #[test]
    fn test_unavailable_track_keeps_label() {
        let mut music = Music::new(SilentTrack::new(false), 0.5);
        music.init();
        music.toggle();
        assert_eq!(music.label(), MusicLabel::Off);
        assert!(music.track().is_paused());
    }

    #[test]
    fn test_labels() {
        assert_eq!(MusicLabel::Off.as_str(), "Music: OFF");
        assert_eq!(MusicLabel::On.as_str(), "Music: ON");
        assert_eq!(MusicLabel::Paused.as_str(), "Music: PAUSED");
    }
}
