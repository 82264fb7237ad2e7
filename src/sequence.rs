//! The scripted greeting: captioned rockets launched at fixed offsets.

use serde::{Deserialize, Serialize};

/// One captioned rocket of the greeting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SequenceItem {
    pub text: String,
    /// Launch offset from the start of the sequence. Offsets are absolute,
    /// not relative to the previous item.
    pub delay_ms: u64,
    /// Horizontal launch position as a fraction of the width.
    pub x: f32,
    /// Overrides the rocket's random hue.
    #[serde(default)]
    pub hue: Option<f32>,
}

impl SequenceItem {
    pub fn new(text: &str, delay_ms: u64, x: f32) -> Self {
        Self { text: text.to_string(), delay_ms, x, hue: None }
    }

    pub fn with_hue(mut self, hue: f32) -> Self {
        self.hue = Some(hue);
        self
    }
}

/// Happy / New / Year / 2026.
pub fn default_sequence() -> Vec<SequenceItem> {
    vec![
        SequenceItem::new("Happy", 1000, 0.2),
        SequenceItem::new("New", 2500, 0.5),
        SequenceItem::new("Year", 4000, 0.8),
        SequenceItem::new("2026", 5500, 0.5).with_hue(180.0),
    ]
}

/// Target height of captioned rockets as a fraction of the height.
pub const TARGET_HEIGHT: f32 = 0.3;
