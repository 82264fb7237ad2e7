//! Show settings: built-in defaults, optionally overridden by a TOML file and
//! then by command-line flags.

use crate::error::{Error, Result};
use crate::sequence::{SequenceItem, default_sequence};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Logical pixels per terminal pixel.
    pub scale: f32,
    /// Background as RRGGBB hex.
    pub bg_color: String,
    /// Per-frame ambient launch probability before the greeting.
    pub base_chance: f32,
    /// Per-frame ambient launch probability once the greeting has played.
    pub escalated_chance: f32,
    /// Offset from the start of the sequence at which the chance escalates.
    pub escalate_after_ms: u64,
    /// Delay between opening the envelope and starting the sequence.
    pub open_delay_ms: u64,
    /// Delay of the second pop after a click.
    pub jitter_delay_ms: u64,
    pub greeting: String,
    pub music_volume: f32,
    /// Seed for the random source; random when absent.
    pub seed: Option<u64>,
    pub sequence: Vec<SequenceItem>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            scale: 8.0,
            bg_color: "000000".to_string(),
            base_chance: 0.02,
            escalated_chance: 0.10,
            escalate_after_ms: 7000,
            open_delay_ms: 1000,
            jitter_delay_ms: 100,
            greeting: "Happy New Year Dear".to_string(),
            music_volume: 0.5,
            seed: None,
            sequence: default_sequence(),
        }
    }
}

impl Config {
    pub fn from_toml(contents: &str) -> Result<Self> {
        let config: Config = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load_from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path).map_err(|source| Error::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&contents)
    }

    pub fn validate(&self) -> Result<()> {
        if !(self.scale > 0.0) {
            return Err(Error::InvalidConfig(format!("scale must be positive, got {}", self.scale)));
        }
        for (name, chance) in [("base_chance", self.base_chance), ("escalated_chance", self.escalated_chance)] {
            if !(0.0..=1.0).contains(&chance) {
                return Err(Error::InvalidConfig(format!("{} must be within 0..=1, got {}", name, chance)));
            }
        }
        if !(0.0..=1.0).contains(&self.music_volume) {
            return Err(Error::InvalidConfig(format!(
                "music_volume must be within 0..=1, got {}",
                self.music_volume
            )));
        }
        for item in &self.sequence {
            if item.text.is_empty() {
                return Err(Error::InvalidConfig("sequence captions must not be empty".to_string()));
            }
            if !(0.0..=1.0).contains(&item.x) {
                return Err(Error::InvalidConfig(format!(
                    "sequence item `{}` has x = {}, expected a fraction within 0..=1",
                    item.text, item.x
                )));
            }
        }
        self.background()?;
        Ok(())
    }

    pub fn background(&self) -> Result<(u8, u8, u8)> {
        parse_hex_color(&self.bg_color).ok_or_else(|| Error::InvalidColor(self.bg_color.clone()))
    }
}

pub fn parse_hex_color(hex: &str) -> Option<(u8, u8, u8)> {
    let hex = hex.trim_start_matches('#');
    if hex.len() != 6 || !hex.is_ascii() {
        return None;
    }

    let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
    let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
    let b = u8::from_str_radix(&hex[4..6], 16).ok()?;

    Some((r, g, b))
}
