//! Command-line interface.

use crate::config::Config;
use crate::error::Result;
use clap::Parser;
use std::path::PathBuf;

/// Terminal fireworks greeting card
#[derive(Parser, Debug)]
#[command(name = "skyburst")]
#[command(about = "Terminal fireworks greeting card")]
#[command(after_help = "Enter/Space opens the envelope, click to pop, M toggles music. Press 'q', ESC, or Ctrl+C to exit")]
#[command(version)]
pub struct Args {
    /// TOML file with show settings
    #[arg(long, value_name = "CONFIG_FILE")]
    pub config: Option<PathBuf>,

    /// Background color as hex (e.g. 1a1b26)
    #[arg(long, value_name = "RRGGBB")]
    pub bg_color: Option<String>,

    /// Seed for a reproducible show
    #[arg(long)]
    pub seed: Option<u64>,

    /// Logical pixels per terminal pixel
    #[arg(long)]
    pub scale: Option<f32>,

    /// Open the envelope right away
    #[arg(long)]
    pub open: bool,

    /// Start with no audio output
    #[arg(long)]
    pub mute: bool,

    /// Speak the greeting into the log
    #[arg(long)]
    pub speak: bool,

    /// Write logs to this file
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    pub log_level: tracing::Level,
}

impl Args {
    /// Defaults, then the config file, then flags.
    pub fn to_config(&self) -> Result<Config> {
        let mut config = match &self.config {
            Some(path) => Config::load_from_file(path)?,
            None => Config::default(),
        };
        if let Some(bg_color) = &self.bg_color {
            config.bg_color = bg_color.clone();
        }
        if let Some(seed) = self.seed {
            config.seed = Some(seed);
        }
        if let Some(scale) = self.scale {
            config.scale = scale;
        }
        config.validate()?;
        Ok(config)
    }
}

pub fn parse_args() -> Args {
    Args::parse()
}
