//! Fireworks greeting card for the terminal.
//!
//! Rockets rise and burst into particles, captioned rockets burst into
//! glowing words, and every click pops. Opening the envelope plays the
//! scripted greeting and turns up the ambient fireworks.

pub mod audio;
pub mod canvas;
pub mod cli;
pub mod color;
pub mod config;
pub mod entities;
pub mod envelope;
pub mod error;
pub mod font;
pub mod logging;
pub mod scene;
pub mod sequence;
pub mod show;
pub mod spawner;
pub mod speech;
pub mod surface;
pub mod timers;

pub use error::{Error, Result};
