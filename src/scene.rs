use crate::audio::Audio;
use crate::canvas::Canvas;
use crate::show::{FRAME_MS, Input, Show};
use crate::surface::Surface;
use crossterm::event::{Event, KeyCode, KeyEventKind, MouseButton, MouseEvent, MouseEventKind};
use std::io::{self, Write};
use tracing::debug;

/// Something the terminal loop can drive.
pub trait Scene {
    /// Advance by one fixed step of `dt` seconds.
    fn update(&mut self, dt: f32);
    fn render<W: Write>(&mut self, out: &mut W) -> io::Result<()>;
    fn handle_event(&mut self, _event: &Event) {}
    fn resize(&mut self, cols: u16, rows: u16);
}

/// A show drawn on a terminal canvas, with the music label in the top-right
/// corner.
pub struct TerminalStage<A: Audio> {
    show: Show<A>,
    canvas: Canvas,
    cols: u16,
}

impl<A: Audio> TerminalStage<A> {
    pub fn new(show: Show<A>, canvas: Canvas) -> Self {
        let cols = canvas.pixel_size().0 as u16;
        Self { show, canvas, cols }
    }

    pub fn show(&self) -> &Show<A> {
        &self.show
    }

    pub fn show_mut(&mut self) -> &mut Show<A> {
        &mut self.show
    }

    fn label_span(&self) -> (u16, u16) {
        let len = self.show.music_label().as_str().len() as u16 + 2;
        (self.cols.saturating_sub(len), self.cols)
    }

    fn input(&mut self, input: Input) {
        let (width, height) = (self.canvas.width(), self.canvas.height());
        self.show.handle_input(input, width, height);
    }
}

impl<A: Audio> Scene for TerminalStage<A> {
    fn update(&mut self, dt: f32) {
        // One fixed step is one frame; the step length only drives the clock.
        let elapsed_ms = if dt > 0.0 { dt as f64 * 1000.0 } else { FRAME_MS };
        self.show.tick(&mut self.canvas, elapsed_ms);
    }

    fn render<W: Write>(&mut self, out: &mut W) -> io::Result<()> {
        self.canvas.render(out)?;

        let label = self.show.music_label().as_str();
        let (start, _) = self.label_span();
        write!(out, "\x1b[1;{}H\x1b[0m\x1b[38;2;255;215;0m {} \x1b[0m", start + 1, label)?;
        out.flush()
    }

    fn handle_event(&mut self, event: &Event) {
        match event {
            Event::Mouse(MouseEvent { kind: MouseEventKind::Down(MouseButton::Left), column, row, .. }) => {
                let (start, end) = self.label_span();
                if *row == 0 && (start..end).contains(column) {
                    self.input(Input::ToggleMusic);
                } else {
                    let point = self.canvas.cell_center(*column, *row);
                    self.input(Input::PointerDown(point));
                }
            }
            Event::Key(key) if key.kind == KeyEventKind::Press => match key.code {
                KeyCode::Enter | KeyCode::Char(' ') => self.input(Input::OpenEnvelope),
                KeyCode::Char('m') | KeyCode::Char('M') => self.input(Input::ToggleMusic),
                _ => {}
            },
            _ => {}
        }
    }

    fn resize(&mut self, cols: u16, rows: u16) {
        debug!(cols, rows, "resizing canvas");
        self.cols = cols;
        self.canvas.resize(cols as usize, rows as usize);
    }
}
