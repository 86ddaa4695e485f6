//! Animation state and the body of a single tick.
use std::io::Write;
use std::time::Duration;

use crossterm::queue;
use crossterm::style::Print;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use unicode_width::UnicodeWidthStr;

use super::SpinnerError;
use super::config::{MAX_JITTER_SECS, SpinnerConfig};
use super::sink::Sink;

const BACKSPACE: &str = "\x08";

pub(super) struct State {
    pub frames: Vec<String>,
    pub interval: Duration,
    pub jitter_probability: u8,
    pub clear_on_stop: bool,
    pub sink: Sink,
    pub frame_index: usize,
    pub running: bool,
    /// Bumped on every start and stop; a timer task only draws for its own generation.
    pub generation: u64,
    /// Display width of the frame currently on screen, if any.
    pub drawn_width: Option<usize>,
    pub failure: Option<SpinnerError>,
    pub task: Option<tokio::task::JoinHandle<()>>,
    rng: StdRng,
}

impl State {
    pub fn new(config: SpinnerConfig, sink: Sink) -> Self {
        State {
            frames: config.frames,
            interval: config.interval,
            jitter_probability: config.jitter_probability,
            clear_on_stop: config.clear_on_stop,
            sink,
            frame_index: 0,
            running: false,
            generation: 0,
            drawn_width: None,
            failure: None,
            task: None,
            rng: StdRng::from_entropy(),
        }
    }

    /// Whether a timer task started for `generation` should keep going.
    pub fn is_current(&self, generation: u64) -> bool {
        self.running && self.generation == generation
    }

    /// Draw the current frame, erase it, advance, and maybe pick a new interval.
    pub fn tick(&mut self) -> std::io::Result<()> {
        let frame = &self.frames[self.frame_index];
        let width = frame.width();
        queue!(self.sink, Print(frame), Print(BACKSPACE.repeat(width)))?;
        self.sink.flush()?;
        self.drawn_width = Some(width);

        self.frame_index = (self.frame_index + 1) % self.frames.len();
        self.maybe_jitter();
        Ok(())
    }

    fn maybe_jitter(&mut self) {
        if self.jitter_probability == 0 {
            return;
        }
        if self.rng.gen_range(0..100u8) < self.jitter_probability {
            self.interval = Duration::from_secs_f64(self.rng.gen_range(0.0..MAX_JITTER_SECS));
            tracing::trace!(interval = ?self.interval, "spinner: interval jittered");
        }
    }

    /// Overwrite the last drawn frame with blanks, leaving the cursor where it was.
    pub fn clear(&mut self) -> std::io::Result<()> {
        let Some(width) = self.drawn_width.take() else {
            return Ok(());
        };
        queue!(self.sink, Print(" ".repeat(width)), Print(BACKSPACE.repeat(width)))?;
        self.sink.flush()
    }

    pub fn set_frames(&mut self, frames: Vec<String>) -> Result<(), SpinnerError> {
        if frames.is_empty() {
            return Err(SpinnerError::EmptyFrames);
        }
        self.frames = frames;
        self.frame_index = 0;
        Ok(())
    }

    #[cfg(test)]
    pub fn seed_rng(&mut self, seed: u64) {
        self.rng = StdRng::seed_from_u64(seed);
    }
}
