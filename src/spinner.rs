//! Timer-driven busy spinner.
//!
//! While running, a tokio task wakes up every `interval`, writes the current frame to the sink
//! followed by as many backspaces as the frame is wide, and advances to the next frame.
//! Callers must not write to the same sink while the spinner is running; the engine cannot
//! prevent interleaved output.
mod config;
mod error;
pub mod sink;
mod state;

pub use config::{
    DEFAULT_FRAMES, DEFAULT_INTERVAL_SECS, DEFAULT_RANDOM_PROBABILITY, MAX_JITTER_SECS,
    SpinnerConfig, interval_from_secs,
};
pub use error::SpinnerError;
pub use sink::{CaptureSink, Sink};

use std::future::Future;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};
use std::time::Duration;

use tokio::runtime::Handle;

use state::State;

struct Shared {
    state: Mutex<State>,
}

impl Shared {
    fn lock(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// A spinner with its own frames, timing and sink.
///
/// Any number of spinners can run side by side; dropping one cancels its timer.
///
/// Each tick writes and flushes the sink while holding the spinner's lock, so a sink that
/// blocks (a stalled pipe, say) also blocks `stop` and the setters until the write returns.
pub struct Spinner {
    shared: Arc<Shared>,
}

impl Default for Spinner {
    fn default() -> Self {
        Self::new()
    }
}

impl Spinner {
    /// Default frames and timing, drawing to stdout.
    pub fn new() -> Self {
        Spinner::from_state(State::new(SpinnerConfig::default(), sink::stdout()))
    }

    pub fn with_config(config: SpinnerConfig, sink: Sink) -> Result<Self, SpinnerError> {
        config.validate()?;
        Ok(Spinner::from_state(State::new(config, sink)))
    }

    fn from_state(state: State) -> Self {
        Spinner {
            shared: Arc::new(Shared {
                state: Mutex::new(state),
            }),
        }
    }

    /// Start animating on the ambient tokio runtime.
    ///
    /// Does nothing if already spinning.
    ///
    /// # Errors
    /// `NoTimer` when called outside of a tokio runtime.
    pub fn start(&self) -> Result<(), SpinnerError> {
        let handle = Handle::try_current().map_err(SpinnerError::NoTimer)?;
        self.start_on(&handle);
        Ok(())
    }

    /// Start animating with timers driven by the given runtime.
    ///
    /// Usable from threads that are not inside a runtime, such as a blocking caller holding
    /// a `Handle` to a runtime it built for the purpose.
    pub fn start_on(&self, handle: &Handle) {
        let mut state = self.shared.lock();
        if state.running {
            return;
        }
        state.running = true;
        state.generation += 1;
        state.failure = None;
        let generation = state.generation;
        let shared = Arc::clone(&self.shared);
        state.task = Some(handle.spawn(run_ticks(shared, generation)));
        tracing::debug!(generation, interval = ?state.interval, "spinner: started");
    }

    /// Cancel the timer. No frame is drawn after this returns.
    ///
    /// The last frame stays on screen unless clearing on stop was configured.
    pub fn stop(&self) {
        stop_shared(&self.shared);
    }

    pub fn is_spinning(&self) -> bool {
        self.shared.lock().running
    }

    /// Blank out the last drawn frame, if any.
    pub fn clear(&self) -> Result<(), SpinnerError> {
        self.shared.lock().clear().map_err(SpinnerError::Output)
    }

    /// Replace the animation; the next tick draws the first new frame.
    pub fn set_frames<S: Into<String>>(
        &self,
        frames: impl IntoIterator<Item = S>,
    ) -> Result<(), SpinnerError> {
        let frames = frames.into_iter().map(Into::into).collect();
        self.shared.lock().set_frames(frames)
    }

    /// Seconds between frames, applied from the next scheduled tick on.
    pub fn set_interval(&self, seconds: f64) -> Result<(), SpinnerError> {
        let interval = interval_from_secs(seconds)?;
        self.shared.lock().interval = interval;
        Ok(())
    }

    pub fn set_jitter_probability(&self, percent: u8) -> Result<(), SpinnerError> {
        if percent > 100 {
            return Err(SpinnerError::JitterOutOfRange(percent));
        }
        self.shared.lock().jitter_probability = percent;
        Ok(())
    }

    /// Make the animation speed erratic, `percent` of ticks picking a new interval.
    /// Defaults to 25 percent.
    pub fn random(&self, percent: Option<u8>) -> Result<(), SpinnerError> {
        self.set_jitter_probability(percent.unwrap_or(DEFAULT_RANDOM_PROBABILITY))
    }

    pub fn set_output(&self, sink: Sink) {
        let mut state = self.shared.lock();
        state.sink = sink;
        state.drawn_width = None;
    }

    pub fn set_clear_on_stop(&self, clear: bool) {
        self.shared.lock().clear_on_stop = clear;
    }

    pub fn frames(&self) -> Vec<String> {
        self.shared.lock().frames.clone()
    }

    pub fn interval(&self) -> Duration {
        self.shared.lock().interval
    }

    pub fn jitter_probability(&self) -> u8 {
        self.shared.lock().jitter_probability
    }

    /// Index of the frame the next tick will draw.
    pub fn frame_index(&self) -> usize {
        self.shared.lock().frame_index
    }

    /// The sink error that stopped the spinner, reported once.
    pub fn take_failure(&self) -> Option<SpinnerError> {
        self.shared.lock().failure.take()
    }

    /// Start spinning until the returned guard is dropped.
    pub fn spin(&self) -> Result<SpinGuard<'_>, SpinnerError> {
        self.start()?;
        Ok(SpinGuard { spinner: self })
    }

    /// Await `work` with the spinner running, stopping it afterwards.
    pub async fn while_spinning<F: Future>(&self, work: F) -> Result<F::Output, SpinnerError> {
        let _guard = self.spin()?;
        Ok(work.await)
    }

    /// Stop this spinner once the process receives Ctrl-C.
    ///
    /// The watcher does not keep the spinner alive.
    pub fn stop_on_interrupt(&self) -> Result<tokio::task::JoinHandle<()>, SpinnerError> {
        let handle = Handle::try_current().map_err(SpinnerError::NoTimer)?;
        let shared: Weak<Shared> = Arc::downgrade(&self.shared);
        Ok(handle.spawn(async move {
            if tokio::signal::ctrl_c().await.is_err() {
                return;
            }
            if let Some(shared) = shared.upgrade() {
                tracing::debug!("spinner: interrupted");
                stop_shared(&shared);
            }
        }))
    }

    #[cfg(test)]
    fn tick_now(&self) -> std::io::Result<()> {
        self.shared.lock().tick()
    }

    #[cfg(test)]
    fn seed_rng(&self, seed: u64) {
        self.shared.lock().seed_rng(seed);
    }
}

impl Drop for Spinner {
    fn drop(&mut self) {
        self.stop();
    }
}

/// Guard to keep spinner active while in scope.
pub struct SpinGuard<'a> {
    spinner: &'a Spinner,
}

impl Drop for SpinGuard<'_> {
    fn drop(&mut self) {
        self.spinner.stop();
    }
}

fn stop_shared(shared: &Shared) {
    let mut state = shared.lock();
    if !state.running {
        return;
    }
    state.running = false;
    state.generation += 1;
    if let Some(task) = state.task.take() {
        task.abort();
    }
    if state.clear_on_stop
        && let Err(e) = state.clear()
    {
        tracing::warn!("spinner: could not clear last frame: {e}");
    }
    tracing::debug!("spinner: stopped");
}

/// Timer loop of one run: sleep for the current interval, then draw a frame.
async fn run_ticks(shared: Arc<Shared>, generation: u64) {
    loop {
        let delay = {
            let state = shared.lock();
            if !state.is_current(generation) {
                return;
            }
            state.interval
        };

        tokio::time::sleep(delay).await;

        let mut state = shared.lock();
        if !state.is_current(generation) {
            return;
        }
        if let Err(e) = state.tick() {
            tracing::error!("spinner: output failed, stopping: {e}");
            state.running = false;
            state.generation += 1;
            state.task = None;
            state.failure = Some(SpinnerError::Output(e));
            return;
        }
    }
}
