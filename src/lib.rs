//! Terminal busy spinner driven by a tokio timer.
pub mod logging;
pub mod spinner;

pub use spinner::{SpinGuard, Spinner, SpinnerConfig, SpinnerError};
