#[derive(Debug)]
pub enum SpinnerError {
    /// A spinner needs at least one frame to draw.
    EmptyFrames,
    /// Interval seconds must be finite and not negative.
    InvalidInterval(f64),
    /// Jitter probability is a percentage.
    JitterOutOfRange(u8),
    /// An environment override could not be parsed.
    InvalidEnv { key: &'static str, value: String },
    /// There is no tokio runtime to drive the timer.
    NoTimer(tokio::runtime::TryCurrentError),
    /// Writing to the sink failed; the spinner stopped itself.
    Output(std::io::Error),
}

impl std::fmt::Display for SpinnerError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SpinnerError::EmptyFrames => write!(f, "frame sequence must not be empty"),
            SpinnerError::InvalidInterval(secs) => {
                write!(f, "interval must be a non-negative number of seconds, got {secs}")
            }
            SpinnerError::JitterOutOfRange(pct) => {
                write!(f, "jitter probability must be within 0..=100, got {pct}")
            }
            SpinnerError::InvalidEnv { key, value } => {
                write!(f, "cannot use {key}={value:?}")
            }
            SpinnerError::NoTimer(e) => write!(f, "no timer available: {e}"),
            SpinnerError::Output(e) => write!(f, "failed to draw frame: {e}"),
        }
    }
}

impl std::error::Error for SpinnerError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SpinnerError::NoTimer(e) => Some(e),
            SpinnerError::Output(e) => Some(e),
            _ => None,
        }
    }
}
