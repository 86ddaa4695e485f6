//! Demo entrypoint: spin for a while, as if something slow were happening.
use eyre::{Result, eyre};
use std::time::Duration;

use whirl::spinner::sink;
use whirl::{Spinner, SpinnerConfig};

const DEFAULT_SECONDS: f64 = 3.0;

const USAGE: &str = "usage: whirl [SECONDS] [--random[=PERCENT]]";

#[derive(Debug)]
struct Args {
    seconds: f64,
    /// `Some(None)` asks for the default jitter probability.
    random: Option<Option<u8>>,
}

fn parse_args(args: impl Iterator<Item = String>) -> Result<Args> {
    let mut parsed = Args {
        seconds: DEFAULT_SECONDS,
        random: None,
    };
    for arg in args {
        if arg == "--random" {
            parsed.random = Some(None);
        } else if let Some(pct) = arg.strip_prefix("--random=") {
            let pct = pct
                .parse::<u8>()
                .map_err(|e| eyre!("bad jitter percent {pct:?}: {e}"))?;
            parsed.random = Some(Some(pct));
        } else if arg == "-h" || arg == "--help" {
            return Err(eyre!(USAGE));
        } else {
            parsed.seconds = arg
                .parse::<f64>()
                .ok()
                .filter(|s| s.is_finite() && *s >= 0.0)
                .ok_or_else(|| eyre!("bad duration {arg:?}\n{USAGE}"))?;
        }
    }
    Ok(parsed)
}

#[tokio::main]
async fn main() -> Result<()> {
    whirl::logging::setup_tracing();

    let args = parse_args(std::env::args().skip(1))?;
    let config = SpinnerConfig::from_env()?;

    // Keep stdout clean when it is piped somewhere.
    let output = if atty::is(atty::Stream::Stdout) {
        sink::stdout()
    } else {
        sink::stderr()
    };
    let spinner = Spinner::with_config(config, output)?;
    if let Some(pct) = args.random {
        spinner.random(pct)?;
    }
    let interrupted = spinner.stop_on_interrupt()?;

    let work = tokio::time::sleep(Duration::from_secs_f64(args.seconds));
    tokio::select! {
        spun = spinner.while_spinning(work) => spun?,
        _ = interrupted => {
            tracing::info!("interrupted");
        }
    }
    spinner.clear()?;

    if let Some(failure) = spinner.take_failure() {
        return Err(eyre!(failure));
    }
    println!("done");
    Ok(())
}
