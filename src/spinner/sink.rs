use std::io::Write;
use std::sync::{Arc, Mutex, PoisonError};

/// Where frames go. Anything with `write` and `flush` will do.
pub type Sink = Box<dyn Write + Send>;

pub fn stdout() -> Sink {
    Box::new(std::io::stdout())
}

pub fn stderr() -> Sink {
    Box::new(std::io::stderr())
}

/// In-memory sink whose clones all share one buffer.
#[derive(Clone, Default)]
pub struct CaptureSink {
    buffer: Arc<Mutex<Vec<u8>>>,
}

impl CaptureSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything written so far, lossily decoded.
    pub fn contents(&self) -> String {
        let buffer = self.buffer.lock().unwrap_or_else(PoisonError::into_inner);
        String::from_utf8_lossy(&buffer).to_string()
    }

    pub fn boxed(&self) -> Sink {
        Box::new(self.clone())
    }
}

impl Write for CaptureSink {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        let mut buffer = self.buffer.lock().unwrap_or_else(PoisonError::into_inner);
        buffer.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}
