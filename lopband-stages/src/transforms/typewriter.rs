use std::io::Write;
use std::time::Duration;

use bytes::Bytes;
use lopband_core::{Transform, TransformError};

/// Echoes the item to stdout one byte at a time with a fixed delay,
/// simulating a typewriter, then passes the item through unchanged.
///
/// The delay makes this the slowest stage by far; its queue fills up and
/// back-pressure stalls every stage upstream of it.
pub struct Typewriter {
    delay: Duration,
}

impl Typewriter {
    pub fn new() -> Self {
        Self {
            delay: Duration::from_millis(100),
        }
    }

    #[cfg(test)]
    fn with_delay(delay: Duration) -> Self {
        Self { delay }
    }
}

impl Default for Typewriter {
    fn default() -> Self {
        Self::new()
    }
}

impl Transform for Typewriter {
    fn apply(&self, input: Bytes) -> Result<Bytes, TransformError> {
        let stdout = std::io::stdout();
        let mut out = stdout.lock();
        out.write_all(b"[typewriter] ")?;
        out.flush()?;
        for byte in input.iter() {
            out.write_all(std::slice::from_ref(byte))?;
            out.flush()?;
            std::thread::sleep(self.delay);
        }
        out.write_all(b"\n")?;
        out.flush()?;
        Ok(input)
    }
}
