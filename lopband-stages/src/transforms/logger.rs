use std::io::Write;

use bytes::Bytes;
use lopband_core::{Transform, TransformError};

/// Prints every item that passes through to stdout, prefixed with
/// `[logger] `, and passes it on unchanged.
pub struct Logger;

impl Transform for Logger {
    fn apply(&self, input: Bytes) -> Result<Bytes, TransformError> {
        let stdout = std::io::stdout();
        let mut out = stdout.lock();
        out.write_all(b"[logger] ")?;
        out.write_all(&input)?;
        out.write_all(b"\n")?;
        out.flush()?;
        Ok(input)
    }
}
