use bytes::Bytes;
use lopband_core::{Transform, TransformError};

/// Converts every ASCII alphabetic byte to uppercase.
pub struct Uppercaser;

impl Transform for Uppercaser {
    fn apply(&self, input: Bytes) -> Result<Bytes, TransformError> {
        Ok(Bytes::from(input.to_ascii_uppercase()))
    }
}
