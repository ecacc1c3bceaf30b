use bytes::Bytes;
use lopband_core::{Transform, TransformError};

/// Inserts a single space between each pair of consecutive bytes.
pub struct Expander;

impl Transform for Expander {
    fn apply(&self, input: Bytes) -> Result<Bytes, TransformError> {
        if input.is_empty() {
            return Ok(input);
        }
        let mut expanded = Vec::with_capacity(input.len() * 2 - 1);
        for (i, byte) in input.iter().enumerate() {
            if i > 0 {
                expanded.push(b' ');
            }
            expanded.push(*byte);
        }
        Ok(Bytes::from(expanded))
    }
}
