use bytes::Bytes;
use lopband_core::{Transform, TransformError};

/// Moves every byte one position to the right; the last byte wraps around
/// to the front.
pub struct Rotator;

impl Transform for Rotator {
    fn apply(&self, input: Bytes) -> Result<Bytes, TransformError> {
        if input.is_empty() {
            return Ok(input);
        }
        let mut rotated = input.to_vec();
        rotated.rotate_right(1);
        Ok(Bytes::from(rotated))
    }
}
