use bytes::Bytes;
use lopband_core::{Transform, TransformError};

/// Reverses the byte order of the item.
pub struct Flipper;

impl Transform for Flipper {
    fn apply(&self, input: Bytes) -> Result<Bytes, TransformError> {
        let mut reversed = input.to_vec();
        reversed.reverse();
        Ok(Bytes::from(reversed))
    }
}
