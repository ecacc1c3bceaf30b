//! The per-stage processing seam.

use bytes::Bytes;

use crate::error::TransformError;

/// A stage's processing step: one owned byte string in, one out.
///
/// Implementations must be total over any input and must not block for
/// long relative to queue capacity; a slow transform propagates
/// back-pressure all the way to the pipeline's producer. Side effects
/// (logging, delayed echo) are permitted.
pub trait Transform: Send {
    fn apply(&self, input: Bytes) -> Result<Bytes, TransformError>;
}

/// Adapter turning a plain closure into a [`Transform`].
pub struct FnTransform<F>(pub F);

impl<F> Transform for FnTransform<F>
where
    F: Fn(Bytes) -> Result<Bytes, TransformError> + Send,
{
    fn apply(&self, input: Bytes) -> Result<Bytes, TransformError> {
        (self.0)(input)
    }
}
