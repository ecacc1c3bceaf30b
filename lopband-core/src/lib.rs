//! # lopband-core
//!
//! Concurrency runtime for the löpband text-processing pipeline.
//! One OS thread per stage, bounded blocking queues between them, and a
//! sticky single-wake signaling primitive underneath it all.
//!
//! ### Key Submodules:
//! - `sync`: `Monitor` (signal latch) and `WorkQueue` (bounded FIFO)
//! - `stage`: per-stage worker loop and the end-of-stream protocol
//! - `pipeline`: wiring, feeding, draining, and teardown of a stage chain
//!
//! ### Guarantees:
//! - Strict FIFO delivery per queue and end-to-end across the chain
//! - Back-pressure as the only flow control, no drops, no batching
//! - Orderly shutdown: the `<END>` marker propagates through every stage
//!   and each worker is joined before its queue is released

pub mod error;
pub mod pipeline;
pub mod stage;
pub mod sync;
pub mod transform;

pub use error::{PipelineError, TransformError};
pub use pipeline::{Pipeline, StageSpec};
pub use stage::{Downstream, Stage, END_OF_STREAM};
pub use sync::{Monitor, WorkQueue};
pub use transform::{FnTransform, Transform};
