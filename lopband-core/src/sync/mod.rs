//! ## lopband-core::sync
//! **Blocking primitives the stage runtime is built from**
//!
//! ### Key Submodules:
//! - `monitor`: sticky, single-wake signal latch
//! - `queue`: bounded FIFO with blocking put/get and the finished handshake

mod monitor;
mod queue;

pub use monitor::Monitor;
pub use queue::WorkQueue;
