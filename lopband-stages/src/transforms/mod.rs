//! The built-in transforms.
//!
//! All of them are total over arbitrary byte strings and pass empty input
//! through unchanged. `typewriter` and `logger` write the pipeline's
//! user-visible output to stdout; everything else is pure.

mod expander;
mod flipper;
mod logger;
mod rotator;
mod typewriter;
mod uppercaser;

pub use expander::Expander;
pub use flipper::Flipper;
pub use logger::Logger;
pub use rotator::Rotator;
pub use typewriter::Typewriter;
pub use uppercaser::Uppercaser;
