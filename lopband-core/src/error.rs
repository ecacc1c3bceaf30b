use thiserror::Error;

/// Runtime-level failures surfaced to the orchestrator.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("Queue capacity must be greater than zero")]
    InvalidCapacity,

    #[error("Pipeline must contain at least one stage")]
    EmptyPipeline,

    #[error("Stage '{0}' worker thread panicked")]
    WorkerPanicked(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Per-item failure produced by a stage's transform.
///
/// Always non-fatal to the stage: the worker logs it, drops the item, and
/// moves on to the next one.
#[derive(Debug, Error)]
pub enum TransformError {
    #[error("Transform failed: {0}")]
    Failed(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
