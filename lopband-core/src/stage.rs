//! Per-stage worker: one OS thread draining one [`WorkQueue`].
//!
//! A stage owns its inbox queue, its transform, and an optional downstream
//! capability pointing at the next stage's inbox. The worker runs until it
//! dequeues the end-of-stream marker, which it forwards verbatim before
//! signaling the finished handshake and exiting. All per-item failures are
//! logged and dropped; nothing short of the marker stops the loop.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};

use bytes::Bytes;
use tracing::error;

use crate::error::PipelineError;
use crate::sync::WorkQueue;
use crate::transform::Transform;

/// Reserved end-of-stream marker.
///
/// Forwarded verbatim from stage to stage and never handed to a transform.
pub const END_OF_STREAM: &[u8] = b"<END>";

/// Capability for handing an item to the next stage (or a sink).
pub type Downstream = Box<dyn Fn(Bytes) -> Result<(), PipelineError> + Send>;

/// One pipeline unit: queue, transform, worker thread, downstream link.
///
/// `spawn` is the only constructor, so a stage can never be initialized
/// twice or run more than one worker. The former ambient per-module state
/// is plain ownership here.
pub struct Stage {
    name: String,
    queue: Arc<WorkQueue>,
    finished: Arc<AtomicBool>,
    worker: Option<JoinHandle<()>>,
}

impl Stage {
    /// Creates the stage's queue and starts its worker thread.
    pub fn spawn(
        name: &str,
        transform: Box<dyn Transform>,
        capacity: usize,
        downstream: Option<Downstream>,
    ) -> Result<Self, PipelineError> {
        let queue = Arc::new(WorkQueue::with_capacity(capacity)?);
        let finished = Arc::new(AtomicBool::new(false));

        let worker = thread::Builder::new()
            .name(format!("stage-{name}"))
            .spawn({
                let name = name.to_owned();
                let queue = Arc::clone(&queue);
                let finished = Arc::clone(&finished);
                move || worker_loop(&name, &queue, transform.as_ref(), downstream, &finished)
            })?;

        Ok(Self {
            name: name.to_owned(),
            queue,
            finished,
            worker: Some(worker),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Enqueues an item for this stage, blocking while its queue is full.
    ///
    /// Back-pressure is the only throttle: a stalled stage fills its queue
    /// and this call parks the upstream thread until room opens up.
    pub fn place_work(&self, item: Bytes) -> Result<(), PipelineError> {
        self.queue.put(item);
        Ok(())
    }

    /// Returns a downstream capability feeding this stage's queue.
    pub fn handle(&self) -> Downstream {
        let queue = Arc::clone(&self.queue);
        Box::new(move |item| {
            queue.put(item);
            Ok(())
        })
    }

    /// Blocks until this stage's worker has processed the end-of-stream
    /// marker. At most one thread may wait per stage.
    pub fn wait_finished(&self) {
        self.queue.wait_finished();
    }

    /// True once the worker has observed the end-of-stream marker.
    pub fn is_finished(&self) -> bool {
        self.finished.load(Ordering::Acquire)
    }

    /// Tears the stage down: joins the worker thread first, so no in-flight
    /// item races resource release, then drops the queue with it.
    pub fn join(mut self) -> Result<(), PipelineError> {
        if let Some(worker) = self.worker.take() {
            worker
                .join()
                .map_err(|_| PipelineError::WorkerPanicked(self.name.clone()))?;
        }
        Ok(())
    }
}

fn worker_loop(
    name: &str,
    queue: &WorkQueue,
    transform: &dyn Transform,
    downstream: Option<Downstream>,
    finished: &AtomicBool,
) {
    loop {
        let item = queue.get();

        if item.as_ref() == END_OF_STREAM {
            // Propagate shutdown down the chain before reporting done.
            if let Some(forward) = &downstream {
                if let Err(error) = forward(item) {
                    error!(stage = name, %error, "failed to forward end-of-stream marker");
                }
            }
            finished.store(true, Ordering::Release);
            queue.signal_finished();
            return;
        }

        match transform.apply(item) {
            Ok(output) => match &downstream {
                Some(forward) => {
                    if let Err(error) = forward(output) {
                        error!(stage = name, %error, "failed to forward item, dropping it");
                    }
                }
                // Last stage: the pipeline's sink, output is discarded.
                None => drop(output),
            },
            Err(error) => {
                error!(stage = name, %error, "transform failed, item dropped");
            }
        }
    }
}
