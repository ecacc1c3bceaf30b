//! Wiring an ordered chain of stages into one pipeline.
//!
//! Stages are spawned back-to-front so that each one is handed its
//! successor's enqueue capability at construction time; the chain is never
//! rewired afterwards. The last stage gets no downstream and acts as the
//! pipeline's sink.

use bytes::Bytes;

use crate::error::PipelineError;
use crate::stage::{Downstream, Stage};
use crate::transform::Transform;

/// Name and transform for one stage, in pipeline order.
pub struct StageSpec {
    pub name: String,
    pub transform: Box<dyn Transform>,
}

impl StageSpec {
    pub fn new(name: impl Into<String>, transform: Box<dyn Transform>) -> Self {
        Self {
            name: name.into(),
            transform,
        }
    }
}

/// An ordered chain of running stages.
pub struct Pipeline {
    stages: Vec<Stage>,
}

impl Pipeline {
    /// Spawns one stage per spec, every queue bounded by `capacity`, and
    /// wires stage *i*'s output into stage *i+1*'s inbox.
    pub fn build(capacity: usize, specs: Vec<StageSpec>) -> Result<Self, PipelineError> {
        if specs.is_empty() {
            return Err(PipelineError::EmptyPipeline);
        }

        let mut stages = Vec::with_capacity(specs.len());
        let mut downstream: Option<Downstream> = None;
        for spec in specs.into_iter().rev() {
            let stage = Stage::spawn(&spec.name, spec.transform, capacity, downstream.take())?;
            downstream = Some(stage.handle());
            stages.push(stage);
        }
        stages.reverse();

        Ok(Self { stages })
    }

    /// Feeds an item into the first stage, blocking on back-pressure.
    pub fn place_work(&self, item: Bytes) -> Result<(), PipelineError> {
        self.stages[0].place_work(item)
    }

    /// Blocks until every stage has observed the end-of-stream marker,
    /// waiting on the stages in pipeline order.
    pub fn wait_finished(&self) {
        for stage in &self.stages {
            stage.wait_finished();
        }
    }

    /// Tears the stages down in pipeline order, joining each worker
    /// before its queue is released.
    pub fn shutdown(self) -> Result<(), PipelineError> {
        for stage in self.stages {
            stage.join()?;
        }
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.stages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stages.is_empty()
    }
}
