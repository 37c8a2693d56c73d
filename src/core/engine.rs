use crate::core::Pipeline;
use crate::utils::error::Result;
use std::time::Instant;

/// Counts reported by a finished batch run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchSummary {
    pub evaluated: usize,
    pub failed: usize,
    pub outputs: Vec<String>,
}

pub struct BatchEngine<P: Pipeline> {
    pipeline: P,
}

impl<P: Pipeline> BatchEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self { pipeline }
    }

    pub fn run(&self) -> Result<BatchSummary> {
        let started = Instant::now();
        tracing::info!("Starting batch evaluation");

        let lines = self.pipeline.extract()?;
        tracing::info!("Read {} expressions", lines.len());

        let report = self.pipeline.transform(lines)?;
        let evaluated = report.records.len();
        let failed = report.failed();
        tracing::info!("Evaluated {} expressions ({} failed)", evaluated, failed);

        let outputs = self.pipeline.load(report)?;
        for output in &outputs {
            tracing::info!("Wrote {}", output);
        }
        tracing::debug!("Batch finished in {:?}", started.elapsed());

        Ok(BatchSummary {
            evaluated,
            failed,
            outputs,
        })
    }
}
