//! Job dispatch trait
//!
//! The embedding application implements this trait (or uses the bundled
//! `JobRouter`). The queue holds a weak reference and calls `dispatch_job`
//! for each job it hands to a worker.

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use std::sync::{Arc, Weak};

use crate::handlers::{JobHandler, ProcessFileJob};
use ocrflow_core::models::{Job, JobKind};

/// Context for job dispatch.
///
/// The queue holds a weak reference so it never keeps application state
/// alive past shutdown.
#[async_trait]
pub trait JobDispatch: Send + Sync {
    /// Dispatch a job to the appropriate handler.
    async fn dispatch_job(self: Arc<Self>, job: &Job) -> Result<()>;
}

/// Routes jobs to their handlers by kind.
pub struct JobRouter {
    process_file: Arc<ProcessFileJob>,
}

impl JobRouter {
    pub fn new(process_file: Arc<ProcessFileJob>) -> Self {
        Self { process_file }
    }
}

#[async_trait]
impl JobDispatch for JobRouter {
    async fn dispatch_job(self: Arc<Self>, job: &Job) -> Result<()> {
        match job.kind {
            JobKind::ProcessFile => self.process_file.process(job).await,
        }
    }
}

/// Placeholder context used when no real context exists yet (e.g. during
/// init). Dispatch always errors.
struct NoopDispatch;

#[async_trait]
impl JobDispatch for NoopDispatch {
    async fn dispatch_job(self: Arc<Self>, _job: &Job) -> Result<()> {
        Err(anyhow!("NoopDispatch: no dispatch context available"))
    }
}

/// Returns a weak reference to a no-op context. Use as placeholder when
/// building a JobQueue before the real wiring exists.
pub fn empty_dispatch_weak() -> Weak<dyn JobDispatch> {
    let n: Arc<dyn JobDispatch> = Arc::new(NoopDispatch);
    Arc::downgrade(&n)
}
