//! Job queue: worker pool, submission, and shutdown.

use std::sync::{Arc, Weak};
use std::time::Duration;

use anyhow::Result;
use tokio::sync::{mpsc, Semaphore};
use uuid::Uuid;

use crate::context::JobDispatch;
use ocrflow_core::models::{Job, JobKind};

#[derive(Clone)]
pub struct JobQueueConfig {
    pub max_workers: usize,
    pub queue_capacity: usize,
    pub job_timeout_seconds: u64,
}

impl Default for JobQueueConfig {
    fn default() -> Self {
        Self {
            max_workers: 4,
            queue_capacity: 64,
            job_timeout_seconds: 600,
        }
    }
}

impl From<&ocrflow_core::Config> for JobQueueConfig {
    fn from(config: &ocrflow_core::Config) -> Self {
        Self {
            max_workers: config.max_workers,
            queue_capacity: config.queue_capacity,
            job_timeout_seconds: config.job_timeout_seconds,
        }
    }
}

/// In-process job queue feeding a bounded worker pool.
///
/// Jobs are delivered in submission order to at most `max_workers`
/// concurrent workers. The queue holds no job state of its own: the host
/// scheduler owns durability, retry, and anything else beyond handing the
/// payload to a handler exactly once.
pub struct JobQueue {
    job_tx: mpsc::Sender<Job>,
    shutdown_tx: mpsc::Sender<()>,
}

impl JobQueue {
    /// Create a new JobQueue with a weak reference to the dispatch context.
    pub fn new(config: JobQueueConfig, dispatch: Weak<dyn JobDispatch>) -> Self {
        let (job_tx, job_rx) = mpsc::channel(config.queue_capacity);
        let (shutdown_tx, shutdown_rx) = mpsc::channel(1);

        tokio::spawn(async move {
            Self::worker_pool(config, job_rx, shutdown_rx, dispatch).await;
        });

        Self {
            job_tx,
            shutdown_tx,
        }
    }

    /// Submit a new job to the queue.
    #[tracing::instrument(skip(self, payload))]
    pub async fn submit_job(&self, kind: JobKind, payload: serde_json::Value) -> Result<Uuid> {
        let job = Job::new(kind.clone(), payload);
        let job_id = job.id;

        self.job_tx
            .send(job)
            .await
            .map_err(|_| anyhow::anyhow!("Job queue is shut down"))?;

        tracing::info!(
            job_id = %job_id,
            job_kind = %kind,
            "Job submitted to queue"
        );

        Ok(job_id)
    }

    async fn worker_pool(
        config: JobQueueConfig,
        mut job_rx: mpsc::Receiver<Job>,
        mut shutdown_rx: mpsc::Receiver<()>,
        dispatch: Weak<dyn JobDispatch>,
    ) {
        tracing::info!(
            max_workers = config.max_workers,
            job_timeout_seconds = config.job_timeout_seconds,
            "Job queue worker pool started"
        );

        let semaphore = Arc::new(Semaphore::new(config.max_workers));
        let timeout = Duration::from_secs(config.job_timeout_seconds);

        loop {
            tokio::select! {
                _ = shutdown_rx.recv() => {
                    tracing::info!("Job queue worker pool shutting down");
                    break;
                }
                job = job_rx.recv() => {
                    let Some(job) = job else {
                        tracing::info!("Job channel closed, stopping worker pool");
                        break;
                    };

                    // Backpressure: wait for a free worker before taking the
                    // next job off the channel.
                    let permit = match semaphore.clone().acquire_owned().await {
                        Ok(permit) => permit,
                        Err(_) => break,
                    };

                    let dispatch = dispatch.clone();
                    tokio::spawn(async move {
                        let _permit = permit;
                        Self::run_job(job, timeout, dispatch).await;
                    });
                }
            }
        }

        tracing::info!("Job queue worker pool stopped");
    }

    #[tracing::instrument(skip(job, dispatch), fields(job.id = %job.id, job.kind = %job.kind))]
    async fn run_job(job: Job, timeout: Duration, dispatch: Weak<dyn JobDispatch>) {
        let Some(ctx) = dispatch.upgrade() else {
            tracing::error!("JobDispatch was dropped, cannot process job");
            return;
        };

        match tokio::time::timeout(timeout, ctx.dispatch_job(&job)).await {
            Ok(Ok(())) => {
                tracing::info!("Job completed");
            }
            Ok(Err(e)) => {
                // Handlers swallow their own failures; an error here means the
                // dispatch itself broke (unroutable kind, dropped wiring).
                tracing::error!(error = format!("{:#}", e), "Job dispatch failed");
            }
            Err(_) => {
                tracing::error!(
                    timeout_seconds = timeout.as_secs(),
                    "Job execution timed out"
                );
            }
        }
    }

    pub async fn shutdown(&self) {
        tracing::info!("Initiating job queue shutdown");
        let _ = self.shutdown_tx.send(()).await;
    }
}

impl Clone for JobQueue {
    fn clone(&self) -> Self {
        Self {
            job_tx: self.job_tx.clone(),
            shutdown_tx: self.shutdown_tx.clone(),
        }
    }
}
