mod process_file;

pub use process_file::ProcessFileJob;

use anyhow::Result;
use async_trait::async_trait;

use ocrflow_core::models::Job;

/// Trait for job handlers.
///
/// **CPU-bound work:** If a handler does CPU-intensive work of its own, run
/// it inside `tokio::task::spawn_blocking` so it does not block the async
/// runtime. The handlers in this crate delegate heavy lifting to external
/// tools and stay I/O-bound.
#[async_trait]
pub trait JobHandler: Send + Sync {
    async fn process(&self, job: &Job) -> Result<()>;
}
