//! ocrflow Worker – in-process job queue and the file OCR job handler.
//!
//! The queue delivers jobs to a `JobDispatch` implementation; the bundled
//! `JobRouter` routes by job kind to the handlers in this crate.

mod context;
pub mod handlers;
mod queue;

pub use context::{empty_dispatch_weak, JobDispatch, JobRouter};
pub use handlers::{JobHandler, ProcessFileJob};
pub use queue::{JobQueue, JobQueueConfig};
