//! Batch upload orchestration for Courier.
//!
//! This crate provides:
//! - The upload orchestrator that dispatches queued files and tracks
//!   per-file and batch-wide completion
//! - Per-invocation batch accounting
//! - A single-task file cleanup worker
//! - A broadcast event sink for lifecycle events
//! - The enqueue/cancel queue manager
//! - A cron scheduler that triggers batch runs

pub mod batch;
pub mod cleanup;
pub mod manager;
pub mod orchestrator;
pub mod scheduler;
pub mod sink;

pub use cleanup::FileCleanupWorker;
pub use manager::UploadQueueManager;
pub use orchestrator::UploadOrchestrator;
pub use scheduler::UploadJobScheduler;
