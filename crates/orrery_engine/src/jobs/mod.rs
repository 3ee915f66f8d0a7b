//! Concurrent job execution
//!
//! One render job per frame, a bounded worker pool, and a shared queue.
//! Jobs own their scene snapshot outright, so the only contested resource
//! in the whole pipeline is the queue itself.

mod scheduler;

pub use scheduler::{JobError, JobScheduler, SchedulerError, WORKER_COUNT};
