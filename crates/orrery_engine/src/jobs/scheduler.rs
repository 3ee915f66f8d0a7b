//! Frame job scheduling and worker pool management
//!
//! A fixed pool of worker threads drains one shared FIFO queue of render
//! jobs. Workers block on the channel while idle and always run jobs
//! outside any queue synchronization, so one long render never stalls the
//! rest of the pool. Closing the submission side lets every worker drain
//! what remains and exit; `join_all` then waits for all of them.

use std::sync::{Arc, Mutex};
use std::thread;

use crossbeam::channel::{unbounded, Receiver, Sender};
use thiserror::Error;

/// Number of worker threads in a scheduler pool
pub const WORKER_COUNT: usize = 8;

/// Error type a job may fail with
pub type JobError = Box<dyn std::error::Error + Send + Sync>;

type Job = Box<dyn FnOnce() -> Result<(), JobError> + Send + 'static>;

/// Scheduler-level errors
#[derive(Error, Debug)]
pub enum SchedulerError {
    /// Submission after the queue was closed by `join_all`
    #[error("job queue is closed")]
    QueueClosed,

    /// A job returned an error; the run is aborted, not retried
    #[error("job failed: {0}")]
    JobFailed(String),

    /// A worker thread panicked while running a job
    #[error("worker thread panicked")]
    WorkerPanicked,
}

/// Fixed-size worker pool draining a shared job queue
///
/// Workers start eagerly at construction and run until [`join_all`]
/// closes the queue. Jobs may execute in any order relative to
/// submission; every submitted job runs exactly once before
/// [`join_all`] returns.
///
/// [`join_all`]: JobScheduler::join_all
pub struct JobScheduler {
    sender: Option<Sender<Job>>,
    workers: Vec<Worker>,
    failure: Arc<Mutex<Option<String>>>,
}

impl Default for JobScheduler {
    fn default() -> Self {
        Self::new()
    }
}

impl JobScheduler {
    /// Create a scheduler with the default worker count
    pub fn new() -> Self {
        Self::with_workers(WORKER_COUNT)
    }

    /// Create a scheduler with an explicit worker count
    ///
    /// # Panics
    /// Panics if `count` is zero.
    pub fn with_workers(count: usize) -> Self {
        assert!(count > 0, "scheduler needs at least one worker");

        let (sender, receiver) = unbounded::<Job>();
        let failure = Arc::new(Mutex::new(None));

        let workers = (0..count)
            .map(|id| Worker::new(id, receiver.clone(), Arc::clone(&failure)))
            .collect();

        log::debug!("job scheduler started with {count} workers");

        Self {
            sender: Some(sender),
            workers,
            failure,
        }
    }

    /// Enqueue one job
    ///
    /// Returns an error if the scheduler has already been joined.
    pub fn submit<F>(&self, job: F) -> Result<(), SchedulerError>
    where
        F: FnOnce() -> Result<(), JobError> + Send + 'static,
    {
        let sender = self.sender.as_ref().ok_or(SchedulerError::QueueClosed)?;
        sender
            .send(Box::new(job))
            .map_err(|_| SchedulerError::QueueClosed)
    }

    /// Close the queue, wait for quiescence, and reap all workers
    ///
    /// Every pending job runs before this returns; no in-flight job is
    /// cancelled. The first job failure recorded by any worker is
    /// surfaced here, as is a worker panic.
    pub fn join_all(&mut self) -> Result<(), SchedulerError> {
        // Dropping the sender disconnects the channel once the queue is
        // empty, which is exactly the quiescence signal workers wait for.
        self.sender.take();

        let mut panicked = false;
        for worker in &mut self.workers {
            if let Some(handle) = worker.thread.take() {
                if handle.join().is_err() {
                    log::error!("worker {} panicked", worker.id);
                    panicked = true;
                }
            }
        }

        if panicked {
            return Err(SchedulerError::WorkerPanicked);
        }
        if let Some(message) = self.failure.lock().unwrap().take() {
            return Err(SchedulerError::JobFailed(message));
        }
        Ok(())
    }
}

impl Drop for JobScheduler {
    fn drop(&mut self) {
        if let Err(e) = self.join_all() {
            log::error!("scheduler shutdown: {e}");
        }
    }
}

struct Worker {
    id: usize,
    thread: Option<thread::JoinHandle<()>>,
}

impl Worker {
    fn new(id: usize, receiver: Receiver<Job>, failure: Arc<Mutex<Option<String>>>) -> Self {
        let thread = thread::spawn(move || {
            // Blocks while idle; errors out when the queue is closed and
            // fully drained.
            while let Ok(job) = receiver.recv() {
                if let Err(e) = job() {
                    log::error!("worker {id}: job failed: {e}");
                    let mut slot = failure.lock().unwrap();
                    if slot.is_none() {
                        *slot = Some(e.to_string());
                    }
                }
            }
        });

        Self {
            id,
            thread: Some(thread),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn test_all_jobs_run_exactly_once_before_join() {
        for worker_count in [1, 2, 8] {
            let counter = Arc::new(AtomicUsize::new(0));
            let mut scheduler = JobScheduler::with_workers(worker_count);

            for _ in 0..100 {
                let counter = Arc::clone(&counter);
                scheduler
                    .submit(move || {
                        counter.fetch_add(1, Ordering::SeqCst);
                        Ok(())
                    })
                    .unwrap();
            }

            scheduler.join_all().unwrap();
            assert_eq!(counter.load(Ordering::SeqCst), 100);
        }
    }

    #[test]
    fn test_submit_after_join_is_rejected() {
        let mut scheduler = JobScheduler::with_workers(1);
        scheduler.join_all().unwrap();
        assert!(matches!(
            scheduler.submit(|| Ok(())),
            Err(SchedulerError::QueueClosed)
        ));
    }

    #[test]
    fn test_job_failure_surfaces_at_join() {
        let mut scheduler = JobScheduler::with_workers(2);
        scheduler.submit(|| Ok(())).unwrap();
        scheduler
            .submit(|| Err("disk full".into()))
            .unwrap();
        match scheduler.join_all() {
            Err(SchedulerError::JobFailed(message)) => assert!(message.contains("disk full")),
            other => panic!("expected JobFailed, got {other:?}"),
        }
    }

    #[test]
    fn test_failure_does_not_stop_remaining_jobs() {
        let counter = Arc::new(AtomicUsize::new(0));
        let mut scheduler = JobScheduler::with_workers(1);

        scheduler.submit(|| Err("early failure".into())).unwrap();
        for _ in 0..10 {
            let counter = Arc::clone(&counter);
            scheduler
                .submit(move || {
                    counter.fetch_add(1, Ordering::SeqCst);
                    Ok(())
                })
                .unwrap();
        }

        assert!(scheduler.join_all().is_err());
        assert_eq!(counter.load(Ordering::SeqCst), 10);
    }
}
