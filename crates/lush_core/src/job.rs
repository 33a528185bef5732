//! Background execution for asynchronous commands.
//!
//! Each accepted asynchronous command runs on its own worker thread. The
//! manager keeps a table of running jobs and delivers one
//! [`JobCompletion`] per finished job over an mpsc channel; the REPL
//! drains that channel between commands, so completions are reported
//! without ever blocking the interactive loop.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::mpsc::{Receiver, Sender};
use std::sync::{mpsc, Arc, Mutex, PoisonError};
use std::thread;
use std::time::{Duration, Instant};

use crate::context::CancelToken;
use crate::error::ShellResult;
use crate::status::Status;

/// Identifier assigned to an accepted asynchronous command.
pub type JobId = u32;

/// Delivered once when a background job finishes, carrying the real
/// outcome that the dispatch-time "accepted" result stood in for.
#[derive(Debug)]
pub struct JobCompletion {
    pub id: JobId,
    pub command: String,
    pub status: Status,
}

/// A still-running background job, as listed by `jobs`.
#[derive(Debug, Clone)]
pub struct JobInfo {
    pub id: JobId,
    pub command: String,
    pub elapsed: Duration,
}

struct JobHandle {
    command: String,
    started: Instant,
    cancel: CancelToken,
}

pub struct JobManager {
    next_id: AtomicU32,
    running: Arc<Mutex<HashMap<JobId, JobHandle>>>,
    tx: Mutex<Sender<JobCompletion>>,
    rx: Mutex<Receiver<JobCompletion>>,
}

impl JobManager {
    pub fn new() -> Self {
        let (tx, rx) = mpsc::channel();
        Self {
            next_id: AtomicU32::new(0),
            running: Arc::new(Mutex::new(HashMap::new())),
            tx: Mutex::new(tx),
            rx: Mutex::new(rx),
        }
    }

    /// Schedule `body` on a worker thread and return immediately.
    ///
    /// The job's completion is sent on the channel once `body` returns;
    /// `cancel` is the same token the body's context carries, so
    /// [`JobManager::cancel`] reaches it.
    pub fn spawn<F>(&self, command: String, cancel: CancelToken, body: F) -> ShellResult<JobId>
    where
        F: FnOnce() -> Status + Send + 'static,
    {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed) + 1;
        lock(&self.running).insert(
            id,
            JobHandle {
                command: command.clone(),
                started: Instant::now(),
                cancel,
            },
        );

        let running = Arc::clone(&self.running);
        let tx = lock(&self.tx).clone();
        let spawned = thread::Builder::new()
            .name(format!("lush-job-{id}"))
            .spawn(move || {
                tracing::debug!(id, command = %command, "background job started");
                let status = body();
                lock(&running).remove(&id);
                let _ = tx.send(JobCompletion {
                    id,
                    command,
                    status,
                });
            });

        match spawned {
            Ok(_) => Ok(id),
            Err(err) => {
                lock(&self.running).remove(&id);
                Err(err.into())
            }
        }
    }

    /// Drain every completion that has arrived so far. Non-blocking.
    pub fn poll_completions(&self) -> Vec<JobCompletion> {
        let rx = lock(&self.rx);
        let mut finished = Vec::new();
        while let Ok(completion) = rx.try_recv() {
            finished.push(completion);
        }
        finished
    }

    /// Snapshot of still-running jobs, ordered by id.
    pub fn running_jobs(&self) -> Vec<JobInfo> {
        let running = lock(&self.running);
        let mut jobs: Vec<JobInfo> = running
            .iter()
            .map(|(id, handle)| JobInfo {
                id: *id,
                command: handle.command.clone(),
                elapsed: handle.started.elapsed(),
            })
            .collect();
        jobs.sort_by_key(|job| job.id);
        jobs
    }

    /// Request cancellation of a running job. Best effort: the body
    /// observes its token at its own pace. Returns false when no job with
    /// that id is running.
    pub fn cancel(&self, id: JobId) -> bool {
        match lock(&self.running).get(&id) {
            Some(handle) => {
                handle.cancel.cancel();
                true
            }
            None => false,
        }
    }
}

impl Default for JobManager {
    fn default() -> Self {
        Self::new()
    }
}

fn lock<T>(mutex: &Mutex<T>) -> std::sync::MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{ErrorKind, ShellError};

    fn wait_for_completions(manager: &JobManager, want: usize) -> Vec<JobCompletion> {
        let deadline = Instant::now() + Duration::from_secs(5);
        let mut finished = Vec::new();
        while finished.len() < want && Instant::now() < deadline {
            finished.extend(manager.poll_completions());
            thread::sleep(Duration::from_millis(10));
        }
        finished
    }

    #[test]
    fn completion_arrives_on_the_channel() {
        let manager = JobManager::new();
        let id = manager
            .spawn("demo".to_string(), CancelToken::new(), || Status::Ok)
            .unwrap();

        let finished = wait_for_completions(&manager, 1);
        assert_eq!(finished.len(), 1);
        assert_eq!(finished[0].id, id);
        assert_eq!(finished[0].command, "demo");
        assert!(finished[0].status.is_ok());
        assert!(manager.running_jobs().is_empty());
    }

    #[test]
    fn cancel_reaches_the_body_through_the_token() {
        let manager = JobManager::new();
        let token = CancelToken::new();
        let body_token = token.clone();
        let id = manager
            .spawn("waiter".to_string(), token, move || {
                let deadline = Instant::now() + Duration::from_secs(5);
                while !body_token.is_cancelled() && Instant::now() < deadline {
                    thread::sleep(Duration::from_millis(5));
                }
                if body_token.is_cancelled() {
                    Status::Error(ShellError::new(ErrorKind::Interrupted, "cancelled"))
                } else {
                    Status::Ok
                }
            })
            .unwrap();

        // The job shows up as running until the flag is observed.
        assert!(manager.running_jobs().iter().any(|job| job.id == id));
        assert!(manager.cancel(id));

        let finished = wait_for_completions(&manager, 1);
        assert_eq!(finished.len(), 1);
        match &finished[0].status {
            Status::Error(err) => assert_eq!(err.kind, ErrorKind::Interrupted),
            other => panic!("expected interrupted error, got {other:?}"),
        }
    }

    #[test]
    fn cancel_of_unknown_job_reports_false() {
        let manager = JobManager::new();
        assert!(!manager.cancel(42));
    }
}
