//! Single-writer image processor.
//!
//! [`ImageProcessor`] funnels every label command into one dedicated worker
//! thread, which owns all filesystem mutation. Callers hand a command over
//! through a queue of capacity one and wait on a one-shot channel created
//! for that command. Both waits are bounded by [`ProcessorConfig`].
//!
//! A caller that times out does not cancel the worker: the stale command
//! still runs and its result is logged and dropped.
//!
//! The worker only stops on its own when an executor panics. Pending and
//! later submissions then fail with [`LabelError::WorkerStopped`], and
//! [`WorkerHandle::on_exit`] resolves with [`WorkerExit::Panicked`] so the
//! host process can shut down.

use std::future::Future;
use std::thread::JoinHandle;
use std::time::Duration;

use labeler_core::{LabelCommand, LabelError};
use tokio::sync::mpsc::error::SendTimeoutError;
use tokio::sync::{mpsc, oneshot, watch};

use crate::writer::{AnnotationWriter, CommitOutcome};

/// Default bound on handing a command to the worker.
pub const DEFAULT_SUBMIT_TIMEOUT: Duration = Duration::from_secs(1);

/// Default bound on waiting for the worker's response.
pub const DEFAULT_RESPONSE_TIMEOUT: Duration = Duration::from_secs(1);

/// Commands accepted but not yet picked up by the worker.
const QUEUE_CAPACITY: usize = 1;

const WORKER_THREAD_NAME: &str = "label-writer";

/// Result delivered for every command.
pub type CommandResult = Result<CommitOutcome, LabelError>;

// ---------------------------------------------------------------------------
// Executor seam
// ---------------------------------------------------------------------------

/// Executes one command on the worker thread.
pub trait CommandExecutor: Send + 'static {
    fn execute(&mut self, command: &LabelCommand) -> CommandResult;
}

impl CommandExecutor for AnnotationWriter {
    fn execute(&mut self, command: &LabelCommand) -> CommandResult {
        self.commit(command)
    }
}

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProcessorConfig {
    pub submit_timeout: Duration,
    pub response_timeout: Duration,
}

impl Default for ProcessorConfig {
    fn default() -> Self {
        Self {
            submit_timeout: DEFAULT_SUBMIT_TIMEOUT,
            response_timeout: DEFAULT_RESPONSE_TIMEOUT,
        }
    }
}

// ---------------------------------------------------------------------------
// Processor
// ---------------------------------------------------------------------------

struct Job {
    command: LabelCommand,
    respond_to: oneshot::Sender<CommandResult>,
}

/// Cloneable handle to the worker thread.
///
/// The worker exits once every handle has been dropped.
#[derive(Clone)]
pub struct ImageProcessor {
    jobs: mpsc::Sender<Job>,
    config: ProcessorConfig,
}

/// Join handle for the worker thread, returned by [`ImageProcessor::start`].
pub struct WorkerHandle {
    thread: JoinHandle<()>,
    exit: watch::Receiver<Option<WorkerExit>>,
}

/// How the worker thread ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkerExit {
    /// Every [`ImageProcessor`] handle was dropped and the queue drained.
    Drained,
    /// An executor panicked; the processor can no longer accept commands.
    Panicked,
}

/// Publishes the exit reason when the worker thread unwinds or returns.
struct ExitNotifier(watch::Sender<Option<WorkerExit>>);

impl Drop for ExitNotifier {
    fn drop(&mut self) {
        let exit = if std::thread::panicking() {
            WorkerExit::Panicked
        } else {
            WorkerExit::Drained
        };
        self.0.send_replace(Some(exit));
    }
}

impl ImageProcessor {
    /// Spawn the worker thread around `executor`.
    pub fn start<E: CommandExecutor>(
        executor: E,
        config: ProcessorConfig,
    ) -> std::io::Result<(Self, WorkerHandle)> {
        let (jobs, queue) = mpsc::channel(QUEUE_CAPACITY);
        let (exit_tx, exit) = watch::channel(None);

        let thread = std::thread::Builder::new()
            .name(WORKER_THREAD_NAME.to_string())
            .spawn(move || {
                let _notifier = ExitNotifier(exit_tx);
                run_worker(executor, queue);
            })?;

        tracing::info!(
            submit_timeout = ?config.submit_timeout,
            response_timeout = ?config.response_timeout,
            "Image processor started",
        );

        Ok((Self { jobs, config }, WorkerHandle { thread, exit }))
    }

    /// Hand `command` to the worker and wait for its result.
    ///
    /// Fails with [`LabelError::SubmitTimeout`] when the queue stays full,
    /// [`LabelError::ResponseTimeout`] when the worker does not answer in
    /// time, and [`LabelError::WorkerStopped`] when the worker is gone.
    pub async fn submit(&self, command: LabelCommand) -> CommandResult {
        let (respond_to, response) = oneshot::channel();
        let job = Job {
            command,
            respond_to,
        };

        match self.jobs.send_timeout(job, self.config.submit_timeout).await {
            Ok(()) => {}
            Err(SendTimeoutError::Timeout(job)) => {
                tracing::warn!(filename = %job.command.filename, "Submit timeout exceeded");
                return Err(LabelError::SubmitTimeout);
            }
            Err(SendTimeoutError::Closed(_)) => {
                tracing::error!("Image processor queue is closed");
                return Err(LabelError::WorkerStopped);
            }
        }

        match tokio::time::timeout(self.config.response_timeout, response).await {
            Ok(Ok(result)) => result,
            Ok(Err(_)) => {
                tracing::error!("Image processor dropped a command without responding");
                Err(LabelError::WorkerStopped)
            }
            Err(_) => {
                tracing::warn!("Response timeout exceeded");
                Err(LabelError::ResponseTimeout)
            }
        }
    }
}

impl WorkerHandle {
    /// Resolve once the worker thread has exited, with the reason.
    ///
    /// The returned future is independent of `self`, so it can be handed to
    /// a shutdown trigger while the handle is kept for [`WorkerHandle::join`].
    pub fn on_exit(&self) -> impl Future<Output = WorkerExit> + Send + 'static {
        let mut exit = self.exit.clone();
        async move {
            match exit.wait_for(Option::is_some).await {
                Ok(state) => state.unwrap_or(WorkerExit::Panicked),
                Err(_) => WorkerExit::Panicked,
            }
        }
    }

    /// Block until the worker thread exits.
    pub fn join(self) -> WorkerExit {
        match self.thread.join() {
            Ok(()) => WorkerExit::Drained,
            Err(_) => {
                tracing::error!("Image processor thread panicked");
                WorkerExit::Panicked
            }
        }
    }
}

fn run_worker<E: CommandExecutor>(mut executor: E, mut queue: mpsc::Receiver<Job>) {
    while let Some(Job {
        command,
        respond_to,
    }) = queue.blocking_recv()
    {
        tracing::info!(
            filename = %command.filename,
            label = %command.label,
            width = command.width,
            height = command.height,
            left = command.left,
            top = command.top,
            right = command.right,
            bottom = command.bottom,
            "Received label command",
        );

        let result = executor.execute(&command);
        match &result {
            Ok(outcome) => tracing::info!(
                image = %outcome.image_path.display(),
                annotation = %outcome.annotation_path.display(),
                "Label committed",
            ),
            Err(e) => tracing::warn!(
                filename = %command.filename,
                error = %e,
                "Error processing command",
            ),
        }

        if respond_to.send(result).is_err() {
            tracing::warn!(
                filename = %command.filename,
                "Caller stopped waiting, dropping result",
            );
        }
    }

    tracing::info!("Image processor stopped");
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
