//! Label commit worker.
//!
//! - [`writer`] — validates a [`LabelCommand`](labeler_core::LabelCommand),
//!   writes its annotation and moves the image into the labeled root.
//! - [`processor`] — the single-writer actor that serializes commits.

pub mod processor;
pub mod writer;

pub use processor::{CommandExecutor, ImageProcessor, ProcessorConfig, WorkerExit, WorkerHandle};
pub use writer::{AnnotationWriter, CommitOutcome};
