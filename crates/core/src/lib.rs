//! Domain types and pure logic for the bounding-box labeler.
//!
//! - [`command`] — the [`LabelCommand`] submitted for every annotation.
//! - [`annotation`] — the fixed Pascal-VOC document and its XML rendering.
//! - [`preview`] — preview window selection around the current image.
//! - [`error`] — the [`LabelError`] taxonomy shared by the worker and API.

pub mod annotation;
pub mod command;
pub mod error;
pub mod preview;

pub use annotation::AnnotationDocument;
pub use command::LabelCommand;
pub use error::LabelError;
pub use preview::{find_current_index, select_window, PreviewWindow};
