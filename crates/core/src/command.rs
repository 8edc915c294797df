//! The labeling request handed to the image processor.

use std::ffi::OsStr;
use std::path::{Component, Path};

use serde::{Deserialize, Serialize};

/// One annotation request: a box with a label on one unlabeled image.
///
/// `width`/`height` are the original image dimensions; the box coordinates
/// are in original-image pixel space. Box area is not checked here, see
/// [`LabelCommand::has_area`]. Missing fields deserialize to their zero
/// value, as browsers omit untouched inputs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LabelCommand {
    pub filename: String,

    pub width: u32,
    pub height: u32,

    pub label: String,
    pub left: i32,
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
}

impl LabelCommand {
    /// Label with surrounding whitespace removed.
    pub fn trimmed_label(&self) -> &str {
        self.label.trim()
    }

    /// `false` when the box collapses to a line or a point.
    pub fn has_area(&self) -> bool {
        self.right != self.left && self.bottom != self.top
    }
}

/// Trim the characters browsers leave around form values.
pub fn trim_input(value: &str) -> &str {
    value.trim_matches(|c: char| c == ' ' || c == '\n')
}

/// Whether `filename` is a single plain path component such as `cat.png`.
///
/// Rejects separators, `.`/`..` and absolute paths so a name taken from a
/// request can only address an entry directly inside a root.
pub fn is_plain_filename(filename: &str) -> bool {
    let mut components = Path::new(filename).components();
    matches!(
        components.next(),
        Some(Component::Normal(name)) if name == OsStr::new(filename)
    ) && components.next().is_none()
}
