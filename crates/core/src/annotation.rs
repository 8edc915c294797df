//! Pascal-VOC annotation document (single object).
//!
//! The schema is fixed: one `<object>` with one `<bndbox>`, constant
//! source database, depth, pose and flags. Rendering matches the layout
//! consumed by existing VOC tooling byte for byte, so it is done by hand
//! rather than through a generic serializer.

use std::fmt::{Display, Write as _};
use std::path::{Path, PathBuf};

use crate::command::LabelCommand;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Declaration written before the document body.
pub const XML_HEADER: &str = "<?xml version=\"1.0\"?>\n";

/// Extension of the sidecar annotation file.
pub const ANNOTATION_EXTENSION: &str = "xml";

/// Source database tag for images without provenance.
pub const UNKNOWN_DATABASE: &str = "Unknown";

/// Pose recorded for every object.
pub const UNSPECIFIED_POSE: &str = "Unspecified";

/// Channel depth recorded for every image.
pub const IMAGE_DEPTH: u32 = 3;

/// Prefix written at the start of every line of the body.
const LINE_PREFIX: &str = "  ";

/// Indentation per nesting level.
const INDENT: &str = "    ";

// ---------------------------------------------------------------------------
// Document
// ---------------------------------------------------------------------------

/// Immutable record describing one labeled box on one image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnnotationDocument {
    pub folder: String,
    pub filename: String,
    pub path: String,
    pub database: &'static str,

    pub width: u32,
    pub height: u32,
    pub depth: u32,

    pub segmented: u8,

    pub name: String,
    pub pose: &'static str,
    pub truncated: u8,
    pub difficult: u8,
    pub xmin: i32,
    pub ymin: i32,
    pub xmax: i32,
    pub ymax: i32,
}

impl AnnotationDocument {
    /// Build the document for `cmd`, whose image lives at `source_path`
    /// inside the directory named `folder`.
    pub fn new(cmd: &LabelCommand, folder: &str, source_path: &Path) -> Self {
        Self {
            folder: folder.to_string(),
            filename: cmd.filename.clone(),
            path: source_path.display().to_string(),
            database: UNKNOWN_DATABASE,

            width: cmd.width,
            height: cmd.height,
            depth: IMAGE_DEPTH,

            segmented: 0,

            name: cmd.trimmed_label().to_string(),
            pose: UNSPECIFIED_POSE,
            truncated: 0,
            difficult: 0,
            xmin: cmd.left,
            ymin: cmd.top,
            xmax: cmd.right,
            ymax: cmd.bottom,
        }
    }

    /// Render the document body (without [`XML_HEADER`] and without a
    /// trailing newline).
    pub fn to_xml(&self) -> String {
        let mut w = XmlWriter::default();

        w.open("annotation");
        w.leaf("folder", &self.folder);
        w.leaf("filename", &self.filename);
        w.leaf("path", &self.path);

        w.open("source");
        w.leaf("database", self.database);
        w.close("source");

        w.open("size");
        w.leaf("width", self.width);
        w.leaf("height", self.height);
        w.leaf("depth", self.depth);
        w.close("size");

        w.leaf("segmented", self.segmented);

        w.open("object");
        w.leaf("name", &self.name);
        w.leaf("pose", self.pose);
        w.leaf("truncated", self.truncated);
        w.leaf("difficult", self.difficult);
        w.open("bndbox");
        w.leaf("xmin", self.xmin);
        w.leaf("ymin", self.ymin);
        w.leaf("xmax", self.xmax);
        w.leaf("ymax", self.ymax);
        w.close("bndbox");
        w.close("object");

        w.close("annotation");
        w.out
    }
}

/// Sidecar file name for an image: the image name with its extension
/// replaced by `.xml` (or `.xml` appended when it has none).
pub fn annotation_file_name(image_filename: &str) -> PathBuf {
    Path::new(image_filename).with_extension(ANNOTATION_EXTENSION)
}

// ---------------------------------------------------------------------------
// Rendering
// ---------------------------------------------------------------------------

#[derive(Default)]
struct XmlWriter {
    out: String,
    depth: usize,
}

impl XmlWriter {
    fn start_line(&mut self) {
        if !self.out.is_empty() {
            self.out.push('\n');
        }
        self.out.push_str(LINE_PREFIX);
        for _ in 0..self.depth {
            self.out.push_str(INDENT);
        }
    }

    fn open(&mut self, tag: &str) {
        self.start_line();
        let _ = write!(self.out, "<{tag}>");
        self.depth += 1;
    }

    fn close(&mut self, tag: &str) {
        self.depth -= 1;
        self.start_line();
        let _ = write!(self.out, "</{tag}>");
    }

    fn leaf(&mut self, tag: &str, value: impl Display) {
        self.start_line();
        let _ = write!(self.out, "<{tag}>");
        escape_text(&mut self.out, &value.to_string());
        let _ = write!(self.out, "</{tag}>");
    }
}

/// Append `text` to `out` with markup and whitespace control characters
/// replaced by references. Characters outside the XML range become U+FFFD.
fn escape_text(out: &mut String, text: &str) {
    for c in text.chars() {
        match c {
            '"' => out.push_str("&#34;"),
            '\'' => out.push_str("&#39;"),
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '\t' => out.push_str("&#x9;"),
            '\n' => out.push_str("&#xA;"),
            '\r' => out.push_str("&#xD;"),
            c if is_xml_char(c) => out.push(c),
            _ => out.push('\u{FFFD}'),
        }
    }
}

fn is_xml_char(c: char) -> bool {
    matches!(c,
        '\u{20}'..='\u{D7FF}' | '\u{E000}'..='\u{FFFD}' | '\u{10000}'..='\u{10FFFF}')
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
