use std::path::PathBuf;

/// One image file discovered in the opened folder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageEntry {
    pub filename: String,
    pub path: PathBuf,
}

/// The recorded class for one image. Keyed by filename in the session map,
/// so the filename itself is not repeated here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnnotationRecord {
    pub class_index: usize,
    pub class_name: String,
}

/// Why a label request did not complete.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LabelError {
    /// The pressed digit is beyond the configured class count. Callers are
    /// expected to ignore this silently.
    InvalidClass(usize),
    /// The record was kept in memory but the CSV flush failed; the message
    /// is suitable for the status bar.
    ExportFailed(String),
}

impl std::fmt::Display for LabelError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LabelError::InvalidClass(idx) => write!(f, "No class bound to index {idx}"),
            LabelError::ExportFailed(msg) => write!(f, "Save failed: {msg}"),
        }
    }
}
