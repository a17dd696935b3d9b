//! Folder scanning and the per-folder annotation session.

use crate::config::AppConfig;
use crate::export;
use crate::state::types::{AnnotationRecord, ImageEntry, LabelError};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

const IMAGE_EXTENSIONS: [&str; 6] = ["png", "jpg", "jpeg", "bmp", "gif", "tiff"];

/// List the image files in a folder, sorted by filename so the traversal
/// order is reproducible across runs.
pub fn scan_image_folder(folder: &Path) -> Result<Vec<ImageEntry>, String> {
    let entries = fs::read_dir(folder).map_err(|e| format!("Failed to read folder: {e}"))?;

    let mut images = Vec::new();
    for entry in entries.flatten() {
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        let Some(ext) = path.extension().and_then(|e| e.to_str()) else {
            continue;
        };
        if !IMAGE_EXTENSIONS.contains(&ext.to_lowercase().as_str()) {
            continue;
        }
        if let Some(filename) = path.file_name().and_then(|f| f.to_str()) {
            images.push(ImageEntry {
                filename: filename.to_string(),
                path: path.clone(),
            });
        }
    }

    if images.is_empty() {
        return Err("No image files found in folder".into());
    }

    images.sort_by(|a, b| a.filename.cmp(&b.filename));
    Ok(images)
}

/// In-memory state for one folder-annotation pass: the scanned image list,
/// the cursor, and the filename-keyed annotation map. Built when a folder is
/// opened and replaced wholesale when another one is.
///
/// The map is a `BTreeMap` so export order is fixed (sorted by filename) and
/// a re-export of unchanged state is byte-identical.
pub struct Session {
    images: Vec<ImageEntry>,
    current_index: usize,
    annotations: BTreeMap<String, AnnotationRecord>,
    classes: Vec<String>,
    output_path: PathBuf,
}

impl Session {
    /// Scan `folder` and start a session over it. Fails when the folder is
    /// unreadable or holds no images; the caller reports that and keeps the
    /// previous session, if any.
    ///
    /// With `resume_from_existing` set, annotations already present in the
    /// output CSV are loaded back in, so reopening a folder continues where
    /// the last run stopped. Records for images outside this folder survive
    /// the round-trip untouched.
    pub fn open(folder: &Path, config: &AppConfig) -> Result<Self, String> {
        let images = scan_image_folder(folder)?;
        let output_path = config.output_path();

        let mut annotations = BTreeMap::new();
        if config.resume_from_existing && output_path.exists() {
            match export::read_annotations(&output_path) {
                Ok(previous) => annotations = previous,
                Err(e) => eprintln!(
                    "Could not resume from '{}': {}. Starting empty.",
                    output_path.display(),
                    e
                ),
            }
        }

        Ok(Self {
            images,
            current_index: 0,
            annotations,
            classes: config.classes.clone(),
            output_path,
        })
    }

    pub fn len(&self) -> usize {
        self.images.len()
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    /// The image under the cursor. The image list is never empty, and the
    /// cursor is clamped to it, so this always resolves.
    pub fn current(&self) -> &ImageEntry {
        &self.images[self.current_index]
    }

    pub fn classes(&self) -> &[String] {
        &self.classes
    }

    pub fn output_path(&self) -> &Path {
        &self.output_path
    }

    /// Move the cursor to `index` if it is in range.
    pub fn seek(&mut self, index: usize) {
        if index < self.images.len() {
            self.current_index = index;
        }
    }

    /// Step forward. At the last image this is a no-op, not an error.
    pub fn advance(&mut self) {
        if self.current_index + 1 < self.images.len() {
            self.current_index += 1;
        }
    }

    /// Step backward. At the first image this is a no-op, not an error.
    pub fn retreat(&mut self) {
        if self.current_index > 0 {
            self.current_index -= 1;
        }
    }

    /// Record `class_index` for the current image, flush the CSV, and step
    /// to the next image.
    ///
    /// An out-of-range index writes nothing. A failed flush keeps the
    /// in-memory record and the cursor in place so the user can retry once
    /// the cause (typically permissions) is fixed.
    pub fn label(&mut self, class_index: usize) -> Result<(), LabelError> {
        let Some(class_name) = self.classes.get(class_index) else {
            return Err(LabelError::InvalidClass(class_index));
        };

        let filename = self.current().filename.clone();
        self.annotations.insert(
            filename,
            AnnotationRecord {
                class_index,
                class_name: class_name.clone(),
            },
        );

        self.export().map_err(LabelError::ExportFailed)?;
        self.advance();
        Ok(())
    }

    /// Write the full annotation map to the configured CSV path.
    pub fn export(&self) -> Result<(), String> {
        export::write_annotations(&self.output_path, &self.annotations)
    }

    /// The recorded class of the current image, if any.
    pub fn current_annotation(&self) -> Option<&AnnotationRecord> {
        self.annotations.get(&self.current().filename)
    }

    pub fn annotated_count(&self) -> usize {
        self.annotations.len()
    }

    /// Number of annotated images per configured class. Records outside the
    /// current class range (from a resumed file with a different config) are
    /// not counted.
    pub fn class_counts(&self) -> Vec<usize> {
        let mut counts = vec![0; self.classes.len()];
        for record in self.annotations.values() {
            if let Some(slot) = counts.get_mut(record.class_index) {
                *slot += 1;
            }
        }
        counts
    }
}
