//! CSV ledger format: header `image,class_index,class_name`, one row per
//! annotated image, rows sorted by filename. The whole file is rewritten on
//! every flush, so the on-disk state always matches the in-memory map.

use crate::config::MAX_CLASSES;
use crate::state::AnnotationRecord;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

const HEADER: [&str; 3] = ["image", "class_index", "class_name"];

#[derive(Debug, Deserialize)]
struct CsvRow {
    // The tool this one replaces wrote "filename"; accept both spellings.
    #[serde(alias = "filename")]
    image: String,
    class_index: usize,
    class_name: String,
}

/// Write the full annotation map to `path`, creating parent directories as
/// needed. The map iterates in filename order, so re-exporting unchanged
/// state reproduces the file byte for byte.
pub fn write_annotations(
    path: &Path,
    annotations: &BTreeMap<String, AnnotationRecord>,
) -> Result<(), String> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .map_err(|e| format!("Output dir create {}: {e}", parent.display()))?;
        }
    }

    let mut writer = csv::Writer::from_path(path)
        .map_err(|e| format!("Open {}: {e}", path.display()))?;
    writer
        .write_record(HEADER)
        .map_err(|e| format!("Write header: {e}"))?;

    for (image, record) in annotations {
        let class_index = record.class_index.to_string();
        writer
            .write_record([image.as_str(), class_index.as_str(), record.class_name.as_str()])
            .map_err(|e| format!("Write row for {image}: {e}"))?;
    }

    writer
        .flush()
        .map_err(|e| format!("Flush {}: {e}", path.display()))
}

/// Read a previously written ledger back into a map. Rows that fail to parse
/// or carry a class index outside the shortcut range are skipped rather than
/// failing the whole load.
pub fn read_annotations(path: &Path) -> Result<BTreeMap<String, AnnotationRecord>, String> {
    let mut reader = csv::Reader::from_path(path)
        .map_err(|e| format!("Open {}: {e}", path.display()))?;

    let mut annotations = BTreeMap::new();
    for row in reader.deserialize::<CsvRow>() {
        let Ok(row) = row else { continue };
        if row.class_index >= MAX_CLASSES {
            continue;
        }
        annotations.insert(
            row.image,
            AnnotationRecord {
                class_index: row.class_index,
                class_name: row.class_name,
            },
        );
    }
    Ok(annotations)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(class_index: usize, class_name: &str) -> AnnotationRecord {
        AnnotationRecord {
            class_index,
            class_name: class_name.to_string(),
        }
    }

    #[test]
    fn round_trip_preserves_the_map() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.csv");

        let mut annotations = BTreeMap::new();
        annotations.insert("b.png".to_string(), record(1, "column"));
        annotations.insert("a.png".to_string(), record(0, "rosette"));

        write_annotations(&path, &annotations).unwrap();
        assert_eq!(read_annotations(&path).unwrap(), annotations);
    }

    #[test]
    fn rows_are_sorted_by_filename() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.csv");

        let mut annotations = BTreeMap::new();
        annotations.insert("z.png".to_string(), record(0, "rosette"));
        annotations.insert("a.png".to_string(), record(1, "column"));

        write_annotations(&path, &annotations).unwrap();
        let content = fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(
            lines,
            [
                "image,class_index,class_name",
                "a.png,1,column",
                "z.png,0,rosette"
            ]
        );
    }

    #[test]
    fn class_names_with_commas_are_quoted() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.csv");

        let mut annotations = BTreeMap::new();
        annotations.insert("a.png".to_string(), record(0, "needle, hollow"));

        write_annotations(&path, &annotations).unwrap();
        let content = fs::read_to_string(&path).unwrap();
        assert!(content.contains("a.png,0,\"needle, hollow\""));
        assert_eq!(read_annotations(&path).unwrap(), annotations);
    }

    #[test]
    fn legacy_filename_header_is_accepted() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("legacy.csv");
        fs::write(
            &path,
            "filename,class_index,class_name\nold.png,2,plate\n",
        )
        .unwrap();

        let annotations = read_annotations(&path).unwrap();
        assert_eq!(annotations["old.png"], record(2, "plate"));
    }

    #[test]
    fn bad_rows_are_skipped_not_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("mixed.csv");
        fs::write(
            &path,
            "image,class_index,class_name\n\
             good.png,1,column\n\
             bad.png,not-a-number,column\n\
             huge.png,12,column\n",
        )
        .unwrap();

        let annotations = read_annotations(&path).unwrap();
        assert_eq!(annotations.len(), 1);
        assert!(annotations.contains_key("good.png"));
    }

    #[test]
    fn creates_missing_parent_directories() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("deep").join("out.csv");

        write_annotations(&path, &BTreeMap::new()).unwrap();
        assert!(path.exists());
    }
}
