use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Digit shortcuts run 1-9, so more classes than that cannot be reached.
pub const MAX_CLASSES: usize = 9;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default = "default_classes")]
    pub classes: Vec<String>,
    #[serde(default = "default_display_width")]
    pub display_width: u32,
    #[serde(default = "default_display_height")]
    pub display_height: u32,
    #[serde(default = "default_output_file")]
    pub output_file: String,
    #[serde(default = "default_true")]
    pub resume_from_existing: bool,
}

// Default value functions
fn default_classes() -> Vec<String> {
    (1..=5).map(|i| format!("class {i}")).collect()
}

fn default_display_width() -> u32 {
    600
}

fn default_display_height() -> u32 {
    600
}

fn default_output_file() -> String {
    "annotations.csv".to_string()
}

fn default_true() -> bool {
    true
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            classes: default_classes(),
            display_width: default_display_width(),
            display_height: default_display_height(),
            output_file: default_output_file(),
            resume_from_existing: true,
        }
    }
}

impl AppConfig {
    /// Resolved path of the annotation CSV. Tilde-expanded; relative paths
    /// are left relative to the working directory.
    pub fn output_path(&self) -> PathBuf {
        PathBuf::from(shellexpand::tilde(&self.output_file).as_ref())
    }

    /// Clamp the class list to what the digit shortcuts can address.
    /// An empty list is unusable, so it falls back to the defaults.
    fn normalize(mut self) -> Self {
        if self.classes.is_empty() {
            eprintln!("Config has no classes; using defaults.");
            self.classes = default_classes();
        } else if self.classes.len() > MAX_CLASSES {
            eprintln!(
                "Config lists {} classes; keyboard shortcuts cover only {}. Extra classes ignored.",
                self.classes.len(),
                MAX_CLASSES
            );
            self.classes.truncate(MAX_CLASSES);
        }
        self
    }
}

/// Per-user config file location
pub fn config_path() -> Option<PathBuf> {
    directories::ProjectDirs::from("", "", "tagger")
        .map(|dirs| dirs.config_dir().join("config.json"))
}

/// Parse JSON config content. Unknown keys are ignored, missing keys get
/// their defaults.
fn parse_config(content: &str) -> Result<AppConfig, String> {
    let config: AppConfig =
        serde_json::from_str(content).map_err(|e| format!("json parse error: {e}"))?;
    Ok(config.normalize())
}

fn try_load_config_file(path: &Path) -> Result<AppConfig, String> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| format!("read error {}: {}", path.display(), e))?;
    parse_config(&content)
}

/// Load configuration, searching:
///   1) ./config.json
///   2) the per-user config directory
/// Anything missing or unparseable falls through to the built-in defaults;
/// this never aborts the application.
pub fn load_config() -> AppConfig {
    let mut search_paths = vec![PathBuf::from("./config.json")];
    if let Some(user_path) = config_path() {
        search_paths.push(user_path);
    }

    for candidate in search_paths {
        if !candidate.exists() {
            continue;
        }
        match try_load_config_file(&candidate) {
            Ok(cfg) => return cfg,
            Err(e) => eprintln!(
                "Failed to load config '{}': {}. Using defaults.",
                candidate.display(),
                e
            ),
        }
    }

    AppConfig::default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_fields_get_defaults() {
        let cfg = parse_config(r#"{"classes": ["rosette", "column"]}"#).unwrap();
        assert_eq!(cfg.classes, vec!["rosette", "column"]);
        assert_eq!(cfg.display_width, 600);
        assert_eq!(cfg.display_height, 600);
        assert_eq!(cfg.output_file, "annotations.csv");
        assert!(cfg.resume_from_existing);
    }

    #[test]
    fn empty_object_is_all_defaults() {
        let cfg = parse_config("{}").unwrap();
        assert_eq!(cfg.classes.len(), 5);
        assert_eq!(cfg.classes[0], "class 1");
    }

    #[test]
    fn garbage_is_an_error() {
        assert!(parse_config("not json at all").is_err());
        assert!(parse_config(r#"{"classes": 3}"#).is_err());
    }

    #[test]
    fn class_list_is_clamped_to_nine() {
        let names: Vec<String> = (0..12).map(|i| format!("\"c{i}\"")).collect();
        let json = format!(r#"{{"classes": [{}]}}"#, names.join(","));
        let cfg = parse_config(&json).unwrap();
        assert_eq!(cfg.classes.len(), MAX_CLASSES);
        assert_eq!(cfg.classes.last().unwrap(), "c8");
    }

    #[test]
    fn empty_class_list_falls_back_to_defaults() {
        let cfg = parse_config(r#"{"classes": []}"#).unwrap();
        assert_eq!(cfg.classes.len(), 5);
    }

    #[test]
    fn absolute_output_path_is_untouched() {
        let cfg = parse_config(r#"{"output_file": "/tmp/labels/out.csv"}"#).unwrap();
        assert_eq!(cfg.output_path(), PathBuf::from("/tmp/labels/out.csv"));
    }
}
