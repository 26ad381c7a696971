//! `kdocer.toml` settings.

use anyhow::{Context, Result};
use kdocer_core::EnterSettings;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Looked up in the working directory when no `--config` is given.
pub const CONFIG_FILE: &str = "kdocer.toml";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Mirrors the editor's "smart indent on Enter" switch
    #[serde(default = "default_true")]
    pub smart_indent_on_enter: bool,
    /// File extensions treated as Kotlin sources
    #[serde(default = "default_extensions")]
    pub extensions: Vec<String>,
}

fn default_true() -> bool {
    true
}

fn default_extensions() -> Vec<String> {
    vec!["kt".to_string(), "kts".to_string()]
}

impl Default for Config {
    fn default() -> Self {
        Self {
            smart_indent_on_enter: true,
            extensions: default_extensions(),
        }
    }
}

impl Config {
    /// Load from an explicit path, else `./kdocer.toml` if present, else defaults.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        match explicit {
            Some(path) => Self::from_file(path),
            None => {
                let local = Path::new(CONFIG_FILE);
                if local.is_file() {
                    Self::from_file(local)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("failed to read config {}", path.display()))?;
        toml::from_str(&raw).with_context(|| format!("invalid config {}", path.display()))
    }

    pub fn is_kotlin(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|e| e.to_str())
            .is_some_and(|ext| self.extensions.iter().any(|k| k == ext))
    }

    pub fn enter_settings(&self) -> EnterSettings {
        EnterSettings {
            smart_indent_on_enter: self.smart_indent_on_enter,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn defaults_when_fields_missing() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn reads_file() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(b"smart_indent_on_enter = false\nextensions = [\"kt\"]\n")
            .unwrap();
        let config = Config::from_file(file.path()).unwrap();
        assert!(!config.smart_indent_on_enter);
        assert_eq!(config.extensions, ["kt"]);
        assert!(!config.enter_settings().smart_indent_on_enter);
    }

    #[test]
    fn rejects_bad_toml() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(b"smart_indent_on_enter = \"yes\"\n").unwrap();
        let err = Config::from_file(file.path()).unwrap_err();
        assert!(err.to_string().contains("invalid config"));
    }

    #[test]
    fn kotlin_extensions() {
        let config = Config::default();
        assert!(config.is_kotlin(Path::new("src/Main.kt")));
        assert!(config.is_kotlin(Path::new("build.gradle.kts")));
        assert!(!config.is_kotlin(Path::new("Main.java")));
        assert!(!config.is_kotlin(Path::new("Makefile")));
    }
}
