//! Run configuration
//!
//! Defaults reproduce the bundler's historical constants; a `tscat.toml` in
//! the input root may override output basenames, the test-file suffix, and
//! the directory exclusion list.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

/// Name of the optional per-project configuration file
pub const CONFIG_FILE_NAME: &str = "tscat.toml";

#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Basename (without extension) of the main bundle
    pub main_output_basename: String,
    /// Basename (without extension) of the test bundle
    pub test_output_basename: String,
    /// Filename suffix selecting the test class, compared case-insensitively
    pub test_file_suffix: String,
    /// Directory names pruned from traversal entirely. Dot-prefixed
    /// directories are always pruned in addition to this list.
    pub exclude_dirs: Vec<String>,
    /// Directory the bundles are written into
    pub output_dir: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            main_output_basename: "cats".to_string(),
            test_output_basename: "cats_test".to_string(),
            test_file_suffix: "_test.ts".to_string(),
            exclude_dirs: vec![
                "node_modules".to_string(),
                "dist".to_string(),
                "build".to_string(),
            ],
            output_dir: PathBuf::from("."),
        }
    }
}

impl Config {
    /// Load configuration for a scan root: `tscat.toml` inside the root if
    /// present, defaults otherwise.
    pub fn load_for_root(root: &Path) -> Result<Self> {
        let candidate = root.join(CONFIG_FILE_NAME);
        if !candidate.is_file() {
            return Ok(Self::default());
        }
        let raw = std::fs::read_to_string(&candidate)
            .with_context(|| format!("failed to read config file {}", candidate.display()))?;
        let config: Self = toml::from_str(&raw)
            .with_context(|| format!("failed to parse config file {}", candidate.display()))?;
        log::debug!("Loaded configuration from {}", candidate.display());
        Ok(config)
    }

    /// Filename of the main bundle output
    pub fn main_output_filename(&self) -> String {
        format!("{}.ts", self.main_output_basename)
    }

    /// Filename of the test bundle output
    pub fn test_output_filename(&self) -> String {
        format!("{}.ts", self.test_output_basename)
    }

    /// Relative path the test bundle imports alias objects from: the main
    /// bundle's compiled artifact.
    pub fn compiled_main_import_path(&self) -> String {
        format!("./{}.js", self.main_output_basename)
    }
}
