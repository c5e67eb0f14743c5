//! Source file discovery and classification
//!
//! Walks the input tree, pruning excluded directories before descending into
//! them, and splits eligible `.ts` files into the main and test groups by
//! filename suffix.

use std::path::Path;

use anyhow::Result;
use walkdir::WalkDir;

use crate::{
    config::Config,
    types::{SourceClass, SourceFile},
};

/// Extension of eligible source files
pub const SOURCE_EXTENSION: &str = ".ts";
/// Declaration-only files, never bundled
const DECLARATION_SUFFIX: &str = ".d.ts";

/// The classified result of one directory scan
#[derive(Debug, Default)]
pub struct DiscoveredFiles {
    /// Production files, sorted by relative path
    pub main: Vec<SourceFile>,
    /// Test files, sorted by relative path
    pub test: Vec<SourceFile>,
}

impl DiscoveredFiles {
    pub fn is_empty(&self) -> bool {
        self.main.is_empty() && self.test.is_empty()
    }
}

/// Check whether a directory entry should be descended into.
///
/// Dependency caches, build/distribution output, and dot-prefixed
/// directories are pruned here so their subtrees are never walked.
fn is_traversable_dir(name: &str, config: &Config) -> bool {
    if name.starts_with('.') {
        return false;
    }
    !config.exclude_dirs.iter().any(|excluded| excluded == name)
}

/// Classify one filename, or return `None` if the file is not bundled.
///
/// Suffix checks are case-insensitive; `.d.ts` declaration files are
/// skipped.
fn classify_filename(name: &str, config: &Config) -> Option<SourceClass> {
    let lower = name.to_lowercase();
    if !lower.ends_with(SOURCE_EXTENSION) || lower.ends_with(DECLARATION_SUFFIX) {
        return None;
    }
    if lower.ends_with(&config.test_file_suffix.to_lowercase()) {
        Some(SourceClass::Test)
    } else {
        Some(SourceClass::Main)
    }
}

/// Enumerate all eligible source files under `root`, classified and sorted.
///
/// Sorting is by relative path, so output ordering is independent of the
/// file system's enumeration order.
pub fn discover_source_files(root: &Path, config: &Config) -> Result<DiscoveredFiles> {
    log::info!("Scanning for .ts files in: {}", root.display());

    let mut discovered = DiscoveredFiles::default();
    let walker = WalkDir::new(root).into_iter().filter_entry(|entry| {
        if !entry.file_type().is_dir() || entry.depth() == 0 {
            return true;
        }
        entry
            .file_name()
            .to_str()
            .is_none_or(|name| is_traversable_dir(name, config))
    });

    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) => {
                log::warn!("Skipping unreadable entry under {}: {err}", root.display());
                continue;
            }
        };
        if !entry.file_type().is_file() {
            continue;
        }
        let Some(name) = entry.file_name().to_str() else {
            continue;
        };
        let Some(class) = classify_filename(name, config) else {
            continue;
        };
        let abs_path = entry.path().to_path_buf();
        let rel_path = abs_path
            .strip_prefix(root)
            .unwrap_or(&abs_path)
            .to_path_buf();
        let file = SourceFile {
            abs_path,
            rel_path,
            class,
        };
        match class {
            SourceClass::Main => discovered.main.push(file),
            SourceClass::Test => discovered.test.push(file),
        }
    }

    discovered.main.sort_by(|a, b| a.rel_path.cmp(&b.rel_path));
    discovered.test.sort_by(|a, b| a.rel_path.cmp(&b.rel_path));

    log::info!(
        "Found {} main files and {} test files.",
        discovered.main.len(),
        discovered.test.len()
    );
    Ok(discovered)
}
