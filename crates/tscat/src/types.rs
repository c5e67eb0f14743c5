//! Shared type definitions for the tscat crate
//!
//! This module contains the state that flows through the bundling pipeline:
//! classified source files, the export/alias registry populated during the
//! transform pass, and the code chunks consumed by the assembler.

use std::{
    hash::BuildHasherDefault,
    path::{Path, PathBuf},
};

use indexmap::{IndexMap, IndexSet};
use rustc_hash::FxHasher;

/// Deterministic hash map preserving insertion order
pub type FxIndexMap<K, V> = IndexMap<K, V, BuildHasherDefault<FxHasher>>;
/// Deterministic hash set preserving insertion order
pub type FxIndexSet<T> = IndexSet<T, BuildHasherDefault<FxHasher>>;

/// Classification of a source file based on its filename suffix
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SourceClass {
    /// Production code, bundled into the main output
    Main,
    /// Test code, bundled into the test output
    Test,
}

impl std::fmt::Display for SourceClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SourceClass::Main => write!(f, "main"),
            SourceClass::Test => write!(f, "test"),
        }
    }
}

/// One discovered source file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFile {
    /// Absolute path on disk
    pub abs_path: PathBuf,
    /// Path relative to the scan root
    pub rel_path: PathBuf,
    /// Which bundle this file belongs to
    pub class: SourceClass,
}

/// Registry of exports and namespace imports observed across all files.
///
/// One registry is shared by the main-group and test-group transform passes:
/// a test file may reference an alias whose target lives in the main group,
/// so the alias and export bookkeeping must see both.
#[derive(Debug, Default)]
pub struct BundleRegistry {
    /// Exported symbol names per file, captured from original (untransformed)
    /// content
    pub exports: FxIndexMap<PathBuf, FxIndexSet<String>>,
    /// Namespace-import observations: importing file -> (alias -> resolved
    /// target file)
    pub namespace_imports: FxIndexMap<PathBuf, FxIndexMap<String, PathBuf>>,
}

impl BundleRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record exported symbols for a file. No entry is created for an empty
    /// set, matching the "only files with exports appear in the map" shape
    /// the assembler relies on.
    pub fn record_exports<I>(&mut self, file: &Path, names: I)
    where
        I: IntoIterator<Item = String>,
    {
        let mut iter = names.into_iter().peekable();
        if iter.peek().is_some() {
            self.exports
                .entry(file.to_path_buf())
                .or_default()
                .extend(iter);
        }
    }

    /// Record the resolved namespace imports observed in one file
    pub fn record_namespace_imports(
        &mut self,
        file: &Path,
        imports: FxIndexMap<String, PathBuf>,
    ) {
        if !imports.is_empty() {
            self.namespace_imports.insert(file.to_path_buf(), imports);
        }
    }
}

/// Transformed body of one file, ready for concatenation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeChunk {
    /// Forward-slash-normalized path relative to the scan root
    pub rel_path: String,
    /// Transformed, trimmed source text
    pub body: String,
}

impl CodeChunk {
    /// Render the chunk wrapped in its begin/end origin markers
    pub fn render(&self) -> String {
        format!(
            "\n\n// --- BEGIN FILE: {path} ---\n{body}\n// --- END FILE: {path} ---\n",
            path = self.rel_path,
            body = self.body
        )
    }
}

/// Normalize a relative path to forward slashes for marker comments
pub fn normalize_rel_path(path: &Path) -> String {
    path.components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}
