//! Relative import target resolution
//!
//! Maps a relative import specifier, as written in a source file, to the
//! file on disk it refers to. Only relative specifiers are handled;
//! package-style imports are outside the bundle and never resolved.

use std::path::{Component, Path, PathBuf};

use crate::discovery::SOURCE_EXTENSION;

/// Extension emitted by the TypeScript compiler; imports may reference it
/// even though the source on disk is `.ts`
const COMPILED_EXTENSION: &str = "js";
/// Index file probed when a specifier names a directory
const INDEX_FILE: &str = "index.ts";

/// Lexically normalize a path, folding `.` and `..` components without
/// touching the file system.
fn normalize_lexically(path: &Path) -> PathBuf {
    let mut normalized = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                if !normalized.pop() {
                    normalized.push(component.as_os_str());
                }
            }
            other => normalized.push(other.as_os_str()),
        }
    }
    normalized
}

/// Probe `<base>.ts`, then `<base>/index.ts`
fn probe_target(base: &Path) -> Option<PathBuf> {
    let mut ts_path = base.as_os_str().to_owned();
    ts_path.push(SOURCE_EXTENSION);
    let ts_path = PathBuf::from(ts_path);
    if ts_path.is_file() {
        return Some(ts_path);
    }
    if base.is_dir() {
        let index_path = base.join(INDEX_FILE);
        if index_path.is_file() {
            return Some(index_path);
        }
    }
    None
}

/// Resolve a relative import specifier against the importing file.
///
/// The specifier's extension (if any) is stripped and the resulting base is
/// probed as `<base>.ts`, then as a directory containing `index.ts`. A
/// specifier written with the compiled `.js` extension gets the same two
/// probes retried. Unresolvable relative specifiers are logged and yield
/// `None`.
pub fn resolve_relative_import(source_abs_path: &Path, specifier: &str) -> Option<PathBuf> {
    let source_dir = source_abs_path.parent()?;
    let normalized_spec = specifier.replace('\\', "/");
    let spec_path = Path::new(&normalized_spec);

    let extension = spec_path
        .extension()
        .map(|ext| ext.to_string_lossy().to_lowercase());
    let base = spec_path.with_extension("");
    let base_abs = normalize_lexically(&source_dir.join(base));

    if let Some(target) = probe_target(&base_abs) {
        return Some(target);
    }
    // Imports written against compiled output get a second chance at the
    // same probes.
    if extension.as_deref() == Some(COMPILED_EXTENSION) {
        if let Some(target) = probe_target(&base_abs) {
            return Some(target);
        }
    }

    if specifier.starts_with('.') {
        log::warn!(
            "Cannot resolve relative import '{}' from '{}'",
            specifier,
            source_abs_path
                .file_name()
                .map_or_else(|| source_abs_path.display().to_string(), |name| name
                    .to_string_lossy()
                    .into_owned())
        );
    }
    None
}
