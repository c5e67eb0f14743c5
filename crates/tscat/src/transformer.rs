//! Per-file source transformation
//!
//! Rewrites one file's content so it can live in a single concatenated
//! scope: license blocks and import statements are stripped, namespace
//! imports are recorded for the alias planner, exported symbol names are
//! captured, and export syntax is erased while the declarations themselves
//! are kept.
//!
//! Everything here is text-pattern matching, not parsing. A pattern can
//! mis-match constructs inside string or comment literals; that fragility
//! is a known property of the pipeline and is kept as-is.

use std::{
    path::{Path, PathBuf},
    sync::LazyLock,
};

use regex::Regex;

use crate::{
    resolver::resolve_relative_import,
    types::{FxIndexMap, FxIndexSet},
};

/// License/doc blocks flagged with the `@license` marker. Stripped first:
/// such blocks can contain incidental text resembling import/export syntax.
static LICENSE_BLOCK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)/\*\*.*?@license.*?\*/").expect("valid regex"));

/// `import * as ALIAS from './relative/path';`
static IMPORT_NAMESPACE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?m)^\s*import\s+\*\s+as\s+([a-zA-Z0-9_]+)\s+from\s+['"](\.\.?/[^'"]+)['"];?"#)
        .expect("valid regex")
});

/// Any other relative import: named, default, or bare specifier
static IMPORT_RELATIVE_OTHER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?m)^\s*import\s+(?:(?:\{[^}]+\}|\w+|)\s+from\s+)?['"](\.\.?/[^'"]+)['"];?\s*$"#)
        .expect("valid regex")
});

/// Relative side-effect import with no bound identifier
static IMPORT_RELATIVE_SIDE_EFFECT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?m)^\s*import\s+['"](\.\.?/[^'"]+)['"];?\s*$"#).expect("valid regex")
});

/// Package-style side-effect import; references an external dependency the
/// bundle cannot resolve, dropped silently
static IMPORT_NON_RELATIVE_SIDE_EFFECT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?m)^\s*import\s+['"]([^./][^'"]*?)['"];?\s*"#).expect("valid regex")
});

/// `export { ... } from '...'` / `export * from '...'` re-export statements
static EXPORT_FROM: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?m)^\s*export\s+(?:\{[^}]+?\}|\*)\s+from\s+['"](\.\.?/[^'"]+)['"];?\s*"#)
        .expect("valid regex")
});

/// Bare `export { a, b };` list statements
static EXPORT_LIST: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)^\s*export\s+\{\s*[^}]+?\s*\};?\s*").expect("valid regex")
});

/// `export` keyword prefixing a declaration; the declaration is kept
static EXPORT_DECL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?m)^(\s*)export\s+(declare\s+)?(async\s+)?(class|function|const|let|var|enum|interface|type)(\s+|;|$)",
    )
    .expect("valid regex")
});

/// `export default` prefix, replaced with an inert marker comment
static EXPORT_DEFAULT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^(\s*)export\s+default\s+").expect("valid regex"));

/// Capture: `export [declare] [async] class|function|const|let|var|enum NAME`
static EXPORT_NAMED_CAPTURE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?m)^\s*export\s+(?:declare\s+)?(?:async\s+)?(?:class|function|const|let|var|enum)\s+([a-zA-Z0-9_]+)",
    )
    .expect("valid regex")
});

/// Capture: `export default class|function NAME` or `export default const|let|var NAME`
static EXPORT_DEFAULT_CAPTURE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?m)^\s*export\s+default\s+(?:(?:class|function)\s+([a-zA-Z0-9_]+)|(?:const|let|var)\s+([a-zA-Z0-9_]+))",
    )
    .expect("valid regex")
});

/// Capture: brace-list export clause, with an optional trailing `from`
/// marking it as a re-export
static EXPORT_LIST_CAPTURE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)^\s*export\s*\{\s*([^}]+?)\s*\}\s*(from\b)?").expect("valid regex")
});

/// One item inside a brace list: `local` or `local as external`
static EXPORT_LIST_ITEM: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b([a-zA-Z0-9_]+)(?:\s+as\s+([a-zA-Z0-9_]+))?\b").expect("valid regex")
});

/// Standalone `jasmine.addMatchers(...)` registration calls, including
/// multi-line argument lists
static ADD_MATCHERS_CALL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)^\s*jasmine\.addMatchers\s*\([\s\S]*?\);?\s*$").expect("valid regex")
});

/// Result of transforming one file
#[derive(Debug, Default)]
pub struct TransformOutput {
    /// Transformed, trimmed body. Empty when the file contributes no code
    /// to the bundle.
    pub body: String,
    /// Symbol names this file exports, captured from the original content
    pub exports: FxIndexSet<String>,
    /// Namespace-import aliases observed in this file, with their resolved
    /// targets. Unresolvable imports are dropped (after a warning from the
    /// resolver) and do not appear here.
    pub namespace_imports: FxIndexMap<String, PathBuf>,
}

/// Capture exported symbol names from the original (untransformed) content.
///
/// Capture always reads pre-transformation text so that stripping export
/// syntax never hides a symbol.
fn capture_exports(original: &str) -> FxIndexSet<String> {
    let mut exports = FxIndexSet::default();
    for captures in EXPORT_NAMED_CAPTURE.captures_iter(original) {
        exports.insert(captures[1].to_string());
    }
    for captures in EXPORT_DEFAULT_CAPTURE.captures_iter(original) {
        if let Some(name) = captures.get(1).or_else(|| captures.get(2)) {
            exports.insert(name.as_str().to_string());
        }
    }
    for captures in EXPORT_LIST_CAPTURE.captures_iter(original) {
        // A trailing `from` marks a re-export: it forwards names without
        // declaring them locally, so nothing is capturable.
        if captures.get(2).is_some() {
            continue;
        }
        for item in EXPORT_LIST_ITEM.captures_iter(&captures[1]) {
            let external = item.get(2).or_else(|| item.get(1));
            if let Some(name) = external {
                exports.insert(name.as_str().to_string());
            }
        }
    }
    exports
}

/// Run the full transformation pipeline over one file's content.
///
/// Stage order matters: the license strip runs before import extraction,
/// and export capture reads the original content before export syntax is
/// erased.
pub fn transform_source(original: &str, abs_path: &Path) -> TransformOutput {
    let mut output = TransformOutput::default();

    let content = LICENSE_BLOCK.replace_all(original, "");

    for captures in IMPORT_NAMESPACE.captures_iter(&content) {
        let alias = captures[1].to_string();
        let specifier = &captures[2];
        if let Some(target) = resolve_relative_import(abs_path, specifier) {
            output.namespace_imports.insert(alias, target);
        }
    }
    let content = IMPORT_NAMESPACE.replace_all(&content, "");
    let content = IMPORT_RELATIVE_OTHER.replace_all(&content, "");
    let content = IMPORT_RELATIVE_SIDE_EFFECT.replace_all(&content, "");
    let content = IMPORT_NON_RELATIVE_SIDE_EFFECT.replace_all(&content, "");
    let content = ADD_MATCHERS_CALL.replace_all(&content, "");

    output.exports = capture_exports(original);

    let content = EXPORT_DECL.replace_all(&content, "$1$2$3$4$5");
    let content = EXPORT_DEFAULT.replace_all(&content, "$1/* export default */ ");
    let content = EXPORT_FROM.replace_all(&content, "");
    let content = EXPORT_LIST.replace_all(&content, "");

    output.body = content.trim().to_string();
    output
}
