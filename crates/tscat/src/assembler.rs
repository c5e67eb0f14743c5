//! Final bundle assembly
//!
//! Concatenates the transformed chunks behind the license banner, emits
//! the synthesized alias-object declarations (main) or the alias import
//! plus harness payload (test), and applies the global alias-redirect
//! rewrite over the complete assembled text.

use std::path::PathBuf;

use regex::Regex;

use crate::{
    alias_planner::AliasPlan,
    config::Config,
    payload::{HARNESS_RUNNER, LICENSE_TEXT, TEST_HARNESS_CODE},
    types::{CodeChunk, FxIndexMap, FxIndexSet},
};

/// Synthesized alias-object declarations for the main bundle.
///
/// Each canonical alias becomes `export const <alias> = { <members> };`
/// with the sorted set of symbols captured from the target's original
/// content. A target with no recorded exports gets no declaration; the
/// dangling reference that leaves at the call site is a known latent
/// defect of this design, not something the assembler papers over.
fn alias_object_declarations(
    plan: &AliasPlan,
    exports: &FxIndexMap<PathBuf, FxIndexSet<String>>,
) -> Vec<String> {
    let aliases = plan.sorted_canonical_aliases();
    if aliases.is_empty() {
        return Vec::new();
    }
    log::info!(
        "Generating exported const objects for {} aliases...",
        aliases.len()
    );
    let mut declarations = vec!["// --- Exported Namespace Alias Objects ---".to_string()];
    for alias in aliases {
        let target = &plan.canonical_to_target[alias];
        let mut symbols: Vec<&str> = exports
            .get(target)
            .map(|names| names.iter().map(String::as_str).collect())
            .unwrap_or_default();
        symbols.sort_unstable();
        if symbols.is_empty() {
            log::warn!("No exports found for alias '{alias}'. Skipping const export.");
            continue;
        }
        declarations.push(format!("export const {alias} = {{ {} }};", symbols.join(", ")));
    }
    declarations.push("// --- End Exported Namespace Alias Objects ---\n".to_string());
    declarations
}

/// Import statement block bringing the canonical alias objects into the
/// test bundle from the main bundle's compiled artifact
fn alias_import_lines(plan: &AliasPlan, config: &Config) -> Vec<String> {
    let aliases = plan.sorted_canonical_aliases();
    if aliases.is_empty() {
        return Vec::new();
    }
    log::info!(
        "Generating import for {} alias objects from main bundle...",
        aliases.len()
    );
    let import_stmt = format!(
        "import {{ {} }} from '{}';",
        aliases.join(", "),
        config.compiled_main_import_path()
    );
    log::debug!("Import statement: {import_stmt}");
    vec![
        "// --- Imports from Main Bundle ---".to_string(),
        "// These imports bring the alias objects (like 'math', 'utils') into scope.".to_string(),
        "// Original test code using `math.someFunction()` will now work correctly.".to_string(),
        import_stmt,
        "// --- End Imports ---\n".to_string(),
    ]
}

/// Assemble the main bundle: license, alias-object declarations, then all
/// main chunks in sorted relative-path order.
pub fn assemble_main(
    chunks: &[CodeChunk],
    plan: &AliasPlan,
    exports: &FxIndexMap<PathBuf, FxIndexSet<String>>,
) -> String {
    let mut parts = vec![LICENSE_TEXT.to_string(), "\n\n".to_string()];
    for line in alias_object_declarations(plan, exports) {
        parts.push(line);
        parts.push("\n".to_string());
    }
    parts.extend(chunks.iter().map(CodeChunk::render));
    parts.concat()
}

/// Assemble the test bundle: license, alias imports, the embedded harness
/// payload, all test chunks, and the trailing harness invocation.
pub fn assemble_test(chunks: &[CodeChunk], plan: &AliasPlan, config: &Config) -> String {
    let mut parts = vec![LICENSE_TEXT.to_string(), "\n\n".to_string()];
    for line in alias_import_lines(plan, config) {
        parts.push(line);
        parts.push("\n".to_string());
    }
    parts.push(TEST_HARNESS_CODE.to_string());
    parts.push("\n\n".to_string());
    parts.extend(chunks.iter().map(CodeChunk::render));
    parts.push(format!("\n\n// --- Autorun Tests ---\n{HARNESS_RUNNER}();\n"));
    parts.concat()
}

/// Rewrite every occurrence of `<alias>.` to `<canonical>.` across the
/// fully assembled text.
///
/// Deliberately unscoped: the substitution has no lexical awareness and
/// will rewrite a matching token anywhere, including inside the harness
/// payload or string literals. Returns the rewritten text and how many
/// distinct aliases actually produced a change.
pub fn apply_alias_redirects(
    text: String,
    redirects: &FxIndexMap<String, String>,
) -> (String, usize) {
    if redirects.is_empty() {
        return (text, 0);
    }
    log::info!(
        "Applying final alias rewrites ({} potential rules)...",
        redirects.len()
    );
    let mut content = text;
    let mut rewrites_applied = 0usize;
    for (alias, canonical) in redirects {
        if alias == canonical {
            continue;
        }
        let pattern =
            Regex::new(&format!(r"\b{}\.", regex::escape(alias))).expect("valid alias pattern");
        let rewritten = pattern.replace_all(&content, format!("{canonical}."));
        if let std::borrow::Cow::Owned(changed) = rewritten {
            rewrites_applied += 1;
            content = changed;
        }
    }
    if rewrites_applied > 0 {
        log::info!("Applied rewrites for {rewrites_applied} different aliases.");
    } else {
        log::info!("No alias rewrites were necessary.");
    }
    (content, rewrites_applied)
}
