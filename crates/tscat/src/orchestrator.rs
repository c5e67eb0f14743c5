//! Pipeline orchestration
//!
//! Drives the sequential bundling pipeline: discover and classify files,
//! transform the main and test groups against one shared registry, plan
//! canonical aliases, assemble and rewrite each bundle, and write the
//! outputs. Per-file failures are logged and skipped; output failures
//! propagate and abort the run.

use std::path::{Path, PathBuf};

use anyhow::Result;

use crate::{
    alias_planner::plan_aliases,
    assembler::{apply_alias_redirects, assemble_main, assemble_test},
    config::Config,
    discovery::discover_source_files,
    output::write_bundle,
    transformer::transform_source,
    types::{BundleRegistry, CodeChunk, SourceFile, normalize_rel_path},
};

/// What one bundling run produced
#[derive(Debug)]
pub enum BundleOutcome {
    /// The scan found no eligible source files; nothing was written
    NoSourceFiles,
    /// At least one bundle was written
    Bundled(BundleReport),
}

/// Summary of a completed run, for the CLI's closing output
#[derive(Debug)]
pub struct BundleReport {
    /// Path of the written main bundle, if the main group was non-empty
    pub main_output: Option<PathBuf>,
    /// Path of the written test bundle, if the test group was non-empty
    pub test_output: Option<PathBuf>,
}

/// Transform one group of files, accumulating exports and namespace-import
/// observations into the shared registry.
///
/// A file that fails to read is logged with its relative path and skipped;
/// the run continues. Files whose transformed body is empty contribute no
/// chunk but still have their exports and imports recorded.
fn process_group(files: &[SourceFile], registry: &mut BundleRegistry) -> Vec<CodeChunk> {
    log::info!("Processing {} files...", files.len());
    let mut chunks = Vec::new();
    let mut contributed = 0usize;
    for file in files {
        let rel_display = normalize_rel_path(&file.rel_path);
        let original = match std::fs::read_to_string(&file.abs_path) {
            Ok(content) => content,
            Err(err) => {
                log::warn!("Processing '{rel_display}': {err}");
                continue;
            }
        };
        let output = transform_source(&original, &file.abs_path);
        registry.record_exports(&file.abs_path, output.exports);
        registry.record_namespace_imports(&file.abs_path, output.namespace_imports);
        if !output.body.is_empty() {
            chunks.push(CodeChunk {
                rel_path: rel_display,
                body: output.body,
            });
            contributed += 1;
        }
    }
    log::info!(
        "Finished processing {} files. Added content from {} files.",
        files.len(),
        contributed
    );
    chunks
}

/// Run the whole pipeline over one input tree.
pub fn bundle(input_dir: &Path, config: &Config) -> Result<BundleOutcome> {
    let discovered = discover_source_files(input_dir, config)?;
    if discovered.is_empty() {
        return Ok(BundleOutcome::NoSourceFiles);
    }

    // One registry across both passes: test files may reference aliases
    // whose targets live in the main group.
    let mut registry = BundleRegistry::new();
    let main_chunks = process_group(&discovered.main, &mut registry);
    let test_chunks = process_group(&discovered.test, &mut registry);

    let plan = plan_aliases(&registry.namespace_imports);

    let mut report = BundleReport {
        main_output: None,
        test_output: None,
    };

    if discovered.main.is_empty() {
        log::info!("Skipping main file write (no main source files).");
    } else {
        let output_path = config.output_dir.join(config.main_output_filename());
        log::info!(
            "Assembling {}...",
            output_path
                .file_name()
                .map_or_else(String::new, |name| name.to_string_lossy().into_owned())
        );
        let assembled = assemble_main(&main_chunks, &plan, &registry.exports);
        let (rewritten, _) = apply_alias_redirects(assembled, &plan.redirects);
        write_bundle(&output_path, &rewritten)?;
        report.main_output = Some(output_path);
    }

    if discovered.test.is_empty() {
        log::info!("Skipping test file write (no test source files).");
    } else {
        let output_path = config.output_dir.join(config.test_output_filename());
        log::info!(
            "Assembling {}...",
            output_path
                .file_name()
                .map_or_else(String::new, |name| name.to_string_lossy().into_owned())
        );
        let assembled = assemble_test(&test_chunks, &plan, config);
        let (rewritten, _) = apply_alias_redirects(assembled, &plan.redirects);
        write_bundle(&output_path, &rewritten)?;
        report.test_output = Some(output_path);
    }

    Ok(BundleOutcome::Bundled(report))
}
