#![allow(clippy::disallowed_methods)]

use std::{fs, path::Path};

use pretty_assertions::assert_eq;
use tempfile::TempDir;
use tscat::{
    config::Config,
    orchestrator::{BundleOutcome, bundle},
};

fn write_file(root: &Path, rel: &str, content: &str) {
    let path = root.join(rel);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, content).unwrap();
}

fn config_writing_to(out: &TempDir) -> Config {
    Config {
        output_dir: out.path().to_path_buf(),
        ..Config::default()
    }
}

fn run(src: &TempDir, out: &TempDir) -> BundleOutcome {
    bundle(src.path(), &config_writing_to(out)).unwrap()
}

fn read_main(out: &TempDir) -> String {
    fs::read_to_string(out.path().join("cats.ts")).unwrap()
}

fn read_test(out: &TempDir) -> String {
    fs::read_to_string(out.path().join("cats_test.ts")).unwrap()
}

#[test]
fn scenario_single_alias_is_already_canonical() {
    let src = TempDir::new().unwrap();
    let out = TempDir::new().unwrap();
    write_file(src.path(), "a.ts", "export function foo() { return 1; }\n");
    write_file(
        src.path(),
        "b.ts",
        "import * as A from './a';\nconst v = A.foo();\n",
    );

    run(&src, &out);
    let main = read_main(&out);
    assert!(main.contains("export const A = { foo };"));
    assert!(main.contains("const v = A.foo();"));
    // The import statement itself is gone
    assert!(!main.contains("import * as A"));
}

#[test]
fn scenario_shorter_alias_becomes_canonical() {
    let src = TempDir::new().unwrap();
    let out = TempDir::new().unwrap();
    write_file(src.path(), "math.ts", "export function clamp() { return 0; }\n");
    write_file(
        src.path(),
        "color.ts",
        "import * as longerAlias from './math';\nconst a = longerAlias.clamp();\n",
    );
    write_file(
        src.path(),
        "scheme.ts",
        "import * as short from './math';\nconst b = short.clamp();\n",
    );

    run(&src, &out);
    let main = read_main(&out);
    assert!(main.contains("export const short = { clamp };"));
    assert!(!main.contains("longerAlias."));
    assert_eq!(main.matches("export const ").count(), 1);
    // Both call sites now reference the canonical alias
    assert!(main.contains("const a = short.clamp();"));
    assert!(main.contains("const b = short.clamp();"));
}

#[test]
fn scenario_empty_tree_produces_no_outputs() {
    let src = TempDir::new().unwrap();
    let out = TempDir::new().unwrap();
    fs::create_dir_all(src.path().join("docs")).unwrap();
    write_file(src.path(), "docs/readme.md", "# not a source file\n");

    let outcome = run(&src, &out);
    assert!(matches!(outcome, BundleOutcome::NoSourceFiles));
    assert!(!out.path().join("cats.ts").exists());
    assert!(!out.path().join("cats_test.ts").exists());
}

#[test]
fn output_is_byte_reproducible() {
    let src = TempDir::new().unwrap();
    write_file(src.path(), "math.ts", "export const RATIO = 1.5;\n");
    write_file(
        src.path(),
        "hct/color.ts",
        "import * as math from '../math';\nexport function tone() { return math.RATIO; }\n",
    );
    write_file(
        src.path(),
        "hct/color_test.ts",
        "import * as math from '../math';\nit('ratio', () => expect(math.RATIO).toBe(1.5));\n",
    );

    let out1 = TempDir::new().unwrap();
    let out2 = TempDir::new().unwrap();
    run(&src, &out1);
    run(&src, &out2);
    assert_eq!(read_main(&out1), read_main(&out2));
    assert_eq!(read_test(&out1), read_test(&out2));
}

#[test]
fn excluded_directories_never_reach_a_bundle() {
    let src = TempDir::new().unwrap();
    let out = TempDir::new().unwrap();
    write_file(src.path(), "keep.ts", "export const kept = 1;\n");
    write_file(
        src.path(),
        "node_modules/dep/index.ts",
        "export const fromDependencyCache = 1;\n",
    );
    write_file(src.path(), "dist/out.ts", "export const fromDist = 1;\n");
    write_file(src.path(), "build/gen.ts", "export const fromBuild = 1;\n");
    write_file(src.path(), ".cache/tmp.ts", "export const fromDotDir = 1;\n");

    run(&src, &out);
    let main = read_main(&out);
    assert!(main.contains("const kept = 1;"));
    for leaked in [
        "fromDependencyCache",
        "fromDist",
        "fromBuild",
        "fromDotDir",
    ] {
        assert!(!main.contains(leaked), "{leaked} leaked into the bundle");
    }
}

#[test]
fn test_suffix_selects_the_test_bundle_only() {
    let src = TempDir::new().unwrap();
    let out = TempDir::new().unwrap();
    write_file(src.path(), "color.ts", "export function argb() { return 0; }\n");
    write_file(
        src.path(),
        "color_test.ts",
        "it('argb', () => expect(argb()).toBe(0));\n",
    );

    run(&src, &out);
    let main = read_main(&out);
    let test = read_test(&out);
    assert!(main.contains("// --- BEGIN FILE: color.ts ---"));
    assert!(!main.contains("BEGIN FILE: color_test.ts"));
    assert!(test.contains("// --- BEGIN FILE: color_test.ts ---"));
    assert!(!test.contains("BEGIN FILE: color.ts ---"));
}

#[test]
fn test_bundle_carries_import_harness_and_trailer() {
    let src = TempDir::new().unwrap();
    let out = TempDir::new().unwrap();
    write_file(src.path(), "math.ts", "export function lerp() { return 0; }\n");
    write_file(
        src.path(),
        "math_test.ts",
        "import * as math from './math';\nit('lerp', () => expect(math.lerp()).toBe(0));\n",
    );

    run(&src, &out);
    let test = read_test(&out);
    let import_pos = test.find("import { math } from './cats.js';").unwrap();
    let harness_pos = test.find("Minimal Test Harness Emulation").unwrap();
    let chunk_pos = test.find("// --- BEGIN FILE: math_test.ts ---").unwrap();
    let trailer_pos = test.find("runAllTestsAndReport();").unwrap();
    assert!(import_pos < harness_pos);
    assert!(harness_pos < chunk_pos);
    assert!(chunk_pos < trailer_pos);
}

#[test]
fn alias_from_test_group_unifies_with_main_group() {
    // The registry is shared across passes: a test file's alias for a main
    // target participates in canonicalization, and the rewrite applies to
    // the test bundle too.
    let src = TempDir::new().unwrap();
    let out = TempDir::new().unwrap();
    write_file(src.path(), "math.ts", "export function clamp() { return 0; }\n");
    write_file(
        src.path(),
        "color.ts",
        "import * as m from './math';\nconst c = m.clamp();\n",
    );
    write_file(
        src.path(),
        "color_test.ts",
        "import * as mathUtils from './math';\nit('clamp', () => expect(mathUtils.clamp()).toBe(0));\n",
    );

    run(&src, &out);
    let main = read_main(&out);
    let test = read_test(&out);
    assert!(main.contains("export const m = { clamp };"));
    assert!(test.contains("import { m } from './cats.js';"));
    assert!(test.contains("expect(m.clamp()).toBe(0)"));
    assert!(!test.contains("mathUtils."));
}

#[test]
fn chunks_are_ordered_by_relative_path() {
    let src = TempDir::new().unwrap();
    let out = TempDir::new().unwrap();
    write_file(src.path(), "zz.ts", "const z = 1;\n");
    write_file(src.path(), "aa.ts", "const a = 1;\n");
    write_file(src.path(), "mid/bb.ts", "const b = 1;\n");

    run(&src, &out);
    let main = read_main(&out);
    let aa = main.find("BEGIN FILE: aa.ts").unwrap();
    let bb = main.find("BEGIN FILE: mid/bb.ts").unwrap();
    let zz = main.find("BEGIN FILE: zz.ts").unwrap();
    assert!(aa < bb);
    assert!(bb < zz);
}

#[test]
fn exports_survive_even_when_body_is_emptied() {
    // A file consisting only of export syntax contributes no chunk, but its
    // captured exports still back the alias object.
    let src = TempDir::new().unwrap();
    let out = TempDir::new().unwrap();
    write_file(src.path(), "flags.ts", "export { DEBUG };\n");
    write_file(
        src.path(),
        "user.ts",
        "import * as flags from './flags';\nconst on = flags.DEBUG;\n",
    );

    run(&src, &out);
    let main = read_main(&out);
    assert!(main.contains("export const flags = { DEBUG };"));
    assert!(!main.contains("BEGIN FILE: flags.ts"));
}

#[test]
fn unreadable_file_is_skipped_and_run_continues() {
    let src = TempDir::new().unwrap();
    let out = TempDir::new().unwrap();
    write_file(src.path(), "good.ts", "export const ok = 1;\n");
    // Invalid UTF-8 makes the read fail; the file is skipped
    fs::write(src.path().join("bad.ts"), [0xff, 0xfe, 0x00, 0x41]).unwrap();

    run(&src, &out);
    let main = read_main(&out);
    assert!(main.contains("const ok = 1;"));
    assert!(!main.contains("BEGIN FILE: bad.ts"));
}

#[test]
fn license_banner_heads_both_bundles() {
    let src = TempDir::new().unwrap();
    let out = TempDir::new().unwrap();
    write_file(src.path(), "a.ts", "export const one = 1;\n");
    write_file(src.path(), "a_test.ts", "it('one', () => {});\n");

    run(&src, &out);
    assert!(read_main(&out).starts_with("/**\n * @license"));
    assert!(read_test(&out).starts_with("/**\n * @license"));
}
