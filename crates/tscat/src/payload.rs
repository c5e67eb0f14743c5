//! Literal assets injected verbatim into the bundles
//!
//! Both are opaque payloads: the license/attribution banner heading every
//! bundle, and the self-contained test harness (describe/it/expect plus
//! the color matcher) that replaces the original test framework in the
//! test bundle.

/// License and attribution header emitted at the top of both bundles
pub const LICENSE_TEXT: &str = include_str!("../assets/license_header.ts");

/// Minimal test harness source, injected into the test bundle ahead of the
/// test chunks. Its `runAllTestsAndReport` entry point is invoked by the
/// trailer the assembler appends.
pub const TEST_HARNESS_CODE: &str = include_str!("../assets/test_harness.ts");

/// Name of the harness entry point the test bundle trailer invokes
pub const HARNESS_RUNNER: &str = "runAllTestsAndReport";
