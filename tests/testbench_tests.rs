//! Integration tests for the test bench compile/clean lifecycle.

#![cfg(unix)]

#[path = "support/mod.rs"]
mod support;

use ghdl_bench::bench::{DirListing, Stage, Testbench};
use ghdl_bench::common::{BenchError, ToolStage};
use std::fs;
use support::{canonical, demo_copy, demo_source, FakeGhdl};

/// Tests that compile analyzes components before the test bench, then elaborates.
#[test]
fn test_compile_invocation_order() {
    let work = demo_copy("full-adder");
    let ghdl = FakeGhdl::new();
    let mut tb = Testbench::new(work.path(), ["adder"], "adder_tb", "vhd");

    tb.compile(&ghdl.simulator()).unwrap();

    let calls = ghdl.invocations();
    assert_eq!(calls.len(), 2);
    assert_eq!(calls[0].args, ["-a", "adder.vhd", "adder_tb.vhd"]);
    assert_eq!(calls[1].args, ["-e", "adder_tb"]);
    for call in &calls {
        assert_eq!(call.cwd, canonical(work.path()));
    }
    assert_eq!(tb.stage(), Stage::Compiled);
}

/// Tests that compiling produces the expected artifacts next to the sources.
#[test]
fn test_compile_produces_artifacts() {
    let work = demo_copy("full-adder");
    let ghdl = FakeGhdl::new();
    let mut tb = Testbench::new(work.path(), ["adder"], "adder_tb", "vhd");

    tb.compile(&ghdl.simulator()).unwrap();

    let listing = DirListing::capture(work.path()).unwrap();
    assert!(listing.contains_all(&[
        "adder.o",
        "adder.vhd",
        "adder_tb",
        "adder_tb.o",
        "adder_tb.vhd",
        "e~adder_tb.o",
    ]));
    assert!(listing.contains_all(&tb.expected_artifacts()));
}

/// Tests that clean after compile restores the original directory listing.
#[test]
fn test_clean_restores_listing() {
    let work = demo_copy("nand-xor");
    let ghdl = FakeGhdl::new();
    let before = DirListing::capture(work.path()).unwrap();

    let mut tb = Testbench::new(work.path(), ["g_nand"], "xor_tb", "vhd");
    tb.compile(&ghdl.simulator()).unwrap();
    assert_ne!(DirListing::capture(work.path()).unwrap(), before);

    tb.clean().unwrap();
    assert_eq!(DirListing::capture(work.path()).unwrap(), before);
    assert_eq!(tb.stage(), Stage::Cleaned);
    // g_nand.o, xor_tb.o, e~xor_tb.o, work-obj93.cf, xor_tb
    assert_eq!(tb.stats().files_removed, 5);
}

/// Tests that clean leaves subdirectories and unrelated files alone.
#[test]
fn test_clean_is_not_recursive() {
    let work = demo_copy("full-adder");
    fs::create_dir(work.path().join("build")).unwrap();
    fs::write(work.path().join("build").join("keep.o"), b"").unwrap();
    fs::write(work.path().join("notes.txt"), b"").unwrap();

    let ghdl = FakeGhdl::new();
    let mut tb = Testbench::new(work.path(), ["adder"], "adder_tb", "vhd");
    tb.compile(&ghdl.simulator()).unwrap();
    tb.clean().unwrap();

    assert!(work.path().join("build").join("keep.o").exists());
    assert!(work.path().join("notes.txt").exists());
    assert!(work.path().join("adder.vhd").exists());
}

/// Tests that a generated test bench is on disk with exact content when analyzed.
#[test]
fn test_generated_source_written_before_analysis() {
    let work = demo_copy("nand-xor-generated");
    let design = demo_source("nand-xor", "xor_tb.vhd");
    let ghdl = FakeGhdl::new();
    let before = DirListing::capture(work.path()).unwrap();
    assert!(!before.contains("xor_tb.vhd"));

    let mut tb = Testbench::generated(work.path(), ["g_nand"], "xor_tb", "vhd", design.clone());
    assert!(tb.is_generated());
    tb.compile(&ghdl.simulator()).unwrap();

    assert_eq!(ghdl.analyzed("xor_tb.vhd").as_deref(), Some(design.as_str()));
    assert_eq!(fs::read_to_string(work.path().join("xor_tb.vhd")).unwrap(), design);
    assert_eq!(tb.stats().sources_written, 1);

    tb.clean().unwrap();
    assert!(!work.path().join("xor_tb.vhd").exists());
    assert_eq!(DirListing::capture(work.path()).unwrap(), before);
}

/// Tests that a generated test bench overwrites a file already at its path.
#[test]
fn test_generated_source_overwrites_existing() {
    let work = demo_copy("nand-xor-generated");
    fs::write(work.path().join("xor_tb.vhd"), "-- stale\n").unwrap();

    let design = demo_source("nand-xor", "xor_tb.vhd");
    let ghdl = FakeGhdl::new();
    let mut tb = Testbench::generated(work.path(), ["g_nand"], "xor_tb", "vhd", design.clone());
    tb.compile(&ghdl.simulator()).unwrap();

    assert_eq!(ghdl.analyzed("xor_tb.vhd").unwrap(), design);
}

/// Tests that an analyze failure is returned and elaboration never runs.
#[test]
fn test_analyze_failure_stops_compile() {
    let work = demo_copy("full-adder");
    let ghdl = FakeGhdl::failing_on("-a", "adder.vhd:3:8: syntax error");
    let mut tb = Testbench::new(work.path(), ["adder"], "adder_tb", "vhd");

    let err = tb.compile(&ghdl.simulator()).unwrap_err();
    match err {
        BenchError::ToolFailed { stage, code, stderr } => {
            assert_eq!(stage, ToolStage::Analyze);
            assert_eq!(code, Some(1));
            assert!(stderr.contains("syntax error"));
        }
        other => panic!("unexpected error: {other}"),
    }
    assert_eq!(ghdl.invocations().len(), 1);
    assert_eq!(tb.stage(), Stage::Uninitialized);
}

/// Tests that an elaboration failure is surfaced with its stage.
#[test]
fn test_elaborate_failure_is_reported() {
    let work = demo_copy("full-adder");
    let ghdl = FakeGhdl::failing_on("-e", "cannot elaborate");
    let mut tb = Testbench::new(work.path(), ["adder"], "adder_tb", "vhd");

    let err = tb.compile(&ghdl.simulator()).unwrap_err();
    assert!(matches!(
        err,
        BenchError::ToolFailed { stage: ToolStage::Elaborate, .. }
    ));
    assert_eq!(ghdl.invocations().len(), 2);
}

/// Tests that a missing component source fails the analyze step.
#[test]
fn test_missing_component_fails() {
    let work = demo_copy("full-adder");
    let ghdl = FakeGhdl::new();
    let mut tb = Testbench::new(work.path(), ["adder", "carry_lookahead"], "adder_tb", "vhd");

    let err = tb.compile(&ghdl.simulator()).unwrap_err();
    assert!(err.to_string().contains("carry_lookahead.vhd"));
}

/// Tests that clean without a prior compile fails on the absent executable.
#[test]
fn test_clean_without_compile_fails() {
    let work = demo_copy("full-adder");
    let before = DirListing::capture(work.path()).unwrap();
    let mut tb = Testbench::new(work.path(), ["adder"], "adder_tb", "vhd");

    assert!(matches!(tb.clean(), Err(BenchError::Io(_))));
    assert_eq!(DirListing::capture(work.path()).unwrap(), before);
}

/// Tests that compiling twice without cleaning still succeeds.
#[test]
fn test_recompile_without_clean() {
    let work = demo_copy("full-adder");
    let ghdl = FakeGhdl::new();
    let sim = ghdl.simulator();
    let mut tb = Testbench::new(work.path(), ["adder"], "adder_tb", "vhd");

    tb.compile(&sim).unwrap();
    tb.compile(&sim).unwrap();
    assert_eq!(tb.stats().analyze_invocations, 2);
    assert_eq!(tb.stats().elaborate_invocations, 2);

    tb.clean().unwrap();
    assert!(!work.path().join("adder_tb").exists());
}

/// Tests that the standard revision is passed to every stage.
#[test]
fn test_std_option_forwarded() {
    let work = demo_copy("full-adder");
    let ghdl = FakeGhdl::new();
    let sim = ghdl.simulator().with_std("08");
    let mut tb = Testbench::new(work.path(), ["adder"], "adder_tb", "vhd");

    tb.compile(&sim).unwrap();

    let calls = ghdl.invocations();
    assert_eq!(calls[0].args, ["-a", "--std=08", "adder.vhd", "adder_tb.vhd"]);
    assert_eq!(calls[1].args, ["-e", "--std=08", "adder_tb"]);
}
