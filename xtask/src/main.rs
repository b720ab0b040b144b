//! Development automation tasks for the Slotwise workspace.
//!
//! Run with: `cargo xtask <command>`
//!
//! This is a CLI tool for developers, so `println!` and `eprintln!` are
//! used for user-facing output rather than structured logging.

#![allow(clippy::print_stdout, clippy::print_stderr)]

use std::env;
use std::process::{Command, ExitCode};

use anyhow::{bail, Context};

/// Integration suites that race concurrent bookings.
const RACE_SUITES: &[(&str, &str)] =
    &[("slotwise-api", "concurrent_bookings"), ("slotwise-infra", "sqlite_repositories")];

fn main() -> ExitCode {
    let task = env::args().nth(1);

    let result = match task.as_deref() {
        Some("ci") => run_ci(),
        Some("fmt") => run_fmt(),
        Some("clippy") => run_clippy(),
        Some("test") => run_test(),
        Some("race") => run_race(),
        Some("bench") => run_bench(),
        Some("deny") => run_tool("deny", &["check"]),
        Some("audit") => run_tool("audit", &[]),
        Some("help") | None => {
            print_help();
            Ok(())
        }
        Some(unknown) => {
            eprintln!("Unknown task: {unknown}");
            eprintln!();
            print_help();
            Err(anyhow::anyhow!("Unknown task"))
        }
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Task failed: {e}");
            ExitCode::FAILURE
        }
    }
}

fn print_help() {
    println!("Slotwise Development Tasks");
    println!();
    println!("USAGE:");
    println!("    cargo xtask <TASK>");
    println!();
    println!("TASKS:");
    println!("    ci        Run fmt, clippy, test and race in sequence");
    println!("    fmt       Check Rust code formatting");
    println!("    clippy    Run Clippy lints");
    println!("    test      Run all tests");
    println!("    race      Re-run the booking race suites several times");
    println!("    bench     Run slot generation benchmarks");
    println!("    deny      Check dependencies with cargo-deny");
    println!("    audit     Audit dependencies for security vulnerabilities");
    println!("    help      Show this help message");
}

fn run_ci() -> anyhow::Result<()> {
    println!("==> Running CI checks...\n");

    println!("==> Step 1/4: Checking Rust format...");
    run_fmt()?;

    println!("\n==> Step 2/4: Running Clippy...");
    run_clippy()?;

    println!("\n==> Step 3/4: Running tests...");
    run_test()?;

    println!("\n==> Step 4/4: Repeating booking races...");
    run_race()?;

    println!("\n✓ All CI checks passed!");
    Ok(())
}

fn cargo(args: &[&str]) -> anyhow::Result<()> {
    let status = Command::new("cargo")
        .args(args)
        .status()
        .with_context(|| format!("failed to run cargo {}", args.join(" ")))?;

    if !status.success() {
        bail!("cargo {} failed", args.join(" "));
    }
    Ok(())
}

fn run_fmt() -> anyhow::Result<()> {
    cargo(&["fmt", "--all", "--", "--check"])
        .context("Format check failed. Run 'cargo fmt --all' to fix.")
}

fn run_clippy() -> anyhow::Result<()> {
    cargo(&["clippy", "--workspace", "--all-targets", "--", "-D", "warnings"])
}

fn run_test() -> anyhow::Result<()> {
    cargo(&["test", "--workspace"])
}

/// Races are probabilistic, so one green run proves little.
fn run_race() -> anyhow::Result<()> {
    let rounds: usize = env::var("XTASK_RACE_ROUNDS")
        .ok()
        .and_then(|value| value.parse().ok())
        .unwrap_or(5);

    for round in 1..=rounds {
        println!("Round {round}/{rounds}");
        for (package, suite) in RACE_SUITES {
            cargo(&["test", "-p", package, "--test", suite])?;
        }
    }

    println!("✓ {rounds} race rounds passed");
    Ok(())
}

fn run_bench() -> anyhow::Result<()> {
    cargo(&["bench", "-p", "slotwise-core", "--bench", "slot_generation"])
}

/// Runs an optional cargo subcommand, failing early if it is not installed.
fn run_tool(tool: &str, args: &[&str]) -> anyhow::Result<()> {
    let installed = Command::new("cargo")
        .args([tool, "--version"])
        .output()
        .is_ok_and(|output| output.status.success());

    if !installed {
        eprintln!("cargo-{tool} is not installed.");
        eprintln!("Install it with: cargo install cargo-{tool}");
        bail!("cargo-{tool} not found");
    }

    let mut full = vec![tool];
    full.extend_from_slice(args);
    cargo(&full)
}
