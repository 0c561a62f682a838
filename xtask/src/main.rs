use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::fs;
use std::io::Write;
use std::path::Path;
use std::process::Command;
use std::time::Instant;

#[derive(Parser)]
#[command(name = "xtask")]
#[command(about = "spa-atomic workspace automation", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the cell benchmarks and write a throughput report
    Bench {
        /// Run quickly (lower sample size/time)
        #[arg(long, default_value_t = false)]
        quick: bool,

        /// Generate report only (skip running benchmarks)
        #[arg(long, default_value_t = false)]
        report_only: bool,
    },
    /// Run the loom model tests
    Loom {
        /// Cap on preemptions explored per execution
        #[arg(long)]
        max_preemptions: Option<usize>,
    },
}

const BENCH: &str = "cell_benchmark";
const BASELINE: &str = "current";

/// The baseline each group's speedup column is measured against.
const REFERENCE: &[(&str, &str)] = &[
    ("fetch_add_by_ordering", "std_seq_cst"),
    ("foreign_surface", "spa_int_add"),
    ("lifecycle", "box_atomic_isize_new"),
    ("contended_fetch_add", "seq_cst"),
];

#[derive(Deserialize)]
struct Estimates {
    mean: Estimate,
}

#[derive(Deserialize)]
struct Estimate {
    point_estimate: f64,
}

#[derive(Deserialize)]
struct BenchmarkMeta {
    throughput: Option<ThroughputMeta>,
}

#[derive(Deserialize)]
#[allow(dead_code)]
enum ThroughputMeta {
    Elements(u64),
    Bytes(u64),
    BytesDecimal(u64),
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Bench { quick, report_only } => {
            if !report_only {
                run_benchmarks(quick)?;
            }
            generate_report()?;
        }
        Commands::Loom { max_preemptions } => run_loom(max_preemptions)?,
    }

    Ok(())
}

fn run_benchmarks(quick: bool) -> Result<()> {
    println!(">>> Running {BENCH}...");
    let start = Instant::now();

    let mut cmd = Command::new("cargo");
    cmd.env("CARGO_INCREMENTAL", "0");
    cmd.args(["bench", "--bench", BENCH, "--"]);
    cmd.arg("--save-baseline").arg(BASELINE);

    if quick {
        cmd.arg("--measurement-time").arg("0.1");
        cmd.arg("--noplot");
        cmd.arg("--sample-size").arg("10");
    }

    let status = cmd.status().context("Failed to run cargo bench")?;
    if !status.success() {
        anyhow::bail!("Benchmark run failed");
    }
    println!("Finished in {:.2?}", start.elapsed());
    Ok(())
}

fn run_loom(max_preemptions: Option<usize>) -> Result<()> {
    let mut cmd = Command::new("cargo");
    cmd.env("RUSTFLAGS", "--cfg loom");
    if let Some(n) = max_preemptions {
        cmd.env("LOOM_MAX_PREEMPTIONS", n.to_string());
    }
    cmd.args(["test", "--release", "--test", "loom_cells"]);

    let status = cmd.status().context("Failed to run loom tests")?;
    if !status.success() {
        anyhow::bail!("Loom model tests failed");
    }
    Ok(())
}

fn generate_report() -> Result<()> {
    println!("\n>>> Generating Report...");

    let criterion_dir = Path::new("target/criterion");
    if !criterion_dir.exists() {
        eprintln!("No criterion output found at {}", criterion_dir.display());
        return Ok(());
    }

    // group -> function -> ops/s
    let mut results: BTreeMap<String, BTreeMap<String, f64>> = BTreeMap::new();
    collect_results(criterion_dir, &mut results)?;

    let report_path = Path::new("benchmark_results/report.md");
    if let Some(parent) = report_path.parent() {
        fs::create_dir_all(parent)?;
    }
    let mut file = fs::File::create(report_path)?;

    writeln!(file, "# Atomic Cell Benchmark Report")?;

    for (group, functions) in &results {
        let reference = REFERENCE
            .iter()
            .find(|(g, _)| g == group)
            .and_then(|(_, f)| functions.get(*f))
            .copied();

        writeln!(file, "\n## {group}\n")?;
        writeln!(file, "| Function | Ops/s | vs reference |")?;
        writeln!(file, "|---|---|---|")?;
        for (function, ops) in functions {
            let rel = match reference {
                Some(r) if r > 0.0 => format!("**{:.2}x**", ops / r),
                _ => "-".to_string(),
            };
            writeln!(file, "| {function} | {} | {rel} |", format_ops(*ops))?;
        }
    }

    println!("Report written to {}", report_path.display());
    Ok(())
}

fn format_ops(ops: f64) -> String {
    if ops > 1_000_000.0 {
        format!("{:.2}M", ops / 1_000_000.0)
    } else if ops > 1_000.0 {
        format!("{:.2}K", ops / 1_000.0)
    } else {
        format!("{ops:.0}")
    }
}

/// Walks `target/criterion/<group>/<function>/<baseline>/estimates.json`.
fn collect_results(
    dir: &Path,
    results: &mut BTreeMap<String, BTreeMap<String, f64>>,
) -> Result<()> {
    for group_entry in fs::read_dir(dir)?.flatten() {
        let group_dir = group_entry.path();
        let Some(group) = dir_name(&group_dir) else { continue };
        if !group_dir.is_dir() || group == "report" {
            continue;
        }

        for function_entry in fs::read_dir(&group_dir)?.flatten() {
            let function_dir = function_entry.path();
            let Some(function) = dir_name(&function_dir) else { continue };
            if !function_dir.is_dir() || function == "report" {
                continue;
            }

            let estimates_path = function_dir.join(BASELINE).join("estimates.json");
            let Ok(content) = fs::read_to_string(&estimates_path) else { continue };
            let estimates: Estimates = serde_json::from_str(&content)
                .with_context(|| format!("Malformed {}", estimates_path.display()))?;

            let elements = fs::read_to_string(function_dir.join(BASELINE).join("benchmark.json"))
                .ok()
                .and_then(|c| serde_json::from_str::<BenchmarkMeta>(&c).ok())
                .and_then(|m| m.throughput)
                .map_or(1.0, |t| match t {
                    ThroughputMeta::Elements(n) => n as f64,
                    ThroughputMeta::Bytes(_) | ThroughputMeta::BytesDecimal(_) => 1.0,
                });

            let time_ns = estimates.mean.point_estimate;
            if time_ns > 0.0 {
                results
                    .entry(group.clone())
                    .or_default()
                    .insert(function, elements * 1e9 / time_ns);
            }
        }
    }
    Ok(())
}

fn dir_name(path: &Path) -> Option<String> {
    path.file_name()?.to_str().map(str::to_string)
}
