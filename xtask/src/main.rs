use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::path::Path;
use std::process::Command;
use std::time::Instant;

#[derive(Parser)]
#[command(name = "xtask")]
#[command(about = "atomics-shims automation", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check the exported `_sa_` symbols of the static library
    Symbols {
        /// Print the result as JSON
        #[arg(long, default_value_t = false)]
        json: bool,
    },
    /// Run the ordering and resolver benchmarks
    Bench {
        /// Run quickly (lower sample size/time)
        #[arg(long, default_value_t = false)]
        quick: bool,

        /// Generate report only (skip running benchmarks)
        #[arg(long, default_value_t = false)]
        report_only: bool,
    },
}

const BENCHES: &[&str] = &["ordering_benchmark", "resolver_benchmark"];
const BASELINE: &str = "main";
const STATIC_LIB: &str = "target/release/libatomics_shims.a";

const INTEGER_TYPES: &[&str] = &[
    "int8", "int16", "int32", "int64", "int", "uint8", "uint16", "uint32", "uint64", "uint",
];
const LOAD_ORDERINGS: &[&str] = &["relaxed", "acquire", "seq_cst"];
const STORE_ORDERINGS: &[&str] = &["relaxed", "release", "seq_cst"];
const UPDATE_ORDERINGS: &[&str] = &["relaxed", "acquire", "release", "acq_rel", "seq_cst"];
const CMPXCHG_ORDERINGS: &[(&str, &str)] = &[
    ("relaxed", "relaxed"),
    ("acquire", "relaxed"),
    ("release", "relaxed"),
    ("acq_rel", "relaxed"),
    ("seq_cst", "relaxed"),
    ("acquire", "acquire"),
    ("acq_rel", "acquire"),
    ("seq_cst", "acquire"),
    ("seq_cst", "seq_cst"),
];
const FENCE_ORDERINGS: &[&str] = &["acquire", "release", "acq_rel", "seq_cst"];
const ARITHMETIC_OPS: &[&str] = &["add", "sub"];
const BITWISE_OPS: &[&str] = &["or", "xor", "and"];

#[derive(Serialize)]
struct SymbolReport {
    library: String,
    double_word: bool,
    expected: usize,
    exported: usize,
    missing: Vec<String>,
    unexpected: Vec<String>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Symbols { json } => check_symbols(json)?,
        Commands::Bench { quick, report_only } => {
            if !report_only {
                run_benchmarks(quick)?;
            }
            generate_report()?;
        }
    }

    Ok(())
}

fn check_symbols(json: bool) -> Result<()> {
    println!("Building static library...");
    let status = Command::new("cargo")
        .args(["build", "--lib", "--release"])
        .status()?;
    if !status.success() {
        anyhow::bail!("Failed to build the static library");
    }

    let output = Command::new("nm")
        .args(["-g", "--defined-only", STATIC_LIB])
        .output()
        .context("Failed to run nm")?;
    if !output.status.success() {
        anyhow::bail!("nm failed on {}", STATIC_LIB);
    }

    let exported: BTreeSet<String> = String::from_utf8_lossy(&output.stdout)
        .lines()
        .filter_map(|line| line.split_whitespace().last())
        // Mach-O prepends an underscore to every C symbol.
        .map(|name| name.strip_prefix("__sa_").map_or(name.to_string(), |rest| format!("_sa_{rest}")))
        .filter(|name| name.starts_with("_sa_"))
        .collect();

    let double_word = exported.contains("_sa_prepare_double_word");
    let expected = expected_symbols(double_word);

    let report = SymbolReport {
        library: STATIC_LIB.to_string(),
        double_word,
        expected: expected.len(),
        exported: exported.len(),
        missing: expected.difference(&exported).cloned().collect(),
        unexpected: exported.difference(&expected).cloned().collect(),
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!(
            "{}: {} exported, {} expected (double word: {})",
            report.library, report.exported, report.expected, report.double_word
        );
        for name in &report.missing {
            println!("  missing    {}", name);
        }
        for name in &report.unexpected {
            println!("  unexpected {}", name);
        }
    }

    if !report.missing.is_empty() || !report.unexpected.is_empty() {
        anyhow::bail!("Exported symbols do not match the expected surface");
    }
    Ok(())
}

fn expected_symbols(double_word: bool) -> BTreeSet<String> {
    fn atomic_type(ty: &str, names: &mut BTreeSet<String>) {
        names.insert(format!("_sa_prepare_{ty}"));
        names.insert(format!("_sa_dispose_{ty}"));
        for order in LOAD_ORDERINGS {
            names.insert(format!("_sa_load_{order}_{ty}"));
        }
        for order in STORE_ORDERINGS {
            names.insert(format!("_sa_store_{order}_{ty}"));
        }
        for order in UPDATE_ORDERINGS {
            names.insert(format!("_sa_exchange_{order}_{ty}"));
        }
        for kind in ["strong", "weak"] {
            for (succ, fail) in CMPXCHG_ORDERINGS {
                names.insert(format!("_sa_cmpxchg_{kind}_{succ}_{fail}_{ty}"));
            }
        }
    }
    fn fetch(ty: &str, ops: &[&str], names: &mut BTreeSet<String>) {
        for op in ops {
            for order in UPDATE_ORDERINGS {
                names.insert(format!("_sa_fetch_{op}_{order}_{ty}"));
            }
        }
    }

    let mut names = BTreeSet::new();

    for ty in INTEGER_TYPES {
        atomic_type(ty, &mut names);
        fetch(ty, ARITHMETIC_OPS, &mut names);
        fetch(ty, BITWISE_OPS, &mut names);
    }

    atomic_type("bool", &mut names);
    fetch("bool", BITWISE_OPS, &mut names);

    if double_word {
        atomic_type("double_word", &mut names);
    }

    for order in FENCE_ORDERINGS {
        names.insert(format!("_sa_thread_fence_{order}"));
    }
    names.insert("_sa_retain_n".to_string());
    names.insert("_sa_release_n".to_string());

    names
}

fn run_benchmarks(quick: bool) -> Result<()> {
    println!("Running ordering benchmarks...");

    // Build first to avoid measuring build time
    println!("Compiling benchmarks...");
    let status = Command::new("cargo")
        .args(["build", "--benches", "--release"])
        .status()?;
    if !status.success() {
        anyhow::bail!("Failed to compile benchmarks");
    }

    for bench in BENCHES {
        println!("\n>>> Running {}", bench);
        let start = Instant::now();

        let mut cmd = Command::new("cargo");
        cmd.env("CARGO_INCREMENTAL", "0");
        cmd.arg("bench").arg("--bench").arg(bench);

        // Args for the test runner (Criterion) go after --
        cmd.arg("--");
        cmd.arg("--save-baseline").arg(BASELINE);

        if quick {
            cmd.arg("--measurement-time").arg("0.1");
            cmd.arg("--noplot");
            cmd.arg("--sample-size").arg("10");
        }

        let status = cmd.status().context(format!("Failed to run bench {}", bench))?;

        if !status.success() {
            eprintln!("Warning: Benchmark {} failed", bench);
        } else {
            println!("Finished {} in {:.2?}", bench, start.elapsed());
        }
    }

    Ok(())
}

fn generate_report() -> Result<()> {
    println!("\n>>> Generating Report...");
    // workload -> variant -> ops/s
    let mut results: BTreeMap<String, BTreeMap<String, f64>> = BTreeMap::new();

    let criterion_dir = Path::new("target/criterion");
    if !criterion_dir.exists() {
        eprintln!("No criterion output found at {}", criterion_dir.display());
        return Ok(());
    }

    collect_results(criterion_dir, &mut results);

    let report_path = Path::new("benchmark_results/report.md");
    if let Some(parent) = report_path.parent() {
        fs::create_dir_all(parent)?;
    }

    use std::io::Write;
    let mut file = fs::File::create(report_path)?;

    writeln!(file, "# Ordering Benchmark Report")?;

    for (workload, variants) in &results {
        writeln!(file)?;
        writeln!(file, "## {}", workload)?;
        writeln!(file)?;
        writeln!(file, "| Variant | Ops/s | vs fastest |")?;
        writeln!(file, "|---|---|---|")?;

        let fastest = variants.values().copied().fold(0.0_f64, f64::max);
        for (variant, ops) in variants {
            let rel = if fastest > 0.0 { ops / fastest } else { 0.0 };
            writeln!(file, "| {} | {} | **{:.2}x** |", variant, format_ops(*ops), rel)?;
        }
    }

    println!("Report written to {}", report_path.display());
    Ok(())
}

fn format_ops(ops: f64) -> String {
    if ops > 1_000_000_000.0 {
        format!("{:.2}G", ops / 1_000_000_000.0)
    } else if ops > 1_000_000.0 {
        format!("{:.2}M", ops / 1_000_000.0)
    } else if ops > 1_000.0 {
        format!("{:.2}K", ops / 1_000.0)
    } else {
        format!("{:.0}", ops)
    }
}

fn file_name(path: &Path) -> Option<String> {
    path.file_name().and_then(|s| s.to_str()).map(str::to_string)
}

fn collect_results(dir: &Path, results: &mut BTreeMap<String, BTreeMap<String, f64>>) {
    let entries = match fs::read_dir(dir) {
        Ok(e) => e,
        Err(_) => return,
    };

    for entry in entries.flatten() {
        let path = entry.path();
        if path.is_dir() {
            collect_results(&path, results);
            continue;
        }
        if file_name(&path).as_deref() != Some("estimates.json") {
            continue;
        }

        // Structure: .../<group>/<variant>/<baseline>/estimates.json
        let Some(baseline_dir) = path.parent() else { continue };
        let Some(variant_dir) = baseline_dir.parent() else { continue };
        let Some(group_dir) = variant_dir.parent() else { continue };
        let (Some(baseline), Some(variant), Some(group)) =
            (file_name(baseline_dir), file_name(variant_dir), file_name(group_dir))
        else {
            continue;
        };

        if baseline != BASELINE || variant == "report" || group == "report" {
            continue;
        }

        // Get throughput from benchmark.json
        let mut elements = 1.0;
        let bench_json = baseline_dir.join("benchmark.json");
        if let Ok(content) = fs::read_to_string(&bench_json) {
            if let Ok(json) = serde_json::from_str::<serde_json::Value>(&content) {
                if let Some(t) = json.get("throughput").and_then(|t| t.get("Elements")) {
                    elements = t.as_f64().unwrap_or(1.0);
                }
            }
        }

        // Get time
        if let Ok(content) = fs::read_to_string(&path) {
            if let Ok(json) = serde_json::from_str::<serde_json::Value>(&content) {
                if let Some(mean) = json.get("mean").and_then(|m| m.get("point_estimate")) {
                    let time_ns = mean.as_f64().unwrap_or(0.0);
                    if time_ns > 0.0 {
                        results
                            .entry(group)
                            .or_default()
                            .insert(variant, (elements * 1e9) / time_ns);
                    }
                }
            }
        }
    }
}
