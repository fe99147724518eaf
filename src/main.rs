//! GHDL Test Bench Driver CLI.
//!
//! Compiles, runs and cleans VHDL test benches through an external simulator.
//!
//! # Usage
//!
//! Benches come either from a configuration file or from command-line flags:
//! 1. **Config Mode**: `--config benches.toml [--bench NAME] <command>` acts on
//!    every configured bench, or only on the named one.
//! 2. **Ad-hoc Mode**: `--dir DIR --component C... --testbench TB [--source FILE] <command>`
//!    describes a single bench inline. `--source` makes it a generated bench.

use clap::{Parser, Subcommand};
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::process;

use ghdl_bench::bench::{run_cycle, CycleOptions, Testbench};
use ghdl_bench::common::constants::DEFAULT_EXTENSION;
use ghdl_bench::common::BenchResult;
use ghdl_bench::config::Config;
use ghdl_bench::sim::{SimulationReport, Simulator};

/// Command-line arguments for the test bench driver.
#[derive(Parser, Debug)]
#[command(author, version, about = "GHDL test bench driver")]
struct Args {
    /// TOML file listing the simulator settings and benches.
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Only act on the configured bench with this name.
    #[arg(short, long, global = true)]
    bench: Option<String>,

    /// Print results as JSON.
    #[arg(long, global = true)]
    json: bool,

    /// Print timing statistics after each bench.
    #[arg(long, global = true)]
    stats: bool,

    #[command(flatten)]
    adhoc: BenchArgs,

    #[command(subcommand)]
    command: Command,
}

/// Inline description of a single bench.
#[derive(clap::Args, Debug)]
struct BenchArgs {
    /// Working directory holding the sources.
    #[arg(long, global = true)]
    dir: Option<PathBuf>,

    /// Component name without extension, in analysis order.
    #[arg(short = 'C', long = "component", global = true)]
    components: Vec<String>,

    /// Top-level test bench name.
    #[arg(short, long, global = true)]
    testbench: Option<String>,

    /// Source file extension.
    #[arg(long, default_value = DEFAULT_EXTENSION, global = true)]
    ext: String,

    /// File holding the test bench text to generate.
    #[arg(long, global = true)]
    source: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Analyze and elaborate.
    Compile,
    /// Remove generated sources, object files, library caches and executables.
    Clean,
    /// Run an elaborated bench.
    Run {
        #[arg(last = true)]
        sim_args: Vec<String>,
    },
    /// Compile, check artifacts, optionally run, then clean.
    Cycle {
        #[arg(long)]
        run: bool,
        #[arg(last = true)]
        sim_args: Vec<String>,
    },
    /// Show the configured benches.
    List,
}

/// Main entry point for the test bench driver.
///
/// # Behavior
///
/// 1. **Configuration**: Parses arguments and loads the TOML configuration if given.
/// 2. **Selection**: Builds descriptors from flags or from the configuration.
/// 3. **Command**: Applies the command to each bench in order, stopping at the
///    first error.
/// 4. **Exit**: Exits with 1 on an error or a failing simulation, 0 otherwise.
fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let args = Args::parse();
    match execute(&args) {
        Ok(true) => {}
        Ok(false) => process::exit(1),
        Err(e) => {
            eprintln!("[!] {}", e);
            process::exit(1);
        }
    }
}

fn execute(args: &Args) -> BenchResult<bool> {
    let (config, base) = match &args.config {
        Some(path) => {
            let base = path.parent().map(Path::to_path_buf).unwrap_or_default();
            (Config::from_file(path)?, base)
        }
        None => {
            let mut config = Config::default();
            config.apply_env_overrides();
            (config, PathBuf::new())
        }
    };

    if let Command::List = args.command {
        return list(&config, args.json).map(|_| true);
    }

    let sim = Simulator::from_config(&config.simulator);
    let mut benches = select_benches(args, &config, &base)?;
    if benches.is_empty() {
        eprintln!("Error: No bench specified.");
        eprintln!("Usage:");
        eprintln!("  Config mode:  --config <benches.toml> [--bench <name>] <command>");
        eprintln!("  Ad-hoc mode:  --dir <dir> -C <component>... --testbench <name> [--source <file>] <command>");
        return Ok(false);
    }

    let mut passed = true;
    for tb in &mut benches {
        match &args.command {
            Command::Compile => {
                tb.compile(&sim)?;
                println!("[*] {}: compiled", tb.name());
            }
            Command::Clean => {
                tb.clean()?;
                println!("[*] {}: cleaned", tb.name());
            }
            Command::Run { sim_args } => {
                let report = tb.run(&sim, sim_args)?;
                passed &= report.passed();
                if args.json {
                    print_json(&report)?;
                } else {
                    print_simulation(tb.name(), &report);
                }
            }
            Command::Cycle { run, sim_args } => {
                let options = CycleOptions {
                    run: *run,
                    sim_args: sim_args.clone(),
                };
                let report = run_cycle(tb, &sim, &options)?;
                let sim_ok = report.simulation.as_ref().map_or(true, |s| s.passed());
                passed &= report.restored() && sim_ok;

                if args.json {
                    print_json(&report)?;
                } else {
                    println!("[*] {}: produced {}", report.bench, report.produced().join(" "));
                    if let Some(simulation) = &report.simulation {
                        print_simulation(&report.bench, simulation);
                    }
                    if report.restored() {
                        println!("[*] {}: directory restored", report.bench);
                    } else {
                        println!("[!] {}: left over {}", report.bench, report.leftovers().join(" "));
                    }
                }
            }
            Command::List => {}
        }

        if args.stats {
            tb.stats().print();
        }
    }

    Ok(passed)
}

fn select_benches(args: &Args, config: &Config, base: &Path) -> BenchResult<Vec<Testbench>> {
    let adhoc = &args.adhoc;
    if let Some(name) = &adhoc.testbench {
        let dir = adhoc.dir.clone().unwrap_or_else(|| PathBuf::from("."));
        let tb = Testbench::new(dir, adhoc.components.iter().cloned(), name, &adhoc.ext);
        let tb = match &adhoc.source {
            Some(source) => tb.with_source_file(source)?,
            None => tb,
        };
        return Ok(vec![tb]);
    }

    match &args.bench {
        Some(name) => Ok(vec![Testbench::from_config(config.bench(name)?, base)?]),
        None => config
            .benches
            .iter()
            .map(|b| Testbench::from_config(b, base))
            .collect(),
    }
}

fn list(config: &Config, json: bool) -> BenchResult<()> {
    if json {
        return print_json(&config.benches);
    }

    println!("Simulator: {}", config.simulator.program);
    if let Some(std) = &config.simulator.std {
        println!("Standard:  {}", std);
    }
    println!("--------------------");
    for bench in &config.benches {
        println!("{}", bench.label());
        println!("  Directory:  {}", bench.working_dir.display());
        println!("  Components: {}", bench.components.join(", "));
        println!("  Testbench:  {}.{}", bench.testbench, bench.extension);
        if let Some(source) = &bench.source {
            println!("  Generated from {}", source.display());
        }
    }
    Ok(())
}

fn print_simulation(name: &str, report: &SimulationReport) {
    for assertion in &report.assertions {
        println!("    {}", assertion);
    }
    let status = if report.passed() { "passed" } else { "FAILED" };
    match report.code {
        Some(code) => println!("[*] {}: simulation {} (exit code {})", name, status, code),
        None => println!("[*] {}: simulation {} (terminated by signal)", name, status),
    }
}

fn print_json<T: Serialize>(value: &T) -> BenchResult<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
