#![warn(missing_docs)]
//! nestbench CLI Library
//!
//! Configuration, the benchmark runner and the command-line entry point.
//! The `nestbench` binary calls [`run`]; tests and embedders can drive
//! [`Runner`] directly with their own registry.

mod config;
mod executor;

pub use config::{CONFIG_FILE_NAME, NestConfig, OutputConfig, RunnerConfig};
pub use executor::{ExecutionConfig, Runner, build_report, build_report_meta};

use anyhow::Context;
use clap::{Parser, Subcommand};
use nestbench_core::{Implementation, NestedDocument, Registry, TimingConfig};
use nestbench_report::OutputFormat;
use regex::Regex;
use std::io::Write;
use std::path::PathBuf;
use std::time::Duration;

/// nestbench CLI arguments
#[derive(Parser, Debug)]
#[command(name = "nestbench")]
#[command(
    author,
    version,
    about = "nestbench - compare nested-mapping containers on init, read and write"
)]
pub struct Cli {
    /// Optional subcommand (List, Run); defaults to Run
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Filter implementations by regex pattern
    #[arg(default_value = ".*")]
    pub filter: String,

    /// Repetitions per operation (overrides nestbench.toml)
    #[arg(short = 'n', long)]
    pub iterations: Option<u64>,

    /// Wall-clock budget per operation, e.g. "30s" or "500ms"
    #[arg(long)]
    pub timeout: Option<String>,

    /// Output format: human, json, csv
    #[arg(long)]
    pub format: Option<String>,

    /// Output file (stdout if not specified)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Hide the progress bar
    #[arg(long)]
    pub no_progress: bool,

    /// Verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

/// CLI subcommands
#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Commands {
    /// List known implementations and their capabilities
    List,
    /// Run benchmarks (default)
    Run,
}

/// Run the nestbench CLI with the process arguments.
pub fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();
    run_with_cli(cli)
}

/// Run the nestbench CLI with pre-parsed arguments.
pub fn run_with_cli(cli: Cli) -> anyhow::Result<()> {
    let filter = if cli.verbose {
        "nestbench=debug"
    } else {
        "nestbench=info"
    };
    // Logs go to stderr; stdout carries only the report
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();

    let config = NestConfig::discover()?.unwrap_or_default();
    let registry = nestbench_containers::default_registry()?;

    match cli.command {
        Some(Commands::List) => list_implementations(&cli, &registry),
        Some(Commands::Run) | None => run_benchmarks(&cli, &config, &registry),
    }
}

fn compile_filter(cli: &Cli) -> anyhow::Result<Regex> {
    Regex::new(&cli.filter).with_context(|| format!("invalid filter pattern `{}`", cli.filter))
}

/// Active implementations whose name matches `filter`, in registry order.
pub fn select_implementations<'a>(
    registry: &'a Registry,
    filter: &Regex,
) -> Vec<&'a Implementation> {
    registry
        .activate()
        .into_iter()
        .filter(|implementation| filter.is_match(implementation.name()))
        .collect()
}

fn list_implementations(cli: &Cli, registry: &Registry) -> anyhow::Result<()> {
    let filter = compile_filter(cli)?;
    let yes_no = |b: bool| if b { "yes" } else { "no" };

    println!("nestbench implementations:");
    let mut shown = 0;
    for implementation in registry.iter().filter(|i| filter.is_match(i.name())) {
        let descriptor = implementation.descriptor();
        let availability = if implementation.is_available() {
            ""
        } else {
            " (unavailable)"
        };
        println!(
            "├── {:<12} key: {:<3}  dot: {:<3}  {}{}",
            descriptor.name,
            yes_no(descriptor.supports_key),
            yes_no(descriptor.supports_dot),
            descriptor.constructor,
            availability
        );
        shown += 1;
    }
    println!("{} implementations found.", shown);

    Ok(())
}

/// Layer nestbench.toml values under CLI overrides.
pub fn build_execution_config(cli: &Cli, config: &NestConfig) -> anyhow::Result<ExecutionConfig> {
    let iterations = cli.iterations.unwrap_or(config.runner.iterations).max(1);
    let mut timing = TimingConfig::new(iterations);

    if let Some(timeout) = cli.timeout.as_ref().or(config.runner.timeout.as_ref()) {
        let nanos = NestConfig::parse_duration(timeout)
            .with_context(|| format!("invalid timeout `{}`", timeout))?;
        timing = timing.with_deadline(Duration::from_nanos(nanos));
    }

    Ok(ExecutionConfig {
        timing,
        show_progress: config.runner.progress && !cli.no_progress,
    })
}

fn run_benchmarks(cli: &Cli, config: &NestConfig, registry: &Registry) -> anyhow::Result<()> {
    let filter = compile_filter(cli)?;
    let format: OutputFormat = cli
        .format
        .as_deref()
        .unwrap_or(&config.output.format)
        .parse()
        .map_err(anyhow::Error::msg)?;
    let exec_config = build_execution_config(cli, config)?;

    let implementations = select_implementations(registry, &filter);
    if implementations.is_empty() {
        tracing::warn!(filter = %cli.filter, "no implementations selected");
    }
    tracing::info!(
        count = implementations.len(),
        iterations = exec_config.timing.iterations,
        "running benchmarks"
    );

    let runner = Runner::new(exec_config.clone());
    let rows = runner.execute(&implementations, &NestedDocument::fixed());
    let report = build_report(rows, &exec_config.timing);
    let output = format.render(&report)?;

    match cli.output.as_ref().or(config.output.path.as_ref()) {
        Some(path) => {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                std::fs::create_dir_all(parent)
                    .with_context(|| format!("failed to create {}", parent.display()))?;
            }
            let mut file = std::fs::File::create(path)
                .with_context(|| format!("failed to create {}", path.display()))?;
            file.write_all(output.as_bytes())?;
            println!("Report written to: {}", path.display());
        }
        None => print!("{}", output),
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::parse_from(std::iter::once("nestbench").chain(args.iter().copied()))
    }

    #[test]
    fn test_cli_defaults() {
        let cli = parse(&[]);
        assert_eq!(cli.command, None);
        assert_eq!(cli.filter, ".*");
        assert_eq!(cli.iterations, None);
        assert!(!cli.no_progress);
    }

    #[test]
    fn test_cli_flags() {
        let cli = parse(&["Map", "-n", "5", "--timeout", "1s", "--format", "csv", "--no-progress"]);
        assert_eq!(cli.filter, "Map");
        assert_eq!(cli.iterations, Some(5));
        assert_eq!(cli.format.as_deref(), Some("csv"));

        let exec = build_execution_config(&cli, &NestConfig::default()).unwrap();
        assert_eq!(exec.timing.iterations, 5);
        assert_eq!(exec.timing.deadline, Some(Duration::from_secs(1)));
        assert!(!exec.show_progress);
    }

    #[test]
    fn test_list_subcommand() {
        assert_eq!(parse(&["list"]).command, Some(Commands::List));
    }

    #[test]
    fn test_config_file_fills_gaps() {
        let mut config = NestConfig::default();
        config.runner.iterations = 7;
        config.runner.timeout = Some("2ms".to_string());

        let exec = build_execution_config(&parse(&[]), &config).unwrap();
        assert_eq!(exec.timing.iterations, 7);
        assert_eq!(exec.timing.deadline, Some(Duration::from_millis(2)));
        assert!(exec.show_progress);
    }

    #[test]
    fn test_zero_iterations_clamped() {
        let exec = build_execution_config(&parse(&["-n", "0"]), &NestConfig::default()).unwrap();
        assert_eq!(exec.timing.iterations, 1);
    }

    #[test]
    fn test_bad_timeout_is_error() {
        let cli = parse(&["--timeout", "soon"]);
        assert!(build_execution_config(&cli, &NestConfig::default()).is_err());
    }

    #[test]
    fn test_filter_selects_by_name() {
        let registry = nestbench_containers::default_registry().unwrap();
        let filter = Regex::new("^(HashMap|Typed)$").unwrap();
        let names: Vec<_> = select_implementations(&registry, &filter)
            .iter()
            .map(|i| i.name())
            .collect();
        assert_eq!(names, ["HashMap", "Typed"]);
    }
}
