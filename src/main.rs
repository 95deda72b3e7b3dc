//! abicmp: structural ABI diff for compiled class archives.

use abicmp::{
    cli::{self, ConfigOutput},
    config::{load_or_default, AppConfig, ConfigPreset},
    pipeline::exit_codes,
    reports::ReportFormat,
};
use anyhow::{anyhow, Result};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "abicmp")]
#[command(version)]
#[command(about = "Structural ABI diff and defect clustering for class archives", long_about = None)]
#[command(after_help = "EXIT CODES:
    0  No differences detected
    1  Differences detected
    3  Error occurred, or an archive pair could not be compared

EXAMPLES:
    # Compare two exploded archives, HTML report to a file
    abicmp compare old/lib.jar new/lib.jar -O lib-report.html

    # Compare two distribution trees, pairing lib-1.3.jar with lib-1.4.jar
    abicmp compare-archives dist-1.3 dist-1.4 --id1 -1.3 --id2 -1.4 -r reports")]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Only print warnings and errors
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Path to configuration file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Start from a named preset instead of the config file (default, strict, lenient, ci-cd)
    #[arg(long, global = true)]
    preset: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

/// Options shared by both comparison commands
#[derive(Args)]
struct ComparisonArgs {
    /// Column title of the first side
    #[arg(long)]
    header1: Option<String>,

    /// Column title of the second side
    #[arg(long)]
    header2: Option<String>,

    /// Run only these checkers (comma separated)
    #[arg(long, value_delimiter = ',')]
    checkers: Option<Vec<String>>,

    /// Switch off these checkers (comma separated)
    #[arg(long, value_delimiter = ',')]
    disable: Vec<String>,

    /// Report format
    #[arg(short, long)]
    format: Option<ReportFormat>,
}

#[derive(Subcommand)]
enum Commands {
    /// Compare one pair of exploded archives
    Compare {
        /// First archive directory
        archive1: PathBuf,

        /// Second archive directory
        archive2: PathBuf,

        /// Output file path (stdout if not specified)
        #[arg(short = 'O', long)]
        output_file: Option<PathBuf>,

        #[command(flatten)]
        comparison: ComparisonArgs,
    },

    /// Compare every archive pair of two directory trees
    CompareArchives {
        /// First directory tree
        dir1: PathBuf,

        /// Second directory tree
        dir2: PathBuf,

        /// Substring of tree-1 archive names to replace
        #[arg(long, requires = "id2")]
        id1: Option<String>,

        /// Replacement used to find the tree-2 counterpart
        #[arg(long, requires = "id1")]
        id2: Option<String>,

        /// Directory receiving the reports
        #[arg(short, long)]
        report_dir: Option<PathBuf>,

        /// Worker threads (0 = one per core)
        #[arg(short = 'j', long, env = "ABICMP_THREADS")]
        threads: Option<usize>,

        /// Skip the summary report
        #[arg(long)]
        no_summary: bool,

        /// Also write reports for archives without differences
        #[arg(long)]
        include_unchanged: bool,

        #[command(flatten)]
        comparison: ComparisonArgs,
    },

    /// Print configuration documents
    Config {
        /// Print the JSON schema of the config file
        #[arg(long, conflicts_with = "example")]
        schema: bool,

        /// Print a commented example config file
        #[arg(long)]
        example: bool,
    },
}

fn load_config(cli: &Cli) -> Result<AppConfig> {
    if let Some(name) = &cli.preset {
        let preset = ConfigPreset::from_name(name).ok_or_else(|| {
            let known: Vec<&str> = ConfigPreset::all().iter().map(ConfigPreset::name).collect();
            anyhow!("Unknown preset '{name}'. Valid options: {}", known.join(", "))
        })?;
        return Ok(AppConfig::from_preset(preset));
    }
    let (config, loaded_from) = load_or_default(cli.config.as_deref())?;
    if let Some(path) = loaded_from {
        tracing::debug!("Using config file {}", path.display());
    }
    Ok(config)
}

fn apply_comparison_args(config: &mut AppConfig, args: ComparisonArgs) {
    if let Some(header1) = args.header1 {
        config.comparison.header1 = header1;
    }
    if let Some(header2) = args.header2 {
        config.comparison.header2 = header2;
    }
    if let Some(checkers) = args.checkers {
        config.checkers.enabled = Some(checkers);
    }
    config.checkers.disabled.extend(args.disable);
    if let Some(format) = args.format {
        config.output.format = format;
    }
}

fn run(cli: Cli) -> Result<i32> {
    let mut config = load_config(&cli)?;

    match cli.command {
        Commands::Compare {
            archive1,
            archive2,
            output_file,
            comparison,
        } => {
            apply_comparison_args(&mut config, comparison);
            cli::run_compare(&config, &archive1, &archive2, output_file)
        }

        Commands::CompareArchives {
            dir1,
            dir2,
            id1,
            id2,
            report_dir,
            threads,
            no_summary,
            include_unchanged,
            comparison,
        } => {
            apply_comparison_args(&mut config, comparison);
            if id1.is_some() {
                config.comparison.id1 = id1;
                config.comparison.id2 = id2;
            }
            if let Some(report_dir) = report_dir {
                config.output.report_dir = report_dir;
            }
            if let Some(threads) = threads {
                config.comparison.threads = threads;
            }
            if no_summary {
                config.output.summary = false;
            }
            if include_unchanged {
                config.output.include_unchanged = true;
            }
            cli::run_compare_archives(&config, &dir1, &dir2)
        }

        Commands::Config { schema, example } => {
            let output = if schema {
                ConfigOutput::Schema
            } else if example {
                ConfigOutput::Example
            } else {
                ConfigOutput::Effective
            };
            println!("{}", cli::run_config(&config, output)?);
            Ok(exit_codes::SUCCESS)
        }
    }
}

fn main() {
    let cli = Cli::parse();

    // Logs go to stderr so reports can be piped from stdout
    let log_level = if cli.verbose {
        "debug"
    } else if cli.quiet {
        "warn"
    } else {
        "info"
    };
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| log_level.to_string()),
        ))
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();

    let code = match run(cli) {
        Ok(code) => code,
        Err(e) => {
            tracing::error!("{e:#}");
            exit_codes::ERROR
        }
    };
    std::process::exit(code);
}
