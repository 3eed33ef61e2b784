use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use netnudge_cli::{
    inspect_secondary, run_match, source_for_path, write_report, AppConfig, ExportFormat,
};
use shared_types::Origin;
use std::path::PathBuf;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::prelude::*;

#[derive(Parser, Debug)]
#[command(name = "netnudge", author, version, about = "Link address-book and LinkedIn contacts for outreach")]
struct Cli {
    /// Also write logs to this file
    #[arg(long, global = true)]
    log_file_path: Option<String>,

    /// Use this config file instead of the per-user one
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Match two contact exports and write the merged list
    Match(MatchArgs),
    /// Show how a secondary export indexes (duplicate names, shadowed keys)
    Inspect {
        /// Path to the LinkedIn connections CSV export
        #[arg(long, short = 's', value_name = "PATH")]
        secondary: PathBuf,
    },
    /// Print the config file location and effective settings
    Config,
}

#[derive(Args, Debug)]
struct MatchArgs {
    /// Address-book export (.csv or .vcf)
    #[arg(long, short = 'p', value_name = "PATH")]
    primary: PathBuf,

    /// LinkedIn connections CSV export
    #[arg(long, short = 's', value_name = "PATH")]
    secondary: PathBuf,

    /// Output file path
    #[arg(long, short = 'o', value_name = "PATH")]
    output: Option<PathBuf>,

    /// Output format; defaults to the config, then the output extension
    #[arg(long, value_enum)]
    format: Option<ExportFormat>,

    /// Only match primary contacts in this group/label (repeatable)
    #[arg(long = "group", short = 'g', value_name = "LABEL")]
    groups: Vec<String>,

    /// Print the match summary without writing any output
    #[arg(long)]
    dry_run: bool,
}

/// The returned guard flushes the file layer when dropped; keep it alive
/// until the process is done logging.
fn init_tracing(log_file_path: Option<&str>) -> Option<WorkerGuard> {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    if let Some(log_path) = log_file_path {
        let log_path = std::path::Path::new(log_path);
        let file_appender = tracing_appender::rolling::never(
            log_path.parent().unwrap_or(std::path::Path::new(".")),
            log_path
                .file_name()
                .unwrap_or(std::ffi::OsStr::new("netnudge.log")),
        );
        let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

        tracing_subscriber::registry()
            .with(env_filter)
            .with(
                tracing_subscriber::fmt::layer()
                    .with_ansi(true)
                    .with_writer(std::io::stderr),
            )
            .with(
                tracing_subscriber::fmt::layer()
                    .with_ansi(false)
                    .with_writer(non_blocking),
            )
            .init();

        Some(guard)
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .with_writer(std::io::stderr)
            .init();

        None
    }
}

fn load_config(path: Option<&PathBuf>) -> Result<(AppConfig, PathBuf)> {
    match path {
        Some(path) => {
            let config = AppConfig::load_from(path)
                .with_context(|| format!("Failed to load config at {:?}", path))?;
            Ok((config, path.clone()))
        }
        None => AppConfig::load().context("Failed to load netnudge config"),
    }
}

fn run_match_command(args: MatchArgs, config: &AppConfig) -> Result<()> {
    let delimiter = config.csv_delimiter()?;
    let primary = source_for_path(&args.primary, Origin::Primary, delimiter);
    let secondary = source_for_path(&args.secondary, Origin::Secondary, delimiter);

    println!("Matching {} against {}...", primary.describe(), secondary.describe());
    if !args.groups.is_empty() {
        println!("  Filtering to groups: {}", args.groups.join(", "));
    }
    let run = run_match(primary.as_ref(), secondary.as_ref(), &args.groups)?;

    println!("  Found {} primary contacts", run.primary_count);
    println!("  Found {} LinkedIn connections", run.secondary_count);
    println!("  {}", run.summary);
    println!("  Total contacts: {}", run.summary.total);

    if args.dry_run {
        println!("Dry run - skipping output");
        return Ok(());
    }

    let output = args.output.unwrap_or_else(|| config.output_path());
    let format = ExportFormat::resolve(args.format, config.output_format(), &output);
    let written = write_report(&output, format, &run.merged, &run.summary)?;
    println!("Created: {}", written.display());

    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let _log_guard = init_tracing(cli.log_file_path.as_deref());

    let (config, config_path) = load_config(cli.config.as_ref())?;
    tracing::debug!("Using config at {:?}", config_path);

    match cli.command {
        Command::Match(args) => run_match_command(args, &config),
        Command::Inspect { secondary } => {
            let delimiter = config.csv_delimiter()?;
            let source = source_for_path(&secondary, Origin::Secondary, delimiter);
            let stats = inspect_secondary(source.as_ref())?;

            println!("Records:                 {}", stats.records);
            println!("Distinct emails:         {}", stats.distinct_emails);
            println!("Distinct names:          {}", stats.distinct_names);
            println!("Duplicate-name groups:   {}", stats.duplicate_name_groups);
            println!("Shadowed by email:       {}", stats.shadowed_emails);
            println!("Shadowed by name+company: {}", stats.shadowed_name_companies);
            Ok(())
        }
        Command::Config => {
            println!("# {}", config_path.display());
            print!("{}", toml::to_string_pretty(&config)?);
            Ok(())
        }
    }
}
