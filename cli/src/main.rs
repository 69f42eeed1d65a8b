mod commands;
mod output;

use clap::{Parser, Subcommand, ValueEnum};
use commands::CliError;
use ini_diff::IniDiffError;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "ini-diff")]
#[command(about = "Compare two sectioned device configuration files and report drift")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
    #[arg(long, short, global = true, help = "Quiet mode: only warnings and the summary")]
    pub quiet: bool,
    #[arg(long, short, global = true, help = "Verbose mode: debug logging and extra detail")]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    #[command(about = "Compare two configuration files")]
    Diff {
        #[arg(help = "Path to the first configuration file")]
        file_a: PathBuf,
        #[arg(help = "Path to the second configuration file")]
        file_b: PathBuf,
        #[arg(long, default_value = "SBC1", help = "Display name for the first file")]
        name_a: String,
        #[arg(long, default_value = "SBC2", help = "Display name for the second file")]
        name_b: String,
        #[arg(
            long,
            short,
            value_name = "PATH",
            help = "Report destination (HTML defaults to ini_diff_report.html, text/json to stdout)"
        )]
        output: Option<PathBuf>,
        #[arg(long, short, value_enum, default_value = "html", help = "Report format")]
        format: OutputFormat,
        #[arg(long, help = "Pair table rows by Index even when row counts match")]
        match_by_index: bool,
    },
    #[command(about = "Show the sections of a configuration file")]
    Info {
        #[arg(help = "Path to the configuration file")]
        path: PathBuf,
    },
}

#[derive(Clone, Copy, Debug, ValueEnum, PartialEq, Eq)]
pub enum OutputFormat {
    Html,
    Text,
    Json,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Verbosity {
    Quiet,
    Normal,
    Verbose,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let verbosity = if cli.quiet {
        Verbosity::Quiet
    } else if cli.verbose {
        Verbosity::Verbose
    } else {
        Verbosity::Normal
    };
    init_logging(verbosity);

    let result = match cli.command {
        Commands::Diff {
            file_a,
            file_b,
            name_a,
            name_b,
            output,
            format,
            match_by_index,
        } => commands::diff::run(commands::diff::DiffArgs {
            file_a,
            file_b,
            name_a,
            name_b,
            output,
            format,
            match_by_index,
            verbosity,
        }),
        Commands::Info { path } => commands::info::run(&path),
    };

    match result {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            exit_code_for_error(&e)
        }
    }
}

fn init_logging(verbosity: Verbosity) {
    let default_level = match verbosity {
        Verbosity::Quiet => "warn",
        Verbosity::Normal => "info",
        Verbosity::Verbose => "debug",
    };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| default_level.into()),
        )
        .init();
}

fn exit_code_for_error(err: &anyhow::Error) -> ExitCode {
    if is_user_error(err) {
        ExitCode::from(2)
    } else {
        ExitCode::from(3)
    }
}

/// Missing inputs and unusable output locations are the caller's to fix; any
/// other failure is unexpected.
fn is_user_error(err: &anyhow::Error) -> bool {
    err.chain()
        .any(|cause| cause.is::<IniDiffError>() || cause.is::<CliError>())
}
