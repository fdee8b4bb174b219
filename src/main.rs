//! CLI entry point for handlerstub

use std::io::{self, IsTerminal};
use std::path::PathBuf;
use std::process;

use clap::{ArgAction, Parser, ValueEnum};
use handlerstub::config::parse_file_size;
use handlerstub::{
    AccessorSpec, Error, FileOutcome, Generator, GeneratorConfig, RunSummary, collect_inputs,
    print_json, print_summary, print_written,
};
use termcolor::{ColorChoice, StandardStream};
use tracing::warn;
use tracing_subscriber::EnvFilter;

/// Color output mode
#[derive(Debug, Clone, Copy, Default, ValueEnum)]
enum ColorMode {
    /// Auto-detect based on terminal and environment
    #[default]
    Auto,
    /// Always use colors
    Always,
    /// Never use colors
    Never,
}

/// Determine whether to use color output based on mode and environment.
fn should_use_color(mode: ColorMode) -> bool {
    match mode {
        ColorMode::Always => true,
        ColorMode::Never => false,
        ColorMode::Auto => {
            // Respect NO_COLOR environment variable (https://no-color.org/)
            if std::env::var_os("NO_COLOR").is_some() {
                return false;
            }
            if std::env::var_os("FORCE_COLOR").is_some() {
                return true;
            }
            if std::env::var("TERM").map(|t| t == "dumb").unwrap_or(false) {
                return false;
            }
            std::io::stdout().is_terminal()
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "handlerstub")]
#[command(about = "Generate Go test stubs for net/http handlers")]
#[command(version)]
struct Args {
    /// Go source files, directories, or glob patterns
    #[arg(required = true, value_name = "PATHS")]
    paths: Vec<PathBuf>,

    /// Directory to write generated test files to
    #[arg(short = 'o', long = "out-dir", default_value = ".")]
    out_dir: PathBuf,

    /// Call that returns route variables, as MODULE.FUNC
    #[arg(long = "accessor", value_name = "MODULE.FUNC", default_value = "mux.Vars")]
    accessor: AccessorSpec,

    /// Skip files matching pattern when walking directories (can be used multiple times)
    #[arg(short = 'x', long = "exclude", value_name = "PATTERN")]
    exclude: Vec<String>,

    /// Classify and report without writing any files
    #[arg(short = 'n', long = "dry-run")]
    dry_run: bool,

    /// Print each file's classification as JSON (implies --dry-run)
    #[arg(long = "json")]
    json: bool,

    /// Skip input files larger than this (default: 1M). Use suffixes: K, M, G
    #[arg(long = "max-file-size", value_name = "SIZE")]
    max_file_size: Option<String>,

    /// Control color output: auto, always, never
    #[arg(long = "color", value_name = "WHEN", default_value = "auto")]
    color: ColorMode,

    /// Do not print the per-file lines and summary
    #[arg(short = 'q', long = "quiet")]
    quiet: bool,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short = 'v', long = "verbose", action = ArgAction::Count)]
    verbose: u8,
}

/// Initialize tracing subscriber. `RUST_LOG` takes precedence over `-v`.
fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("handlerstub={}", level)));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .with_writer(io::stderr)
        .init();
}

fn fatal(e: &Error) -> ! {
    eprintln!("handlerstub: {}", e);
    process::exit(1);
}

fn main() {
    let args = Args::parse();
    init_tracing(args.verbose);

    let max_file_size = match args.max_file_size.as_deref().map(parse_file_size) {
        None => GeneratorConfig::default().max_file_size,
        Some(Ok(size)) => size,
        Some(Err(e)) => {
            eprintln!(
                "handlerstub: invalid --max-file-size '{}': {}",
                args.max_file_size.as_deref().unwrap_or_default(),
                e
            );
            process::exit(1);
        }
    };

    let config = GeneratorConfig {
        out_dir: args.out_dir.clone(),
        accessor: args.accessor.clone(),
        dry_run: args.dry_run || args.json,
        max_file_size,
    };

    let inputs = collect_inputs(&args.paths, &args.exclude).unwrap_or_else(|e| fatal(&e));
    let generator = Generator::new(config).unwrap_or_else(|e| fatal(&e));

    let color = if should_use_color(args.color) {
        ColorChoice::Auto
    } else {
        ColorChoice::Never
    };
    let mut stdout = StandardStream::stdout(color);
    let show_report = !args.quiet && !args.json;
    let mut summary = RunSummary::default();

    for path in &inputs {
        let outcome = match generator.process_file(path) {
            Ok(outcome) => outcome,
            Err(e) if !e.is_fatal() => {
                // Oversized input or an uncreatable output; the next file may still succeed
                eprintln!("handlerstub: {}", e);
                warn!(source = %path.display(), "file skipped");
                if !matches!(e, Error::TooLarge { .. }) {
                    summary.record_scanned(0);
                }
                summary.skipped += 1;
                continue;
            }
            Err(e) => fatal(&e),
        };

        let handlers = outcome.result().handlers.len();
        summary.record_scanned(handlers);

        if args.json {
            if let Err(e) = print_json(path, outcome.result()) {
                eprintln!("handlerstub: error writing output: {}", e);
                process::exit(1);
            }
            continue;
        }

        let written = match &outcome {
            FileOutcome::Written { output, .. } => Some((output, false)),
            FileOutcome::Planned { output, .. } => Some((output, true)),
            FileOutcome::NoHandlers { .. } => None,
        };
        if let Some((output, dry_run)) = written {
            summary.files_written += 1;
            if show_report {
                if let Err(e) = print_written(&mut stdout, output, handlers, dry_run) {
                    eprintln!("handlerstub: error writing output: {}", e);
                    process::exit(1);
                }
            }
        }
    }

    if show_report {
        if let Err(e) = print_summary(&mut stdout, &summary) {
            eprintln!("handlerstub: error writing output: {}", e);
            process::exit(1);
        }
    }
}
