//! CLI entry point for fsmanifest

use std::io::IsTerminal;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::Context;
use clap::{Parser, ValueEnum};
use fsmanifest::{BuildReport, ManifestBuilder, logging, print_manifest, print_report, write_manifest};

/// Exit status when the manifest was written but references or highlights
/// could not be resolved.
const EXIT_UNRESOLVED: u8 = 1;
/// Exit status when no manifest could be produced.
const EXIT_FAILURE: u8 = 2;

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

/// Determine whether to use color on stderr based on mode and environment.
fn should_use_color(mode: ColorMode) -> bool {
    match mode {
        ColorMode::Always => true,
        ColorMode::Never => false,
        ColorMode::Auto => {
            // https://no-color.org/
            if std::env::var_os("NO_COLOR").is_some() {
                return false;
            }
            if std::env::var_os("FORCE_COLOR").is_some() {
                return true;
            }
            if std::env::var("TERM").map(|t| t == "dumb").unwrap_or(false) {
                return false;
            }
            std::io::stderr().is_terminal()
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "fsmanifest")]
#[command(about = "Regenerate the filesystem manifest from a content directory")]
#[command(version)]
struct Args {
    /// Content directory to describe
    #[arg(default_value = "public/filesystem")]
    root: PathBuf,

    /// Where to write the manifest (default: ROOT/filesystem.json, "-" for stdout)
    #[arg(short, long, value_name = "PATH")]
    output: Option<PathBuf>,

    /// Control color output: auto, always, never
    #[arg(long = "color", value_name = "WHEN", default_value = "auto")]
    color: ColorMode,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> ExitCode {
    let args = Args::parse();
    let use_color = should_use_color(args.color);

    if let Err(e) = logging::init(args.verbose, use_color) {
        eprintln!("fsmanifest: warning: {:#}", e);
    }

    match run(&args, use_color) {
        Ok(report) if report.is_clean() => ExitCode::SUCCESS,
        Ok(_) => ExitCode::from(EXIT_UNRESOLVED),
        Err(e) => {
            eprintln!("fsmanifest: error: {:#}", e);
            ExitCode::from(EXIT_FAILURE)
        }
    }
}

/// Build, write, then report. The manifest is on disk before any collected
/// error is printed.
fn run(args: &Args, use_color: bool) -> anyhow::Result<BuildReport> {
    let builder = ManifestBuilder::new(&args.root);
    let (manifest, report) = builder
        .build()
        .with_context(|| format!("cannot build manifest for '{}'", args.root.display()))?;

    let output = args
        .output
        .clone()
        .unwrap_or_else(|| args.root.join(&builder.config().output_name));

    if output == Path::new("-") {
        print_manifest(&manifest).context("cannot print manifest")?;
    } else {
        write_manifest(&manifest, &output)?;
        println!("Wrote filesystem structure to {}", output.display());
    }

    print_report(&report, use_color).context("cannot write diagnostics")?;
    Ok(report)
}
