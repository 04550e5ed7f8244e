mod update;

use std::{env::current_dir, path::PathBuf};

use clap::Parser;
use log::debug;
use simplelog::ColorChoice;

use crate::{
    checksum::DEFAULT_CHUNK_SIZE,
    fetch::{ArtifactSource, DefaultFetcher},
    manifest::{ReleaseTemplate, DEFAULT_ORG, DEFAULT_PROJECT},
};

#[derive(Debug, clap::Parser)]
#[command(
    version,
    about = "Bump the xcframework release URL and checksum in a Package.swift",
    after_help = "Example: xcframework-bump v1.19.13"
)]
pub struct Cli {
    /// Release version tag, used verbatim in the download URL
    #[arg(value_name = "VERSION")]
    pub tag: String,
    /// GitHub organization publishing the release
    ///
    /// The manifest's current url field must already point at this org and
    /// project, otherwise no url field is found.
    #[arg(long, default_value = DEFAULT_ORG)]
    pub org: String,
    /// GitHub project publishing the release, see --org
    #[arg(long, default_value = DEFAULT_PROJECT)]
    pub project: String,
    /// Path to the manifest to patch, defaults to the closest Package.swift
    #[arg(short, long, value_parser = clap::value_parser!(PathBuf))]
    pub manifest: Option<PathBuf>,
    /// Hash this local path or URL instead of downloading the release asset
    #[arg(short, long)]
    pub artifact: Option<ArtifactSource>,
    /// Chunk size to use when reading local artifacts
    #[arg(short, long, default_value_t = DEFAULT_CHUNK_SIZE, value_parser = parse_chunk_size)]
    pub chunk_size: usize,
    /// Report the new URL and checksum without writing the manifest
    #[arg(short = 'n', long, default_value_t = false)]
    pub dry_run: bool,
    #[arg(short, long, action = clap::ArgAction::Count, default_value_t = 0)]
    /// Verbosity level
    pub verbosity: u8,
    /// Enable debug output
    #[arg(long, default_value_t = false)]
    pub debug: bool,
    /// Disable color output
    #[arg(long, default_value_t = false)]
    pub no_color: bool,
    /// Disable display output
    #[arg(long, default_value_t = false)]
    pub no_display: bool,
}

fn parse_chunk_size(s: &str) -> Result<usize, String> {
    match s.parse::<usize>() {
        Ok(0) => Err("chunk size must be greater than 0".to_string()),
        Ok(size) => Ok(size),
        Err(err) => Err(err.to_string()),
    }
}

/// Exit status for a failed parse: 1 for usage errors, 0 for `--help` and `--version`.
fn usage_exit_code(err: &clap::Error) -> i32 {
    if err.use_stderr() {
        1
    } else {
        0
    }
}

/// Parses the command line, exiting before any other work on usage errors.
fn parse_args() -> Cli {
    match Cli::try_parse() {
        Ok(args) => args,
        Err(err) => {
            if let Err(print_err) = err.print() {
                debug!("Failed to print usage: {}", print_err);
            }
            std::process::exit(usage_exit_code(&err));
        }
    }
}

fn init_logging(args: &Cli) -> anyhow::Result<()> {
    let level = match (args.debug, args.verbosity) {
        (true, _) => simplelog::LevelFilter::Debug,
        (false, 0) => return Ok(()),
        (false, 1) => simplelog::LevelFilter::Info,
        (false, _) => simplelog::LevelFilter::Debug,
    };

    simplelog::TermLogger::init(
        level,
        simplelog::Config::default(),
        simplelog::TerminalMode::Stderr,
        if args.no_color {
            ColorChoice::Never
        } else {
            ColorChoice::Auto
        },
    )?;

    Ok(())
}

pub async fn cli() -> anyhow::Result<()> {
    let args = parse_args();
    init_logging(&args)?;

    if args.no_color {
        colored::control::set_override(false);
    }

    debug!("{:?}", args);
    let fetcher = DefaultFetcher::new()?.with_chunk_size(args.chunk_size);
    update::update(
        update::UpdateOptions {
            version: args.tag,
            template: ReleaseTemplate::new(args.org, args.project),
            manifest: args.manifest,
            artifact: args.artifact,
            working_dir: current_dir()?,
            dry_run: args.dry_run,
            verbosity: args.verbosity,
            show_display: !args.no_display,
        },
        &fetcher,
    )
    .await?;

    Ok(())
}
