/// `utf8vld` command line: validate files or stdin as streams.

use crate::config::{Config, OutputFormat};
use crate::report::{self, InputReport};
use crate::stream;
use anyhow::{Context, Result};
use clap::Parser;
use std::io::Write;
use std::path::{Path, PathBuf};

pub const SUCCESS: i32 = 0;
pub const INVALID_INPUT: i32 = 1; // at least one input malformed or truncated
pub const INTERNAL_ERROR: i32 = 2; // I/O or usage error

#[derive(Parser, Debug)]
#[command(name = "utf8vld", version, about = "Validate UTF-8 in files or stdin, chunk by chunk")]
pub struct Cli {
    /// Files to validate. Reads stdin when empty or `-`.
    pub paths: Vec<PathBuf>,

    /// Bytes per read (default from config, else 65536)
    #[arg(long, env = "UTF8VLD_CHUNK_SIZE")]
    pub chunk_size: Option<usize>,

    #[arg(long, value_enum)]
    pub format: Option<OutputFormat>,

    /// Only report inputs that fail
    #[arg(short, long)]
    pub quiet: bool,

    /// Config file (default: ~/.config/utf8vld/config.toml)
    #[arg(long)]
    pub config: Option<PathBuf>,
}

/// Effective settings after layering CLI flags over the config file.
#[derive(Debug, Clone)]
pub struct Settings {
    pub chunk_size: usize,
    pub format: OutputFormat,
    pub quiet: bool,
}

impl Settings {
    pub fn resolve(cli: &Cli, config: &Config) -> Self {
        Self {
            chunk_size: cli.chunk_size.unwrap_or(config.chunk_size).max(1),
            format: cli.format.unwrap_or(config.output.format),
            quiet: cli.quiet || config.output.quiet,
        }
    }
}

fn is_stdin(path: &Path) -> bool {
    path.as_os_str() == "-"
}

/// Validate one input. `-` is stdin.
pub fn check_path(path: &Path, chunk_size: usize) -> Result<InputReport> {
    let source = path.display().to_string();
    let stream = if is_stdin(path) {
        stream::validate_reader(&mut std::io::stdin().lock(), chunk_size)
            .context("reading stdin")?
    } else {
        let mut file = std::fs::File::open(path)
            .with_context(|| format!("opening {}", source))?;
        stream::validate_reader(&mut file, chunk_size)
            .with_context(|| format!("reading {}", source))?
    };
    log::info!("{}: {} bytes in {} chunks", source, stream.bytes_read, stream.chunks);
    Ok(InputReport::new(&source, &stream))
}

/// Write reports in the chosen format.
pub fn render<W: Write>(out: &mut W, reports: &[InputReport], settings: &Settings) -> Result<()> {
    let shown: Vec<InputReport> = reports.iter()
        .filter(|r| !settings.quiet || !r.is_ok())
        .cloned()
        .collect();
    match settings.format {
        OutputFormat::Text => {
            for r in &shown {
                writeln!(out, "{}", r)?;
            }
        }
        OutputFormat::Json => {
            let json = if reports.len() == 1 && shown.len() == 1 {
                shown[0].to_json()
            } else {
                report::to_json_array(&shown)
            };
            writeln!(out, "{}", json.map_err(anyhow::Error::msg)?)?;
        }
    }
    Ok(())
}

/// Run the command; returns the process exit code.
pub fn run(cli: Cli) -> Result<i32> {
    let config = match &cli.config {
        Some(path) => Config::load_from(path),
        None => Config::load(),
    };
    let settings = Settings::resolve(&cli, &config);
    log::debug!("settings: {:?}", settings);

    let paths = if cli.paths.is_empty() { vec![PathBuf::from("-")] } else { cli.paths.clone() };
    let (reports, failures) = check_all(&paths, settings.chunk_size);

    render(&mut std::io::stdout().lock(), &reports, &settings)?;
    for e in &failures {
        eprintln!("utf8vld: {:#}", e);
    }

    Ok(exit_code(&reports, failures.len()))
}

/// Check every input, collecting I/O failures instead of stopping at the first.
pub fn check_all(paths: &[PathBuf], chunk_size: usize) -> (Vec<InputReport>, Vec<anyhow::Error>) {
    let mut reports = Vec::with_capacity(paths.len());
    let mut failures = Vec::new();
    for path in paths {
        match check_path(path, chunk_size) {
            Ok(report) => reports.push(report),
            Err(e) => {
                log::error!("{:#}", e);
                failures.push(e);
            }
        }
    }
    (reports, failures)
}

/// I/O failures outrank malformed input.
pub fn exit_code(reports: &[InputReport], failures: usize) -> i32 {
    if failures > 0 {
        INTERNAL_ERROR
    } else if reports.iter().all(InputReport::is_ok) {
        SUCCESS
    } else {
        INVALID_INPUT
    }
}
