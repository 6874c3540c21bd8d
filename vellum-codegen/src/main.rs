//! Vellum configuration compiler
//!
//! Reads a TOML document declaring display buffers and writes the runtime
//! setup code for them, either as C++ statements or as an encoded program
//! for downstream generators.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use tracing::{error, info, Level};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};
use vellum_codegen::{load_file, LoadError};
use vellum_emit::{encode, EmitProgram};

/// Compile display buffer configuration into runtime setup code
#[derive(Parser, Debug)]
#[command(name = "vellum-codegen")]
#[command(about = "Compile display buffer configuration into runtime setup code")]
struct Args {
    /// Configuration document (TOML)
    config: PathBuf,

    /// Output form
    #[arg(long, value_enum, default_value_t = EmitFormat::Cpp)]
    emit: EmitFormat,

    /// Write to this file instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum EmitFormat {
    /// C++ statements
    Cpp,
    /// Encoded emit programs
    Binary,
}

fn main() -> Result<ExitCode> {
    let args = Args::parse();
    init_tracing(args.verbose);

    info!("compiling {}", args.config.display());
    let programs = match load_file(&args.config) {
        Ok(programs) => programs,
        Err(LoadError::Invalid(errors)) => {
            error!("{} has {} invalid entries", args.config.display(), errors.len());
            eprintln!("{}", errors.report());
            return Ok(ExitCode::FAILURE);
        }
        Err(e) => {
            return Err(e).with_context(|| format!("failed to load {}", args.config.display()))
        }
    };

    match args.emit {
        EmitFormat::Cpp => write_output(args.output.as_deref(), render_all(&programs).as_bytes())?,
        EmitFormat::Binary => {
            let output = args
                .output
                .as_deref()
                .context("--emit binary requires --output")?;
            let bytes = encode(&programs).context("failed to encode emit programs")?;
            write_output(Some(output), &bytes)?;
        }
    }

    Ok(ExitCode::SUCCESS)
}

fn render_all(programs: &[EmitProgram]) -> String {
    programs
        .iter()
        .map(|p| p.render())
        .collect::<Vec<_>>()
        .join("\n")
}

fn write_output(path: Option<&Path>, bytes: &[u8]) -> Result<()> {
    match path {
        Some(path) => {
            fs::write(path, bytes).with_context(|| format!("failed to write {}", path.display()))?;
            info!("wrote {} bytes to {}", bytes.len(), path.display());
        }
        None => io::stdout()
            .lock()
            .write_all(bytes)
            .context("failed to write to stdout")?,
    }
    Ok(())
}

fn init_tracing(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::INFO };
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        format!("vellum_codegen={}", level).into()
    });

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt::layer().with_target(false).with_writer(io::stderr))
        .init();
}
