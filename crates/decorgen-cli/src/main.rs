//! protoc-gen-decorate
//!
//! protoc plugin emitting analytics and logging decorators for service
//! traits. Reads a `CodeGeneratorRequest` from stdin and writes a
//! `CodeGeneratorResponse` to stdout:
//!
//! ```text
//! protoc --decorate_out=kind=analytics,kind=logging:src/gen api/*.proto
//! ```
//!
//! Diagnostics go to stderr; set `DECORGEN_LOG=debug` for per-file output.

use anyhow::{Context, Result};
use clap::Parser;
use decorgen_core::{generate_response, VERSION};
use prost::Message;
use prost_types::compiler::{CodeGeneratorRequest, CodeGeneratorResponse};
use std::io::{self, Read, Write};
use std::process::ExitCode;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "protoc-gen-decorate")]
#[command(
    about = "protoc plugin generating analytics and logging decorators",
    disable_version_flag = true
)]
struct Cli {
    /// Print the plugin version and exit.
    #[arg(long)]
    version: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    if cli.version {
        println!("{VERSION}");
        return ExitCode::SUCCESS;
    }

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::builder()
                .with_default_directive(LevelFilter::WARN.into())
                .with_env_var("DECORGEN_LOG")
                .from_env_lossy(),
        )
        .with_writer(io::stderr)
        .with_target(false)
        .init();

    match run() {
        Ok(response) if response.error.is_none() => ExitCode::SUCCESS,
        Ok(_) => ExitCode::FAILURE,
        Err(err) => {
            tracing::error!(error = ?err, "protoc-gen-decorate failed");
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<CodeGeneratorResponse> {
    let mut buf = Vec::new();
    io::stdin()
        .read_to_end(&mut buf)
        .context("failed to read CodeGeneratorRequest from stdin")?;
    let request =
        CodeGeneratorRequest::decode(buf.as_slice()).context("failed to decode CodeGeneratorRequest")?;

    tracing::debug!(
        files = request.file_to_generate.len(),
        parameter = request.parameter.as_deref().unwrap_or(""),
        "received request"
    );
    let response = generate_response(&request);

    let mut out = Vec::new();
    response
        .encode(&mut out)
        .context("failed to encode CodeGeneratorResponse")?;
    let mut stdout = io::stdout().lock();
    stdout
        .write_all(&out)
        .and_then(|()| stdout.flush())
        .context("failed to write CodeGeneratorResponse to stdout")?;

    Ok(response)
}
