//! protoc-gen-tsdef - A protoc plugin for generating TypeScript interfaces
//!
//! This binary reads a CodeGeneratorRequest from stdin and writes a
//! CodeGeneratorResponse to stdout, following the protoc plugin protocol.

use prost::Message;
use std::io::{self, Read, Write};
use tracing_subscriber::EnvFilter;

/// Environment variable holding the log filter directives
const LOG_ENV: &str = "PROTOC_GEN_TSDEF_LOG";

fn main() {
    init_logging();

    if let Err(e) = run() {
        eprintln!("protoc-gen-tsdef: {}", e);
        std::process::exit(1);
    }
}

/// Install a stderr subscriber; stdout is reserved for the response.
fn init_logging() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_ansi(false)
        .init();
}

fn run() -> Result<(), protoc_gen_tsdef::GeneratorError> {
    // Read raw bytes from stdin
    let mut buf = Vec::new();
    io::stdin().read_to_end(&mut buf)?;

    let response = protoc_gen_tsdef::generate_from_bytes(&buf)?;

    tracing::debug!(files = response.file.len(), "generated response");
    for f in &response.file {
        tracing::debug!(name = f.name.as_deref().unwrap_or("<unnamed>"), "output file");
    }

    // Write CodeGeneratorResponse to stdout
    let mut out = Vec::with_capacity(response.encoded_len());
    response.encode(&mut out)?;
    let mut stdout = io::stdout().lock();
    stdout.write_all(&out)?;
    stdout.flush()?;

    Ok(())
}
