//! protoc-gen-tsdef library
//!
//! This crate provides the code generation logic for converting Protocol Buffer
//! message definitions into TypeScript interface declarations.

#![deny(warnings)]
#![deny(missing_docs)]

pub mod codegen;
pub mod generator;
pub mod location;
pub mod options;
pub mod types;

use prost_types::compiler::{CodeGeneratorRequest, CodeGeneratorResponse};
use thiserror::Error;

/// Errors that can occur during code generation
#[derive(Error, Debug)]
pub enum GeneratorError {
    /// Failed to decode the incoming CodeGeneratorRequest
    #[error("Decode error: {0}")]
    DecodeError(#[from] prost::DecodeError),

    /// Failed to encode the outgoing CodeGeneratorResponse
    #[error("Encode error: {0}")]
    EncodeError(#[from] prost::EncodeError),

    /// Reading the request or writing the response failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A file listed in `file_to_generate` has no descriptor in `proto_file`
    #[error("No descriptor for requested file: {0}")]
    MissingProtoFile(String),
}

/// Generate TypeScript interfaces from a protobuf CodeGeneratorRequest
///
/// This is the main entry point for the code generator.
pub fn generate(request: CodeGeneratorRequest) -> Result<CodeGeneratorResponse, GeneratorError> {
    generator::generate(request)
}

/// Generate TypeScript interfaces from raw CodeGeneratorRequest bytes
pub fn generate_from_bytes(bytes: &[u8]) -> Result<CodeGeneratorResponse, GeneratorError> {
    generator::generate_from_bytes(bytes)
}
