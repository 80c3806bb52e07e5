//! Request-level driver
//!
//! Walks `file_to_generate` in request order, extracts root messages from
//! each file's source code info, and emits one TypeScript file per entry.

use crate::codegen;
use crate::location::{self, MessageLocation};
use crate::options::PluginOptions;
use crate::GeneratorError;
use prost::Message;
use prost_types::compiler::code_generator_response::Feature;
use prost_types::compiler::{CodeGeneratorRequest, CodeGeneratorResponse};
use prost_types::FileDescriptorProto;

/// Decode a CodeGeneratorRequest from raw bytes and generate the response
pub fn generate_from_bytes(bytes: &[u8]) -> Result<CodeGeneratorResponse, GeneratorError> {
    let request = CodeGeneratorRequest::decode(bytes)?;
    generate(request)
}

/// Generate one TypeScript file per requested proto file
pub fn generate(request: CodeGeneratorRequest) -> Result<CodeGeneratorResponse, GeneratorError> {
    let options = PluginOptions::parse(request.parameter.as_deref());
    tracing::debug!("{}", options);

    // Extraction for every requested file happens before any emission
    let extracted = extract_requested(&request)?;

    let file = extracted
        .iter()
        .map(|(name, messages)| codegen::emit(name, messages))
        .collect();

    Ok(CodeGeneratorResponse {
        file,
        supported_features: Some(Feature::Proto3Optional as u64),
        ..Default::default()
    })
}

/// Root messages of each requested file, in `file_to_generate` order
///
/// A file listed more than once is extracted only at its first position.
pub fn extract_requested(
    request: &CodeGeneratorRequest,
) -> Result<Vec<(&str, Vec<MessageLocation<'_>>)>, GeneratorError> {
    let mut extracted: Vec<(&str, Vec<MessageLocation<'_>>)> = Vec::new();
    for name in &request.file_to_generate {
        if extracted.iter().any(|(seen, _)| *seen == name.as_str()) {
            tracing::debug!(file = name.as_str(), "file requested twice, skipping");
            continue;
        }
        let file = find_proto_file(request, name)?;
        extracted.push((name.as_str(), location::extract(file)));
    }
    Ok(extracted)
}

/// Look up a descriptor by file name
fn find_proto_file<'a>(
    request: &'a CodeGeneratorRequest,
    name: &str,
) -> Result<&'a FileDescriptorProto, GeneratorError> {
    request
        .proto_file
        .iter()
        .find(|file| file.name() == name)
        .ok_or_else(|| GeneratorError::MissingProtoFile(name.to_string()))
}
