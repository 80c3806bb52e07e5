//! Code generation for TypeScript declaration files
//!
//! Each requested `.proto` file becomes one `.ts` file holding an
//! `export interface` per root message.

pub mod interface;

use crate::location::MessageLocation;
use prost_types::compiler::code_generator_response::File;

/// Extension of protobuf schema files
const PROTO_EXTENSION: &str = ".proto";

/// Extension of generated TypeScript files
const TS_EXTENSION: &str = ".ts";

/// Derive the output file name from a schema file name
///
/// `foo/bar.proto` becomes `foo/bar.ts`. Names without a `.proto` suffix
/// get `.ts` appended.
pub fn output_file_name(file_name: &str) -> String {
    let stem = file_name.strip_suffix(PROTO_EXTENSION).unwrap_or(file_name);
    format!("{}{}", stem, TS_EXTENSION)
}

/// Generate the TypeScript file for one schema file
pub fn emit(file_name: &str, messages: &[MessageLocation<'_>]) -> File {
    let plan = interface::plan(messages);

    for collision in &plan.collisions {
        tracing::warn!(
            file = file_name,
            name = %collision.name,
            declared_in = ?collision.declared_in,
            "interface name declared more than once"
        );
    }

    let content = interface::render(file_name, &plan);
    let name = output_file_name(file_name);
    tracing::debug!(source = file_name, output = %name, "created file");

    File {
        name: Some(name),
        content: Some(content),
        ..Default::default()
    }
}
