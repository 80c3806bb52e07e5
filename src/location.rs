//! Root message discovery from source code info
//!
//! `protoc` attaches a `SourceCodeInfo` to each file it asks a plugin to
//! generate. Every location record carries a path of field numbers and
//! indices leading from the `FileDescriptorProto` to the element it
//! describes, plus any comments attached to that element.
//!
//! Only root-level messages are of interest here: path `[4, i]` is the
//! `i`-th entry of `FileDescriptorProto.message_type`.

use prost_types::source_code_info::Location;
use prost_types::{DescriptorProto, FileDescriptorProto};

/// Field number of `message_type` in `FileDescriptorProto`
const FILE_MESSAGE_TYPE_FIELD: i32 = 4;

/// The location path shapes this generator distinguishes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LocationPath {
    /// `[4, index]`: a message declared at file scope
    FileMessage {
        /// Index into `FileDescriptorProto.message_type`
        index: usize,
    },
    /// Deeper than two elements: fields, nested types, enum values, ...
    Nested,
    /// Any other shallow path: syntax, package, imports, enums, services
    Other,
}

impl LocationPath {
    /// Classify a raw location path
    pub fn classify(path: &[i32]) -> Self {
        match path {
            [FILE_MESSAGE_TYPE_FIELD, index] => match usize::try_from(*index) {
                Ok(index) => LocationPath::FileMessage { index },
                Err(_) => LocationPath::Other,
            },
            p if p.len() > 2 => LocationPath::Nested,
            _ => LocationPath::Other,
        }
    }
}

/// A root message paired with its leading documentation comment
#[derive(Debug, Clone, PartialEq)]
pub struct MessageLocation<'a> {
    /// The message descriptor
    pub message: &'a DescriptorProto,
    /// Leading comment lines, verbatim
    pub comments: Vec<String>,
}

impl MessageLocation<'_> {
    /// Bare message name
    pub fn name(&self) -> &str {
        self.message.name()
    }
}

/// Extract root messages and their comments, in location order
pub fn extract(file: &FileDescriptorProto) -> Vec<MessageLocation<'_>> {
    let Some(info) = file.source_code_info.as_ref() else {
        tracing::debug!(file = file.name(), "no source code info");
        return Vec::new();
    };

    let mut locations = Vec::new();
    for location in &info.location {
        let index = match LocationPath::classify(&location.path) {
            LocationPath::FileMessage { index } => index,
            LocationPath::Nested | LocationPath::Other => continue,
        };

        let Some(message) = file.message_type.get(index) else {
            tracing::warn!(
                file = file.name(),
                index,
                "location refers to a missing message, skipping"
            );
            continue;
        };

        locations.push(MessageLocation {
            message,
            comments: leading_comment_lines(location),
        });
    }

    tracing::debug!(
        file = file.name(),
        messages = locations.len(),
        "extracted root messages"
    );
    locations
}

/// Split a location's leading comment into lines, dropping the last one
///
/// `protoc` terminates every comment line with a newline, so the final
/// element of the split is normally the empty remainder after the last
/// break. The last element is dropped whether or not it is empty. An
/// absent or empty comment yields no lines.
pub fn leading_comment_lines(location: &Location) -> Vec<String> {
    let text = location.leading_comments();
    let mut lines: Vec<String> = text.split('\n').map(str::to_string).collect();
    lines.pop();
    lines
}
