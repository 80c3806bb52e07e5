//! Plugin parameter parsing
//!
//! `protoc` forwards everything after `--tsdef_opt=` (or the part of
//! `--tsdef_out=` before the colon) as a single parameter string. The string
//! is a comma-separated list of `key=value` pairs; entries without a `=` are
//! ignored.
//!
//! No generation behavior currently depends on a parameter. The parsed
//! options are logged so that a misconfigured invocation is visible.

use std::fmt;

/// Parsed plugin parameters, in the order they were given
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PluginOptions {
    entries: Vec<(String, String)>,
}

impl PluginOptions {
    /// Parse the raw parameter string of a CodeGeneratorRequest
    pub fn parse(parameter: Option<&str>) -> Self {
        let Some(parameter) = parameter else {
            return Self::default();
        };

        let entries = parameter
            .split(',')
            .map(str::trim)
            .filter(|entry| !entry.is_empty())
            .filter_map(|entry| entry.split_once('='))
            .map(|(key, value)| (key.trim().to_string(), value.trim().to_string()))
            .collect();

        Self { entries }
    }
}

impl fmt::Display for PluginOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Parameters:")?;
        for (key, value) in &self.entries {
            writeln!(f, "{}: {}", key, value)?;
        }
        Ok(())
    }
}
