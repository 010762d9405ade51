use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::CliError;

/// One `[[rewrite.alias]]` entry.
///
/// `pattern` is a case-insensitive regular expression; `replacement` may use
/// capture groups (`$1`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AliasEntry {
    pub pattern: String,
    pub replacement: String,
}

impl AliasEntry {
    pub fn new(pattern: impl Into<String>, replacement: impl Into<String>) -> Self {
        Self {
            pattern: pattern.into(),
            replacement: replacement.into(),
        }
    }
}

/// Compiler frontends hush can drive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Compiler {
    /// oxc parser, semantic checker, transformer and declaration emitter
    Oxc,
}

impl Compiler {
    pub const ALL: &'static [Compiler] = &[Compiler::Oxc];

    pub fn name(self) -> &'static str {
        match self {
            Compiler::Oxc => "oxc",
        }
    }

    fn available() -> String {
        Self::ALL
            .iter()
            .map(|compiler| compiler.name())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl fmt::Display for Compiler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Compiler {
    type Err = CliError;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|compiler| compiler.name().eq_ignore_ascii_case(name.trim()))
            .ok_or_else(|| CliError::CompilerNotFound {
                name: name.to_string(),
                hint: format!("Available compilers: {}", Self::available()),
            })
    }
}
