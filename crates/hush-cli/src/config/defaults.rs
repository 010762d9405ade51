use std::path::PathBuf;

use super::types::Compiler;

/// Default project file, relative to the working directory.
pub fn default_project() -> PathBuf {
    PathBuf::from("tsconfig.json")
}

pub fn default_compiler() -> String {
    Compiler::Oxc.name().to_string()
}
