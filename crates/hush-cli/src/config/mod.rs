//! Configuration system for hush with multi-source loading.
//!
//! Merges settings from CLI args, environment variables and `hush.toml`.
//! Priority: CLI > Environment > File > Defaults

mod conversions;
mod defaults;
mod loading;
mod types;
mod validation;

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

pub use defaults::*;
pub use loading::CONFIG_FILE_NAME;
pub use types::*;

/// Hush configuration - loaded from hush.toml, `HUSH_*` variables or CLI args.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HushConfig {
    /// Path to the project's tsconfig.json
    #[serde(default = "default_project")]
    pub project: PathBuf,

    /// Compiler frontend name
    #[serde(default = "default_compiler")]
    pub compiler: String,

    /// Recompile on file changes
    #[serde(default)]
    pub watch: bool,

    /// Module specifier rewriting
    #[serde(default)]
    pub rewrite: RewriteSettings,
}

/// The `[rewrite]` table.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RewriteSettings {
    /// Directory relative specifiers are re-rooted from. Relative paths are
    /// resolved against the tsconfig directory. Defaults to
    /// `compilerOptions.baseUrl`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<PathBuf>,

    /// Prefix substituted for `base_url` (e.g. `@lib`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project: Option<String>,

    /// Alias rules, tried in order; the first match wins
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub alias: Vec<AliasEntry>,
}
