use crate::config::{Compiler, HushConfig, RewriteSettings};
use crate::error::{ConfigError, Result};
use indexmap::IndexSet;

impl HushConfig {
    /// Validate configuration before anything is compiled.
    ///
    /// An unknown compiler is a [`crate::error::CliError::CompilerNotFound`];
    /// everything else is a [`ConfigError::InvalidValue`]. Alias patterns are
    /// compiled later and fail as [`hush_core::Error::InvalidAlias`].
    pub fn validate(&self) -> Result<()> {
        self.compiler()?;
        self.rewrite.validate()
    }

    /// The requested compiler frontend.
    pub fn compiler(&self) -> Result<Compiler> {
        self.compiler.parse()
    }
}

impl RewriteSettings {
    pub fn validate(&self) -> Result<()> {
        if let Some(project) = &self.project {
            if project.trim().is_empty() {
                return Err(ConfigError::InvalidValue {
                    field: "rewrite.project".to_string(),
                    value: format!("{project:?}"),
                    hint: "Use a non-empty prefix such as \"@lib\"".to_string(),
                }
                .into());
            }
        }

        if let Some(base_url) = &self.base_url {
            if base_url.as_os_str().is_empty() {
                return Err(ConfigError::InvalidValue {
                    field: "rewrite.base_url".to_string(),
                    value: "\"\"".to_string(),
                    hint: "Remove the key to use compilerOptions.baseUrl".to_string(),
                }
                .into());
            }
        }

        let mut seen = IndexSet::new();
        for entry in &self.alias {
            if entry.pattern.is_empty() {
                return Err(ConfigError::InvalidValue {
                    field: "rewrite.alias.pattern".to_string(),
                    value: "\"\"".to_string(),
                    hint: "Alias patterns must match something, e.g. \"^@app/\"".to_string(),
                }
                .into());
            }
            if !seen.insert(entry.pattern.as_str()) {
                return Err(ConfigError::InvalidValue {
                    field: "rewrite.alias.pattern".to_string(),
                    value: entry.pattern.clone(),
                    hint: "Each alias pattern may appear only once; the first match always wins"
                        .to_string(),
                }
                .into());
            }
        }

        Ok(())
    }
}
