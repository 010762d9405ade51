//! Options that drive specifier rewriting.

use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use path_clean::PathClean;

use super::alias::AliasRules;
use crate::error::{Error, Result};

/// Caller-supplied rewrite hook: `(specifier, source_file) -> replacement`.
///
/// Returning `None` or an empty string falls through to the next rule.
pub type RewriteFn = dyn Fn(&str, &Path) -> Option<String> + Send + Sync;

/// Read-only rewriting options shared by every visited unit.
#[derive(Clone, Default)]
pub struct RewriteContext {
    base_url: Option<PathBuf>,
    project: Option<String>,
    rewrite: Option<Arc<RewriteFn>>,
    alias: AliasRules,
}

impl RewriteContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Absolute directory that relative specifiers are re-rooted from.
    pub fn with_base_url(mut self, base_url: impl Into<PathBuf>) -> Self {
        self.base_url = Some(base_url.into().clean());
        self
    }

    /// Prefix that replaces `base_url` in re-rooted specifiers.
    pub fn with_project(mut self, project: impl Into<String>) -> Self {
        self.project = Some(project.into());
        self
    }

    pub fn with_alias(mut self, alias: AliasRules) -> Self {
        self.alias = alias;
        self
    }

    pub fn with_rewrite<F>(mut self, rewrite: F) -> Self
    where
        F: Fn(&str, &Path) -> Option<String> + Send + Sync + 'static,
    {
        self.rewrite = Some(Arc::new(rewrite));
        self
    }

    pub fn base_url(&self) -> Option<&Path> {
        self.base_url.as_deref()
    }

    pub fn project(&self) -> Option<&str> {
        self.project.as_deref()
    }

    pub fn alias(&self) -> &AliasRules {
        &self.alias
    }

    /// Run the custom hook, treating an empty answer as no answer.
    pub fn custom_rewrite(&self, specifier: &str, source_file: &Path) -> Option<String> {
        let rewrite = self.rewrite.as_ref()?;
        rewrite(specifier, source_file).filter(|rewritten| !rewritten.is_empty())
    }

    /// True when no rule can ever fire, so units pass through untouched.
    pub fn is_passthrough(&self) -> bool {
        self.alias.is_empty()
            && self.rewrite.is_none()
            && (self.base_url.is_none() || self.project.is_none())
    }

    /// Reject option combinations that cannot produce meaningful output.
    pub fn validate(&self) -> Result<()> {
        if let Some(base_url) = &self.base_url {
            if !base_url.is_absolute() {
                return Err(Error::invalid_option(
                    "base_url",
                    format!("'{}' must be an absolute path", base_url.display()),
                ));
            }
        }
        if self.project.as_deref().is_some_and(str::is_empty) {
            return Err(Error::invalid_option("project", "must not be empty"));
        }
        Ok(())
    }
}

impl fmt::Debug for RewriteContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RewriteContext")
            .field("base_url", &self.base_url)
            .field("project", &self.project)
            .field("rewrite", &self.rewrite.as_ref().map(|_| "<fn>"))
            .field("alias", &self.alias)
            .finish()
    }
}
