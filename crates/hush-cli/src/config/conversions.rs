// Conversions: hush.toml settings -> core rewrite types

use crate::config::{HushConfig, RewriteSettings};
use crate::error::Result;
use hush_core::{AliasRules, ProjectConfig, RewriteContext, RewritePass};

impl RewriteSettings {
    /// Compile the alias table, keeping file order.
    pub fn alias_rules(&self) -> Result<AliasRules> {
        let pairs = self
            .alias
            .iter()
            .map(|entry| (entry.pattern.as_str(), entry.replacement.as_str()));
        Ok(AliasRules::from_pairs(pairs)?)
    }

    /// Build the rewrite context for `project`.
    ///
    /// `base_url` falls back to `compilerOptions.baseUrl`; a relative value is
    /// resolved against the tsconfig directory.
    pub fn to_context(&self, project: &ProjectConfig) -> Result<RewriteContext> {
        let mut context = RewriteContext::new().with_alias(self.alias_rules()?);

        let base_url = match &self.base_url {
            Some(base_url) => Some(project.root.join(base_url)),
            None => project.options.base_url.clone(),
        };
        if let Some(base_url) = base_url {
            context = context.with_base_url(base_url);
        }
        if let Some(prefix) = &self.project {
            context = context.with_project(prefix.clone());
        }

        Ok(context)
    }
}

impl HushConfig {
    /// The specifier rewriting pass for `project`.
    pub fn rewrite_pass(&self, project: &ProjectConfig) -> Result<RewritePass> {
        Ok(RewritePass::new(self.rewrite.to_context(project)?)?)
    }
}
