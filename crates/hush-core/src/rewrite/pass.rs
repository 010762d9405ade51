use super::context::RewriteContext;
use super::visitor::{SourceUnit, TransformedUnit, transform};
use crate::error::{Result, TransformError};
use crate::frontend::EmitPass;

/// Emit pass that rewrites module specifiers before code generation.
#[derive(Debug, Clone)]
pub struct RewritePass {
    context: RewriteContext,
}

impl RewritePass {
    /// Validate `context` and wrap it as a pass.
    pub fn new(context: RewriteContext) -> Result<Self> {
        context.validate()?;
        Ok(Self { context })
    }

    pub fn context(&self) -> &RewriteContext {
        &self.context
    }
}

impl EmitPass for RewritePass {
    fn name(&self) -> &'static str {
        "rewrite-specifiers"
    }

    fn run<'s>(
        &self,
        unit: &SourceUnit<'s, '_, '_>,
    ) -> std::result::Result<TransformedUnit<'s>, TransformError> {
        transform(unit, &self.context)
    }
}
