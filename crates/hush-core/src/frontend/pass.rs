use crate::error::TransformError;
use crate::rewrite::{SourceUnit, TransformedUnit};

/// A source-to-source pass run on every unit before code generation.
///
/// Passes run in order; each sees the output of the previous one. A failing
/// pass is reported as an emit diagnostic and the unit is emitted as it was
/// before that pass.
pub trait EmitPass: Send + Sync {
    /// Name used in logs
    fn name(&self) -> &'static str;

    fn run<'s>(&self, unit: &SourceUnit<'s, '_, '_>) -> Result<TransformedUnit<'s>, TransformError>;
}
