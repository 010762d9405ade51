//! Module specifier rewriting.
//!
//! [`rewrite_path`] is the pure per-specifier rule, [`transform`] applies it
//! to a whole parsed unit, and [`RewritePass`] plugs it into emission.

mod alias;
mod context;
mod pass;
mod rule;
mod visitor;

pub use alias::{AliasRule, AliasRules};
pub use context::{RewriteContext, RewriteFn};
pub use pass::RewritePass;
pub use rule::rewrite_path;
pub use visitor::{
    ImportReference, Quote, ReferenceKind, Rewrite, SourceUnit, TransformedUnit, transform,
    transform_source,
};
