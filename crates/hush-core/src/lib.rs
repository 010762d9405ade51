//! # hush-core
//!
//! Core library behind the `hush` compiler wrapper.
//!
//! Two independent concerns live here:
//!
//! - [`rewrite`] walks every emitted unit and rewrites module specifiers in
//!   import/export declarations, dynamic imports and import types. Rules are
//!   applied in priority order: alias table, custom callback, then base-URL
//!   re-rooting of relative specifiers.
//! - [`diagnostics`] and [`watch`] turn the frontend's diagnostic stream into a
//!   non-fatal report. Every diagnostic is printed and counted, and the process
//!   never fails because of them.
//!
//! The [`frontend`] module wraps the oxc toolchain as the compiler: it reads the
//! project configuration, parses and checks sources, and emits JavaScript (plus
//! declarations when requested) through a list of [`frontend::EmitPass`]es.
//!
//! ## Example
//!
//! ```rust,no_run
//! use std::path::Path;
//! use hush_core::rewrite::{AliasRules, RewriteContext, rewrite_path};
//!
//! let alias = AliasRules::from_pairs([("^@app/(.*)$", "./src/$1")]).unwrap();
//! let context = RewriteContext::new().with_alias(alias);
//!
//! let rewritten = rewrite_path("@app/util", Path::new("/repo/src/a.ts"), &context).unwrap();
//! assert_eq!(rewritten, "./src/util");
//! ```

pub mod compile;
pub mod diagnostics;
pub mod error;
pub mod frontend;
pub mod rewrite;
pub mod watch;

pub use compile::{CompileOutcome, compile_once, emit_blocked_warning};
pub use diagnostics::{DiagnosticAggregator, DiagnosticCategory, DiagnosticRecord, FormatOptions};
pub use error::{Error, Result, RewriteError, TransformError};
pub use frontend::{CompilerOptions, EmitPass, EmitResult, Program, ProjectConfig};
pub use rewrite::{AliasRules, RewriteContext, RewritePass, rewrite_path, transform};
pub use watch::{WatchHooks, WatchPhase, WatchSession, WatchStatusCodes};
