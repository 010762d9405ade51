//! Compiler frontend backed by the oxc toolchain.
//!
//! - [`ProjectConfig`] reads `tsconfig.json` into options and input files
//! - [`Program`] parses and checks the inputs, then emits through [`EmitPass`]es
//! - [`WatchProgram`] repeats that per cycle and reports via [`WatchReporter`](crate::watch::WatchReporter)

pub mod parser;

mod pass;
mod program;
mod project;
mod watch;

pub use pass::EmitPass;
pub use program::{EmitResult, Program};
pub use project::{CompilerOptions, ProjectConfig};
pub use watch::{CycleTrigger, WatchProgram};
