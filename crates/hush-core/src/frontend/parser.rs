//! Parser façade over `oxc_parser`.

use std::path::Path;

use oxc_allocator::Allocator;
use oxc_ast::ast::Program;
use oxc_parser::Parser;
use oxc_span::SourceType;

use crate::diagnostics::{DiagnosticRecord, codes};

/// A parsed module and its syntax diagnostics.
pub struct ParsedModule<'a> {
    pub program: Program<'a>,
    pub source_type: SourceType,
    pub diagnostics: Vec<DiagnosticRecord>,
    /// The parser gave up; `program` is empty
    pub panicked: bool,
}

/// Detect the source type from the file extension, defaulting to an ES module.
pub fn source_type_for(path: &Path) -> SourceType {
    SourceType::from_path(path).unwrap_or(SourceType::mjs())
}

/// Parse `source_text`. Syntax errors are returned as diagnostics, never as `Err`.
pub fn parse<'a>(allocator: &'a Allocator, path: &Path, source_text: &'a str) -> ParsedModule<'a> {
    let source_type = source_type_for(path);
    let ret = Parser::new(allocator, source_text, source_type).parse();

    let diagnostics = ret
        .errors
        .iter()
        .map(|err| DiagnosticRecord::error(codes::SYNTAX, err.to_string()).with_file(path))
        .collect();

    ParsedModule {
        program: ret.program,
        source_type,
        diagnostics,
        panicked: ret.panicked,
    }
}
