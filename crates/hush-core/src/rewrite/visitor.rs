//! Tree visitor that finds module specifiers and produces rewritten units.
//!
//! The visitor is read-only over the oxc AST. It collects every specifier
//! literal that the rewrite rule changes, then splices replacement literals
//! into the unit's source text. Units with no rewrites come back borrowed,
//! sharing the original text.

use std::borrow::Cow;
use std::path::{Path, PathBuf};

use oxc_allocator::Allocator;
use oxc_ast::ast::{
    ExportAllDeclaration, ExportNamedDeclaration, Expression, ImportDeclaration, ImportExpression,
    Program, StringLiteral, TSImportType,
};
use oxc_ast_visit::{Visit, walk};
use oxc_span::Span;
use tracing::{debug, trace};

use super::context::RewriteContext;
use super::rule::rewrite_path;
use crate::error::TransformError;
use crate::frontend::parser;

/// Which syntactic form carried a specifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReferenceKind {
    /// `import ... from "x"`
    ImportDeclaration,
    /// `export ... from "x"` and `export * from "x"`
    ExportDeclaration,
    /// `import("x")`
    DynamicImport,
    /// `import("x")` in type position
    ImportType,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Quote {
    Single,
    Double,
}

impl Quote {
    fn of(raw: &str) -> Self {
        if raw.starts_with('\'') { Self::Single } else { Self::Double }
    }

    pub fn as_char(self) -> char {
        match self {
            Self::Single => '\'',
            Self::Double => '"',
        }
    }
}

/// A module specifier literal found in a unit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportReference {
    kind: ReferenceKind,
    /// Span of the literal including its quotes
    span: Span,
    specifier: String,
    quote: Quote,
}

impl ImportReference {
    /// Read the specifier from the literal's source text, quotes stripped.
    fn from_literal(kind: ReferenceKind, span: Span, source_text: &str) -> Option<Self> {
        let raw = source_text.get(span.start as usize..span.end as usize)?;
        if raw.len() < 2 {
            return None;
        }
        let specifier = raw.get(1..raw.len() - 1)?;
        Some(Self {
            kind,
            span,
            specifier: specifier.to_string(),
            quote: Quote::of(raw),
        })
    }

    /// Use the parser's decoded value, keeping the source quote style.
    fn from_value(kind: ReferenceKind, span: Span, value: &str, source_text: &str) -> Self {
        let raw = source_text
            .get(span.start as usize..span.end as usize)
            .unwrap_or_default();
        Self {
            kind,
            span,
            specifier: value.to_string(),
            quote: Quote::of(raw),
        }
    }

    pub fn kind(&self) -> ReferenceKind {
        self.kind
    }

    pub fn span(&self) -> Span {
        self.span
    }

    pub fn specifier(&self) -> &str {
        &self.specifier
    }

    pub fn quote(&self) -> Quote {
        self.quote
    }

    /// Copy of this reference with a different specifier.
    pub fn with_specifier(&self, specifier: impl Into<String>) -> Self {
        Self {
            specifier: specifier.into(),
            ..self.clone()
        }
    }

    /// Source text of the literal, quoted and escaped.
    pub fn to_literal(&self) -> String {
        let quote = self.quote.as_char();
        let mut literal = String::with_capacity(self.specifier.len() + 2);
        literal.push(quote);
        for ch in self.specifier.chars() {
            match ch {
                '\\' => literal.push_str("\\\\"),
                '\n' => literal.push_str("\\n"),
                '\r' => literal.push_str("\\r"),
                ch if ch == quote => {
                    literal.push('\\');
                    literal.push(ch);
                }
                ch => literal.push(ch),
            }
        }
        literal.push(quote);
        literal
    }
}

/// A specifier before and after rewriting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rewrite {
    pub original: ImportReference,
    pub rewritten: ImportReference,
}

/// A parsed unit handed to the visitor.
///
/// `'s` is the lifetime of the source text, which rewritten output may borrow.
pub struct SourceUnit<'s, 'p, 'a> {
    path: &'p Path,
    source_text: &'s str,
    program: &'p Program<'a>,
}

impl<'s, 'p, 'a> SourceUnit<'s, 'p, 'a> {
    pub fn new(path: &'p Path, source_text: &'s str, program: &'p Program<'a>) -> Self {
        Self {
            path,
            source_text,
            program,
        }
    }

    pub fn path(&self) -> &'p Path {
        self.path
    }

    pub fn source_text(&self) -> &'s str {
        self.source_text
    }

    pub fn program(&self) -> &'p Program<'a> {
        self.program
    }
}

/// Output of [`transform`].
#[derive(Debug, Clone)]
pub struct TransformedUnit<'u> {
    path: PathBuf,
    code: Cow<'u, str>,
    rewrites: Vec<Rewrite>,
}

impl<'u> TransformedUnit<'u> {
    fn unchanged(unit: &SourceUnit<'u, '_, '_>) -> Self {
        Self {
            path: unit.path().to_path_buf(),
            code: Cow::Borrowed(unit.source_text()),
            rewrites: Vec::new(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn code(&self) -> &str {
        &self.code
    }

    pub fn rewrites(&self) -> &[Rewrite] {
        &self.rewrites
    }

    /// True when at least one specifier changed.
    pub fn is_changed(&self) -> bool {
        matches!(self.code, Cow::Owned(_))
    }

    /// The rewritten text, or `None` when the unit is unchanged.
    pub fn into_changed_code(self) -> Option<String> {
        match self.code {
            Cow::Owned(code) => Some(code),
            Cow::Borrowed(_) => None,
        }
    }
}

/// Rewrite every module specifier in `unit`.
///
/// Visits import and export declarations, dynamic imports with a string
/// literal argument, and import types. A rewritten node is not descended into.
/// Stops at the first specifier the rule rejects.
pub fn transform<'u>(
    unit: &SourceUnit<'u, '_, '_>,
    context: &RewriteContext,
) -> Result<TransformedUnit<'u>, TransformError> {
    if context.is_passthrough() {
        return Ok(TransformedUnit::unchanged(unit));
    }

    let mut collector = SpecifierCollector::new(unit.source_text(), unit.path(), context);
    collector.visit_program(unit.program());
    let mut rewrites = collector.finish()?;

    if rewrites.is_empty() {
        trace!(file = %unit.path().display(), "no specifiers rewritten");
        return Ok(TransformedUnit::unchanged(unit));
    }

    rewrites.sort_by_key(|rewrite| rewrite.original.span.start);
    debug!(
        file = %unit.path().display(),
        count = rewrites.len(),
        "rewrote module specifiers"
    );

    Ok(TransformedUnit {
        path: unit.path().to_path_buf(),
        code: Cow::Owned(splice(unit.source_text(), &rewrites)),
        rewrites,
    })
}

/// Parse `source_text` and [`transform`] it.
pub fn transform_source<'s>(
    path: &Path,
    source_text: &'s str,
    context: &RewriteContext,
) -> Result<TransformedUnit<'s>, TransformError> {
    let allocator = Allocator::default();
    let parsed = parser::parse(&allocator, path, source_text);
    let unit = SourceUnit::new(path, source_text, &parsed.program);
    transform(&unit, context)
}

fn splice(source_text: &str, rewrites: &[Rewrite]) -> String {
    let mut code = String::with_capacity(source_text.len());
    let mut cursor = 0;
    for rewrite in rewrites {
        let span = rewrite.original.span;
        code.push_str(&source_text[cursor..span.start as usize]);
        code.push_str(&rewrite.rewritten.to_literal());
        cursor = span.end as usize;
    }
    code.push_str(&source_text[cursor..]);
    code
}

struct SpecifierCollector<'s, 'c> {
    source_text: &'s str,
    source_path: &'s Path,
    context: &'c RewriteContext,
    rewrites: Vec<Rewrite>,
    error: Option<TransformError>,
}

impl<'s, 'c> SpecifierCollector<'s, 'c> {
    fn new(source_text: &'s str, source_path: &'s Path, context: &'c RewriteContext) -> Self {
        Self {
            source_text,
            source_path,
            context,
            rewrites: Vec::new(),
            error: None,
        }
    }

    fn finish(self) -> Result<Vec<Rewrite>, TransformError> {
        match self.error {
            Some(err) => Err(err),
            None => Ok(self.rewrites),
        }
    }

    fn consider_literal(&mut self, kind: ReferenceKind, literal: &StringLiteral<'_>) -> bool {
        match ImportReference::from_literal(kind, literal.span, self.source_text) {
            Some(reference) => self.consider(reference),
            None => false,
        }
    }

    /// Apply the rule to `reference`; true if it was rewritten.
    fn consider(&mut self, reference: ImportReference) -> bool {
        if self.error.is_some() {
            return false;
        }

        let outcome = rewrite_path(reference.specifier(), self.source_path, self.context)
            .map(|rewritten| match rewritten {
                Cow::Owned(rewritten) => Some(rewritten),
                Cow::Borrowed(_) => None,
            });

        match outcome {
            Ok(Some(rewritten)) if rewritten != reference.specifier() => {
                trace!(from = reference.specifier(), to = %rewritten, "rewrite specifier");
                let rewritten = reference.with_specifier(rewritten);
                self.rewrites.push(Rewrite {
                    original: reference,
                    rewritten,
                });
                true
            }
            Ok(_) => false,
            Err(source) => {
                self.error = Some(TransformError {
                    file: self.source_path.to_path_buf(),
                    offset: reference.span.start,
                    source,
                });
                false
            }
        }
    }
}

impl<'a> Visit<'a> for SpecifierCollector<'_, '_> {
    fn visit_import_declaration(&mut self, it: &ImportDeclaration<'a>) {
        if !self.consider_literal(ReferenceKind::ImportDeclaration, &it.source) {
            walk::walk_import_declaration(self, it);
        }
    }

    fn visit_export_named_declaration(&mut self, it: &ExportNamedDeclaration<'a>) {
        let rewritten = match &it.source {
            Some(source) => self.consider_literal(ReferenceKind::ExportDeclaration, source),
            None => false,
        };
        if !rewritten {
            walk::walk_export_named_declaration(self, it);
        }
    }

    fn visit_export_all_declaration(&mut self, it: &ExportAllDeclaration<'a>) {
        if !self.consider_literal(ReferenceKind::ExportDeclaration, &it.source) {
            walk::walk_export_all_declaration(self, it);
        }
    }

    fn visit_import_expression(&mut self, it: &ImportExpression<'a>) {
        let rewritten = match &it.source {
            Expression::StringLiteral(literal) => {
                self.consider_literal(ReferenceKind::DynamicImport, literal)
            }
            _ => false,
        };
        if !rewritten {
            walk::walk_import_expression(self, it);
        }
    }

    fn visit_ts_import_type(&mut self, it: &TSImportType<'a>) {
        let reference = ImportReference::from_value(
            ReferenceKind::ImportType,
            it.source.span,
            it.source.value.as_str(),
            self.source_text,
        );
        if !self.consider(reference) {
            walk::walk_ts_import_type(self, it);
        }
    }
}
