//! One compilation: parse and check every input, then emit.

use std::borrow::Cow;
use std::fs;
use std::path::{Path, PathBuf};

use oxc_allocator::Allocator;
use oxc_codegen::Codegen;
use oxc_isolated_declarations::{IsolatedDeclarations, IsolatedDeclarationsOptions};
use oxc_semantic::SemanticBuilder;
use oxc_transformer::{TransformOptions, Transformer};
use tracing::debug;

use super::parser::{self, ParsedModule};
use super::pass::EmitPass;
use super::project::{ProjectConfig, is_declaration_file};
use crate::diagnostics::{DiagnosticRecord, codes};
use crate::rewrite::{SourceUnit, TransformedUnit};

struct SourceModule {
    path: PathBuf,
    text: String,
}

/// Result of [`Program::emit`].
#[derive(Debug, Default, Clone)]
pub struct EmitResult {
    /// Nothing was written because of `noEmit` or `noEmitOnError`
    pub emit_skipped: bool,
    pub diagnostics: Vec<DiagnosticRecord>,
    pub emitted_files: Vec<PathBuf>,
}

impl EmitResult {
    fn skipped() -> Self {
        Self {
            emit_skipped: true,
            ..Self::default()
        }
    }
}

/// Parsed and checked project inputs.
pub struct Program {
    project: ProjectConfig,
    modules: Vec<SourceModule>,
    diagnostics: Vec<DiagnosticRecord>,
}

impl Program {
    /// Read, parse and check every input file of `project`.
    pub fn build(project: ProjectConfig) -> Self {
        let mut diagnostics = project.errors.clone();
        let mut modules = Vec::with_capacity(project.file_names.len());

        for path in &project.file_names {
            match fs::read_to_string(path) {
                Ok(text) => {
                    diagnostics.extend(check_module(path, &text));
                    modules.push(SourceModule {
                        path: path.clone(),
                        text,
                    });
                }
                Err(err) => diagnostics.push(
                    DiagnosticRecord::error(
                        codes::FILE_NOT_FOUND,
                        format!("File '{}' could not be read: {err}", path.display()),
                    )
                    .with_file(path),
                ),
            }
        }

        debug!(
            modules = modules.len(),
            diagnostics = diagnostics.len(),
            "program built"
        );

        Self {
            project,
            modules,
            diagnostics,
        }
    }

    pub fn project(&self) -> &ProjectConfig {
        &self.project
    }

    /// Configuration, syntax and semantic diagnostics, in input order.
    pub fn pre_emit_diagnostics(&self) -> &[DiagnosticRecord] {
        &self.diagnostics
    }

    pub fn has_errors(&self) -> bool {
        self.diagnostics.iter().any(DiagnosticRecord::is_error)
    }

    /// Run `passes` over every unit and write JavaScript, plus declarations
    /// when `declaration` is enabled.
    pub fn emit(&self, passes: &[&dyn EmitPass]) -> EmitResult {
        let options = &self.project.options;
        if options.no_emit {
            debug!("noEmit is set, skipping emit");
            return EmitResult::skipped();
        }
        if options.no_emit_on_error && self.has_errors() {
            debug!("noEmitOnError is set and errors were found, skipping emit");
            return EmitResult::skipped();
        }

        let mut result = EmitResult::default();
        for module in &self.modules {
            if is_declaration_file(&module.path) {
                continue;
            }

            let code = run_passes(module, passes, &mut result.diagnostics);
            let output = generate(&module.path, &code, options.declaration);
            result.diagnostics.extend(output.diagnostics);

            let (js_ext, dts_ext) = output_extensions(&module.path);
            let js_path = self.output_path(&module.path, js_ext);
            if js_path == module.path {
                result.diagnostics.push(
                    DiagnosticRecord::error(
                        codes::EMIT,
                        format!(
                            "Cannot write file '{}' because it would overwrite input file",
                            js_path.display()
                        ),
                    )
                    .with_file(&module.path),
                );
                continue;
            }
            write_output(&js_path, &output.code, &mut result);

            if let Some(declaration) = output.declaration {
                let dts_path = self.output_path(&module.path, dts_ext);
                write_output(&dts_path, &declaration, &mut result);
            }
        }

        debug!(files = result.emitted_files.len(), "emit finished");
        result
    }

    fn output_path(&self, source: &Path, extension: &str) -> PathBuf {
        let target = match &self.project.options.out_dir {
            Some(out_dir) => {
                let relative = source
                    .strip_prefix(self.project.source_root())
                    .ok()
                    .or_else(|| source.file_name().map(Path::new))
                    .unwrap_or(source);
                out_dir.join(relative)
            }
            None => source.to_path_buf(),
        };
        target.with_extension(extension)
    }
}

fn check_module(path: &Path, text: &str) -> Vec<DiagnosticRecord> {
    let allocator = Allocator::default();
    let ParsedModule {
        program,
        mut diagnostics,
        panicked,
        ..
    } = parser::parse(&allocator, path, text);

    if !panicked {
        let ret = SemanticBuilder::new()
            .with_check_syntax_error(true)
            .build(&program);
        diagnostics.extend(ret.errors.iter().map(|err| {
            DiagnosticRecord::error(codes::SEMANTIC, err.to_string()).with_file(path)
        }));
    }

    diagnostics
}

/// Apply each pass in order, re-parsing between passes.
fn run_passes<'m>(
    module: &'m SourceModule,
    passes: &[&dyn EmitPass],
    diagnostics: &mut Vec<DiagnosticRecord>,
) -> Cow<'m, str> {
    let mut code: Cow<'m, str> = Cow::Borrowed(&module.text);

    for pass in passes {
        let outcome = {
            let allocator = Allocator::default();
            let parsed = parser::parse(&allocator, &module.path, &code);
            let unit = SourceUnit::new(&module.path, &code, &parsed.program);
            pass.run(&unit).map(TransformedUnit::into_changed_code)
        };

        match outcome {
            Ok(Some(next)) => code = Cow::Owned(next),
            Ok(None) => {}
            Err(err) => {
                debug!(pass = pass.name(), "{}", err);
                diagnostics.push(
                    DiagnosticRecord::error(
                        codes::REWRITE,
                        format!("Cannot resolve path outside project root: {}", err.source),
                    )
                    .with_file(&err.file)
                    .at_offset(&code, err.offset),
                );
            }
        }
    }

    code
}

struct ModuleOutput {
    code: String,
    declaration: Option<String>,
    diagnostics: Vec<DiagnosticRecord>,
}

/// Strip types and print JavaScript; print declarations first when asked.
fn generate(path: &Path, code: &str, declaration: bool) -> ModuleOutput {
    let allocator = Allocator::default();
    let ParsedModule {
        mut program,
        source_type,
        ..
    } = parser::parse(&allocator, path, code);
    let mut diagnostics = Vec::new();

    let declaration = if declaration && source_type.is_typescript() {
        let ret = IsolatedDeclarations::new(
            &allocator,
            IsolatedDeclarationsOptions {
                strip_internal: false,
            },
        )
        .build(&program);
        diagnostics.extend(ret.errors.iter().map(|err| {
            DiagnosticRecord::error(codes::DECLARATION, err.to_string()).with_file(path)
        }));
        Some(Codegen::new().build(&ret.program).code)
    } else {
        None
    };

    let scoping = SemanticBuilder::new()
        .build(&program)
        .semantic
        .into_scoping();
    let ret = Transformer::new(&allocator, path, &TransformOptions::default())
        .build_with_scoping(scoping, &mut program);
    diagnostics.extend(
        ret.errors
            .iter()
            .map(|err| DiagnosticRecord::error(codes::EMIT, err.to_string()).with_file(path)),
    );

    ModuleOutput {
        code: Codegen::new().build(&program).code,
        declaration,
        diagnostics,
    }
}

fn output_extensions(source: &Path) -> (&'static str, &'static str) {
    match source.extension().and_then(|ext| ext.to_str()) {
        Some("mts") => ("mjs", "d.mts"),
        Some("cts") => ("cjs", "d.cts"),
        _ => ("js", "d.ts"),
    }
}

fn write_output(path: &Path, contents: &str, result: &mut EmitResult) {
    let written = match path.parent() {
        Some(parent) => fs::create_dir_all(parent).and_then(|()| fs::write(path, contents)),
        None => fs::write(path, contents),
    };

    match written {
        Ok(()) => {
            debug!(file = %path.display(), "emitted");
            result.emitted_files.push(path.to_path_buf());
        }
        Err(err) => result.diagnostics.push(
            DiagnosticRecord::error(
                codes::EMIT,
                format!("Could not write file '{}': {err}", path.display()),
            )
            .with_file(path),
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_extensions() {
        assert_eq!(output_extensions(Path::new("a.ts")), ("js", "d.ts"));
        assert_eq!(output_extensions(Path::new("a.mts")), ("mjs", "d.mts"));
        assert_eq!(output_extensions(Path::new("a.cts")), ("cjs", "d.cts"));
    }

    #[test]
    fn test_generate_strips_types() {
        let output = generate(
            Path::new("a.ts"),
            "export const x: number = 1;\n",
            false,
        );
        assert!(output.diagnostics.is_empty());
        assert!(output.code.contains("export const x = 1"));
        assert!(output.declaration.is_none());
    }

    #[test]
    fn test_generate_declarations() {
        let output = generate(
            Path::new("a.ts"),
            "export function add(a: number, b: number): number { return a + b; }\n",
            true,
        );
        let declaration = output.declaration.unwrap();
        assert!(declaration.contains("export declare function add(a: number, b: number): number;"));
    }

    #[test]
    fn test_semantic_errors_are_reported() {
        let diagnostics = check_module(Path::new("a.ts"), "let a = 1;\nlet a = 2;\n");
        assert!(diagnostics.iter().any(|d| d.code == codes::SEMANTIC));
    }
}
