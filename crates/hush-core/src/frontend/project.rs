//! Project configuration (`tsconfig.json`) loading.
//!
//! The file may contain comments and trailing commas. Parse problems become
//! diagnostics on the returned [`ProjectConfig`] rather than errors; only an
//! unreadable file is an `Err`.

use std::fs;
use std::path::{Path, PathBuf};

use ignore::WalkBuilder;
use ignore::overrides::OverrideBuilder;
use path_clean::PathClean;
use serde::Deserialize;
use tracing::{debug, warn};

use crate::diagnostics::{DiagnosticRecord, codes};
use crate::error::{Error, Result};

const DEFAULT_EXCLUDES: &[&str] = &["node_modules", "bower_components", "jspm_packages"];
const TS_EXTENSIONS: &[&str] = &["ts", "tsx", "mts", "cts"];
const JS_EXTENSIONS: &[&str] = &["js", "jsx", "mjs", "cjs"];

/// The subset of `compilerOptions` the frontend understands.
///
/// Paths are absolute once loaded through [`ProjectConfig`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CompilerOptions {
    pub out_dir: Option<PathBuf>,
    pub root_dir: Option<PathBuf>,
    pub base_url: Option<PathBuf>,
    pub declaration: bool,
    pub no_emit: bool,
    pub no_emit_on_error: bool,
    pub allow_js: bool,
}

impl CompilerOptions {
    fn resolve_paths(mut self, root: &Path) -> Self {
        let absolute = |path: PathBuf| root.join(path).clean();
        self.out_dir = self.out_dir.map(absolute);
        self.root_dir = self.root_dir.map(absolute);
        self.base_url = self.base_url.map(absolute);
        self
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct RawProject {
    compiler_options: CompilerOptions,
    files: Option<Vec<String>>,
    include: Option<Vec<String>>,
    exclude: Option<Vec<String>>,
}

/// A parsed project: options, input files and configuration diagnostics.
#[derive(Debug, Clone)]
pub struct ProjectConfig {
    pub config_path: PathBuf,
    /// Directory containing the configuration file
    pub root: PathBuf,
    pub options: CompilerOptions,
    pub file_names: Vec<PathBuf>,
    pub errors: Vec<DiagnosticRecord>,
}

impl ProjectConfig {
    /// Read and parse the configuration file at `config_path`.
    pub fn load(config_path: &Path) -> Result<Self> {
        let config_path = std::path::absolute(config_path)
            .map_err(|source| Error::io(config_path, source))?
            .clean();
        let text =
            fs::read_to_string(&config_path).map_err(|source| Error::io(&config_path, source))?;
        Ok(Self::parse(&config_path, &text))
    }

    /// Parse configuration text. `config_path` should be absolute.
    pub fn parse(config_path: &Path, text: &str) -> Self {
        let root = config_path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_default();
        let mut errors = Vec::new();

        let raw = match serde_json::from_str::<RawProject>(&strip_json_comments(text)) {
            Ok(raw) => Some(raw),
            Err(err) => {
                errors.push(
                    DiagnosticRecord::error(
                        codes::CONFIG,
                        format!("Failed to parse project configuration: {err}"),
                    )
                    .with_file(config_path)
                    .with_position(
                        u32::try_from(err.line()).unwrap_or(u32::MAX),
                        u32::try_from(err.column()).unwrap_or(u32::MAX),
                    ),
                );
                None
            }
        };

        let (options, file_names) = match raw {
            Some(raw) => {
                let options = raw.compiler_options.clone().resolve_paths(&root);
                let file_names = match collect_files(&root, &raw, &options) {
                    Ok(files) => files,
                    Err(message) => {
                        errors.push(
                            DiagnosticRecord::error(codes::CONFIG, message).with_file(config_path),
                        );
                        Vec::new()
                    }
                };
                (options, file_names)
            }
            None => (CompilerOptions::default(), Vec::new()),
        };

        if file_names.is_empty() && errors.is_empty() {
            errors.push(
                DiagnosticRecord::error(
                    codes::NO_INPUTS,
                    format!(
                        "No inputs were found in config file '{}'",
                        config_path.display()
                    ),
                )
                .with_file(config_path),
            );
        }

        debug!(
            config = %config_path.display(),
            files = file_names.len(),
            "loaded project configuration"
        );

        Self {
            config_path: config_path.to_path_buf(),
            root,
            options,
            file_names,
            errors,
        }
    }

    /// Directory emitted files are laid out relative to.
    pub fn source_root(&self) -> &Path {
        self.options.root_dir.as_deref().unwrap_or(&self.root)
    }
}

fn collect_files(
    root: &Path,
    raw: &RawProject,
    options: &CompilerOptions,
) -> std::result::Result<Vec<PathBuf>, String> {
    let mut files: Vec<PathBuf> = raw
        .files
        .iter()
        .flatten()
        .map(|file| root.join(file).clean())
        .collect();

    let include: Vec<&str> = match (&raw.include, &raw.files) {
        (Some(include), _) => include.iter().map(String::as_str).collect(),
        (None, Some(_)) => Vec::new(),
        (None, None) => vec!["**/*"],
    };

    if !include.is_empty() {
        let mut overrides = OverrideBuilder::new(root);
        for pattern in &include {
            overrides
                .add(&include_glob(root, pattern))
                .map_err(|err| format!("Invalid include pattern '{pattern}': {err}"))?;
        }

        let mut excludes: Vec<String> = match &raw.exclude {
            Some(exclude) => exclude.clone(),
            None => DEFAULT_EXCLUDES.iter().map(|s| (*s).to_string()).collect(),
        };
        if let Some(out_dir) = options.out_dir.as_deref().and_then(|dir| dir.strip_prefix(root).ok()) {
            excludes.push(out_dir.to_string_lossy().into_owned());
        }
        for pattern in &excludes {
            overrides
                .add(&format!("!/{}", trim_glob(pattern)))
                .map_err(|err| format!("Invalid exclude pattern '{pattern}': {err}"))?;
        }

        let overrides = overrides
            .build()
            .map_err(|err| format!("Invalid include/exclude patterns: {err}"))?;

        let walker = WalkBuilder::new(root)
            .standard_filters(false)
            .hidden(true)
            .overrides(overrides)
            .build();

        for entry in walker {
            match entry {
                Ok(entry) => {
                    let path = entry.path();
                    if path.is_file() && is_source_file(path, options.allow_js) {
                        files.push(path.to_path_buf());
                    }
                }
                Err(err) => warn!("Skipping unreadable path: {}", err),
            }
        }
    }

    files.sort();
    files.dedup();
    Ok(files)
}

fn trim_glob(pattern: &str) -> &str {
    pattern.trim_start_matches("./").trim_end_matches('/')
}

/// A bare directory include means everything below it.
fn include_glob(root: &Path, pattern: &str) -> String {
    let pattern = trim_glob(pattern);
    if root.join(pattern).is_dir() {
        format!("/{pattern}/**")
    } else {
        format!("/{pattern}")
    }
}

pub(crate) fn is_source_file(path: &Path, allow_js: bool) -> bool {
    let Some(ext) = path.extension().and_then(|ext| ext.to_str()) else {
        return false;
    };
    TS_EXTENSIONS.contains(&ext) || (allow_js && JS_EXTENSIONS.contains(&ext))
}

/// True for `.d.ts`, `.d.mts` and `.d.cts` files.
pub(crate) fn is_declaration_file(path: &Path) -> bool {
    path.file_name()
        .and_then(|name| name.to_str())
        .is_some_and(|name| {
            name.ends_with(".d.ts") || name.ends_with(".d.mts") || name.ends_with(".d.cts")
        })
}

/// Blank out comments and trailing commas, keeping line and column positions.
fn strip_json_comments(text: &str) -> String {
    let chars: Vec<char> = text.chars().collect();
    let mut out = String::with_capacity(text.len());
    let mut i = 0;
    let mut in_string = false;

    while i < chars.len() {
        let ch = chars[i];
        if in_string {
            out.push(ch);
            if ch == '\\' && i + 1 < chars.len() {
                out.push(chars[i + 1]);
                i += 1;
            } else if ch == '"' {
                in_string = false;
            }
            i += 1;
            continue;
        }

        match (ch, chars.get(i + 1).copied()) {
            ('"', _) => {
                in_string = true;
                out.push(ch);
                i += 1;
            }
            ('/', Some('/')) => {
                while i < chars.len() && chars[i] != '\n' {
                    out.push(' ');
                    i += 1;
                }
            }
            ('/', Some('*')) => {
                out.push_str("  ");
                i += 2;
                while i < chars.len() && !(chars[i] == '*' && chars.get(i + 1) == Some(&'/')) {
                    out.push(if chars[i] == '\n' { '\n' } else { ' ' });
                    i += 1;
                }
                if i < chars.len() {
                    out.push_str("  ");
                    i += 2;
                }
            }
            (',', _) if next_significant(&chars, i + 1).is_some_and(|c| c == '}' || c == ']') => {
                out.push(' ');
                i += 1;
            }
            _ => {
                out.push(ch);
                i += 1;
            }
        }
    }

    out
}

/// Next character after `start` that is not whitespace or inside a comment.
fn next_significant(chars: &[char], start: usize) -> Option<char> {
    let mut i = start;
    while i < chars.len() {
        match (chars[i], chars.get(i + 1).copied()) {
            (c, _) if c.is_whitespace() => i += 1,
            ('/', Some('/')) => {
                while i < chars.len() && chars[i] != '\n' {
                    i += 1;
                }
            }
            ('/', Some('*')) => {
                i += 2;
                while i < chars.len() && !(chars[i] == '*' && chars.get(i + 1) == Some(&'/')) {
                    i += 1;
                }
                i += 2;
            }
            (c, _) => return Some(c),
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write(dir: &Path, rel: &str, contents: &str) {
        let path = dir.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, contents).unwrap();
    }

    #[test]
    fn test_strip_comments_and_trailing_commas() {
        let text = "{\n  // line\n  \"a\": \"x // not a comment\", /* block */\n  \"b\": [1, 2,],\n}\n";
        let value: serde_json::Value = serde_json::from_str(&strip_json_comments(text)).unwrap();
        assert_eq!(value["a"], "x // not a comment");
        assert_eq!(value["b"], serde_json::json!([1, 2]));
    }

    #[test]
    fn test_compiler_options_are_resolved() {
        let project = ProjectConfig::parse(
            Path::new("/repo/tsconfig.json"),
            r#"{ "compilerOptions": { "outDir": "dist", "baseUrl": "./src", "declaration": true }, "files": ["a.ts"] }"#,
        );
        assert_eq!(project.options.out_dir, Some(PathBuf::from("/repo/dist")));
        assert_eq!(project.options.base_url, Some(PathBuf::from("/repo/src")));
        assert!(project.options.declaration);
        assert!(!project.options.no_emit_on_error);
        assert_eq!(project.file_names, vec![PathBuf::from("/repo/a.ts")]);
    }

    #[test]
    fn test_malformed_config_is_a_diagnostic() {
        let project = ProjectConfig::parse(Path::new("/repo/tsconfig.json"), "{ \"compilerOptions\": ");
        assert_eq!(project.errors.len(), 1);
        assert_eq!(project.errors[0].code, codes::CONFIG);
        assert!(project.file_names.is_empty());
    }

    #[test]
    fn test_include_and_exclude() {
        let dir = TempDir::new().unwrap();
        let root = dir.path();
        write(root, "src/a.ts", "export const a = 1;");
        write(root, "src/nested/b.tsx", "export const b = 2;");
        write(root, "src/c.js", "export const c = 3;");
        write(root, "src/skip/d.ts", "export const d = 4;");
        write(root, "other/e.ts", "export const e = 5;");
        write(
            root,
            "tsconfig.json",
            r#"{ "include": ["src"], "exclude": ["src/skip"] }"#,
        );

        let project = ProjectConfig::load(&root.join("tsconfig.json")).unwrap();
        assert!(project.errors.is_empty(), "{:?}", project.errors);
        let names: Vec<_> = project
            .file_names
            .iter()
            .map(|p| p.strip_prefix(root).unwrap().to_path_buf())
            .collect();
        assert_eq!(
            names,
            vec![PathBuf::from("src/a.ts"), PathBuf::from("src/nested/b.tsx")]
        );
    }

    #[test]
    fn test_default_include_skips_node_modules_and_out_dir() {
        let dir = TempDir::new().unwrap();
        let root = dir.path();
        write(root, "index.ts", "export {};");
        write(root, "node_modules/pkg/index.ts", "export {};");
        write(root, "dist/index.ts", "export {};");
        write(root, "tsconfig.json", r#"{ "compilerOptions": { "outDir": "dist" } }"#);

        let project = ProjectConfig::load(&root.join("tsconfig.json")).unwrap();
        assert_eq!(project.file_names, vec![root.join("index.ts")]);
    }

    #[test]
    fn test_no_inputs() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "tsconfig.json", "{}");
        let project = ProjectConfig::load(&dir.path().join("tsconfig.json")).unwrap();
        assert_eq!(project.errors[0].code, codes::NO_INPUTS);
    }

    #[test]
    fn test_missing_config_is_io_error() {
        let dir = TempDir::new().unwrap();
        let err = ProjectConfig::load(&dir.path().join("tsconfig.json")).unwrap_err();
        assert!(matches!(err, Error::Io { .. }));
    }

    #[test]
    fn test_declaration_files() {
        assert!(is_declaration_file(Path::new("types.d.ts")));
        assert!(!is_declaration_file(Path::new("index.ts")));
        assert!(is_source_file(Path::new("a.mts"), false));
        assert!(!is_source_file(Path::new("a.js"), false));
        assert!(is_source_file(Path::new("a.js"), true));
    }
}
