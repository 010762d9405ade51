//! End-to-end tests for the `hush` binary.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn write(root: &Path, rel: &str, contents: &str) {
    let path = root.join(rel);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, contents).unwrap();
}

fn hush(cwd: &Path) -> Command {
    let mut cmd = Command::cargo_bin("hush").unwrap();
    cmd.current_dir(cwd)
        .env("NO_COLOR", "1")
        .env_remove("HUSH_COMPILER")
        .env_remove("HUSH_PROJECT")
        .env_remove("HUSH_WATCH")
        .env_remove("HUSH_REWRITE__PROJECT")
        .env_remove("HUSH_REWRITE__BASE_URL");
    cmd
}

#[test]
fn test_help_succeeds() {
    let dir = TempDir::new().unwrap();
    hush(dir.path())
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--project"))
        .stdout(predicate::str::contains("--watch"));
}

#[test]
fn test_unknown_compiler_exits_with_one() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "tsconfig.json", r#"{ "files": ["a.ts"] }"#);
    write(dir.path(), "a.ts", "export const a = 1;\n");

    hush(dir.path())
        .args(["--compiler", "tsc"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Cannot find compiler 'tsc'"));
}

#[test]
fn test_missing_project_fails() {
    let dir = TempDir::new().unwrap();

    hush(dir.path())
        .assert()
        .code(1)
        .stderr(predicate::str::contains("File not found"));
}

#[test]
fn test_type_errors_are_suppressed() {
    let dir = TempDir::new().unwrap();
    write(
        dir.path(),
        "tsconfig.json",
        r#"{
            // comments are allowed
            "compilerOptions": { "outDir": "dist" },
            "include": ["src"],
        }"#,
    );
    write(dir.path(), "src/index.ts", "let a = 1;\nlet a = 2;\nexport { a };\n");

    hush(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Suppressed errors:"))
        .stdout(predicate::str::contains("Compilation completed successfully."));
}

#[test]
fn test_alias_from_config_file_is_applied() {
    let dir = TempDir::new().unwrap();
    let root = dir.path();
    write(
        root,
        "tsconfig.json",
        r#"{ "compilerOptions": { "outDir": "dist" }, "include": ["index.ts", "src"] }"#,
    );
    write(
        root,
        "hush.toml",
        "[[rewrite.alias]]\npattern = \"^@app/\"\nreplacement = \"./src/\"\n",
    );
    write(
        root,
        "index.ts",
        "import { add } from '@app/math';\nexport const total = add(1, 2);\n",
    );
    write(
        root,
        "src/math.ts",
        "export function add(a: number, b: number): number {\n  return a + b;\n}\n",
    );

    hush(root)
        .assert()
        .success()
        .stdout(predicate::str::contains("No errors found."))
        .stderr(predicate::str::contains("Using oxc frontend"));

    let js = fs::read_to_string(root.join("dist/index.js")).unwrap();
    assert!(js.contains("./src/math"), "{js}");
    assert!(!js.contains("@app/"), "{js}");
}

#[test]
fn test_project_flag_and_stray_arguments() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "app/tsconfig.json", r#"{ "files": ["main.ts"] }"#);
    write(dir.path(), "app/main.ts", "export const answer: number = 42;\n");

    hush(dir.path())
        .args(["-p", "app/tsconfig.json", "leftover"])
        .assert()
        .success()
        .stderr(predicate::str::contains(
            "Unknown CLI options received: leftover",
        ))
        .stdout(predicate::str::contains("No errors found."));

    assert!(dir.path().join("app/main.js").is_file());
}

#[test]
fn test_invalid_rewrite_config_fails() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "tsconfig.json", r#"{ "files": ["a.ts"] }"#);
    write(dir.path(), "a.ts", "export const a = 1;\n");
    write(dir.path(), "hush.toml", "[rewrite]\nproject = \"\"\n");

    hush(dir.path())
        .assert()
        .code(1)
        .stderr(predicate::str::contains("rewrite.project"));
}

#[test]
fn test_colored_output_completes() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "tsconfig.json", r#"{ "files": ["a.ts"] }"#);
    write(dir.path(), "a.ts", "export const a: number = 1;\n");

    hush(dir.path())
        .env_remove("NO_COLOR")
        .env("FORCE_COLOR", "1")
        .assert()
        .success()
        .stdout(predicate::str::contains("No errors found."));

    hush(dir.path())
        .env_remove("NO_COLOR")
        .env("FORCE_COLOR", "1")
        .args(["--compiler", "tsc"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Cannot find compiler"));
}

#[test]
fn test_emit_blocked_warning_goes_to_stderr() {
    let dir = TempDir::new().unwrap();
    write(
        dir.path(),
        "tsconfig.json",
        r#"{ "compilerOptions": { "noEmitOnError": true }, "files": ["a.ts"] }"#,
    );
    write(dir.path(), "a.ts", "export const a = 1;\n");

    hush(dir.path())
        .assert()
        .success()
        .stderr(predicate::str::contains("No files will be emitted"))
        .stdout(predicate::str::contains("No files will be emitted").not());
}
