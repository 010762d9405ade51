//! The specifier rewrite rule.
//!
//! Rules are tried in a fixed priority order and the first one that produces a
//! value wins:
//!
//! 1. the alias table ([`AliasRules::resolve`](super::AliasRules::resolve))
//! 2. the caller's custom hook
//! 3. base-URL re-rooting, only for specifiers starting with `.` and only when
//!    both `base_url` and `project` are configured
//!
//! A specifier that no rule touches is returned borrowed, so callers can tell
//! "unchanged" apart from "rewritten to the same text" without comparing.

use std::borrow::Cow;
use std::path::{Path, PathBuf};

use path_clean::PathClean;

use super::context::RewriteContext;
use crate::error::RewriteError;

/// Rewrite one module specifier found in `source_file`.
///
/// Pure: the result depends only on the arguments. `source_file` should be
/// absolute for base-URL re-rooting to find `base_url` in the resolved path.
pub fn rewrite_path<'p>(
    specifier: &'p str,
    source_file: &Path,
    context: &RewriteContext,
) -> Result<Cow<'p, str>, RewriteError> {
    if let Some(aliased) = context.alias().resolve(specifier) {
        return Ok(Cow::Owned(aliased));
    }

    if let Some(rewritten) = context.custom_rewrite(specifier, source_file) {
        return Ok(Cow::Owned(rewritten));
    }

    if let (Some(base_url), Some(project)) = (context.base_url(), context.project()) {
        if specifier.starts_with('.') {
            return reroot(specifier, source_file, base_url, project).map(Cow::Owned);
        }
    }

    Ok(Cow::Borrowed(specifier))
}

/// Resolve `specifier` against the source file's directory and swap the
/// `base_url` prefix for `project`.
fn reroot(
    specifier: &str,
    source_file: &Path,
    base_url: &Path,
    project: &str,
) -> Result<String, RewriteError> {
    let source_dir = source_file.parent().unwrap_or_else(|| Path::new(""));
    let resolved = source_dir.join(specifier).clean();

    let resolved_text = resolved.to_string_lossy();
    let base_text = base_url.to_string_lossy();

    match resolved_text.split_once(base_text.as_ref()) {
        Some((_, remainder)) => Ok(format!("{project}{}", remainder.replace('\\', "/"))),
        None => Err(RewriteError::OutsideBaseUrl {
            specifier: specifier.to_string(),
            resolved: PathBuf::from(resolved_text.as_ref()),
            base_url: base_url.to_path_buf(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rewrite::AliasRules;

    fn rerooting() -> RewriteContext {
        RewriteContext::new()
            .with_base_url("/repo/src")
            .with_project("@lib")
    }

    #[test]
    fn test_alias_rewrites_specifier() {
        let context = RewriteContext::new()
            .with_alias(AliasRules::from_pairs([("^@app/(.*)$", "./src/$1")]).unwrap());
        let result = rewrite_path("@app/util", Path::new("/repo/index.ts"), &context).unwrap();
        assert_eq!(result, "./src/util");
    }

    #[test]
    fn test_relative_specifier_is_rerooted() {
        let result = rewrite_path("../c", Path::new("/repo/src/a/b.ts"), &rerooting()).unwrap();
        assert_eq!(result, "@lib/c");
    }

    #[test]
    fn test_sibling_specifier_is_rerooted() {
        let result = rewrite_path("./d/e", Path::new("/repo/src/a/b.ts"), &rerooting()).unwrap();
        assert_eq!(result, "@lib/a/d/e");
    }

    #[test]
    fn test_specifier_outside_base_url_is_an_error() {
        let err = rewrite_path("./y", Path::new("/other/x.ts"), &rerooting()).unwrap_err();
        assert_eq!(
            err,
            RewriteError::OutsideBaseUrl {
                specifier: "./y".to_string(),
                resolved: PathBuf::from("/other/y"),
                base_url: PathBuf::from("/repo/src"),
            }
        );
    }

    #[test]
    fn test_bare_specifier_is_borrowed_unchanged() {
        let result = rewrite_path("lodash", Path::new("/repo/src/a.ts"), &rerooting()).unwrap();
        assert!(matches!(result, Cow::Borrowed("lodash")));
    }

    #[test]
    fn test_relative_specifier_needs_both_base_url_and_project() {
        let context = RewriteContext::new().with_base_url("/repo/src");
        let result = rewrite_path("./x", Path::new("/repo/src/a.ts"), &context).unwrap();
        assert!(matches!(result, Cow::Borrowed("./x")));
    }

    #[test]
    fn test_alias_takes_priority_over_custom_hook() {
        let context = RewriteContext::new()
            .with_alias(AliasRules::from_pairs([("^x$", "from-alias")]).unwrap())
            .with_rewrite(|_, _| Some("from-hook".to_string()));
        let result = rewrite_path("x", Path::new("/a.ts"), &context).unwrap();
        assert_eq!(result, "from-alias");
    }

    #[test]
    fn test_custom_hook_takes_priority_over_rerooting() {
        let context = rerooting().with_rewrite(|specifier, file| {
            assert_eq!(file, Path::new("/repo/src/a.ts"));
            Some(format!("hooked:{specifier}"))
        });
        let result = rewrite_path("./x", Path::new("/repo/src/a.ts"), &context).unwrap();
        assert_eq!(result, "hooked:./x");
    }

    #[test]
    fn test_custom_hook_declining_falls_through() {
        let context = rerooting().with_rewrite(|_, _| None);
        let result = rewrite_path("./x", Path::new("/repo/src/a.ts"), &context).unwrap();
        assert_eq!(result, "@lib/x");
    }
}
