//! Ordered alias table mapping specifier patterns to replacements.

use regex::{Regex, RegexBuilder};

use crate::error::{Error, Result};

/// One alias entry: a case-insensitive pattern and its replacement template.
///
/// Replacement templates use `$1` / `${name}` group references.
#[derive(Debug, Clone)]
pub struct AliasRule {
    pattern: Regex,
    replacement: String,
}

impl AliasRule {
    pub fn new(pattern: &str, replacement: impl Into<String>) -> Result<Self> {
        let regex = RegexBuilder::new(pattern)
            .case_insensitive(true)
            .build()
            .map_err(|err| Error::invalid_alias(pattern, err.to_string()))?;

        Ok(Self {
            pattern: regex,
            replacement: replacement.into(),
        })
    }

    pub fn pattern(&self) -> &str {
        self.pattern.as_str()
    }

    pub fn replacement(&self) -> &str {
        &self.replacement
    }

    /// Replace every match of the pattern in `specifier`, or `None` if it does not match.
    pub fn apply(&self, specifier: &str) -> Option<String> {
        if !self.pattern.is_match(specifier) {
            return None;
        }
        Some(
            self.pattern
                .replace_all(specifier, self.replacement.as_str())
                .into_owned(),
        )
    }
}

/// Alias entries in declaration order. The first matching entry wins.
#[derive(Debug, Clone, Default)]
pub struct AliasRules {
    rules: Vec<AliasRule>,
}

impl AliasRules {
    pub fn new() -> Self {
        Self::default()
    }

    /// Compile `(pattern, replacement)` pairs, keeping their order.
    pub fn from_pairs<I, K, V>(pairs: I) -> Result<Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let rules = pairs
            .into_iter()
            .map(|(pattern, replacement)| AliasRule::new(pattern.as_ref(), replacement))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { rules })
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &AliasRule> {
        self.rules.iter()
    }

    /// Rewrite `specifier` with the first matching entry.
    pub fn resolve(&self, specifier: &str) -> Option<String> {
        self.rules.iter().find_map(|rule| rule.apply(specifier))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capture_groups_are_substituted() {
        let rules = AliasRules::from_pairs([("^@app/(.*)$", "./src/$1")]).unwrap();
        assert_eq!(rules.resolve("@app/util"), Some("./src/util".to_string()));
    }

    #[test]
    fn test_matching_is_case_insensitive() {
        let rules = AliasRules::from_pairs([("^@APP/(.*)$", "./src/$1")]).unwrap();
        assert_eq!(rules.resolve("@app/Util"), Some("./src/Util".to_string()));
    }

    #[test]
    fn test_first_match_wins() {
        let rules = AliasRules::from_pairs([
            ("^@app/core$", "./core/index"),
            ("^@app/(.*)$", "./src/$1"),
        ])
        .unwrap();
        assert_eq!(rules.resolve("@app/core"), Some("./core/index".to_string()));
        assert_eq!(rules.resolve("@app/other"), Some("./src/other".to_string()));
    }

    #[test]
    fn test_unanchored_pattern_replaces_all_occurrences() {
        let rules = AliasRules::from_pairs([("~", "src")]).unwrap();
        assert_eq!(rules.resolve("~/a/~"), Some("src/a/src".to_string()));
    }

    #[test]
    fn test_no_match_returns_none() {
        let rules = AliasRules::from_pairs([("^@app/(.*)$", "./src/$1")]).unwrap();
        assert_eq!(rules.resolve("lodash"), None);
        assert!(AliasRules::new().resolve("lodash").is_none());
    }

    #[test]
    fn test_invalid_pattern_is_rejected() {
        let err = AliasRules::from_pairs([("^@app/(.*$", "./src/$1")]).unwrap_err();
        assert!(matches!(err, Error::InvalidAlias { ref pattern, .. } if pattern == "^@app/(.*$"));
    }
}
