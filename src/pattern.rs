// Whole-path file patterns for hook selection
use regex::Regex;
use std::borrow::Cow;
use std::fmt;
use thiserror::Error;

/// Reasons a pattern string is rejected
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PatternError {
    #[error("invalid regular expression: {0}")]
    Invalid(String),

    #[error("pattern must start with '^' and end with '$'")]
    Unanchored,
}

/// A `files`/`exclude` regular expression.
///
/// The source text is kept verbatim for serialization. Matching always runs
/// against the whole path: the compiled form wraps the source as
/// `^(?:<source>)$`, so `^a|b$` cannot match `xb` or `ay`.
#[derive(Clone)]
pub struct FilePattern {
    source: String,
    whole_path: Regex,
}

impl FilePattern {
    /// Compile a pattern, requiring explicit `^...$` anchoring
    pub fn new(source: &str) -> Result<Self, PatternError> {
        let pattern = Self::compile(source)?;
        if !is_anchored(source) {
            return Err(PatternError::Unanchored);
        }
        Ok(pattern)
    }

    fn compile(source: &str) -> Result<Self, PatternError> {
        Regex::new(source).map_err(|e| PatternError::Invalid(e.to_string()))?;
        // a trailing `# comment` in verbose mode would swallow the closing group
        let (flags, _) = split_inline_flags(source);
        let wrapped = if flags.contains('x') {
            format!("^(?:{source}\n)$")
        } else {
            format!("^(?:{source})$")
        };
        let whole_path = Regex::new(&wrapped).map_err(|e| PatternError::Invalid(e.to_string()))?;
        Ok(Self {
            source: source.to_string(),
            whole_path,
        })
    }

    pub fn as_str(&self) -> &str {
        &self.source
    }

    /// Whole-path match against a relative, forward-slash separated path
    pub fn is_match(&self, path: &str) -> bool {
        self.whole_path.is_match(&normalize_path(path))
    }
}

impl fmt::Debug for FilePattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("FilePattern").field(&self.source).finish()
    }
}

impl fmt::Display for FilePattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}

impl PartialEq for FilePattern {
    fn eq(&self, other: &Self) -> bool {
        self.source == other.source
    }
}

impl Eq for FilePattern {}

/// True when the pattern starts with `^` and ends with an unescaped `$`.
///
/// Leading inline flag groups such as `(?x)` are skipped. In verbose mode the
/// whitespace around the anchors is insignificant, so it is trimmed too.
pub fn is_anchored(source: &str) -> bool {
    let (flags, rest) = split_inline_flags(source);
    let rest = if flags.contains('x') {
        rest.trim()
    } else {
        rest
    };

    let Some(body) = rest.strip_prefix('^') else {
        return false;
    };
    let Some(before_dollar) = body.strip_suffix('$') else {
        return false;
    };
    // `\$` is a literal dollar, `\\$` is an escaped backslash followed by the anchor
    let trailing_backslashes = before_dollar
        .chars()
        .rev()
        .take_while(|c| *c == '\\')
        .count();
    trailing_backslashes % 2 == 0
}

/// Split leading `(?flags)` groups off a pattern, returning the enabled flags
fn split_inline_flags(source: &str) -> (String, &str) {
    let mut flags = String::new();
    let mut rest = source;
    while let Some(group) = rest.strip_prefix("(?") {
        let Some(end) = group.find(')') else {
            break;
        };
        let candidate = &group[..end];
        if candidate.is_empty() || !candidate.chars().all(|c| c.is_ascii_alphabetic()) {
            break;
        }
        flags.push_str(candidate);
        rest = &group[end + 1..];
    }
    (flags, rest)
}

/// Convert a path to the relative, forward-slash form patterns are written against
pub fn normalize_path(path: &str) -> Cow<'_, str> {
    let mut normalized: Cow<'_, str> = if path.contains('\\') {
        Cow::Owned(path.replace('\\', "/"))
    } else {
        Cow::Borrowed(path)
    };

    while normalized.starts_with("./") {
        normalized = match normalized {
            Cow::Borrowed(s) => Cow::Borrowed(&s[2..]),
            Cow::Owned(s) => Cow::Owned(s[2..].to_string()),
        };
    }

    normalized
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_anchoring_detection() {
        assert!(is_anchored("^(a/.*\\.py)$"));
        assert!(is_anchored("^$"));
        assert!(is_anchored(r"^foo\\$"));
        assert!(!is_anchored(r"^foo\$"));
        assert!(!is_anchored("src/.*$"));
        assert!(!is_anchored("^src/"));
        assert!(!is_anchored(""));
    }

    #[test]
    fn test_anchoring_after_inline_flags() {
        assert!(is_anchored("(?x)^(\n  a/.*\\.py|\n  b/.*\\.py\n)$\n"));
        assert!(is_anchored("(?i)^(readme\\.md)$"));
        assert!(is_anchored("(?x)(?i)^(a)$"));
        assert!(!is_anchored("(?x)(a)$"));
        // outside verbose mode the trailing newline is part of the pattern
        assert!(!is_anchored("^(a)$\n"));
        // a non-flag group is not skipped
        assert!(!is_anchored("(?:x)^(a)$"));
    }

    #[test]
    fn test_verbose_pattern_matches_whole_path() {
        let pattern = FilePattern::new("(?x)^(\n    a/.*\\.py|\n    b/.*\\.py\n)$\n").unwrap();
        assert!(pattern.is_match("a/foo.py"));
        assert!(pattern.is_match("b/bar.py"));
        assert!(!pattern.is_match("c/foo.py"));

        let commented = FilePattern::compile("(?x)^(a/.*\\.py)$  # python sources").unwrap();
        assert!(commented.is_match("a/foo.py"));
    }

    #[test]
    fn test_rejects_unanchored_pattern() {
        assert_eq!(FilePattern::new("^tests/").unwrap_err(), PatternError::Unanchored);
        assert!(FilePattern::compile("^tests/").is_ok());
    }

    #[test]
    fn test_rejects_invalid_regex_before_anchoring() {
        let err = FilePattern::new("[unclosed").unwrap_err();
        assert!(matches!(err, PatternError::Invalid(_)));
    }

    #[test]
    fn test_alternation_is_whole_path() {
        let pattern = FilePattern::new("^a|b$").unwrap();
        assert!(pattern.is_match("a"));
        assert!(pattern.is_match("b"));
        assert!(!pattern.is_match("ab"));
        assert!(!pattern.is_match("xb"));
    }

    #[test]
    fn test_unanchored_filter_still_matches_whole_path() {
        let pattern = FilePattern::compile(r"\.py").unwrap();
        assert!(!pattern.is_match("src/main.py"));
        assert!(pattern.is_match(".py"));
    }

    #[test]
    fn test_normalize_path() {
        assert_eq!(normalize_path("./src/lib.rs"), "src/lib.rs");
        assert_eq!(normalize_path(r"src\config\mod.rs"), "src/config/mod.rs");
        assert_eq!(normalize_path(r".\src\x.py"), "src/x.py");
        assert_eq!(normalize_path("src/lib.rs"), "src/lib.rs");
    }

    #[test]
    fn test_windows_style_paths_match() {
        let pattern = FilePattern::new(r"^(docs/.*\.rst)$").unwrap();
        assert!(pattern.is_match(r"docs\index.rst"));
    }

    #[test]
    fn test_equality_uses_source() {
        assert_eq!(
            FilePattern::new("^(a)$").unwrap(),
            FilePattern::new("^(a)$").unwrap()
        );
        assert_ne!(
            FilePattern::new("^(a)$").unwrap(),
            FilePattern::new("^(b)$").unwrap()
        );
    }
}
