use once_cell::sync::Lazy;
use regex::Regex;

static INCLUDE_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\[INCLUDE=(?<path>[^\]]+)\]$").expect("valid include pattern"));

/// An `[INCLUDE=path]` line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IncludeDirective {
    pub path: String,
}

impl IncludeDirective {
    /// Recognize a directive occupying the whole (trimmed) line.
    pub fn parse(line: &str) -> Option<Self> {
        let captures = INCLUDE_PATTERN.captures(line.trim())?;
        let path = captures["path"].trim();
        if path.is_empty() {
            return None;
        }
        Some(IncludeDirective {
            path: path.to_string(),
        })
    }
}
