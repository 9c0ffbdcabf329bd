use std::collections::BTreeMap;
use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::source::{LineSource, ReaderError, SourceLocation};

static METADATA_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\s*(?<key>[A-Za-z][^:]*?)\s*:\s*(?<value>.*)$")
        .expect("valid metadata pattern")
});

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MetadataError {
    DuplicateKey {
        key: String,
        location: SourceLocation,
    },
    Reader(ReaderError),
}

impl From<ReaderError> for MetadataError {
    fn from(error: ReaderError) -> Self {
        MetadataError::Reader(error)
    }
}

impl fmt::Display for MetadataError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MetadataError::DuplicateKey { key, .. } => {
                write!(f, "metadata key '{}' is defined more than once", key)
            }
            MetadataError::Reader(error) => error.fmt(f),
        }
    }
}

impl std::error::Error for MetadataError {}

/// The `key: value` header at the top of a document. Keys compare
/// case-insensitively; values are trimmed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Metadata {
    entries: BTreeMap<String, String>,
}

impl Metadata {
    pub fn new() -> Self {
        Self::default()
    }

    /// Consume the metadata header from the start of `source`, leaving it on the
    /// first line that belongs to the document body.
    pub fn read(source: &mut LineSource<'_>) -> Result<Self, MetadataError> {
        let mut metadata = Metadata::new();
        // Key that an indented line would continue; cleared by blank lines.
        let mut key: Option<String> = None;

        while source.peek_line()?.is_some() {
            let line = source.get_line()?;
            if line.is_blank() {
                key = None;
                continue;
            }

            if let Some(captures) = METADATA_PATTERN.captures(&line.text) {
                let canonical = canonical_key(&captures["key"]);
                let value = captures["value"].trim().to_string();
                if metadata.entries.contains_key(&canonical) {
                    return Err(MetadataError::DuplicateKey {
                        key: captures["key"].trim().to_string(),
                        location: line.location,
                    });
                }
                log::trace!("metadata {} = {:?}", canonical, value);
                metadata.entries.insert(canonical.clone(), value);
                key = Some(canonical);
                continue;
            }

            let continued = match &key {
                Some(k) if line.text.starts_with([' ', '\t']) => Some(k),
                _ => None,
            };
            match continued.and_then(|k| metadata.entries.get_mut(k)) {
                Some(value) => {
                    let extra = line.text.trim();
                    if value.is_empty() {
                        value.push_str(extra);
                    } else {
                        value.push(' ');
                        value.push_str(extra);
                    }
                }
                None => {
                    source.back_up()?;
                    break;
                }
            }
        }

        Ok(metadata)
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(&canonical_key(key)).map(String::as_str)
    }

    /// The `title` entry, if present and not blank.
    pub fn title(&self) -> Option<&str> {
        self.get("title").filter(|t| !t.trim().is_empty())
    }

    pub fn insert(&mut self, key: &str, value: impl Into<String>) {
        self.entries
            .insert(canonical_key(key), value.into().trim().to_string());
    }

    /// Number of distinct keys.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when the document had no header.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in key order; keys are in canonical (lower-case) form.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

fn canonical_key(key: &str) -> String {
    key.trim().to_lowercase()
}
