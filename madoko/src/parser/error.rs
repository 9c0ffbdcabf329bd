use std::fmt;
use std::ops::Range;

use codespan_reporting::diagnostic::{Diagnostic, Label};

use crate::metadata::MetadataError;
use crate::source::{ReaderError, SourceLocation};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Include resolution or line-source failure; aborts the parse.
    Reader,
    /// Malformed block content; collected and reported with the others.
    Syntax,
    /// Malformed metadata header; aborts the parse.
    Metadata,
}

/// Parse errors with source location information.
#[derive(Debug, Clone, PartialEq)]
pub struct ParseError {
    pub kind: ErrorKind,
    pub message: String,
    pub location: Option<SourceLocation>,
    pub notes: Vec<String>,
}

impl ParseError {
    pub fn syntax(message: impl Into<String>, location: SourceLocation) -> Self {
        ParseError {
            kind: ErrorKind::Syntax,
            message: message.into(),
            location: Some(location),
            notes: Vec::new(),
        }
    }

    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.notes.push(note.into());
        self
    }

    /// Fill in a location if none was recorded where the error arose.
    pub fn or_at(mut self, location: SourceLocation) -> Self {
        if self.location.is_none() {
            self.location = Some(location);
        }
        self
    }

    pub fn is_fatal(&self) -> bool {
        !matches!(self.kind, ErrorKind::Syntax)
    }

    /// 1-based line number, if known.
    pub fn line(&self) -> Option<usize> {
        self.location.as_ref().map(|l| l.line)
    }

    /// Convert to a codespan-reporting Diagnostic for display. `label` is the
    /// file id and byte range of the offending line, when the host has the
    /// file loaded.
    pub fn to_diagnostic(&self, label: Option<(usize, Range<usize>)>) -> Diagnostic<usize> {
        let diagnostic = Diagnostic::error()
            .with_message(&self.message)
            .with_notes(self.notes.clone());
        match label {
            Some((file_id, span)) => diagnostic.with_labels(vec![Label::primary(file_id, span)]),
            None => diagnostic,
        }
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.location {
            Some(location) => write!(f, "{}: {}", location, self.message),
            None => write!(f, "{}", self.message),
        }
    }
}

impl std::error::Error for ParseError {}

impl From<ReaderError> for ParseError {
    fn from(error: ReaderError) -> Self {
        let notes = match &error {
            ReaderError::IncludeNotFound { candidates, .. } => candidates
                .iter()
                .map(|c| format!("searched {}", c.display()))
                .collect(),
            _ => Vec::new(),
        };
        ParseError {
            kind: ErrorKind::Reader,
            message: error.to_string(),
            location: error.location().cloned(),
            notes,
        }
    }
}

impl From<MetadataError> for ParseError {
    fn from(error: MetadataError) -> Self {
        let message = error.to_string();
        match error {
            MetadataError::Reader(inner) => inner.into(),
            MetadataError::DuplicateKey { location, .. } => ParseError {
                kind: ErrorKind::Metadata,
                message,
                location: Some(location),
                notes: Vec::new(),
            },
        }
    }
}
