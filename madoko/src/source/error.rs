use std::fmt;
use std::path::{Path, PathBuf};

/// A physical position: the file a line came from and its 1-based number there.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SourceLocation {
    pub file: PathBuf,
    pub line: usize,
}

impl SourceLocation {
    pub fn new(file: impl Into<PathBuf>, line: usize) -> Self {
        SourceLocation {
            file: file.into(),
            line,
        }
    }

    pub fn file(&self) -> &Path {
        &self.file
    }
}

impl fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.file.display(), self.line)
    }
}

/// Failures of the line source itself: include resolution and cursor misuse.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReaderError {
    /// No candidate path for an include directive exists.
    IncludeNotFound {
        path: String,
        candidates: Vec<PathBuf>,
        location: SourceLocation,
    },
    /// An include directive names a file that is already open further up the
    /// frame stack.
    IncludeCycle {
        path: PathBuf,
        location: SourceLocation,
    },
    Io {
        path: PathBuf,
        message: String,
    },
    UnexpectedEnd {
        location: SourceLocation,
    },
    BackUpPastStart {
        location: SourceLocation,
    },
}

impl ReaderError {
    pub fn location(&self) -> Option<&SourceLocation> {
        match self {
            ReaderError::IncludeNotFound { location, .. }
            | ReaderError::IncludeCycle { location, .. }
            | ReaderError::UnexpectedEnd { location }
            | ReaderError::BackUpPastStart { location } => Some(location),
            ReaderError::Io { .. } => None,
        }
    }
}

impl fmt::Display for ReaderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReaderError::IncludeNotFound {
                path, candidates, ..
            } => {
                let searched: Vec<String> = candidates
                    .iter()
                    .map(|c| c.display().to_string())
                    .collect();
                write!(
                    f,
                    "include file '{}' not found; searched: {}",
                    path,
                    searched.join(", ")
                )
            }
            ReaderError::IncludeCycle { path, .. } => {
                write!(f, "include cycle: '{}' is already being read", path.display())
            }
            ReaderError::Io { path, message } => {
                write!(f, "cannot read '{}': {}", path.display(), message)
            }
            ReaderError::UnexpectedEnd { .. } => write!(f, "unexpectedly encountered end of input"),
            ReaderError::BackUpPastStart { .. } => {
                write!(f, "attempted to back up past the beginning of the input")
            }
        }
    }
}

impl std::error::Error for ReaderError {}
