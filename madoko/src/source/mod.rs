//! The virtual line stream: one flat sequence of lines over a tree of
//! `[INCLUDE=...]`-linked files.
//!
//! Include directives are expanded lazily as lines are consumed. Each open file
//! is a [`Frame`]; the frame being read is held apart from the stack of
//! suspended parents, and a parent resumes on the line after its directive once
//! the included file is exhausted.

pub mod error;
pub mod include;

use std::path::{Path, PathBuf};

use crate::fs::{self, Environment, FileSystem};

pub use error::{ReaderError, SourceLocation};
pub use include::IncludeDirective;

/// Extension given to include paths that have none.
pub const DEFAULT_EXTENSION: &str = "mdk";

/// One logical line and where it physically came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Line {
    pub text: String,
    pub location: SourceLocation,
}

impl Line {
    pub fn is_blank(&self) -> bool {
        self.text.trim().is_empty()
    }
}

/// The buffered content and read position of one open file.
#[derive(Debug, Clone)]
struct Frame {
    path: PathBuf,
    lines: Vec<String>,
    /// Index of the next line to read; always within `0..=lines.len()`.
    cursor: usize,
}

impl Frame {
    fn new(path: PathBuf, lines: Vec<String>) -> Self {
        Frame {
            path,
            lines,
            cursor: 0,
        }
    }

    fn is_exhausted(&self) -> bool {
        self.cursor >= self.lines.len()
    }

    fn directory(&self) -> &Path {
        self.path.parent().unwrap_or_else(|| Path::new(""))
    }
}

pub struct LineSource<'a> {
    fs: &'a dyn FileSystem,
    env: &'a dyn Environment,
    default_extension: String,
    current: Frame,
    stack: Vec<Frame>,
}

impl<'a> LineSource<'a> {
    /// Open a document on the file store. A relative `path` is taken relative
    /// to the environment's current directory.
    pub fn open(
        path: impl AsRef<Path>,
        fs: &'a dyn FileSystem,
        env: &'a dyn Environment,
    ) -> Result<Self, ReaderError> {
        let path = path.as_ref();
        let rooted = if path.is_absolute() {
            path.to_path_buf()
        } else {
            let cwd = env.current_dir().map_err(|e| ReaderError::Io {
                path: path.to_path_buf(),
                message: e.to_string(),
            })?;
            cwd.join(path)
        };
        let rooted = fs::normalize(&rooted);
        let lines = fs.read_all_lines(&rooted).map_err(|e| ReaderError::Io {
            path: rooted.clone(),
            message: e.to_string(),
        })?;
        Ok(Self::with_frame(Frame::new(rooted, lines), fs, env))
    }

    /// Read a document held in memory. `path` names it in diagnostics and is the
    /// directory base for its relative includes.
    pub fn from_text(
        text: &str,
        path: impl AsRef<Path>,
        fs: &'a dyn FileSystem,
        env: &'a dyn Environment,
    ) -> Self {
        let lines = text.lines().map(str::to_string).collect();
        let frame = Frame::new(fs::normalize(path.as_ref()), lines);
        Self::with_frame(frame, fs, env)
    }

    fn with_frame(frame: Frame, fs: &'a dyn FileSystem, env: &'a dyn Environment) -> Self {
        LineSource {
            fs,
            env,
            default_extension: DEFAULT_EXTENSION.to_string(),
            current: frame,
            stack: Vec::new(),
        }
    }

    pub fn with_default_extension(mut self, extension: impl Into<String>) -> Self {
        let extension = extension.into();
        self.default_extension = extension.trim_start_matches('.').to_string();
        self
    }

    /// True when no buffered line remains in any open frame. Include directives
    /// that are still unexpanded are not looked into; [`LineSource::peek_line`]
    /// gives the exact answer.
    pub fn at_end(&self) -> bool {
        self.current.is_exhausted() && self.stack.iter().all(Frame::is_exhausted)
    }

    /// Path of the file the next line is read from.
    pub fn file_path(&self) -> &Path {
        &self.position_frame().path
    }

    /// 1-based number of the next line within [`LineSource::file_path`].
    pub fn line_number(&self) -> usize {
        self.position_frame().cursor + 1
    }

    pub fn location(&self) -> SourceLocation {
        let frame = self.position_frame();
        SourceLocation::new(frame.path.clone(), frame.cursor + 1)
    }

    /// The innermost open frame with lines left, which is where reading
    /// resumes. A pending include directive there is not looked into.
    fn position_frame(&self) -> &Frame {
        std::iter::once(&self.current)
            .chain(self.stack.iter().rev())
            .find(|f| !f.is_exhausted())
            .unwrap_or(&self.current)
    }

    /// Look at the next logical line without consuming it, descending into
    /// includes and resuming suspended parents as [`LineSource::get_line`] would.
    /// Returns `None` once every frame is exhausted.
    pub fn peek_line(&self) -> Result<Option<Line>, ReaderError> {
        let mut open: Vec<PathBuf> = self.stack.iter().map(|f| f.path.clone()).collect();
        open.push(self.current.path.clone());

        let frames = std::iter::once(&self.current).chain(self.stack.iter().rev());
        for frame in frames {
            if let Some(line) = self.scan(&frame.path, &frame.lines, frame.cursor, &mut open)? {
                return Ok(Some(line));
            }
            open.pop();
        }
        Ok(None)
    }

    /// Consume and return the next logical line.
    pub fn get_line(&mut self) -> Result<Line, ReaderError> {
        match self.next_line()? {
            Some(line) => Ok(line),
            None => Err(ReaderError::UnexpectedEnd {
                location: self.location(),
            }),
        }
    }

    /// Consume the next logical line.
    pub fn advance(&mut self) -> Result<(), ReaderError> {
        self.get_line().map(|_| ())
    }

    /// Step back one line within the file currently being read. Never crosses
    /// back over an include boundary.
    pub fn back_up(&mut self) -> Result<(), ReaderError> {
        if self.current.cursor == 0 {
            return Err(ReaderError::BackUpPastStart {
                location: SourceLocation::new(self.current.path.clone(), 1),
            });
        }
        self.current.cursor -= 1;
        Ok(())
    }

    /// Drain the remaining input.
    pub fn get_all_lines(&mut self) -> Result<Vec<String>, ReaderError> {
        let mut lines = Vec::new();
        while let Some(line) = self.next_line()? {
            lines.push(line.text);
        }
        Ok(lines)
    }

    fn next_line(&mut self) -> Result<Option<Line>, ReaderError> {
        loop {
            if let Some(text) = self.current.lines.get(self.current.cursor).cloned() {
                let location = self.location();
                self.current.cursor += 1;
                match IncludeDirective::parse(&text) {
                    Some(directive) => self.descend(&directive, &location)?,
                    None => return Ok(Some(Line { text, location })),
                }
            } else if let Some(parent) = self.stack.pop() {
                log::debug!(
                    "finished '{}', resuming '{}' at line {}",
                    self.current.path.display(),
                    parent.path.display(),
                    parent.cursor + 1
                );
                self.current = parent;
            } else {
                return Ok(None);
            }
        }
    }

    fn descend(
        &mut self,
        directive: &IncludeDirective,
        location: &SourceLocation,
    ) -> Result<(), ReaderError> {
        let open: Vec<PathBuf> = self
            .stack
            .iter()
            .map(|f| f.path.clone())
            .chain(std::iter::once(self.current.path.clone()))
            .collect();
        let frame = self.load(directive, self.current.directory(), &open, location)?;
        log::debug!(
            "including '{}' from {} (depth {})",
            frame.path.display(),
            location,
            self.stack.len() + 1
        );
        let parent = std::mem::replace(&mut self.current, frame);
        self.stack.push(parent);
        Ok(())
    }

    /// Find the first real line at or after `from` in `lines`, expanding
    /// directives into freshly loaded frames that are discarded afterwards.
    fn scan(
        &self,
        path: &Path,
        lines: &[String],
        from: usize,
        open: &mut Vec<PathBuf>,
    ) -> Result<Option<Line>, ReaderError> {
        let directory = path.parent().unwrap_or_else(|| Path::new(""));
        for (index, text) in lines.iter().enumerate().skip(from) {
            let location = SourceLocation::new(path, index + 1);
            let Some(directive) = IncludeDirective::parse(text) else {
                return Ok(Some(Line {
                    text: text.clone(),
                    location,
                }));
            };

            let frame = self.load(&directive, directory, open, &location)?;
            open.push(frame.path.clone());
            let found = self.scan(&frame.path, &frame.lines, 0, open)?;
            open.pop();
            if found.is_some() {
                return Ok(found);
            }
        }
        Ok(None)
    }

    /// Resolve a directive against the search roots and buffer the file it names.
    fn load(
        &self,
        directive: &IncludeDirective,
        including_dir: &Path,
        open: &[PathBuf],
        location: &SourceLocation,
    ) -> Result<Frame, ReaderError> {
        let candidates = self.candidates(directive, including_dir)?;
        let Some(found) = candidates.iter().find(|c| self.fs.file_exists(c)) else {
            return Err(ReaderError::IncludeNotFound {
                path: directive.path.clone(),
                candidates,
                location: location.clone(),
            });
        };

        let resolved = fs::normalize(found);
        if open.contains(&resolved) {
            return Err(ReaderError::IncludeCycle {
                path: resolved,
                location: location.clone(),
            });
        }

        let lines = self.fs.read_all_lines(&resolved).map_err(|e| ReaderError::Io {
            path: resolved.clone(),
            message: e.to_string(),
        })?;
        Ok(Frame::new(resolved, lines))
    }

    fn candidates(
        &self,
        directive: &IncludeDirective,
        including_dir: &Path,
    ) -> Result<Vec<PathBuf>, ReaderError> {
        let mut path = PathBuf::from(&directive.path);
        if path.extension().is_none() {
            path.set_extension(&self.default_extension);
        }

        if path.is_absolute() {
            return Ok(vec![path]);
        }

        let cwd = self.env.current_dir().map_err(|e| ReaderError::Io {
            path: path.clone(),
            message: e.to_string(),
        })?;
        Ok(vec![cwd.join(&path), including_dir.join(&path)])
    }
}
