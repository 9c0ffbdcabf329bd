pub mod error;
mod structural;

pub use error::{ErrorKind, ParseError};

use std::path::Path;

use crate::Document;
use crate::fs::{Environment, FileSystem};
use crate::source::LineSource;

/// Parser entry point.
pub struct Parser<'a> {
    source: LineSource<'a>,
}

impl<'a> Parser<'a> {
    pub fn new(source: LineSource<'a>) -> Self {
        Parser { source }
    }

    /// Open `path` and prepare to parse it, resolving includes through `fs`.
    pub fn open(
        path: impl AsRef<Path>,
        fs: &'a dyn FileSystem,
        env: &'a dyn Environment,
    ) -> Result<Self, ParseError> {
        Ok(Parser::new(LineSource::open(path, fs, env)?))
    }

    /// Parse the whole source into a Document.
    ///
    /// Reader and metadata errors stop the parse at once. Malformed blocks are
    /// skipped and reported together once the end of the input is reached.
    pub fn parse(mut self) -> Result<Document, Vec<ParseError>> {
        structural::parse_document(&mut self.source)
    }
}
