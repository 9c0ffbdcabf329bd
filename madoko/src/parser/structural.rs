use crate::block::{Block, HeadingCounters, bullet, code, heading, paragraph, title};
use crate::Document;
use crate::metadata::Metadata;
use crate::parser::error::ParseError;
use crate::source::{Line, LineSource};

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Read the metadata header, then every block, from `source`.
pub fn parse_document(source: &mut LineSource<'_>) -> Result<Document, Vec<ParseError>> {
    let metadata = Metadata::read(source).map_err(|e| vec![ParseError::from(e)])?;

    let mut state = ParseState::new(&metadata);
    state.process_lines(source)?;
    let blocks = state.finalize()?;

    Ok(Document { blocks, metadata })
}

// ---------------------------------------------------------------------------
// Parse state
// ---------------------------------------------------------------------------

struct ParseState<'m> {
    metadata: &'m Metadata,
    counters: HeadingCounters,
    blocks: Vec<Block>,
    errors: Vec<ParseError>,
}

impl<'m> ParseState<'m> {
    fn new(metadata: &'m Metadata) -> Self {
        ParseState {
            metadata,
            counters: HeadingCounters::new(),
            blocks: Vec::new(),
            errors: Vec::new(),
        }
    }

    fn process_lines(&mut self, source: &mut LineSource<'_>) -> Result<(), Vec<ParseError>> {
        loop {
            let next = match skip_blank_lines(source) {
                Ok(Some(line)) => line,
                Ok(None) => return Ok(()),
                Err(err) => return Err(self.abort(err)),
            };

            match self.read_block(source, &next.text) {
                Ok(Some(block)) => self.blocks.push(block),
                Ok(None) => {}
                Err(err) if err.is_fatal() => return Err(self.abort(err)),
                Err(err) => self.errors.push(err.or_at(source.location())),
            }
        }
    }

    /// Dispatch on the first line of the next block, in fixed priority order.
    fn read_block(
        &mut self,
        source: &mut LineSource<'_>,
        first_line: &str,
    ) -> Result<Option<Block>, ParseError> {
        if heading::matches(first_line) {
            heading::read(source, &mut self.counters).map(|b| Some(Block::Heading(b)))
        } else if bullet::matches(first_line) {
            bullet::read(source).map(|b| Some(Block::BulletItem(b)))
        } else if code::matches(first_line) {
            code::read(source).map(|b| Some(Block::CodeBlock(b)))
        } else if title::matches(first_line) {
            Ok(title::read(source, self.metadata)?.map(Block::Title))
        } else {
            paragraph::read(source).map(|b| Some(Block::Paragraph(b)))
        }
    }

    /// Stop at an unrecoverable error, reporting it after anything collected so far.
    fn abort(&mut self, err: ParseError) -> Vec<ParseError> {
        let mut errors = std::mem::take(&mut self.errors);
        errors.push(err);
        errors
    }

    fn finalize(self) -> Result<Vec<Block>, Vec<ParseError>> {
        log::debug!(
            "parsed {} block(s), {} error(s)",
            self.blocks.len(),
            self.errors.len()
        );
        if self.errors.is_empty() {
            Ok(self.blocks)
        } else {
            Err(self.errors)
        }
    }
}

/// Advance past blank lines and return the first non-blank one, unconsumed.
fn skip_blank_lines(source: &mut LineSource<'_>) -> Result<Option<Line>, ParseError> {
    while let Some(line) = source.peek_line()? {
        if !line.is_blank() {
            return Ok(Some(line));
        }
        source.advance()?;
    }
    Ok(None)
}
