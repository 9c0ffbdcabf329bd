use crate::block::{Run, Title};
use crate::metadata::Metadata;
use crate::parser::ParseError;
use crate::source::LineSource;

pub const TITLE_MARKER: &str = "[TITLE]";

pub fn matches(line: &str) -> bool {
    line.trim() == TITLE_MARKER
}

/// Consume a `[TITLE]` marker. The title text comes from the metadata header;
/// with no usable title there is no block. The text is taken verbatim, as a
/// single plain run.
pub fn read(source: &mut LineSource<'_>, metadata: &Metadata) -> Result<Option<Title>, ParseError> {
    let line = source.get_line()?;
    if !matches(&line.text) {
        return Err(ParseError::syntax(
            format!("unexpected attempt to read a title from '{}'", line.text),
            line.location,
        ));
    }

    let Some(title) = metadata.title() else {
        log::debug!("{}: no title metadata, dropping {}", line.location, TITLE_MARKER);
        return Ok(None);
    };

    Ok(Some(Title {
        runs: vec![Run::plain(title.trim())],
        location: line.location,
    }))
}
