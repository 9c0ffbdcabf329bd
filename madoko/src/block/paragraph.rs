use crate::block::{Paragraph, heading};
use crate::inline;
use crate::parser::ParseError;
use crate::source::LineSource;

/// Read a paragraph: the current line and every following non-blank line up to
/// the next heading.
pub fn read(source: &mut LineSource<'_>) -> Result<Paragraph, ParseError> {
    let first = source.get_line()?;
    let mut runs = inline::tokenize(first.text.trim());

    while let Some(next) = source.peek_line()? {
        if next.is_blank() || heading::matches(&next.text) {
            break;
        }
        source.advance()?;

        // Keep the continued line apart from the end of the previous one.
        let text = if next.text.starts_with(char::is_whitespace) {
            next.text
        } else {
            format!(" {}", next.text)
        };
        runs.extend(inline::tokenize(text.trim_end()));
    }

    Ok(Paragraph {
        runs,
        location: first.location,
    })
}
