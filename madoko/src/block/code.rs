use crate::block::{CodeBlock, Run};
use crate::parser::ParseError;
use crate::source::LineSource;

pub const FENCE: &str = "```";

pub fn matches(line: &str) -> bool {
    line.trim_start().starts_with(FENCE)
}

/// Read a fenced block. Body lines are kept verbatim; on the closing line,
/// text before the fence belongs to the body and text after it is dropped.
pub fn read(source: &mut LineSource<'_>) -> Result<CodeBlock, ParseError> {
    let opening = source.get_line()?;
    let Some(info) = opening.text.trim_start().strip_prefix(FENCE) else {
        return Err(ParseError::syntax(
            format!("unexpected attempt to read a code block from '{}'", opening.text),
            opening.location,
        ));
    };
    let info = info.trim();
    let language = (!info.is_empty()).then(|| info.to_string());

    let mut body: Vec<String> = Vec::new();
    loop {
        if source.peek_line()?.is_none() {
            return Err(ParseError::syntax(
                "code block is never closed",
                opening.location,
            )
            .with_note(format!("add a closing {} line", FENCE)));
        }

        let line = source.get_line()?;
        if let Some(end) = line.text.find(FENCE) {
            let before = &line.text[..end];
            if !before.trim().is_empty() {
                body.push(before.to_string());
            }
            break;
        }
        body.push(line.text);
    }

    Ok(CodeBlock {
        language,
        runs: vec![Run::plain(body.join("\n"))],
        location: opening.location,
    })
}
