use once_cell::sync::Lazy;
use regex::Regex;

use crate::block::{Attributes, Heading};
use crate::inline;
use crate::parser::ParseError;
use crate::source::LineSource;

/// Deepest heading level that takes part in numbering.
pub const MAX_HEADING_DEPTH: usize = 10;

static HEADING_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?<level>#+)\s*(?<text>.*?)\s*(?:\{(?<attrs>[^{}]*)\})?\s*$")
        .expect("valid heading pattern")
});

/// Per-level section counters, owned by the document assembler for the length
/// of one parse.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HeadingCounters {
    counters: [usize; MAX_HEADING_DEPTH],
}

impl HeadingCounters {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count a heading at `level` (1-based): bump its counter, reset every
    /// deeper one, and return the counters down to `level`.
    pub fn assign(&mut self, level: usize) -> Vec<usize> {
        let level = level.clamp(1, MAX_HEADING_DEPTH);
        self.counters[level - 1] += 1;
        for counter in &mut self.counters[level..] {
            *counter = 0;
        }
        self.counters[..level].to_vec()
    }
}

pub fn matches(line: &str) -> bool {
    line.starts_with('#')
}

/// Read a heading. A heading is always exactly one source line.
pub fn read(
    source: &mut LineSource<'_>,
    counters: &mut HeadingCounters,
) -> Result<Heading, ParseError> {
    let line = source.get_line()?;
    let captures = HEADING_PATTERN.captures(&line.text).ok_or_else(|| {
        ParseError::syntax(
            format!("unexpected attempt to read a heading from '{}'", line.text),
            line.location.clone(),
        )
    })?;

    let level = captures["level"].len();
    if level > MAX_HEADING_DEPTH {
        return Err(ParseError::syntax(
            format!(
                "heading level {} exceeds the maximum depth of {}",
                level, MAX_HEADING_DEPTH
            ),
            line.location,
        ));
    }

    let attributes = match captures.name("attrs") {
        Some(attrs) => Attributes::parse(attrs.as_str())
            .map_err(|e| ParseError::syntax(e.to_string(), line.location.clone()))?,
        None => Attributes::default(),
    };

    let numbers = counters.assign(level);
    Ok(Heading {
        level,
        numbers,
        attributes,
        runs: inline::tokenize(&captures["text"]),
        location: line.location,
    })
}
