use once_cell::sync::Lazy;
use regex::Regex;

use crate::block::{BulletItem, Run, starts_block};
use crate::inline;
use crate::parser::ParseError;
use crate::source::LineSource;

static ITEM_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?<indent>[ \t]*)(?<bullet>[-+*])[ \t]?(?<text>.*)$").expect("valid item pattern")
});

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BulletKind {
    Dash,
    Plus,
    Star,
}

impl BulletKind {
    pub fn from_symbol(symbol: char) -> Option<Self> {
        match symbol {
            '-' => Some(BulletKind::Dash),
            '+' => Some(BulletKind::Plus),
            '*' => Some(BulletKind::Star),
            _ => None,
        }
    }

    pub fn symbol(self) -> char {
        match self {
            BulletKind::Dash => '-',
            BulletKind::Plus => '+',
            BulletKind::Star => '*',
        }
    }
}

pub fn matches(line: &str) -> bool {
    line.trim_start_matches([' ', '\t'])
        .starts_with(['-', '+', '*'])
}

/// Read a list item and any plain continuation lines that follow it.
pub fn read(source: &mut LineSource<'_>) -> Result<BulletItem, ParseError> {
    let line = source.get_line()?;
    let Some(captures) = ITEM_PATTERN.captures(&line.text) else {
        return Err(ParseError::syntax(
            format!("unexpected attempt to read a list item from '{}'", line.text),
            line.location,
        ));
    };

    let bullet = captures["bullet"]
        .chars()
        .next()
        .and_then(BulletKind::from_symbol)
        .ok_or_else(|| ParseError::syntax("invalid bullet symbol", line.location.clone()))?;
    let indent = indent_width(&captures["indent"]);
    let mut runs = inline::tokenize(captures["text"].trim());

    append_continuation(source, &mut runs)?;

    Ok(BulletItem {
        indent,
        bullet,
        runs,
        location: line.location,
    })
}

fn append_continuation(source: &mut LineSource<'_>, runs: &mut Vec<Run>) -> Result<(), ParseError> {
    while let Some(next) = source.peek_line()? {
        if next.is_blank() || starts_block(&next.text) {
            break;
        }
        source.advance()?;
        runs.extend(inline::tokenize(&format!(" {}", next.text.trim())));
    }
    Ok(())
}

/// Width of leading whitespace in columns, tabs advancing to the next multiple of 4.
fn indent_width(indent: &str) -> usize {
    indent.chars().fold(0, |col, c| match c {
        '\t' => col + 4 - (col % 4),
        _ => col + 1,
    })
}
