//! Inline run tokenizer.
//!
//! One left-to-right pass over a logical line. A backtick toggles a code span,
//! an underscore outside code toggles italics, and `&name;` outside code expands
//! a character entity. Delimiters never appear in the produced runs.

mod entity;

use crate::block::{Run, RunKind};

pub use entity::expand_entity;

/// Split `line` into styled runs. Never returns an empty vector: a line that
/// produces no text yields a single empty plain-text run.
pub fn tokenize(line: &str) -> Vec<Run> {
    let mut scanner = RunScanner::default();
    for c in line.chars() {
        scanner.push(c);
    }
    scanner.finish()
}

#[derive(Default)]
struct RunScanner {
    runs: Vec<Run>,
    text: String,
    code: bool,
    italic: bool,
    /// Name collected since an `&`, while an entity reference is open.
    entity: Option<String>,
}

impl RunScanner {
    fn kind(&self) -> RunKind {
        if self.code {
            RunKind::Code
        } else if self.italic {
            RunKind::Italic
        } else {
            RunKind::PlainText
        }
    }

    fn push(&mut self, c: char) {
        if let Some(name) = self.entity.as_mut() {
            if c == ';' {
                let name = std::mem::take(name);
                self.entity = None;
                match expand_entity(&name) {
                    Some(expansion) => self.text.push_str(&expansion),
                    None => log::trace!("dropping unknown entity &{};", name),
                }
                return;
            }
            if c.is_ascii_alphanumeric() || (c == '#' && name.is_empty()) {
                name.push(c);
                return;
            }
            self.abandon_entity();
        }

        match c {
            '`' => {
                self.flush();
                self.code = !self.code;
            }
            _ if self.code => self.text.push(c),
            '_' => {
                self.flush();
                self.italic = !self.italic;
            }
            '&' => self.entity = Some(String::new()),
            _ => self.text.push(c),
        }
    }

    /// Keep an unterminated reference as the literal text it was.
    fn abandon_entity(&mut self) {
        if let Some(name) = self.entity.take() {
            self.text.push('&');
            self.text.push_str(&name);
        }
    }

    fn flush(&mut self) {
        if !self.text.is_empty() {
            let kind = self.kind();
            self.runs.push(Run::new(kind, std::mem::take(&mut self.text)));
        }
    }

    fn finish(mut self) -> Vec<Run> {
        self.abandon_entity();
        self.flush();
        if self.runs.is_empty() {
            self.runs.push(Run::plain(""));
        }
        self.runs
    }
}
