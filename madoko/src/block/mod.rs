pub mod attribute;
pub mod bullet;
pub mod code;
pub mod heading;
pub mod paragraph;
pub mod title;

use std::fmt;

use crate::source::SourceLocation;

pub use attribute::Attributes;
pub use bullet::BulletKind;
pub use heading::{HeadingCounters, MAX_HEADING_DEPTH};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RunKind {
    PlainText,
    Code,
    Italic,
}

/// A contiguous span of uniformly styled inline text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Run {
    pub kind: RunKind,
    pub text: String,
}

impl Run {
    pub fn new(kind: RunKind, text: impl Into<String>) -> Self {
        Run {
            kind,
            text: text.into(),
        }
    }

    pub fn plain(text: impl Into<String>) -> Self {
        Run::new(RunKind::PlainText, text)
    }
}

impl fmt::Display for Run {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            RunKind::PlainText => write!(f, "{}", self.text),
            RunKind::Code => write!(f, "`{}`", self.text),
            RunKind::Italic => write!(f, "_{}_", self.text),
        }
    }
}

/// One structural unit of a document.
#[derive(Debug, Clone, PartialEq)]
pub enum Block {
    Paragraph(Paragraph),
    Heading(Heading),
    BulletItem(BulletItem),
    CodeBlock(CodeBlock),
    Title(Title),
}

impl Block {
    pub fn runs(&self) -> &[Run] {
        match self {
            Block::Paragraph(b) => &b.runs,
            Block::Heading(b) => &b.runs,
            Block::BulletItem(b) => &b.runs,
            Block::CodeBlock(b) => &b.runs,
            Block::Title(b) => &b.runs,
        }
    }

    /// Where the block's first line was read.
    pub fn location(&self) -> &SourceLocation {
        match self {
            Block::Paragraph(b) => &b.location,
            Block::Heading(b) => &b.location,
            Block::BulletItem(b) => &b.location,
            Block::CodeBlock(b) => &b.location,
            Block::Title(b) => &b.location,
        }
    }

    /// Concatenated text of every run, without inline markup.
    pub fn text(&self) -> String {
        self.runs().iter().map(|r| r.text.as_str()).collect()
    }
}

/// A run of body text that matched no other block kind.
#[derive(Debug, Clone, PartialEq)]
pub struct Paragraph {
    pub runs: Vec<Run>,
    pub location: SourceLocation,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Heading {
    /// Number of leading `#` characters.
    pub level: usize,
    /// Section number, one counter per level down to this heading's own.
    pub numbers: Vec<usize>,
    pub attributes: Attributes,
    pub runs: Vec<Run>,
    pub location: SourceLocation,
}

impl Heading {
    /// Dotted section number, e.g. `1.2.1`.
    pub fn number_label(&self) -> String {
        let parts: Vec<String> = self.numbers.iter().map(|n| n.to_string()).collect();
        parts.join(".")
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct BulletItem {
    /// Leading indentation in columns (tabs advance to the next multiple of 4).
    pub indent: usize,
    pub bullet: BulletKind,
    pub runs: Vec<Run>,
    pub location: SourceLocation,
}

/// A fenced block; holds exactly one verbatim plain-text run.
#[derive(Debug, Clone, PartialEq)]
pub struct CodeBlock {
    pub language: Option<String>,
    pub runs: Vec<Run>,
    pub location: SourceLocation,
}

impl CodeBlock {
    pub fn code(&self) -> &str {
        self.runs.first().map(|r| r.text.as_str()).unwrap_or("")
    }
}

/// The document title, taken from the metadata header where `[TITLE]` appears.
#[derive(Debug, Clone, PartialEq)]
pub struct Title {
    pub runs: Vec<Run>,
    pub location: SourceLocation,
}

/// Whether `line` opens a block of a dedicated kind, as opposed to continuing
/// a paragraph or list item.
pub fn starts_block(line: &str) -> bool {
    heading::matches(line) || bullet::matches(line) || code::matches(line) || title::matches(line)
}
