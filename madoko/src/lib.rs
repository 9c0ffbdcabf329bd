pub mod block;
pub mod fs;
pub mod inline;
pub mod metadata;
pub mod parser;
pub mod source;
pub mod visitor;

use crate::block::Block;
use crate::metadata::Metadata;
use crate::visitor::Visitor;

pub use crate::parser::{ErrorKind, ParseError, Parser};
pub use crate::source::{DEFAULT_EXTENSION, LineSource, SourceLocation};

/// A parsed document.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    /// Blocks in source order, includes already expanded.
    pub blocks: Vec<Block>,
    /// The header read before the first block.
    pub metadata: Metadata,
}

impl Document {
    /// Hand every block, in order, to `visitor`.
    pub fn accept<V: Visitor + ?Sized>(&self, visitor: &mut V) {
        for block in &self.blocks {
            visitor::walk_block(visitor, block);
        }
    }

    /// Number of top-level blocks.
    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    /// True when the document has no blocks.
    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }
}
