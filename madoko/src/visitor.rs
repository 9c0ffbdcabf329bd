use crate::block::{Block, BulletItem, CodeBlock, Heading, Paragraph, Title};

/// Walks a parsed document block by block.
///
/// Every method defaults to doing nothing, so an implementation only overrides
/// the block kinds it cares about.
pub trait Visitor {
    fn visit_paragraph(&mut self, _paragraph: &Paragraph) {}

    fn visit_heading(&mut self, _heading: &Heading) {}

    fn visit_bullet_item(&mut self, _item: &BulletItem) {}

    fn visit_code_block(&mut self, _block: &CodeBlock) {}

    fn visit_title(&mut self, _title: &Title) {}
}

/// Dispatch a single block to the matching visitor method.
pub fn walk_block<V: Visitor + ?Sized>(visitor: &mut V, block: &Block) {
    match block {
        Block::Paragraph(b) => visitor.visit_paragraph(b),
        Block::Heading(b) => visitor.visit_heading(b),
        Block::BulletItem(b) => visitor.visit_bullet_item(b),
        Block::CodeBlock(b) => visitor.visit_code_block(b),
        Block::Title(b) => visitor.visit_title(b),
    }
}
