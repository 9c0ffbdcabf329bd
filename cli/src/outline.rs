use std::fmt::Write;

use madoko::Document;
use madoko::block::{BulletItem, CodeBlock, Heading, Paragraph, Run, Title};
use madoko::visitor::Visitor;

/// Render a one-line-per-block outline of `document`.
pub fn render(document: &Document) -> String {
    let mut outline = Outline::default();
    document.accept(&mut outline);
    outline.out
}

#[derive(Default)]
struct Outline {
    out: String,
}

fn runs(runs: &[Run]) -> String {
    runs.iter().map(Run::to_string).collect()
}

impl Visitor for Outline {
    fn visit_paragraph(&mut self, paragraph: &Paragraph) {
        let _ = writeln!(self.out, "paragraph: {}", runs(&paragraph.runs));
    }

    fn visit_heading(&mut self, heading: &Heading) {
        let _ = writeln!(
            self.out,
            "{} {} {}",
            "#".repeat(heading.level),
            heading.number_label(),
            runs(&heading.runs)
        );
    }

    fn visit_bullet_item(&mut self, item: &BulletItem) {
        let _ = writeln!(
            self.out,
            "{}{} {}",
            " ".repeat(item.indent),
            item.bullet.symbol(),
            runs(&item.runs)
        );
    }

    fn visit_code_block(&mut self, block: &CodeBlock) {
        let count = if block.code().is_empty() {
            0
        } else {
            block.code().lines().count()
        };
        let _ = writeln!(
            self.out,
            "code[{}]: {} line{}",
            block.language.as_deref().unwrap_or(""),
            count,
            if count == 1 { "" } else { "s" }
        );
    }

    fn visit_title(&mut self, title: &Title) {
        let _ = writeln!(self.out, "title: {}", runs(&title.runs));
    }
}
