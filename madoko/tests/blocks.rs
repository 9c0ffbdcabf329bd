use madoko::block::{Block, BulletKind, Run, RunKind};
use madoko::fs::{MemoryFileSystem, StaticEnvironment};
use madoko::{Document, LineSource, ParseError, Parser};

fn parse(text: &str) -> Result<Document, Vec<ParseError>> {
    let fs = MemoryFileSystem::new();
    let env = StaticEnvironment::new("/work");
    Parser::new(LineSource::from_text(text, "/work/doc.mdk", &fs, &env)).parse()
}

fn blocks(text: &str) -> Vec<Block> {
    parse(text).expect("parse failed").blocks
}

fn plain(text: &str) -> Run {
    Run::new(RunKind::PlainText, text)
}

#[test]
fn heading_reads_level_text_and_attributes() {
    let blocks = blocks("## Getting `started` {#start; .intro}");
    let Block::Heading(heading) = &blocks[0] else {
        panic!("expected a heading, got {:?}", blocks[0]);
    };
    assert_eq!(heading.level, 2);
    assert_eq!(
        heading.runs,
        vec![plain("Getting "), Run::new(RunKind::Code, "started")]
    );
    assert_eq!(heading.attributes.id(), Some("start"));
    assert_eq!(heading.attributes.classes().collect::<Vec<_>>(), vec!["intro"]);
}

#[test]
fn heading_never_continues_onto_the_next_line() {
    let blocks = blocks("# Heading\nbody text\nmore body");
    assert_eq!(blocks.len(), 2);
    assert_eq!(blocks[0].text(), "Heading");
    assert!(matches!(blocks[1], Block::Paragraph(_)));
    assert_eq!(blocks[1].text(), "body text more body");
}

#[test]
fn heading_numbers_follow_the_counters() {
    let text = "# a\n## b\n### c\n### d\n## e\n### f\n# g\n## h\n### i";
    let numbers: Vec<Vec<usize>> = blocks(text)
        .iter()
        .map(|b| match b {
            Block::Heading(h) => h.numbers.clone(),
            other => panic!("expected a heading, got {:?}", other),
        })
        .collect();
    assert_eq!(
        numbers,
        vec![
            vec![1],
            vec![1, 1],
            vec![1, 1, 1],
            vec![1, 1, 2],
            vec![1, 2],
            vec![1, 2, 1],
            vec![2],
            vec![2, 1],
            vec![2, 1, 1],
        ]
    );
}

#[test]
fn skipped_heading_levels_count_as_zero() {
    let blocks = blocks("# a\n### b");
    let Block::Heading(heading) = &blocks[1] else {
        panic!("expected a heading");
    };
    assert_eq!(heading.number_label(), "1.0.1");
}

#[test]
fn bullet_items_record_glyph_and_indent() {
    let blocks = blocks("- first\n  + second\n\t* third");
    let items: Vec<(usize, BulletKind, String)> = blocks
        .iter()
        .map(|b| match b {
            Block::BulletItem(item) => (item.indent, item.bullet, b.text()),
            other => panic!("expected a bullet item, got {:?}", other),
        })
        .collect();
    assert_eq!(
        items,
        vec![
            (0, BulletKind::Dash, "first".to_string()),
            (2, BulletKind::Plus, "second".to_string()),
            (4, BulletKind::Star, "third".to_string()),
        ]
    );
}

#[test]
fn bullet_item_continues_onto_plain_lines() {
    let blocks = blocks("- an item\n  that wraps\nand wraps again\n- next");
    assert_eq!(blocks.len(), 2);
    assert_eq!(blocks[0].text(), "an item that wraps and wraps again");
    assert_eq!(blocks[1].text(), "next");
}

#[test]
fn empty_fence_pair_yields_one_empty_run() {
    let blocks = blocks("```\n```");
    let Block::CodeBlock(code) = &blocks[0] else {
        panic!("expected a code block");
    };
    assert_eq!(code.runs, vec![plain("")]);
    assert_eq!(code.language, None);
}

#[test]
fn code_body_is_verbatim() {
    let blocks = blocks("```rust\nfn main() {\n    let _x = `a` &amp; 1;\n}\n```\nafter");
    let Block::CodeBlock(code) = &blocks[0] else {
        panic!("expected a code block");
    };
    assert_eq!(code.language.as_deref(), Some("rust"));
    assert_eq!(code.code(), "fn main() {\n    let _x = `a` &amp; 1;\n}");
    assert_eq!(code.runs.len(), 1);
    assert_eq!(blocks[1].text(), "after");
}

#[test]
fn closing_fence_keeps_leading_text_and_drops_trailing_text() {
    let blocks = blocks("```\ncode1\ncode2``` ignored\nnext");
    assert_eq!(blocks[0].text(), "code1\ncode2");
    assert_eq!(blocks.len(), 2);
}

#[test]
fn indented_closing_fence_adds_no_body_line() {
    let blocks = blocks("```\ncode\n   ```");
    let Block::CodeBlock(code) = &blocks[0] else {
        panic!("expected a code block");
    };
    assert_eq!(code.code(), "code");
}

#[test]
fn code_block_swallows_blank_lines_and_markup() {
    let blocks = blocks("```\n# not a heading\n\n- not a bullet\n```");
    assert_eq!(blocks.len(), 1);
    assert_eq!(blocks[0].text(), "# not a heading\n\n- not a bullet");
}

#[test]
fn unterminated_fence_is_an_error_at_its_opening_line() {
    let errors = parse("intro\n\n```\ncode").unwrap_err();
    assert_eq!(errors.len(), 1);
    assert!(errors[0].message.contains("never closed"));
    assert_eq!(errors[0].line(), Some(3));
}

#[test]
fn title_comes_from_metadata() {
    let blocks = blocks("Title:  The Book  \n\n[TITLE]\n\nText");
    assert_eq!(blocks.len(), 2);
    let Block::Title(title) = &blocks[0] else {
        panic!("expected a title");
    };
    assert_eq!(title.runs, vec![plain("The Book")]);
}

#[test]
fn title_text_is_taken_verbatim() {
    let blocks = blocks("Title: my_project `x` &sect;\n\n[TITLE]");
    let Block::Title(title) = &blocks[0] else {
        panic!("expected a title");
    };
    assert_eq!(title.runs, vec![plain("my_project `x` &sect;")]);
}

#[test]
fn title_without_metadata_is_dropped() {
    assert!(blocks("[TITLE]").is_empty());
    assert!(blocks("Title:   \n\n  [TITLE]  ").is_empty());
}

#[test]
fn paragraph_joins_lines_with_single_spaces() {
    let blocks = blocks("one\ntwo\n   three\n\nnext");
    assert_eq!(blocks.len(), 2);
    assert_eq!(
        blocks[0].runs(),
        &[plain("one"), plain(" two"), plain("   three")][..]
    );
    assert_eq!(blocks[1].text(), "next");
}

#[test]
fn paragraph_ends_at_a_heading() {
    let blocks = blocks("one\ntwo\n# Three");
    assert_eq!(blocks.len(), 2);
    assert!(matches!(blocks[1], Block::Heading(_)));
}

#[test]
fn blocks_record_where_they_start() {
    let blocks = blocks("\n\n# Heading\n\nbody\n");
    let lines: Vec<usize> = blocks.iter().map(|b| b.location().line).collect();
    assert_eq!(lines, vec![3, 5]);
}
