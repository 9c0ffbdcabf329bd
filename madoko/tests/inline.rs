use madoko::block::{Run, RunKind};
use madoko::inline::{expand_entity, tokenize};

fn plain(text: &str) -> Run {
    Run::new(RunKind::PlainText, text)
}

fn joined(runs: &[Run]) -> String {
    runs.iter().map(|r| r.text.as_str()).collect()
}

#[test]
fn plain_line_is_one_run() {
    assert_eq!(tokenize("Just some words."), vec![plain("Just some words.")]);
}

#[test]
fn empty_line_yields_one_empty_run() {
    assert_eq!(tokenize(""), vec![plain("")]);
    assert_eq!(tokenize("``"), vec![plain("")]);
}

#[test]
fn backticks_delimit_code_runs() {
    assert_eq!(
        tokenize("call `run()` now"),
        vec![
            plain("call "),
            Run::new(RunKind::Code, "run()"),
            plain(" now"),
        ]
    );
}

#[test]
fn code_spans_are_literal() {
    assert_eq!(
        tokenize("`a_b &sect; c`"),
        vec![Run::new(RunKind::Code, "a_b &sect; c")]
    );
}

#[test]
fn underscores_delimit_italic_runs() {
    assert_eq!(
        tokenize("an _important_ word"),
        vec![
            plain("an "),
            Run::new(RunKind::Italic, "important"),
            plain(" word"),
        ]
    );
}

#[test]
fn code_inside_italics_resumes_italics() {
    assert_eq!(
        tokenize("_see `x` here_"),
        vec![
            Run::new(RunKind::Italic, "see "),
            Run::new(RunKind::Code, "x"),
            Run::new(RunKind::Italic, " here"),
        ]
    );
}

#[test]
fn entities_expand_case_insensitively() {
    let runs = tokenize("See &sect;1.1 &HeLLiP; &SECT;1.2.");
    assert_eq!(runs, vec![plain("See \u{a7}1.1 \u{2026} \u{a7}1.2.")]);
}

#[test]
fn unknown_entities_are_dropped() {
    assert_eq!(tokenize("a&bogus;b"), vec![plain("ab")]);
}

#[test]
fn unterminated_entities_are_kept() {
    assert_eq!(tokenize("fish & chips"), vec![plain("fish & chips")]);
    assert_eq!(tokenize("AT&T"), vec![plain("AT&T")]);
}

#[test]
fn numeric_entities() {
    assert_eq!(expand_entity("#167").as_deref(), Some("\u{a7}"));
    assert_eq!(expand_entity("#x2014").as_deref(), Some("\u{2014}"));
    assert_eq!(expand_entity("#xZZ"), None);
    assert_eq!(tokenize("&#65;&#x42;"), vec![plain("AB")]);
}

#[test]
fn concatenated_runs_reproduce_the_line() {
    let line = "mix `code` and _style_ with &amp; entities";
    assert_eq!(joined(&tokenize(line)), "mix code and style with & entities");
}

#[test]
fn runs_display_with_their_delimiters() {
    let rendered: String = tokenize("a `b` _c_")
        .iter()
        .map(|r| r.to_string())
        .collect();
    assert_eq!(rendered, "a `b` _c_");
}
