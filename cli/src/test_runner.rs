use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use madoko::fs::{RealFileSystem, StaticEnvironment};
use madoko::{Document, LineSource, ParseError, Parser};

use crate::outline;

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ExpectedError {
    /// Substring that must appear in the error message.
    pub contains: String,

    /// If set, the error must be reported on this 1-based line of the body.
    #[serde(default)]
    pub line: Option<usize>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TestConfig {
    /// Human-readable test description.
    #[serde(default)]
    pub description: Option<String>,

    /// Expected number of blocks in the parsed document.
    #[serde(default)]
    pub expect_blocks: Option<usize>,

    /// Expected outline, as printed by `mdk read` (trimmed comparison).
    #[serde(default)]
    pub expect_outline: Option<String>,

    /// If true, the test expects parsing to fail.
    #[serde(default)]
    pub expect_parse_error: bool,

    /// Expected parse errors, in order. Implies a failing parse.
    #[serde(default)]
    pub expect_errors: Option<Vec<ExpectedError>>,
}

impl TestConfig {
    fn expects_failure(&self) -> bool {
        self.expect_parse_error || self.expect_errors.is_some()
    }
}

/// Split a `.test.mdk` file into its TOML config and document body.
fn parse_test_file(content: &str) -> Result<(TestConfig, &str), String> {
    let content = content.trim_start_matches('\u{feff}'); // strip BOM

    if !content.starts_with("---") {
        return Err("missing opening --- frontmatter delimiter".into());
    }

    let after_open = &content[3..];
    let after_open = after_open
        .strip_prefix('\n')
        .or_else(|| after_open.strip_prefix("\r\n"))
        .unwrap_or(after_open);

    let close_pos = after_open
        .find("\n---")
        .ok_or("missing closing --- frontmatter delimiter")?;

    let toml_str = after_open[..close_pos].trim_end_matches('\r');
    let rest_start = close_pos + 4; // skip \n---
    let body = after_open[rest_start..]
        .strip_prefix("\r\n")
        .or_else(|| after_open[rest_start..].strip_prefix('\n'))
        .unwrap_or(&after_open[rest_start..]);

    let config: TestConfig =
        toml::from_str(toml_str).map_err(|e| format!("TOML parse error: {}", e))?;

    Ok((config, body))
}

pub enum TestOutcome {
    Pass,
    Fail(String),
}

pub struct TestResult {
    pub path: PathBuf,
    pub description: Option<String>,
    pub outcome: TestOutcome,
}

fn run_single_test(path: &Path, default_extension: Option<&str>) -> TestResult {
    // 1. Read file
    let content = match std::fs::read_to_string(path) {
        Ok(c) => c,
        Err(e) => {
            return TestResult {
                path: path.to_path_buf(),
                description: None,
                outcome: TestOutcome::Fail(format!("cannot read file: {}", e)),
            };
        }
    };

    // 2. Parse frontmatter
    let (config, body) = match parse_test_file(&content) {
        Ok(pair) => pair,
        Err(e) => {
            return TestResult {
                path: path.to_path_buf(),
                description: None,
                outcome: TestOutcome::Fail(format!("frontmatter error: {}", e)),
            };
        }
    };

    let description = config.description.clone();

    // 3. Parse the body; includes resolve next to the fixture.
    let fixture_dir = path
        .parent()
        .map(|p| p.to_path_buf())
        .unwrap_or_else(|| PathBuf::from("."));
    let fs = RealFileSystem;
    let env = StaticEnvironment::new(fixture_dir);
    let mut source = LineSource::from_text(body, path, &fs, &env);
    if let Some(ext) = default_extension {
        source = source.with_default_extension(ext);
    }
    let parse_result = Parser::new(source).parse();

    // 4. Compare with expectations
    let failure = match parse_result {
        Err(errors) if config.expects_failure() => config
            .expect_errors
            .as_deref()
            .and_then(|expected| check_errors(&errors, expected)),
        Err(errors) => {
            let msgs: Vec<String> = errors.iter().map(|e| e.to_string()).collect();
            Some(format!("unexpected parse error: {}", msgs.join("; ")))
        }
        Ok(_) if config.expects_failure() => {
            Some("expected parse error, but parsing succeeded".into())
        }
        Ok(document) => check_document(&document, &config),
    };

    TestResult {
        path: path.to_path_buf(),
        description,
        outcome: match failure {
            Some(reason) => TestOutcome::Fail(reason),
            None => TestOutcome::Pass,
        },
    }
}

/// Check a successfully parsed document. Returns `Some(reason)` on mismatch.
fn check_document(document: &Document, config: &TestConfig) -> Option<String> {
    if let Some(expected) = config.expect_blocks {
        if document.len() != expected {
            return Some(format!(
                "expected {} block(s), got {}",
                expected,
                document.len()
            ));
        }
    }

    if let Some(expected) = &config.expect_outline {
        let actual = outline::render(document);
        let (actual, expected) = (actual.trim(), expected.trim());
        if actual != expected {
            return Some(format!(
                "outline mismatch\n  expected:\n{}\n  actual:\n{}",
                indent(expected),
                indent(actual)
            ));
        }
    }

    None
}

fn indent(text: &str) -> String {
    text.lines()
        .map(|l| format!("    {}", l))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Check that actual errors match expectations. Returns `Some(reason)` on mismatch.
fn check_errors(actual: &[ParseError], expected: &[ExpectedError]) -> Option<String> {
    if actual.len() != expected.len() {
        let actual_msgs: Vec<String> = actual.iter().map(|e| format!("  - {}", e)).collect();
        return Some(format!(
            "expected {} error(s), got {}\n  actual errors:\n{}",
            expected.len(),
            actual.len(),
            actual_msgs.join("\n")
        ));
    }

    for (i, (actual, expected)) in actual.iter().zip(expected.iter()).enumerate() {
        if !actual.message.contains(&expected.contains) {
            return Some(format!(
                "error[{}]: expected message containing \"{}\", got: {}",
                i, expected.contains, actual.message
            ));
        }

        if let Some(expected_line) = expected.line {
            match actual.line() {
                Some(line) if line == expected_line => {}
                Some(line) => {
                    return Some(format!(
                        "error[{}]: expected on line {}, but reported on line {}",
                        i, expected_line, line
                    ));
                }
                None => {
                    return Some(format!(
                        "error[{}]: expected on line {}, but error has no location",
                        i, expected_line
                    ));
                }
            }
        }
    }

    None
}

const FIXTURE_SUFFIX: &str = ".test.mdk";

/// Fixture files grouped by the folder they sit in, relative to `root`.
/// Files directly in `root` fall in category "".
fn discover_categorized(root: &Path) -> BTreeMap<String, Vec<PathBuf>> {
    let mut categories: BTreeMap<String, Vec<PathBuf>> = BTreeMap::new();
    let mut pending = vec![root.to_path_buf()];
    while let Some(dir) = pending.pop() {
        let Ok(entries) = std::fs::read_dir(&dir) else {
            continue;
        };
        for path in entries.flatten().map(|e| e.path()) {
            if path.is_dir() {
                pending.push(path);
            } else if is_fixture(&path) {
                let category = dir
                    .strip_prefix(root)
                    .map(|p| p.to_string_lossy().replace('\\', "/"))
                    .unwrap_or_default();
                categories.entry(category).or_default().push(path);
            }
        }
    }
    for files in categories.values_mut() {
        files.sort();
    }
    categories
}

fn is_fixture(path: &Path) -> bool {
    path.file_name()
        .and_then(|n| n.to_str())
        .is_some_and(|n| n.ends_with(FIXTURE_SUFFIX))
}

fn category_label(category: &str) -> &str {
    if category.is_empty() { "(root)" } else { category }
}

/// List available categories for the given test path.
pub fn list_categories(path: &Path) {
    if path.is_file() {
        eprintln!("(single file, no categories)");
        return;
    }

    let categories = discover_categorized(path);
    if categories.is_empty() {
        eprintln!("no {} files found in {}", FIXTURE_SUFFIX, path.display());
        return;
    }

    eprintln!("available categories:");
    for (category, files) in &categories {
        eprintln!("  {} ({} tests)", category_label(category), files.len());
    }
}

fn paint(text: &str, code: &str, no_color: bool) -> String {
    if no_color {
        text.to_string()
    } else {
        format!("\x1b[{}m{}\x1b[0m", code, text)
    }
}

/// Select the categories named on the command line; a name also selects its
/// subfolders. An empty request selects everything.
fn select<'c>(
    all: &'c BTreeMap<String, Vec<PathBuf>>,
    requested: &[String],
) -> BTreeMap<&'c str, &'c [PathBuf]> {
    if requested.is_empty() {
        return all.iter().map(|(k, v)| (k.as_str(), v.as_slice())).collect();
    }

    let mut selected = BTreeMap::new();
    for name in requested {
        let name = name.trim_matches('/');
        let prefix = format!("{}/", name);
        let before = selected.len();
        for (category, files) in all {
            if category == name || category.starts_with(&prefix) {
                selected.insert(category.as_str(), files.as_slice());
            }
        }
        if selected.len() == before {
            let available: Vec<&str> = all.keys().map(|k| category_label(k)).collect();
            eprintln!(
                "warning: category '{}' not found (available: {})",
                name,
                available.join(", ")
            );
        }
    }
    selected
}

/// Run every fixture under `path` (or the single fixture `path`), printing a
/// PASS/FAIL line per test and a summary. Returns the process exit code.
pub fn run_tests(
    path: &Path,
    no_color: bool,
    categories: &[String],
    default_extension: Option<&str>,
) -> i32 {
    let all = if path.is_file() {
        BTreeMap::from([(String::new(), vec![path.to_path_buf()])])
    } else {
        discover_categorized(path)
    };
    if all.is_empty() {
        eprintln!("no {} files found in {}", FIXTURE_SUFFIX, path.display());
        return 1;
    }

    let selected = if path.is_file() {
        select(&all, &[])
    } else {
        select(&all, categories)
    };
    if selected.is_empty() {
        eprintln!("no matching categories found");
        return 1;
    }

    let mut passed = 0usize;
    let mut failures: Vec<TestResult> = Vec::new();

    for (category, files) in &selected {
        if !path.is_file() {
            eprintln!();
            eprintln!("{}", paint(category_label(category), "1", no_color));
        }

        for file in *files {
            let result = run_single_test(file, default_extension);
            let label = result.description.clone().unwrap_or_else(|| {
                file.file_stem()
                    .and_then(|s| s.to_str())
                    .unwrap_or("?")
                    .to_string()
            });
            match &result.outcome {
                TestOutcome::Pass => {
                    passed += 1;
                    eprintln!("  {}  {}", paint("PASS", "32", no_color), label);
                }
                TestOutcome::Fail(_) => {
                    eprintln!("  {}  {}", paint("FAIL", "31", no_color), label);
                    failures.push(result);
                }
            }
        }
    }

    if !failures.is_empty() {
        eprintln!();
        eprintln!("failures:");
        for failure in &failures {
            eprintln!();
            eprintln!("  --- {} ---", failure.path.display());
            if let TestOutcome::Fail(reason) = &failure.outcome {
                for line in reason.lines() {
                    eprintln!("  {}", line);
                }
            }
        }
    }

    eprintln!();
    if failures.is_empty() {
        eprintln!(
            "test result: {}. {} passed, 0 failed",
            paint("ok", "32", no_color),
            passed
        );
        0
    } else {
        eprintln!(
            "test result: {}. {} passed, {} failed (of {})",
            paint("FAILED", "31", no_color),
            passed,
            failures.len(),
            passed + failures.len()
        );
        1
    }
}
