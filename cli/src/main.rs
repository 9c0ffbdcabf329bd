mod config;
mod outline;
mod test_runner;

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::process;

use clap::{Parser, Subcommand};
use codespan_reporting::files::{Files, SimpleFiles};
use codespan_reporting::term;
use codespan_reporting::term::termcolor::{ColorChoice, StandardStream};
use log::LevelFilter;

use madoko::fs::{RealEnvironment, RealFileSystem};
use madoko::{Document, LineSource, ParseError};

use crate::config::Config;

const SUBCOMMANDS: &[&str] = &["read", "test", "help"];

#[derive(Parser)]
#[command(name = "mdk", version, about = "Madoko document reader")]
struct Cli {
    /// Disable colored error output
    #[arg(long, global = true)]
    no_color: bool,

    /// Configuration file (defaults to ./mdk.toml when present)
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Parse a document and print its outline
    Read(ReadArgs),

    /// Run .test.mdk fixture files
    Test(TestArgs),
}

#[derive(clap::Args)]
struct ReadArgs {
    /// Document to read
    file: String,

    /// Parse only (exit 0 if valid)
    #[arg(long)]
    check: bool,

    /// Dump the parsed document
    #[arg(long)]
    ast: bool,

    /// Print the metadata header
    #[arg(long)]
    metadata: bool,

    /// Extension for include paths that have none
    #[arg(long, value_name = "EXT")]
    extension: Option<String>,
}

#[derive(clap::Args)]
struct TestArgs {
    /// Path to a .test.mdk file or directory containing them
    path: String,

    /// Run only tests in these categories (subfolder names). Repeatable.
    #[arg(short, long)]
    category: Vec<String>,

    /// List available categories and exit
    #[arg(long)]
    list_categories: bool,
}

fn main() {
    // If the first positional arg is not a known subcommand, inject "read" so
    // `mdk book.mdk` works like `mdk read book.mdk`.
    let mut args: Vec<String> = std::env::args().collect();
    if let Some(pos) = first_positional(&args) {
        if !SUBCOMMANDS.contains(&args[pos].as_str()) {
            args.insert(pos, "read".to_string());
        }
    }

    let cli = Cli::parse_from(&args);

    let config = match Config::load(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("error: {}", e);
            process::exit(2);
        }
    };

    init_logging(cli.verbose, &config);
    let no_color = cli.no_color || config.no_color;

    match cli.command {
        Command::Read(read_args) => do_read(read_args, &config, no_color),
        Command::Test(test_args) => {
            let path = Path::new(&test_args.path);
            if test_args.list_categories {
                test_runner::list_categories(path);
                return;
            }
            let exit_code = test_runner::run_tests(
                path,
                no_color,
                &test_args.category,
                config.default_extension.as_deref(),
            );
            process::exit(exit_code);
        }
    }
}

/// Index of the first argument that is neither a flag nor the value of `--config`.
fn first_positional(args: &[String]) -> Option<usize> {
    let mut skip_value = false;
    for (i, arg) in args.iter().enumerate().skip(1) {
        if skip_value {
            skip_value = false;
        } else if arg == "--config" {
            skip_value = true;
        } else if !arg.starts_with('-') {
            return Some(i);
        }
    }
    None
}

fn init_logging(verbose: u8, config: &Config) {
    let level = match verbose {
        0 => config.log_filter().unwrap_or(LevelFilter::Warn),
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();
}

fn do_read(args: ReadArgs, config: &Config, no_color: bool) {
    let color_choice = if no_color {
        ColorChoice::Never
    } else {
        ColorChoice::Auto
    };

    let fs = RealFileSystem;
    let env = RealEnvironment;
    let source = match LineSource::open(&args.file, &fs, &env) {
        Ok(source) => source,
        Err(e) => {
            eprintln!("error: cannot read '{}': {}", args.file, e);
            process::exit(1);
        }
    };
    let source = match args.extension.as_ref().or(config.default_extension.as_ref()) {
        Some(ext) => source.with_default_extension(ext.as_str()),
        None => source,
    };

    log::info!("reading {}", args.file);
    let document = match madoko::Parser::new(source).parse() {
        Ok(document) => document,
        Err(errors) => {
            emit_parse_errors(&errors, color_choice);
            process::exit(1);
        }
    };

    // --check: parse succeeded, exit
    if args.check {
        eprintln!(
            "ok: {} parsed successfully ({} blocks)",
            args.file,
            document.len()
        );
        return;
    }

    // --ast: dump the document
    if args.ast {
        println!("{:#?}", document);
        return;
    }

    if args.metadata {
        print_metadata(&document);
        return;
    }

    print!("{}", outline::render(&document));
}

fn print_metadata(document: &Document) {
    for (key, value) in document.metadata.iter() {
        println!("{}: {}", key, value);
    }
}

/// Print each error as a diagnostic labelled with its source line, loading
/// every file an error points into at most once.
fn emit_parse_errors(errors: &[ParseError], color_choice: ColorChoice) {
    let writer = StandardStream::stderr(color_choice);
    let config = term::Config::default();

    let mut files = SimpleFiles::new();
    let mut ids: HashMap<PathBuf, Option<usize>> = HashMap::new();

    for error in errors {
        let label = error.location.as_ref().and_then(|location| {
            let id = *ids.entry(location.file.clone()).or_insert_with(|| {
                std::fs::read_to_string(&location.file)
                    .ok()
                    .map(|text| files.add(location.file.display().to_string(), text))
            });
            let id = id?;
            let range = files.line_range(id, location.line.checked_sub(1)?).ok()?;
            Some((id, range))
        });

        let mut diagnostic = error.to_diagnostic(label.clone());
        if label.is_none() {
            if let Some(location) = &error.location {
                diagnostic.message = format!("{}: {}", location, diagnostic.message);
            }
        }
        let _ = term::emit_to_write_style(&mut writer.lock(), &config, &files, &diagnostic);
    }
}
