//! kdocer: fill empty KDoc comments with skeletons derived from the
//! declaration they document.
//!
//! - `kdocer phrase getUserName` → `Get user name`
//! - `kdocer generate function calculateTotal --param a --param b --returns`
//! - `kdocer enter Foo.kt --line 3 --column 4`: the editor's post-Enter hook
//! - `kdocer fill src/`: every empty doc comment in the matched files

mod config;
mod files;
mod kotlin;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use config::Config;
use kdocer_core::{
    Declaration, EnterHandler, FunctionDecl, Outcome, PropertyDecl, SkeletonGenerator,
    TextBuffer, TypeDecl,
};
use kotlin::KotlinIntrospector;
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser)]
#[command(
    name = "kdocer",
    about = "Generate KDoc skeletons for Kotlin declarations"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Config file. Defaults to ./kdocer.toml when present.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Act as if "smart indent on enter" were switched off
    #[arg(long, global = true)]
    no_smart_indent: bool,

    /// Debug logging on stderr (otherwise RUST_LOG, default warn)
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Command {
    /// Print the summary phrase for each identifier
    Phrase {
        #[arg(required = true)]
        identifiers: Vec<String>,
    },

    /// Print the doc skeleton for a declaration
    Generate {
        #[arg(value_enum)]
        kind: Kind,
        name: String,
        /// Parameter (function) or type parameter (type). Repeatable.
        #[arg(long = "param")]
        params: Vec<String>,
        /// The function returns a value
        #[arg(long)]
        returns: bool,
    },

    /// Run the post-Enter hook on a file, caret given by offset or line/column
    Enter {
        file: PathBuf,
        /// Caret byte offset
        #[arg(long, conflicts_with_all = ["line", "column"])]
        offset: Option<usize>,
        /// Caret line, 1-based
        #[arg(long, requires = "column")]
        line: Option<usize>,
        /// Caret column in characters, 1-based
        #[arg(long, requires = "line")]
        column: Option<usize>,
        /// Write the result back to FILE instead of printing it
        #[arg(short = 'i', long)]
        in_place: bool,
        /// Print a JSON report instead of the document
        #[arg(long)]
        json: bool,
    },

    /// Fill every empty doc comment in files, directories or globs
    Fill {
        #[arg(required = true)]
        files: Vec<String>,
        /// Only report; exit non-zero if any file would change
        #[arg(long)]
        check: bool,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum Kind {
    Function,
    Type,
    Property,
}

/// `kdocer enter --json` output.
#[derive(Debug, Serialize)]
struct EnterReport<'a> {
    applied: bool,
    reason: Option<String>,
    caret: usize,
    generated: Option<&'a str>,
    text: &'a str,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let mut config = Config::load(cli.config.as_deref())?;
    if cli.no_smart_indent {
        config.smart_indent_on_enter = false;
    }
    debug!(?config, "loaded configuration");

    match cli.command {
        Command::Phrase { identifiers } => {
            for ident in &identifiers {
                println!("{}", kdocer_core::to_phrase(ident));
            }
            Ok(())
        }
        Command::Generate {
            kind,
            name,
            params,
            returns,
        } => {
            println!("{}", build_declaration(kind, name, params, returns).generate());
            Ok(())
        }
        Command::Enter {
            file,
            offset,
            line,
            column,
            in_place,
            json,
        } => {
            let content = fs::read_to_string(&file)
                .with_context(|| format!("failed to read {}", file.display()))?;
            let caret = match (offset, line, column) {
                (Some(offset), _, _) => checked_offset(&content, offset)?,
                (None, Some(line), Some(column)) => line_column_offset(&content, line, column)?,
                _ => bail!("either --offset or --line/--column is required"),
            };
            enter(&config, &file, content, caret, in_place, json)
        }
        Command::Fill { files, check } => fill(&config, &files, check),
    }
}

/// Installs the stderr subscriber.
fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn build_declaration(kind: Kind, name: String, params: Vec<String>, returns: bool) -> Declaration {
    match kind {
        Kind::Function => Declaration::Function(FunctionDecl {
            name,
            params,
            returns_value: returns,
        }),
        Kind::Type => Declaration::Type(TypeDecl {
            name,
            type_params: params,
        }),
        // properties never carry tags
        Kind::Property => Declaration::Property(PropertyDecl { name }),
    }
}

fn enter(
    config: &Config,
    file: &Path,
    content: String,
    caret: usize,
    in_place: bool,
    json: bool,
) -> Result<()> {
    let mut buffer = TextBuffer::new(content, caret);

    let (outcome, reason) = if config.is_kotlin(file) {
        let outcome = EnterHandler::new(KotlinIntrospector)
            .post_process_enter(&mut buffer, &config.enter_settings());
        let reason = match &outcome {
            Outcome::Applied(_) => None,
            Outcome::PassThrough(reason) => Some(reason.to_string()),
        };
        (Some(outcome), reason)
    } else {
        (None, Some("not a Kotlin source file".to_string()))
    };

    let applied = match &outcome {
        Some(Outcome::Applied(applied)) => Some(applied),
        _ => None,
    };
    match (&applied, &reason) {
        (Some(applied), _) => info!(
            kind = applied.declaration.kind(),
            name = applied.declaration.name(),
            "generated doc skeleton"
        ),
        (None, Some(reason)) => info!(%reason, "enter passed through"),
        (None, None) => {}
    }

    if in_place && applied.is_some() {
        fs::write(file, buffer.text())
            .with_context(|| format!("failed to write {}", file.display()))?;
    }

    if json {
        let report = EnterReport {
            applied: applied.is_some(),
            reason,
            caret: buffer.caret(),
            generated: applied.map(|a| a.generated.as_str()),
            text: buffer.text(),
        };
        println!(
            "{}",
            serde_json::to_string_pretty(&report).context("failed to encode report")?
        );
    } else if !in_place {
        print!("{}", buffer.text());
    }
    Ok(())
}

fn fill(config: &Config, patterns: &[String], check: bool) -> Result<()> {
    let handler = EnterHandler::new(KotlinIntrospector);
    let settings = config.enter_settings();
    let mut pending = 0;

    for path in files::expand(patterns, &config.extensions)? {
        let content = fs::read_to_string(&path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        let mut buffer = TextBuffer::new(content, 0);
        let filled = handler.fill_empty_blocks(&mut buffer, &settings);
        if filled == 0 {
            continue;
        }

        if check {
            println!("{}: {} empty doc comment(s)", path.display(), filled);
            pending += 1;
        } else {
            fs::write(&path, buffer.text())
                .with_context(|| format!("failed to write {}", path.display()))?;
            println!("{}: filled {} doc comment(s)", path.display(), filled);
        }
    }

    if pending > 0 {
        bail!("{} file(s) have empty doc comments", pending);
    }
    Ok(())
}

/// Validate a caret byte offset against `text`.
fn checked_offset(text: &str, offset: usize) -> Result<usize> {
    if offset > text.len() || !text.is_char_boundary(offset) {
        bail!("offset {} is not a valid caret position", offset);
    }
    Ok(offset)
}

/// Byte offset of a 1-based line/column (column counted in characters).
/// The column may sit one past the last character of the line.
fn line_column_offset(text: &str, line: usize, column: usize) -> Result<usize> {
    if line == 0 || column == 0 {
        bail!("line and column are 1-based");
    }
    let mut line_start = 0;
    for (idx, raw) in text.split_inclusive('\n').enumerate() {
        if idx + 1 == line {
            let content = raw.strip_suffix('\n').unwrap_or(raw);
            let mut offsets = content
                .char_indices()
                .map(|(i, _)| i)
                .chain(std::iter::once(content.len()));
            return match offsets.nth(column - 1) {
                Some(rel) => Ok(line_start + rel),
                None => bail!("column {} is past the end of line {}", column, line),
            };
        }
        line_start += raw.len();
    }
    // caret on the empty line after a trailing newline
    if line == text.split_inclusive('\n').count() + 1 && column == 1 {
        return Ok(text.len());
    }
    bail!("line {} is past the end of the file", line)
}
