// SPDX-License-Identifier: MIT OR Apache-2.0
//! lookup CLI binary - dotted-path access to JSON documents

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use lookup::{Options, Value};
use lookup_cli::{
    Coercion, Layout, coerce, merge_documents, parse_document, parse_literal, render_document,
    render_value, split_keys,
};
use std::fs;
use std::io::{self, Read, Write};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "lookup")]
#[command(version, about, long_about = None)]
struct Args {
    /// Output file (default: stdout)
    #[arg(short, long, global = true)]
    output: Option<PathBuf>,

    /// Compact JSON output
    #[arg(short = 'c', long, global = true)]
    compact: bool,

    /// Indentation level for pretty output
    #[arg(short = 'i', long, default_value = "2", global = true)]
    indent: usize,

    /// Decode top-level text that holds a JSON object or array
    #[arg(long, global = true)]
    sniff: bool,

    /// Log debug diagnostics to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

impl Args {
    const fn layout(&self) -> Layout {
        Layout {
            compact: self.compact,
            indent: self.indent,
        }
    }

    const fn options(&self) -> Options {
        if self.sniff {
            Options::sniffing()
        } else {
            Options {
                text: lookup::TextPolicy::Opaque,
            }
        }
    }
}

/// Subcommands for lookup CLI
#[derive(Subcommand)]
enum Commands {
    /// Print the value at a dotted path
    Get {
        /// Dotted path, e.g. `data.list.0`
        path: String,
        /// Input file (reads from stdin if not provided)
        #[arg(value_name = "FILE")]
        file: Option<PathBuf>,
        /// Print a coerced scalar instead of the raw value
        #[arg(long = "as", value_enum)]
        coercion: Option<Coercion>,
    },
    /// Set the value at a dotted path and print the document
    Set {
        /// Dotted path
        path: String,
        /// JSON literal; anything that is not JSON is stored as text
        value: String,
        /// Input file (reads from stdin if not provided)
        #[arg(value_name = "FILE")]
        file: Option<PathBuf>,
    },
    /// Merge mapping documents, later keys win
    Merge {
        /// JSON files to merge
        files: Vec<PathBuf>,
    },
    /// Keep only the listed paths
    Keep {
        /// Comma-separated dotted paths
        keys: String,
        /// Input file (reads from stdin if not provided)
        #[arg(value_name = "FILE")]
        file: Option<PathBuf>,
    },
    /// Null out the listed paths
    Null {
        /// Comma-separated dotted paths
        keys: String,
        /// Input file (reads from stdin if not provided)
        #[arg(value_name = "FILE")]
        file: Option<PathBuf>,
    },
    /// Drop absent entries, and empty ones unless told otherwise
    Compact {
        /// Input file (reads from stdin if not provided)
        #[arg(value_name = "FILE")]
        file: Option<PathBuf>,
        /// Keep empty mappings, sequences and strings
        #[arg(long = "keep-empty")]
        keep_empty: bool,
    },
    /// Format JSON (pretty-print or compact)
    Format {
        /// Input file (reads from stdin if not provided)
        #[arg(value_name = "FILE")]
        file: Option<PathBuf>,
    },
}

fn main() {
    let args = Args::parse();
    init_logging(args.verbose);

    let result = match &args.command {
        Commands::Get {
            path,
            file,
            coercion,
        } => run_get(&args, path, file.as_ref(), *coercion),
        Commands::Set { path, value, file } => run_set(&args, path, value, file.as_ref()),
        Commands::Merge { files } => run_merge(&args, files),
        Commands::Keep { keys, file } => run_keep(&args, keys, file.as_ref()),
        Commands::Null { keys, file } => run_null(&args, keys, file.as_ref()),
        Commands::Compact { file, keep_empty } => run_compact(&args, file.as_ref(), *keep_empty),
        Commands::Format { file } => run_format(&args, file.as_ref()),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default))
        .format_timestamp(None)
        .init();
}

fn run_get(
    args: &Args,
    path: &str,
    file: Option<&PathBuf>,
    coercion: Option<Coercion>,
) -> Result<()> {
    let document = read_document(args, file)?;
    let found = document.lookup(path);
    let output = match coercion {
        Some(coercion) => render_value(&coerce(&found, coercion), args.layout())?,
        None => render_value(&found, args.layout())?,
    };
    write_output(args, &output)
}

fn run_set(args: &Args, path: &str, literal: &str, file: Option<&PathBuf>) -> Result<()> {
    let mut document = read_document(args, file)?;
    document
        .set(path, parse_literal(literal))
        .with_context(|| format!("cannot set `{path}`"))?;
    write_document(args, &document)
}

fn run_merge(args: &Args, files: &[PathBuf]) -> Result<()> {
    if files.is_empty() {
        bail!("No files provided for merge");
    }
    let documents = files
        .iter()
        .map(|file| read_document(args, Some(file)))
        .collect::<Result<Vec<_>>>()?;
    write_document(args, &merge_documents(documents))
}

fn run_keep(args: &Args, keys: &str, file: Option<&PathBuf>) -> Result<()> {
    let document = read_document(args, file)?;
    write_document(args, &document.keep(split_keys(keys)))
}

fn run_null(args: &Args, keys: &str, file: Option<&PathBuf>) -> Result<()> {
    let document = read_document(args, file)?;
    write_document(args, &document.with_nulled(split_keys(keys)))
}

fn run_compact(args: &Args, file: Option<&PathBuf>, keep_empty: bool) -> Result<()> {
    let document = read_document(args, file)?;
    write_document(args, &document.compact_pruned(keep_empty))
}

fn run_format(args: &Args, file: Option<&PathBuf>) -> Result<()> {
    let document = read_document(args, file)?;
    write_document(args, &document)
}

fn read_document(args: &Args, path: Option<&PathBuf>) -> Result<Value> {
    let bytes = if let Some(p) = path {
        fs::read(p).with_context(|| format!("cannot read {}", p.display()))?
    } else {
        let mut input = Vec::new();
        io::stdin().read_to_end(&mut input)?;
        input
    };
    Ok(parse_document(&bytes, &args.options()))
}

fn write_document(args: &Args, document: &Value) -> Result<()> {
    let output = render_document(document, args.layout())?;
    write_output(args, &output)
}

fn write_output(args: &Args, output: &str) -> Result<()> {
    if let Some(path) = &args.output {
        fs::write(path, format!("{output}\n"))
            .with_context(|| format!("cannot write {}", path.display()))?;
    } else {
        let stdout = io::stdout();
        let mut handle = stdout.lock();
        handle.write_all(output.as_bytes())?;
        handle.write_all(b"\n")?;
    }
    Ok(())
}
