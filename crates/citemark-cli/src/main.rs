//! Command-line interface for citemark.
//!
//! Usage:
//!   citemark sort-related `<path>`   - Sort the related-entries paragraph in place
//!   citemark front-matter `<path>`   - Print the front-matter metadata block
//!   citemark local-vars `<path>`     - Print the local-variables block

use anyhow::{Context, Result};
use citemark_config::Config;
use citemark_engine::markup::{local_variables_block, metadata_block};
use citemark_engine::{DocKind, Document, Span, sorting};
use clap::{Arg, Command};
use regex::Regex;
use std::fs;
use std::path::Path;
use std::process;

fn main() -> Result<()> {
    let matches = Command::new("citemark")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Structured-text tooling for Markdown/MDX authoring")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(
            Command::new("sort-related")
                .about("Sort the related-entries paragraph of a file in place")
                .arg(path_arg()),
        )
        .subcommand(
            Command::new("front-matter")
                .about("Print the front-matter metadata block")
                .arg(path_arg()),
        )
        .subcommand(
            Command::new("local-vars")
                .about("Print the local-variables block")
                .arg(path_arg()),
        )
        .get_matches();

    let config = Config::load()?.unwrap_or_default();

    match matches.subcommand() {
        Some(("sort-related", sub)) => handle_sort_related(path_of(sub), &config),
        Some(("front-matter", sub)) => handle_region(path_of(sub), metadata_block),
        Some(("local-vars", sub)) => handle_region(path_of(sub), local_variables_block),
        _ => unreachable!("subcommand is required"),
    }
}

fn path_arg() -> Arg {
    Arg::new("path")
        .help("Path to the Markdown/MDX file")
        .required(true)
        .index(1)
}

fn path_of(matches: &clap::ArgMatches) -> &Path {
    Path::new(
        matches
            .get_one::<String>("path")
            .expect("path is required")
            .as_str(),
    )
}

fn load_document(path: &Path) -> Result<Document> {
    let bytes = fs::read(path).with_context(|| format!("reading {}", path.display()))?;
    let kind = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(DocKind::from_extension)
        .unwrap_or(DocKind::Plain);
    Document::from_bytes(&bytes, kind).with_context(|| format!("loading {}", path.display()))
}

fn handle_sort_related(path: &Path, config: &Config) -> Result<()> {
    let mut doc = load_document(path)?;
    let heading = Regex::new(&config.related_heading)
        .context("invalid related-heading pattern in config")?;

    if sorting::sort_related_entries(&mut doc, &heading, &config.entry_separator) {
        fs::write(path, doc.text()).with_context(|| format!("writing {}", path.display()))?;
        println!("sorted related entries in {}", path.display());
    } else {
        println!("nothing to sort in {}", path.display());
    }
    Ok(())
}

fn handle_region(path: &Path, query: fn(&Document) -> Option<(String, Span)>) -> Result<()> {
    let doc = load_document(path)?;
    match query(&doc) {
        Some((text, _)) => {
            println!("{text}");
            Ok(())
        }
        None => {
            eprintln!("no such block in {}", path.display());
            process::exit(1);
        }
    }
}
