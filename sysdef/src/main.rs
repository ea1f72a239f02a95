//! sysdef — recover system call declarations from section 2 manual pages.
//!
//! Supports three modes:
//!
//! - **viewer mode** (default): `sysdef open chown32` runs `man 2 <name>` per name
//! - **stdin mode**: `sysdef --stdin open < open.txt`
//! - **page mode**: `sysdef -p 'pages/*.2.txt'`, name taken from each file name

mod manual;
mod render;

use anyhow::{Context, Result};
use clap::Parser;
use regex::Regex;
use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::sync::LazyLock;
use sysdef_syntax::Lookup;

#[derive(Parser)]
#[command(
    name = "sysdef",
    about = "Extract system call declarations from manual page synopses"
)]
struct Cli {
    /// System call names to look up
    names: Vec<String>,

    /// Output format: text (default), json, markdown
    #[arg(short = 'f', long, default_value = "text")]
    format: String,

    /// Manual viewer program
    #[arg(long, env = "SYSDEF_VIEWER", default_value = "man")]
    viewer: String,

    /// Manual section to read
    #[arg(long, default_value = "2")]
    section: String,

    /// Read a single rendered page from stdin for the one NAME given
    #[arg(long, conflicts_with = "pages")]
    stdin: bool,

    /// Rendered page files (glob patterns supported). The name is the file
    /// name up to its first '.', e.g. "open.2.txt" → "open"
    #[arg(short = 'p', long)]
    pages: Vec<String>,

    /// Read additional names from a file, one per line ('#' starts a comment)
    #[arg(long)]
    names_from: Option<PathBuf>,

    /// Include every declaration found on each page
    #[arg(long)]
    all: bool,

    /// Log lookup errors and continue with the next name
    #[arg(long)]
    keep_going: bool,

    /// Log debug detail (discarded candidates, retries)
    #[arg(short, long, conflicts_with = "quiet")]
    verbose: bool,

    /// Only log errors
    #[arg(short, long)]
    quiet: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.quiet, cli.verbose)?;

    let renderer = render::create_renderer(&cli.format)?;

    let lookups = if cli.stdin {
        stdin_mode(&cli)?
    } else if !cli.pages.is_empty() {
        page_mode(&cli)?
    } else {
        viewer_mode(&cli)?
    };

    print!("{}", renderer.render(&lookups, cli.all)?);
    Ok(())
}

fn init_tracing(quiet: bool, verbose: bool) -> Result<()> {
    let level = if quiet {
        "error"
    } else if verbose {
        "debug"
    } else {
        "warn"
    };

    let filter = tracing_subscriber::EnvFilter::try_from_env("SYSDEF_LOG")
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init()
        .map_err(|error| anyhow::anyhow!("failed to initialize tracing subscriber: {error}"))?;

    Ok(())
}

/// stdin mode: one page from stdin, one name from the command line.
fn stdin_mode(cli: &Cli) -> Result<Vec<Lookup>> {
    let [name] = cli.names.as_slice() else {
        anyhow::bail!("--stdin needs exactly one NAME");
    };

    let mut input = String::new();
    io::stdin()
        .read_to_string(&mut input)
        .context("failed to read stdin")?;

    let document = (!input.trim().is_empty()).then_some(input.as_str());
    let mut lookups = Vec::new();
    run_lookup(cli, name, document, &mut lookups)?;
    Ok(lookups)
}

/// page mode: every matched file is one page; the file name gives the query.
fn page_mode(cli: &Cli) -> Result<Vec<Lookup>> {
    let files = expand_globs(&cli.pages)?;
    let mut lookups = Vec::new();

    for path in &files {
        let name = derive_name(path)
            .with_context(|| format!("cannot derive a system call name from {}", path.display()))?;
        let text = fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        let document = (!text.trim().is_empty()).then_some(text.as_str());
        run_lookup(cli, &name, document, &mut lookups)?;
    }

    Ok(lookups)
}

/// viewer mode: run the manual viewer for each name.
fn viewer_mode(cli: &Cli) -> Result<Vec<Lookup>> {
    let mut names = cli.names.clone();
    if let Some(ref path) = cli.names_from {
        let content = fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        names.extend(parse_name_list(&content));
    }
    if names.is_empty() {
        anyhow::bail!("no system call names given");
    }

    let viewer = manual::ManualViewer {
        program: cli.viewer.clone(),
        section: cli.section.clone(),
    };

    let mut lookups = Vec::new();
    for name in &names {
        let page = manual::retrieve(&viewer, name)?;
        run_lookup(cli, name, page.as_deref(), &mut lookups)?;
    }
    Ok(lookups)
}

/// Look up one name, honoring --keep-going for lookup errors.
fn run_lookup(cli: &Cli, name: &str, document: Option<&str>, out: &mut Vec<Lookup>) -> Result<()> {
    match sysdef_syntax::lookup(name, document) {
        Ok(lookup) => {
            out.push(lookup);
            Ok(())
        }
        Err(e) if cli.keep_going => {
            tracing::error!(name, error = %e, "lookup failed");
            Ok(())
        }
        Err(e) => Err(e).with_context(|| format!("failed to resolve {}", name)),
    }
}

/// Parse a name list: one name per line, blank lines and '#' comments ignored.
fn parse_name_list(content: &str) -> Vec<String> {
    content
        .lines()
        .map(|line| line.split('#').next().unwrap_or_default().trim())
        .filter(|line| !line.is_empty())
        .map(|line| line.to_string())
        .collect()
}

/// Expand glob patterns into a list of real file paths.
fn expand_globs(patterns: &[String]) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for pattern in patterns {
        let path = Path::new(pattern);
        if path.is_file() {
            files.push(path.to_path_buf());
            continue;
        }
        let matches: Vec<_> = glob::glob(pattern)
            .with_context(|| format!("invalid glob pattern: {}", pattern))?
            .filter_map(|r| r.ok())
            .filter(|p| p.is_file())
            .collect();
        if matches.is_empty() {
            tracing::warn!(pattern = %pattern, "no files matched");
        }
        files.extend(matches);
    }
    // Sort for deterministic output
    files.sort();
    files.dedup();
    Ok(files)
}

static RE_PAGE_NAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([A-Za-z0-9_]+)(?:\.|$)").unwrap());

/// Derive the queried name from a page file.
/// "pages/open.2.txt" → "open", "chown32" → "chown32"
fn derive_name(path: &Path) -> Option<String> {
    let filename = path.file_name()?.to_str()?;
    RE_PAGE_NAME
        .captures(filename)
        .map(|caps| caps[1].to_string())
}
