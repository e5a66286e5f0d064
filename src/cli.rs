// src/cli.rs
use std::{env, path::{Path, PathBuf}, str::FromStr};

use crate::config::consts::STORE_DIR;
use crate::config::options::{AppOptions, DedupKey, ExportFormat, SourceSelector};
use crate::error::{Error, Result};
use crate::model::SourceKind;
use crate::progress::Progress;
use crate::runner::{self, RunSummary};
use crate::scrape::SourceReport;

const HELP: &str = include_str!("cli_help.txt");

#[derive(Debug, PartialEq)]
pub enum Command {
    Run { opts: AppOptions, verbose: bool },
    Help,
}

pub fn run() -> Result<()> {
    let (opts, verbose) = match parse_args(env::args().skip(1))? {
        Command::Help => {
            print!("{HELP}");
            return Ok(());
        }
        Command::Run { opts, verbose } => (opts, verbose),
    };

    let _log = crate::log::init(verbose, Some(Path::new(STORE_DIR)));
    let mut console = ConsoleProgress;
    let summary = runner::run(&opts, Some(&mut console))?;
    print_summary(&summary);
    Ok(())
}

pub fn parse_args<I>(args: I) -> Result<Command>
where
    I: IntoIterator<Item = String>,
{
    let mut opts = AppOptions::default();
    let mut verbose = false;
    let mut picked: Option<Vec<SourceKind>> = None;
    let mut all = false;

    let mut args = args.into_iter();
    while let Some(a) = args.next() {
        let mut value = |flag: &str| {
            args.next().ok_or_else(|| Error::usage(format!("Missing value for {flag}")))
        };
        match a.as_str() {
            "--source" => {
                let v = value("--source")?;
                if v.eq_ignore_ascii_case("all") {
                    all = true;
                } else {
                    let kind = SourceKind::from_str(&v.to_ascii_lowercase()).map_err(Error::Usage)?;
                    picked.get_or_insert_with(Vec::new).push(kind);
                }
            }
            "--limit" => {
                let v = value("--limit")?;
                opts.collect.limit = if v.eq_ignore_ascii_case("all") {
                    None
                } else {
                    Some(parse_number(&v, "--limit")?)
                };
            }
            "-o" | "--out" => opts.export.out_dir = PathBuf::from(value("--out")?),
            "--format" => {
                let v = value("--format")?;
                opts.export.format = match v.to_ascii_lowercase().as_str() {
                    "csv" => ExportFormat::Csv,
                    "tsv" => ExportFormat::Tsv,
                    other => return Err(Error::usage(format!("Unknown format: {other}"))),
                };
            }
            "--no-enrich" => opts.export.enriched = false,
            "--dedup" => {
                let v = value("--dedup")?;
                opts.clean.dedup = match v.to_ascii_lowercase().as_str() {
                    "posting" => DedupKey::Posting,
                    "url" => DedupKey::Url,
                    other => return Err(Error::usage(format!("Unknown dedup key: {other}"))),
                };
            }
            "--casefold" => opts.clean.casefold_key = true,
            "--keep-whitespace" => opts.clean.normalize_text = false,
            "--default-location" => {
                let v = value("--default-location")?;
                opts.clean.default_location =
                    if v.eq_ignore_ascii_case("none") { None } else { Some(v) };
            }
            "--attempts" => {
                let n: u32 = parse_number(&value("--attempts")?, "--attempts")?;
                if n == 0 {
                    return Err(Error::usage("--attempts must be at least 1"));
                }
                opts.collect.attempts = n;
            }
            "--parallel" => opts.collect.parallel = true,
            "-v" | "--verbose" => verbose = true,
            "-h" | "--help" => return Ok(Command::Help),
            _ => return Err(Error::usage(format!("Unknown arg: {a}"))),
        }
    }

    if let (false, Some(kinds)) = (all, picked) {
        opts.collect.sources = SourceSelector::Only(kinds);
    }
    Ok(Command::Run { opts, verbose })
}

fn parse_number<T: FromStr>(v: &str, flag: &str) -> Result<T> {
    v.trim()
        .parse()
        .map_err(|_| Error::usage(format!("Invalid number for {flag}: {v}")))
}

/// Plain progress lines on stdout; diagnostics go through tracing on stderr.
struct ConsoleProgress;

impl Progress for ConsoleProgress {
    fn begin(&mut self, total: usize) {
        println!("Sources: {total}");
    }

    fn log(&mut self, msg: &str) {
        println!("{msg}");
    }

    fn source_done(&mut self, r: &SourceReport) {
        match &r.error {
            None => println!("  {}: {} postings ({} skipped)", r.source, r.normalized, r.skipped),
            Some(e) => println!("  {}: failed ({e})", r.source),
        }
    }
}

fn print_summary(summary: &RunSummary) {
    let failed = summary.failed_sources().count();
    if failed > 0 {
        println!("{failed} of {} sources failed", summary.sources.len());
    }
    for path in &summary.files_written {
        println!("Wrote {}", path.display());
    }
}
