// src/config/options.rs
use std::path::{Path, PathBuf};
use std::time::Duration;

use super::consts::*;
use crate::model::SourceKind;

#[derive(Clone, Debug, PartialEq, Default)]
pub struct AppOptions {
    pub collect: CollectOptions,
    pub clean: CleanOptions,
    pub export: ExportOptions,
}

/* ---------------- Collect ---------------- */

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SourceSelector {
    All,
    Only(Vec<SourceKind>),
}

impl SourceSelector {
    /// Selected sources in fetch order, without repeats.
    pub fn resolve(&self) -> Vec<SourceKind> {
        match self {
            SourceSelector::All => SourceKind::ALL.to_vec(),
            SourceSelector::Only(v) => {
                let mut out: Vec<SourceKind> = Vec::with_capacity(v.len());
                for k in v {
                    if !out.contains(k) { out.push(*k); }
                }
                out
            }
        }
    }
}

/// Where and how each source client fetches.
#[derive(Clone, Debug, PartialEq)]
pub struct Endpoints {
    pub remoteok: String,
    pub remotive: String,
    pub remotive_category: Option<String>,
    pub remotive_search: Option<String>,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            remoteok: s!(REMOTEOK_URL),
            remotive: s!(REMOTIVE_URL),
            remotive_category: Some(s!(REMOTIVE_CATEGORY)),
            remotive_search: Some(s!(REMOTIVE_SEARCH)),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct CollectOptions {
    pub sources: SourceSelector,
    pub endpoints: Endpoints,
    /// Max postings kept per source; `None` keeps all.
    pub limit: Option<usize>,
    pub timeout: Duration,
    pub attempts: u32,
    pub retry_backoff: Duration,
    /// Fetch each source on its own thread.
    pub parallel: bool,
}

impl Default for CollectOptions {
    fn default() -> Self {
        Self {
            sources: SourceSelector::All,
            endpoints: Endpoints::default(),
            limit: Some(SOURCE_LIMIT),
            timeout: Duration::from_secs(TIMEOUT_SECS),
            attempts: ATTEMPTS,
            retry_backoff: Duration::from_millis(RETRY_BACKOFF_MS),
            parallel: false,
        }
    }
}

/* ---------------- Clean ---------------- */

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DedupKey {
    /// (title, company, location)
    Posting,
    /// Posting URL; empty URLs never collide.
    Url,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CleanOptions {
    pub normalize_text: bool,
    pub dedup: DedupKey,
    /// Compare the dedup key case-insensitively.
    pub casefold_key: bool,
    /// Fill for empty locations; `None` leaves them empty.
    pub default_location: Option<String>,
}

impl Default for CleanOptions {
    fn default() -> Self {
        Self {
            normalize_text: true,
            dedup: DedupKey::Posting,
            casefold_key: false,
            default_location: Some(s!(DEFAULT_LOCATION)),
        }
    }
}

/* ---------------- Export ---------------- */

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ExportFormat {
    Csv,
    Tsv,
}

impl ExportFormat {
    pub fn ext(&self) -> &'static str {
        match self { ExportFormat::Csv => "csv", ExportFormat::Tsv => "tsv" }
    }
    pub fn delim(&self) -> char {
        match self { ExportFormat::Csv => ',', ExportFormat::Tsv => '\t' }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExportOptions {
    pub format: ExportFormat,
    pub out_dir: PathBuf,
    pub raw_stem: String,
    pub clean_stem: String,
    pub enriched_stem: String,
    /// Also write the derived analysis columns.
    pub enriched: bool,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            format: ExportFormat::Csv,
            out_dir: PathBuf::from(DEFAULT_OUT_DIR),
            raw_stem: s!(RAW_STEM),
            clean_stem: s!(CLEAN_STEM),
            enriched_stem: s!(ENRICHED_STEM),
            enriched: true,
        }
    }
}

impl ExportOptions {
    pub fn raw_path(&self) -> PathBuf { self.path_for(&self.raw_stem) }
    pub fn clean_path(&self) -> PathBuf { self.path_for(&self.clean_stem) }
    pub fn enriched_path(&self) -> PathBuf { self.path_for(&self.enriched_stem) }

    fn path_for(&self, stem: &str) -> PathBuf {
        join_dir_and_file(&self.out_dir, stem, self.format.ext())
    }
}

fn join_dir_and_file(dir: &Path, stem: &str, ext: &str) -> PathBuf {
    dir.join(format!("{stem}.{ext}"))
}
