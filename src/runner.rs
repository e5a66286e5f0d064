// src/runner.rs
use std::path::PathBuf;

use crate::{
    aggregate::combine,
    clean::{clean, CleanReport},
    config::options::AppOptions,
    enrich::enrich_all,
    error::Result,
    file::{export_enriched, export_postings},
    progress::Progress,
    scrape::{collect, SourceReport},
};

/// Summary of what was produced.
#[derive(Clone, Debug)]
pub struct RunSummary {
    pub files_written: Vec<PathBuf>,
    pub sources: Vec<SourceReport>,
    pub raw_count: usize,
    pub clean: CleanReport,
}

impl RunSummary {
    pub fn failed_sources(&self) -> impl Iterator<Item = &SourceReport> {
        self.sources.iter().filter(|r| r.failed())
    }
}

/// Top-level pipeline: collect → aggregate → export raw → clean → export
/// cleaned → (enrich → export). Source failures are reported, not raised;
/// export failures end the run.
/// `progress` can be None (no UI updates) or Some(&mut impl Progress).
pub fn run(opts: &AppOptions, mut progress: Option<&mut dyn Progress>) -> Result<RunSummary> {
    let collection = collect(&opts.collect, progress.as_deref_mut().map(|p| p as &mut dyn Progress))?;
    let sources = collection.reports.clone();
    if sources.iter().all(SourceReport::failed) {
        tracing::warn!("no source could be fetched; exporting empty datasets");
    }

    let raw = combine(collection);
    let raw_count = raw.len();
    let export = &opts.export;
    let mut files_written = Vec::with_capacity(3);

    files_written.push(export_postings(&export.raw_path(), &raw, export.format)?);
    if let Some(p) = progress.as_deref_mut() {
        p.log(&format!("Raw: {raw_count} postings"));
    }

    let (cleaned, clean_report) = clean(raw, &opts.clean);
    files_written.push(export_postings(&export.clean_path(), &cleaned, export.format)?);
    if let Some(p) = progress.as_deref_mut() {
        p.log(&format!(
            "Clean: {} postings ({} incomplete, {} duplicates dropped)",
            clean_report.kept, clean_report.dropped_incomplete, clean_report.dropped_duplicates
        ));
    }

    if export.enriched {
        let enriched = enrich_all(&cleaned);
        files_written.push(export_enriched(&export.enriched_path(), &enriched, export.format)?);
    }

    Ok(RunSummary { files_written, sources, raw_count, clean: clean_report })
}
