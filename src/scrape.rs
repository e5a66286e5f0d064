// src/scrape.rs
use std::{sync::mpsc, thread};

use serde_json::Value;

use crate::{
    config::options::{CollectOptions, Endpoints},
    core::net::Http,
    error::RequestError,
    model::{JobPosting, SourceKind},
    normalize::normalize_all,
    progress::Progress,
    specs,
};

/// What one source contributed to a run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SourceReport {
    pub source: SourceKind,
    /// Raw records returned by the API.
    pub fetched: usize,
    /// Postings produced by the normalizer (after `limit`).
    pub normalized: usize,
    /// Records that were not postings.
    pub skipped: usize,
    /// Set when the source was unreachable or answered badly.
    pub error: Option<String>,
}

impl SourceReport {
    pub fn failed(&self) -> bool { self.error.is_some() }
}

#[derive(Clone, Debug)]
pub struct SourceBatch {
    pub source: SourceKind,
    pub postings: Vec<JobPosting>,
}

/// Per-source batches in selection order, plus what happened to each.
#[derive(Clone, Debug, Default)]
pub struct Collection {
    pub batches: Vec<SourceBatch>,
    pub reports: Vec<SourceReport>,
}

type Fetched = Result<Vec<Value>, RequestError>;

/// Fetch and normalize every selected source (no IO besides HTTP).
///
/// Best effort: a source that fails contributes an empty batch and an error
/// in its report; the others carry on. Only failing to build the HTTP client
/// is an error for the whole run.
pub fn collect(
    opts: &CollectOptions,
    mut progress: Option<&mut dyn Progress>,
) -> Result<Collection, RequestError> {
    let http = Http::new(opts)?;
    let kinds = opts.sources.resolve();

    if let Some(p) = progress.as_deref_mut() {
        p.begin(kinds.len());
        p.log("Fetching postings…");
    }

    let fetched: Vec<(SourceKind, Fetched)> = if opts.parallel && kinds.len() > 1 {
        fetch_parallel(&http, &kinds, &opts.endpoints)
    } else {
        kinds
            .iter()
            .map(|&k| (k, specs::fetch(k, &http, &opts.endpoints)))
            .collect()
    };

    let mut out = Collection::default();
    for (kind, result) in fetched {
        let (batch, report) = settle(kind, result, opts.limit);
        if let Some(p) = progress.as_deref_mut() {
            p.source_done(&report);
        }
        out.batches.push(batch);
        out.reports.push(report);
    }

    if let Some(p) = progress.as_deref_mut() {
        p.finish();
    }
    Ok(out)
}

/// One scoped thread per source. Results come back in selection order.
fn fetch_parallel(http: &Http, kinds: &[SourceKind], endpoints: &Endpoints) -> Vec<(SourceKind, Fetched)> {
    let (tx, rx) = mpsc::channel::<(usize, SourceKind, Fetched)>();

    thread::scope(|s| {
        for (i, &kind) in kinds.iter().enumerate() {
            let tx = tx.clone();
            s.spawn(move || {
                let _ = tx.send((i, kind, specs::fetch(kind, http, endpoints)));
            });
        }
    });
    drop(tx); // scope joined every sender

    let mut got: Vec<_> = rx.into_iter().collect();
    got.sort_by_key(|(i, _, _)| *i);
    got.into_iter().map(|(_, kind, r)| (kind, r)).collect()
}

fn settle(kind: SourceKind, fetched: Fetched, limit: Option<usize>) -> (SourceBatch, SourceReport) {
    match fetched {
        Ok(records) => {
            let batch = normalize_all(kind, &records, limit);
            tracing::info!(
                source = %kind,
                fetched = records.len(),
                normalized = batch.postings.len(),
                skipped = batch.skipped,
                "source collected"
            );
            let report = SourceReport {
                source: kind,
                fetched: records.len(),
                normalized: batch.postings.len(),
                skipped: batch.skipped,
                error: None,
            };
            (SourceBatch { source: kind, postings: batch.postings }, report)
        }
        Err(e) => {
            tracing::warn!(source = %kind, error = %e, "source failed; continuing without it");
            let report = SourceReport {
                source: kind,
                fetched: 0,
                normalized: 0,
                skipped: 0,
                error: Some(e.to_string()),
            };
            (SourceBatch { source: kind, postings: Vec::new() }, report)
        }
    }
}
