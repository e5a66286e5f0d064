// src/clean.rs
//
// Combined dataset → cleaned dataset.
//
// Order of steps matters:
//   1. tidy whitespace (optional), so " Acme" and "Acme" share a key
//   2. drop postings missing title or company
//   3. fill empty locations (optional)
//   4. dedup, first occurrence wins
//
// Output order is input order minus what was dropped.

use std::collections::HashSet;

use crate::config::options::{CleanOptions, DedupKey};
use crate::core::sanitize::normalize_ws;
use crate::model::{JobPosting, Salary};

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CleanReport {
    pub input: usize,
    pub filled_location: usize,
    pub dropped_incomplete: usize,
    pub dropped_duplicates: usize,
    pub kept: usize,
}

#[derive(Hash, PartialEq, Eq)]
enum Key {
    Posting(String, String, String),
    Url(String),
}

pub fn clean(postings: Vec<JobPosting>, opts: &CleanOptions) -> (Vec<JobPosting>, CleanReport) {
    let mut report = CleanReport { input: postings.len(), ..CleanReport::default() };
    let mut seen: HashSet<Key> = HashSet::with_capacity(postings.len());
    let mut out = Vec::with_capacity(postings.len());

    for mut p in postings {
        if opts.normalize_text {
            tidy(&mut p);
        }
        if !p.is_complete() {
            report.dropped_incomplete += 1;
            continue;
        }
        if let Some(fill) = opts.default_location.as_deref() {
            if p.location.trim().is_empty() {
                p.location = s!(fill);
                report.filled_location += 1;
            }
        }
        if let Some(key) = key_of(&p, opts) {
            if !seen.insert(key) {
                report.dropped_duplicates += 1;
                continue;
            }
        }
        out.push(p);
    }

    report.kept = out.len();
    tracing::info!(
        input = report.input,
        kept = report.kept,
        incomplete = report.dropped_incomplete,
        duplicates = report.dropped_duplicates,
        "cleaned postings"
    );
    (out, report)
}

fn tidy(p: &mut JobPosting) {
    for field in [&mut p.title, &mut p.company, &mut p.location, &mut p.description, &mut p.url] {
        *field = normalize_ws(field);
    }
    let blank_salary = match &mut p.salary {
        Some(Salary::Text(t)) => {
            *t = normalize_ws(t);
            t.is_empty()
        }
        _ => false,
    };
    if blank_salary {
        p.salary = None;
    }
}

/// `None` means the posting can never be a duplicate.
fn key_of(p: &JobPosting, opts: &CleanOptions) -> Option<Key> {
    let fold = |s: &str| if opts.casefold_key { s.to_lowercase() } else { s!(s) };
    match opts.dedup {
        DedupKey::Posting => Some(Key::Posting(fold(&p.title), fold(&p.company), fold(&p.location))),
        DedupKey::Url if p.url.trim().is_empty() => None,
        DedupKey::Url => Some(Key::Url(fold(p.url.trim()))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::SourceKind;

    fn posting(title: &str, company: &str, location: &str) -> JobPosting {
        let mut p = JobPosting::new(SourceKind::RemoteOk);
        p.title = s!(title);
        p.company = s!(company);
        p.location = s!(location);
        p
    }

    fn no_fill() -> CleanOptions {
        CleanOptions { default_location: None, ..CleanOptions::default() }
    }

    #[test]
    fn drops_postings_missing_required_fields() {
        let input = vec![
            posting("Backend Engineer", "Acme", "Remote"),
            posting("", "Acme", "Remote"),
            posting("Frontend Engineer", "   ", "Remote"),
        ];
        let (out, report) = clean(input, &no_fill());
        assert_eq!(out.len(), 1);
        assert_eq!(report.dropped_incomplete, 2);
        assert!(out.iter().all(JobPosting::is_complete));
    }

    #[test]
    fn dedups_on_title_company_location_keeping_first() {
        let mut first = posting("Backend Engineer", "Acme", "Remote");
        first.description = s!("first");
        let mut second = posting("Backend Engineer", "Acme", "Remote");
        second.source = SourceKind::Remotive;
        let other_loc = posting("Backend Engineer", "Acme", "Berlin");

        let (out, report) = clean(vec![first, second, other_loc], &no_fill());
        assert_eq!(out.len(), 2);
        assert_eq!(report.dropped_duplicates, 1);
        assert_eq!(out[0].description, "first");
        assert_eq!(out[0].source, SourceKind::RemoteOk);
        assert_eq!(out[1].location, "Berlin");
    }

    #[test]
    fn whitespace_is_tidied_before_keying() {
        let a = posting("Backend  Engineer", " Acme", "Remote");
        let b = posting("Backend Engineer", "Acme", "Remote ");
        let (out, _) = clean(vec![a, b], &no_fill());
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].title, "Backend Engineer");

        let raw = CleanOptions { normalize_text: false, ..no_fill() };
        let a = posting("Backend  Engineer", "Acme", "Remote");
        let b = posting("Backend Engineer", "Acme", "Remote");
        assert_eq!(clean(vec![a, b], &raw).0.len(), 2);
    }

    #[test]
    fn casefold_key_merges_case_variants() {
        let a = posting("Data Engineer", "ACME", "Remote");
        let b = posting("data engineer", "Acme", "remote");
        assert_eq!(clean(vec![a.clone(), b.clone()], &no_fill()).0.len(), 2);

        let fold = CleanOptions { casefold_key: true, ..no_fill() };
        let (out, _) = clean(vec![a, b], &fold);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].company, "ACME");
    }

    #[test]
    fn empty_location_is_filled_before_dedup() {
        let a = posting("SRE", "Uptime", "");
        let b = posting("SRE", "Uptime", "Remote");
        let (out, report) = clean(vec![a, b], &CleanOptions::default());
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].location, "Remote");
        assert_eq!(report.filled_location, 1);
    }

    #[test]
    fn dropped_postings_are_not_counted_as_filled() {
        let input = vec![posting("Backend Engineer", "", ""), posting("SRE", "Uptime", "")];
        let (out, report) = clean(input, &CleanOptions::default());
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].location, "Remote");
        assert_eq!((report.filled_location, report.dropped_incomplete), (1, 1));
    }

    #[test]
    fn url_key_ignores_empty_urls() {
        let opts = CleanOptions { dedup: DedupKey::Url, ..no_fill() };
        let mut a = posting("A", "X", "");
        a.url = s!("https://jobs/1");
        let mut b = posting("B", "Y", "");
        b.url = s!("https://jobs/1");
        let c = posting("C", "Z", "");
        let d = posting("D", "Z", "");
        let (out, report) = clean(vec![a, b, c, d], &opts);
        assert_eq!(out.len(), 3);
        assert_eq!(report.dropped_duplicates, 1);
    }

    #[test]
    fn cleaning_never_grows_the_dataset() {
        let input: Vec<_> = (0..20)
            .map(|i| posting(&format!("Role {}", i % 7), "Acme", if i % 3 == 0 { "" } else { "Remote" }))
            .collect();
        let (out, report) = clean(input, &CleanOptions::default());
        assert!(out.len() <= report.input);
        assert_eq!(report.kept + report.dropped_incomplete + report.dropped_duplicates, report.input);
    }
}
