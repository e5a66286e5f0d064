// src/aggregate.rs
use crate::model::JobPosting;
use crate::scrape::Collection;

/// Concatenate per-source postings in arrival order. No transformation.
pub fn aggregate<I>(batches: I) -> Vec<JobPosting>
where
    I: IntoIterator<Item = Vec<JobPosting>>,
{
    let mut all = Vec::new();
    for mut batch in batches {
        all.append(&mut batch);
    }
    all
}

/// Combined dataset of a collection, source selection order first.
pub fn combine(collection: Collection) -> Vec<JobPosting> {
    aggregate(collection.batches.into_iter().map(|b| {
        tracing::debug!(source = %b.source, postings = b.postings.len(), "aggregating batch");
        b.postings
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::SourceKind;

    fn posting(source: SourceKind, title: &str) -> JobPosting {
        let mut p = JobPosting::new(source);
        p.title = s!(title);
        p.company = s!("Acme");
        p
    }

    #[test]
    fn keeps_every_posting_in_order() {
        let a = vec![posting(SourceKind::RemoteOk, "one"), posting(SourceKind::RemoteOk, "two")];
        let b = vec![posting(SourceKind::Remotive, "three")];
        let all = aggregate([a, Vec::new(), b]);
        let titles: Vec<&str> = all.iter().map(|p| p.title.as_str()).collect();
        assert_eq!(titles, ["one", "two", "three"]);
    }

    #[test]
    fn identical_postings_from_two_sources_are_both_kept() {
        let a = vec![posting(SourceKind::RemoteOk, "Backend Engineer")];
        let b = vec![posting(SourceKind::RemoteOk, "Backend Engineer")];
        assert_eq!(aggregate([a, b]).len(), 2);
    }
}
