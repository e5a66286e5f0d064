// src/normalize.rs
//! Raw JSON record → `JobPosting`.
//!
//! The per-source field tables live with each source in `specs`; this module
//! dispatches on the source and holds the field readers they share. Readers
//! never invent values: a missing or oddly typed field is "absent".

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde_json::{Map, Value};

use crate::error::ParseError;
use crate::model::{JobPosting, Salary, SourceKind};
use crate::specs;

/// Normalize one record from `kind`.
pub fn normalize(kind: SourceKind, record: &Value) -> Result<JobPosting, ParseError> {
    let obj = as_object(record)?;
    Ok(match kind {
        SourceKind::RemoteOk => specs::remoteok::normalize(obj),
        SourceKind::Remotive => specs::remotive::normalize(obj),
    })
}

/// Postings from one source plus the count of records that were skipped.
#[derive(Debug, Default)]
pub struct NormalizedBatch {
    pub postings: Vec<JobPosting>,
    pub skipped: usize,
}

/// Normalize a source's records, skipping malformed ones.
/// Stops once `limit` postings have been produced.
pub fn normalize_all(kind: SourceKind, records: &[Value], limit: Option<usize>) -> NormalizedBatch {
    let mut batch = NormalizedBatch::default();
    for (i, rec) in records.iter().enumerate() {
        if limit.is_some_and(|n| batch.postings.len() >= n) {
            break;
        }
        match normalize(kind, rec) {
            Ok(p) => batch.postings.push(p),
            Err(e) => {
                tracing::debug!(source = %kind, index = i, error = %e, "skipping record");
                batch.skipped += 1;
            }
        }
    }
    batch
}

fn as_object(v: &Value) -> Result<&Map<String, Value>, ParseError> {
    v.as_object().ok_or(ParseError::NotAnObject { found: json_kind(v) })
}

fn json_kind(v: &Value) -> &'static str {
    match v {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/* ---------------- Field readers ---------------- */

/// Text of a scalar field. Numbers are stringified; anything else is absent.
pub(crate) fn text(obj: &Map<String, Value>, key: &str) -> String {
    match obj.get(key) {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        _ => s!(),
    }
}

/// First non-blank text among `keys`.
pub(crate) fn first_text(obj: &Map<String, Value>, keys: &[&str]) -> String {
    keys.iter()
        .map(|k| text(obj, k))
        .find(|t| !t.trim().is_empty())
        .unwrap_or_default()
}

pub(crate) fn number(obj: &Map<String, Value>, key: &str) -> Option<f64> {
    match obj.get(key)? {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// Numeric bounds when both are positive, else the free-text field.
/// A lone bound is not widened into a range.
pub(crate) fn salary(
    obj: &Map<String, Value>,
    min_key: &str,
    max_key: &str,
    text_key: &str,
) -> Option<Salary> {
    let positive = |k: &str| number(obj, k).filter(|v| *v > 0.0);
    match (positive(min_key), positive(max_key)) {
        (Some(a), Some(b)) => Some(Salary::Range { min: a.min(b), max: a.max(b) }),
        _ => salary_text(obj, text_key),
    }
}

pub(crate) fn salary_text(obj: &Map<String, Value>, key: &str) -> Option<Salary> {
    let t = text(obj, key);
    if t.trim().is_empty() { None } else { Some(Salary::Text(t)) }
}

/// First parseable date among `keys`.
pub(crate) fn date(obj: &Map<String, Value>, keys: &[&str]) -> Option<NaiveDate> {
    keys.iter().filter_map(|k| obj.get(*k)).find_map(parse_date)
}

/// RFC 3339, naive timestamps, plain dates or Unix epoch seconds.
pub fn parse_date(v: &Value) -> Option<NaiveDate> {
    match v {
        Value::Number(n) => from_epoch(n.as_i64()?),
        Value::String(s) => parse_date_str(s),
        _ => None,
    }
}

pub fn parse_date_str(s: &str) -> Option<NaiveDate> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.date_naive());
    }
    for fmt in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(dt.date());
        }
    }
    if let Ok(d) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return Some(d);
    }
    if s.bytes().all(|b| b.is_ascii_digit()) {
        return from_epoch(s.parse().ok()?);
    }
    None
}

fn from_epoch(secs: i64) -> Option<NaiveDate> {
    DateTime::from_timestamp(secs, 0).map(|dt| dt.date_naive())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn remoteok_scenario_maps_position_to_title() {
        let rec = json!({"position": "Backend Engineer", "company": "Acme", "location": "Remote"});
        let p = normalize(SourceKind::RemoteOk, &rec).unwrap();
        assert_eq!(p.title, "Backend Engineer");
        assert_eq!(p.company, "Acme");
        assert_eq!(p.location, "Remote");
        assert_eq!(p.source, SourceKind::RemoteOk);
        assert_eq!(p.description, "");
        assert_eq!(p.salary, None);
        assert_eq!(p.posted_date, None);
    }

    #[test]
    fn non_object_record_is_a_parse_error() {
        let err = normalize(SourceKind::Remotive, &json!(["not", "a", "posting"])).unwrap_err();
        assert_eq!(err, ParseError::NotAnObject { found: "array" });
    }

    #[test]
    fn normalize_all_skips_bad_records_and_honours_limit() {
        let recs = vec![
            json!({"title": "A", "company_name": "X"}),
            json!(42),
            json!({"title": "B", "company_name": "Y"}),
            json!({"title": "C", "company_name": "Z"}),
        ];
        let batch = normalize_all(SourceKind::Remotive, &recs, Some(2));
        assert_eq!(batch.postings.len(), 2);
        assert_eq!(batch.skipped, 1);
        assert_eq!(batch.postings[1].title, "B");

        let all = normalize_all(SourceKind::Remotive, &recs, None);
        assert_eq!(all.postings.len(), 3);
    }

    #[test]
    fn parse_date_accepts_the_source_formats() {
        let d = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        assert_eq!(parse_date(&json!("2024-03-01T10:00:00+00:00")), Some(d));
        assert_eq!(parse_date(&json!("2024-03-01T10:00:00")), Some(d));
        assert_eq!(parse_date(&json!("2024-03-01")), Some(d));
        assert_eq!(parse_date(&json!(1709287200)), Some(d));
        assert_eq!(parse_date(&json!("yesterday")), None);
        assert_eq!(parse_date(&json!(null)), None);
    }

    #[test]
    fn salary_prefers_positive_bounds_over_text() {
        let obj = json!({"salary_min": 90000, "salary_max": 60000, "salary": "ignored"});
        let obj = obj.as_object().unwrap();
        assert_eq!(
            salary(obj, "salary_min", "salary_max", "salary"),
            Some(Salary::Range { min: 60000.0, max: 90000.0 })
        );

        let obj = json!({"salary_min": 0, "salary_max": 0, "salary": "$50/hr"});
        let obj = obj.as_object().unwrap();
        assert_eq!(
            salary(obj, "salary_min", "salary_max", "salary"),
            Some(Salary::Text(s!("$50/hr")))
        );

        let obj = json!({"salary": ""});
        assert_eq!(salary_text(obj.as_object().unwrap(), "salary"), None);
    }

    #[test]
    fn lone_salary_bound_is_not_made_into_a_range() {
        let rec = json!({"position": "Dev", "company": "Acme", "salary_min": 50000, "salary_max": 0});
        let p = normalize(SourceKind::RemoteOk, &rec).unwrap();
        assert_eq!(p.salary, None);
        assert_eq!(p.to_row()[4], "");

        let obj = json!({"salary_max": 80000, "salary": "80k max"});
        assert_eq!(
            salary(obj.as_object().unwrap(), "salary_min", "salary_max", "salary"),
            Some(Salary::Text(s!("80k max")))
        );
    }
}
