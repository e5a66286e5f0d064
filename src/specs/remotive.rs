// src/specs/remotive.rs
//! Remotive public API.
//!
//! `GET /api/remote-jobs?category=..&search=..` returns `{"jobs": [...]}`.
//! An empty `candidate_required_location` stays empty here; filling it is the
//! cleaner's call.

use serde_json::{Map, Value};

use crate::config::options::Endpoints;
use crate::core::net::Http;
use crate::core::sanitize::html_to_text;
use crate::error::RequestError;
use crate::model::{JobPosting, SourceKind};
use crate::normalize::{date, salary_text, text};

pub fn fetch(http: &Http, endpoints: &Endpoints) -> Result<Vec<Value>, RequestError> {
    let url = &endpoints.remotive;
    let mut query: Vec<(&str, &str)> = Vec::new();
    if let Some(c) = endpoints.remotive_category.as_deref() {
        query.push(("category", c));
    }
    if let Some(q) = endpoints.remotive_search.as_deref() {
        query.push(("search", q));
    }
    let payload = http.get_json(url, &query)?;
    records(url, payload)
}

pub fn records(url: &str, payload: Value) -> Result<Vec<Value>, RequestError> {
    match payload {
        Value::Object(mut obj) => match obj.remove("jobs") {
            Some(Value::Array(jobs)) => Ok(jobs),
            Some(_) => Err(RequestError::payload(url, "`jobs` is not an array")),
            None => Err(RequestError::payload(url, "missing `jobs`")),
        },
        _ => Err(RequestError::payload(url, "expected a JSON object")),
    }
}

pub fn normalize(obj: &Map<String, Value>) -> JobPosting {
    let mut p = JobPosting::new(SourceKind::Remotive);
    p.title = text(obj, "title");
    p.company = text(obj, "company_name");
    p.location = text(obj, "candidate_required_location");
    p.description = html_to_text(&text(obj, "description"));
    p.salary = salary_text(obj, "salary");
    p.posted_date = date(obj, &["publication_date"]);
    p.url = text(obj, "url");
    p
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Salary;
    use serde_json::json;

    #[test]
    fn records_unwraps_jobs() {
        let payload = json!({"job-count": 1, "jobs": [{"id": 7, "title": "Analyst"}]});
        let recs = records("u", payload).unwrap();
        assert_eq!(recs.len(), 1);
        assert_eq!(recs[0]["title"], "Analyst");
    }

    #[test]
    fn records_rejects_wrong_shapes() {
        assert!(records("u", json!([])).is_err());
        assert!(records("u", json!({"jobs": "none"})).is_err());
        assert!(records("u", json!({"items": []})).is_err());
    }

    #[test]
    fn normalize_maps_remotive_fields() {
        let rec = json!({
            "title": "Machine Learning Engineer",
            "company_name": "Neural Co",
            "candidate_required_location": "USA",
            "description": "<div>PyTorch &amp; AWS</div>",
            "salary": "$140k - $180k",
            "publication_date": "2024-04-30T12:01:02",
            "url": "https://remotive.com/remote-jobs/software-dev/ml-1",
        });
        let p = normalize(rec.as_object().unwrap());
        assert_eq!(p.source, SourceKind::Remotive);
        assert_eq!(p.title, "Machine Learning Engineer");
        assert_eq!(p.company, "Neural Co");
        assert_eq!(p.location, "USA");
        assert_eq!(p.description, "PyTorch & AWS");
        assert_eq!(p.salary, Some(Salary::Text(s!("$140k - $180k"))));
        assert_eq!(p.posted_date.unwrap().to_string(), "2024-04-30");
    }

    #[test]
    fn missing_location_is_not_inferred() {
        let rec = json!({"title": "Dev", "company_name": "X", "candidate_required_location": ""});
        assert_eq!(normalize(rec.as_object().unwrap()).location, "");
    }
}
