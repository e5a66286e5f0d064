// src/specs/remoteok.rs
//! RemoteOK public API.
//!
//! `GET /api` returns a JSON array. Element 0 is a legal notice
//! (`{"legal": "..."}`), the rest are postings:
//!
//! | JobPosting  | RemoteOK field                                   |
//! |-------------|--------------------------------------------------|
//! | title       | `position`, else `title`                         |
//! | company     | `company`                                        |
//! | location    | `location`                                       |
//! | description | `description` (HTML)                             |
//! | salary      | `salary_min`/`salary_max`, else `salary`         |
//! | posted_date | `date`, else `epoch`                             |
//! | url         | `url` (site-relative paths get the host prefix)  |

use serde_json::{Map, Value};

use crate::config::consts::REMOTEOK_BASE;
use crate::config::options::Endpoints;
use crate::core::net::Http;
use crate::core::sanitize::html_to_text;
use crate::error::RequestError;
use crate::model::{JobPosting, SourceKind};
use crate::normalize::{date, first_text, salary, text};

pub fn fetch(http: &Http, endpoints: &Endpoints) -> Result<Vec<Value>, RequestError> {
    let url = &endpoints.remoteok;
    let payload = http.get_json(url, &[])?;
    records(url, payload)
}

/// Unwrap the top-level array and drop the legal notice.
pub fn records(url: &str, payload: Value) -> Result<Vec<Value>, RequestError> {
    let Value::Array(items) = payload else {
        return Err(RequestError::payload(url, "expected a JSON array"));
    };
    Ok(items.into_iter().filter(|item| !is_notice(item)).collect())
}

fn is_notice(item: &Value) -> bool {
    item.get("legal").is_some() && item.get("position").is_none()
}

pub fn normalize(obj: &Map<String, Value>) -> JobPosting {
    let mut p = JobPosting::new(SourceKind::RemoteOk);
    p.title = first_text(obj, &["position", "title"]);
    p.company = text(obj, "company");
    p.location = text(obj, "location");
    p.description = html_to_text(&text(obj, "description"));
    p.salary = salary(obj, "salary_min", "salary_max", "salary");
    p.posted_date = date(obj, &["date", "epoch"]);
    p.url = absolute_url(&text(obj, "url"));
    p
}

fn absolute_url(raw: &str) -> String {
    if raw.starts_with('/') { format!("{REMOTEOK_BASE}{raw}") } else { s!(raw) }
}
