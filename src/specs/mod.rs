// src/specs/mod.rs
//! # Source "specs"
//!
//! One module per job board. Each spec knows **where the postings live** in
//! that board's API and **how its fields map** onto `JobPosting`.
//!
//! ## What lives here
//! - The fixed request for the board (endpoint + query) via `core::net::Http`.
//! - Unwrapping the payload into a list of raw records (`records`): RemoteOK
//!   returns an array led by a legal notice, Remotive an object with `jobs`.
//! - The field-mapping table (`normalize`), built from `normalize`'s readers.
//!
//! ## What does **not** live here
//! - Retry/skip policy, limits and aggregation (`scrape`).
//! - Cleaning, dedup or export (`clean`, `file`).
//!
//! ## Typical call chain
//! ```text
//! runner → scrape::collect → specs::<source>::fetch → records
//!                          ↘ normalize::normalize_all → specs::<source>::normalize
//! ```
//!
//! `records` and `normalize` are pure and testable against captured payloads.
pub mod remoteok;
pub mod remotive;

use serde_json::Value;

use crate::config::options::Endpoints;
use crate::core::net::Http;
use crate::error::RequestError;
use crate::model::SourceKind;

/// Fetch the raw records of `kind`.
pub fn fetch(kind: SourceKind, http: &Http, endpoints: &Endpoints) -> Result<Vec<Value>, RequestError> {
    match kind {
        SourceKind::RemoteOk => remoteok::fetch(http, endpoints),
        SourceKind::Remotive => remotive::fetch(http, endpoints),
    }
}
