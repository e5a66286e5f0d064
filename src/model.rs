// src/model.rs
//! The one entity of the pipeline: a normalized job posting.
//!
//! Text fields use the empty string for "absent". `salary` and `posted_date`
//! are optional because most sources leave them out.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};

/// Column order of the raw and cleaned exports.
pub const COLUMNS: [&str; 7] = [
    "title",
    "company",
    "location",
    "description",
    "salary",
    "source",
    "posted_date",
];

pub const DATE_FMT: &str = "%Y-%m-%d";

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SourceKind {
    RemoteOk,
    Remotive,
}

impl SourceKind {
    pub const ALL: [SourceKind; 2] = [SourceKind::RemoteOk, SourceKind::Remotive];

    pub fn label(&self) -> &'static str {
        match self {
            SourceKind::RemoteOk => "RemoteOK",
            SourceKind::Remotive => "Remotive",
        }
    }
}

impl fmt::Display for SourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for SourceKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "remoteok" => Ok(SourceKind::RemoteOk),
            "remotive" => Ok(SourceKind::Remotive),
            other => Err(format!("Unknown source: {other}")),
        }
    }
}

/// Salary as the source reported it.
#[derive(Clone, Debug, PartialEq)]
pub enum Salary {
    /// Numeric bounds, assumed yearly.
    Range { min: f64, max: f64 },
    /// Free text, verbatim.
    Text(String),
}

impl Salary {
    /// Inverse of `Display`: `"<num>-<num>"` is a range, anything else is text.
    /// Empty input means no salary.
    pub fn parse(s: &str) -> Option<Salary> {
        let t = s.trim();
        if t.is_empty() {
            return None;
        }
        if let Some((lo, hi)) = t.split_once('-') {
            if let (Ok(min), Ok(max)) = (lo.trim().parse::<f64>(), hi.trim().parse::<f64>()) {
                return Some(Salary::Range { min, max });
            }
        }
        Some(Salary::Text(s!(t)))
    }
}

impl fmt::Display for Salary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Salary::Range { min, max } => write!(f, "{}-{}", fmt_amount(*min), fmt_amount(*max)),
            Salary::Text(t) => f.write_str(t),
        }
    }
}

/// Whole amounts print without a fractional part.
pub(crate) fn fmt_amount(v: f64) -> String {
    if v.fract() == 0.0 && v.abs() < 1e15 {
        format!("{}", v as i64)
    } else {
        format!("{v}")
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct JobPosting {
    pub title: String,
    pub company: String,
    pub location: String,
    pub description: String,
    pub salary: Option<Salary>,
    pub source: SourceKind,
    pub posted_date: Option<NaiveDate>,
    pub url: String,
    pub scraped_at: DateTime<Utc>,
}

impl JobPosting {
    /// Empty posting for `source`; every other field absent.
    pub fn new(source: SourceKind) -> Self {
        Self {
            title: s!(),
            company: s!(),
            location: s!(),
            description: s!(),
            salary: None,
            source,
            posted_date: None,
            url: s!(),
            scraped_at: Utc::now(),
        }
    }

    /// Title, company and source present. Source always is.
    pub fn is_complete(&self) -> bool {
        !self.title.trim().is_empty() && !self.company.trim().is_empty()
    }

    /// One export row in `COLUMNS` order.
    pub fn to_row(&self) -> Vec<String> {
        row![
            self.title,
            self.company,
            self.location,
            self.description,
            self.salary.as_ref().map(Salary::to_string).unwrap_or_default(),
            self.source,
            self.posted_date
                .map(|d| d.format(DATE_FMT).to_string())
                .unwrap_or_default(),
        ]
    }
}
