// src/store.rs
//
// Reading exported files back: as a plain table (header + rows) or as
// postings, columns matched by header name.

use std::{fs, path::Path, str::FromStr};

use crate::config::options::ExportFormat;
use crate::csv::{parse_rows, split_header};
use crate::error::LoadError;
use crate::model::{JobPosting, Salary, SourceKind, COLUMNS};
use crate::normalize::parse_date_str;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DataSet {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl DataSet {
    pub fn column(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name)
    }

    /// Rows as postings. Rows with an unknown source are skipped.
    /// `scraped_at` is not part of the base columns and is set to now.
    pub fn to_postings(&self, path: &Path) -> Result<Vec<JobPosting>, LoadError> {
        let mut ix = [0usize; COLUMNS.len()];
        for (slot, name) in ix.iter_mut().zip(COLUMNS) {
            *slot = self
                .column(name)
                .ok_or_else(|| LoadError::MissingColumn { path: path.to_path_buf(), column: name })?;
        }
        let [title, company, location, description, salary, source, posted] = ix;

        let mut out = Vec::with_capacity(self.rows.len());
        for (n, row) in self.rows.iter().enumerate() {
            let cell = |i: usize| row.get(i).map(String::as_str).unwrap_or("");
            let Ok(kind) = SourceKind::from_str(cell(source)) else {
                tracing::warn!(path = %path.display(), row = n + 1, source = cell(source), "unknown source, row skipped");
                continue;
            };
            let mut p = JobPosting::new(kind);
            p.title = s!(cell(title));
            p.company = s!(cell(company));
            p.location = s!(cell(location));
            p.description = s!(cell(description));
            p.salary = Salary::parse(cell(salary));
            p.posted_date = parse_date_str(cell(posted));
            out.push(p);
        }
        Ok(out)
    }
}

pub fn load_dataset(path: &Path, format: ExportFormat) -> Result<DataSet, LoadError> {
    let text = fs::read_to_string(path)
        .map_err(|source| LoadError::Io { path: path.to_path_buf(), source })?;
    let (headers, rows) = split_header(parse_rows(&text, format.delim()))
        .ok_or_else(|| LoadError::MissingHeader(path.to_path_buf()))?;
    Ok(DataSet { headers, rows })
}

pub fn load_postings(path: &Path, format: ExportFormat) -> Result<Vec<JobPosting>, LoadError> {
    load_dataset(path, format)?.to_postings(path)
}
