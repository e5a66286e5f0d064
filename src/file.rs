// src/file.rs

use std::{
    fs,
    io::{BufWriter, Write},
    path::{Path, PathBuf},
};

use tempfile::NamedTempFile;

use crate::config::options::ExportFormat;
use crate::csv::write_table;
use crate::enrich::{Enriched, ENRICHED_COLUMNS};
use crate::error::ExportError;
use crate::model::{JobPosting, COLUMNS};

/// Write postings under the fixed header. Returns the path written to.
pub fn export_postings(
    path: &Path,
    postings: &[JobPosting],
    format: ExportFormat,
) -> Result<PathBuf, ExportError> {
    let n = write_atomic(path, &COLUMNS, postings.iter().map(JobPosting::to_row), format.delim())?;
    tracing::info!(path = %path.display(), rows = n, "exported postings");
    Ok(path.to_path_buf())
}

/// Write postings plus their derived analysis columns.
pub fn export_enriched(
    path: &Path,
    rows: &[Enriched<'_>],
    format: ExportFormat,
) -> Result<PathBuf, ExportError> {
    let n = write_atomic(path, &ENRICHED_COLUMNS, rows.iter().map(Enriched::to_row), format.delim())?;
    tracing::info!(path = %path.display(), rows = n, "exported enriched postings");
    Ok(path.to_path_buf())
}

/// All-or-nothing: rows go to a temp file next to `path`, which is renamed
/// over `path` only once everything was written. On error the temp file is
/// removed and `path` is untouched.
fn write_atomic<I>(path: &Path, header: &[&str], rows: I, sep: char) -> Result<usize, ExportError>
where
    I: IntoIterator<Item = Vec<String>>,
{
    let dir = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    ensure_directory(dir)?;

    let mut tmp = NamedTempFile::new_in(dir).map_err(|e| ExportError::io(dir, e))?;
    let written = {
        let mut out = BufWriter::new(tmp.as_file_mut());
        let n = write_table(&mut out, header, rows, sep).map_err(|e| ExportError::io(path, e))?;
        out.flush().map_err(|e| ExportError::io(path, e))?;
        n
    };
    tmp.persist(path).map_err(|e| ExportError::io(path, e.error))?;
    Ok(written)
}

pub fn ensure_directory(dir: &Path) -> Result<(), ExportError> {
    if dir.exists() && !dir.is_dir() {
        return Err(ExportError::NotADirectory(dir.to_path_buf()));
    }
    if !dir.exists() {
        fs::create_dir_all(dir).map_err(|e| ExportError::io(dir, e))?;
    }
    Ok(())
}
