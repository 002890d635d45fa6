// src/output.rs

//! Incremental CSV result sink.
//!
//! The header goes in exactly once, when the file is first created. Each
//! finished row is appended, flushed and synced to disk before the next
//! instance starts, so killing the process mid-session never loses a row
//! that was already written. Existing rows are never touched.

use std::collections::HashSet;
use std::fs::{self, File, OpenOptions};
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::engine::ResultRow;
use crate::errors::{BenchError, Result};
use crate::types::DatasetMode;

/// Header row for a session.
///
/// - file mode: the variant names;
/// - random mode: the variant count followed by the variant names.
pub fn header_for(mode: DatasetMode, variant_names: &[String]) -> Vec<String> {
    match mode {
        DatasetMode::Files => variant_names.to_vec(),
        DatasetMode::Random => std::iter::once(variant_names.len().to_string())
            .chain(variant_names.iter().cloned())
            .collect(),
    }
}

/// Sole writer of the result file.
#[derive(Debug)]
pub struct ResultWriter {
    path: PathBuf,
    writer: csv::Writer<File>,
    failure_marker: String,
}

impl ResultWriter {
    /// Open the result file for appending.
    ///
    /// A missing or empty file is created and gets `header`. A non-empty file
    /// must already start with `header`; otherwise `HeaderMismatch` is
    /// returned and nothing is written.
    pub fn open(
        path: impl AsRef<Path>,
        header: &[String],
        failure_marker: impl Into<String>,
    ) -> Result<Self> {
        let path = path.as_ref();
        let existing = read_header(path)?;

        if let Some(found) = &existing {
            if found.as_slice() != header {
                return Err(BenchError::HeaderMismatch {
                    path: path.to_path_buf(),
                    expected: header.to_vec(),
                    found: found.clone(),
                });
            }
        } else if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let file = OpenOptions::new().create(true).append(true).open(path)?;
        let writer = csv::WriterBuilder::new()
            .flexible(true)
            .terminator(csv::Terminator::Any(b'\n'))
            .from_writer(file);

        let mut this = Self {
            path: path.to_path_buf(),
            writer,
            failure_marker: failure_marker.into(),
        };

        if existing.is_none() {
            this.write_durable(header)?;
            info!(path = ?this.path, "created result file");
        } else {
            info!(path = ?this.path, "appending to existing result file");
        }

        Ok(this)
    }

    /// Append one finished row and make it durable.
    pub fn append(&mut self, row: &ResultRow) -> Result<()> {
        let record = row.record(&self.failure_marker);
        self.write_durable(&record)?;
        debug!(path = ?self.path, instance = %row.instance_id, "row appended");
        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn write_durable(&mut self, record: &[String]) -> Result<()> {
        self.writer.write_record(record)?;
        self.writer.flush()?;
        self.writer.get_ref().sync_data()?;
        Ok(())
    }
}

/// First record of an existing result file, or `None` if the file is missing
/// or empty.
pub fn read_header(path: &Path) -> Result<Option<Vec<String>>> {
    if !path.exists() || fs::metadata(path)?.len() == 0 {
        return Ok(None);
    }

    let mut reader = reader_for(path)?;
    let mut record = csv::StringRecord::new();
    if reader.read_record(&mut record)? {
        Ok(Some(record.iter().map(str::to_string).collect()))
    } else {
        Ok(None)
    }
}

/// Instance ids that already have a row in the result file (used by
/// `--resume`). Empty if the file does not exist.
pub fn completed_instance_ids(path: &Path) -> Result<HashSet<String>> {
    if !path.exists() {
        return Ok(HashSet::new());
    }

    let mut reader = reader_for(path)?;
    let mut ids = HashSet::new();
    for record in reader.records().skip(1) {
        let record = record?;
        if let Some(id) = record.get(0) {
            ids.insert(id.to_string());
        }
    }
    Ok(ids)
}

fn reader_for(path: &Path) -> Result<csv::Reader<File>> {
    Ok(csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_path(path)?)
}
