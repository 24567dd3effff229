//! CSV serialization of suite results.
//!
//! Files are UTF-8, comma-delimited, with the header
//! `Test ID,Test Name,Module,Status,Automation Tool` followed by one row per
//! case in suite order. Field order is fixed.

use std::fs;
use std::io::{Read, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

use crate::case::CaseRow;
use crate::error::{LedgerError, Result};

pub const HEADER: [&str; 5] = ["Test ID", "Test Name", "Module", "Status", "Automation Tool"];

pub struct ResultRecorder;

impl ResultRecorder {
    /// Render the whole table in memory
    pub fn render(rows: &[CaseRow]) -> Result<Vec<u8>> {
        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(Vec::new());

        writer.write_record(HEADER)?;
        for row in rows {
            writer.write_record(row.fields())?;
        }

        writer
            .into_inner()
            .map_err(|e| LedgerError::IoError(e.into_error()))
    }

    /// Write the table to `out` with a single write. Nothing reaches `out`
    /// unless the whole table rendered successfully.
    pub fn write<W: Write>(mut out: W, rows: &[CaseRow]) -> Result<()> {
        let bytes = Self::render(rows)?;
        out.write_all(&bytes)?;
        out.flush()?;
        Ok(())
    }

    pub fn read<R: Read>(input: R) -> Result<Vec<CaseRow>> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_reader(input);

        let headers = reader.headers()?;
        if headers.iter().ne(HEADER.iter().copied()) {
            return Err(LedgerError::UnexpectedHeader {
                found: headers.iter().map(str::to_string).collect(),
            });
        }

        let mut rows = Vec::new();
        for record in reader.records() {
            let record = record?;
            if record.len() != HEADER.len() {
                return Err(LedgerError::MalformedRow {
                    line: record.position().map(|p| p.line()).unwrap_or_default(),
                    fields: record.len(),
                });
            }
            rows.push(CaseRow {
                test_id: record[0].to_string(),
                test_name: record[1].to_string(),
                module: record[2].to_string(),
                status: record[3].to_string(),
                automation_tool: record[4].to_string(),
            });
        }

        tracing::debug!(rows = rows.len(), "read results table");
        Ok(rows)
    }

    pub fn read_path(path: &Path) -> Result<Vec<CaseRow>> {
        let file = fs::File::open(path)?;
        Self::read(file)
    }
}

/// A destination that accepts a complete results table
pub trait ResultSink {
    /// Human-readable destination, used in error messages
    fn destination(&self) -> String;

    fn write_table(&mut self, rows: &[CaseRow]) -> std::io::Result<()>;
}

/// Writes a results file atomically: the table goes to a temporary file next
/// to the destination which then replaces it. On failure the destination is
/// left untouched and the temporary file is removed.
#[derive(Debug, Clone)]
pub struct CsvFileSink {
    path: PathBuf,
}

impl CsvFileSink {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ResultSink for CsvFileSink {
    fn destination(&self) -> String {
        self.path.display().to_string()
    }

    fn write_table(&mut self, rows: &[CaseRow]) -> std::io::Result<()> {
        let bytes = ResultRecorder::render(rows).map_err(into_io)?;

        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };
        let mut temp = NamedTempFile::new_in(&dir)?;
        temp.write_all(&bytes)?;
        temp.as_file().sync_all()?;
        temp.persist(&self.path).map_err(|e| e.error)?;

        tracing::debug!(path = %self.path.display(), rows = rows.len(), "results file written");
        Ok(())
    }
}

/// Writes the table into any `Write` (stdout, an in-memory buffer, ...)
pub struct CsvStreamSink<W> {
    inner: W,
    label: String,
}

impl<W: Write> CsvStreamSink<W> {
    pub fn new(inner: W, label: impl Into<String>) -> Self {
        Self {
            inner,
            label: label.into(),
        }
    }

    pub fn into_inner(self) -> W {
        self.inner
    }
}

impl<W: Write> ResultSink for CsvStreamSink<W> {
    fn destination(&self) -> String {
        self.label.clone()
    }

    fn write_table(&mut self, rows: &[CaseRow]) -> std::io::Result<()> {
        ResultRecorder::write(&mut self.inner, rows).map_err(into_io)
    }
}

fn into_io(err: LedgerError) -> std::io::Error {
    match err {
        LedgerError::IoError(e) => e,
        LedgerError::Csv(e) => e.into(),
        other => std::io::Error::new(std::io::ErrorKind::Other, other.to_string()),
    }
}
