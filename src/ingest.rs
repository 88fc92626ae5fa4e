//! Ingestion boundary — turns external data into `EmailRecord`s.
//!
//! Pure I/O glue, no triage logic. `RecordSource` is the seam where other
//! collaborators (a mailbox fetcher, a ticket API) would plug in; only a CSV
//! source ships here since real mail delivery is out of scope.
//!
//! Row-level problems never fail a batch: missing columns become empty
//! strings, unparseable dates become absent timestamps, and unreadable rows
//! are skipped with a warning. One bad row must not block the rest.

use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};
use tracing::{info, warn};

use crate::error::IngestError;
use crate::pipeline::types::EmailRecord;

/// A supplier of inbound email records. Pure I/O — no business logic.
pub trait RecordSource {
    /// Source name for logging ("csv", "imap", ...).
    fn name(&self) -> &str;

    /// Fetch all records this source currently has.
    fn fetch(&self) -> Result<Vec<EmailRecord>, IngestError>;
}

/// CSV-file source with `from`/`subject`/`body`/`date` columns.
///
/// Column lookup is case-insensitive and order-independent; missing columns
/// yield empty fields rather than errors.
#[derive(Debug, Clone)]
pub struct CsvSource {
    path: PathBuf,
}

impl CsvSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl RecordSource for CsvSource {
    fn name(&self) -> &str {
        "csv"
    }

    fn fetch(&self) -> Result<Vec<EmailRecord>, IngestError> {
        let file = File::open(&self.path)?;
        let records = read_records(file)?;
        info!(path = %self.path.display(), count = records.len(), "loaded CSV records");
        Ok(records)
    }
}

/// Read email records from CSV data.
///
/// Only reader-level failures (bad I/O, broken framing of the header row)
/// are errors; individual malformed rows are skipped with a warning.
pub fn read_records<R: Read>(reader: R) -> Result<Vec<EmailRecord>, IngestError> {
    let mut rdr = csv::ReaderBuilder::new().flexible(true).from_reader(reader);

    let headers = rdr.headers()?.clone();
    let column = |name: &str| {
        headers
            .iter()
            .position(|h| h.trim().eq_ignore_ascii_case(name))
    };
    let from_idx = column("from");
    let subject_idx = column("subject");
    let body_idx = column("body");
    let date_idx = column("date");

    let mut records = Vec::new();
    for (line, result) in rdr.records().enumerate() {
        let row = match result {
            Ok(row) => row,
            Err(e) => {
                warn!(line, error = %e, "skipping malformed CSV row");
                continue;
            }
        };

        let field =
            |idx: Option<usize>| idx.and_then(|i| row.get(i)).unwrap_or("").trim().to_string();

        let raw_date = field(date_idx);
        let timestamp = parse_timestamp(&raw_date);
        if timestamp.is_none() && !raw_date.is_empty() {
            warn!(line, date = %raw_date, "unparseable date, record kept without timestamp");
        }

        records.push(EmailRecord {
            sender: field(from_idx),
            subject: field(subject_idx),
            body: field(body_idx),
            timestamp,
        });
    }

    Ok(records)
}

/// Best-effort timestamp parsing: RFC 3339, RFC 2822, then a fixed list of
/// common formats. Returns `None` rather than failing the record.
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(dt) = DateTime::parse_from_rfc2822(raw) {
        return Some(dt.with_timezone(&Utc));
    }

    const FORMATS: &[&str] = &[
        "%Y-%m-%d %H:%M:%S",
        "%Y-%m-%d %H:%M",
        "%m/%d/%Y %H:%M:%S",
        "%m/%d/%Y %H:%M",
    ];
    for fmt in FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, fmt) {
            return Some(Utc.from_utc_datetime(&naive));
        }
    }
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Some(Utc.from_utc_datetime(&date.and_hms_opt(0, 0, 0)?));
    }

    None
}
