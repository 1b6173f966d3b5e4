//! Results export.
//!
//! A finished game's results log is written as a semicolon-delimited table.
//! When an archive store is configured the same bytes are also stored under
//! a per-day sequence name (`gra001_2026-10-19.csv`, `gra002_…`). Archiving
//! is best-effort: a missing store means local output only and a failing
//! store is reported in the outcome, never as an error.

use std::io::Write;

use chrono::NaiveDate;
use tracing::{info, warn};

use crate::error::ExportResult;
use crate::results::ResultsLog;

/// Column headers of the results table.
pub const COLUMNS: [&str; 7] = [
    "question_index",
    "category",
    "question_text",
    "responder",
    "guesser",
    "responder_points",
    "guesser_points",
];

/// Write the results log as a semicolon-delimited table with a header row.
pub fn write_csv<W: Write>(log: &ResultsLog, writer: W) -> ExportResult<()> {
    let mut wtr = csv::WriterBuilder::new()
        .delimiter(b';')
        .has_headers(false)
        .from_writer(writer);
    wtr.write_record(COLUMNS)?;
    for record in log.entries() {
        wtr.serialize(record)?;
    }
    wtr.flush()?;
    Ok(())
}

/// The results table as bytes.
pub fn to_csv_bytes(log: &ResultsLog) -> ExportResult<Vec<u8>> {
    let mut buf = Vec::new();
    write_csv(log, &mut buf)?;
    Ok(buf)
}

/// Archive file name for a game: `gra{seq:03}_{YYYY-MM-DD}.csv`.
pub fn archive_file_name(seq: u32, date: NaiveDate) -> String {
    format!("gra{seq:03}_{}.csv", date.format("%Y-%m-%d"))
}

fn parse_sequence(name: &str, day: &str) -> Option<u32> {
    let (num, rest) = name.strip_prefix("gra")?.strip_suffix(".csv")?.split_once('_')?;
    if rest != day {
        return None;
    }
    num.parse().ok()
}

/// Next free sequence number for `date`, given the names already archived.
///
/// Names from other days or in other formats are ignored; the first game of
/// a day gets 1.
pub fn next_sequence<'a, I>(existing: I, date: NaiveDate) -> u32
where
    I: IntoIterator<Item = &'a str>,
{
    let day = date.format("%Y-%m-%d").to_string();
    existing
        .into_iter()
        .filter_map(|name| parse_sequence(name, &day))
        .max()
        .unwrap_or(0)
        + 1
}

/// Somewhere finished games are kept.
pub trait ArchiveStore {
    /// Names of the files already in the archive.
    fn list(&self) -> ExportResult<Vec<String>>;

    /// Store a file under `name`.
    fn put(&self, name: &str, contents: &[u8]) -> ExportResult<()>;
}

/// What happened to the archive copy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArchiveStatus {
    /// Stored under this file name.
    Stored(String),
    /// No archive store is configured.
    LocalOnly,
    /// The log is empty; nothing was archived.
    Skipped,
    /// The store failed; the local table is still available.
    Failed(String),
}

/// Result of an export.
#[derive(Debug, Clone)]
pub struct ExportOutcome {
    /// The results table.
    pub bytes: Vec<u8>,
    /// Archive result.
    pub archive: ArchiveStatus,
}

/// Writes results tables and archives them when a store is available.
#[derive(Default)]
pub struct ResultExporter {
    store: Option<Box<dyn ArchiveStore>>,
}

impl ResultExporter {
    /// An exporter that archives into `store`.
    pub fn with_store(store: Box<dyn ArchiveStore>) -> Self {
        Self { store: Some(store) }
    }

    /// An exporter that only produces the local table.
    pub fn local_only() -> Self {
        Self::default()
    }

    /// Serialize the log and archive it as the next game of `date`.
    pub fn export(&self, log: &ResultsLog, date: NaiveDate) -> ExportResult<ExportOutcome> {
        let bytes = to_csv_bytes(log)?;

        let archive = match &self.store {
            None => ArchiveStatus::LocalOnly,
            Some(_) if log.is_empty() => ArchiveStatus::Skipped,
            Some(store) => match archive(store.as_ref(), &bytes, date) {
                Ok(name) => {
                    info!(file = %name, "results archived");
                    ArchiveStatus::Stored(name)
                }
                Err(e) => {
                    warn!(error = %e, "archiving results failed");
                    ArchiveStatus::Failed(e.to_string())
                }
            },
        };

        Ok(ExportOutcome { bytes, archive })
    }
}

fn archive(store: &dyn ArchiveStore, bytes: &[u8], date: NaiveDate) -> ExportResult<String> {
    let existing = store.list()?;
    let seq = next_sequence(existing.iter().map(String::as_str), date);
    let name = archive_file_name(seq, date);
    store.put(&name, bytes)?;
    Ok(name)
}
