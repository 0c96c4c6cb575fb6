//! Result export to JSON Lines or CSV.
//!
//! The format is picked from the destination extension. Both writers create
//! missing parent directories and overwrite existing files; writes are not
//! atomic.

use crate::error::{Result, XploreError};
use crate::record::CanonicalRecord;
use serde::Serialize;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use tracing::debug;

/// Separator used to flatten `authors`/`keywords` into one CSV cell
pub const LIST_SEPARATOR: &str = "; ";

/// CSV column order
pub const CSV_COLUMNS: &[&str] = &[
    "query",
    "title",
    "authors",
    "publication_title",
    "year",
    "doi",
    "abstract",
    "keywords",
    "document_url",
    "pdf_url",
    "publisher",
    "content_type",
    "source",
];

/// Output encoding
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// One JSON object per line
    Jsonl,
    /// Flat table with a header row
    Csv,
}

impl OutputFormat {
    /// Pick the encoding from the path extension (`.jsonl` or `.csv`).
    pub fn from_path(path: &Path) -> Result<Self> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase)
            .unwrap_or_default();

        match ext.as_str() {
            "jsonl" => Ok(Self::Jsonl),
            "csv" => Ok(Self::Csv),
            _ => Err(XploreError::Config(format!(
                "Output must end with .jsonl or .csv: {}",
                path.display()
            ))),
        }
    }
}

/// Save records in the format implied by `path`
pub fn save(records: &[CanonicalRecord], path: &Path) -> Result<OutputFormat> {
    let format = OutputFormat::from_path(path)?;
    match format {
        OutputFormat::Jsonl => write_jsonl(records, path)?,
        OutputFormat::Csv => write_csv(records, path)?,
    }
    Ok(format)
}

/// Write one JSON object per line. Non-ASCII text is written verbatim.
pub fn write_jsonl(records: &[CanonicalRecord], path: &Path) -> Result<()> {
    let mut out = BufWriter::new(create(path)?);
    for record in records {
        serde_json::to_writer(&mut out, record)?;
        out.write_all(b"\n")?;
    }
    out.flush()?;
    debug!(path = %path.display(), count = records.len(), "Wrote JSONL");
    Ok(())
}

/// CSV view of a record with list fields joined
#[derive(Serialize)]
struct CsvRow<'a> {
    query: &'a str,
    title: &'a str,
    authors: String,
    publication_title: &'a str,
    year: Option<i64>,
    doi: &'a str,
    #[serde(rename = "abstract")]
    abstract_text: &'a str,
    keywords: String,
    document_url: &'a str,
    pdf_url: &'a str,
    publisher: &'a str,
    content_type: &'a str,
    source: &'a str,
}

impl<'a> From<&'a CanonicalRecord> for CsvRow<'a> {
    fn from(r: &'a CanonicalRecord) -> Self {
        Self {
            query: &r.query,
            title: &r.title,
            authors: r.authors.join(LIST_SEPARATOR),
            publication_title: &r.publication_title,
            year: r.year,
            doi: &r.doi,
            abstract_text: &r.abstract_text,
            keywords: r.keywords.join(LIST_SEPARATOR),
            document_url: &r.document_url,
            pdf_url: &r.pdf_url,
            publisher: &r.publisher,
            content_type: &r.content_type,
            source: &r.source,
        }
    }
}

/// Write a header row plus one row per record.
///
/// The header is written even when there are no records.
pub fn write_csv(records: &[CanonicalRecord], path: &Path) -> Result<()> {
    let mut wtr = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(create(path)?);

    wtr.write_record(CSV_COLUMNS)?;
    for record in records {
        wtr.serialize(CsvRow::from(record))?;
    }

    wtr.flush()?;
    debug!(path = %path.display(), count = records.len(), "Wrote CSV");
    Ok(())
}

fn create(path: &Path) -> Result<File> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    Ok(File::create(path)?)
}
