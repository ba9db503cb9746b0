//! In-memory record store with CSV export.
//!
//! Records are kept in submission order for the lifetime of a session. The
//! store only grows; there is no edit or delete.

use std::io::Write;
use std::path::{Path, PathBuf};

use csv::{ReaderBuilder, WriterBuilder};
use tracing::{debug, info};

use crate::error::{Error, Result};
use crate::record::{Record, CSV_HEADERS};

/// File name offered for the download.
pub const CSV_FILE_NAME: &str = "personal_data.csv";

/// MIME type offered for the download.
pub const CSV_MIME_TYPE: &str = "text/csv";

/// A CSV file ready to hand to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CsvDownload {
    /// Suggested file name.
    pub file_name: String,
    /// MIME type of the content.
    pub mime_type: &'static str,
    /// UTF-8 encoded CSV text.
    pub bytes: Vec<u8>,
}

impl CsvDownload {
    /// Write the content to `dir/<file_name>`, creating `dir` if needed.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be created or the file cannot
    /// be written.
    pub fn save_in(&self, dir: impl AsRef<Path>) -> Result<PathBuf> {
        let dir = dir.as_ref();
        if !dir.as_os_str().is_empty() && !dir.exists() {
            std::fs::create_dir_all(dir).map_err(|source| Error::DirectoryCreate {
                path: dir.to_path_buf(),
                source,
            })?;
        }
        let path = dir.join(&self.file_name);
        std::fs::write(&path, &self.bytes)?;
        info!("Saved {} bytes to {}", self.bytes.len(), path.display());
        Ok(path)
    }
}

/// Ordered, append-only collection of submitted records.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordStore {
    records: Vec<Record>,
}

impl RecordStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a record at the end.
    pub fn append(&mut self, record: Record) {
        self.records.push(record);
        debug!("Appended record #{}", self.records.len());
    }

    /// Number of records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether no record has been submitted yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// All records in submission order.
    #[must_use]
    pub fn records(&self) -> &[Record] {
        &self.records
    }

    /// Iterate over records in submission order.
    pub fn iter(&self) -> std::slice::Iter<'_, Record> {
        self.records.iter()
    }

    /// Write every record as CSV, header first.
    ///
    /// The header row is written even when the store is empty.
    ///
    /// # Errors
    ///
    /// Returns an error if writing to `writer` fails.
    pub fn write_csv<W: Write>(&self, writer: W) -> Result<()> {
        let mut csv = WriterBuilder::new().has_headers(false).from_writer(writer);
        csv.write_record(CSV_HEADERS)?;
        for record in &self.records {
            csv.serialize(record)?;
        }
        csv.flush()?;
        Ok(())
    }

    /// Export every record as CSV text.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn export_csv(&self) -> Result<String> {
        let mut buf = Vec::new();
        self.write_csv(&mut buf)?;
        String::from_utf8(buf)
            .map_err(|e| Error::Io(std::io::Error::new(std::io::ErrorKind::InvalidData, e)))
    }

    /// The download offered to the user, or `None` while the store is empty.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn download(&self, file_name: &str) -> Result<Option<CsvDownload>> {
        if self.is_empty() {
            return Ok(None);
        }
        let bytes = self.export_csv()?.into_bytes();
        Ok(Some(CsvDownload {
            file_name: file_name.to_string(),
            mime_type: CSV_MIME_TYPE,
            bytes,
        }))
    }
}

impl<'a> IntoIterator for &'a RecordStore {
    type Item = &'a Record;
    type IntoIter = std::slice::Iter<'a, Record>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

/// Parse CSV text produced by [`RecordStore::export_csv`].
///
/// # Errors
///
/// Returns an error if the header does not match or a row cannot be
/// deserialized.
pub fn parse_csv(text: &str) -> Result<Vec<Record>> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .from_reader(text.as_bytes());

    let headers = reader.headers()?.clone();
    if !headers.iter().eq(CSV_HEADERS.iter().copied()) {
        return Err(Error::invalid_input(format!(
            "unexpected CSV header: {}",
            headers.iter().collect::<Vec<_>>().join(",")
        )));
    }

    let mut records = Vec::new();
    for row in reader.deserialize() {
        records.push(row?);
    }
    Ok(records)
}
