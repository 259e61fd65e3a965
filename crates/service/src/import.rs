//! CSV → canonical record → upsert, one row at a time.

use std::io::Read;

use votereg_core::{HeaderSchema, ResolvedSchema};
use votereg_storage::RecordStore;

use crate::error::ServiceError;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ImportStats {
    /// Data rows read from the CSV (header excluded).
    pub rows_read: usize,
    /// Rows upserted into the store.
    pub rows_loaded: usize,
    /// Rows dropped because their state was blank.
    pub rows_skipped: usize,
}

/// CSV stream whose header row has already been resolved against a schema.
pub struct CsvSource<R> {
    reader: csv::Reader<R>,
    resolved: ResolvedSchema,
}

impl<R: Read> CsvSource<R> {
    /// Read and resolve the header row. Fails when there is no state column.
    pub fn open(input: R, schema: &HeaderSchema) -> Result<Self, ServiceError> {
        let mut reader = csv::ReaderBuilder::new().flexible(true).from_reader(input);
        let resolved = schema.resolve(reader.headers()?.iter())?;
        Ok(Self { reader, resolved })
    }

    /// Upsert every row sequentially, awaiting each write before reading on.
    ///
    /// The first CSV or store error aborts the remaining rows.
    pub async fn load_into<S>(mut self, store: &S) -> Result<ImportStats, ServiceError>
    where
        S: RecordStore + ?Sized,
    {
        let mut stats = ImportStats::default();
        let mut row = csv::StringRecord::new();

        while self.reader.read_record(&mut row)? {
            stats.rows_read += 1;
            let fields: Vec<&str> = row.iter().collect();
            let record = self.resolved.normalize(&fields);

            if record.has_empty_key() {
                let line = row.position().map_or(0, csv::Position::line);
                tracing::warn!(line, "skipping CSV row with empty state");
                stats.rows_skipped += 1;
                continue;
            }

            store.upsert_record(&record).await?;
            tracing::debug!(state = %record.state, "record loaded");
            stats.rows_loaded += 1;
        }

        Ok(stats)
    }
}
