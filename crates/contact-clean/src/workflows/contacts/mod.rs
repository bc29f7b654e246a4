//! Cleaning of pharmacy contact exports ahead of CRM import.
//!
//! Each row goes through the field normalizers, the civility extractor and the
//! name splitter, then gets quality flags. Rows never influence each other; the
//! only shared input is the read-only [`ReferenceNameSet`].

mod assembler;
pub mod civility;
pub mod columns;
mod export;
pub mod names;
pub mod normalizer;
mod parser;
pub mod quality;
mod summary;

use crate::config::{PipelineConfig, TextEncoding};
use chrono::Local;
use std::io::{Read, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

pub use assembler::{ContactRecord, ABSENT_PLACEHOLDER};
pub use civility::{Civility, Gender};
pub use columns::{DerivedColumn, SourceColumn};
pub use names::{NameSplitter, ReferenceNameSet, SplitMethod, SplitResult};
pub use parser::{ContactTable, RawContact};
pub use quality::{MissingField, QualityReport};
pub use summary::{CleaningSummary, MissingFieldCount, SplitMethodCount, UnrecognisedSample};

#[derive(Debug, thiserror::Error)]
pub enum ContactPipelineError {
    #[error("failed to open {}: {source}", path.display())]
    Open {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to create {}: {source}", path.display())]
    Create {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("invalid contact CSV data: {0}")]
    Dataset(#[source] csv::Error),
    #[error("invalid first-name list: {0}")]
    NameList(#[source] csv::Error),
    #[error("failed to export cleaned contacts: {0}")]
    Export(#[source] csv::Error),
    #[error("failed to write cleaned contacts: {0}")]
    Write(#[source] std::io::Error),
}

impl ContactTable {
    pub fn from_path<P: AsRef<Path>>(
        path: P,
        delimiter: u8,
        encoding: TextEncoding,
    ) -> Result<Self, ContactPipelineError> {
        let path = path.as_ref();
        let file = std::fs::File::open(path).map_err(|source| ContactPipelineError::Open {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_reader(file, delimiter, encoding)
    }

    pub fn from_reader<R: Read>(
        reader: R,
        delimiter: u8,
        encoding: TextEncoding,
    ) -> Result<Self, ContactPipelineError> {
        parser::parse_table(reader, delimiter, encoding).map_err(ContactPipelineError::Dataset)
    }
}

/// Applies every row transform against a fixed reference name set.
#[derive(Debug, Clone, Copy)]
pub struct ContactCleaner<'a> {
    splitter: NameSplitter<'a>,
}

impl<'a> ContactCleaner<'a> {
    pub fn new(names: &'a ReferenceNameSet) -> Self {
        Self {
            splitter: NameSplitter::new(names),
        }
    }

    pub fn clean_row(&self, raw: &RawContact<'_>) -> ContactRecord {
        ContactRecord::assemble(raw, &self.splitter)
    }

    /// Cleans every row, preserving input order.
    pub fn clean(&self, table: ContactTable) -> CleanedContacts {
        let records = table.rows().map(|raw| self.clean_row(&raw)).collect();
        CleanedContacts { table, records }
    }

    pub fn names(&self) -> &'a ReferenceNameSet {
        self.splitter.names()
    }
}

/// Source table together with one cleaned record per row.
#[derive(Debug, Clone)]
pub struct CleanedContacts {
    table: ContactTable,
    records: Vec<ContactRecord>,
}

impl CleanedContacts {
    pub fn table(&self) -> &ContactTable {
        &self.table
    }

    pub fn records(&self) -> &[ContactRecord] {
        &self.records
    }

    pub fn flagged(&self) -> impl Iterator<Item = &ContactRecord> {
        self.records.iter().filter(|record| record.needs_review())
    }

    pub fn summary(&self, names: &ReferenceNameSet) -> CleaningSummary {
        CleaningSummary::from_records(&self.records, names, Local::now())
    }

    pub fn write_csv<W: Write>(&self, writer: W, delimiter: u8) -> Result<(), ContactPipelineError> {
        export::write_contacts(writer, &self.table, &self.records, delimiter)
    }

    pub fn write_to_path<P: AsRef<Path>>(
        &self,
        path: P,
        delimiter: u8,
    ) -> Result<(), ContactPipelineError> {
        let path = path.as_ref();
        let file = std::fs::File::create(path).map_err(|source| ContactPipelineError::Create {
            path: path.to_path_buf(),
            source,
        })?;
        self.write_csv(std::io::BufWriter::new(file), delimiter)
    }
}

/// Loads both inputs, cleans every row and writes the export. Nothing is written
/// unless both inputs load.
pub fn run(config: &PipelineConfig) -> Result<CleaningSummary, ContactPipelineError> {
    let names = ReferenceNameSet::from_path(&config.first_names_path, config.first_names_encoding)?;
    info!(
        names = names.len(),
        sample = ?names.sample(10),
        path = %config.first_names_path.display(),
        "reference first names loaded"
    );

    let table = ContactTable::from_path(
        &config.input_path,
        config.input_delimiter,
        config.input_encoding,
    )?;
    info!(
        rows = table.len(),
        columns = table.headers().len(),
        path = %config.input_path.display(),
        "contact export loaded"
    );
    for column in SourceColumn::ordered() {
        if !table.has_column(column) {
            debug!(column = column.header(), "column missing from export, treated as empty");
        }
    }

    let cleaned = ContactCleaner::new(&names).clean(table);
    let summary = cleaned.summary(&names);
    info!(
        recognised = summary.recognised_first_names,
        total = summary.total_rows,
        rate = summary.recognition_rate,
        "first names recognised"
    );
    for sample in &summary.unrecognised_samples {
        debug!(
            interlocutor = sample.interlocutor.as_deref().unwrap_or_default(),
            first_name = sample.first_name.as_deref().unwrap_or_default(),
            "first name not in reference set"
        );
    }

    cleaned.write_to_path(&config.output_path, config.output_delimiter)?;
    info!(
        flagged = summary.flagged_rows,
        total = summary.total_rows,
        path = %config.output_path.display(),
        "cleaned contacts exported"
    );

    Ok(summary)
}
