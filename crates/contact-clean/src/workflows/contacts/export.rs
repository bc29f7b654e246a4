use super::assembler::{is_cleaned_in_place, ContactRecord};
use super::columns::{DerivedColumn, SourceColumn};
use super::parser::ContactTable;
use super::ContactPipelineError;
use std::io::Write;

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Where an output cell comes from.
#[derive(Debug, Clone, Copy)]
enum OutputCell {
    Raw(usize),
    Cleaned(SourceColumn),
    Derived(DerivedColumn),
}

/// Source columns first (cleaned where applicable), derived columns after.
/// Source columns already named like a derived column are dropped so that an
/// exported file can be fed back in.
fn output_layout(table: &ContactTable) -> Vec<(String, OutputCell)> {
    let mut layout: Vec<(String, OutputCell)> = table
        .headers()
        .iter()
        .enumerate()
        .filter(|(_, header)| !DerivedColumn::is_derived_header(header))
        .map(|(index, header)| {
            let cleaned = SourceColumn::ordered().into_iter().find(|column| {
                is_cleaned_in_place(*column) && table.column_index(*column) == Some(index)
            });
            let cell = match cleaned {
                Some(column) => OutputCell::Cleaned(column),
                None => OutputCell::Raw(index),
            };
            (header.clone(), cell)
        })
        .collect();

    layout.extend(
        DerivedColumn::ordered()
            .into_iter()
            .map(|column| (column.header().to_string(), OutputCell::Derived(column))),
    );
    layout
}

/// Writes the cleaned table as UTF-8 CSV prefixed with a byte-order mark.
pub(crate) fn write_contacts<W: Write>(
    mut writer: W,
    table: &ContactTable,
    records: &[ContactRecord],
    delimiter: u8,
) -> Result<(), ContactPipelineError> {
    writer
        .write_all(UTF8_BOM)
        .map_err(ContactPipelineError::Write)?;

    let layout = output_layout(table);
    let mut csv_writer = csv::WriterBuilder::new()
        .delimiter(delimiter)
        .from_writer(writer);

    csv_writer
        .write_record(layout.iter().map(|(header, _)| header.as_str()))
        .map_err(ContactPipelineError::Export)?;

    for (raw, record) in table.rows().zip(records) {
        let row = layout.iter().map(|(_, cell)| match *cell {
            OutputCell::Raw(index) => raw.values().get(index).cloned().flatten().unwrap_or_default(),
            OutputCell::Cleaned(column) => record
                .cleaned_source(column)
                .flatten()
                .unwrap_or_default()
                .to_string(),
            OutputCell::Derived(column) => record.derived_cell(column),
        });
        csv_writer
            .write_record(row)
            .map_err(ContactPipelineError::Export)?;
    }

    csv_writer
        .flush()
        .map_err(ContactPipelineError::Write)
}
