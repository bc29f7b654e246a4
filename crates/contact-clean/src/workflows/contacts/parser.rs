use super::columns::SourceColumn;
use super::normalizer::collapse_whitespace;
use crate::config::TextEncoding;
use std::collections::{HashMap, HashSet};
use std::io::Read;

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Contact export held in memory: headers plus one value per header and row.
/// Empty cells are stored as `None`.
#[derive(Debug, Clone)]
pub struct ContactTable {
    headers: Vec<String>,
    index: HashMap<SourceColumn, usize>,
    rows: Vec<Vec<Option<String>>>,
}

impl ContactTable {
    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn has_column(&self, column: SourceColumn) -> bool {
        self.index.contains_key(&column)
    }

    pub fn column_index(&self, column: SourceColumn) -> Option<usize> {
        self.index.get(&column).copied()
    }

    pub fn rows(&self) -> impl Iterator<Item = RawContact<'_>> {
        self.rows.iter().map(move |values| RawContact {
            table: self,
            values,
        })
    }
}

/// Borrowed view over one source row.
#[derive(Debug, Clone, Copy)]
pub struct RawContact<'a> {
    table: &'a ContactTable,
    values: &'a [Option<String>],
}

impl<'a> RawContact<'a> {
    /// Value of a known column; `None` when the cell is empty or the column is missing.
    pub fn get(&self, column: SourceColumn) -> Option<&'a str> {
        let index = self.table.column_index(column)?;
        self.values.get(index)?.as_deref()
    }

    pub fn values(&self) -> &'a [Option<String>] {
        self.values
    }
}

/// Cells are read as raw bytes and decoded with `encoding`, so a stray byte in
/// another code page degrades one value instead of failing the whole export.
pub(crate) fn parse_table<R: Read>(
    reader: R,
    delimiter: u8,
    encoding: TextEncoding,
) -> Result<ContactTable, csv::Error> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(reader);

    let headers = dedupe_headers(
        csv_reader
            .byte_headers()?
            .iter()
            .map(|header| {
                let header = header.strip_prefix(UTF8_BOM).unwrap_or(header);
                normalize_header(&encoding.decode(header))
            }),
    );
    let index = SourceColumn::ordered()
        .into_iter()
        .filter_map(|column| {
            headers
                .iter()
                .position(|header| header == column.header())
                .map(|position| (column, position))
        })
        .collect();

    let mut rows = Vec::new();
    for record in csv_reader.byte_records() {
        let record = record?;
        let mut values: Vec<Option<String>> = record
            .iter()
            .take(headers.len())
            .map(|value| empty_as_none(&encoding.decode(value)))
            .collect();
        values.resize(headers.len(), None);
        rows.push(values);
    }

    Ok(ContactTable {
        headers,
        index,
        rows,
    })
}

fn empty_as_none(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

fn normalize_header(value: &str) -> String {
    let cleaned = value.replace(['\u{feff}', '\u{200b}'], "");
    collapse_whitespace(&cleaned)
}

/// Repeated headers get a `.1`, `.2`, ... suffix, the way spreadsheet loaders
/// disambiguate them (a second `Téléphone` becomes `Téléphone.1`).
fn dedupe_headers<I>(headers: I) -> Vec<String>
where
    I: IntoIterator<Item = String>,
{
    let mut seen: HashSet<String> = HashSet::new();
    let mut counters: HashMap<String, usize> = HashMap::new();
    let mut deduped = Vec::new();

    for header in headers {
        let mut candidate = header.clone();
        while seen.contains(&candidate) {
            let counter = counters.entry(header.clone()).or_insert(0);
            *counter += 1;
            candidate = format!("{header}.{counter}");
        }
        seen.insert(candidate.clone());
        deduped.push(candidate);
    }

    deduped
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn duplicate_headers_are_suffixed() {
        let headers = dedupe_headers(
            ["Téléphone", "Ville", "Téléphone", "Téléphone"]
                .into_iter()
                .map(str::to_string),
        );
        assert_eq!(
            headers,
            vec!["Téléphone", "Ville", "Téléphone.1", "Téléphone.2"]
        );
    }

    #[test]
    fn parses_rows_and_maps_known_columns() {
        let csv = "\u{feff}Raison sociale;Interlocuteur;Téléphone;Téléphone;Divers\n\
PHARMACIE DU PORT; M. Jean Dupont ;0102030405;;x\n\
Pharmacie B;;\n";
        let table =
            parse_table(Cursor::new(csv), b';', TextEncoding::Utf8).expect("table parses");

        assert_eq!(table.len(), 2);
        assert_eq!(
            table.headers(),
            &["Raison sociale", "Interlocuteur", "Téléphone", "Téléphone.1", "Divers"]
        );
        assert!(table.has_column(SourceColumn::SecondaryLandline));
        assert!(!table.has_column(SourceColumn::City));

        let rows: Vec<_> = table.rows().collect();
        assert_eq!(
            rows[0].get(SourceColumn::Interlocutor),
            Some("M. Jean Dupont")
        );
        assert_eq!(rows[0].get(SourceColumn::Landline), Some("0102030405"));
        assert_eq!(rows[0].get(SourceColumn::SecondaryLandline), None);
        assert_eq!(rows[0].get(SourceColumn::City), None);
        assert_eq!(rows[1].get(SourceColumn::Interlocutor), None);
        assert_eq!(rows[1].values().len(), 5);
    }

    #[test]
    fn single_byte_accents_do_not_abort_the_export() {
        let data: &[u8] = b"Raison sociale;Ville;Interlocuteur\n\
PHARMACIE A;Lyon;M. Jean Dupont\n\
PHARMACIE B;Saint-\xc9tienne;Mme Marie Durand\n";

        let lossy = parse_table(Cursor::new(data), b';', TextEncoding::Utf8).expect("utf-8 parses");
        let rows: Vec<_> = lossy.rows().collect();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].get(SourceColumn::City), Some("Lyon"));
        assert_eq!(rows[1].get(SourceColumn::City), Some("Saint-\u{fffd}tienne"));
        assert_eq!(
            rows[1].get(SourceColumn::Interlocutor),
            Some("Mme Marie Durand")
        );

        let latin1 =
            parse_table(Cursor::new(data), b';', TextEncoding::Latin1).expect("latin-1 parses");
        let rows: Vec<_> = latin1.rows().collect();
        assert_eq!(rows[1].get(SourceColumn::City), Some("Saint-Étienne"));
    }
}
