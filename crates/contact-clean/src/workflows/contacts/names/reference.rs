use crate::config::TextEncoding;
use crate::workflows::contacts::ContactPipelineError;
use std::collections::HashSet;
use std::io::Read;
use std::path::Path;

/// Known first names, stored in canonical capitalization. Built once per run and
/// only read afterwards.
#[derive(Debug, Clone, Default)]
pub struct ReferenceNameSet {
    names: HashSet<String>,
}

impl ReferenceNameSet {
    pub fn from_path<P: AsRef<Path>>(
        path: P,
        encoding: TextEncoding,
    ) -> Result<Self, ContactPipelineError> {
        let path = path.as_ref();
        let file = std::fs::File::open(path).map_err(|source| ContactPipelineError::Open {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_reader(file, encoding)
    }

    /// Reads a `;`-delimited `name;gender;language;frequency` list. The first line
    /// is a header; only the first column is used.
    pub fn from_reader<R: Read>(
        reader: R,
        encoding: TextEncoding,
    ) -> Result<Self, ContactPipelineError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .delimiter(b';')
            .has_headers(true)
            .flexible(true)
            .from_reader(reader);

        let mut names = HashSet::new();
        for record in csv_reader.byte_records() {
            let record = record.map_err(ContactPipelineError::NameList)?;
            let Some(raw) = record.get(0) else {
                continue;
            };
            let name = encoding.decode(raw);
            let name = name.trim();
            if !name.is_empty() {
                names.insert(canonical_name(name));
            }
        }

        Ok(Self { names })
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn contains(&self, candidate: &str) -> bool {
        self.lookup(candidate).is_some()
    }

    /// Returns the stored spelling of `candidate`, if known.
    pub fn lookup(&self, candidate: &str) -> Option<&str> {
        self.names
            .get(&canonical_name(candidate))
            .map(String::as_str)
    }

    /// Up to `limit` entries in sorted order, for logging.
    pub fn sample(&self, limit: usize) -> Vec<&str> {
        let mut sample: Vec<&str> = self.names.iter().map(String::as_str).collect();
        sample.sort_unstable();
        sample.truncate(limit);
        sample
    }
}

impl<S: AsRef<str>> FromIterator<S> for ReferenceNameSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            names: iter
                .into_iter()
                .map(|name| canonical_name(name.as_ref().trim()))
                .filter(|name| !name.is_empty())
                .collect(),
        }
    }
}

/// Capitalizes every space- or hyphen-separated segment: `JEAN-PIERRE` -> `Jean-Pierre`.
pub(crate) fn canonical_name(value: &str) -> String {
    let mut output = String::with_capacity(value.len());
    let mut segment_start = true;
    for ch in value.chars() {
        if segment_start {
            output.extend(ch.to_uppercase());
        } else {
            output.extend(ch.to_lowercase());
        }
        segment_start = ch == ' ' || ch == '-';
    }
    output
}
