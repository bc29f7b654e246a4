use super::assembler::ContactRecord;
use super::names::{ReferenceNameSet, SplitMethod};
use super::quality::MissingField;
use chrono::{DateTime, Local};
use serde::Serialize;

const UNRECOGNISED_SAMPLE_LIMIT: usize = 5;

/// Run-level statistics over a cleaned dataset.
#[derive(Debug, Clone, Serialize)]
pub struct CleaningSummary {
    pub generated_at: DateTime<Local>,
    pub total_rows: usize,
    pub flagged_rows: usize,
    pub reference_names: usize,
    /// Rows whose first name is a member of the reference set.
    pub recognised_first_names: usize,
    pub recognition_rate: f64,
    pub split_methods: Vec<SplitMethodCount>,
    pub missing_fields: Vec<MissingFieldCount>,
    pub unrecognised_samples: Vec<UnrecognisedSample>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SplitMethodCount {
    pub method: SplitMethod,
    pub rows: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MissingFieldCount {
    pub field: MissingField,
    pub reason: &'static str,
    pub rows: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UnrecognisedSample {
    pub interlocutor: Option<String>,
    pub first_name: Option<String>,
}

impl CleaningSummary {
    pub fn from_records(
        records: &[ContactRecord],
        names: &ReferenceNameSet,
        generated_at: DateTime<Local>,
    ) -> Self {
        let total_rows = records.len();
        let flagged_rows = records.iter().filter(|record| record.needs_review()).count();

        let is_recognised = |record: &ContactRecord| {
            record
                .first_name
                .as_deref()
                .is_some_and(|first_name| names.contains(first_name))
        };
        let recognised_first_names = records.iter().filter(|record| is_recognised(*record)).count();
        let recognition_rate = if total_rows == 0 {
            0.0
        } else {
            recognised_first_names as f64 / total_rows as f64
        };

        let split_methods = SplitMethod::ordered()
            .into_iter()
            .map(|method| SplitMethodCount {
                method,
                rows: records
                    .iter()
                    .filter(|record| record.split_method == method)
                    .count(),
            })
            .filter(|entry| entry.rows > 0)
            .collect();

        let missing_fields = MissingField::ordered()
            .into_iter()
            .map(|field| MissingFieldCount {
                field,
                reason: field.reason(),
                rows: records
                    .iter()
                    .filter(|record| record.quality.missing().contains(&field))
                    .count(),
            })
            .filter(|entry| entry.rows > 0)
            .collect();

        let unrecognised_samples = records
            .iter()
            .filter(|record| !is_recognised(*record))
            .take(UNRECOGNISED_SAMPLE_LIMIT)
            .map(|record| UnrecognisedSample {
                interlocutor: record.interlocutor.clone(),
                first_name: record.first_name.clone(),
            })
            .collect();

        Self {
            generated_at,
            total_rows,
            flagged_rows,
            reference_names: names.len(),
            recognised_first_names,
            recognition_rate,
            split_methods,
            missing_fields,
            unrecognised_samples,
        }
    }
}
