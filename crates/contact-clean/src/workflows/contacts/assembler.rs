use super::civility::{Civility, Gender};
use super::columns::{DerivedColumn, SourceColumn, EMAIL_COLUMNS};
use super::names::{NameSplitter, SplitMethod};
use super::normalizer::{
    best_email, clean_address, clean_city, clean_company, clean_postal_code, clean_text,
    format_phone,
};
use super::parser::RawContact;
use super::quality::{FieldPresence, QualityReport};

/// Stand-in for absent parts of the composite contact string.
pub const ABSENT_PLACEHOLDER: &str = "N/A";
const CONTACT_SEPARATOR: &str = " / ";

/// Source columns rewritten in place with their cleaned value.
const CLEANED_IN_PLACE: [SourceColumn; 6] = [
    SourceColumn::CompanyName,
    SourceColumn::Country,
    SourceColumn::Website,
    SourceColumn::Address,
    SourceColumn::PostalCode,
    SourceColumn::City,
];

/// A cleaned contact. Built once from a raw row and never modified afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactRecord {
    pub company_name: Option<String>,
    pub country: Option<String>,
    pub website: Option<String>,
    pub address: Option<String>,
    pub postal_code: Option<String>,
    pub city: Option<String>,
    pub interlocutor: Option<String>,
    pub civility: Option<Civility>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub gender: Option<Gender>,
    pub split_method: SplitMethod,
    pub formatted_company: Option<String>,
    pub mobile: Option<String>,
    pub landline: Option<String>,
    pub secondary_landline: Option<String>,
    pub email: Option<String>,
    pub contact_summary: String,
    pub quality: QualityReport,
}

impl ContactRecord {
    pub fn assemble(raw: &RawContact<'_>, splitter: &NameSplitter<'_>) -> Self {
        let interlocutor = raw.get(SourceColumn::Interlocutor);
        let civility = Civility::detect(interlocutor);
        let split = splitter.split(interlocutor);

        let mobile = format_phone(raw.get(SourceColumn::Mobile));
        let landline = format_phone(raw.get(SourceColumn::Landline));
        let secondary_landline = format_phone(raw.get(SourceColumn::SecondaryLandline));
        let email = best_email(EMAIL_COLUMNS.iter().map(|column| raw.get(*column)));

        let address = clean_address(raw.get(SourceColumn::Address));
        let postal_code = clean_postal_code(raw.get(SourceColumn::PostalCode));
        let city = clean_city(raw.get(SourceColumn::City));

        let contact_summary = compose_contact(&[
            split.first_name.as_deref(),
            split.last_name.as_deref(),
            email.as_deref(),
            mobile.as_deref(),
        ]);

        let quality = QualityReport::assess(&FieldPresence {
            first_name: split.first_name.is_some(),
            last_name: split.last_name.is_some(),
            email: email.is_some(),
            mobile: mobile.is_some(),
            landline: landline.is_some(),
            secondary_landline: secondary_landline.is_some(),
            address: address.is_some(),
            postal_code: postal_code.is_some(),
            city: city.is_some(),
        });

        Self {
            company_name: clean_text(raw.get(SourceColumn::CompanyName)),
            country: clean_text(raw.get(SourceColumn::Country)),
            website: clean_text(raw.get(SourceColumn::Website)),
            address,
            postal_code,
            city,
            interlocutor: interlocutor.map(str::to_string),
            civility,
            first_name: split.first_name,
            last_name: split.last_name,
            gender: civility.and_then(Civility::gender),
            split_method: split.method,
            formatted_company: clean_company(raw.get(SourceColumn::CompanyName)),
            mobile,
            landline,
            secondary_landline,
            email,
            contact_summary,
            quality,
        }
    }

    pub fn needs_review(&self) -> bool {
        self.quality.needs_review()
    }

    /// Cleaned replacement for a source column, when the pipeline rewrites it.
    pub fn cleaned_source(&self, column: SourceColumn) -> Option<Option<&str>> {
        let value = match column {
            SourceColumn::CompanyName => &self.company_name,
            SourceColumn::Country => &self.country,
            SourceColumn::Website => &self.website,
            SourceColumn::Address => &self.address,
            SourceColumn::PostalCode => &self.postal_code,
            SourceColumn::City => &self.city,
            _ => return None,
        };
        Some(value.as_deref())
    }

    /// Export cell for a derived column. Absent values become empty cells.
    pub fn derived_cell(&self, column: DerivedColumn) -> String {
        let value = match column {
            DerivedColumn::Civility => self.civility.map(Civility::label),
            DerivedColumn::FirstName => self.first_name.as_deref(),
            DerivedColumn::LastName => self.last_name.as_deref(),
            DerivedColumn::Gender => self.gender.map(Gender::label),
            DerivedColumn::Company => self.formatted_company.as_deref(),
            DerivedColumn::Mobile => self.mobile.as_deref(),
            DerivedColumn::Landline => self.landline.as_deref(),
            DerivedColumn::SecondaryLandline => self.secondary_landline.as_deref(),
            DerivedColumn::Email => self.email.as_deref(),
            DerivedColumn::Contact => Some(self.contact_summary.as_str()),
            DerivedColumn::Reasons => return self.quality.reasons_cell(),
            DerivedColumn::QualityFlag => Some(self.quality.flag_cell()),
        };
        value.unwrap_or_default().to_string()
    }
}

pub(crate) fn is_cleaned_in_place(column: SourceColumn) -> bool {
    CLEANED_IN_PLACE.contains(&column)
}

fn compose_contact(parts: &[Option<&str>]) -> String {
    parts
        .iter()
        .map(|part| part.unwrap_or(ABSENT_PLACEHOLDER))
        .collect::<Vec<_>>()
        .join(CONTACT_SEPARATOR)
}
