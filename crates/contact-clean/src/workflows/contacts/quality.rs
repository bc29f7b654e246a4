use serde::Serialize;

pub const REVIEW_FLAG_LABEL: &str = "À vérifier";
const REASON_SEPARATOR: &str = "; ";

/// A required field missing from an assembled contact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MissingField {
    FirstName,
    LastName,
    Email,
    Phone,
    Address,
    PostalCode,
    City,
}

impl MissingField {
    /// Reporting order of the reasons.
    pub const fn ordered() -> [Self; 7] {
        [
            Self::FirstName,
            Self::LastName,
            Self::Email,
            Self::Phone,
            Self::Address,
            Self::PostalCode,
            Self::City,
        ]
    }

    pub const fn reason(self) -> &'static str {
        match self {
            Self::FirstName => "Prénom manquant",
            Self::LastName => "Nom manquant",
            Self::Email => "Email manquant",
            Self::Phone => "Téléphone manquant",
            Self::Address => "Adresse manquante",
            Self::PostalCode => "Code postal manquant",
            Self::City => "Ville manquante",
        }
    }
}

/// Presence of each checked field on an assembled contact.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FieldPresence {
    pub first_name: bool,
    pub last_name: bool,
    pub email: bool,
    pub mobile: bool,
    pub landline: bool,
    pub secondary_landline: bool,
    pub address: bool,
    pub postal_code: bool,
    pub city: bool,
}

impl FieldPresence {
    fn has(&self, field: MissingField) -> bool {
        match field {
            MissingField::FirstName => self.first_name,
            MissingField::LastName => self.last_name,
            MissingField::Email => self.email,
            MissingField::Phone => self.mobile || self.landline || self.secondary_landline,
            MissingField::Address => self.address,
            MissingField::PostalCode => self.postal_code,
            MissingField::City => self.city,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QualityReport {
    missing: Vec<MissingField>,
}

impl QualityReport {
    pub fn assess(presence: &FieldPresence) -> Self {
        let missing = MissingField::ordered()
            .into_iter()
            .filter(|field| !presence.has(*field))
            .collect();
        Self { missing }
    }

    pub fn missing(&self) -> &[MissingField] {
        &self.missing
    }

    pub fn reasons(&self) -> Vec<&'static str> {
        self.missing.iter().map(|field| field.reason()).collect()
    }

    pub fn needs_review(&self) -> bool {
        !self.missing.is_empty()
    }

    /// `Raison_Verif` cell.
    pub fn reasons_cell(&self) -> String {
        self.reasons().join(REASON_SEPARATOR)
    }

    /// `Flag_Qualité` cell.
    pub fn flag_cell(&self) -> &'static str {
        if self.needs_review() {
            REVIEW_FLAG_LABEL
        } else {
            ""
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn complete() -> FieldPresence {
        FieldPresence {
            first_name: true,
            last_name: true,
            email: true,
            mobile: true,
            landline: true,
            secondary_landline: true,
            address: true,
            postal_code: true,
            city: true,
        }
    }

    #[test]
    fn complete_contact_needs_no_review() {
        let report = QualityReport::assess(&complete());
        assert!(!report.needs_review());
        assert_eq!(report.reasons_cell(), "");
        assert_eq!(report.flag_cell(), "");
    }

    #[test]
    fn missing_email_and_postal_code_in_fixed_order() {
        let presence = FieldPresence {
            email: false,
            postal_code: false,
            ..complete()
        };
        let report = QualityReport::assess(&presence);
        assert_eq!(report.reasons(), vec!["Email manquant", "Code postal manquant"]);
        assert!(report.needs_review());
        assert_eq!(report.reasons_cell(), "Email manquant; Code postal manquant");
        assert_eq!(report.flag_cell(), "À vérifier");
    }

    #[test]
    fn phone_is_missing_only_when_all_three_are_absent() {
        let one_landline = FieldPresence {
            mobile: false,
            secondary_landline: false,
            ..complete()
        };
        assert!(!QualityReport::assess(&one_landline).needs_review());

        let no_phone = FieldPresence {
            landline: false,
            ..one_landline
        };
        assert_eq!(
            QualityReport::assess(&no_phone).missing(),
            &[MissingField::Phone]
        );
    }

    #[test]
    fn empty_contact_lists_every_reason() {
        let report = QualityReport::assess(&FieldPresence::default());
        assert_eq!(
            report.reasons_cell(),
            "Prénom manquant; Nom manquant; Email manquant; Téléphone manquant; \
Adresse manquante; Code postal manquant; Ville manquante"
        );
    }
}
