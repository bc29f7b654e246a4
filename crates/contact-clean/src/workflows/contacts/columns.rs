/// Columns of the source export the pipeline reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SourceColumn {
    CompanyName,
    Country,
    Website,
    Address,
    PostalCode,
    City,
    Interlocutor,
    Mobile,
    Landline,
    SecondaryLandline,
    ClientEmail,
    GroupEmail,
}

impl SourceColumn {
    pub const fn ordered() -> [Self; 12] {
        [
            Self::CompanyName,
            Self::Country,
            Self::Website,
            Self::Address,
            Self::PostalCode,
            Self::City,
            Self::Interlocutor,
            Self::Mobile,
            Self::Landline,
            Self::SecondaryLandline,
            Self::ClientEmail,
            Self::GroupEmail,
        ]
    }

    pub const fn header(self) -> &'static str {
        match self {
            Self::CompanyName => "Raison sociale",
            Self::Country => "Pays",
            Self::Website => "Site internet",
            Self::Address => "Adresse",
            Self::PostalCode => "Code postal",
            Self::City => "Ville",
            Self::Interlocutor => "Interlocuteur",
            Self::Mobile => "Portable",
            Self::Landline => "Téléphone",
            Self::SecondaryLandline => "Téléphone.1",
            Self::ClientEmail => "Email client",
            Self::GroupEmail => "Mail PMGroup",
        }
    }
}

/// Email columns in order of preference.
pub const EMAIL_COLUMNS: [SourceColumn; 2] = [SourceColumn::ClientEmail, SourceColumn::GroupEmail];

/// Columns appended to the export, in output order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DerivedColumn {
    Civility,
    FirstName,
    LastName,
    Gender,
    Company,
    Mobile,
    Landline,
    SecondaryLandline,
    Email,
    Contact,
    Reasons,
    QualityFlag,
}

impl DerivedColumn {
    pub const fn ordered() -> [Self; 12] {
        [
            Self::Civility,
            Self::FirstName,
            Self::LastName,
            Self::Gender,
            Self::Company,
            Self::Mobile,
            Self::Landline,
            Self::SecondaryLandline,
            Self::Email,
            Self::Contact,
            Self::Reasons,
            Self::QualityFlag,
        ]
    }

    pub const fn header(self) -> &'static str {
        match self {
            Self::Civility => "Civilité",
            Self::FirstName => "Prénom",
            Self::LastName => "Nom",
            Self::Gender => "Genre",
            Self::Company => "Entreprise formatée",
            Self::Mobile => "Portable formaté",
            Self::Landline => "Téléphone formaté",
            Self::SecondaryLandline => "Téléphone.1 formaté",
            Self::Email => "Email principal",
            Self::Contact => "Contact complet",
            Self::Reasons => "Raison_Verif",
            Self::QualityFlag => "Flag_Qualité",
        }
    }

    pub fn is_derived_header(header: &str) -> bool {
        Self::ordered().iter().any(|column| column.header() == header)
    }
}
