/// Honorific found in the interlocutor field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Civility {
    Mme,
    M,
    Dr,
}

impl Civility {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Mme => "Mme",
            Self::M => "M",
            Self::Dr => "Dr",
        }
    }

    /// Gender implied by the civility. A doctor's title says nothing about it.
    pub const fn gender(self) -> Option<Gender> {
        match self {
            Self::Mme => Some(Gender::Femme),
            Self::M => Some(Gender::Homme),
            Self::Dr => None,
        }
    }

    /// Loose detection over the whole upper-cased string, checked in the order
    /// `MME`, `M `/`M.`, `DR`. Names that merely contain those letters (`ADAM DUPONT`,
    /// `ANDRE`) are picked up too.
    pub fn detect(interlocutor: Option<&str>) -> Option<Self> {
        let upper = interlocutor?.to_uppercase();
        if upper.contains("MME") {
            Some(Self::Mme)
        } else if upper.contains("M ") || upper.starts_with("M.") {
            Some(Self::M)
        } else if upper.contains("DR") {
            Some(Self::Dr)
        } else {
            None
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Gender {
    Femme,
    Homme,
}

impl Gender {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Femme => "Femme",
            Self::Homme => "Homme",
        }
    }
}

const LEADING_CIVILITIES: [&str; 4] = ["m.", "mme", "m", "dr"];

/// Removes civility tokens (`M`, `M.`, `Mme`, `Dr`, any case) from the head of the
/// trimmed string when whitespace follows them. Repeats until none remains at the
/// head, so applying it twice gives the same result as applying it once.
pub fn strip_leading_civility(interlocutor: &str) -> &str {
    let mut remaining = interlocutor.trim();
    while let Some(rest) = strip_one(remaining) {
        remaining = rest;
    }
    remaining
}

fn strip_one(value: &str) -> Option<&str> {
    let (head, rest) = value.split_once(char::is_whitespace)?;
    let head = head.to_lowercase();
    if LEADING_CIVILITIES.contains(&head.as_str()) {
        Some(rest.trim_start())
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detects_civility_labels_in_priority_order() {
        assert_eq!(Civility::detect(Some("Mme Marie Durand")), Some(Civility::Mme));
        assert_eq!(Civility::detect(Some("M. Jean Durand")), Some(Civility::M));
        assert_eq!(Civility::detect(Some("m Jean Durand")), Some(Civility::M));
        assert_eq!(Civility::detect(Some("Dr Paul Martin")), Some(Civility::Dr));
        assert_eq!(Civility::detect(Some("Paul Martin")), None);
        assert_eq!(Civility::detect(None), None);
    }

    #[test]
    fn substring_detection_accepts_false_positives() {
        assert_eq!(Civility::detect(Some("Adam Dupont")), Some(Civility::M));
        assert_eq!(Civility::detect(Some("Andre Petit")), Some(Civility::Dr));
        assert_eq!(Civility::detect(Some("Dr Emme Lou")), Some(Civility::Mme));
    }

    #[test]
    fn gender_follows_civility() {
        assert_eq!(Civility::Mme.gender(), Some(Gender::Femme));
        assert_eq!(Civility::M.gender(), Some(Gender::Homme));
        assert_eq!(Civility::Dr.gender(), None);
        assert_eq!(Gender::Femme.label(), "Femme");
    }

    #[test]
    fn strips_only_leading_civility() {
        assert_eq!(strip_leading_civility("  M. Jean Dupont"), "Jean Dupont");
        assert_eq!(strip_leading_civility("MME  Marie Durand"), "Marie Durand");
        assert_eq!(strip_leading_civility("dr Paul Martin"), "Paul Martin");
        assert_eq!(strip_leading_civility("Jean M Dupont"), "Jean M Dupont");
        assert_eq!(strip_leading_civility("Dr. Paul Martin"), "Dr. Paul Martin");
        assert_eq!(strip_leading_civility("Mme"), "Mme");
        assert_eq!(strip_leading_civility("M.Dupont"), "M.Dupont");
    }

    #[test]
    fn stripping_is_idempotent() {
        for input in [
            "M. Jean Dupont",
            "M M Jean Dupont",
            "Mme Dr Claire Moreau",
            "Dupont Jean",
            "Mme",
            "",
            "  dr   ",
        ] {
            let once = strip_leading_civility(input);
            assert_eq!(strip_leading_civility(once), once, "input {input:?}");
        }
    }
}
