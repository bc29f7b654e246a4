//! Field-level normalizers. Every function is total: absent input stays absent
//! and malformed content is stripped rather than rejected.

const POSTAL_CODE_LEN: usize = 5;
const COMPANY_PREFIX: &str = "Pharmacie";
const FRENCH_DIALING_PREFIX: &str = "+33";

/// Upper-cases the first letter, lower-cases the rest (`dUPONT` -> `Dupont`).
pub fn capitalize(value: &str) -> String {
    let mut chars = value.chars();
    match chars.next() {
        Some(first) => {
            let mut output: String = first.to_uppercase().collect();
            output.push_str(&chars.as_str().to_lowercase());
            output
        }
        None => String::new(),
    }
}

/// Upper-cases the first letter of every alphabetic run and lower-cases the rest,
/// so `l'OFFICINE du port` becomes `L'Officine Du Port`.
pub fn title_case(value: &str) -> String {
    let mut output = String::with_capacity(value.len());
    let mut previous_alphabetic = false;
    for ch in value.chars() {
        if ch.is_alphabetic() {
            if previous_alphabetic {
                output.extend(ch.to_lowercase());
            } else {
                output.extend(ch.to_uppercase());
            }
            previous_alphabetic = true;
        } else {
            output.push(ch);
            previous_alphabetic = false;
        }
    }
    output
}

pub(crate) fn collapse_whitespace(value: &str) -> String {
    value.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn non_empty(value: String) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value)
    }
}

fn digits_only(value: &str) -> String {
    value.chars().filter(char::is_ascii_digit).collect()
}

/// Generic free-text cleanup: trim, collapse inner whitespace, title-case.
pub fn clean_text(value: Option<&str>) -> Option<String> {
    let collapsed = collapse_whitespace(value?);
    non_empty(title_case(&collapsed))
}

pub fn clean_city(value: Option<&str>) -> Option<String> {
    clean_text(value)
}

/// Keeps a leading street number verbatim (with the spaces after it) and
/// title-cases the remainder.
pub fn clean_address(value: Option<&str>) -> Option<String> {
    let collapsed = collapse_whitespace(value?);
    let number_end = collapsed
        .find(|ch: char| !ch.is_ascii_digit())
        .unwrap_or(collapsed.len());
    if number_end == 0 {
        return non_empty(title_case(&collapsed));
    }

    let rest = &collapsed[number_end..];
    let street_start = number_end + (rest.len() - rest.trim_start().len());
    let (number, street) = collapsed.split_at(street_start);
    non_empty(format!("{number}{}", title_case(street)))
}

/// Digits only, left-padded with zeros to five digits, truncated when longer.
pub fn clean_postal_code(value: Option<&str>) -> Option<String> {
    let digits = digits_only(value?);
    if digits.is_empty() {
        return None;
    }
    if digits.len() > POSTAL_CODE_LEN {
        return Some(digits[..POSTAL_CODE_LEN].to_string());
    }
    Some(format!("{digits:0>width$}", width = POSTAL_CODE_LEN))
}

/// Drops every `pharmacie` word from the raw name and re-prefixes the canonical label.
/// Punctuation stuck to the word (`PHARMACIE,`) goes with it.
pub fn clean_company(value: Option<&str>) -> Option<String> {
    let value = value?;
    let remainder = value
        .split_whitespace()
        .filter(|word| {
            word.trim_matches(|ch: char| !ch.is_alphanumeric())
                .to_lowercase()
                != "pharmacie"
        })
        .collect::<Vec<_>>()
        .join(" ");

    if remainder.is_empty() {
        Some(COMPANY_PREFIX.to_string())
    } else {
        Some(format!("{COMPANY_PREFIX} {}", title_case(&remainder)))
    }
}

/// Strips formatting and rewrites French national numbers to `+33`. Other
/// digit sequences are returned as bare digits.
pub fn format_phone(value: Option<&str>) -> Option<String> {
    let digits = digits_only(value?);
    if let Some(national) = digits.strip_prefix('0') {
        return Some(format!("{FRENCH_DIALING_PREFIX}{national}"));
    }
    if digits.starts_with("33") {
        return Some(format!("+{digits}"));
    }
    non_empty(digits)
}

/// Returns the first candidate containing `@`, trimmed and lower-cased.
pub fn best_email<'a, I>(candidates: I) -> Option<String>
where
    I: IntoIterator<Item = Option<&'a str>>,
{
    candidates
        .into_iter()
        .flatten()
        .find(|candidate| candidate.contains('@'))
        .map(|email| email.trim().to_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clean_text_collapses_whitespace_and_title_cases() {
        assert_eq!(
            clean_text(Some("  PHARMACIE   du   centre ")),
            Some("Pharmacie Du Centre".to_string())
        );
        assert_eq!(
            clean_text(Some("www.pharma-LYON.fr")),
            Some("Www.Pharma-Lyon.Fr".to_string())
        );
        assert_eq!(clean_text(Some("   ")), None);
        assert_eq!(clean_text(None), None);
    }

    #[test]
    fn title_case_restarts_after_apostrophes_and_digits() {
        assert_eq!(title_case("l'OFFICINE"), "L'Officine");
        assert_eq!(title_case("3eme étage"), "3Eme Étage");
    }

    #[test]
    fn capitalize_only_touches_the_first_letter() {
        assert_eq!(capitalize("jean-PIERRE"), "Jean-pierre");
        assert_eq!(capitalize("éLODIE"), "Élodie");
        assert_eq!(capitalize(""), "");
    }

    #[test]
    fn clean_address_keeps_street_number() {
        assert_eq!(
            clean_address(Some("12   RUE de la  paix")),
            Some("12 Rue De La Paix".to_string())
        );
        assert_eq!(
            clean_address(Some("12bis avenue FOCH")),
            Some("12Bis Avenue Foch".to_string())
        );
        assert_eq!(
            clean_address(Some("place du MARCHE")),
            Some("Place Du Marche".to_string())
        );
        assert_eq!(clean_address(Some("42")), Some("42".to_string()));
        assert_eq!(clean_address(None), None);
    }

    #[test]
    fn postal_codes_are_padded_or_truncated() {
        assert_eq!(clean_postal_code(Some("75 001")), Some("75001".to_string()));
        assert_eq!(clean_postal_code(Some("123")), Some("00123".to_string()));
        assert_eq!(clean_postal_code(Some("1234567")), Some("12345".to_string()));
        assert_eq!(clean_postal_code(Some("F-69002")), Some("69002".to_string()));
        assert_eq!(clean_postal_code(Some("n/a")), None);
        assert_eq!(clean_postal_code(None), None);
    }

    #[test]
    fn company_names_get_a_single_prefix() {
        assert_eq!(
            clean_company(Some("PHARMACIE DU CENTRE")),
            Some("Pharmacie Du Centre".to_string())
        );
        assert_eq!(
            clean_company(Some("Grande Pharmacie de la gare")),
            Some("Pharmacie Grande De La Gare".to_string())
        );
        assert_eq!(
            clean_company(Some("Pharmacie Du Centre")),
            Some("Pharmacie Du Centre".to_string())
        );
        assert_eq!(clean_company(Some("PHARMACIE")), Some("Pharmacie".to_string()));
        assert_eq!(
            clean_company(Some("PHARMACIE, DU PORT")),
            Some("Pharmacie Du Port".to_string())
        );
        assert_eq!(
            clean_company(Some("Grande pharmacie (SELARL)")),
            Some("Pharmacie Grande (Selarl)".to_string())
        );
        assert_eq!(
            clean_company(Some("Parapharmacie du Lac")),
            Some("Pharmacie Parapharmacie Du Lac".to_string())
        );
        assert_eq!(clean_company(None), None);
    }

    #[test]
    fn phones_are_rewritten_to_international_format() {
        assert_eq!(
            format_phone(Some("0612345678")),
            Some("+33612345678".to_string())
        );
        assert_eq!(
            format_phone(Some("06 12 34 56 78")),
            Some("+33612345678".to_string())
        );
        assert_eq!(
            format_phone(Some("33612345678")),
            Some("+33612345678".to_string())
        );
        assert_eq!(
            format_phone(Some("+33 6 12 34 56 78")),
            Some("+33612345678".to_string())
        );
        assert_eq!(
            format_phone(Some("+1-202-555-0100")),
            Some("12025550100".to_string())
        );
        assert_eq!(format_phone(Some("inconnu")), None);
        assert_eq!(format_phone(None), None);
    }

    #[test]
    fn best_email_skips_values_without_at_sign() {
        assert_eq!(
            best_email([None, Some("  Contact@Pharma.FR ")]),
            Some("contact@pharma.fr".to_string())
        );
        assert_eq!(
            best_email([Some("non renseigné"), Some("b@x.fr")]),
            Some("b@x.fr".to_string())
        );
        assert_eq!(
            best_email([Some("a@x.fr"), Some("b@x.fr")]),
            Some("a@x.fr".to_string())
        );
        assert_eq!(best_email([None, Some("pas d'email")]), None);
    }
}
