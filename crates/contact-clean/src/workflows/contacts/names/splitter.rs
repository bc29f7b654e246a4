use super::reference::ReferenceNameSet;
use crate::workflows::contacts::civility::strip_leading_civility;
use crate::workflows::contacts::normalizer::capitalize;
use serde::Serialize;

/// Which step of the cascade produced a split.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SplitMethod {
    /// Leading tokens matched a known first name.
    Forward,
    /// Trailing tokens matched a known first name.
    Inverted,
    /// No dictionary hit; the last token is taken as the first name.
    Positional,
    SingleToken,
    Empty,
}

impl SplitMethod {
    pub const fn ordered() -> [Self; 5] {
        [
            Self::Forward,
            Self::Inverted,
            Self::Positional,
            Self::SingleToken,
            Self::Empty,
        ]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Forward => "forward",
            Self::Inverted => "inverted",
            Self::Positional => "positional",
            Self::SingleToken => "single_token",
            Self::Empty => "empty",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SplitResult {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub method: SplitMethod,
}

impl SplitResult {
    fn empty() -> Self {
        Self {
            first_name: None,
            last_name: None,
            method: SplitMethod::Empty,
        }
    }
}

/// One step of the cascade: a pure function over the capitalized tokens.
pub type SplitStrategy = fn(&[String], &ReferenceNameSet) -> Option<SplitResult>;

/// Strategies in decreasing order of confidence. A short dictionary hit beats a
/// longer one, forward order beats inverted order, and position is the last resort.
pub const SPLIT_CASCADE: [SplitStrategy; 4] = [
    forward_match,
    inverted_match,
    positional_fallback,
    single_token,
];

/// Splits interlocutor strings into first and last names against a fixed name set.
#[derive(Debug, Clone, Copy)]
pub struct NameSplitter<'a> {
    names: &'a ReferenceNameSet,
}

impl<'a> NameSplitter<'a> {
    pub fn new(names: &'a ReferenceNameSet) -> Self {
        Self { names }
    }

    pub fn names(&self) -> &'a ReferenceNameSet {
        self.names
    }

    pub fn split(&self, interlocutor: Option<&str>) -> SplitResult {
        let Some(interlocutor) = interlocutor else {
            return SplitResult::empty();
        };

        let tokens = tokenize(strip_leading_civility(interlocutor));
        if tokens.is_empty() {
            return SplitResult::empty();
        }

        SPLIT_CASCADE
            .iter()
            .find_map(|strategy| strategy(&tokens, self.names))
            .unwrap_or_else(SplitResult::empty)
    }
}

/// Whitespace tokens, each capitalized.
pub fn tokenize(value: &str) -> Vec<String> {
    value.split_whitespace().map(capitalize).collect()
}

pub fn forward_match(tokens: &[String], names: &ReferenceNameSet) -> Option<SplitResult> {
    (1..tokens.len()).find_map(|len| {
        let (head, tail) = tokens.split_at(len);
        let first_name = match_group(head, names)?;
        Some(SplitResult {
            first_name: Some(first_name),
            last_name: Some(tail.join(" ")),
            method: SplitMethod::Forward,
        })
    })
}

pub fn inverted_match(tokens: &[String], names: &ReferenceNameSet) -> Option<SplitResult> {
    (1..tokens.len()).find_map(|len| {
        let (head, tail) = tokens.split_at(tokens.len() - len);
        let first_name = match_group(tail, names)?;
        Some(SplitResult {
            first_name: Some(first_name),
            last_name: Some(head.join(" ")),
            method: SplitMethod::Inverted,
        })
    })
}

pub fn positional_fallback(tokens: &[String], _names: &ReferenceNameSet) -> Option<SplitResult> {
    let (last, rest) = tokens.split_last()?;
    if rest.is_empty() {
        return None;
    }
    Some(SplitResult {
        first_name: Some(last.clone()),
        last_name: Some(rest.join(" ")),
        method: SplitMethod::Positional,
    })
}

pub fn single_token(tokens: &[String], _names: &ReferenceNameSet) -> Option<SplitResult> {
    match tokens {
        [only] => Some(SplitResult {
            first_name: None,
            last_name: Some(only.clone()),
            method: SplitMethod::SingleToken,
        }),
        _ => None,
    }
}

/// Space-joined candidate first, then hyphen-joined.
fn match_group(group: &[String], names: &ReferenceNameSet) -> Option<String> {
    let spaced = group.join(" ");
    if let Some(known) = names.lookup(&spaced) {
        return Some(known.to_string());
    }
    let hyphenated = group.join("-");
    names.lookup(&hyphenated).map(str::to_string)
}
