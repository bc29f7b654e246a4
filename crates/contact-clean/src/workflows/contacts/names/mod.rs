//! First-name reference data and the interlocutor splitting cascade.

mod reference;
mod splitter;

pub use reference::ReferenceNameSet;
pub use splitter::{
    forward_match, inverted_match, positional_fallback, single_token, tokenize, NameSplitter,
    SplitMethod, SplitResult, SplitStrategy, SPLIT_CASCADE,
};
