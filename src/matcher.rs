use crate::concept::ConceptManager;
use crate::error::LreResult;
use crate::result::ResultSet;
use crate::text::TokenizedText;
use std::collections::HashSet;

/// Tracks which concept names are currently being resolved, so that a
/// `ConceptArg` cycle (`%a` referencing `%b` referencing `%a`) is reported
/// as a semantic error instead of recursing forever.
pub type Visiting = HashSet<String>;

/// Anything that can be matched against tokenized text and produce a
/// deduplicated [`ResultSet`]: keyword/concept leaves, the five rule
/// combinators, and `!filt(...)` (but not `!cfilt(...)`, which is a
/// post-filter rather than a producer).
pub trait Matcher {
    fn find_matches(
        &self,
        text: &TokenizedText,
        concepts: &ConceptManager,
        visiting: &mut Visiting,
    ) -> LreResult<ResultSet>;
}
