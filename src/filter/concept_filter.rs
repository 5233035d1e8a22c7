use crate::concept::ConceptManager;
use crate::error::LreResult;
use crate::matcher::{Matcher, Visiting};
use crate::range::FilterRange;
use crate::result::ResultSet;
use crate::text::TokenizedText;

/// `!cfilt(range, matcher)` — applied after a `Concept`'s aggregate
/// `ResultSet` is fully assembled (producers unioned, bias applied), not
/// mixed in with the producer list. This is the corrected reading of the
/// reference implementation, which (incorrectly) placed `ConceptFilter` in
/// the same list as producers despite it having no `match` of its own.
pub struct ConceptFilter {
    range: FilterRange,
    matcher: Box<dyn Matcher>,
}

impl ConceptFilter {
    pub fn new(range: FilterRange, matcher: Box<dyn Matcher>) -> Self {
        Self { range, matcher }
    }

    pub fn apply(
        &self,
        aggregate: ResultSet,
        text: &TokenizedText,
        concepts: &ConceptManager,
        visiting: &mut Visiting,
    ) -> LreResult<ResultSet> {
        let candidates = self.matcher.find_matches(text, concepts, visiting)?;
        Ok(ResultSet::from_iter(
            aggregate.into_iter().filter(|m| !candidates.iter().any(|c| self.range.matches(m, c))),
        ))
    }
}
