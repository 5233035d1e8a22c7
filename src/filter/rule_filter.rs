use crate::concept::ConceptManager;
use crate::error::LreResult;
use crate::matcher::{Matcher, Visiting};
use crate::range::FilterRange;
use crate::result::ResultSet;
use crate::text::TokenizedText;

/// `!filt(target, range1,filt1, range2,filt2, ...)` — a producer like any
/// rule, but one that rejects members of `target`'s result set that fall
/// within a paired filter matcher's reject neighborhood.
pub struct RuleFilter {
    target: Box<dyn Matcher>,
    pairs: Vec<(FilterRange, Box<dyn Matcher>)>,
}

impl RuleFilter {
    pub fn new(target: Box<dyn Matcher>, pairs: Vec<(FilterRange, Box<dyn Matcher>)>) -> Self {
        Self { target, pairs }
    }
}

impl Matcher for RuleFilter {
    fn find_matches(
        &self,
        text: &TokenizedText,
        concepts: &ConceptManager,
        visiting: &mut Visiting,
    ) -> LreResult<ResultSet> {
        let target = self.target.find_matches(text, concepts, visiting)?;
        if self.pairs.is_empty() {
            return Ok(target);
        }

        let mut candidate_sets = Vec::with_capacity(self.pairs.len());
        for (range, matcher) in &self.pairs {
            candidate_sets.push((*range, matcher.find_matches(text, concepts, visiting)?));
        }

        Ok(ResultSet::from_iter(target.into_iter().filter(|m| {
            !candidate_sets.iter().any(|(range, candidates)| candidates.iter().any(|c| range.matches(m, c)))
        })))
    }
}
