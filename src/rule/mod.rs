use crate::combine::{bag_combine, ord_combine, seq_combine};
use crate::concept::ConceptManager;
use crate::error::LreResult;
use crate::matcher::{Matcher, Visiting};
use crate::range::RuleRange;
use crate::result::ResultSet;
use crate::text::TokenizedText;

/// The five rule combinators. Each wraps one (`Arg`) or several children
/// behind a [`RuleRange`] that is applied as the last step after the
/// combinator's own join logic.
pub enum Rule {
    /// Passes a single leaf (`KeywordArg`/`ConceptArg`) straight through;
    /// unlike `Seq`/`Ord`/`Bag` there is no range argument to apply.
    Arg { child: Box<dyn Matcher> },
    /// Union of all children's results; also has no range argument.
    Or { children: Vec<Box<dyn Matcher>> },
    /// Contiguous join: children must match back-to-back with no gap.
    Seq { range: RuleRange, children: Vec<Box<dyn Matcher>> },
    /// Ordered, non-contiguous join: children must match in order, gaps
    /// allowed.
    Ord { range: RuleRange, children: Vec<Box<dyn Matcher>> },
    /// Unordered join: children must all match somewhere with no two
    /// chosen matches overlapping.
    Bag { range: RuleRange, children: Vec<Box<dyn Matcher>> },
}

impl Matcher for Rule {
    fn find_matches(
        &self,
        text: &TokenizedText,
        concepts: &ConceptManager,
        visiting: &mut Visiting,
    ) -> LreResult<ResultSet> {
        match self {
            Rule::Arg { child } => child.find_matches(text, concepts, visiting),
            Rule::Or { children } => {
                let mut union = ResultSet::new();
                for child in children {
                    union.extend(child.find_matches(text, concepts, visiting)?);
                }
                Ok(union)
            }
            Rule::Seq { range, children } => {
                let sets = collect_children(text, concepts, visiting, children)?;
                Ok(range.filter(seq_combine(&sets)))
            }
            Rule::Ord { range, children } => {
                let sets = collect_children(text, concepts, visiting, children)?;
                Ok(range.filter(ord_combine(&sets)))
            }
            Rule::Bag { range, children } => {
                let sets = collect_children(text, concepts, visiting, children)?;
                Ok(range.filter(bag_combine(&sets)))
            }
        }
    }
}

fn collect_children(
    text: &TokenizedText,
    concepts: &ConceptManager,
    visiting: &mut Visiting,
    children: &[Box<dyn Matcher>],
) -> LreResult<Vec<ResultSet>> {
    children.iter().map(|c| c.find_matches(text, concepts, visiting)).collect()
}
