use crate::concept::ConceptManager;
use crate::error::{LreError, LreResult};
use crate::matcher::{Matcher, Visiting};
use crate::result::ResultSet;
use crate::text::TokenizedText;

/// `%name` — a reference to another concept, resolved lazily against
/// whatever `ConceptManager` the enclosing `Concept` is matched with
/// rather than at construction time. This is what lets two `.cpt` files
/// reference each other regardless of load order.
#[derive(Debug, Clone)]
pub struct ConceptArg {
    name: String,
}

impl ConceptArg {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl Matcher for ConceptArg {
    fn find_matches(
        &self,
        text: &TokenizedText,
        concepts: &ConceptManager,
        visiting: &mut Visiting,
    ) -> LreResult<ResultSet> {
        if !visiting.insert(self.name.clone()) {
            return Err(LreError::Semantic(format!("cyclic concept reference through '{}'", self.name)));
        }
        let concept = concepts.get(&self.name).ok_or_else(|| LreError::Resolve { name: self.name.clone() })?;
        let result = concept.match_text(text, concepts, visiting);
        visiting.remove(&self.name);
        result
    }
}
