use crate::error::LreResult;
use crate::filter::ConceptFilter;
use crate::matcher::{Matcher, Visiting};
use crate::result::{Match, ResultSet};
use crate::text::TokenizedText;
use std::collections::HashMap;

/// A named concept: the union of its producer rules, optionally bias-
/// corrected to width 1, then narrowed by its `!cfilt(...)` post-filters
/// in declaration order.
pub struct Concept {
    name: String,
    producers: Vec<Box<dyn Matcher>>,
    filters: Vec<ConceptFilter>,
    force_size_one: bool,
}

impl Concept {
    pub fn new(
        name: impl Into<String>,
        producers: Vec<Box<dyn Matcher>>,
        filters: Vec<ConceptFilter>,
        force_size_one: bool,
    ) -> Self {
        Self { name: name.into(), producers, filters, force_size_one }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn match_text(
        &self,
        text: &TokenizedText,
        concepts: &ConceptManager,
        visiting: &mut Visiting,
    ) -> LreResult<ResultSet> {
        let mut aggregate = ResultSet::new();
        for producer in &self.producers {
            aggregate.extend(producer.find_matches(text, concepts, visiting)?);
        }

        if self.force_size_one {
            aggregate = ResultSet::from_iter(aggregate.into_iter().map(apply_size_one_bias));
        }

        for filter in &self.filters {
            aggregate = filter.apply(aggregate, text, concepts, visiting)?;
        }

        Ok(aggregate)
    }
}

/// Rewrites a `Match`'s bias so its measured word width collapses to 1.
///
/// Same paragraph/sentence: `bias = end.i_word - beg.i_word`.
/// Cross paragraph/sentence: `bias = end.offset - 1`. The reference
/// implementation uses `end.i_word - 1` here, but that formula only
/// clamps length to 1 when `beg.i_word == 0`; the offset-based version
/// is the one that holds generally, so it's what this crate keeps.
fn apply_size_one_bias(m: Match) -> Match {
    let same_scope = m.beg_index.i_para == m.end_index.i_para && m.beg_index.i_sent == m.end_index.i_sent;
    let bias = if same_scope {
        m.end_index.i_word as i64 - m.beg_index.i_word as i64
    } else {
        m.end_index.offset as i64 - 1
    };
    Match::with_bias(m.beg_index, m.end_index, bias)
}

/// Name -> `Concept` registry. Immutable once [`Model::train`] hands it to
/// callers; the only mutation point is [`ConceptManager::add`] during
/// loading.
#[derive(Default)]
pub struct ConceptManager {
    concepts: HashMap<String, Concept>,
}

impl ConceptManager {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, concept: Concept) {
        self.concepts.insert(concept.name.clone(), concept);
    }

    pub fn get(&self, name: &str) -> Option<&Concept> {
        self.concepts.get(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.concepts.keys().map(String::as_str)
    }

    /// Matches every concept, optionally restricted to the ones for which
    /// `name_filter` returns `true`. Empty result sets are dropped.
    pub fn match_all(
        &self,
        text: &TokenizedText,
        name_filter: Option<&dyn Fn(&str) -> bool>,
    ) -> LreResult<HashMap<String, ResultSet>> {
        let mut out = HashMap::new();
        for (name, concept) in &self.concepts {
            if let Some(filter) = name_filter {
                if !filter(name) {
                    continue;
                }
            }
            let mut visiting = Visiting::new();
            let results = concept.match_text(text, self, &mut visiting)?;
            if !results.is_empty() {
                out.insert(name.clone(), results);
            }
        }
        Ok(out)
    }
}
