mod concept_filter;
mod rule_filter;

pub use concept_filter::ConceptFilter;
pub use rule_filter::RuleFilter;
