mod concept_arg;
mod keyword_arg;

pub use concept_arg::ConceptArg;
pub use keyword_arg::KeywordArg;
