//! A lexical rule engine: compiles a small DSL of combinator rules
//! (`.cpt` files) into an in-memory matcher applied to tokenized text to
//! extract named "concepts".
//!
//! ```text
//!   .cpt source          tokenized text
//!       |                      |
//!       v                      v
//!  SyntaxParser           Tokenizer
//!       |                      |
//!       v                      v
//!     AST  ----lower_file---> Concept  <---- TokenizedText (inverted index)
//!       |                      |
//!       v                      v
//!  ConceptManager  <----  Model::train
//!       |
//!       v
//!  Model::match_text --> HashMap<concept_name, ResultSet>
//! ```
//!
//! A concept's producers (keyword/concept leaves composed through
//! `arg`/`or`/`seq`/`ord`/`bag`) are matched, unioned, optionally bias-
//! corrected to width 1, then narrowed by its `!cfilt(...)` post-filters.
//! `ConceptArg` leaves resolve by name against a shared [`ConceptManager`]
//! at match time rather than at construction time, so concepts may refer
//! to each other regardless of load order.

#[macro_use]
mod macros;

pub mod arg;
mod combine;
pub mod concept;
pub mod config;
pub mod error;
pub mod filter;
pub mod matcher;
mod model;
pub mod range;
pub mod result;
pub mod rule;
#[cfg(test)]
mod scenarios;
pub mod syntax;
pub mod text;

pub use concept::{Concept, ConceptManager};
pub use config::{Config, Language, WordLevel};
pub use error::{LreError, LreResult};
pub use matcher::Matcher;
pub use model::Model;
pub use range::{FilterRange, RangeUnit, RuleRange};
pub use result::{Match, ResultSet};
pub use text::{Index, Token, TokenizedText, Tokenizer, ZhTokenizer};
