use thiserror::Error;

/// Unified error type for every fallible entry point in this crate.
///
/// Nothing downgrades one of these into an empty match or a swallowed
/// warning; callers always see the failure.
#[derive(Debug, Error)]
pub enum LreError {
    /// A `.cpt` source file could not be parsed.
    #[error("syntax error at offset {offset}: {context}")]
    Syntax { offset: usize, context: String },

    /// A rule/filter was structurally well-formed but violates an
    /// arity or type constraint (e.g. `!cfilt` with the wrong arg count).
    #[error("semantic error: {0}")]
    Semantic(String),

    /// A `%concept-name` reference could not be resolved against the
    /// `ConceptManager` it was matched with.
    #[error("could not resolve concept reference: {name}")]
    Resolve { name: String },

    /// A config value was out of the set the engine understands
    /// (unknown word level, language, or range unit).
    #[error("invalid configuration: {0}")]
    Config(String),

    /// A rule directory or file could not be read.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

pub type LreResult<T> = std::result::Result<T, LreError>;
