mod filter_range;
mod rule_range;

pub use filter_range::FilterRange;
pub use rule_range::RuleRange;

use crate::error::{LreError, LreResult};

/// The five range units the DSL understands: character distance (`d`),
/// word distance (`w`), sentence distance (`s`), paragraph distance (`p`),
/// and token-count pass-through (`t`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RangeUnit {
    D,
    W,
    S,
    P,
    T,
}

impl RangeUnit {
    pub fn from_letter(c: char) -> LreResult<Self> {
        match c {
            'd' => Ok(Self::D),
            'w' => Ok(Self::W),
            's' => Ok(Self::S),
            'p' => Ok(Self::P),
            't' => Ok(Self::T),
            other => Err(LreError::Config(format!("unknown range unit '{other}'"))),
        }
    }
}

/// Default range constant used when a `KeywordArg` implicitly wraps
/// multiple tokens in a `Seq` (see `arg::keyword_arg`): within one sentence.
pub const DEFAULT_SEQ_RANGE: RuleRange = RuleRange { unit: RangeUnit::S, n: 1 };
