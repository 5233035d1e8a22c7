use super::RangeUnit;
use crate::result::{Match, ResultSet};

/// `@unit[n]` — a post-filter applied to a composite rule's `ResultSet`,
/// keeping only matches whose measured width (in the given unit) is at
/// most `n`. `t` is a full pass-through regardless of `n`.
#[derive(Debug, Clone, Copy)]
pub struct RuleRange {
    pub(crate) unit: RangeUnit,
    pub(crate) n: i64,
}

impl RuleRange {
    pub fn new(unit: RangeUnit, n: i64) -> Self {
        Self { unit, n }
    }

    pub fn filter(&self, results: ResultSet) -> ResultSet {
        if self.unit == RangeUnit::T {
            return results;
        }
        ResultSet::from_iter(results.into_iter().filter(|m| self.retains(m)))
    }

    /// `d`/`w` additionally require the match to stay within one
    /// paragraph-and-sentence (`d`) or one paragraph (`w`) before the
    /// width comparison is even considered; crossing that boundary
    /// rejects the result outright, regardless of `n`.
    fn retains(&self, m: &Match) -> bool {
        match self.unit {
            RangeUnit::D => m.spans_one_sentence() && m.measured_word_width() <= self.n,
            RangeUnit::W => m.spans_one_paragraph() && m.measured_offset_width() <= self.n,
            RangeUnit::S => {
                m.spans_one_paragraph()
                    && (m.end_index.i_sent as i64 - m.beg_index.i_sent as i64 + 1) <= self.n
            }
            RangeUnit::P => (m.end_index.i_para as i64 - m.beg_index.i_para as i64 + 1) <= self.n,
            RangeUnit::T => true,
        }
    }
}
