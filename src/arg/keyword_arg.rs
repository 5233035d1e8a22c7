use crate::concept::ConceptManager;
use crate::error::LreResult;
use crate::matcher::{Matcher, Visiting};
use crate::range::DEFAULT_SEQ_RANGE;
use crate::result::{Match, ResultSet};
use crate::text::TokenizedText;

/// A literal keyword phrase, e.g. `"打电话"`. Single-token keywords scan
/// the inverted index directly; multi-token keywords (tokenized through
/// the same word splitter used to build the document) become an implicit
/// contiguous sequence with the default range [`DEFAULT_SEQ_RANGE`],
/// mirroring how the reference implementation's `KeywordArg` wraps
/// multi-word phrases in a `Seq` under the hood.
#[derive(Debug, Clone)]
pub struct KeywordArg {
    words: Vec<String>,
}

impl KeywordArg {
    pub fn new(phrase: &str, words: Vec<String>) -> Self {
        let _ = phrase;
        Self { words }
    }

    pub fn words(&self) -> &[String] {
        &self.words
    }
}

impl Matcher for KeywordArg {
    fn find_matches(
        &self,
        text: &TokenizedText,
        _concepts: &ConceptManager,
        _visiting: &mut Visiting,
    ) -> LreResult<ResultSet> {
        if self.words.is_empty() {
            return Ok(ResultSet::new());
        }
        if self.words.len() == 1 {
            return Ok(single_word_matches(text, &self.words[0]));
        }

        let per_word: Vec<ResultSet> = self.words.iter().map(|w| single_word_matches(text, w)).collect();
        let combined = crate::combine::seq_combine(&per_word);
        Ok(DEFAULT_SEQ_RANGE.filter(combined))
    }
}

fn single_word_matches(text: &TokenizedText, word: &str) -> ResultSet {
    ResultSet::from_iter(text.lookup(word).iter().map(|&pos| {
        let idx = text.token_at(pos).expect("lookup position is always in-bounds").index;
        Match::new(idx, idx)
    }))
}
