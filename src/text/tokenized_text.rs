use super::index::Index;
use super::tokenizer::Tokenizer;
use crate::config::Config;
use crate::error::LreResult;
use std::collections::HashMap;

/// A single indexed word.
#[derive(Debug, Clone)]
pub struct Token {
    pub text: String,
    pub index: Index,
}

/// Tokenized text plus the inverted index (word text -> positions) the
/// matching engine scans leaf keyword lookups against.
#[derive(Debug, Clone)]
pub struct TokenizedText {
    word_list: Vec<Token>,
    word_map: HashMap<String, Vec<usize>>,
}

/// Sentinel higher than every real index (mirrors the reference's
/// `Index(9999, 9999, 9999, 0)`), used as `beg_index()` for an empty
/// document so a `beg < x` comparison never spuriously succeeds.
pub const HIGH_SENTINEL: Index = Index { i_para: usize::MAX, i_sent: usize::MAX, i_word: usize::MAX, offset: usize::MAX };
/// Sentinel lower than every real index (mirrors the reference's
/// `Index(-1, -1, -1, 0)`), used as `end_index()` for an empty document.
pub const LOW_SENTINEL: Index = Index { i_para: 0, i_sent: 0, i_word: 0, offset: 0 };

impl TokenizedText {
    /// Tokenizes `text` with `tokenizer`, building the flat word list and
    /// inverted index in one pass.
    pub fn build(text: &str, config: &Config, tokenizer: &dyn Tokenizer) -> LreResult<Self> {
        let text = config.truncate_text(text);

        let mut word_list = Vec::new();
        let mut word_map: HashMap<String, Vec<usize>> = HashMap::new();
        let mut offset = 0usize;

        for (i_para, sentences) in tokenizer.tokenize(&text, config).into_iter().enumerate() {
            for (i_sent, words) in sentences.into_iter().enumerate() {
                for (i_word, word) in words.into_iter().enumerate() {
                    let index = Index::new(i_para, i_sent, i_word, offset);
                    let pos = word_list.len();
                    word_map.entry(word.clone()).or_default().push(pos);
                    word_list.push(Token { text: word, index });
                    offset += 1;
                }
            }
        }

        Ok(Self { word_list, word_map })
    }

    pub fn len(&self) -> usize {
        self.word_list.len()
    }

    pub fn is_empty(&self) -> bool {
        self.word_list.is_empty()
    }

    pub fn tokens(&self) -> &[Token] {
        &self.word_list
    }

    pub fn token_at(&self, pos: usize) -> Option<&Token> {
        self.word_list.get(pos)
    }

    /// All positions in `word_list` where `word` occurs, in ascending order.
    pub fn lookup(&self, word: &str) -> &[usize] {
        self.word_map.get(word).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn beg_index(&self) -> Index {
        self.word_list.first().map(|t| t.index).unwrap_or(HIGH_SENTINEL)
    }

    pub fn end_index(&self) -> Index {
        self.word_list.last().map(|t| t.index).unwrap_or(LOW_SENTINEL)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::text::tokenizer::ZhTokenizer;

    #[test]
    fn inverted_index_is_sound() {
        let cfg = Config::default();
        let text = TokenizedText::build("你好你好", &cfg, &ZhTokenizer).unwrap();
        let positions = text.lookup("你");
        assert_eq!(positions, &[0, 2]);
        for &p in positions {
            assert_eq!(text.token_at(p).unwrap().text, "你");
        }
    }

    #[test]
    fn offsets_are_monotonic() {
        let cfg = Config::default();
        let text = TokenizedText::build("你好。世界！", &cfg, &ZhTokenizer).unwrap();
        let offsets: Vec<usize> = text.tokens().iter().map(|t| t.index.offset).collect();
        let mut sorted = offsets.clone();
        sorted.sort_unstable();
        assert_eq!(offsets, sorted);
        assert!(offsets.windows(2).all(|w| w[1] == w[0] + 1));
    }

    #[test]
    fn truncates_rather_than_rejecting_long_input() {
        let cfg = Config::builder().max_text_length(2).build();
        let text = TokenizedText::build("你好世界", &cfg, &ZhTokenizer).unwrap();
        assert_eq!(text.len(), 2);
        assert_eq!(text.tokens()[0].text, "你");
        assert_eq!(text.tokens()[1].text, "好");
    }
}
