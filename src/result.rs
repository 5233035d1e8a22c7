use crate::config::{Config, Language};
use crate::error::{LreError, LreResult};
use crate::text::{Index, TokenizedText};
use std::collections::HashSet;
use std::hash::{Hash, Hasher};

/// Unicode ranges covering Latin, Latin Extended (A/B/Additional), IPA,
/// phonetic extensions, and halfwidth/fullwidth Latin forms — the same
/// set used to decide word-joining whitespace in mixed CJK/Latin text.
fn is_latin_char(c: char) -> bool {
    let o = c as u32;
    matches!(o,
        0x0000..=0x007F | 0x0080..=0x00FF | 0x0100..=0x017F
            | 0x0180..=0x024F | 0x2C60..=0x2C7F | 0xA720..=0xA7FF
            | 0xAB30..=0xAB6F | 0x1E00..=0x1EFF | 0xFF00..=0xFFEF
            | 0xFB00..=0xFB4F | 0x0250..=0x02AF | 0x1D00..=0x1D7F
            | 0x1D80..=0x1DBF)
}

/// A single match: the span it covers plus a `bias` correction applied by
/// [`crate::concept::Concept::match_text`] when `force_concept_size_one` is
/// set (see that function for the exact rewrite).
///
/// Equality and hashing are defined over `(beg_index, end_index, bias)`
/// only — this is what [`ResultSet`] dedups on.
#[derive(Debug, Clone, Copy)]
pub struct Match {
    pub beg_index: Index,
    pub end_index: Index,
    pub bias: i64,
}

impl Match {
    pub fn new(beg_index: Index, end_index: Index) -> Self {
        Self { beg_index, end_index, bias: 0 }
    }

    pub fn with_bias(beg_index: Index, end_index: Index, bias: i64) -> Self {
        Self { beg_index, end_index, bias }
    }

    /// Within-sentence word width, corrected by `bias`. Used by
    /// [`crate::range::RuleRange`]'s `d` unit check.
    pub fn measured_word_width(&self) -> i64 {
        (self.end_index.i_word as i64 - self.beg_index.i_word as i64 + 1) - self.bias
    }

    /// Document-wide token width, corrected by `bias`. Used by
    /// [`crate::range::RuleRange`]'s `w` unit check.
    pub fn measured_offset_width(&self) -> i64 {
        (self.end_index.offset as i64 - self.beg_index.offset as i64 + 1) - self.bias
    }

    /// Whether this result's own span stays within one paragraph.
    pub fn spans_one_paragraph(&self) -> bool {
        self.beg_index.i_para == self.end_index.i_para
    }

    /// Whether this result's own span stays within one paragraph and
    /// sentence.
    pub fn spans_one_sentence(&self) -> bool {
        self.beg_index.i_para == self.end_index.i_para && self.beg_index.i_sent == self.end_index.i_sent
    }

    pub fn overlaps(&self, other: &Match) -> bool {
        self.beg_index.offset <= other.end_index.offset && other.beg_index.offset <= self.end_index.offset
    }

    /// Renders the covered span's surface text, joining tokens the way
    /// Chinese/Latin mixed text is conventionally displayed: a space is
    /// inserted between two adjacent tokens whenever the left token's last
    /// character or the right token's first character is Latin-script,
    /// none otherwise.
    pub fn text(&self, text: &TokenizedText, config: &Config) -> LreResult<String> {
        if config.language != Language::Zh {
            return Err(LreError::Config("unsupported language for surface rendering".into()));
        }
        let mut out = String::new();
        let mut prev_last_is_latin = false;
        for offset in self.beg_index.offset..=self.end_index.offset {
            let Some(tok) = text.token_at(offset) else { continue };
            let first_is_latin = tok.text.chars().next().map(is_latin_char).unwrap_or(false);
            if !out.is_empty() && (prev_last_is_latin || first_is_latin) {
                out.push(' ');
            }
            out.push_str(&tok.text);
            prev_last_is_latin = tok.text.chars().last().map(is_latin_char).unwrap_or(false);
        }
        Ok(out)
    }
}

impl PartialEq for Match {
    fn eq(&self, other: &Self) -> bool {
        self.beg_index == other.beg_index && self.end_index == other.end_index && self.bias == other.bias
    }
}
impl Eq for Match {}

impl Hash for Match {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.beg_index.hash(state);
        self.end_index.hash(state);
        self.bias.hash(state);
    }
}

/// A deduplicated collection of [`Match`]es, keyed on `(beg_index,
/// end_index, bias)`. Every rule combinator and filter produces or
/// consumes a `ResultSet`.
#[derive(Debug, Clone, Default)]
pub struct ResultSet {
    items: HashSet<Match>,
}

impl ResultSet {
    pub fn new() -> Self {
        Self { items: HashSet::new() }
    }

    pub fn from_iter<I: IntoIterator<Item = Match>>(iter: I) -> Self {
        Self { items: iter.into_iter().collect() }
    }

    pub fn insert(&mut self, m: Match) -> bool {
        self.items.insert(m)
    }

    pub fn union(mut self, other: ResultSet) -> Self {
        self.items.extend(other.items);
        self
    }

    pub fn extend(&mut self, other: ResultSet) {
        self.items.extend(other.items);
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Match> {
        self.items.iter()
    }

    pub fn into_vec(self) -> Vec<Match> {
        self.items.into_iter().collect()
    }
}

impl FromIterator<Match> for ResultSet {
    fn from_iter<I: IntoIterator<Item = Match>>(iter: I) -> Self {
        Self { items: iter.into_iter().collect() }
    }
}

impl IntoIterator for ResultSet {
    type Item = Match;
    type IntoIter = std::collections::hash_set::IntoIter<Match>;
    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn idx(offset: usize) -> Index {
        Index::new(0, 0, offset, offset)
    }

    #[test]
    fn dedups_by_beg_end_bias() {
        let mut rs = ResultSet::new();
        assert!(rs.insert(Match::new(idx(0), idx(1))));
        assert!(!rs.insert(Match::new(idx(0), idx(1))));
        assert!(rs.insert(Match::with_bias(idx(0), idx(1), 1)));
        assert_eq!(rs.len(), 2);
    }

    #[test]
    fn overlap_detects_shared_offsets() {
        let a = Match::new(idx(0), idx(2));
        let b = Match::new(idx(2), idx(4));
        let c = Match::new(idx(3), idx(4));
        assert!(a.overlaps(&b));
        assert!(!a.overlaps(&c));
    }

    #[test]
    fn text_joins_latin_runs_with_spaces_and_cjk_without() {
        use crate::config::Config;
        use crate::text::{TokenizedText, ZhTokenizer};

        let cfg = Config::default();
        let text = TokenizedText::build("iphone你好world", &cfg, &ZhTokenizer).unwrap();
        let m = Match::new(Index::new(0, 0, 0, 0), Index::new(0, 0, text.len() - 1, text.len() - 1));
        let rendered = m.text(&text, &cfg).unwrap();
        assert_eq!(rendered, "iphone 你 好 world");
    }
}
