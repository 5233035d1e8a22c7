/// Granularity at which raw text is split into words.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WordLevel {
    /// One token per Han character (jieba-free fallback).
    #[default]
    Char,
    /// One token per contiguous run of the same script class.
    Word,
}

/// Natural language the tokenizer and `Result::text` surface rendering
/// assume. Only Chinese is supported today, matching the reference
/// implementation's sole `NlpZh`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Language {
    #[default]
    Zh,
}

/// Engine-wide settings. Constructed via [`Config::default`] or
/// [`Config::builder`].
#[derive(Debug, Clone)]
pub struct Config {
    /// Input longer than this many characters is truncated before
    /// tokenization.
    pub max_text_length: usize,
    pub word_level: WordLevel,
    pub language: Language,
    /// Whether `Concept::match` collapses its aggregate result span to
    /// width 1 for outer range checks (see [`crate::concept::Concept`]).
    pub force_concept_size_one: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_text_length: 5000,
            word_level: WordLevel::Char,
            language: Language::Zh,
            force_concept_size_one: true,
        }
    }
}

impl Config {
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }

    /// Truncates `text` to `max_text_length` characters, the way the
    /// engine is specified to bound input before tokenization (no error,
    /// no silent unbounded growth).
    pub(crate) fn truncate_text<'a>(&self, text: &'a str) -> std::borrow::Cow<'a, str> {
        if text.chars().count() <= self.max_text_length {
            return std::borrow::Cow::Borrowed(text);
        }
        std::borrow::Cow::Owned(text.chars().take(self.max_text_length).collect())
    }
}

#[derive(Debug, Clone, Default)]
pub struct ConfigBuilder {
    inner: Config,
}

impl ConfigBuilder {
    pub fn max_text_length(mut self, n: usize) -> Self {
        self.inner.max_text_length = n;
        self
    }

    pub fn word_level(mut self, w: WordLevel) -> Self {
        self.inner.word_level = w;
        self
    }

    pub fn language(mut self, l: Language) -> Self {
        self.inner.language = l;
        self
    }

    pub fn force_concept_size_one(mut self, b: bool) -> Self {
        self.inner.force_concept_size_one = b;
        self
    }

    pub fn build(self) -> Config {
        self.inner
    }
}
