use crate::config::{Config, WordLevel};
use once_cell::sync::Lazy;
use regex::Regex;

/// Splits raw text into paragraphs of sentences of words.
///
/// This is the seam the engine itself treats as external: any
/// implementation producing a flat, ordered token stream works.
/// [`ZhTokenizer`] is the crate's own lightweight default.
pub trait Tokenizer {
    /// Returns `paragraphs[i][j][k]` = the k-th word of the j-th sentence
    /// of the i-th paragraph. Punctuation-only tokens must already be
    /// dropped by the time they reach this structure.
    fn tokenize(&self, text: &str, config: &Config) -> Vec<Vec<Vec<String>>>;
}

static SENT_SPLIT: Lazy<Regex> = Lazy::new(|| Regex::new(r"([。！？!?…]|\.{3})").unwrap());
static ASCII_WORD: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[A-Za-z0-9]+$").unwrap());
static PUNCT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[\s,，。.!！?？;；:：、\-—…'\u{2018}\u{2019}\u{201C}\u{201D}()（）\[\]【】]+$")
        .unwrap()
});

/// A jieba-free stand-in tokenizer for Chinese (and mixed Chinese/Latin)
/// text: splits on newlines for paragraphs, on terminal punctuation for
/// sentences, and then either per-character (`WordLevel::Char`) or
/// per-script-run (`WordLevel::Word`) for words. Punctuation-only spans
/// are dropped before indexing.
#[derive(Debug, Clone, Copy, Default)]
pub struct ZhTokenizer;

impl Tokenizer for ZhTokenizer {
    fn tokenize(&self, text: &str, config: &Config) -> Vec<Vec<Vec<String>>> {
        text.split('\n')
            .filter(|p| !p.trim().is_empty())
            .map(|para| {
                split_sentences(para)
                    .into_iter()
                    .filter(|s| !s.trim().is_empty())
                    .map(|sent| split_words(&sent, config.word_level))
                    .filter(|words| !words.is_empty())
                    .collect()
            })
            .filter(|sents: &Vec<Vec<String>>| !sents.is_empty())
            .collect()
    }
}

fn split_sentences(para: &str) -> Vec<String> {
    let mut out = Vec::new();
    let mut last = 0;
    for m in SENT_SPLIT.find_iter(para) {
        out.push(para[last..m.end()].to_string());
        last = m.end();
    }
    if last < para.len() {
        out.push(para[last..].to_string());
    }
    out
}

fn split_words(sent: &str, level: WordLevel) -> Vec<String> {
    match level {
        WordLevel::Char => split_words_char(sent),
        WordLevel::Word => split_words_run(sent),
    }
}

fn split_words_char(sent: &str) -> Vec<String> {
    let mut out = Vec::new();
    let mut ascii_run = String::new();
    for ch in sent.chars() {
        if ch.is_ascii_alphanumeric() {
            ascii_run.push(ch.to_ascii_lowercase());
            continue;
        }
        if !ascii_run.is_empty() {
            out.push(std::mem::take(&mut ascii_run));
        }
        let s = ch.to_string();
        if !is_punct(&s) {
            out.push(s);
        }
    }
    if !ascii_run.is_empty() {
        out.push(ascii_run);
    }
    out
}

#[derive(PartialEq, Eq, Clone, Copy)]
enum CharClass {
    Ascii,
    Other,
    Punct,
}

fn classify(ch: char) -> CharClass {
    if ch.is_ascii_alphanumeric() {
        CharClass::Ascii
    } else if is_punct(&ch.to_string()) {
        CharClass::Punct
    } else {
        CharClass::Other
    }
}

fn split_words_run(sent: &str) -> Vec<String> {
    let mut out = Vec::new();
    let mut run = String::new();
    let mut run_class: Option<CharClass> = None;
    for ch in sent.chars() {
        let class = classify(ch);
        if run_class.is_some() && run_class != Some(class) {
            flush_run(&mut run, run_class.take(), &mut out);
        }
        run_class = Some(class);
        run.push(if class == CharClass::Ascii { ch.to_ascii_lowercase() } else { ch });
    }
    flush_run(&mut run, run_class, &mut out);
    out
}

fn flush_run(run: &mut String, class: Option<CharClass>, out: &mut Vec<String>) {
    if run.is_empty() {
        return;
    }
    if class != Some(CharClass::Punct) {
        out.push(std::mem::take(run));
    } else {
        run.clear();
    }
}

fn is_punct(s: &str) -> bool {
    !ASCII_WORD.is_match(s) && PUNCT.is_match(s)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_paragraphs_sentences_words() {
        let cfg = Config::default();
        let tok = ZhTokenizer;
        let out = tok.tokenize("你好世界。天气不错！", &cfg);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].len(), 2);
        assert_eq!(out[0][0], vec!["你", "好", "世", "界"]);
    }

    #[test]
    fn drops_pure_punctuation_tokens_in_word_mode() {
        let mut cfg = Config::default();
        cfg.word_level = WordLevel::Word;
        let tok = ZhTokenizer;
        let out = tok.tokenize("hello, 世界", &cfg);
        let words: Vec<&String> = out[0][0].iter().collect();
        assert!(words.iter().any(|w| w.as_str() == "hello"));
        assert!(words.iter().any(|w| w.as_str() == "世界"));
        assert!(!words.iter().any(|w| w.as_str() == ","));
    }
}
