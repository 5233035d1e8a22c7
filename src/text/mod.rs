mod index;
mod tokenized_text;
mod tokenizer;

pub use index::Index;
pub use tokenized_text::{Token, TokenizedText, HIGH_SENTINEL, LOW_SENTINEL};
pub use tokenizer::{Tokenizer, ZhTokenizer};
