use crate::concept::ConceptManager;
use crate::config::Config;
use crate::debug_trace;
use crate::error::{LreError, LreResult};
use crate::result::ResultSet;
use crate::syntax::{lower_file, SyntaxParser};
use crate::text::{TokenizedText, Tokenizer, ZhTokenizer};
use std::collections::HashMap;
use std::path::Path;

/// The trained engine: a tokenizer plus every `.cpt` file's concept,
/// ready to match against new text.
pub struct Model {
    config: Config,
    tokenizer: Box<dyn Tokenizer>,
    concepts: ConceptManager,
}

impl Model {
    /// Walks `rule_dir` for `*.cpt` files with the default [`ZhTokenizer`].
    /// Each file's basename (minus extension) becomes its concept's name,
    /// which must be unique across the whole directory.
    pub fn train(config: Config, rule_dir: impl AsRef<Path>) -> LreResult<Self> {
        Self::train_with(config, rule_dir, Box::new(ZhTokenizer))
    }

    pub fn train_with(config: Config, rule_dir: impl AsRef<Path>, tokenizer: Box<dyn Tokenizer>) -> LreResult<Self> {
        let rule_dir = rule_dir.as_ref();
        if !rule_dir.exists() {
            return Err(LreError::Io(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                format!("rule_dir does not exist: {}", rule_dir.display()),
            )));
        }
        if !rule_dir.is_dir() {
            return Err(LreError::Io(std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                format!("rule_dir is not a directory: {}", rule_dir.display()),
            )));
        }

        let mut concepts = ConceptManager::new();

        let mut cpt_files = Vec::new();
        collect_cpt_files(rule_dir, &mut cpt_files)?;
        cpt_files.sort();

        for path in cpt_files {
            let name = path
                .file_stem()
                .and_then(|s| s.to_str())
                .ok_or_else(|| LreError::Config(format!("non-UTF8 rule file name: {}", path.display())))?
                .to_string();

            if concepts.get(&name).is_some() {
                return Err(LreError::Semantic(format!("duplicate concept name '{name}'")));
            }

            match Self::load_file(&name, &path, tokenizer.as_ref(), &config) {
                Ok(concept) => concepts.add(concept),
                Err(err) => {
                    debug_trace!("[lre] failed to load rule file {}: {err}", path.display());
                    return Err(err);
                }
            }
        }

        Ok(Self { config, tokenizer, concepts })
    }

    fn load_file(
        name: &str,
        path: &Path,
        tokenizer: &dyn Tokenizer,
        config: &Config,
    ) -> LreResult<crate::concept::Concept> {
        let source = std::fs::read_to_string(path)?;
        let lines = SyntaxParser::parse_file(&source)?;
        lower_file(name, &lines, tokenizer, config)
    }

    /// Tokenizes `text` and matches every trained concept against it,
    /// optionally restricted by `concept_filter`. Concepts with no
    /// matches are omitted from the returned map.
    pub fn match_text(
        &self,
        text: &str,
        concept_filter: Option<&dyn Fn(&str) -> bool>,
    ) -> LreResult<HashMap<String, ResultSet>> {
        let tokenized = TokenizedText::build(text, &self.config, self.tokenizer.as_ref())?;
        self.match_tokenized(&tokenized, concept_filter)
    }

    /// Matches every trained concept against already-tokenized text,
    /// skipping re-tokenization.
    pub fn match_tokenized(
        &self,
        tokenized: &TokenizedText,
        concept_filter: Option<&dyn Fn(&str) -> bool>,
    ) -> LreResult<HashMap<String, ResultSet>> {
        self.concepts.match_all(tokenized, concept_filter)
    }

    pub fn concept_names(&self) -> impl Iterator<Item = &str> {
        self.concepts.names()
    }
}

/// Recursively collects every `*.cpt` file under `dir`, mirroring the
/// reference implementation's `os.walk(rule_dir_path)` directory walk
/// rather than a single flat `readdir`.
fn collect_cpt_files(dir: &Path, out: &mut Vec<std::path::PathBuf>) -> LreResult<()> {
    for entry in std::fs::read_dir(dir)? {
        let entry = entry?;
        let path = entry.path();
        if path.is_dir() {
            collect_cpt_files(&path, out)?;
        } else if path.extension().and_then(|e| e.to_str()) == Some("cpt") {
            out.push(path);
        }
    }
    Ok(())
}
