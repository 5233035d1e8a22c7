use super::ast::{FilterRangeNode, Line, RuleNode, RuleRangeNode};
use crate::arg::{ConceptArg, KeywordArg};
use crate::concept::Concept;
use crate::config::Config;
use crate::error::{LreError, LreResult};
use crate::filter::{ConceptFilter, RuleFilter};
use crate::matcher::Matcher;
use crate::range::{FilterRange, RangeUnit, RuleRange};
use crate::rule::Rule;
use crate::text::Tokenizer;

/// Lowers a parsed `.cpt` file's [`Line`]s into a [`Concept`] named
/// `concept_name`, splitting producer lines from `!cfilt(...)` lines the
/// way `Concept::match_text` expects (post-filters are never producers).
pub fn lower_file(
    concept_name: &str,
    lines: &[Line],
    tokenizer: &dyn Tokenizer,
    config: &Config,
) -> LreResult<Concept> {
    let mut producers: Vec<Box<dyn Matcher>> = Vec::new();
    let mut filters: Vec<ConceptFilter> = Vec::new();

    for line in lines {
        match line {
            Line::Comment => {}
            Line::Producer(node) => producers.push(lower_rule(node, tokenizer, config)?),
            Line::ConceptFilter { range, matcher } => {
                let range = lower_filter_range(range)?;
                let matcher = lower_rule(matcher, tokenizer, config)?;
                filters.push(ConceptFilter::new(range, matcher));
            }
        }
    }

    if producers.is_empty() {
        return Err(LreError::Semantic(format!(
            "rule file for concept '{concept_name}' has no producer rules (only comments/!cfilt lines)"
        )));
    }

    Ok(Concept::new(concept_name, producers, filters, config.force_concept_size_one))
}

fn lower_rule(node: &RuleNode, tokenizer: &dyn Tokenizer, config: &Config) -> LreResult<Box<dyn Matcher>> {
    Ok(match node {
        RuleNode::Keyword(phrase) => Box::new(KeywordArg::new(phrase, tokenize_phrase(phrase, tokenizer, config)?)),
        RuleNode::ConceptRef(name) => Box::new(ConceptArg::new(name.clone())),
        RuleNode::Arg { child } => Box::new(Rule::Arg { child: lower_rule(child, tokenizer, config)? }),
        RuleNode::Or { children } => Box::new(Rule::Or { children: lower_children(children, tokenizer, config)? }),
        RuleNode::Seq { range, children } => Box::new(Rule::Seq {
            range: lower_rule_range(range)?,
            children: lower_children(children, tokenizer, config)?,
        }),
        RuleNode::Ord { range, children } => Box::new(Rule::Ord {
            range: lower_rule_range(range)?,
            children: lower_children(children, tokenizer, config)?,
        }),
        RuleNode::Bag { range, children } => Box::new(Rule::Bag {
            range: lower_rule_range(range)?,
            children: lower_children(children, tokenizer, config)?,
        }),
        RuleNode::Filt { target, pairs } => {
            let target = lower_rule(target, tokenizer, config)?;
            let mut lowered_pairs = Vec::with_capacity(pairs.len());
            for (range, matcher) in pairs {
                lowered_pairs.push((lower_filter_range(range)?, lower_rule(matcher, tokenizer, config)?));
            }
            Box::new(RuleFilter::new(target, lowered_pairs))
        }
    })
}

fn lower_children(
    nodes: &[RuleNode],
    tokenizer: &dyn Tokenizer,
    config: &Config,
) -> LreResult<Vec<Box<dyn Matcher>>> {
    nodes.iter().map(|n| lower_rule(n, tokenizer, config)).collect()
}

fn lower_rule_range(node: &RuleRangeNode) -> LreResult<RuleRange> {
    if node.n <= 0 {
        return Err(LreError::Semantic(format!(
            "range numeral must be a positive integer, got {}",
            node.n
        )));
    }
    Ok(RuleRange::new(RangeUnit::from_letter(node.unit)?, node.n))
}

fn lower_filter_range(node: &FilterRangeNode) -> LreResult<FilterRange> {
    Ok(FilterRange::new(
        RangeUnit::from_letter(node.fw_unit)?,
        node.fw_n,
        node.overlap,
        RangeUnit::from_letter(node.bw_unit)?,
        node.bw_n,
    ))
}

fn tokenize_phrase(phrase: &str, tokenizer: &dyn Tokenizer, config: &Config) -> LreResult<Vec<String>> {
    let words: Vec<String> =
        tokenizer.tokenize(phrase, config).into_iter().flatten().flatten().collect();
    if words.is_empty() {
        return Err(LreError::Semantic(format!("keyword \"{phrase}\" contains no indexable words")));
    }
    Ok(words)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::syntax::SyntaxParser;
    use crate::text::ZhTokenizer;

    #[test]
    fn rejects_a_file_with_no_producers() {
        let lines = SyntaxParser::parse_file("# just a comment\n").unwrap();
        let cfg = Config::default();
        let err = lower_file("empty", &lines, &ZhTokenizer, &cfg).unwrap_err();
        assert!(matches!(err, LreError::Semantic(_)));
    }

    #[test]
    fn rejects_a_zero_range_numeral() {
        let lines = SyntaxParser::parse_file(r#"$seq(@s0, "a", "b")"#).unwrap();
        let cfg = Config::default();
        let err = lower_file("bad", &lines, &ZhTokenizer, &cfg).unwrap_err();
        assert!(matches!(err, LreError::Semantic(_)));
    }

    #[test]
    fn accepts_a_file_with_one_producer() {
        let lines = SyntaxParser::parse_file("$kw(\"好\")\n").unwrap();
        let cfg = Config::default();
        let concept = lower_file("good", &lines, &ZhTokenizer, &cfg).unwrap();
        assert_eq!(concept.name(), "good");
    }
}
