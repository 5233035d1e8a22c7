use super::ast::{FilterRangeNode, Line, RuleNode, RuleRangeNode};
use crate::error::{LreError, LreResult};

/// Hand-written recursive-descent parser over an entire `.cpt` file's
/// source, scanned as one character stream (not split by line): whitespace,
/// including `\n`, is skippable between any two tokens, so a rule may span
/// multiple physical lines (e.g. a long `!filt(...)` with its range/matcher
/// pairs each on their own line).
///
/// Grammar (informal):
/// ```text
/// file       := (top_item)*
/// top_item   := comment | concept_filter | rule_call | filt_call
/// comment    := '#' .* '\n'
/// concept_filter := '!cfilt' '(' filter_range ',' rule_expr ')'
/// rule_expr  := keyword | concept_ref | rule_call | filt_call
/// rule_call  := '$' name '(' rule_range? rule_expr (',' rule_expr)* ')'
/// filt_call  := '!filt' '(' rule_expr (',' filter_range ',' rule_expr)+ ')'
/// keyword    := '"' (('\' '"') | [^"\n\t])* '"'
/// concept_ref:= '%' ident
/// rule_range := '@' unit digit*
/// filter_range := '@' '[' (unit digit* | '0') ',' ('0' | '1') ',' (unit digit* | '0') ']'
/// unit       := 'd' | 'w' | 's' | 'p' | 't'
/// ```
///
/// A top-level item is always a `$rule(...)` call, a `!filt(...)` call
/// (which resembles a rule), or a `!cfilt(...)` line — a bare keyword or
/// `%concept` reference is only valid nested inside one of those, never on
/// its own at the top level (matching the reference's own top-level
/// `parse`, which rejects a bare `"..."`/`%name` line as an invalid rule).
pub struct SyntaxParser<'a> {
    chars: Vec<char>,
    pos: usize,
    source: &'a str,
}

impl<'a> SyntaxParser<'a> {
    pub fn new(source: &'a str) -> Self {
        Self { chars: source.chars().collect(), pos: 0, source }
    }

    /// Scans the whole file as one character stream, skipping whitespace
    /// (including newlines) between top-level items so a rule may freely
    /// wrap across lines.
    pub fn parse_file(source: &'a str) -> LreResult<Vec<Line>> {
        let mut parser = SyntaxParser::new(source);
        let mut out = Vec::new();
        loop {
            parser.skip_ws();
            if parser.peek().is_none() {
                break;
            }
            if parser.peek() == Some('#') {
                parser.skip_to_eol();
                out.push(Line::Comment);
                continue;
            }
            out.push(parser.parse_line()?);
        }
        Ok(out)
    }

    /// Consumes the rest of the current physical line (used for `#`
    /// comments, which — unlike rules — are not newline-transparent).
    fn skip_to_eol(&mut self) {
        while !matches!(self.peek(), None | Some('\n')) {
            self.pos += 1;
        }
    }

    fn fail(&self, msg: impl Into<String>) -> LreError {
        LreError::Syntax { offset: self.pos, context: format!("{}: ...{}", msg.into(), self.rest_preview()) }
    }

    fn rest_preview(&self) -> String {
        self.chars[self.pos..].iter().take(24).collect()
    }

    fn peek(&self) -> Option<char> {
        self.chars.get(self.pos).copied()
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.peek();
        if c.is_some() {
            self.pos += 1;
        }
        c
    }

    fn skip_ws(&mut self) {
        while matches!(self.peek(), Some(c) if c.is_whitespace()) {
            self.pos += 1;
        }
    }

    fn expect(&mut self, c: char) -> LreResult<()> {
        if self.bump() == Some(c) {
            Ok(())
        } else {
            Err(self.fail(format!("expected '{c}'")))
        }
    }

    fn expect_str(&mut self, s: &str) -> LreResult<()> {
        for expected in s.chars() {
            self.expect(expected)?;
        }
        Ok(())
    }

    fn parse_line(&mut self) -> LreResult<Line> {
        self.skip_ws();
        if self.looking_at("!cfilt(") {
            self.expect_str("!cfilt(")?;
            let range = self.parse_filter_range()?;
            self.skip_ws();
            self.expect(',')?;
            self.skip_ws();
            let matcher = self.parse_rule_expr()?;
            self.skip_ws();
            self.expect(')')?;
            return Ok(Line::ConceptFilter { range, matcher });
        }
        let node = self.parse_top_producer()?;
        Ok(Line::Producer(node))
    }

    /// A top-level producer is always a `$rule(...)` or `!filt(...)` call
    /// — never a bare keyword or `%concept` reference on its own (those
    /// are only valid nested inside one of those two forms).
    fn parse_top_producer(&mut self) -> LreResult<RuleNode> {
        self.skip_ws();
        match self.peek() {
            Some('$') => self.parse_rule_call(),
            Some('!') if self.looking_at("!filt(") => self.parse_filt_call(),
            _ => Err(self.fail("a top-level rule must be a '$name(...)' or '!filt(...)' call")),
        }
    }

    fn looking_at(&self, lit: &str) -> bool {
        self.source[byte_offset(&self.chars, self.pos)..].starts_with(lit)
    }

    fn parse_rule_expr(&mut self) -> LreResult<RuleNode> {
        self.skip_ws();
        match self.peek() {
            Some('"') => self.parse_keyword(),
            Some('%') => self.parse_concept_ref(),
            Some('$') => self.parse_rule_call(),
            Some('!') if self.looking_at("!filt(") => self.parse_filt_call(),
            _ => Err(self.fail("unknown argument")),
        }
    }

    fn parse_keyword(&mut self) -> LreResult<RuleNode> {
        self.expect('"')?;
        let mut out = String::new();
        loop {
            match self.bump() {
                None => return Err(self.fail("unterminated keyword")),
                Some('"') => break,
                Some('\\') => match self.bump() {
                    Some('"') => out.push('"'),
                    Some(other) => {
                        out.push('\\');
                        out.push(other);
                    }
                    None => return Err(self.fail("unterminated escape")),
                },
                Some(c) if c == ' ' || c == '\t' || c == '\n' => {
                    return Err(self.fail("keyword may not contain raw whitespace"));
                }
                Some(c) => out.push(c),
            }
        }
        Ok(RuleNode::Keyword(out))
    }

    fn parse_concept_ref(&mut self) -> LreResult<RuleNode> {
        self.expect('%')?;
        let name = self.parse_ident()?;
        if name.is_empty() {
            return Err(self.fail("empty concept reference"));
        }
        Ok(RuleNode::ConceptRef(name))
    }

    fn parse_ident(&mut self) -> LreResult<String> {
        let mut out = String::new();
        while let Some(c) = self.peek() {
            if c == ',' || c == ')' || c == '(' || c.is_whitespace() {
                break;
            }
            out.push(c);
            self.pos += 1;
        }
        Ok(out)
    }

    fn parse_rule_call(&mut self) -> LreResult<RuleNode> {
        self.expect('$')?;
        let name = self.parse_bare_word()?;
        self.expect('(')?;
        self.skip_ws();

        // `seq`/`ord`/`bag` require a leading `RuleRange` argument; `arg`
        // and `or` take none. Both are enforced structurally here rather
        // than left optional-with-a-default, matching the reference's
        // `BagRule.validate`/`OrdRule.validate`/`SeqRule.validate`, which
        // reject a missing or misplaced `RuleRangeArg` outright.
        let takes_range = matches!(name.as_str(), "seq" | "ord" | "bag");
        let range = if takes_range {
            let range = self
                .try_parse_rule_range()?
                .ok_or_else(|| LreError::Semantic(format!("{name}() requires a leading range argument")))?;
            self.skip_ws();
            self.expect(',')?;
            self.skip_ws();
            Some(range)
        } else {
            None
        };

        let mut children = vec![self.parse_rule_expr()?];
        loop {
            self.skip_ws();
            if self.peek() == Some(',') {
                self.pos += 1;
                self.skip_ws();
                children.push(self.parse_rule_expr()?);
            } else {
                break;
            }
        }
        self.skip_ws();
        self.expect(')')?;

        match name.as_str() {
            // `kw` is the spec's own shorthand for a single keyword/concept
            // leaf (spec.md §8.3's `$kw("a")`) and lowers to exactly the
            // same node as `arg`, the reference's single-argument wrapper.
            "arg" | "kw" => {
                if children.len() != 1 {
                    return Err(LreError::Semantic(format!("{name}() takes exactly 1 child, got {}", children.len())));
                }
                if !matches!(children[0], RuleNode::Keyword(_) | RuleNode::ConceptRef(_)) {
                    return Err(LreError::Semantic(format!(
                        "{name}() only accepts a keyword or a concept reference"
                    )));
                }
                Ok(RuleNode::Arg { child: Box::new(children.remove(0)) })
            }
            "or" => {
                if children.len() < 2 {
                    return Err(LreError::Semantic("or() requires at least 2 children".into()));
                }
                Ok(RuleNode::Or { children })
            }
            "seq" => {
                if children.len() < 2 {
                    return Err(LreError::Semantic("seq() requires at least 2 children".into()));
                }
                Ok(RuleNode::Seq { range: range.expect("seq always parses a range"), children })
            }
            "ord" => {
                if children.len() < 2 {
                    return Err(LreError::Semantic("ord() requires at least 2 children".into()));
                }
                Ok(RuleNode::Ord { range: range.expect("ord always parses a range"), children })
            }
            "bag" => {
                if children.len() < 2 {
                    return Err(LreError::Semantic("bag() requires at least 2 children".into()));
                }
                Ok(RuleNode::Bag { range: range.expect("bag always parses a range"), children })
            }
            other => Err(LreError::Semantic(format!("unknown rule '{other}'"))),
        }
    }

    fn parse_filt_call(&mut self) -> LreResult<RuleNode> {
        self.expect_str("!filt(")?;
        self.skip_ws();
        let target = Box::new(self.parse_rule_expr()?);

        let mut pairs = Vec::new();
        loop {
            self.skip_ws();
            if self.peek() != Some(',') {
                break;
            }
            self.pos += 1;
            self.skip_ws();
            let range = self.parse_filter_range()?;
            self.skip_ws();
            self.expect(',')?;
            self.skip_ws();
            let matcher = self.parse_rule_expr()?;
            pairs.push((range, matcher));
        }
        self.skip_ws();
        self.expect(')')?;

        if pairs.is_empty() {
            return Err(LreError::Semantic("!filt(...) requires at least one range/filter pair".into()));
        }

        Ok(RuleNode::Filt { target, pairs })
    }

    fn parse_bare_word(&mut self) -> LreResult<String> {
        let mut out = String::new();
        while matches!(self.peek(), Some(c) if c.is_ascii_alphabetic()) {
            out.push(self.bump().unwrap());
        }
        if out.is_empty() {
            return Err(self.fail("expected rule name"));
        }
        Ok(out)
    }

    fn try_parse_rule_range(&mut self) -> LreResult<Option<RuleRangeNode>> {
        if self.peek() != Some('@') || self.chars.get(self.pos + 1) == Some(&'[') {
            return Ok(None);
        }
        Ok(Some(self.parse_rule_range()?))
    }

    /// `@unit[digits]` — the numeric argument is optional and defaults to
    /// 1 when omitted (`@t` / `@s` are as valid as `@t0` / `@s7`).
    fn parse_rule_range(&mut self) -> LreResult<RuleRangeNode> {
        self.expect('@')?;
        let unit = self.bump().ok_or_else(|| self.fail("expected range unit"))?;
        let n = self.parse_int_or_default(1)?;
        Ok(RuleRangeNode { unit, n })
    }

    /// `@[ fw , overlap , bw ]`. Each of `fw`/`bw` is either a bare `0`
    /// (no unit letter at all — that direction is disabled outright) or a
    /// unit letter with an optional digit run (absent digits default to
    /// 1), matching the reference grammar's `({unit}\d*|0)` alternation.
    /// `overlap` is the digit `0` or `1`, not the words `true`/`false`.
    fn parse_filter_range(&mut self) -> LreResult<FilterRangeNode> {
        self.expect('@')?;
        self.expect('[')?;
        let (fw_unit, fw_n) = self.parse_range_group()?;
        self.skip_ws();
        self.expect(',')?;
        self.skip_ws();
        let overlap = self.parse_overlap_flag()?;
        self.skip_ws();
        self.expect(',')?;
        self.skip_ws();
        let (bw_unit, bw_n) = self.parse_range_group()?;
        self.skip_ws();
        self.expect(']')?;
        Ok(FilterRangeNode { fw_unit, fw_n, overlap, bw_unit, bw_n })
    }

    /// One forward/backward group inside `@[...]`. A lone `0` (a digit
    /// with no preceding unit letter) means "disabled"; the unit is
    /// irrelevant in that case since `FilterRange` only ever consults a
    /// direction's unit when its `n > 0`, so `'t'` is used as a filler.
    fn parse_range_group(&mut self) -> LreResult<(char, i64)> {
        if matches!(self.peek(), Some(c) if c.is_ascii_digit()) {
            let n = self.parse_int()?;
            if n != 0 {
                return Err(self.fail("a bare numeric range group must be 0"));
            }
            return Ok(('t', 0));
        }
        let unit = self.bump().ok_or_else(|| self.fail("expected range unit"))?;
        let n = self.parse_int_or_default(1)?;
        Ok((unit, n))
    }

    fn parse_int(&mut self) -> LreResult<i64> {
        let mut out = String::new();
        while matches!(self.peek(), Some(c) if c.is_ascii_digit()) {
            out.push(self.bump().unwrap());
        }
        if out.is_empty() {
            return Err(self.fail("expected integer"));
        }
        out.parse::<i64>().map_err(|_| self.fail("malformed integer"))
    }

    /// Like [`Self::parse_int`] but an absent digit run yields `default`
    /// rather than a syntax error (the range argument's numeral is
    /// optional in the grammar).
    fn parse_int_or_default(&mut self, default: i64) -> LreResult<i64> {
        if matches!(self.peek(), Some(c) if c.is_ascii_digit()) {
            self.parse_int()
        } else {
            Ok(default)
        }
    }

    /// The overlap flag is the single digit `0` or `1`.
    fn parse_overlap_flag(&mut self) -> LreResult<bool> {
        match self.bump() {
            Some('0') => Ok(false),
            Some('1') => Ok(true),
            _ => Err(self.fail("expected overlap flag '0' or '1'")),
        }
    }
}

fn byte_offset(chars: &[char], char_pos: usize) -> usize {
    chars[..char_pos].iter().map(|c| c.len_utf8()).sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_comment_line() {
        let lines = SyntaxParser::parse_file("# hello\n").unwrap();
        assert!(matches!(lines[0], Line::Comment));
    }

    #[test]
    fn parses_simple_seq_rule() {
        let lines = SyntaxParser::parse_file(r#"$seq(@s1, "你好", %world)"#).unwrap();
        match &lines[0] {
            Line::Producer(RuleNode::Seq { children, range }) => {
                assert_eq!(children.len(), 2);
                assert_eq!(range.unit, 's');
                assert_eq!(range.n, 1);
            }
            other => panic!("unexpected node: {other:?}"),
        }
    }

    #[test]
    fn seq_without_leading_range_is_rejected() {
        let err = SyntaxParser::parse_file(r#"$seq("a", "b")"#).unwrap_err();
        assert!(matches!(err, LreError::Semantic(_)));
    }

    #[test]
    fn arg_rejects_a_leading_range() {
        let err = SyntaxParser::parse_file(r#"$arg(@d1, "a")"#).unwrap_err();
        assert!(matches!(err, LreError::Syntax { .. }));
    }

    #[test]
    fn arg_rejects_a_non_leaf_child() {
        let err = SyntaxParser::parse_file(r#"$arg($or("a", "b"))"#).unwrap_err();
        assert!(matches!(err, LreError::Semantic(_)));
    }

    #[test]
    fn parses_or_rule_without_range() {
        let lines = SyntaxParser::parse_file(r#"$or("a", "b", %c)"#).unwrap();
        match &lines[0] {
            Line::Producer(RuleNode::Or { children }) => assert_eq!(children.len(), 3),
            other => panic!("unexpected node: {other:?}"),
        }
    }

    #[test]
    fn parses_concept_filter_line() {
        let lines = SyntaxParser::parse_file(r#"!cfilt(@[w3,0,d0], "坏")"#).unwrap();
        match &lines[0] {
            Line::ConceptFilter { range, .. } => {
                assert_eq!(range.fw_unit, 'w');
                assert_eq!(range.fw_n, 3);
                assert!(!range.overlap);
                assert_eq!(range.bw_unit, 'd');
                assert_eq!(range.bw_n, 0);
            }
            other => panic!("unexpected node: {other:?}"),
        }
    }

    #[test]
    fn filter_range_accepts_bare_zero_groups_and_overlap_flag() {
        let lines = SyntaxParser::parse_file(r#"!cfilt(@[0,1,0], "坏")"#).unwrap();
        match &lines[0] {
            Line::ConceptFilter { range, .. } => {
                assert_eq!(range.fw_n, 0);
                assert!(range.overlap);
                assert_eq!(range.bw_n, 0);
            }
            other => panic!("unexpected node: {other:?}"),
        }
    }

    #[test]
    fn rule_range_numeral_defaults_to_one_when_omitted() {
        let lines = SyntaxParser::parse_file(r#"$seq(@s, "a", "b")"#).unwrap();
        match &lines[0] {
            Line::Producer(RuleNode::Seq { range, .. }) => assert_eq!(range.n, 1),
            other => panic!("unexpected node: {other:?}"),
        }
    }

    #[test]
    fn rejects_unknown_leading_char() {
        let err = SyntaxParser::parse_file("$arg(^bad)").unwrap_err();
        match err {
            LreError::Syntax { context, .. } => assert!(context.contains("unknown argument")),
            other => panic!("expected syntax error, got {other:?}"),
        }
    }

    #[test]
    fn top_level_bare_keyword_is_rejected() {
        // Only `$rule(...)`/`!filt(...)` may stand alone at the top level;
        // a bare keyword (unlike when nested inside one of those) is not
        // itself a valid top-level item.
        let err = SyntaxParser::parse_file(r#""a""#).unwrap_err();
        assert!(matches!(err, LreError::Syntax { .. }));
    }

    #[test]
    fn top_level_bare_concept_ref_is_rejected() {
        let err = SyntaxParser::parse_file("%a").unwrap_err();
        assert!(matches!(err, LreError::Syntax { .. }));
    }

    #[test]
    fn kw_lowers_to_the_same_node_as_arg() {
        let lines = SyntaxParser::parse_file(r#"$kw("a")"#).unwrap();
        match &lines[0] {
            Line::Producer(RuleNode::Arg { child }) => {
                assert!(matches!(child.as_ref(), RuleNode::Keyword(s) if s == "a"))
            }
            other => panic!("unexpected node: {other:?}"),
        }
    }

    #[test]
    fn keyword_forbids_raw_whitespace() {
        let err = SyntaxParser::parse_file("$kw(\"a b\")").unwrap_err();
        assert!(matches!(err, LreError::Syntax { .. }));
    }

    #[test]
    fn rejects_trailing_garbage_after_a_rule() {
        let err = SyntaxParser::parse_file(r#"$kw("a") bogus"#).unwrap_err();
        assert!(matches!(err, LreError::Syntax { .. }));
    }

    #[test]
    fn allows_a_trailing_line_comment_after_a_rule() {
        let lines = SyntaxParser::parse_file(r#"$kw("a") # trailing note"#).unwrap();
        assert!(matches!(lines[0], Line::Producer(RuleNode::Arg { .. })));
    }

    #[test]
    fn a_rule_may_span_multiple_physical_lines() {
        // Grounded on the reference syntax parser's own documented
        // examples, which wrap a `!filt(...)`'s range/matcher pairs across
        // lines; spec.md §4.8 lists '\n' among the skippable whitespace
        // characters between tokens.
        let src = "!filt($seq(@d4,\"turn\",\"on\"),\n  @[d3,0,0], $or(\"not\",\"off\"))";
        let lines = SyntaxParser::parse_file(src).unwrap();
        assert_eq!(lines.len(), 1);
        match &lines[0] {
            Line::Producer(RuleNode::Filt { pairs, .. }) => assert_eq!(pairs.len(), 1),
            other => panic!("unexpected node: {other:?}"),
        }
    }

    #[test]
    fn a_concept_filter_may_span_multiple_physical_lines() {
        let src = "!cfilt(\n  @[w3,0,d0],\n  \"坏\"\n)";
        let lines = SyntaxParser::parse_file(src).unwrap();
        assert!(matches!(lines[0], Line::ConceptFilter { .. }));
    }

    #[test]
    fn multiple_top_level_items_may_follow_each_other() {
        let src = "$kw(\"a\")\n$kw(\"b\")\n";
        let lines = SyntaxParser::parse_file(src).unwrap();
        assert_eq!(lines.len(), 2);
    }
}
