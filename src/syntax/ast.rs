//! AST for `.cpt` rule source. Every node is an explicit enum variant with
//! named fields — no reflection-based `__dict__`-style construction, unlike
//! the syntax tree the reference implementation builds.

/// One full top-level line in a `.cpt` file.
#[derive(Debug, Clone)]
pub enum Line {
    Comment,
    Producer(RuleNode),
    ConceptFilter { range: FilterRangeNode, matcher: RuleNode },
}

/// A parsed rule/arg expression, prior to concept-reference resolution.
#[derive(Debug, Clone)]
pub enum RuleNode {
    Keyword(String),
    ConceptRef(String),
    Arg { child: Box<RuleNode> },
    Or { children: Vec<RuleNode> },
    Seq { range: RuleRangeNode, children: Vec<RuleNode> },
    Ord { range: RuleRangeNode, children: Vec<RuleNode> },
    Bag { range: RuleRangeNode, children: Vec<RuleNode> },
    Filt { target: Box<RuleNode>, pairs: Vec<(FilterRangeNode, RuleNode)> },
}

#[derive(Debug, Clone, Copy)]
pub struct RuleRangeNode {
    pub unit: char,
    pub n: i64,
}

#[derive(Debug, Clone, Copy)]
pub struct FilterRangeNode {
    pub fw_unit: char,
    pub fw_n: i64,
    pub overlap: bool,
    pub bw_unit: char,
    pub bw_n: i64,
}
