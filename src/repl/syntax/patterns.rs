//! # Pattern Set
//!
//! Static classification rules for the instruction language. Rules are grouped
//! by token class and the groups are listed in processing order; a later group
//! wins over an earlier one wherever their matches overlap.

use regex::Regex;

/// Classification of a highlighted span
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenClass {
    Keyword,
    Function,
    Number,
    Address,
    Comment,
}

impl TokenClass {
    /// CSS class emitted in rendered markup
    pub fn css_class(&self) -> &'static str {
        match self {
            TokenClass::Keyword => "keyword",
            TokenClass::Function => "func",
            TokenClass::Number => "number",
            TokenClass::Address => "address",
            TokenClass::Comment => "comment",
        }
    }

    /// Inverse of [`TokenClass::css_class`]
    pub fn from_css_class(class: &str) -> Option<Self> {
        match class {
            "keyword" => Some(TokenClass::Keyword),
            "func" => Some(TokenClass::Function),
            "number" => Some(TokenClass::Number),
            "address" => Some(TokenClass::Address),
            "comment" => Some(TokenClass::Comment),
            _ => None,
        }
    }
}

/// A single classification rule before compilation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PatternRule {
    /// Whole word, bounded by whitespace on both sides
    Word(&'static str),
    /// Regular expression; capture group 1 is the highlighted sub-span
    Pattern(&'static str),
}

const KEYWORDS: &[&str] = &[
    "alloc", "read", "mov", "jmp", "jgt", "jlt", "je", "jne", "jle", "jge",
];

const FUNCTIONS: &[&str] = &[
    "X", "Y", "Z", "H", "R", "SQRTX", "CNOT", "CCNOT", "CSWAP", "M", "ZX", "add", "sub", "mul",
    "div", "cmp",
];

const NUMBER_PATTERNS: &[&str] = &[r"([0-9.]+)"];

const ADDRESS_PATTERNS: &[&str] = &[
    r"([0-9]+(Q|b))",
    r"(\.[a-z0-9A-Z_]+:)",
    r"(?m)^j[a-z][a-z]? (\.[a-z0-9A-Z_]+)",
];

const COMMENT_PATTERNS: &[&str] = &[r"(?m)^.*(#.*)$"];

/// A rule compiled into a regex whose first capture group is the span
#[derive(Debug, Clone)]
pub struct CompiledRule {
    pub class: TokenClass,
    pub regex: Regex,
}

impl CompiledRule {
    fn compile(class: TokenClass, rule: PatternRule) -> Result<Self, regex::Error> {
        let source = match rule {
            PatternRule::Word(word) => format!(r"\s+({})\s+", regex::escape(word)),
            PatternRule::Pattern(pattern) => pattern.to_string(),
        };
        Ok(Self {
            class,
            regex: Regex::new(&source)?,
        })
    }
}

/// Ordered, compiled classification table
#[derive(Debug, Clone)]
pub struct PatternSet {
    rules: Vec<CompiledRule>,
}

impl PatternSet {
    /// Rule groups in processing order: keyword, function, number, address, comment
    pub fn rule_groups() -> Vec<(TokenClass, Vec<PatternRule>)> {
        let words = |list: &[&'static str]| -> Vec<PatternRule> {
            list.iter().copied().map(PatternRule::Word).collect()
        };
        let patterns = |list: &[&'static str]| -> Vec<PatternRule> {
            list.iter().copied().map(PatternRule::Pattern).collect()
        };

        vec![
            (TokenClass::Keyword, words(KEYWORDS)),
            (TokenClass::Function, words(FUNCTIONS)),
            (TokenClass::Number, patterns(NUMBER_PATTERNS)),
            (TokenClass::Address, patterns(ADDRESS_PATTERNS)),
            (TokenClass::Comment, patterns(COMMENT_PATTERNS)),
        ]
    }

    /// Compile the standard rule table
    pub fn new() -> Result<Self, regex::Error> {
        Self::from_groups(Self::rule_groups())
    }

    /// Compile an arbitrary rule table, preserving group and rule order
    pub fn from_groups(groups: Vec<(TokenClass, Vec<PatternRule>)>) -> Result<Self, regex::Error> {
        let mut rules = Vec::new();
        for (class, group) in groups {
            for rule in group {
                rules.push(CompiledRule::compile(class, rule)?);
            }
        }
        tracing::debug!("Compiled {} highlight rules", rules.len());
        Ok(Self { rules })
    }

    /// Compiled rules in processing order
    pub fn rules(&self) -> &[CompiledRule] {
        &self.rules
    }
}
