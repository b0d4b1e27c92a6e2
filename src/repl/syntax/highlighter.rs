//! # Highlighter
//!
//! Converts instruction source into conflict-free styled spans and renders
//! them as HTML-safe markup.
//!
//! Matching runs over a working copy of the source padded with one newline on
//! each side, so whitespace-bounded words can match at the very start and end.
//! Span offsets are byte offsets into that padded copy.
//!
//! Only the first `<` and the first `>` of the source are escaped. This is a
//! known limitation of the markup format and is kept as-is.

use std::collections::BTreeMap;

use super::patterns::{PatternSet, TokenClass};

/// Padding character placed before and after the source
pub const PADDING: char = '\n';

/// Line break emitted in place of each newline
pub const LINE_BREAK: &str = "<br />";

/// A classified, half-open byte range of the padded source
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
    pub start: usize,
    pub end: usize,
    pub class: TokenClass,
}

impl Span {
    pub fn new(start: usize, end: usize, class: TokenClass) -> Self {
        Self { start, end, class }
    }

    pub fn is_empty(&self) -> bool {
        self.start >= self.end
    }

    /// Touching ranges do not overlap
    pub fn overlaps(&self, other: &Span) -> bool {
        self.start < other.end && other.start < self.end
    }
}

/// Accepted spans keyed by start offset, never overlapping
#[derive(Debug, Default)]
struct SpanSet {
    spans: BTreeMap<usize, Span>,
}

impl SpanSet {
    /// Insert `span`, evicting every accepted span it overlaps
    fn replace(&mut self, span: Span) {
        if span.is_empty() {
            return;
        }

        // Only the closest span starting to the left can reach into `span`.
        if let Some((&start, previous)) = self.spans.range(..span.start).next_back() {
            if previous.overlaps(&span) {
                self.spans.remove(&start);
            }
        }

        let contained: Vec<usize> = self
            .spans
            .range(span.start..span.end)
            .map(|(start, _)| *start)
            .collect();
        for start in contained {
            self.spans.remove(&start);
        }

        self.spans.insert(span.start, span);
    }

    fn into_sorted(self) -> Vec<Span> {
        self.spans.into_values().collect()
    }
}

/// Result of tokenizing: the padded working text and its spans, sorted by start
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Highlighted {
    pub text: String,
    pub spans: Vec<Span>,
}

/// Escape the first `<` and the first `>` only
pub fn escape_first(source: &str) -> String {
    source.replacen('<', "&lt;", 1).replacen('>', "&gt;", 1)
}

/// Syntax highlighter over a compiled [`PatternSet`]
#[derive(Debug, Clone)]
pub struct Highlighter {
    patterns: PatternSet,
}

impl Highlighter {
    /// Create a highlighter with the standard instruction-language rules
    pub fn new() -> Result<Self, regex::Error> {
        Ok(Self::with_patterns(PatternSet::new()?))
    }

    pub fn with_patterns(patterns: PatternSet) -> Self {
        Self { patterns }
    }

    /// Find all spans in `source`, resolving collisions in rule order
    ///
    /// Every rule's matches are accepted in order; each accepted match evicts
    /// the earlier spans it overlaps, so later groups win over earlier ones.
    pub fn tokenize(&self, source: &str) -> Highlighted {
        let text = format!("{PADDING}{}{PADDING}", escape_first(source));
        let mut accepted = SpanSet::default();

        for rule in self.patterns.rules() {
            for caps in rule.regex.captures_iter(&text) {
                if let Some(group) = caps.get(1) {
                    accepted.replace(Span::new(group.start(), group.end(), rule.class));
                }
            }
        }

        Highlighted {
            text,
            spans: accepted.into_sorted(),
        }
    }

    /// Render `source` to markup with `<span class="...">` wrappers
    pub fn render(&self, source: &str) -> String {
        if source.is_empty() {
            return String::new();
        }

        let Highlighted { text, spans } = self.tokenize(source);
        let inner_start = PADDING.len_utf8();
        let inner_end = text.len() - PADDING.len_utf8();

        let mut markup = String::with_capacity(text.len() + spans.len() * 32);
        let mut cursor = inner_start;
        for span in spans {
            let start = span.start.clamp(cursor, inner_end);
            let end = span.end.clamp(start, inner_end);
            if start == end {
                continue;
            }
            markup.push_str(&text[cursor..start]);
            markup.push_str(&format!(
                "<span class=\"{}\">{}</span>",
                span.class.css_class(),
                &text[start..end]
            ));
            cursor = end;
        }
        markup.push_str(&text[cursor..inner_end]);

        markup.replace('\n', LINE_BREAK)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use regex::Regex;

    fn highlighter() -> Highlighter {
        Highlighter::new().unwrap()
    }

    fn strip_markup(markup: &str) -> String {
        let tags = Regex::new(r#"<span class="[a-z]+">|</span>"#).unwrap();
        tags.replace_all(markup, "").replace(LINE_BREAK, "\n")
    }

    fn classes_of(highlighted: &Highlighted) -> Vec<(String, TokenClass)> {
        highlighted
            .spans
            .iter()
            .map(|s| (highlighted.text[s.start..s.end].to_string(), s.class))
            .collect()
    }

    #[test]
    fn render_should_return_empty_for_empty_source() {
        assert_eq!(highlighter().render(""), "");
    }

    #[test]
    fn render_should_wrap_gate_and_address() {
        assert_eq!(
            highlighter().render("H 0Q"),
            r#"<span class="func">H</span> <span class="address">0Q</span>"#
        );
    }

    #[test]
    fn render_should_match_keywords_at_string_edges() {
        assert_eq!(
            highlighter().render("read"),
            r#"<span class="keyword">read</span>"#
        );
        assert_eq!(
            highlighter().render("alloc 2"),
            r#"<span class="keyword">alloc</span> <span class="number">2</span>"#
        );
    }

    #[test]
    fn comment_should_win_over_enclosed_spans() {
        assert_eq!(
            highlighter().render("mov 5 # add 3"),
            concat!(
                r#"<span class="keyword">mov</span> "#,
                r#"<span class="number">5</span> "#,
                r##"<span class="comment"># add 3</span>"##
            )
        );
    }

    #[test]
    fn address_should_replace_number_it_contains() {
        let highlighted = highlighter().tokenize("M 0Q, 12b");
        assert_eq!(
            classes_of(&highlighted),
            vec![
                ("M".to_string(), TokenClass::Function),
                ("0Q".to_string(), TokenClass::Address),
                ("12b".to_string(), TokenClass::Address),
            ]
        );
    }

    #[test]
    fn jump_target_should_be_an_address() {
        assert_eq!(
            highlighter().render("jmp .loop"),
            r#"<span class="keyword">jmp</span> <span class="address">.loop</span>"#
        );
        assert_eq!(
            highlighter().render(".loop:"),
            r#"<span class="address">.loop:</span>"#
        );
    }

    #[test]
    fn touching_spans_should_both_survive() {
        let highlighted = highlighter().tokenize(".a:1b");
        assert_eq!(
            classes_of(&highlighted),
            vec![
                (".a:".to_string(), TokenClass::Address),
                ("1b".to_string(), TokenClass::Address),
            ]
        );
    }

    #[test]
    fn partially_overlapping_earlier_span_should_be_evicted() {
        // "5.0" (number) starts before "0Q" (address) and ends inside it.
        let highlighted = highlighter().tokenize("5.0Q");
        assert_eq!(
            classes_of(&highlighted),
            vec![("0Q".to_string(), TokenClass::Address)]
        );
    }

    #[test]
    fn spans_should_never_overlap() {
        let sources = [
            "alloc 4\nalloc 3Q(0)\nalloc 1b(3)",
            "CCNOT 0Q, 1Q, 2Q  # 25% chance for 2Q",
            "jgt .end\nadd 1b, 2b\n.end:",
            "5.0Q 1.2.3b .x:9Q # 1Q",
            "mov 10b, 3b # mov 1b, 2b",
        ];
        let hl = highlighter();

        for source in sources {
            let spans = hl.tokenize(source).spans;
            for pair in spans.windows(2) {
                assert!(pair[0].end <= pair[1].start, "overlap in {source:?}");
            }
        }
    }

    #[test]
    fn render_should_convert_newlines_to_line_breaks() {
        assert_eq!(
            highlighter().render("H 0Q\n\nX 1Q"),
            concat!(
                r#"<span class="func">H</span> <span class="address">0Q</span>"#,
                "<br /><br />",
                r#"<span class="func">X</span> <span class="address">1Q</span>"#
            )
        );
    }

    #[test]
    fn render_should_escape_only_first_angle_brackets() {
        let source = "CNOT 0Q, 1Q # makes |00> or |11>, <a<b";
        let rendered = highlighter().render(source);
        assert!(rendered.contains("|00&gt; or |11>"));
        assert!(rendered.contains("&lt;a<b"));
    }

    #[test]
    fn stripped_markup_should_reproduce_escaped_source() {
        let sources = [
            "H 0Q",
            "mov 5 # add 3",
            "alloc 2Q(0)\nM 0Q, 2b # <x> <y>",
            "   spaced   out   ",
            "no highlights here",
        ];
        let hl = highlighter();

        for source in sources {
            assert_eq!(strip_markup(&hl.render(source)), escape_first(source));
        }
    }

    #[test]
    fn escape_first_should_touch_one_of_each() {
        assert_eq!(escape_first("<<>>"), "&lt;<&gt;>");
        assert_eq!(escape_first("plain"), "plain");
    }
}
