//! The Idio syntax-highlighting lexer.
//!
//! A rule-ordered regular-expression scanner: at each position the rules of
//! the current scan state are tried strictly in declaration order and the
//! first match wins, regardless of match length. Reordering rules changes
//! behavior and is a breaking change.
//!
//! Block comments (`#* ... *#`), bar comments (`#| ... |#`), and expression
//! comments (`#;( ... )`) each push a named scan state onto an explicit
//! stack; their closers pop it. The kinds may interleave in nesting, but a
//! closer only matches its own opener kind.

use crate::token::{Token, TokenKind};
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::VecDeque;

/// A registered syntax-highlighting lexer.
pub trait Lexer {
    /// Registry name of the lexer (also used as a fence info string).
    fn name(&self) -> &'static str;

    /// Filename patterns this lexer claims (`*.ext` globs or exact names).
    fn filenames(&self) -> &'static [&'static str];

    /// Tokenize `source` into a lazy stream of classified spans.
    fn tokens<'a>(&self, source: &'a str) -> TokenStream<'a>;
}

/// Lexer for the Idio language.
#[derive(Debug, Default, Clone, Copy)]
pub struct IdioLexer;

impl Lexer for IdioLexer {
    fn name(&self) -> &'static str {
        "idio"
    }

    fn filenames(&self) -> &'static [&'static str] {
        &["*.diff"]
    }

    fn tokens<'a>(&self, source: &'a str) -> TokenStream<'a> {
        TokenStream::new(source)
    }
}

/// Named scan states of the lexer automaton.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ScanState {
    Root,
    BlockComment,
    BarComment,
    SexpComment,
}

/// State-stack transition attached to a rule.
#[derive(Debug, Clone, Copy)]
enum StateAction {
    Stay,
    Push(ScanState),
    Pop,
}

/// What a matched rule emits: the full span under one kind, or one token
/// per capture group.
enum Emit {
    Single(TokenKind),
    Groups(&'static [TokenKind]),
}

struct Rule {
    pattern: Regex,
    emit: Emit,
    action: StateAction,
}

impl Rule {
    fn single(pattern: &str, kind: TokenKind, action: StateAction) -> Self {
        Self {
            pattern: anchored(pattern),
            emit: Emit::Single(kind),
            action,
        }
    }

    fn groups(pattern: &str, kinds: &'static [TokenKind], action: StateAction) -> Self {
        Self {
            pattern: anchored(pattern),
            emit: Emit::Groups(kinds),
            action,
        }
    }
}

fn anchored(pattern: &str) -> Regex {
    Regex::new(&format!("^(?:{pattern})")).expect("rule patterns are static and must compile")
}

/// Characters valid in a quoted symbol: word characters plus `!$%*+/:<=>?@^~-`.
const VALID_SYMBOL: &str = r"[\w!$%*+/:<=>?@^~-]+";

static ROOT_RULES: Lazy<Vec<Rule>> = Lazy::new(|| {
    use StateAction::{Push, Stay};
    use TokenKind::*;
    vec![
        // comments
        Rule::single(r";[^\n]*", Comment, Stay),
        Rule::single(r"#\*", Comment, Push(ScanState::BlockComment)),
        Rule::single(r"#\|", Comment, Push(ScanState::BarComment)),
        Rule::single(r"#;\s*\(", Comment, Push(ScanState::SexpComment)),
        // ellipses mark elided example text
        Rule::single(r"\.\.\.[^\n]*", Comment, Stay),
        // whitespace is regular text
        Rule::single(r"\s+", Text, Stay),
        // numbers
        Rule::single(r"-?\d+\.\d+", Float, Stay),
        Rule::single(r"-?\d+", Integer, Stay),
        Rule::single(r"#d\d+", Integer, Stay),
        Rule::single(r"#o[0-7]+", Integer, Stay),
        Rule::single(r"#x[0-9a-fA-F]+", Integer, Stay),
        // strings
        Rule::single(r#""(?:\\\\|\\"|[^"])*""#, Str, Stay),
        Rule::single(&format!("'{VALID_SYMBOL}"), Symbol, Stay),
        // constants
        Rule::single(r"#n|#t|#f", Constant, Stay),
        // infix operator in operator-leading position, space-delimited
        Rule::groups(r"(:=|:~|:\*|:\$|=)( )", &[Keyword, Text], Stay),
        // symbol, whitespace, then an infix operator or boolean connective
        Rule::groups(
            r"(\S+)(\s+)(:=|:~|:\*|:\$|=|and\b|or\b)",
            &[Text, Text, Operator],
            Stay,
        ),
        // fallback: one character at a time
        Rule::single(r"(?s).", Text, Stay),
    ]
});

static BLOCK_COMMENT_RULES: Lazy<Vec<Rule>> = Lazy::new(|| {
    use StateAction::{Pop, Push, Stay};
    use TokenKind::Comment;
    vec![
        Rule::single(r"#\*", Comment, Push(ScanState::BlockComment)),
        Rule::single(r"\*#", Comment, Pop),
        Rule::single(r"#\|", Comment, Push(ScanState::BarComment)),
        Rule::single(r"[^#*]+", Comment, Stay),
        Rule::single(r"[#*]", Comment, Stay),
    ]
});

static BAR_COMMENT_RULES: Lazy<Vec<Rule>> = Lazy::new(|| {
    use StateAction::{Pop, Push, Stay};
    use TokenKind::Comment;
    vec![
        Rule::single(r"#\|", Comment, Push(ScanState::BarComment)),
        Rule::single(r"\|#", Comment, Pop),
        Rule::single(r"#\*", Comment, Push(ScanState::BlockComment)),
        Rule::single(r"[^#|]+", Comment, Stay),
        Rule::single(r"[#|]", Comment, Stay),
    ]
});

static SEXP_COMMENT_RULES: Lazy<Vec<Rule>> = Lazy::new(|| {
    use StateAction::{Pop, Push, Stay};
    use TokenKind::Comment;
    vec![
        Rule::single(r"\(", Comment, Push(ScanState::SexpComment)),
        Rule::single(r"\)", Comment, Pop),
        Rule::single(r"[^()]+", Comment, Stay),
    ]
});

fn rules_for(state: ScanState) -> &'static [Rule] {
    match state {
        ScanState::Root => ROOT_RULES.as_slice(),
        ScanState::BlockComment => BLOCK_COMMENT_RULES.as_slice(),
        ScanState::BarComment => BAR_COMMENT_RULES.as_slice(),
        ScanState::SexpComment => SEXP_COMMENT_RULES.as_slice(),
    }
}

/// Lazy stream of [`Token`]s over one source buffer.
///
/// Obtained from [`Lexer::tokens`]; each call starts a fresh scan, so the
/// sequence is restartable. Every input character appears in exactly one
/// token of the stream.
#[derive(Debug)]
pub struct TokenStream<'a> {
    source: &'a str,
    pos: usize,
    stack: Vec<ScanState>,
    queued: VecDeque<Token<'a>>,
}

impl<'a> TokenStream<'a> {
    fn new(source: &'a str) -> Self {
        Self {
            source,
            pos: 0,
            stack: vec![ScanState::Root],
            queued: VecDeque::new(),
        }
    }

    fn state(&self) -> ScanState {
        self.stack.last().copied().unwrap_or(ScanState::Root)
    }

    fn apply(&mut self, action: StateAction) {
        match action {
            StateAction::Stay => {}
            StateAction::Push(state) => self.stack.push(state),
            StateAction::Pop => {
                if self.stack.len() > 1 {
                    self.stack.pop();
                }
            }
        }
    }
}

impl<'a> Iterator for TokenStream<'a> {
    type Item = Token<'a>;

    fn next(&mut self) -> Option<Token<'a>> {
        loop {
            if let Some(token) = self.queued.pop_front() {
                return Some(token);
            }
            if self.pos >= self.source.len() {
                return None;
            }

            let rest = &self.source[self.pos..];
            let rules = rules_for(self.state());
            // Every state's table ends in a catch-all rule, so some rule
            // matches at every position.
            let (rule, caps) = rules
                .iter()
                .find_map(|rule| rule.pattern.captures(rest).map(|caps| (rule, caps)))?;

            let full = caps.get(0).expect("group 0 is the whole match");
            match &rule.emit {
                Emit::Single(kind) => {
                    self.queued.push_back(Token {
                        kind: *kind,
                        text: &self.source[self.pos..self.pos + full.end()],
                        start: self.pos,
                    });
                }
                Emit::Groups(kinds) => {
                    for (i, kind) in kinds.iter().enumerate() {
                        if let Some(group) = caps.get(i + 1) {
                            if !group.is_empty() {
                                self.queued.push_back(Token {
                                    kind: *kind,
                                    text: &self.source
                                        [self.pos + group.start()..self.pos + group.end()],
                                    start: self.pos + group.start(),
                                });
                            }
                        }
                    }
                }
            }

            let action = rule.action;
            self.pos += full.end();
            self.apply(action);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scan(source: &str) -> Vec<(TokenKind, &str)> {
        IdioLexer.tokens(source).map(|t| (t.kind, t.text)).collect()
    }

    /// Concatenating every token's text must reproduce the input, with
    /// contiguous, non-overlapping spans.
    fn assert_covers(source: &str) {
        let mut offset = 0;
        let mut rebuilt = String::new();
        for token in IdioLexer.tokens(source) {
            assert_eq!(token.start, offset, "gap or overlap at {offset} in {source:?}");
            offset += token.text.len();
            rebuilt.push_str(token.text);
        }
        assert_eq!(rebuilt, source);
    }

    #[test]
    fn coverage_partition_holds_for_varied_inputs() {
        for source in [
            "",
            "width := 10",
            "define (f x) {\n  x + 1\n}",
            "; a comment\ncode",
            "#* block #* nested *# tail *# after",
            "#| bar #* cross *# |# after",
            "#;(+ 1 (pair 2 3)) live",
            "#| unterminated",
            "#* unterminated too",
            "#;(no close",
            "\"open string",
            "#o8 #xZZ",
            "héllo wörld := 3",
            "...\n",
            "'sym '+ :~ x",
        ] {
            assert_covers(source);
        }
    }

    #[test]
    fn tokenizing_twice_is_deterministic() {
        let source = "#* c *# width := 10 ; done";
        assert_eq!(scan(source), scan(source));
    }

    #[test]
    fn stream_is_restartable() {
        let source = "width := 10";
        let mut first = IdioLexer.tokens(source);
        first.next();
        first.next();
        // A fresh stream starts over from the beginning.
        let restarted: Vec<_> = IdioLexer.tokens(source).collect();
        assert_eq!(restarted[0].text, "width");
        assert_eq!(restarted[0].start, 0);
    }

    #[test]
    fn operator_recognition_example() {
        assert_eq!(
            scan("width := 10"),
            vec![
                (TokenKind::Text, "width"),
                (TokenKind::Text, " "),
                (TokenKind::Operator, ":="),
                (TokenKind::Text, " "),
                (TokenKind::Integer, "10"),
            ]
        );
    }

    #[test]
    fn boolean_connectives_need_a_word_boundary() {
        assert_eq!(
            scan("a and b"),
            vec![
                (TokenKind::Text, "a"),
                (TokenKind::Text, " "),
                (TokenKind::Operator, "and"),
                (TokenKind::Text, " "),
                (TokenKind::Text, "b"),
            ]
        );
        // "android" must not be split into an operator.
        let tokens = scan("foo android");
        assert!(!tokens.contains(&(TokenKind::Operator, "and")));
    }

    #[test]
    fn operator_leading_position_is_a_keyword() {
        assert_eq!(
            scan(":= x"),
            vec![
                (TokenKind::Keyword, ":="),
                (TokenKind::Text, " "),
                (TokenKind::Text, "x"),
            ]
        );
    }

    #[test]
    fn radix_numerals_are_single_tokens() {
        assert_eq!(scan("#xFF"), vec![(TokenKind::Integer, "#xFF")]);
        assert_eq!(scan("#o17"), vec![(TokenKind::Integer, "#o17")]);
        assert_eq!(scan("#d42"), vec![(TokenKind::Integer, "#d42")]);
    }

    #[test]
    fn out_of_range_octal_digit_is_not_a_radix_numeral() {
        let tokens = scan("#o8");
        assert_ne!(tokens[0], (TokenKind::Integer, "#o8"));
        assert_covers("#o8");
    }

    #[test]
    fn plain_and_signed_numerals() {
        assert_eq!(scan("-42"), vec![(TokenKind::Integer, "-42")]);
        assert_eq!(scan("3.14"), vec![(TokenKind::Float, "3.14")]);
        assert_eq!(scan("-3.14"), vec![(TokenKind::Float, "-3.14")]);
    }

    #[test]
    fn string_with_escaped_quote_is_one_token() {
        assert_eq!(scan(r#""a\"b""#), vec![(TokenKind::Str, r#""a\"b""#)]);
    }

    #[test]
    fn string_with_escaped_backslash_is_one_token() {
        assert_eq!(scan(r#""a\\" x"#)[0], (TokenKind::Str, r#""a\\""#));
    }

    #[test]
    fn quoted_symbol() {
        assert_eq!(scan("'foo-bar?"), vec![(TokenKind::Symbol, "'foo-bar?")]);
    }

    #[test]
    fn named_constants() {
        assert_eq!(
            scan("#t #f #n"),
            vec![
                (TokenKind::Constant, "#t"),
                (TokenKind::Text, " "),
                (TokenKind::Constant, "#f"),
                (TokenKind::Text, " "),
                (TokenKind::Constant, "#n"),
            ]
        );
    }

    #[test]
    fn line_comment_runs_to_end_of_line() {
        assert_eq!(
            scan("; hi\nx"),
            vec![
                (TokenKind::Comment, "; hi"),
                (TokenKind::Text, "\n"),
                (TokenKind::Text, "x"),
            ]
        );
    }

    #[test]
    fn ellipsis_elision_marker_is_a_comment() {
        assert_eq!(
            scan("... elided\nnext"),
            vec![
                (TokenKind::Comment, "... elided"),
                (TokenKind::Text, "\n"),
                (TokenKind::Text, "next"),
            ]
        );
    }

    #[test]
    fn block_comments_nest_and_exit_at_the_outermost_closer() {
        let source = "#* a #* b *# c *# x";
        let tokens = scan(source);
        // Everything up to and including the final "*#" is comment.
        let comment_len = source.rfind("*#").unwrap() + 2;
        let mut seen = 0;
        for (kind, text) in &tokens {
            if seen < comment_len {
                assert_eq!(*kind, TokenKind::Comment, "inside comment: {text:?}");
            } else {
                assert_eq!(*kind, TokenKind::Text);
            }
            seen += text.len();
        }
        assert_covers(source);
    }

    #[test]
    fn bar_closer_does_not_close_block_comment() {
        // "|#" inside "#* ... *#" is plain comment text, not a closer.
        let tokens = scan("#* a |# b *# x");
        let last = tokens.last().unwrap();
        assert_eq!(*last, (TokenKind::Text, "x"));
        let before_last = &tokens[..tokens.len() - 2];
        assert!(before_last.iter().all(|(kind, _)| *kind == TokenKind::Comment));
    }

    #[test]
    fn comment_kinds_cross_nest() {
        // A "#*" comment inside "#| ... |#" must be closed by "*#" before
        // "|#" can close the outer comment.
        let source = "#| a #* b |# *# c |# x";
        let tokens = scan(source);
        assert_eq!(*tokens.last().unwrap(), (TokenKind::Text, "x"));
        let comment_len = source.rfind("|#").unwrap() + 2;
        let mut offset = 0;
        for token in IdioLexer.tokens(source) {
            if offset < comment_len {
                assert_eq!(token.kind, TokenKind::Comment, "at {offset}");
            }
            offset += token.text.len();
        }
    }

    #[test]
    fn expression_comment_tracks_balanced_parens() {
        let source = "#;(+ 1 (pair 2 3)) x";
        let tokens = scan(source);
        assert_eq!(*tokens.last().unwrap(), (TokenKind::Text, "x"));
        let comment_len = source.rfind(')').unwrap() + 1;
        let mut offset = 0;
        for token in IdioLexer.tokens(source) {
            if offset < comment_len {
                assert_eq!(token.kind, TokenKind::Comment, "at {offset}");
            }
            offset += token.text.len();
        }
    }

    #[test]
    fn expression_comment_allows_space_before_paren() {
        let tokens = scan("#; (x) y");
        assert_eq!(tokens[0].0, TokenKind::Comment);
        assert_eq!(*tokens.last().unwrap(), (TokenKind::Text, "y"));
    }

    #[test]
    fn unterminated_comments_consume_the_rest() {
        for source in ["#* never closed", "#| never closed", "#;(never closed"] {
            let tokens = scan(source);
            assert!(tokens.iter().all(|(kind, _)| *kind == TokenKind::Comment));
            assert_covers(source);
        }
    }

    #[test]
    fn every_state_consumes_arbitrary_bytes() {
        // Exhaustive case analysis over the character classes reachable in
        // each state: no input may stall the scanner.
        let nasty = "\u{0}\u{7f}\t\r\n\"'()#*|;.=~$";
        assert_covers(nasty);
        assert_covers(&format!("#*{nasty}"));
        assert_covers(&format!("#|{nasty}"));
        assert_covers(&format!("#;({nasty}"));
    }

    #[test]
    fn lexer_registration_metadata() {
        assert_eq!(IdioLexer.name(), "idio");
        assert_eq!(IdioLexer.filenames(), &["*.diff"]);
    }
}
