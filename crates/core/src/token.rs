//! Token model for highlighted output.

/// Category of a classified span of Idio source text.
///
/// Categories are mutually exclusive per span. Whitespace is ordinary
/// [`TokenKind::Text`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    /// Line, block, or expression comment (including elision markers).
    Comment,
    /// Integer numeral, including radix-prefixed forms (`#d`, `#o`, `#x`).
    Integer,
    /// Floating-point numeral.
    Float,
    /// Double-quoted string literal.
    Str,
    /// Quoted symbol (`'name`).
    Symbol,
    /// Named constant (`#n`, `#t`, `#f`).
    Constant,
    /// Infix operator keyword matched in operator-leading position.
    Keyword,
    /// Infix operator or boolean connective following a symbol.
    Operator,
    /// Plain text, including whitespace.
    Text,
}

impl TokenKind {
    /// Short CSS class emitted by the HTML highlighter.
    ///
    /// Plain text carries no class and is emitted bare.
    pub fn css_class(self) -> &'static str {
        match self {
            TokenKind::Comment => "c",
            TokenKind::Integer => "mi",
            TokenKind::Float => "mf",
            TokenKind::Str => "s",
            TokenKind::Symbol => "ss",
            TokenKind::Constant => "no",
            TokenKind::Keyword => "k",
            TokenKind::Operator => "o",
            TokenKind::Text => "",
        }
    }
}

/// A classified span of source text.
///
/// `text` borrows from the scanned source; concatenating the `text` of every
/// token produced by one scan reproduces the input exactly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token<'a> {
    /// Category of the span.
    pub kind: TokenKind,
    /// Exact text of the span.
    pub text: &'a str,
    /// Byte offset of the span start in the source.
    pub start: usize,
}
