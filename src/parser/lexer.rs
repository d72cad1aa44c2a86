//! Lexer for the constraint text syntax using logos

use logos::Logos;

/// Byte range in source text
pub type Span = std::ops::Range<usize>;

#[derive(Logos, Debug, Clone, PartialEq)]
#[logos(skip r"[ \t\n\r]+")]
pub enum Token {
    // Edge keywords
    #[token("top")]
    Top,
    #[token("right")]
    Right,
    #[token("bottom")]
    Bottom,
    #[token("left")]
    Left,

    // Extent keywords
    #[token("width")]
    Width,
    #[token("height")]
    Height,
    #[token("size")]
    Size,

    // Both spellings are accepted
    #[token("center")]
    #[token("centre")]
    Center,

    // Point fields
    #[token("x")]
    X,
    #[token("y")]
    Y,

    #[token("%")]
    Percent,
    #[token("-")]
    Minus,

    // Delimiters
    #[token("{")]
    BraceOpen,
    #[token("}")]
    BraceClose,
    #[token("(")]
    ParenOpen,
    #[token(")")]
    ParenClose,
    #[token(",")]
    Comma,
    #[token(":")]
    Colon,

    // Literals - identifiers must come after keywords
    #[regex(r"[a-zA-Z_][a-zA-Z0-9_]*", |lex| lex.slice().to_string(), priority = 1)]
    Ident(String),

    #[regex(r"[0-9]+(\.[0-9]+)?", |lex| lex.slice().parse::<f64>().ok())]
    Number(f64),

    // Comments (skip)
    #[regex(r"//[^\n]*", logos::skip)]
    LineComment,

    /// Text the lexer does not recognise; no grammar rule accepts it
    Error,
}

/// Lex input string into tokens with spans
///
/// Unrecognised text becomes [`Token::Error`] so the parser reports it.
pub fn lex(input: &str) -> impl Iterator<Item = (Token, Span)> + '_ {
    Token::lexer(input)
        .spanned()
        .map(|(tok, span)| (tok.unwrap_or(Token::Error), span))
}
