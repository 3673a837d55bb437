use std::fmt;

/// A position in the input, tracking line and column for error reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
    pub start: usize,
    pub end: usize,
    pub line: usize,
    pub column: usize,
}

impl Span {
    pub fn new(start: usize, end: usize, line: usize, column: usize) -> Self {
        Self {
            start,
            end,
            line,
            column,
        }
    }
}

/// Token classification for JSON input.
///
/// The set is closed: every token the lexer can produce is one of these kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    // Structure
    LBrace,
    RBrace,
    LBracket,
    RBracket,
    Comma,
    Colon,

    // Literals (lexeme carries the text)
    String,
    Number,

    // Keywords
    True,
    False,

    // End of input
    Eof,
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TokenKind::LBrace => "'{'",
            TokenKind::RBrace => "'}'",
            TokenKind::LBracket => "'['",
            TokenKind::RBracket => "']'",
            TokenKind::Comma => "','",
            TokenKind::Colon => "':'",
            TokenKind::String => "string",
            TokenKind::Number => "number",
            TokenKind::True => "true",
            TokenKind::False => "false",
            TokenKind::Eof => "end of input",
        };
        f.write_str(name)
    }
}

/// A token produced by the lexer.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    /// Raw text for `String` and `Number` tokens, `None` otherwise.
    pub lexeme: Option<String>,
    pub span: Span,
}

impl Token {
    pub fn new(kind: TokenKind, span: Span) -> Self {
        Self {
            kind,
            lexeme: None,
            span,
        }
    }

    pub fn with_lexeme(kind: TokenKind, lexeme: String, span: Span) -> Self {
        Self {
            kind,
            lexeme: Some(lexeme),
            span,
        }
    }

    /// The literal text, or `""` for tokens without a payload.
    pub fn text(&self) -> &str {
        self.lexeme.as_deref().unwrap_or("")
    }
}
