use std::io::{self, Read};

use crate::token::{Span, Token, TokenKind};
use crate::{Error, Result};

/// On-demand JSON tokenizer.
///
/// Reads one byte at a time from the underlying reader and produces one token
/// per call to [`Lexer::advance`]. The most recent token stays available
/// through [`Lexer::current`] until the next advance.
///
/// A scan that stops on a byte it does not own (the `,` after `12`, the `]`
/// after `true`) leaves that byte in a single-slot pushback buffer, where the
/// next scan picks it up.
pub struct Lexer<R> {
    bytes: io::Bytes<R>,
    pushback: Option<u8>,
    eof: bool,
    current: Token,
    pos: usize,
    line: usize,
    column: usize,
}

impl<R: Read> Lexer<R> {
    /// Create a lexer over the given reader.
    ///
    /// Until the first `advance`, `current()` is an end-of-input token at 1:1.
    pub fn new(reader: R) -> Self {
        Self {
            bytes: reader.bytes(),
            pushback: None,
            eof: false,
            current: Token::new(TokenKind::Eof, Span::new(0, 0, 1, 1)),
            pos: 0,
            line: 1,
            column: 1,
        }
    }

    /// The most recently produced token.
    pub fn current(&self) -> &Token {
        &self.current
    }

    /// Skip whitespace, scan exactly one token and make it the current token.
    ///
    /// At end of input this keeps returning `Eof`.
    pub fn advance(&mut self) -> Result<&Token> {
        self.skip_whitespace()?;

        let token = match self.peek()? {
            None => {
                let span = self.span_from(self.pos, self.line, self.column);
                Token::new(TokenKind::Eof, span)
            }
            Some(b'{') => self.single(TokenKind::LBrace),
            Some(b'}') => self.single(TokenKind::RBrace),
            Some(b'[') => self.single(TokenKind::LBracket),
            Some(b']') => self.single(TokenKind::RBracket),
            Some(b',') => self.single(TokenKind::Comma),
            Some(b':') => self.single(TokenKind::Colon),
            Some(b'"') => self.scan_string()?,
            Some(b) if b.is_ascii_digit() => self.scan_number()?,
            Some(b) if b.is_ascii_alphabetic() => self.scan_keyword()?,
            Some(b) => {
                let found = if b.is_ascii() {
                    format!("character {:?}", char::from(b))
                } else {
                    format!("byte 0x{b:02x}")
                };
                return Err(self.error_at(format!("unexpected {found}"), self.line, self.column));
            }
        };

        self.current = token;
        Ok(&self.current)
    }

    /// Require the current token to be of `kind`, then advance past it.
    ///
    /// Returns the new current token.
    pub fn expect(&mut self, kind: TokenKind) -> Result<&Token> {
        if self.current.kind != kind {
            return Err(self.error(format!("expected {kind}, got {}", self.current.kind)));
        }
        self.advance()
    }

    /// Build a syntax error positioned at the current token.
    pub fn error(&self, message: String) -> Error {
        self.error_at(message, self.current.span.line, self.current.span.column)
    }

    // --- Scanners ---

    fn single(&mut self, kind: TokenKind) -> Token {
        let (start, line, column) = (self.pos, self.line, self.column);
        self.bump();
        Token::new(kind, self.span_from(start, line, column))
    }

    /// Scan a string literal. Content is taken verbatim up to the next `"`;
    /// backslashes have no special meaning.
    fn scan_string(&mut self) -> Result<Token> {
        let (start, line, column) = (self.pos, self.line, self.column);
        self.bump(); // consume opening quote

        let mut raw = Vec::new();
        loop {
            match self.next_byte()? {
                Some(b'"') => break,
                Some(b) => raw.push(b),
                None => return Err(self.error_at("malformed string".into(), line, column)),
            }
        }

        let text = String::from_utf8(raw)
            .map_err(|_| self.error_at("invalid UTF-8 in string".into(), line, column))?;
        Ok(Token::with_lexeme(
            TokenKind::String,
            text,
            self.span_from(start, line, column),
        ))
    }

    /// Scan a number: digits, optional `.digits`, optional exponent with an
    /// optional sign. The text is not validated here.
    fn scan_number(&mut self) -> Result<Token> {
        let (start, line, column) = (self.pos, self.line, self.column);
        let mut text = String::new();

        self.take_digits(&mut text)?;

        if self.peek()? == Some(b'.') {
            self.push_next(&mut text);
            self.take_digits(&mut text)?;
        }

        if matches!(self.peek()?, Some(b'e' | b'E')) {
            self.push_next(&mut text);
            if matches!(self.peek()?, Some(b'+' | b'-')) {
                self.push_next(&mut text);
            }
            self.take_digits(&mut text)?;
        }

        Ok(Token::with_lexeme(
            TokenKind::Number,
            text,
            self.span_from(start, line, column),
        ))
    }

    /// Scan a run of letters, which must spell `true` or `false`.
    fn scan_keyword(&mut self) -> Result<Token> {
        let (start, line, column) = (self.pos, self.line, self.column);
        let mut word = String::new();

        while matches!(self.peek()?, Some(b) if b.is_ascii_alphabetic()) {
            self.push_next(&mut word);
        }

        let kind = match word.as_str() {
            "true" => TokenKind::True,
            "false" => TokenKind::False,
            _ => return Err(self.error_at(format!("expected bool, got {word}"), line, column)),
        };
        Ok(Token::new(kind, self.span_from(start, line, column)))
    }

    fn take_digits(&mut self, text: &mut String) -> Result<()> {
        while matches!(self.peek()?, Some(b) if b.is_ascii_digit()) {
            self.push_next(text);
        }
        Ok(())
    }

    fn skip_whitespace(&mut self) -> Result<()> {
        while matches!(self.peek()?, Some(b) if is_whitespace(b)) {
            self.bump();
        }
        Ok(())
    }

    // --- Helpers ---

    /// Look at the next byte without consuming it, filling the pushback slot.
    ///
    /// The reader is not consulted again once it has reported end of input.
    fn peek(&mut self) -> Result<Option<u8>> {
        if self.pushback.is_none() && !self.eof {
            self.pushback = self.bytes.next().transpose()?;
            self.eof = self.pushback.is_none();
        }
        Ok(self.pushback)
    }

    /// Consume the byte in the pushback slot, updating the position.
    fn bump(&mut self) -> Option<u8> {
        let b = self.pushback.take()?;
        self.pos += 1;
        if b == b'\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
        Some(b)
    }

    fn next_byte(&mut self) -> Result<Option<u8>> {
        self.peek()?;
        Ok(self.bump())
    }

    /// Move an already-peeked ASCII byte onto `text`.
    fn push_next(&mut self, text: &mut String) {
        if let Some(b) = self.bump() {
            text.push(char::from(b));
        }
    }

    fn span_from(&self, start: usize, line: usize, column: usize) -> Span {
        Span::new(start, self.pos, line, column)
    }

    fn error_at(&self, message: String, line: usize, column: usize) -> Error {
        Error::Syntax {
            message,
            line,
            column,
        }
    }
}

impl<'a> Lexer<&'a [u8]> {
    /// Tokenize a whole source, up to and including the `Eof` token.
    pub fn tokenize(source: &'a str) -> Result<Vec<Token>> {
        let mut lexer = Lexer::new(source.as_bytes());
        let mut tokens = Vec::new();
        loop {
            let token = lexer.advance()?.clone();
            let done = token.kind == TokenKind::Eof;
            tokens.push(token);
            if done {
                return Ok(tokens);
            }
        }
    }
}

/// ASCII whitespace plus vertical tab.
fn is_whitespace(b: u8) -> bool {
    b.is_ascii_whitespace() || b == 0x0b
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    /// Helper: tokenize and return token kinds (ignoring spans).
    fn kinds(source: &str) -> Vec<TokenKind> {
        Lexer::tokenize(source)
            .unwrap()
            .into_iter()
            .map(|t| t.kind)
            .collect()
    }

    /// Helper: tokenize and return the lexemes of literal tokens.
    fn lexemes(source: &str) -> Vec<String> {
        Lexer::tokenize(source)
            .unwrap()
            .into_iter()
            .filter_map(|t| t.lexeme)
            .collect()
    }

    /// Helper: tokenize, expecting a syntax error, and return its message.
    fn error_message(source: &str) -> String {
        match Lexer::tokenize(source) {
            Err(Error::Syntax { message, .. }) => message,
            other => panic!("expected syntax error, got {other:?}"),
        }
    }

    // =========================================================================
    // Structure: empty input, punctuation, whitespace
    // =========================================================================

    #[test]
    fn test_empty_source() {
        assert_eq!(kinds(""), vec![TokenKind::Eof]);
    }

    #[test]
    fn test_whitespace_only() {
        assert_eq!(kinds(" \t\r\n\x0b\x0c "), vec![TokenKind::Eof]);
    }

    #[test]
    fn test_punctuation() {
        assert_eq!(
            kinds("{ } [ ] , :"),
            vec![
                TokenKind::LBrace,
                TokenKind::RBrace,
                TokenKind::LBracket,
                TokenKind::RBracket,
                TokenKind::Comma,
                TokenKind::Colon,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_punctuation_has_no_lexeme() {
        let toks = Lexer::tokenize("{}").unwrap();
        assert!(toks.iter().all(|t| t.lexeme.is_none()));
    }

    #[test]
    fn test_current_before_advance_is_eof() {
        let lexer = Lexer::new("[1]".as_bytes());
        assert_eq!(lexer.current().kind, TokenKind::Eof);
        assert_eq!(lexer.current().span.line, 1);
        assert_eq!(lexer.current().span.column, 1);
    }

    #[test]
    fn test_advance_after_eof_stays_eof() {
        let mut lexer = Lexer::new("".as_bytes());
        assert_eq!(lexer.advance().unwrap().kind, TokenKind::Eof);
        assert_eq!(lexer.advance().unwrap().kind, TokenKind::Eof);
        assert_eq!(lexer.current().kind, TokenKind::Eof);
    }

    // =========================================================================
    // Strings
    // =========================================================================

    #[test]
    fn test_simple_string() {
        assert_eq!(kinds("\"abc\""), vec![TokenKind::String, TokenKind::Eof]);
        assert_eq!(lexemes("\"abc\""), vec!["abc"]);
    }

    #[test]
    fn test_empty_string() {
        assert_eq!(lexemes("\"\""), vec![""]);
    }

    #[test]
    fn test_string_keeps_whitespace_and_punctuation() {
        assert_eq!(lexemes("\" a {b}: [c], \""), vec![" a {b}: [c], "]);
    }

    #[test]
    fn test_string_backslash_is_literal() {
        // The first quote always closes the string.
        assert_eq!(lexemes(r#"["a\"]"#), vec![r"a\"]);
        assert_eq!(
            kinds(r#"["a\"]"#),
            vec![
                TokenKind::LBracket,
                TokenKind::String,
                TokenKind::RBracket,
                TokenKind::Eof,
            ]
        );

        assert_eq!(lexemes(r#""a\n""#), vec![r"a\n"]);
    }

    #[test]
    fn test_string_utf8() {
        assert_eq!(lexemes("\"héllo\""), vec!["héllo"]);
    }

    #[test]
    fn test_unterminated_string() {
        assert_eq!(error_message("\"unterminated"), "malformed string");
    }

    #[test]
    fn test_unterminated_string_reports_opening_quote() {
        match Lexer::tokenize("[\n  \"abc") {
            Err(Error::Syntax { line, column, .. }) => {
                assert_eq!((line, column), (2, 3));
            }
            other => panic!("expected syntax error, got {other:?}"),
        }
    }

    #[test]
    fn test_invalid_utf8_string() {
        let mut lexer = Lexer::new(&b"\"\xff\""[..]);
        let err = lexer.advance().unwrap_err();
        assert_eq!(err.message(), Some("invalid UTF-8 in string"));
    }

    // =========================================================================
    // Numbers
    // =========================================================================

    #[test]
    fn test_integer() {
        assert_eq!(kinds("42"), vec![TokenKind::Number, TokenKind::Eof]);
        assert_eq!(lexemes("42"), vec!["42"]);
    }

    #[test]
    fn test_fraction() {
        assert_eq!(lexemes("3.25"), vec!["3.25"]);
    }

    #[test]
    fn test_exponent() {
        assert_eq!(lexemes("1.5e-10"), vec!["1.5e-10"]);
        assert_eq!(lexemes("2E+3"), vec!["2E+3"]);
        assert_eq!(lexemes("7e2"), vec!["7e2"]);
    }

    #[test]
    fn test_number_shape_not_validated() {
        assert_eq!(lexemes("1."), vec!["1."]);
        assert_eq!(lexemes("1e"), vec!["1e"]);
    }

    #[test]
    fn test_number_terminator_is_redelivered() {
        assert_eq!(
            kinds("12,3]"),
            vec![
                TokenKind::Number,
                TokenKind::Comma,
                TokenKind::Number,
                TokenKind::RBracket,
                TokenKind::Eof,
            ]
        );
        assert_eq!(lexemes("12,3]"), vec!["12", "3"]);
    }

    #[test]
    fn test_leading_minus_rejected() {
        assert_eq!(error_message("-1"), "unexpected character '-'");
    }

    // =========================================================================
    // Keywords
    // =========================================================================

    #[test]
    fn test_booleans() {
        assert_eq!(
            kinds("true false"),
            vec![TokenKind::True, TokenKind::False, TokenKind::Eof]
        );
    }

    #[test]
    fn test_keyword_terminator_is_redelivered() {
        assert_eq!(
            kinds("[true]"),
            vec![
                TokenKind::LBracket,
                TokenKind::True,
                TokenKind::RBracket,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_null_rejected() {
        assert_eq!(error_message("null"), "expected bool, got null");
    }

    #[test]
    fn test_keyword_prefix_rejected() {
        assert_eq!(error_message("truex"), "expected bool, got truex");
        assert_eq!(error_message("tru"), "expected bool, got tru");
    }

    // =========================================================================
    // Errors and positions
    // =========================================================================

    #[test]
    fn test_unexpected_character() {
        assert_eq!(error_message("@"), "unexpected character '@'");
    }

    #[test]
    fn test_unexpected_non_ascii_byte() {
        assert_eq!(error_message("é"), "unexpected byte 0xc3");
    }

    #[test]
    fn test_unexpected_character_position() {
        match Lexer::tokenize("{\n  #") {
            Err(Error::Syntax { line, column, .. }) => assert_eq!((line, column), (2, 3)),
            other => panic!("expected syntax error, got {other:?}"),
        }
    }

    #[test]
    fn test_token_spans() {
        let toks = Lexer::tokenize("[\n \"ab\"]").unwrap();
        assert_eq!(toks[0].span, Span::new(0, 1, 1, 1));
        assert_eq!(toks[1].span, Span::new(3, 7, 2, 2));
        assert_eq!(toks[2].span, Span::new(7, 8, 2, 6));
    }

    #[test]
    fn test_expect_match_advances() {
        let mut lexer = Lexer::new("[1]".as_bytes());
        lexer.advance().unwrap();
        let next = lexer.expect(TokenKind::LBracket).unwrap();
        assert_eq!(next.kind, TokenKind::Number);
        assert_eq!(next.text(), "1");
    }

    #[test]
    fn test_expect_mismatch() {
        let mut lexer = Lexer::new("[1]".as_bytes());
        lexer.advance().unwrap();
        let err = lexer.expect(TokenKind::LBrace).unwrap_err();
        assert_eq!(err.message(), Some("expected '{', got '['"));
        // Current token is left in place.
        assert_eq!(lexer.current().kind, TokenKind::LBracket);
    }

    #[test]
    fn test_error_display() {
        let err = Lexer::tokenize("?").unwrap_err();
        assert_eq!(
            err.to_string(),
            "Syntax error at line 1, column 1: unexpected character '?'"
        );
    }

    /// Serves `data` once, then counts how often it is asked for more.
    struct DrainedReader {
        data: &'static [u8],
        reads_after_end: usize,
    }

    impl Read for DrainedReader {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            if self.data.is_empty() {
                self.reads_after_end += 1;
                return Ok(0);
            }
            let n = buf.len().min(self.data.len());
            buf[..n].copy_from_slice(&self.data[..n]);
            self.data = &self.data[n..];
            Ok(n)
        }
    }

    #[test]
    fn test_end_of_input_read_once() {
        let mut reader = DrainedReader {
            data: b"1",
            reads_after_end: 0,
        };
        {
            let mut lexer = Lexer::new(&mut reader);
            assert_eq!(lexer.advance().unwrap().kind, TokenKind::Number);
            assert_eq!(lexer.advance().unwrap().kind, TokenKind::Eof);
            assert_eq!(lexer.advance().unwrap().kind, TokenKind::Eof);
            assert_eq!(lexer.advance().unwrap().kind, TokenKind::Eof);
        }
        assert_eq!(reader.reads_after_end, 1);
    }

    struct FailingReader;

    impl Read for FailingReader {
        fn read(&mut self, _buf: &mut [u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::Other, "boom"))
        }
    }

    #[test]
    fn test_read_error_is_io() {
        let mut lexer = Lexer::new(FailingReader);
        let err = lexer.advance().unwrap_err();
        assert!(matches!(err, Error::Io(_)));
        assert_eq!(err.message(), None);
    }
}
