//! Recursive-descent parser for JSON documents.
//!
//! Grammar:
//! ```text
//! value  := object | array | string | number | boolean
//! object := '{' (string ':' value (',' string ':' value)*)? '}'
//! array  := '[' (value (',' value)*)? ']'
//! ```
//!
//! Container loops run until the closing delimiter (or end of input) shows up,
//! so a trailing comma before `}` or `]` is accepted.
//!
//! Containers may nest at most [`MAX_DEPTH`] levels deep.

use std::collections::HashMap;
use std::io::Read;

use minijson_lexer::{Lexer, Result, TokenKind};

use crate::value::Value;

/// Deepest container nesting accepted before parsing fails.
pub const MAX_DEPTH: usize = 512;

/// Parse one complete document from a reader.
///
/// Anything after the root value is left unread.
pub fn parse<R: Read>(reader: R) -> Result<Value> {
    let mut lexer = Lexer::new(reader);
    lexer.advance()?;
    Parser::new(lexer).parse_value()
}

/// Parse one complete document held in memory.
pub fn parse_str(source: &str) -> Result<Value> {
    parse(source.as_bytes())
}

/// JSON value parser.
///
/// Holds nothing but its lexer; dispatch is driven entirely by the lexer's
/// current token.
pub struct Parser<R> {
    lexer: Lexer<R>,
}

impl<R: Read> Parser<R> {
    /// Wrap a lexer that has already been advanced onto the first token.
    pub fn new(lexer: Lexer<R>) -> Self {
        Self { lexer }
    }

    /// Parse the value starting at the current token.
    pub fn parse_value(&mut self) -> Result<Value> {
        self.parse_value_at(0)
    }

    /// `depth` counts the containers already open around this value.
    fn parse_value_at(&mut self, depth: usize) -> Result<Value> {
        match self.lexer.current().kind {
            TokenKind::LBrace | TokenKind::LBracket if depth >= MAX_DEPTH => {
                Err(self.lexer.error("nesting too deep".into()))
            }
            TokenKind::LBrace => self.parse_object(depth),
            TokenKind::LBracket => self.parse_array(depth),
            TokenKind::String => {
                let text = self.lexer.current().text().to_owned();
                self.lexer.expect(TokenKind::String)?;
                Ok(Value::String(text))
            }
            TokenKind::Number => {
                let text = self.lexer.current().text();
                let number: f64 = text
                    .parse()
                    .map_err(|_| self.lexer.error(format!("invalid number '{text}'")))?;
                self.lexer.expect(TokenKind::Number)?;
                Ok(Value::Number(number))
            }
            kind @ (TokenKind::True | TokenKind::False) => {
                self.lexer.advance()?;
                Ok(Value::Boolean(kind == TokenKind::True))
            }
            kind => Err(self.lexer.error(format!("unexpected token {kind}"))),
        }
    }

    /// Give back the lexer, positioned after the last parsed value.
    pub fn into_lexer(self) -> Lexer<R> {
        self.lexer
    }

    // =========================================================================
    // Containers
    // =========================================================================

    fn parse_object(&mut self, depth: usize) -> Result<Value> {
        self.lexer.expect(TokenKind::LBrace)?;
        let mut fields = HashMap::new();

        while !self.at_close(TokenKind::RBrace) {
            let key = self.lexer.current().text().to_owned();
            self.lexer.expect(TokenKind::String)?;
            self.lexer.expect(TokenKind::Colon)?;

            let value = self.parse_value_at(depth + 1)?;
            fields.insert(key, value);

            self.skip_comma()?;
        }

        self.lexer.expect(TokenKind::RBrace)?;
        Ok(Value::Object(fields))
    }

    fn parse_array(&mut self, depth: usize) -> Result<Value> {
        self.lexer.expect(TokenKind::LBracket)?;
        let mut items = Vec::new();

        while !self.at_close(TokenKind::RBracket) {
            items.push(self.parse_value_at(depth + 1)?);
            self.skip_comma()?;
        }

        self.lexer.expect(TokenKind::RBracket)?;
        Ok(Value::Array(items))
    }

    // --- Helpers ---

    fn at_close(&self, close: TokenKind) -> bool {
        let kind = self.lexer.current().kind;
        kind == close || kind == TokenKind::Eof
    }

    fn skip_comma(&mut self) -> Result<()> {
        if self.lexer.current().kind == TokenKind::Comma {
            self.lexer.expect(TokenKind::Comma)?;
        }
        Ok(())
    }
}
