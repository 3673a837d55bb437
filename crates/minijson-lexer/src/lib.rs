//! minijson Lexer
//!
//! Pulls bytes from a reader one at a time and turns them into tokens on demand.
//! Keeps a single token of lookahead (the "current" token) and one byte of pushback.
//!
//! # Example
//!
//! ```
//! use minijson_lexer::{Lexer, TokenKind};
//!
//! let mut lexer = Lexer::new("[1]".as_bytes());
//! assert_eq!(lexer.advance().unwrap().kind, TokenKind::LBracket);
//! ```

pub mod lexer;
pub mod token;

pub use lexer::Lexer;
pub use token::{Span, Token, TokenKind};

/// Error raised while tokenizing or parsing a document.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The input is not a document this grammar accepts.
    #[error("Syntax error at line {line}, column {column}: {message}")]
    Syntax {
        message: String,
        line: usize,
        column: usize,
    },

    /// The underlying reader failed.
    #[error("Read error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// The syntax error message, if this is a syntax error.
    pub fn message(&self) -> Option<&str> {
        match self {
            Error::Syntax { message, .. } => Some(message),
            Error::Io(_) => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
