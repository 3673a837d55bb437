//! minijson Parser
//!
//! Builds an owned [`Value`] tree from a JSON document using recursive descent
//! over the on-demand token stream of `minijson-lexer`.
//!
//! # Example
//!
//! ```
//! let doc = minijson_parser::parse_str(r#"[{"_id":"abc123"}]"#).unwrap();
//! let id = doc.at(0).and_then(|v| v.get("_id")).and_then(|v| v.as_str());
//! assert_eq!(id, Some("abc123"));
//! ```

pub mod parser;
pub mod value;

pub use minijson_lexer::{Error, Result};
pub use parser::{parse, parse_str, Parser, MAX_DEPTH};
pub use value::Value;
