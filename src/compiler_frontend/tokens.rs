use crate::compiler_frontend::string_interning::{StringId, StringTable};
use serde::Serialize;

/// Numeric payload the lexer attaches to literal tokens.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub enum TokenValue {
    None,
    Int(i64),
    Float(f64),
}

/// A token record as produced by the lexer.
/// The lexeme is interned, the numeric value is only meaningful for literals.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Token {
    pub lexeme: StringId,
    pub value: TokenValue,
}

impl Token {
    pub fn new(lexeme: StringId) -> Self {
        Token {
            lexeme,
            value: TokenValue::None,
        }
    }

    pub fn named(name: &str, string_table: &mut StringTable) -> Self {
        Token::new(string_table.intern(name))
    }

    pub fn int(value: i64, string_table: &mut StringTable) -> Self {
        Token {
            lexeme: string_table.get_or_intern(value.to_string()),
            value: TokenValue::Int(value),
        }
    }

    /// A float token with an explicit lexeme.
    /// Folded literals pass their canonical text here.
    pub fn float(value: f64, lexeme: StringId) -> Self {
        Token {
            lexeme,
            value: TokenValue::Float(value),
        }
    }

    /// The numeric value widened to f64, if this is a literal token.
    pub fn numeric_value(&self) -> Option<f64> {
        match self.value {
            TokenValue::Int(value) => Some(value as f64),
            TokenValue::Float(value) => Some(value),
            TokenValue::None => None,
        }
    }
}
