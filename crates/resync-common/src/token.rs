//! Token values and the token-type name table.
//!
//! Tokens are plain values: the recovery code clones them when it needs to
//! hand one back to the parser, and synthesizes new ones (with the same shape)
//! when it pretends a missing token was present.

use serde::Serialize;
use std::sync::Arc;

/// Integer code identifying a token's lexical category.
pub type TokenType = i32;

/// Reserved token-type codes.
pub mod token_type {
    use super::TokenType;

    /// End of input. Always the last token of a stream.
    pub const EOF: TokenType = -1;
    /// Follow analysis marker: the end of the rule is reachable without a
    /// calling context.
    pub const EPSILON: TokenType = -2;
    /// Never produced by a lexer; returned for lookahead outside the stream.
    pub const INVALID: TokenType = 0;
    /// First code available to grammar-defined tokens.
    pub const MIN_USER_TOKEN_TYPE: TokenType = 1;
}

/// Token channels.
pub mod channel {
    /// Tokens the parser sees.
    pub const DEFAULT: u32 = 0;
}

/// An immutable lexed (or synthesized) token.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Token {
    pub token_type: TokenType,
    /// Source text; `None` when the lexer did not record any.
    pub text: Option<String>,
    /// 1-based line.
    pub line: u32,
    /// 0-based column within the line.
    pub column: u32,
    pub channel: u32,
    /// Name of the token source (usually the input file).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<Arc<str>>,
}

impl Token {
    /// Create a token with text on the default channel at `1:0`.
    pub fn new(token_type: TokenType, text: impl Into<String>) -> Self {
        Self {
            token_type,
            text: Some(text.into()),
            line: 1,
            column: 0,
            channel: channel::DEFAULT,
            source: None,
        }
    }

    /// Create a token that carries no text.
    pub fn without_text(token_type: TokenType) -> Self {
        Self {
            token_type,
            text: None,
            line: 1,
            column: 0,
            channel: channel::DEFAULT,
            source: None,
        }
    }

    /// Create an end-of-input token at the given position.
    pub fn eof(line: u32, column: u32) -> Self {
        Self::without_text(token_type::EOF).at(line, column)
    }

    #[must_use]
    pub fn at(mut self, line: u32, column: u32) -> Self {
        self.line = line;
        self.column = column;
        self
    }

    #[must_use]
    pub fn from_source(mut self, source: Arc<str>) -> Self {
        self.source = Some(source);
        self
    }

    #[inline]
    pub fn is_eof(&self) -> bool {
        self.token_type == token_type::EOF
    }

    /// Length of the token text in characters (0 when absent).
    pub fn text_len(&self) -> u32 {
        self.text
            .as_deref()
            .map(|text| u32::try_from(text.chars().count()).unwrap_or(u32::MAX))
            .unwrap_or(0)
    }
}

/// Human-readable names for token types.
///
/// Index `i` of each table describes token type `i`. A literal name is the
/// quoted spelling of a fixed token (`'('`); a symbolic name is the grammar's
/// token identifier (`ID`).
#[derive(Clone, Debug, Default)]
pub struct Vocabulary {
    literal_names: Vec<Option<String>>,
    symbolic_names: Vec<Option<String>>,
}

impl Vocabulary {
    pub fn new(literal_names: &[Option<&str>], symbolic_names: &[Option<&str>]) -> Self {
        let owned = |names: &[Option<&str>]| -> Vec<Option<String>> {
            names.iter().map(|name| name.map(str::to_string)).collect()
        };
        Self {
            literal_names: owned(literal_names),
            symbolic_names: owned(symbolic_names),
        }
    }

    /// Vocabulary with symbolic names only. Index 0 (`INVALID`) is left unnamed.
    pub fn from_symbolic_names(names: &[&str]) -> Self {
        let symbolic: Vec<Option<&str>> = std::iter::once(None)
            .chain(names.iter().copied().map(Some))
            .collect();
        Self::new(&[], &symbolic)
    }

    pub fn literal_name(&self, token_type: TokenType) -> Option<&str> {
        let index = usize::try_from(token_type).ok()?;
        self.literal_names.get(index)?.as_deref()
    }

    pub fn symbolic_name(&self, token_type: TokenType) -> Option<&str> {
        if token_type == token_type::EOF {
            return Some("EOF");
        }
        let index = usize::try_from(token_type).ok()?;
        self.symbolic_names.get(index)?.as_deref()
    }

    /// Literal name, else symbolic name, else the numeric code.
    pub fn display_name(&self, token_type: TokenType) -> String {
        self.literal_name(token_type)
            .or_else(|| self.symbolic_name(token_type))
            .map(str::to_string)
            .unwrap_or_else(|| token_type.to_string())
    }

    /// Highest token type with a name.
    pub fn max_token_type(&self) -> TokenType {
        let len = self.literal_names.len().max(self.symbolic_names.len());
        TokenType::try_from(len).unwrap_or(TokenType::MAX).saturating_sub(1)
    }
}
