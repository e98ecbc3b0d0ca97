//! Token cursor abstraction and a list-backed implementation.

use crate::token::{Token, TokenType, token_type};

/// Lookahead and consumption over a token sequence.
///
/// Offsets follow the usual parser convention: `1` is the current
/// (not yet consumed) token, `2` the one after it, `-1` the most recently
/// consumed token. Offset `0` is undefined.
pub trait TokenCursor {
    /// Token type at `offset`, or `INVALID` outside the stream.
    fn la(&self, offset: isize) -> TokenType {
        self.lt(offset)
            .map(|token| token.token_type)
            .unwrap_or(token_type::INVALID)
    }

    /// Token at `offset`.
    fn lt(&self, offset: isize) -> Option<&Token>;

    /// Advance past the current token.
    fn consume(&mut self);

    /// Position of the current token.
    fn index(&self) -> usize;
}

/// A fully materialized token sequence.
///
/// The buffer always ends with an EOF token; lookahead past the end keeps
/// returning it and consuming it is a no-op.
#[derive(Clone, Debug)]
pub struct TokenBuffer {
    tokens: Vec<Token>,
    position: usize,
}

impl TokenBuffer {
    pub fn new(mut tokens: Vec<Token>) -> Self {
        if !tokens.last().is_some_and(Token::is_eof) {
            let eof = match tokens.last() {
                Some(last) => Token::eof(last.line, last.column.saturating_add(last.text_len())),
                None => Token::eof(1, 0),
            };
            tokens.push(eof);
        }
        Self {
            tokens,
            position: 0,
        }
    }

    /// Build a buffer of text-less tokens, one per line, from bare type codes.
    pub fn from_types(types: &[TokenType]) -> Self {
        let tokens = types
            .iter()
            .zip(1u32..)
            .map(|(&token_type, line)| Token::without_text(token_type).at(line, 0))
            .collect();
        Self::new(tokens)
    }

    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    /// Tokens not yet consumed, EOF included.
    pub fn remaining(&self) -> &[Token] {
        &self.tokens[self.position..]
    }

    /// Move the cursor back to the first token.
    pub fn rewind(&mut self) {
        self.position = 0;
    }

    fn last_index(&self) -> usize {
        self.tokens.len() - 1
    }
}

impl TokenCursor for TokenBuffer {
    fn lt(&self, offset: isize) -> Option<&Token> {
        if offset == 0 {
            return None;
        }
        if offset < 0 {
            let back = offset.unsigned_abs();
            return self
                .position
                .checked_sub(back)
                .and_then(|index| self.tokens.get(index));
        }
        let index = (self.position + offset.unsigned_abs() - 1).min(self.last_index());
        self.tokens.get(index)
    }

    fn consume(&mut self) {
        if self.position < self.last_index() {
            self.position += 1;
        }
    }

    #[inline]
    fn index(&self) -> usize {
        self.position
    }
}
