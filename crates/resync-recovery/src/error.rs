//! Syntax error kinds raised by a recognizer.

use crate::display::token_error_display;
use resync_common::diagnostics::diagnostic_codes;
use resync_common::{IntervalSet, Token};
use thiserror::Error;

/// A syntax error detected while matching input.
///
/// The `Display` form uses numeric token types; messages meant for users are
/// rendered by the error strategy against the recognizer's vocabulary.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum RecognitionError {
    /// No alternative of a decision matches the upcoming input.
    #[error("no viable alternative at input {}", token_error_display(.offending_token.as_ref()))]
    NoViableAlternative { offending_token: Option<Token> },

    /// The current token is not one of the tokens expected here.
    #[error(
        "mismatched input {} expecting {expected}",
        token_error_display(.offending_token.as_ref())
    )]
    InputMismatch {
        offending_token: Option<Token>,
        expected: IntervalSet,
    },

    /// A semantic predicate evaluated to false.
    #[error("rule {rule_index} failed predicate: {{{predicate_text}}}?")]
    FailedPredicate {
        rule_index: usize,
        predicate_text: String,
        offending_token: Option<Token>,
    },

    /// Anything outside the kinds above.
    #[error("{description}")]
    Unknown {
        description: String,
        offending_token: Option<Token>,
    },
}

impl RecognitionError {
    pub fn offending_token(&self) -> Option<&Token> {
        match self {
            RecognitionError::NoViableAlternative { offending_token }
            | RecognitionError::InputMismatch {
                offending_token, ..
            }
            | RecognitionError::FailedPredicate {
                offending_token, ..
            }
            | RecognitionError::Unknown {
                offending_token, ..
            } => offending_token.as_ref(),
        }
    }

    /// `(line, column)` of the offending token, `(0, 0)` when unknown.
    pub fn position(&self) -> (u32, u32) {
        self.offending_token()
            .map(|token| (token.line, token.column))
            .unwrap_or((0, 0))
    }

    /// Diagnostic code for this error kind.
    pub fn code(&self) -> u32 {
        match self {
            RecognitionError::NoViableAlternative { .. } => {
                diagnostic_codes::NO_VIABLE_ALTERNATIVE_AT_INPUT
            }
            RecognitionError::InputMismatch { .. } => diagnostic_codes::MISMATCHED_INPUT_EXPECTING,
            RecognitionError::FailedPredicate { .. } => diagnostic_codes::RULE_FAILED_PREDICATE,
            RecognitionError::Unknown { .. } => diagnostic_codes::UNKNOWN_RECOGNITION_ERROR,
        }
    }
}
