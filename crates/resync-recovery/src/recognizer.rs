//! The seams between error recovery and the parser that owns it.

use crate::error::RecognitionError;
use resync_atn::{FollowOracle, FrameIndex, RuleStack, StateIndex};
use resync_common::diagnostics::{
    Diagnostic, DiagnosticCategory, diagnostic_codes, get_diagnostic_category,
};
use resync_common::{IntervalSet, Token, TokenCursor, Vocabulary};

// =============================================================================
// Diagnostics
// =============================================================================

/// Receives formatted syntax errors.
pub trait DiagnosticSink {
    /// `cause` is `None` for errors the strategy detected on its own
    /// (extraneous or missing tokens).
    fn syntax_error(
        &mut self,
        line: u32,
        column: u32,
        message: &str,
        cause: Option<&RecognitionError>,
    );
}

/// Stores every reported error as a `Diagnostic`.
#[derive(Clone, Debug, Default)]
pub struct CollectingSink {
    diagnostics: Vec<Diagnostic>,
}

impl CollectingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub fn len(&self) -> usize {
        self.diagnostics.len()
    }

    pub fn is_empty(&self) -> bool {
        self.diagnostics.is_empty()
    }

    pub fn clear(&mut self) {
        self.diagnostics.clear();
    }
}

impl DiagnosticSink for CollectingSink {
    fn syntax_error(
        &mut self,
        line: u32,
        column: u32,
        message: &str,
        cause: Option<&RecognitionError>,
    ) {
        let code = cause
            .map(RecognitionError::code)
            .unwrap_or(diagnostic_codes::SYNTAX_ERROR);
        let diagnostic = match get_diagnostic_category(code) {
            Some(DiagnosticCategory::Warning) => {
                Diagnostic::warning(line, column, message.to_string(), code)
            }
            _ => Diagnostic::error(line, column, message.to_string(), code),
        };
        self.diagnostics.push(diagnostic);
    }
}

// =============================================================================
// Error counting
// =============================================================================

/// Per-session tally of reported syntax errors.
pub trait ErrorCounter {
    fn increment(&mut self);
    fn count(&self) -> usize;
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SyntaxErrorCounter {
    count: usize,
}

impl SyntaxErrorCounter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reset(&mut self) {
        self.count = 0;
    }
}

impl ErrorCounter for SyntaxErrorCounter {
    fn increment(&mut self) {
        self.count = self.count.saturating_add(1);
    }

    fn count(&self) -> usize {
        self.count
    }
}

// =============================================================================
// Recognizer
// =============================================================================

/// Everything an error strategy needs from the parser.
pub trait Recognizer {
    type Input: TokenCursor;

    fn input(&self) -> &Self::Input;
    fn input_mut(&mut self) -> &mut Self::Input;

    fn oracle(&self) -> &dyn FollowOracle;
    fn rule_stack(&self) -> &RuleStack;

    /// Current automaton state.
    fn state(&self) -> StateIndex;

    /// Frame of the rule currently being parsed.
    fn context(&self) -> FrameIndex {
        self.rule_stack().current()
    }

    fn rule_name(&self, rule_index: usize) -> Option<&str>;
    fn vocabulary(&self) -> &Vocabulary;

    fn notify_error_listeners(
        &mut self,
        line: u32,
        column: u32,
        message: &str,
        cause: Option<&RecognitionError>,
    );

    fn error_counter_mut(&mut self) -> &mut dyn ErrorCounter;

    /// The current (not yet consumed) token.
    fn current_token(&self) -> Option<&Token> {
        self.input().lt(1)
    }

    /// Tokens that may legally appear at the current state and call chain.
    fn expected_tokens(&self) -> IntervalSet {
        self.oracle()
            .next_tokens_in_context(self.state(), self.rule_stack(), self.context())
    }
}
