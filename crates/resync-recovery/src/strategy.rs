//! The default syntax-error recovery strategy.
//!
//! Recovery goes through three steps whenever the parser trips over its
//! input:
//!
//! 1. **Report** (`report_error`): emit one diagnostic and enter recovery
//!    mode. While in recovery mode further errors are silent, so one root
//!    cause produces one message. The parser leaves recovery mode by
//!    matching a token (`end_error_condition`).
//! 2. **Inline repair** (`recover_inline`): when a single expected token is
//!    missing from the input, try deleting one stray token or (opt-in)
//!    inserting the expected one.
//! 3. **Resynchronize** (`recover`): skip tokens until one that some rule on
//!    the call chain can continue with.
//!
//! # Recovery sets
//!
//! For
//!
//! ```text
//! a : '[' b ']' | '(' b ')' ;
//! b : c '^' INT ;
//! c : ID | INT ;
//! ```
//!
//! and input `[]`, the call chain at the error is `a -> b -> c`. Syncing to
//! FOLLOW(c) = {'^'} alone would skip to end of input; the recovery set is
//! the union of what may follow each call on the chain, {']', '^'}. `']'` is
//! in the set so nothing is consumed, `c` and `b` unwind with (suppressed)
//! errors of their own, and `a` matches the `']'`.
//!
//! # Termination
//!
//! `recover` can consume nothing when the current token is already in the
//! recovery set. If the parser then fails again at the same token index in a
//! state it already recovered from, the second `recover` consumes one token
//! before resynchronizing, so the index always moves forward.

use crate::display::{
    extraneous_input_message, failed_predicate_message, input_mismatch_message,
    missing_token_message, no_viable_alternative_message, token_error_display,
};
use crate::error::RecognitionError;
use crate::options::{InsertionPolicy, RecoveryOptions};
use crate::recognizer::Recognizer;
use resync_atn::StateIndex;
use resync_common::limits::MAX_RULE_CHAIN_DEPTH;
use resync_common::{IntervalSet, Token, TokenCursor, TokenType, channel, token_type};
use rustc_hash::FxHashSet;
use std::fmt;

// =============================================================================
// Strategy trait
// =============================================================================

/// How a recognizer reports and recovers from syntax errors.
pub trait ErrorStrategy<R: Recognizer> {
    /// Forget all recovery state before a new parse.
    fn reset(&mut self);

    /// Report `error` unless a diagnostic was already emitted for the
    /// current error episode. Never fails.
    fn report_error(&mut self, recognizer: &mut R, error: &RecognitionError);

    /// Resynchronize after a rule-level error. Never fails.
    fn recover(&mut self, recognizer: &mut R);

    /// Repair a single-token mismatch, returning the token that stands in
    /// for the expected one.
    fn recover_inline(&mut self, recognizer: &mut R) -> Result<Token, RecognitionError>;

    /// Called before decisions inside loops and optional blocks.
    fn sync(&mut self, recognizer: &mut R);

    fn in_error_recovery_mode(&self) -> bool;

    /// The parser matched a token; the error episode is over.
    fn end_error_condition(&mut self);
}

// =============================================================================
// Recovery state
// =============================================================================

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RecoveryState {
    /// Set on the first error of an episode, cleared by a successful match.
    pub in_recovery_mode: bool,
    /// Token index at the last `recover`.
    pub last_error_index: Option<usize>,
    /// Automaton states `recover` has run in, `StateIndex::NONE` included.
    pub last_error_states: FxHashSet<StateIndex>,
}

/// What the insertion predicate gets to look at.
#[derive(Debug)]
pub struct MissingTokenQuery<'q> {
    /// Type of the current token.
    pub lookahead: TokenType,
    /// Tokens expected instead of it.
    pub expected: &'q IntervalSet,
    /// Tokens that may follow the expected one, when known.
    pub follow: Option<&'q IntervalSet>,
}

type MissingTokenPredicate = Box<dyn Fn(&MissingTokenQuery<'_>) -> bool>;

// =============================================================================
// DefaultErrorStrategy
// =============================================================================

#[derive(Default)]
pub struct DefaultErrorStrategy {
    state: RecoveryState,
    options: RecoveryOptions,
    missing_token_predicate: Option<MissingTokenPredicate>,
}

impl fmt::Debug for DefaultErrorStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DefaultErrorStrategy")
            .field("state", &self.state)
            .field("options", &self.options)
            .field(
                "missing_token_predicate",
                &self.missing_token_predicate.is_some(),
            )
            .finish()
    }
}

impl DefaultErrorStrategy {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: RecoveryOptions) -> Self {
        Self {
            options,
            ..Self::default()
        }
    }

    /// Replace the insertion decision of `recover_inline`. Takes precedence
    /// over `RecoveryOptions::insertion`.
    #[must_use]
    pub fn with_missing_token_predicate(
        mut self,
        predicate: impl Fn(&MissingTokenQuery<'_>) -> bool + 'static,
    ) -> Self {
        self.missing_token_predicate = Some(Box::new(predicate));
        self
    }

    pub fn options(&self) -> &RecoveryOptions {
        &self.options
    }

    pub fn recovery_state(&self) -> &RecoveryState {
        &self.state
    }

    // -------------------------------------------------------------------------
    // Reporting
    // -------------------------------------------------------------------------

    fn track_error<R: Recognizer>(&mut self, recognizer: &mut R) {
        recognizer.error_counter_mut().increment();
        self.state.in_recovery_mode = true;
    }

    pub fn report_no_viable_alternative<R: Recognizer>(
        &mut self,
        recognizer: &mut R,
        error: &RecognitionError,
    ) {
        if self.state.in_recovery_mode {
            return;
        }
        self.track_error(recognizer);

        let msg = no_viable_alternative_message(error.offending_token());
        let (line, column) = error.position();
        recognizer.notify_error_listeners(line, column, &msg, Some(error));
    }

    pub fn report_input_mismatch<R: Recognizer>(
        &mut self,
        recognizer: &mut R,
        error: &RecognitionError,
        expected: &IntervalSet,
    ) {
        if self.state.in_recovery_mode {
            return;
        }
        self.track_error(recognizer);

        let msg =
            input_mismatch_message(error.offending_token(), expected, recognizer.vocabulary());
        let (line, column) = error.position();
        recognizer.notify_error_listeners(line, column, &msg, Some(error));
    }

    pub fn report_failed_predicate<R: Recognizer>(
        &mut self,
        recognizer: &mut R,
        error: &RecognitionError,
        rule_index: usize,
        predicate_text: &str,
    ) {
        if self.state.in_recovery_mode {
            return;
        }
        self.track_error(recognizer);

        let rule_name = recognizer
            .rule_name(rule_index)
            .map(str::to_string)
            .unwrap_or_else(|| rule_index.to_string());
        let msg = failed_predicate_message(&rule_name, predicate_text);
        let (line, column) = error.position();
        recognizer.notify_error_listeners(line, column, &msg, Some(error));
    }

    /// Report the current token as extraneous.
    pub fn report_unwanted_token<R: Recognizer>(
        &mut self,
        recognizer: &mut R,
        expected: &IntervalSet,
    ) {
        if self.state.in_recovery_mode {
            return;
        }
        self.track_error(recognizer);

        let token = recognizer.current_token().cloned();
        let msg = extraneous_input_message(token.as_ref(), expected, recognizer.vocabulary());
        let (line, column) = position_of(token.as_ref());
        recognizer.notify_error_listeners(line, column, &msg, None);
    }

    /// Report that an expected token is missing before the current one.
    pub fn report_missing_token<R: Recognizer>(
        &mut self,
        recognizer: &mut R,
        expected: &IntervalSet,
    ) {
        if self.state.in_recovery_mode {
            return;
        }
        self.track_error(recognizer);

        let token = recognizer.current_token().cloned();
        let msg = missing_token_message(token.as_ref(), expected, recognizer.vocabulary());
        let (line, column) = position_of(token.as_ref());
        recognizer.notify_error_listeners(line, column, &msg, None);
    }

    // -------------------------------------------------------------------------
    // Resynchronization
    // -------------------------------------------------------------------------

    /// Union of the follow sets of every rule invocation on the call chain.
    pub fn compute_error_recovery_set<R: Recognizer>(&self, recognizer: &R) -> IntervalSet {
        let frames = recognizer.rule_stack();
        let oracle = recognizer.oracle();
        let mut recover_set = IntervalSet::new();

        for (_, frame) in frames
            .ancestors(recognizer.context())
            .take(MAX_RULE_CHAIN_DEPTH)
        {
            if frame.invoking_state.is_none() {
                break;
            }
            let follow = oracle.next_tokens_after_rule_return(frame.invoking_state);
            recover_set.add_all(&follow);
        }

        if self.options.trace_recovery_set {
            tracing::debug!(
                recover_set = %recover_set.to_string_with(recognizer.vocabulary()),
                "computed error recovery set"
            );
        }
        recover_set
    }

    /// Consume tokens until the current one is in `set` or is EOF. Returns
    /// the number of tokens consumed.
    pub fn consume_until<R: Recognizer>(&self, recognizer: &mut R, set: &IntervalSet) -> usize {
        let mut consumed = 0usize;
        loop {
            let ttype = recognizer.input().la(1);
            if ttype == token_type::EOF || set.contains(ttype) {
                break;
            }
            if let Some(budget) = self.options.max_recovery_consume {
                if consumed >= budget {
                    tracing::debug!(budget, "recovery consumption budget exhausted");
                    break;
                }
            }
            tracing::trace!(token_type = ttype, "consume during recover");
            recognizer.input_mut().consume();
            consumed += 1;
        }
        consumed
    }

    // -------------------------------------------------------------------------
    // Single-token repair
    // -------------------------------------------------------------------------

    /// Whether the current token is consistent with a missing expected token
    /// in front of it.
    pub fn mismatch_is_missing_token<R: Recognizer>(
        &self,
        recognizer: &R,
        expected: &IntervalSet,
    ) -> bool {
        if self.missing_token_predicate.is_none() && self.options.insertion == InsertionPolicy::Never
        {
            return false;
        }

        let follow = recognizer.oracle().next_tokens_after_match(
            recognizer.state(),
            recognizer.rule_stack(),
            recognizer.context(),
        );
        let query = MissingTokenQuery {
            lookahead: recognizer.input().la(1),
            expected,
            follow: follow.as_ref(),
        };

        match &self.missing_token_predicate {
            Some(predicate) => predicate(&query),
            None => query
                .follow
                .is_some_and(|follow| follow.contains(query.lookahead)),
        }
    }

    /// Build the token that stands in for a missing one.
    pub fn missing_symbol<R: Recognizer>(&self, recognizer: &R, expected: &IntervalSet) -> Token {
        let expected_type = expected.min_element().unwrap_or(token_type::INVALID);
        let text = if expected_type == token_type::EOF {
            "<missing EOF>".to_string()
        } else {
            format!(
                "<missing {}>",
                recognizer.vocabulary().display_name(expected_type)
            )
        };

        let current = recognizer.current_token();
        let anchor = match current {
            Some(token) if token.is_eof() => recognizer.input().lt(-1).or(current),
            _ => current,
        };
        let (line, column) = position_of(anchor);

        Token {
            token_type: expected_type,
            text: Some(text),
            line,
            column,
            channel: channel::DEFAULT,
            source: current.and_then(|token| token.source.clone()),
        }
    }
}

fn position_of(token: Option<&Token>) -> (u32, u32) {
    token
        .map(|token| (token.line, token.column))
        .unwrap_or((0, 0))
}

impl<R: Recognizer> ErrorStrategy<R> for DefaultErrorStrategy {
    fn reset(&mut self) {
        self.state = RecoveryState::default();
    }

    fn report_error(&mut self, recognizer: &mut R, error: &RecognitionError) {
        match error {
            RecognitionError::NoViableAlternative { .. } => {
                self.report_no_viable_alternative(recognizer, error);
            }
            RecognitionError::InputMismatch { expected, .. } => {
                self.report_input_mismatch(recognizer, error, expected);
            }
            RecognitionError::FailedPredicate {
                rule_index,
                predicate_text,
                ..
            } => {
                self.report_failed_predicate(recognizer, error, *rule_index, predicate_text);
            }
            RecognitionError::Unknown { description, .. } => {
                tracing::warn!(%description, "unknown recognition error type");
                let (line, column) = error.position();
                recognizer.notify_error_listeners(line, column, description, Some(error));
            }
        }
    }

    fn recover(&mut self, recognizer: &mut R) {
        let state = recognizer.state();
        if self.state.last_error_index == Some(recognizer.input().index())
            && self.state.last_error_states.contains(&state)
        {
            // Same token, same state as the previous recover: the current
            // token must be in the recovery set, so nothing got consumed.
            tracing::debug!(
                index = recognizer.input().index(),
                "no progress since last recovery; consuming one token"
            );
            recognizer.input_mut().consume();
        }

        self.state.last_error_index = Some(recognizer.input().index());
        self.state.last_error_states.insert(state);

        let follow_set = self.compute_error_recovery_set(&*recognizer);
        self.consume_until(recognizer, &follow_set);
    }

    fn recover_inline(&mut self, recognizer: &mut R) -> Result<Token, RecognitionError> {
        let expected = recognizer.expected_tokens();

        // Single-token deletion: the token after the current one is what we want.
        if self.options.single_token_deletion && expected.contains(recognizer.input().la(2)) {
            self.report_unwanted_token(recognizer, &expected);
            tracing::debug!(
                deleted = %token_error_display(recognizer.current_token()),
                "single-token deletion"
            );
            recognizer.input_mut().consume();
            let matched = recognizer.current_token().cloned();
            recognizer.input_mut().consume();
            if let Some(matched) = matched {
                return Ok(matched);
            }
        }

        if self.mismatch_is_missing_token(&*recognizer, &expected) {
            self.report_missing_token(recognizer, &expected);
            return Ok(self.missing_symbol(&*recognizer, &expected));
        }

        Err(RecognitionError::InputMismatch {
            offending_token: recognizer.current_token().cloned(),
            expected,
        })
    }

    fn sync(&mut self, _recognizer: &mut R) {}

    fn in_error_recovery_mode(&self) -> bool {
        self.state.in_recovery_mode
    }

    fn end_error_condition(&mut self) {
        self.state.in_recovery_mode = false;
    }
}
