//! A reference recognizer that drives an error strategy.
//!
//! Hand-written or generated rule functions call into `Parser` the same way:
//!
//! ```text
//! fn b(p) {
//!     p.enter_rule(RULE_B);
//!     p.set_state(CALLS_C);  c(p);
//!     p.set_state(EXPECTS_CARET);
//!     if let Err(e) = p.match_token(CARET) { p.report_and_recover(&e); }
//!     p.exit_rule();
//! }
//! ```
//!
//! The automaton state must be set before every match and every rule call,
//! since follow sets are computed from it.

use crate::error::RecognitionError;
use crate::recognizer::{
    CollectingSink, DiagnosticSink, ErrorCounter, Recognizer, SyntaxErrorCounter,
};
use crate::strategy::{DefaultErrorStrategy, ErrorStrategy};
use resync_atn::{Atn, FollowOracle, RuleStack, StateIndex};
use resync_common::diagnostics::Diagnostic;
use resync_common::{Token, TokenCursor, TokenType, Vocabulary};

pub struct Parser<'a, C: TokenCursor, S = DefaultErrorStrategy> {
    input: C,
    atn: &'a Atn,
    rule_names: &'a [&'a str],
    vocabulary: &'a Vocabulary,
    frames: RuleStack,
    state: StateIndex,
    strategy: S,
    sink: CollectingSink,
    errors: SyntaxErrorCounter,
}

impl<'a, C: TokenCursor> Parser<'a, C> {
    pub fn new(
        input: C,
        atn: &'a Atn,
        rule_names: &'a [&'a str],
        vocabulary: &'a Vocabulary,
    ) -> Self {
        Self::with_strategy(input, atn, rule_names, vocabulary, DefaultErrorStrategy::new())
    }
}

impl<'a, C: TokenCursor, S> Parser<'a, C, S> {
    pub fn with_strategy(
        input: C,
        atn: &'a Atn,
        rule_names: &'a [&'a str],
        vocabulary: &'a Vocabulary,
        strategy: S,
    ) -> Self {
        Self {
            input,
            atn,
            rule_names,
            vocabulary,
            frames: RuleStack::new(),
            state: StateIndex::NONE,
            strategy,
            sink: CollectingSink::new(),
            errors: SyntaxErrorCounter::new(),
        }
    }

    pub fn strategy(&self) -> &S {
        &self.strategy
    }

    /// Enter `rule_index`, invoked from the current state. The first rule
    /// entered is the start rule and has no invoking state.
    pub fn enter_rule(&mut self, rule_index: usize) {
        let invoking_state = if self.frames.is_empty() {
            StateIndex::NONE
        } else {
            self.state
        };
        self.frames.push(rule_index, invoking_state);
        self.state = self
            .atn
            .rule_start_state(rule_index)
            .unwrap_or(StateIndex::NONE);
    }

    /// Leave the current rule; the state returns to the invoking state.
    pub fn exit_rule(&mut self) {
        if let Some(frame) = self.frames.pop() {
            self.state = frame.invoking_state;
        }
    }

    #[inline]
    pub fn set_state(&mut self, state: StateIndex) {
        self.state = state;
    }

    pub fn la(&self, offset: isize) -> TokenType {
        self.input.la(offset)
    }

    pub fn number_of_syntax_errors(&self) -> usize {
        self.errors.count()
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        self.sink.diagnostics()
    }

    /// A `NoViableAlternative` error at the current token, for decisions
    /// where no alternative predicts the lookahead.
    pub fn no_viable_alternative(&self) -> RecognitionError {
        RecognitionError::NoViableAlternative {
            offending_token: self.input.lt(1).cloned(),
        }
    }

    pub fn into_input(self) -> C {
        self.input
    }
}

impl<'a, C, S> Parser<'a, C, S>
where
    C: TokenCursor,
    S: ErrorStrategy<Parser<'a, C, S>> + Default,
{
    /// Run `f` with the strategy moved out of `self`, so it can borrow the
    /// parser mutably.
    fn with_strategy_taken<T>(&mut self, f: impl FnOnce(&mut S, &mut Self) -> T) -> T {
        let mut strategy = std::mem::take(&mut self.strategy);
        let result = f(&mut strategy, self);
        self.strategy = strategy;
        result
    }

    /// Match the current token against `ttype` and consume it. On mismatch
    /// the strategy gets a chance to repair the input inline.
    pub fn match_token(&mut self, ttype: TokenType) -> Result<Token, RecognitionError> {
        if self.input.la(1) == ttype {
            let token = self.input.lt(1).cloned();
            if let Some(token) = token {
                self.strategy.end_error_condition();
                self.input.consume();
                return Ok(token);
            }
        }
        self.with_strategy_taken(|strategy, parser| strategy.recover_inline(parser))
    }

    /// Report `error` and resynchronize; used by rule functions when
    /// `match_token` or a decision fails.
    pub fn report_and_recover(&mut self, error: &RecognitionError) {
        self.with_strategy_taken(|strategy, parser| {
            strategy.report_error(parser, error);
            strategy.recover(parser);
        });
    }

    pub fn sync(&mut self) {
        self.with_strategy_taken(|strategy, parser| strategy.sync(parser));
    }

    pub fn in_error_recovery_mode(&self) -> bool {
        self.strategy.in_error_recovery_mode()
    }

    /// Prepare for a new parse over the same input position.
    pub fn reset(&mut self) {
        self.frames.clear();
        self.state = StateIndex::NONE;
        self.strategy.reset();
        self.sink.clear();
        self.errors.reset();
    }
}

impl<C: TokenCursor, S> Recognizer for Parser<'_, C, S> {
    type Input = C;

    fn input(&self) -> &C {
        &self.input
    }

    fn input_mut(&mut self) -> &mut C {
        &mut self.input
    }

    fn oracle(&self) -> &dyn FollowOracle {
        self.atn
    }

    fn rule_stack(&self) -> &RuleStack {
        &self.frames
    }

    fn state(&self) -> StateIndex {
        self.state
    }

    fn rule_name(&self, rule_index: usize) -> Option<&str> {
        self.rule_names.get(rule_index).copied()
    }

    fn vocabulary(&self) -> &Vocabulary {
        self.vocabulary
    }

    fn notify_error_listeners(
        &mut self,
        line: u32,
        column: u32,
        message: &str,
        cause: Option<&RecognitionError>,
    ) {
        self.sink.syntax_error(line, column, message, cause);
    }

    fn error_counter_mut(&mut self) -> &mut dyn ErrorCounter {
        &mut self.errors
    }
}
