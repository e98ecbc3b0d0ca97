//! Follow-set queries used by error recovery.
//!
//! Recovery only needs three questions answered about the grammar; putting
//! them behind a trait lets a recognizer back them with a real `Atn` or with
//! precomputed tables.

use crate::atn::{Atn, StateIndex};
use crate::context::{FrameIndex, RuleStack};
use resync_common::IntervalSet;

pub trait FollowOracle {
    /// Tokens that may legally appear next at `state`, given the call chain
    /// ending at `frame`.
    fn next_tokens_in_context(
        &self,
        state: StateIndex,
        frames: &RuleStack,
        frame: FrameIndex,
    ) -> IntervalSet;

    /// Tokens that may follow the rule invoked from `invoking_state`, within
    /// the invoking rule only.
    fn next_tokens_after_rule_return(&self, invoking_state: StateIndex) -> IntervalSet;

    /// Tokens that may appear right after the token expected at `state` has
    /// been matched. `None` when the oracle cannot tell.
    fn next_tokens_after_match(
        &self,
        _state: StateIndex,
        _frames: &RuleStack,
        _frame: FrameIndex,
    ) -> Option<IntervalSet> {
        None
    }
}

impl FollowOracle for Atn {
    fn next_tokens_in_context(
        &self,
        state: StateIndex,
        frames: &RuleStack,
        frame: FrameIndex,
    ) -> IntervalSet {
        Atn::next_tokens_in_context(self, state, frames, frame)
    }

    fn next_tokens_after_rule_return(&self, invoking_state: StateIndex) -> IntervalSet {
        match self.rule_return_state(invoking_state) {
            Some(follow_state) => self.next_tokens(follow_state),
            None => {
                tracing::warn!(
                    state = invoking_state.0,
                    "invoking state has no rule transition; no follow tokens"
                );
                IntervalSet::new()
            }
        }
    }

    fn next_tokens_after_match(
        &self,
        state: StateIndex,
        frames: &RuleStack,
        frame: FrameIndex,
    ) -> Option<IntervalSet> {
        let s = self.state(state)?;
        let mut follow: Option<IntervalSet> = None;
        for transition in &s.transitions {
            if transition.is_epsilon() {
                continue;
            }
            let after = Atn::next_tokens_in_context(self, transition.target(), frames, frame);
            follow.get_or_insert_with(IntervalSet::new).add_all(&after);
        }
        follow
    }
}
