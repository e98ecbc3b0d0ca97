//! LL(1) follow-set analysis.
//!
//! Computes the set of tokens that can be matched next from an automaton
//! state by walking epsilon closures. Rule calls are entered and returned
//! from precisely (the return address is pushed on a local stack); reaching
//! the end of the rule the walk started in is resolved against the live rule
//! stack when one is supplied:
//!
//! - no rule stack: the end of the rule is reported as `EPSILON`
//! - outermost frame: the end of the start rule is followed by `EOF`
//! - otherwise: the walk resumes at the caller's follow state

use crate::atn::{Atn, StateIndex, Transition};
use crate::context::{FrameIndex, RuleStack};
use resync_common::limits::MAX_LL1_CLOSURE_STATES;
use resync_common::{IntervalSet, token_type};
use rustc_hash::FxHashSet;
use smallvec::SmallVec;

type ReturnStack = SmallVec<[StateIndex; 4]>;

pub struct Ll1Analyzer<'a> {
    atn: &'a Atn,
    frames: Option<&'a RuleStack>,
}

struct Walk {
    look: IntervalSet,
    busy: FxHashSet<(StateIndex, ReturnStack, Option<FrameIndex>)>,
    called_rules: FxHashSet<usize>,
    returns: ReturnStack,
    exhausted: bool,
}

impl<'a> Ll1Analyzer<'a> {
    /// Analyzer without a calling context.
    pub fn new(atn: &'a Atn) -> Self {
        Self { atn, frames: None }
    }

    /// Analyzer that resolves rule ends against `frames`.
    pub fn with_frames(atn: &'a Atn, frames: &'a RuleStack) -> Self {
        Self {
            atn,
            frames: Some(frames),
        }
    }

    /// Tokens that can be matched next from `state`.
    ///
    /// `frame` is the frame of the rule `state` belongs to; it is ignored by
    /// an analyzer built with `new`.
    pub fn look(&self, state: StateIndex, frame: FrameIndex) -> IntervalSet {
        let mut walk = Walk {
            look: IntervalSet::new(),
            busy: FxHashSet::default(),
            called_rules: FxHashSet::default(),
            returns: SmallVec::new(),
            exhausted: false,
        };
        let base = (self.frames.is_some() && frame.is_some()).then_some(frame);
        self.walk(state, base, &mut walk);
        walk.look
    }

    fn walk(&self, state: StateIndex, base: Option<FrameIndex>, w: &mut Walk) {
        if w.busy.len() >= MAX_LL1_CLOSURE_STATES {
            if !w.exhausted {
                tracing::warn!(
                    state = state.0,
                    limit = MAX_LL1_CLOSURE_STATES,
                    "follow analysis exceeded its configuration limit"
                );
                w.exhausted = true;
            }
            return;
        }
        if !w.busy.insert((state, w.returns.clone(), base)) {
            return;
        }
        let Some(s) = self.atn.state(state) else {
            return;
        };

        if s.is_rule_stop() {
            if let Some(follow) = w.returns.pop() {
                let removed = w.called_rules.remove(&s.rule_index);
                self.walk(follow, base, w);
                if removed {
                    w.called_rules.insert(s.rule_index);
                }
                w.returns.push(follow);
                return;
            }

            let frame = base.and_then(|index| self.frames.and_then(|frames| frames.get(index)));
            match frame {
                None => w.look.add(token_type::EPSILON),
                Some(frame) if frame.is_outermost() => w.look.add(token_type::EOF),
                Some(frame) => match self.atn.rule_return_state(frame.invoking_state) {
                    Some(follow) => {
                        let removed = w.called_rules.remove(&s.rule_index);
                        self.walk(follow, Some(frame.parent), w);
                        if removed {
                            w.called_rules.insert(s.rule_index);
                        }
                    }
                    None => w.look.add(token_type::EPSILON),
                },
            }
            return;
        }

        for transition in &s.transitions {
            match transition {
                Transition::Rule {
                    target,
                    rule_index,
                    follow_state,
                } => {
                    // Left recursion: the callee is already on the walk's call path.
                    if !w.called_rules.insert(*rule_index) {
                        continue;
                    }
                    w.returns.push(*follow_state);
                    self.walk(*target, base, w);
                    w.returns.pop();
                    w.called_rules.remove(rule_index);
                }
                t if t.is_epsilon() => self.walk(t.target(), base, w),
                t => {
                    if let Some(label) = t.label(self.atn.max_token_type()) {
                        w.look.add_all(&label);
                    }
                }
            }
        }
    }
}

impl Atn {
    /// Tokens that can follow `state` within its own rule. Contains
    /// `EPSILON` when the end of the rule is reachable.
    pub fn next_tokens(&self, state: StateIndex) -> IntervalSet {
        Ll1Analyzer::new(self).look(state, FrameIndex::NONE)
    }

    /// Tokens that can follow `state` given the live call chain ending at
    /// `frame`.
    pub fn next_tokens_in_context(
        &self,
        state: StateIndex,
        frames: &RuleStack,
        frame: FrameIndex,
    ) -> IntervalSet {
        Ll1Analyzer::with_frames(self, frames).look(state, frame)
    }

    /// Where the caller resumes after the rule invoked from `invoking_state`
    /// returns, or `None` if that state does not start with a rule call.
    pub fn rule_return_state(&self, invoking_state: StateIndex) -> Option<StateIndex> {
        match self.state(invoking_state)?.transitions.first()? {
            Transition::Rule { follow_state, .. } => Some(*follow_state),
            _ => None,
        }
    }
}
