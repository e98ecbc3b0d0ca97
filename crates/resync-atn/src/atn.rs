//! Augmented transition network: one sub-automaton per grammar rule.
//!
//! States live in a flat arena and are addressed by `StateIndex`. Rule
//! references are `Transition::Rule` edges that jump to the callee's start
//! state and remember where the caller resumes (`follow_state`).

use resync_common::{IntervalSet, TokenType, token_type};
use smallvec::SmallVec;

/// Index of a state in `Atn::states`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StateIndex(pub u32);

impl StateIndex {
    /// Sentinel: "no state" (e.g. the invoking state of the outermost rule).
    pub const NONE: StateIndex = StateIndex(u32::MAX);

    #[inline]
    pub fn is_none(self) -> bool {
        self.0 == u32::MAX
    }

    #[inline]
    pub fn is_some(self) -> bool {
        !self.is_none()
    }

    #[inline]
    pub fn as_usize(self) -> usize {
        self.0 as usize
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AtnStateKind {
    Basic,
    RuleStart,
    RuleStop,
    BlockStart,
    BlockEnd,
    StarLoopEntry,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Transition {
    Epsilon {
        target: StateIndex,
    },
    Atom {
        target: StateIndex,
        label: TokenType,
    },
    Range {
        target: StateIndex,
        from: TokenType,
        to: TokenType,
    },
    Set {
        target: StateIndex,
        set: IntervalSet,
    },
    Wildcard {
        target: StateIndex,
    },
    /// Semantic predicate; follow analysis treats it as epsilon.
    Predicate {
        target: StateIndex,
        rule_index: usize,
        pred_index: usize,
    },
    /// Call of `rule_index`; `target` is the callee's start state and
    /// `follow_state` is where the caller resumes after it returns.
    Rule {
        target: StateIndex,
        rule_index: usize,
        follow_state: StateIndex,
    },
}

impl Transition {
    pub fn target(&self) -> StateIndex {
        match self {
            Transition::Epsilon { target }
            | Transition::Atom { target, .. }
            | Transition::Range { target, .. }
            | Transition::Set { target, .. }
            | Transition::Wildcard { target }
            | Transition::Predicate { target, .. }
            | Transition::Rule { target, .. } => *target,
        }
    }

    /// True for transitions that consume no input.
    pub fn is_epsilon(&self) -> bool {
        matches!(
            self,
            Transition::Epsilon { .. } | Transition::Predicate { .. } | Transition::Rule { .. }
        )
    }

    /// Token types matched by this transition, `None` for epsilon-like edges.
    pub fn label(&self, max_token_type: TokenType) -> Option<IntervalSet> {
        match self {
            Transition::Atom { label, .. } => Some(IntervalSet::of(*label)),
            Transition::Range { from, to, .. } => Some(IntervalSet::of_range(*from, *to)),
            Transition::Set { set, .. } => Some(set.clone()),
            Transition::Wildcard { .. } => Some(IntervalSet::of_range(
                token_type::MIN_USER_TOKEN_TYPE,
                max_token_type,
            )),
            Transition::Epsilon { .. } | Transition::Predicate { .. } | Transition::Rule { .. } => {
                None
            }
        }
    }
}

#[derive(Clone, Debug)]
pub struct AtnState {
    pub index: StateIndex,
    pub kind: AtnStateKind,
    pub rule_index: usize,
    pub transitions: SmallVec<[Transition; 2]>,
}

impl AtnState {
    #[inline]
    pub fn is_rule_stop(&self) -> bool {
        self.kind == AtnStateKind::RuleStop
    }
}

/// The automaton for a whole grammar.
#[derive(Clone, Debug, Default)]
pub struct Atn {
    states: Vec<AtnState>,
    rule_start_states: Vec<StateIndex>,
    rule_stop_states: Vec<StateIndex>,
    max_token_type: TokenType,
}

impl Atn {
    #[inline]
    pub fn state(&self, index: StateIndex) -> Option<&AtnState> {
        if index.is_none() {
            return None;
        }
        self.states.get(index.as_usize())
    }

    pub fn states(&self) -> &[AtnState] {
        &self.states
    }

    pub fn rule_start_state(&self, rule_index: usize) -> Option<StateIndex> {
        self.rule_start_states.get(rule_index).copied()
    }

    pub fn rule_stop_state(&self, rule_index: usize) -> Option<StateIndex> {
        self.rule_stop_states.get(rule_index).copied()
    }

    pub fn rule_count(&self) -> usize {
        self.rule_start_states.len()
    }

    pub fn max_token_type(&self) -> TokenType {
        self.max_token_type
    }
}

/// Incremental construction of an `Atn`.
///
/// ```ignore
/// let mut b = AtnBuilder::new(MAX_TOKEN);
/// let (start, stop) = b.add_rule();
/// let s1 = b.add_state(0);
/// b.epsilon(start, s1);
/// b.atom(s1, stop, ID);
/// let atn = b.build();
/// ```
#[derive(Debug, Default)]
pub struct AtnBuilder {
    atn: Atn,
}

impl AtnBuilder {
    pub fn new(max_token_type: TokenType) -> Self {
        Self {
            atn: Atn {
                max_token_type,
                ..Atn::default()
            },
        }
    }

    /// Add a rule; returns its `(start, stop)` states. Rule indices are
    /// assigned in call order starting at 0.
    pub fn add_rule(&mut self) -> (StateIndex, StateIndex) {
        let rule_index = self.atn.rule_start_states.len();
        let start = self.push_state(rule_index, AtnStateKind::RuleStart);
        let stop = self.push_state(rule_index, AtnStateKind::RuleStop);
        self.atn.rule_start_states.push(start);
        self.atn.rule_stop_states.push(stop);
        (start, stop)
    }

    /// Add a basic state belonging to `rule_index`.
    pub fn add_state(&mut self, rule_index: usize) -> StateIndex {
        self.push_state(rule_index, AtnStateKind::Basic)
    }

    pub fn add_state_of_kind(&mut self, rule_index: usize, kind: AtnStateKind) -> StateIndex {
        self.push_state(rule_index, kind)
    }

    pub fn epsilon(&mut self, from: StateIndex, to: StateIndex) {
        self.push_transition(from, Transition::Epsilon { target: to });
    }

    pub fn atom(&mut self, from: StateIndex, to: StateIndex, label: TokenType) {
        self.push_transition(from, Transition::Atom { target: to, label });
    }

    pub fn range(&mut self, from: StateIndex, to: StateIndex, lo: TokenType, hi: TokenType) {
        self.push_transition(
            from,
            Transition::Range {
                target: to,
                from: lo,
                to: hi,
            },
        );
    }

    pub fn set(&mut self, from: StateIndex, to: StateIndex, set: IntervalSet) {
        self.push_transition(from, Transition::Set { target: to, set });
    }

    pub fn wildcard(&mut self, from: StateIndex, to: StateIndex) {
        self.push_transition(from, Transition::Wildcard { target: to });
    }

    pub fn predicate(&mut self, from: StateIndex, to: StateIndex, pred_index: usize) {
        let rule_index = self.rule_of(from);
        self.push_transition(
            from,
            Transition::Predicate {
                target: to,
                rule_index,
                pred_index,
            },
        );
    }

    /// Invoke `rule_index` from `from`, resuming at `follow_state`.
    ///
    /// The callee must already have been added with `add_rule`.
    pub fn rule_call(&mut self, from: StateIndex, rule_index: usize, follow_state: StateIndex) {
        let Some(target) = self.atn.rule_start_state(rule_index) else {
            tracing::warn!(rule_index, "rule call to an undeclared rule ignored");
            return;
        };
        self.push_transition(
            from,
            Transition::Rule {
                target,
                rule_index,
                follow_state,
            },
        );
    }

    pub fn build(self) -> Atn {
        self.atn
    }

    fn rule_of(&self, state: StateIndex) -> usize {
        self.atn.state(state).map(|s| s.rule_index).unwrap_or(0)
    }

    fn push_state(&mut self, rule_index: usize, kind: AtnStateKind) -> StateIndex {
        let index = StateIndex(u32::try_from(self.atn.states.len()).unwrap_or(u32::MAX - 1));
        self.atn.states.push(AtnState {
            index,
            kind,
            rule_index,
            transitions: SmallVec::new(),
        });
        index
    }

    fn push_transition(&mut self, from: StateIndex, transition: Transition) {
        match self.atn.states.get_mut(from.as_usize()) {
            Some(state) if from.is_some() => state.transitions.push(transition),
            _ => tracing::warn!(state = from.0, "transition from an unknown state ignored"),
        }
    }
}
