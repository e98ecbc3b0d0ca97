//! The live rule invocation stack.
//!
//! A frame is pushed when a rule is entered and popped when it returns. Each
//! frame records the automaton state in the caller that invoked it and the
//! index of the caller's frame, so the whole call chain can be walked from
//! any frame without the frames owning one another.

use crate::atn::StateIndex;

/// Index of a frame in a `RuleStack`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FrameIndex(pub u32);

impl FrameIndex {
    pub const NONE: FrameIndex = FrameIndex(u32::MAX);

    #[inline]
    pub fn is_none(self) -> bool {
        self.0 == u32::MAX
    }

    #[inline]
    pub fn is_some(self) -> bool {
        !self.is_none()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RuleFrame {
    pub rule_index: usize,
    /// State in the caller that invoked this rule; `NONE` for the start rule.
    pub invoking_state: StateIndex,
    pub parent: FrameIndex,
}

impl RuleFrame {
    /// True for the outermost (start rule) frame.
    #[inline]
    pub fn is_outermost(&self) -> bool {
        self.invoking_state.is_none()
    }
}

#[derive(Clone, Debug, Default)]
pub struct RuleStack {
    frames: Vec<RuleFrame>,
}

impl RuleStack {
    pub fn new() -> Self {
        Self::default()
    }

    /// Enter a rule invoked from `invoking_state` of the current frame.
    pub fn push(&mut self, rule_index: usize, invoking_state: StateIndex) -> FrameIndex {
        let parent = self.current();
        let index = FrameIndex(u32::try_from(self.frames.len()).unwrap_or(u32::MAX - 1));
        self.frames.push(RuleFrame {
            rule_index,
            invoking_state,
            parent,
        });
        index
    }

    /// Leave the current rule.
    pub fn pop(&mut self) -> Option<RuleFrame> {
        self.frames.pop()
    }

    /// The innermost frame, or `NONE` when no rule is active.
    pub fn current(&self) -> FrameIndex {
        match self.frames.len() {
            0 => FrameIndex::NONE,
            len => FrameIndex(u32::try_from(len - 1).unwrap_or(u32::MAX - 1)),
        }
    }

    #[inline]
    pub fn get(&self, index: FrameIndex) -> Option<&RuleFrame> {
        if index.is_none() {
            return None;
        }
        self.frames.get(index.0 as usize)
    }

    pub fn depth(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    pub fn clear(&mut self) {
        self.frames.clear();
    }

    /// Walk from `from` outward to the start rule.
    pub fn ancestors(&self, from: FrameIndex) -> Ancestors<'_> {
        Ancestors {
            stack: self,
            next: from,
        }
    }

    /// Rule indices from the innermost frame outward.
    pub fn rule_invocation_stack(&self) -> Vec<usize> {
        self.ancestors(self.current())
            .map(|(_, frame)| frame.rule_index)
            .collect()
    }
}

pub struct Ancestors<'a> {
    stack: &'a RuleStack,
    next: FrameIndex,
}

impl<'a> Iterator for Ancestors<'a> {
    type Item = (FrameIndex, &'a RuleFrame);

    fn next(&mut self) -> Option<Self::Item> {
        let index = self.next;
        let frame = self.stack.get(index)?;
        self.next = frame.parent;
        Some((index, frame))
    }
}
