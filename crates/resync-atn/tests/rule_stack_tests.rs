//! Tests for the rule invocation stack.
use crate::atn::StateIndex;
use crate::context::{FrameIndex, RuleStack};

#[test]
fn empty_stack_has_no_current_frame() {
    let stack = RuleStack::new();
    assert!(stack.current().is_none());
    assert!(stack.get(FrameIndex::NONE).is_none());
    assert_eq!(stack.ancestors(stack.current()).count(), 0);
}

#[test]
fn push_links_parent_frames() {
    let mut stack = RuleStack::new();
    let outer = stack.push(0, StateIndex::NONE);
    let middle = stack.push(1, StateIndex(4));
    let inner = stack.push(2, StateIndex(9));

    assert_eq!(stack.current(), inner);
    assert_eq!(stack.get(inner).map(|f| f.parent), Some(middle));
    assert_eq!(stack.get(middle).map(|f| f.parent), Some(outer));
    assert!(stack.get(outer).is_some_and(|f| f.is_outermost()));
    assert!(stack.get(outer).is_some_and(|f| f.parent.is_none()));
}

#[test]
fn ancestors_walk_outward() {
    let mut stack = RuleStack::new();
    stack.push(0, StateIndex::NONE);
    stack.push(1, StateIndex(4));
    stack.push(2, StateIndex(9));

    let invoking: Vec<StateIndex> = stack
        .ancestors(stack.current())
        .map(|(_, frame)| frame.invoking_state)
        .collect();
    assert_eq!(invoking, vec![StateIndex(9), StateIndex(4), StateIndex::NONE]);
    assert_eq!(stack.rule_invocation_stack(), vec![2, 1, 0]);
}

#[test]
fn pop_restores_caller_as_current() {
    let mut stack = RuleStack::new();
    let outer = stack.push(0, StateIndex::NONE);
    stack.push(1, StateIndex(4));

    let popped = stack.pop().expect("frame");
    assert_eq!(popped.rule_index, 1);
    assert_eq!(stack.current(), outer);
    assert_eq!(stack.depth(), 1);

    stack.clear();
    assert!(stack.is_empty());
}
