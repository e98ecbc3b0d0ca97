//! Grammar automaton support for resync.
//!
//! - `atn` - State/transition arena and its builder
//! - `context` - The live rule invocation stack
//! - `ll1` - LL(1) follow-set analysis over the automaton
//! - `oracle` - The `FollowOracle` seam consumed by error recovery

pub mod atn;
pub use atn::{Atn, AtnBuilder, AtnState, AtnStateKind, StateIndex, Transition};

pub mod context;
pub use context::{FrameIndex, RuleFrame, RuleStack};

pub mod ll1;
pub use ll1::Ll1Analyzer;

pub mod oracle;
pub use oracle::FollowOracle;

#[cfg(test)]
#[path = "../tests/rule_stack_tests.rs"]
mod rule_stack_tests;
#[cfg(test)]
#[path = "../tests/ll1_tests.rs"]
mod ll1_tests;
