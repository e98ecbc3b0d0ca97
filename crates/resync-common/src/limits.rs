//! Centralized limits and thresholds for error recovery.
//!
//! Recovery runs on malformed input by definition, so every walk over
//! caller-controlled structure has an upper bound here rather than at the
//! call site.

// =============================================================================
// Rule Invocation Chain
// =============================================================================

/// Maximum number of rule frames visited when computing a recovery set.
///
/// A well-formed rule stack is never this deep; the bound keeps a corrupted
/// parent link (a frame that names itself as its own ancestor) from turning
/// recovery into an infinite loop.
pub const MAX_RULE_CHAIN_DEPTH: usize = 10_000;

// =============================================================================
// Follow Analysis
// =============================================================================

/// Maximum `(state, context)` configurations explored by one LL(1) follow
/// computation.
///
/// Follow analysis already refuses to revisit a configuration and to re-enter
/// a rule on the current call path, so this only trips on pathological
/// automata. When exceeded the partial set computed so far is returned.
pub const MAX_LL1_CLOSURE_STATES: usize = 100_000;
