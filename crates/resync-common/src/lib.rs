//! Common types and utilities for the resync error-recovery crates.
//!
//! This crate provides foundational types used across all resync crates:
//! - Token values and token-type constants (`Token`, `TokenType`, `Vocabulary`)
//! - Ordered token-type sets (`IntervalSet`)
//! - The token cursor seam and a list-backed implementation (`TokenCursor`, `TokenBuffer`)
//! - Diagnostic types, codes and message templates
//! - Recovery limits and thresholds

// Token values and the display-name table
pub mod token;
pub use token::{Token, TokenType, Vocabulary, channel, token_type};

// Interval sets of token types
pub mod interval_set;
pub use interval_set::{Interval, IntervalSet};

// Token cursor - lookahead/consume over a token sequence
pub mod token_stream;
pub use token_stream::{TokenBuffer, TokenCursor};

// Diagnostics - message templates and codes
pub mod diagnostics;

// Centralized limits and thresholds
pub mod limits;

#[cfg(test)]
#[path = "../tests/interval_set_tests.rs"]
mod interval_set_tests;
#[cfg(test)]
#[path = "../tests/token_stream_tests.rs"]
mod token_stream_tests;
#[cfg(test)]
#[path = "../tests/diagnostics_tests.rs"]
mod diagnostics_tests;
