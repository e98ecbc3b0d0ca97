//! Default syntax-error recovery for ATN-driven parsers.
//!
//! This crate is organized into several modules:
//! - `error` - `RecognitionError`, the closed set of syntax error kinds
//! - `recognizer` - The seams recovery talks to (`Recognizer`, `DiagnosticSink`, `ErrorCounter`)
//! - `display` - Token display and diagnostic message formatting
//! - `options` - `RecoveryOptions` configuration
//! - `strategy` - `ErrorStrategy` and `DefaultErrorStrategy`
//! - `parser` - `Parser`, a reference recognizer that drives a strategy
//! - `tracing_config` - Opt-in tracing subscriber setup
//!
//! The flow on a syntax error is always the same: the parser builds a
//! `RecognitionError`, hands it to `report_error`, and then resynchronizes
//! with `recover` (rule level) or `recover_inline` (single token).

pub mod display;
pub mod error;
pub mod options;
pub mod parser;
pub mod recognizer;
pub mod strategy;
pub mod tracing_config;

pub use display::token_error_display;
pub use error::RecognitionError;
pub use options::{InsertionPolicy, RecoveryOptions};
pub use parser::Parser;
pub use recognizer::{
    CollectingSink, DiagnosticSink, ErrorCounter, Recognizer, SyntaxErrorCounter,
};
pub use strategy::{DefaultErrorStrategy, ErrorStrategy, MissingTokenQuery, RecoveryState};

#[cfg(test)]
#[path = "../tests/display_tests.rs"]
mod display_tests;
#[cfg(test)]
#[path = "../tests/options_tests.rs"]
mod options_tests;
#[cfg(test)]
#[path = "../tests/test_support.rs"]
mod test_support;
#[cfg(test)]
#[path = "../tests/strategy_tests.rs"]
mod strategy_tests;
#[cfg(test)]
#[path = "../tests/parser_tests.rs"]
mod parser_tests;
