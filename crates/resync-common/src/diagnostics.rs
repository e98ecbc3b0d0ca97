//! Diagnostic types and message templates for syntax-error reporting.
//!
//! Templates use `{0}`, `{1}`, ... placeholders; `format_message()` fills
//! them in.

use serde::Serialize;

// =============================================================================
// Diagnostic Types
// =============================================================================

/// Diagnostic category.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum DiagnosticCategory {
    Warning = 0,
    Error = 1,
}

/// A syntax diagnostic anchored at a line/column.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    pub line: u32,
    pub column: u32,
    pub message_text: String,
    pub category: DiagnosticCategory,
    pub code: u32,
}

impl Diagnostic {
    /// Create a new error diagnostic.
    #[must_use]
    pub const fn error(line: u32, column: u32, message: String, code: u32) -> Self {
        Self {
            line,
            column,
            message_text: message,
            category: DiagnosticCategory::Error,
            code,
        }
    }

    /// Create a new warning diagnostic.
    #[must_use]
    pub const fn warning(line: u32, column: u32, message: String, code: u32) -> Self {
        Self {
            line,
            column,
            message_text: message,
            category: DiagnosticCategory::Warning,
            code,
        }
    }
}

/// A diagnostic message definition with code, category, and message template.
#[derive(Clone, Copy, Debug)]
pub struct DiagnosticMessage {
    pub code: u32,
    pub category: DiagnosticCategory,
    pub message: &'static str,
}

pub mod diagnostic_codes {
    /// Generic syntax error (no structured cause available).
    pub const SYNTAX_ERROR: u32 = 1000;
    pub const NO_VIABLE_ALTERNATIVE_AT_INPUT: u32 = 1001;
    pub const MISMATCHED_INPUT_EXPECTING: u32 = 1002;
    pub const RULE_FAILED_PREDICATE: u32 = 1003;
    pub const EXTRANEOUS_INPUT_EXPECTING: u32 = 1004;
    pub const MISSING_AT: u32 = 1005;
    pub const UNKNOWN_RECOGNITION_ERROR: u32 = 1006;
}

pub mod diagnostic_messages {
    pub const SYNTAX_ERROR: &str = "syntax error";
    pub const NO_VIABLE_ALTERNATIVE_AT_INPUT_0: &str = "no viable alternative at input {0}";
    pub const MISMATCHED_INPUT_0_EXPECTING_1: &str = "mismatched input {0} expecting {1}";
    pub const RULE_0_FAILED_PREDICATE_1: &str = "rule {0} failed predicate: {{1}}?";
    pub const EXTRANEOUS_INPUT_0_EXPECTING_1: &str = "extraneous input {0} expecting {1}";
    pub const MISSING_0_AT_1: &str = "missing {0} at {1}";
    pub const UNKNOWN_RECOGNITION_ERROR_0: &str = "{0}";
}

pub static DIAGNOSTIC_MESSAGES: &[DiagnosticMessage] = &[
    DiagnosticMessage {
        code: diagnostic_codes::SYNTAX_ERROR,
        category: DiagnosticCategory::Error,
        message: diagnostic_messages::SYNTAX_ERROR,
    },
    DiagnosticMessage {
        code: diagnostic_codes::NO_VIABLE_ALTERNATIVE_AT_INPUT,
        category: DiagnosticCategory::Error,
        message: diagnostic_messages::NO_VIABLE_ALTERNATIVE_AT_INPUT_0,
    },
    DiagnosticMessage {
        code: diagnostic_codes::MISMATCHED_INPUT_EXPECTING,
        category: DiagnosticCategory::Error,
        message: diagnostic_messages::MISMATCHED_INPUT_0_EXPECTING_1,
    },
    DiagnosticMessage {
        code: diagnostic_codes::RULE_FAILED_PREDICATE,
        category: DiagnosticCategory::Error,
        message: diagnostic_messages::RULE_0_FAILED_PREDICATE_1,
    },
    DiagnosticMessage {
        code: diagnostic_codes::EXTRANEOUS_INPUT_EXPECTING,
        category: DiagnosticCategory::Error,
        message: diagnostic_messages::EXTRANEOUS_INPUT_0_EXPECTING_1,
    },
    DiagnosticMessage {
        code: diagnostic_codes::MISSING_AT,
        category: DiagnosticCategory::Error,
        message: diagnostic_messages::MISSING_0_AT_1,
    },
    DiagnosticMessage {
        code: diagnostic_codes::UNKNOWN_RECOGNITION_ERROR,
        category: DiagnosticCategory::Warning,
        message: diagnostic_messages::UNKNOWN_RECOGNITION_ERROR_0,
    },
];

/// Look up a diagnostic message definition by code.
#[must_use]
pub fn get_diagnostic_message(code: u32) -> Option<&'static DiagnosticMessage> {
    DIAGNOSTIC_MESSAGES.iter().find(|m| m.code == code)
}

/// Get the message template for a diagnostic code.
#[must_use]
pub fn get_message_template(code: u32) -> Option<&'static str> {
    get_diagnostic_message(code).map(|m| m.message)
}

/// Get the category for a diagnostic code.
#[must_use]
pub fn get_diagnostic_category(code: u32) -> Option<DiagnosticCategory> {
    get_diagnostic_message(code).map(|m| m.category)
}

/// Format a diagnostic message by replacing {0}, {1}, etc. with arguments.
///
/// Placeholders are substituted in a single pass over the template, so
/// argument text that itself looks like `{1}` is left alone. Placeholders
/// without a matching argument are kept verbatim.
#[must_use]
pub fn format_message(template: &str, args: &[&str]) -> String {
    let mut result = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(open) = rest.find('{') {
        result.push_str(&rest[..open]);
        let after = &rest[open + 1..];
        let digits = after.bytes().take_while(u8::is_ascii_digit).count();
        let arg = (digits > 0 && after[digits..].starts_with('}'))
            .then(|| after[..digits].parse::<usize>().ok())
            .flatten()
            .and_then(|index| args.get(index));

        match arg {
            Some(arg) => {
                result.push_str(arg);
                rest = &after[digits + 1..];
            }
            None => {
                result.push('{');
                rest = after;
            }
        }
    }
    result.push_str(rest);
    result
}
