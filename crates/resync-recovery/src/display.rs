//! Token display and syntax-error message formatting.

use resync_common::diagnostics::{diagnostic_messages, format_message};
use resync_common::{IntervalSet, Token, Vocabulary, token_type};

/// How a token is shown inside an error message.
///
/// Uses the token text, or `<EOF>` / `<TYPE>` when the token has none.
/// Newlines, carriage returns and tabs are escaped so a message always fits
/// on one line, and the result is single-quoted.
pub fn token_error_display(token: Option<&Token>) -> String {
    let Some(token) = token else {
        return "<no token>".to_string();
    };
    let text = match &token.text {
        Some(text) => text.clone(),
        None if token.token_type == token_type::EOF => "<EOF>".to_string(),
        None => format!("<{}>", token.token_type),
    };
    format!("'{}'", escape_whitespace(&text))
}

fn escape_whitespace(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '\n' => escaped.push_str("\\n"),
            '\r' => escaped.push_str("\\r"),
            '\t' => escaped.push_str("\\t"),
            _ => escaped.push(ch),
        }
    }
    escaped
}

pub fn no_viable_alternative_message(token: Option<&Token>) -> String {
    format_message(
        diagnostic_messages::NO_VIABLE_ALTERNATIVE_AT_INPUT_0,
        &[&token_error_display(token)],
    )
}

pub fn input_mismatch_message(
    token: Option<&Token>,
    expected: &IntervalSet,
    vocabulary: &Vocabulary,
) -> String {
    format_message(
        diagnostic_messages::MISMATCHED_INPUT_0_EXPECTING_1,
        &[&token_error_display(token), &expected.to_string_with(vocabulary)],
    )
}

pub fn failed_predicate_message(rule_name: &str, predicate_text: &str) -> String {
    format_message(
        diagnostic_messages::RULE_0_FAILED_PREDICATE_1,
        &[rule_name, predicate_text],
    )
}

pub fn extraneous_input_message(
    token: Option<&Token>,
    expected: &IntervalSet,
    vocabulary: &Vocabulary,
) -> String {
    format_message(
        diagnostic_messages::EXTRANEOUS_INPUT_0_EXPECTING_1,
        &[&token_error_display(token), &expected.to_string_with(vocabulary)],
    )
}

pub fn missing_token_message(
    token: Option<&Token>,
    expected: &IntervalSet,
    vocabulary: &Vocabulary,
) -> String {
    format_message(
        diagnostic_messages::MISSING_0_AT_1,
        &[&expected.to_string_with(vocabulary), &token_error_display(token)],
    )
}
