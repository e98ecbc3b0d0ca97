//! Shared fixtures for recovery tests: a scriptable recognizer and the
//! bracket grammar.
use crate::error::RecognitionError;
use crate::parser::Parser;
use crate::recognizer::{
    CollectingSink, DiagnosticSink, ErrorCounter, Recognizer, SyntaxErrorCounter,
};
use resync_atn::{Atn, AtnBuilder, FollowOracle, FrameIndex, RuleStack, StateIndex};
use resync_common::{IntervalSet, Token, TokenBuffer, TokenCursor, TokenType, Vocabulary};

// =============================================================================
// Scripted oracle and recognizer
// =============================================================================

/// Oracle with canned answers.
#[derive(Default)]
pub(crate) struct StubOracle {
    pub expected: IntervalSet,
    pub return_follow: Vec<(StateIndex, IntervalSet)>,
    pub after_match: Option<IntervalSet>,
}

impl FollowOracle for StubOracle {
    fn next_tokens_in_context(
        &self,
        _state: StateIndex,
        _frames: &RuleStack,
        _frame: FrameIndex,
    ) -> IntervalSet {
        self.expected.clone()
    }

    fn next_tokens_after_rule_return(&self, invoking_state: StateIndex) -> IntervalSet {
        self.return_follow
            .iter()
            .find(|(state, _)| *state == invoking_state)
            .map(|(_, follow)| follow.clone())
            .unwrap_or_default()
    }

    fn next_tokens_after_match(
        &self,
        _state: StateIndex,
        _frames: &RuleStack,
        _frame: FrameIndex,
    ) -> Option<IntervalSet> {
        self.after_match.clone()
    }
}

pub(crate) struct StubRecognizer {
    pub input: TokenBuffer,
    pub oracle: StubOracle,
    pub frames: RuleStack,
    pub state: StateIndex,
    pub vocabulary: Vocabulary,
    pub rule_names: Vec<&'static str>,
    pub sink: CollectingSink,
    pub errors: SyntaxErrorCounter,
}

impl StubRecognizer {
    /// One active start rule, state 0, and `tokens` followed by EOF.
    pub(crate) fn with_tokens(tokens: Vec<Token>) -> Self {
        let mut frames = RuleStack::new();
        frames.push(0, StateIndex::NONE);
        Self {
            input: TokenBuffer::new(tokens),
            oracle: StubOracle::default(),
            frames,
            state: StateIndex(0),
            vocabulary: Vocabulary::from_symbolic_names(&["X", "Y", "Z", "W"]),
            rule_names: vec!["start", "expr", "term", "atom"],
            sink: CollectingSink::new(),
            errors: SyntaxErrorCounter::new(),
        }
    }

    /// Tokens on line 1 with texts `x`, `y`, `z`, `w` for `X`..`W`.
    pub(crate) fn with_types(types: &[TokenType]) -> Self {
        Self::with_tokens(
            types
                .iter()
                .zip(0u32..)
                .map(|(&ttype, column)| Token::new(ttype, text_for(ttype)).at(1, column * 2))
                .collect(),
        )
    }

    /// Push a rule invoked from `invoking_state`, whose return is followed by
    /// `follow`.
    pub(crate) fn call_rule(&mut self, rule_index: usize, invoking_state: u32, follow: &[i32]) {
        let state = StateIndex(invoking_state);
        self.frames.push(rule_index, state);
        self.oracle.return_follow.push((state, set(follow)));
    }

    pub(crate) fn messages(&self) -> Vec<&str> {
        self.sink
            .diagnostics()
            .iter()
            .map(|diag| diag.message_text.as_str())
            .collect()
    }
}

fn text_for(ttype: TokenType) -> String {
    match ttype {
        X => "x".to_string(),
        Y => "y".to_string(),
        Z => "z".to_string(),
        W => "w".to_string(),
        other => format!("t{other}"),
    }
}

pub(crate) const X: TokenType = 1;
pub(crate) const Y: TokenType = 2;
pub(crate) const Z: TokenType = 3;
pub(crate) const W: TokenType = 4;

impl Recognizer for StubRecognizer {
    type Input = TokenBuffer;

    fn input(&self) -> &TokenBuffer {
        &self.input
    }

    fn input_mut(&mut self) -> &mut TokenBuffer {
        &mut self.input
    }

    fn oracle(&self) -> &dyn FollowOracle {
        &self.oracle
    }

    fn rule_stack(&self) -> &RuleStack {
        &self.frames
    }

    fn state(&self) -> StateIndex {
        self.state
    }

    fn rule_name(&self, rule_index: usize) -> Option<&str> {
        self.rule_names.get(rule_index).copied()
    }

    fn vocabulary(&self) -> &Vocabulary {
        &self.vocabulary
    }

    fn notify_error_listeners(
        &mut self,
        line: u32,
        column: u32,
        message: &str,
        cause: Option<&RecognitionError>,
    ) {
        self.sink.syntax_error(line, column, message, cause);
    }

    fn error_counter_mut(&mut self) -> &mut dyn ErrorCounter {
        &mut self.errors
    }
}

pub(crate) fn set(elements: &[i32]) -> IntervalSet {
    elements.iter().copied().collect()
}

// =============================================================================
// Bracket grammar
// =============================================================================

pub(crate) const LBRACK: TokenType = 1;
pub(crate) const RBRACK: TokenType = 2;
pub(crate) const LPAREN: TokenType = 3;
pub(crate) const RPAREN: TokenType = 4;
pub(crate) const CARET: TokenType = 5;
pub(crate) const INT: TokenType = 6;
pub(crate) const ID: TokenType = 7;

pub(crate) const RULE_A: usize = 0;
pub(crate) const RULE_B: usize = 1;
pub(crate) const RULE_C: usize = 2;

pub(crate) const RULE_NAMES: &[&str] = &["a", "b", "c"];

pub(crate) fn bracket_vocabulary() -> Vocabulary {
    Vocabulary::new(
        &[None, Some("'['"), Some("']'"), Some("'('"), Some("')'"), Some("'^'")],
        &[
            None,
            Some("LBRACK"),
            Some("RBRACK"),
            Some("LPAREN"),
            Some("RPAREN"),
            Some("CARET"),
            Some("INT"),
            Some("ID"),
        ],
    )
}

/// States the rule functions below set before matching or calling.
pub(crate) struct Bracket {
    pub atn: Atn,
    pub a_expects_lbrack: StateIndex,
    pub a_calls_b_in_brackets: StateIndex,
    pub a_expects_rbrack: StateIndex,
    pub a_expects_lparen: StateIndex,
    pub a_calls_b_in_parens: StateIndex,
    pub a_expects_rparen: StateIndex,
    pub b_calls_c: StateIndex,
    pub b_expects_caret: StateIndex,
    pub b_expects_int: StateIndex,
    pub c_start: StateIndex,
}

/// ```text
/// a : '[' b ']' | '(' b ')' ;
/// b : c '^' INT ;
/// c : ID | INT ;
/// ```
pub(crate) fn bracket_grammar() -> Bracket {
    let mut b = AtnBuilder::new(ID);
    let (a_start, a_stop) = b.add_rule();
    let (b_start, b_stop) = b.add_rule();
    let (c_start, c_stop) = b.add_rule();

    let s1 = b.add_state(RULE_A);
    let s2 = b.add_state(RULE_A);
    let s3 = b.add_state(RULE_A);
    b.epsilon(a_start, s1);
    b.atom(s1, s2, LBRACK);
    b.rule_call(s2, RULE_B, s3);
    b.atom(s3, a_stop, RBRACK);

    let s4 = b.add_state(RULE_A);
    let s5 = b.add_state(RULE_A);
    let s6 = b.add_state(RULE_A);
    b.epsilon(a_start, s4);
    b.atom(s4, s5, LPAREN);
    b.rule_call(s5, RULE_B, s6);
    b.atom(s6, a_stop, RPAREN);

    let t1 = b.add_state(RULE_B);
    let t2 = b.add_state(RULE_B);
    let t3 = b.add_state(RULE_B);
    b.epsilon(b_start, t1);
    b.rule_call(t1, RULE_C, t2);
    b.atom(t2, t3, CARET);
    b.atom(t3, b_stop, INT);

    b.atom(c_start, c_stop, ID);
    b.atom(c_start, c_stop, INT);

    Bracket {
        atn: b.build(),
        a_expects_lbrack: s1,
        a_calls_b_in_brackets: s2,
        a_expects_rbrack: s3,
        a_expects_lparen: s4,
        a_calls_b_in_parens: s5,
        a_expects_rparen: s6,
        b_calls_c: t1,
        b_expects_caret: t2,
        b_expects_int: t3,
        c_start,
    }
}

// =============================================================================
// Recursive-descent rule functions over `Parser`
// =============================================================================

pub(crate) fn rule_a<C: TokenCursor>(p: &mut Parser<'_, C>, g: &Bracket) {
    p.enter_rule(RULE_A);
    let (open, call, close, close_type) = match p.la(1) {
        LBRACK => (g.a_expects_lbrack, g.a_calls_b_in_brackets, g.a_expects_rbrack, RBRACK),
        LPAREN => (g.a_expects_lparen, g.a_calls_b_in_parens, g.a_expects_rparen, RPAREN),
        _ => {
            let error = p.no_viable_alternative();
            p.report_and_recover(&error);
            p.exit_rule();
            return;
        }
    };

    p.set_state(open);
    let open_type = p.la(1);
    if let Err(error) = p.match_token(open_type) {
        p.report_and_recover(&error);
        p.exit_rule();
        return;
    }
    p.set_state(call);
    rule_b(p, g);
    p.set_state(close);
    if let Err(error) = p.match_token(close_type) {
        p.report_and_recover(&error);
    }
    p.exit_rule();
}

pub(crate) fn rule_b<C: TokenCursor>(p: &mut Parser<'_, C>, g: &Bracket) {
    p.enter_rule(RULE_B);
    p.set_state(g.b_calls_c);
    rule_c(p, g);

    let steps = [(g.b_expects_caret, CARET), (g.b_expects_int, INT)];
    for (state, ttype) in steps {
        p.set_state(state);
        if let Err(error) = p.match_token(ttype) {
            p.report_and_recover(&error);
            break;
        }
    }
    p.exit_rule();
}

pub(crate) fn rule_c<C: TokenCursor>(p: &mut Parser<'_, C>, g: &Bracket) {
    p.enter_rule(RULE_C);
    p.set_state(g.c_start);
    match p.la(1) {
        ID | INT => {
            let ttype = p.la(1);
            if let Err(error) = p.match_token(ttype) {
                p.report_and_recover(&error);
            }
        }
        _ => {
            let error = p.no_viable_alternative();
            p.report_and_recover(&error);
        }
    }
    p.exit_rule();
}
