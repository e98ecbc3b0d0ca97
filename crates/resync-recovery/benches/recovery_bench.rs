//! Error recovery benchmarks.
//!
//! Parses long item lists where a share of the items is malformed, so the
//! strategy's reporting, inline repair and resynchronization all run.

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use resync_atn::{Atn, AtnBuilder, AtnStateKind, StateIndex};
use resync_common::{Token, TokenBuffer, TokenCursor, TokenType, Vocabulary, token_type};
use resync_recovery::Parser;

const LBRACK: TokenType = 1;
const RBRACK: TokenType = 2;
const ID: TokenType = 3;

const RULE_FILE: usize = 0;
const RULE_ITEM: usize = 1;

/// ```text
/// file : item* EOF ;
/// item : '[' ID ']' ;
/// ```
struct ItemList {
    atn: Atn,
    file_loop: StateIndex,
    file_calls_item: StateIndex,
    file_expects_eof: StateIndex,
    item_expects_lbrack: StateIndex,
    item_expects_id: StateIndex,
    item_expects_rbrack: StateIndex,
}

fn item_list() -> ItemList {
    let mut b = AtnBuilder::new(ID);
    let (file_start, file_stop) = b.add_rule();
    let (item_start, item_stop) = b.add_rule();

    let file_loop = b.add_state_of_kind(RULE_FILE, AtnStateKind::StarLoopEntry);
    let file_calls_item = b.add_state(RULE_FILE);
    let file_expects_eof = b.add_state(RULE_FILE);
    b.epsilon(file_start, file_loop);
    b.epsilon(file_loop, file_calls_item);
    b.rule_call(file_calls_item, RULE_ITEM, file_loop);
    b.epsilon(file_loop, file_expects_eof);
    b.atom(file_expects_eof, file_stop, token_type::EOF);

    let item_expects_id = b.add_state(RULE_ITEM);
    let item_expects_rbrack = b.add_state(RULE_ITEM);
    b.atom(item_start, item_expects_id, LBRACK);
    b.atom(item_expects_id, item_expects_rbrack, ID);
    b.atom(item_expects_rbrack, item_stop, RBRACK);

    ItemList {
        atn: b.build(),
        file_loop,
        file_calls_item,
        file_expects_eof,
        item_expects_lbrack: item_start,
        item_expects_id,
        item_expects_rbrack,
    }
}

fn file<C: TokenCursor>(p: &mut Parser<'_, C>, g: &ItemList) {
    p.enter_rule(RULE_FILE);
    loop {
        p.set_state(g.file_loop);
        match p.la(1) {
            LBRACK => {
                p.set_state(g.file_calls_item);
                item(p, g);
            }
            token_type::EOF => break,
            _ => {
                let error = p.no_viable_alternative();
                p.report_and_recover(&error);
            }
        }
    }
    p.set_state(g.file_expects_eof);
    if let Err(error) = p.match_token(token_type::EOF) {
        p.report_and_recover(&error);
    }
    p.exit_rule();
}

fn item<C: TokenCursor>(p: &mut Parser<'_, C>, g: &ItemList) {
    p.enter_rule(RULE_ITEM);
    let steps = [
        (g.item_expects_lbrack, LBRACK),
        (g.item_expects_id, ID),
        (g.item_expects_rbrack, RBRACK),
    ];
    for (state, ttype) in steps {
        p.set_state(state);
        if let Err(error) = p.match_token(ttype) {
            p.report_and_recover(&error);
            break;
        }
    }
    p.exit_rule();
}

/// `items` items; every `error_every`-th one is malformed in one of three
/// ways (empty, doubled name, unclosed).
fn tokens(items: usize, error_every: usize) -> Vec<Token> {
    let mut out = Vec::with_capacity(items * 3);
    let mut push = |ttype: TokenType, text: &str| {
        let line = u32::try_from(out.len() / 16 + 1).unwrap_or(u32::MAX);
        out.push(Token::new(ttype, text).at(line, 0));
    };
    for i in 0..items {
        push(LBRACK, "[");
        let broken = error_every > 0 && i % error_every == 0;
        match (broken, (i / error_every.max(1)) % 3) {
            (true, 0) => {}
            (true, 1) => {
                push(ID, "a");
                push(ID, "b");
            }
            (true, _) => {
                push(ID, "a");
                continue;
            }
            (false, _) => push(ID, "a"),
        }
        push(RBRACK, "]");
    }
    out
}

fn bench_recovery(c: &mut Criterion) {
    resync_recovery::tracing_config::init_tracing();
    let g = item_list();
    let vocab = Vocabulary::new(
        &[None, Some("'['"), Some("']'")],
        &[None, Some("LBRACK"), Some("RBRACK"), Some("ID")],
    );
    let rule_names: &[&str] = &["file", "item"];

    let mut group = c.benchmark_group("recovery");
    for error_every in [0usize, 50, 5, 1] {
        let input = tokens(2_000, error_every);
        group.bench_with_input(
            BenchmarkId::new("item_list", error_every),
            &input,
            |b, input| {
                b.iter(|| {
                    let buffer = TokenBuffer::new(input.clone());
                    let mut p = Parser::new(buffer, &g.atn, rule_names, &vocab);
                    file(&mut p, &g);
                    black_box(p.number_of_syntax_errors())
                });
            },
        );
    }
    group.finish();
}

criterion_group!(benches, bench_recovery);
criterion_main!(benches);
