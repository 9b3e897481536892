//! Statement chain construction.
//!
//! Lowers a procedural body into its process's statement arena. The chain
//! is built tail-first: each node is allocated with its `next` (and, for
//! delays, `delay_stmt`) links already in place, so no pass ever observes
//! an incompletely linked graph.

use tempo_ast::{Expr, Statement};
use tempo_ir::{Arena, RtlStmt, StmtId};

use crate::expr::{lower_expr, lvalue_base_name};

/// Lowers `body` into `arena`, returning the head of the chain (or `None`
/// when nothing in the body is lowerable).
pub(crate) fn lower_body(body: &Statement, arena: &mut Arena<StmtId, RtlStmt>) -> Option<StmtId> {
    lower_stmt(body, None, arena)
}

/// Lowers one statement with `tail` as its successor, returning the head
/// of the resulting (possibly empty) sub-chain.
fn lower_stmt(
    s: &Statement,
    tail: Option<StmtId>,
    arena: &mut Arena<StmtId, RtlStmt>,
) -> Option<StmtId> {
    match s {
        Statement::Null { .. } => tail,

        // A block is a linear concatenation: build back-to-front so each
        // statement links to the chain built after it.
        Statement::Block { stmts, .. } => stmts
            .iter()
            .rev()
            .fold(tail, |chain, sub| lower_stmt(sub, chain, arena)),

        Statement::BlockingAssign { lhs, rhs, .. } => Some(arena.alloc(RtlStmt::blocking(
            lvalue_base_name(lhs),
            lower_expr(rhs),
            tail,
        ))),

        Statement::NonBlockingAssign { lhs, rhs, .. } => Some(arena.alloc(RtlStmt::non_blocking(
            lvalue_base_name(lhs),
            lower_expr(rhs),
            tail,
        ))),

        // `#d S`: the continuation after the delay heads the lowered S,
        // which itself falls through to the enclosing successor. A bare
        // `#d;` continues directly at the successor.
        Statement::DelayControl { delay, stmt, .. } => {
            let continuation = match stmt {
                Some(body) => lower_stmt(body, tail, arena),
                None => tail,
            };
            Some(arena.alloc(RtlStmt::delay(lower_expr(delay), continuation, tail)))
        }

        // If/case bodies are not lowered into control-flow IR; their leaf
        // assignments and delays are wired linearly in source order.
        Statement::If {
            then_stmt,
            else_stmt,
            ..
        } => {
            let else_head = match else_stmt {
                Some(e) => lower_stmt(e, tail, arena),
                None => tail,
            };
            lower_stmt(then_stmt, else_head, arena)
        }

        Statement::Case { items, .. } => items
            .iter()
            .rev()
            .fold(tail, |chain, item| lower_stmt(&item.stmt, chain, arena)),

        Statement::ExprStmt { expr, .. } => match expr {
            Expr::Identifier { name, .. } if name == "$finish" => {
                Some(arena.alloc(RtlStmt::finish(tail)))
            }
            _ => tail,
        },
    }
}
