//! Statement nodes for procedural blocks.

use crate::expr::Expr;
use serde::{Deserialize, Serialize};
use tempo_source::Span;

/// The flavor of a case statement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CaseKind {
    /// Plain `case`.
    Case,
    /// `casez` — Z bits are wildcards.
    CaseZ,
    /// `casex` — X and Z bits are wildcards.
    CaseX,
}

/// One arm of a case statement. An arm with no match expressions is the
/// `default` arm.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CaseItem {
    /// The match expressions; empty for `default`.
    pub matches: Vec<Expr>,
    /// The arm body.
    pub stmt: Statement,
    /// Source span.
    pub span: Span,
}

/// A procedural statement.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Statement {
    /// An empty statement (`;`).
    Null {
        /// Source span.
        span: Span,
    },
    /// A `begin ... end` block with an optional label.
    Block {
        /// The optional block label (`begin : name`).
        label: Option<String>,
        /// The statements, in execution order.
        stmts: Vec<Statement>,
        /// Source span.
        span: Span,
    },
    /// An `if`/`else` statement.
    If {
        /// The condition.
        cond: Expr,
        /// The statement when the condition is nonzero.
        then_stmt: Box<Statement>,
        /// The optional `else` statement.
        else_stmt: Option<Box<Statement>>,
        /// Source span.
        span: Span,
    },
    /// A `case`/`casez`/`casex` statement.
    Case {
        /// The case flavor.
        kind: CaseKind,
        /// The selector expression.
        subject: Expr,
        /// The arms, in source order.
        items: Vec<CaseItem>,
        /// Source span.
        span: Span,
    },
    /// A blocking assignment (`lhs = rhs;`).
    BlockingAssign {
        /// The assignment target.
        lhs: Expr,
        /// The assigned value.
        rhs: Expr,
        /// Source span.
        span: Span,
    },
    /// A non-blocking assignment (`lhs <= rhs;`).
    NonBlockingAssign {
        /// The assignment target.
        lhs: Expr,
        /// The assigned value.
        rhs: Expr,
        /// Source span.
        span: Span,
    },
    /// A delay control (`#d stmt` or a bare `#d;`).
    DelayControl {
        /// The delay expression.
        delay: Expr,
        /// The statement executed after the delay, if any.
        stmt: Option<Box<Statement>>,
        /// Source span.
        span: Span,
    },
    /// An expression statement (e.g. a system task call like `$finish;`).
    ExprStmt {
        /// The expression.
        expr: Expr,
        /// Source span.
        span: Span,
    },
}

impl Statement {
    /// Convenience constructor for a blocking assignment with dummy spans.
    pub fn blocking(lhs: Expr, rhs: Expr) -> Self {
        Statement::BlockingAssign {
            lhs,
            rhs,
            span: Span::DUMMY,
        }
    }

    /// Convenience constructor for a non-blocking assignment with dummy spans.
    pub fn non_blocking(lhs: Expr, rhs: Expr) -> Self {
        Statement::NonBlockingAssign {
            lhs,
            rhs,
            span: Span::DUMMY,
        }
    }

    /// Convenience constructor for an unlabeled block.
    pub fn block(stmts: Vec<Statement>) -> Self {
        Statement::Block {
            label: None,
            stmts,
            span: Span::DUMMY,
        }
    }

    /// Convenience constructor for a delay control.
    pub fn delay(delay: Expr, stmt: Option<Statement>) -> Self {
        Statement::DelayControl {
            delay,
            stmt: stmt.map(Box::new),
            span: Span::DUMMY,
        }
    }

    /// Convenience constructor for a `$finish;` statement.
    pub fn finish() -> Self {
        Statement::ExprStmt {
            expr: Expr::ident("$finish"),
            span: Span::DUMMY,
        }
    }
}
