//! Linked procedural statements.

use crate::expr::RtlExpr;
use crate::ids::StmtId;
use serde::{Deserialize, Serialize};

/// The kind of an RTL statement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RtlStmtKind {
    /// A blocking assignment: drive immediately, continue.
    BlockingAssign,
    /// A non-blocking assignment: defer the update to the NBA region.
    NonBlockingAssign,
    /// A delay: suspend the thread, resume at `delay_stmt` after the delay.
    Delay,
    /// `$finish`: request orderly kernel shutdown.
    Finish,
}

/// One statement in a process's chain.
///
/// Statements live in their process's arena and link to each other through
/// [`StmtId`]s: `next` is the successor in the enclosing chain; for `Delay`
/// statements `delay_stmt` heads the continuation executed after the delay
/// elapses (that chain falls through to `next` on its own).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RtlStmt {
    /// The statement kind.
    pub kind: RtlStmtKind,
    /// The assignment target (assignment kinds only).
    pub lhs_name: String,
    /// The assigned expression (assignment kinds only).
    pub rhs: Option<RtlExpr>,
    /// The delay amount expression (`Delay` only).
    pub delay_expr: Option<RtlExpr>,
    /// The continuation after the delay elapses (`Delay` only).
    pub delay_stmt: Option<StmtId>,
    /// The successor in the enclosing chain.
    pub next: Option<StmtId>,
}

impl RtlStmt {
    /// Creates a blocking assignment statement.
    pub fn blocking(lhs_name: impl Into<String>, rhs: RtlExpr, next: Option<StmtId>) -> Self {
        Self {
            kind: RtlStmtKind::BlockingAssign,
            lhs_name: lhs_name.into(),
            rhs: Some(rhs),
            delay_expr: None,
            delay_stmt: None,
            next,
        }
    }

    /// Creates a non-blocking assignment statement.
    pub fn non_blocking(lhs_name: impl Into<String>, rhs: RtlExpr, next: Option<StmtId>) -> Self {
        Self {
            kind: RtlStmtKind::NonBlockingAssign,
            lhs_name: lhs_name.into(),
            rhs: Some(rhs),
            delay_expr: None,
            delay_stmt: None,
            next,
        }
    }

    /// Creates a delay statement.
    pub fn delay(delay_expr: RtlExpr, delay_stmt: Option<StmtId>, next: Option<StmtId>) -> Self {
        Self {
            kind: RtlStmtKind::Delay,
            lhs_name: String::new(),
            rhs: None,
            delay_expr: Some(delay_expr),
            delay_stmt,
            next,
        }
    }

    /// Creates a finish statement.
    pub fn finish(next: Option<StmtId>) -> Self {
        Self {
            kind: RtlStmtKind::Finish,
            lhs_name: String::new(),
            rhs: None,
            delay_expr: None,
            delay_stmt: None,
            next,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constructors_set_kinds() {
        let b = RtlStmt::blocking("q", RtlExpr::reference("d"), None);
        assert_eq!(b.kind, RtlStmtKind::BlockingAssign);
        assert_eq!(b.lhs_name, "q");
        assert!(b.rhs.is_some());

        let d = RtlStmt::delay(RtlExpr::literal("5"), Some(StmtId::from_raw(0)), None);
        assert_eq!(d.kind, RtlStmtKind::Delay);
        assert!(d.delay_expr.is_some());
        assert_eq!(d.delay_stmt, Some(StmtId::from_raw(0)));

        let f = RtlStmt::finish(None);
        assert_eq!(f.kind, RtlStmtKind::Finish);
        assert!(f.next.is_none());
    }
}
