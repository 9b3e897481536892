//! Processes: statement chains plus sensitivity.

use crate::arena::Arena;
use crate::ids::StmtId;
use crate::stmt::RtlStmt;
use serde::{Deserialize, Serialize};

/// The kind of a process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RtlProcessKind {
    /// An `always` process, re-entered by its sensitivity triggers (or
    /// free-running when the sensitivity list is empty).
    Always,
    /// An `initial` process, run once at time 0.
    Initial,
}

/// The kind of a sensitivity entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SensitivityKind {
    /// Re-enter on any value change.
    Level,
    /// Re-enter on a 0 → 1 transition of bit 0.
    Posedge,
    /// Re-enter on a 1 → 0 transition of bit 0.
    Negedge,
}

/// One sensitivity entry: a kind and a signal name.
///
/// The signal name `"*"` on a `Level` entry means "infer the watch set from
/// the identifiers referenced by the process body".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RtlSensitivity {
    /// The trigger kind.
    pub kind: SensitivityKind,
    /// The watched signal name, or `"*"` for inference.
    pub signal: String,
}

impl RtlSensitivity {
    /// A level trigger on the named signal.
    pub fn level(signal: impl Into<String>) -> Self {
        Self {
            kind: SensitivityKind::Level,
            signal: signal.into(),
        }
    }

    /// A posedge trigger on the named signal.
    pub fn posedge(signal: impl Into<String>) -> Self {
        Self {
            kind: SensitivityKind::Posedge,
            signal: signal.into(),
        }
    }

    /// A negedge trigger on the named signal.
    pub fn negedge(signal: impl Into<String>) -> Self {
        Self {
            kind: SensitivityKind::Negedge,
            signal: signal.into(),
        }
    }

    /// The synthetic `Level("*")` entry denoting RHS-inferred sensitivity.
    pub fn star() -> Self {
        Self::level("*")
    }

    /// Returns `true` if this is the synthetic inference entry.
    pub fn is_star(&self) -> bool {
        self.kind == SensitivityKind::Level && self.signal == "*"
    }
}

/// A procedural process: an owned statement arena, an entry point, and a
/// sensitivity list.
///
/// Statement IDs are meaningful only relative to this process's `stmts`
/// arena and remain stable for the process's lifetime. `Clone` deep-copies
/// the arena; the copied chain has identical structure under the same IDs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RtlProcess {
    /// The process kind.
    pub kind: RtlProcessKind,
    /// The sensitivity list; empty for `initial` processes and for
    /// free-running `always` blocks.
    pub sensitivity: Vec<RtlSensitivity>,
    /// The statement arena owned by this process.
    pub stmts: Arena<StmtId, RtlStmt>,
    /// The first statement of the chain, if the body lowered to anything.
    pub first_stmt: Option<StmtId>,
}

impl RtlProcess {
    /// Creates an empty process of the given kind.
    pub fn new(kind: RtlProcessKind) -> Self {
        Self {
            kind,
            sensitivity: Vec::new(),
            stmts: Arena::new(),
            first_stmt: None,
        }
    }

    /// Walks the chain from `first_stmt` through `next` links, yielding
    /// each statement ID in execution order (delay continuations included
    /// where they are the linear successor).
    pub fn walk_chain(&self) -> ChainWalker<'_> {
        ChainWalker {
            process: self,
            cur: self.first_stmt,
        }
    }
}

/// Iterator over a process's statement chain via `next` links.
pub struct ChainWalker<'a> {
    process: &'a RtlProcess,
    cur: Option<StmtId>,
}

impl<'a> Iterator for ChainWalker<'a> {
    type Item = (StmtId, &'a RtlStmt);

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.cur?;
        let stmt = self.process.stmts.get(id);
        self.cur = stmt.next;
        Some((id, stmt))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::expr::RtlExpr;

    fn two_stmt_process() -> RtlProcess {
        let mut p = RtlProcess::new(RtlProcessKind::Initial);
        let second = p.stmts.alloc(RtlStmt::blocking("b", RtlExpr::literal("2"), None));
        let first = p
            .stmts
            .alloc(RtlStmt::blocking("a", RtlExpr::literal("1"), Some(second)));
        p.first_stmt = Some(first);
        p
    }

    #[test]
    fn chain_walk_visits_in_order_and_terminates() {
        let p = two_stmt_process();
        let names: Vec<_> = p.walk_chain().map(|(_, s)| s.lhs_name.clone()).collect();
        assert_eq!(names, vec!["a", "b"]);
    }

    #[test]
    fn chain_walk_visits_each_stmt_at_most_once() {
        let p = two_stmt_process();
        let mut seen = std::collections::HashSet::new();
        for (id, _) in p.walk_chain() {
            assert!(seen.insert(id), "statement visited twice");
        }
        assert_eq!(seen.len(), 2);
    }

    #[test]
    fn deep_copy_has_analogous_structure() {
        let p = two_stmt_process();
        let copy = p.clone();
        let orig: Vec<_> = p.walk_chain().map(|(id, s)| (id, s.lhs_name.clone())).collect();
        let dup: Vec<_> = copy
            .walk_chain()
            .map(|(id, s)| (id, s.lhs_name.clone()))
            .collect();
        assert_eq!(orig, dup);
    }

    #[test]
    fn star_sensitivity() {
        assert!(RtlSensitivity::star().is_star());
        assert!(!RtlSensitivity::level("clk").is_star());
        assert!(!RtlSensitivity::posedge("*").is_star());
    }

    #[test]
    fn empty_process_walks_nothing() {
        let p = RtlProcess::new(RtlProcessKind::Always);
        assert_eq!(p.walk_chain().count(), 0);
    }
}
