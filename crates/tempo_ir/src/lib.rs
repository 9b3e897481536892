//! The RTL intermediate representation of the Tempo simulator.
//!
//! The IR sits between elaboration and the event-driven kernel: a
//! [`RtlDesign`] of [`RtlModule`]s holding nets, continuous assigns,
//! gate primitives, sub-instances, and [`RtlProcess`]es whose bodies are
//! linked statement chains.
//!
//! # Reference stability
//!
//! Statement chains are stored in a per-process [`Arena`] and linked with
//! [`StmtId`] indices (`next`, `delay_stmt`). Indices are meaningful only
//! relative to their owning process's arena, are stable from IR-build
//! completion until the design is dropped, and survive `Clone` — a deep
//! copy of a process carries the same indices over the copied arena.

#![warn(missing_docs)]

pub mod arena;
pub mod design;
pub mod expr;
pub mod ids;
pub mod module;
pub mod process;
pub mod stmt;

pub use arena::{Arena, ArenaId};
pub use design::RtlDesign;
pub use expr::{RtlBinaryOp, RtlExpr, RtlUnaryOp};
pub use ids::StmtId;
pub use module::{
    RtlAssign, RtlAssignKind, RtlGate, RtlGateKind, RtlInstance, RtlModule, RtlNet, RtlParam,
    RtlPortConn,
};
pub use process::{RtlProcess, RtlProcessKind, RtlSensitivity, SensitivityKind};
pub use stmt::{RtlStmt, RtlStmtKind};
