//! AST node types for the SystemVerilog subset accepted by Tempo.
//!
//! This crate is the contract surface between the (external) parser and the
//! elaborator: the parser is assumed to yield a well-formed tree of these
//! nodes. Every node carries a `tempo_source::Span`.
//!
//! The subset covers modules with parameter and port lists, net/var/param
//! declarations, continuous assigns, always/initial constructs, named
//! instances with parameter overrides, and generate constructs with
//! genvars. See the `expr`, `stmt`, `decl`, `generate`, and `module`
//! modules for the node categories.

#![warn(missing_docs)]

pub mod decl;
pub mod expr;
pub mod generate;
pub mod module;
pub mod stmt;

pub use decl::{
    ContinuousAssign, DataType, DataTypeKind, Direction, NetDecl, ParamDecl, PortDecl, VarDecl,
};
pub use expr::{BinaryOp, Expr, UnaryOp};
pub use generate::{GenerateCaseArm, GenerateFor, GenerateItem, GenvarDecl};
pub use module::{
    AlwaysConstruct, AlwaysKind, Design, InitialConstruct, Instance, ModuleDecl, ModuleItem,
    ParamOverride, PortConn, SensitivityItem,
};
pub use stmt::{CaseItem, CaseKind, Statement};
