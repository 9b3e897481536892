//! Modules, module items, processes, and instances.

use crate::decl::{ContinuousAssign, NetDecl, ParamDecl, PortDecl, VarDecl};
use crate::expr::Expr;
use crate::generate::{GenerateItem, GenvarDecl};
use crate::stmt::Statement;
use serde::{Deserialize, Serialize};
use tempo_source::Span;

/// The always-construct keyword variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AlwaysKind {
    /// `always`
    Always,
    /// `always_ff`
    AlwaysFf,
    /// `always_comb`
    AlwaysComb,
    /// `always_latch`
    AlwaysLatch,
}

/// One entry of a sensitivity list.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum SensitivityItem {
    /// `@*` or `@(*)` — infer sensitivity from the body.
    Star {
        /// Source span.
        span: Span,
    },
    /// `@(posedge expr)`.
    Posedge {
        /// The watched expression (an identifier in this subset).
        expr: Expr,
        /// Source span.
        span: Span,
    },
    /// `@(negedge expr)`.
    Negedge {
        /// The watched expression.
        expr: Expr,
        /// Source span.
        span: Span,
    },
    /// A level entry: `@(expr)` or one disjunct of `@(a or b)`.
    Level {
        /// The watched expression.
        expr: Expr,
        /// Source span.
        span: Span,
    },
}

/// An `always`/`always_ff`/`always_comb`/`always_latch` construct.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AlwaysConstruct {
    /// The keyword variant.
    pub kind: AlwaysKind,
    /// The sensitivity list; empty when no `@(...)` was written.
    pub sensitivity: Vec<SensitivityItem>,
    /// The body statement.
    pub body: Statement,
    /// Source span.
    pub span: Span,
}

/// An `initial` construct.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InitialConstruct {
    /// The body statement.
    pub body: Statement,
    /// Source span.
    pub span: Span,
}

/// A parameter override on an instance (`.NAME(expr)`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParamOverride {
    /// The overridden parameter name.
    pub name: String,
    /// The override value expression, evaluated in the instantiating
    /// module's parameter environment.
    pub value: Expr,
    /// Source span.
    pub span: Span,
}

/// A port connection on an instance (`.port(expr)`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PortConn {
    /// The port name; `None` for positional connections.
    pub port: Option<String>,
    /// The connected expression; `None` for explicitly open ports.
    pub expr: Option<Expr>,
    /// Source span.
    pub span: Span,
}

/// A named module instantiation (`Mod #(.P(8)) u0 (.clk(clk));`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Instance {
    /// The instantiated module's name.
    pub module_name: String,
    /// The instance name.
    pub instance_name: String,
    /// Parameter overrides, in source order.
    pub param_overrides: Vec<ParamOverride>,
    /// Port connections, in source order.
    pub port_conns: Vec<PortConn>,
    /// Source span.
    pub span: Span,
}

/// An item in a module body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum ModuleItem {
    /// A net declaration.
    NetDecl(NetDecl),
    /// A variable declaration.
    VarDecl(VarDecl),
    /// A parameter or localparam declaration.
    ParamDecl(ParamDecl),
    /// A continuous assignment.
    ContinuousAssign(ContinuousAssign),
    /// An always construct.
    Always(AlwaysConstruct),
    /// An initial construct.
    Initial(InitialConstruct),
    /// A module instantiation.
    Instance(Instance),
    /// A generate construct.
    Generate(GenerateItem),
    /// A genvar declaration.
    GenvarDecl(GenvarDecl),
}

/// A module declaration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModuleDecl {
    /// The module name.
    pub name: String,
    /// The header parameter list (`#(parameter N = 4, ...)`).
    pub params: Vec<ParamDecl>,
    /// The port list.
    pub ports: Vec<PortDecl>,
    /// The body items, in source order.
    pub items: Vec<ModuleItem>,
    /// Source span.
    pub span: Span,
}

/// The root of a parsed design: all modules from all source files.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Design {
    /// The modules, in source order.
    pub modules: Vec<ModuleDecl>,
}

impl Design {
    /// Finds a module by name.
    pub fn find_module(&self, name: &str) -> Option<&ModuleDecl> {
        self.modules.iter().find(|m| m.name == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn empty_module(name: &str) -> ModuleDecl {
        ModuleDecl {
            name: name.into(),
            params: vec![],
            ports: vec![],
            items: vec![],
            span: Span::DUMMY,
        }
    }

    #[test]
    fn find_module() {
        let design = Design {
            modules: vec![empty_module("top"), empty_module("ff")],
        };
        assert!(design.find_module("ff").is_some());
        assert!(design.find_module("missing").is_none());
    }

    #[test]
    fn always_with_sensitivity() {
        let a = AlwaysConstruct {
            kind: AlwaysKind::Always,
            sensitivity: vec![SensitivityItem::Posedge {
                expr: Expr::ident("clk"),
                span: Span::DUMMY,
            }],
            body: Statement::Null { span: Span::DUMMY },
            span: Span::DUMMY,
        };
        assert_eq!(a.sensitivity.len(), 1);
    }

    #[test]
    fn serde_roundtrip() {
        let design = Design {
            modules: vec![empty_module("top")],
        };
        let json = serde_json::to_string(&design).unwrap();
        let back: Design = serde_json::from_str(&json).unwrap();
        assert_eq!(back.modules.len(), 1);
        assert_eq!(back.modules[0].name, "top");
    }
}
