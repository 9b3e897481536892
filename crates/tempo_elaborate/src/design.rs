//! Elaborated module descriptions.

use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::collections::HashMap;
use tempo_ast::{DataType, ModuleItem};

/// A resolved parameter: its name, stringified value, and integer value
/// when the expression was constant-evaluable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ElabParam {
    /// The parameter name.
    pub name: String,
    /// The stringified value: integers as decimal, else `"<expr>"`.
    pub value_str: String,
    /// The integer value, when known.
    pub int_value: Option<i64>,
}

impl ElabParam {
    /// A parameter with a known integer value.
    pub fn from_int(name: impl Into<String>, value: i64) -> Self {
        Self {
            name: name.into(),
            value_str: value.to_string(),
            int_value: Some(value),
        }
    }

    /// A parameter whose value could not be evaluated.
    pub fn opaque(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value_str: "<expr>".into(),
            int_value: None,
        }
    }
}

/// An elaborated net or variable record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ElabNet {
    /// The net name.
    pub name: String,
    /// The declared datatype.
    pub ty: DataType,
}

/// One port→signal binding on an instance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ElabPortConn {
    /// The port name (empty for positional connections).
    pub port: String,
    /// The connected signal name (empty for non-identifier connections).
    pub signal: String,
}

/// An elaborated instance record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ElabInstance {
    /// The instantiated module's name.
    pub module_name: String,
    /// The instance name.
    pub instance_name: String,
    /// The instance's parameters: the target module's defaults with
    /// `.NAME(expr)` overrides applied, in the target's declaration order.
    pub params: Vec<ElabParam>,
    /// Port→signal bindings, in source order.
    pub port_conns: Vec<ElabPortConn>,
}

/// One elaborated module.
///
/// `flat_items` is the module's item sequence with every generate construct
/// expanded in place: unchanged items are borrowed from the AST, items
/// cloned during generate-for unrolling are owned here (the elaborated
/// design owns the clones; nothing outlives it).
#[derive(Debug, Clone)]
pub struct ElabModule<'ast> {
    /// The module name.
    pub name: String,
    /// The module's own parameters, in declaration order.
    pub params: Vec<ElabParam>,
    /// Nets and variables collected from the flat item list.
    pub nets: Vec<ElabNet>,
    /// Instances collected from the flat item list.
    pub instances: Vec<ElabInstance>,
    /// The flat item list: generates expanded, everything else in source
    /// order.
    pub flat_items: Vec<Cow<'ast, ModuleItem>>,
}

/// The result of elaboration: one [`ElabModule`] per source module.
#[derive(Debug, Clone, Default)]
pub struct ElaboratedDesign<'ast> {
    /// Elaborated modules, keyed by module name.
    pub modules: HashMap<String, ElabModule<'ast>>,
}

impl<'ast> ElaboratedDesign<'ast> {
    /// Looks up an elaborated module by name.
    pub fn module(&self, name: &str) -> Option<&ElabModule<'ast>> {
        self.modules.get(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn param_constructors() {
        let p = ElabParam::from_int("W", 8);
        assert_eq!(p.value_str, "8");
        assert_eq!(p.int_value, Some(8));

        let q = ElabParam::opaque("DEPTH");
        assert_eq!(q.value_str, "<expr>");
        assert_eq!(q.int_value, None);
    }

    #[test]
    fn serde_roundtrip_instance() {
        let inst = ElabInstance {
            module_name: "ff".into(),
            instance_name: "u0".into(),
            params: vec![ElabParam::from_int("W", 8)],
            port_conns: vec![ElabPortConn {
                port: "clk".into(),
                signal: "clk".into(),
            }],
        };
        let json = serde_json::to_string(&inst).unwrap();
        let back: ElabInstance = serde_json::from_str(&json).unwrap();
        assert_eq!(back, inst);
    }
}
