//! RTL modules and their contents: params, nets, assigns, gates, instances.

use crate::expr::RtlExpr;
use crate::process::RtlProcess;
use serde::{Deserialize, Serialize};
use tempo_ast::DataType;

/// A resolved parameter on a module.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RtlParam {
    /// The parameter name.
    pub name: String,
    /// The stringified value: integers as decimal, else a placeholder.
    pub value_str: String,
}

/// A net or variable record: name plus declared datatype.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RtlNet {
    /// The net name.
    pub name: String,
    /// The declared datatype (determines the stored signal width).
    pub ty: DataType,
}

/// The kind of an assignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RtlAssignKind {
    /// A continuous `assign`, re-evaluated whenever an RHS input changes.
    Continuous,
    /// A blocking procedural assignment.
    Blocking,
    /// A non-blocking procedural assignment.
    NonBlocking,
}

/// An assignment: kind, target name, and driven expression.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RtlAssign {
    /// The assignment kind.
    pub kind: RtlAssignKind,
    /// The target signal name (bit-selects reduce to the base name).
    pub lhs_name: String,
    /// The driven expression.
    pub rhs: RtlExpr,
}

/// The kind of a gate primitive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RtlGateKind {
    /// AND gate.
    And,
    /// OR gate.
    Or,
    /// NOT gate (single input).
    Not,
    /// NAND gate.
    Nand,
    /// NOR gate.
    Nor,
    /// XOR gate.
    Xor,
    /// XNOR gate.
    Xnor,
    /// Buffer (single input).
    Buf,
}

/// A gate-level primitive: inputs reduce over bit 0, output is 1 bit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RtlGate {
    /// The gate kind.
    pub kind: RtlGateKind,
    /// The input signal names.
    pub inputs: Vec<String>,
    /// The output signal name.
    pub output: String,
}

/// A port connection on an instance: port name → signal name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RtlPortConn {
    /// The port name on the instantiated module.
    pub port_name: String,
    /// The connected signal name in the parent (identifier connections
    /// only in this subset).
    pub signal_name: String,
}

/// A sub-instance of another module.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RtlInstance {
    /// The instantiated module's name.
    pub module_name: String,
    /// The instance name.
    pub instance_name: String,
    /// Port→signal bindings, in source order.
    pub conns: Vec<RtlPortConn>,
}

/// One lowered module.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RtlModule {
    /// The module name.
    pub name: String,
    /// Resolved parameters.
    pub params: Vec<RtlParam>,
    /// Nets and variables.
    pub nets: Vec<RtlNet>,
    /// Continuous assignments.
    pub continuous_assigns: Vec<RtlAssign>,
    /// Procedural processes.
    pub processes: Vec<RtlProcess>,
    /// Gate-level primitives.
    pub gates: Vec<RtlGate>,
    /// Sub-instances.
    pub instances: Vec<RtlInstance>,
}

impl RtlModule {
    /// Creates an empty module with the given name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            params: Vec::new(),
            nets: Vec::new(),
            continuous_assigns: Vec::new(),
            processes: Vec::new(),
            gates: Vec::new(),
            instances: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempo_ast::DataTypeKind;

    #[test]
    fn empty_module() {
        let m = RtlModule::new("top");
        assert_eq!(m.name, "top");
        assert!(m.nets.is_empty());
        assert!(m.processes.is_empty());
    }

    #[test]
    fn net_width_comes_from_datatype() {
        let n = RtlNet {
            name: "data".into(),
            ty: DataType::packed(DataTypeKind::Logic, 7, 0),
        };
        assert_eq!(n.ty.bit_width(), 8);
    }

    #[test]
    fn serde_roundtrip() {
        let mut m = RtlModule::new("top");
        m.nets.push(RtlNet {
            name: "clk".into(),
            ty: DataType::scalar(DataTypeKind::Wire),
        });
        m.continuous_assigns.push(RtlAssign {
            kind: RtlAssignKind::Continuous,
            lhs_name: "y".into(),
            rhs: RtlExpr::reference("clk"),
        });
        let json = serde_json::to_string(&m).unwrap();
        let back: RtlModule = serde_json::from_str(&json).unwrap();
        assert_eq!(back.nets.len(), 1);
        assert_eq!(back.continuous_assigns[0].lhs_name, "y");
    }
}
