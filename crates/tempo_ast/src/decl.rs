//! Declarations: datatypes, ports, nets, variables, parameters.

use crate::expr::Expr;
use serde::{Deserialize, Serialize};
use tempo_source::Span;

/// A datatype keyword.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DataTypeKind {
    /// `logic` — 4-state variable type.
    Logic,
    /// `wire` — 4-state net type.
    Wire,
    /// `reg` — Verilog-2005 variable type.
    Reg,
    /// `integer` — 32-bit 4-state variable.
    Integer,
}

/// A declared datatype: a keyword with an optional packed range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataType {
    /// The datatype keyword.
    pub kind: DataTypeKind,
    /// The packed `[msb:lsb]` range, if any.
    pub packed_range: Option<(i32, i32)>,
}

impl DataType {
    /// A scalar (1-bit) datatype of the given kind.
    pub fn scalar(kind: DataTypeKind) -> Self {
        Self {
            kind,
            packed_range: None,
        }
    }

    /// A packed vector datatype `kind [msb:lsb]`.
    pub fn packed(kind: DataTypeKind, msb: i32, lsb: i32) -> Self {
        Self {
            kind,
            packed_range: Some((msb, lsb)),
        }
    }

    /// Returns the bit width of this datatype: the packed range size if
    /// present, 32 for `integer`, otherwise 1.
    pub fn bit_width(&self) -> u32 {
        match self.packed_range {
            Some((msb, lsb)) => msb.abs_diff(lsb) + 1,
            None if self.kind == DataTypeKind::Integer => 32,
            None => 1,
        }
    }
}

/// A port direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    /// `input`
    Input,
    /// `output`
    Output,
    /// `inout`
    Inout,
}

/// A port declaration in a module header.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PortDecl {
    /// The port direction.
    pub direction: Direction,
    /// The port datatype.
    pub ty: DataType,
    /// The port name.
    pub name: String,
    /// Source span.
    pub span: Span,
}

/// A net declaration (`wire [3:0] w;`), with an optional initializer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NetDecl {
    /// The net datatype.
    pub ty: DataType,
    /// The net name.
    pub name: String,
    /// The optional declaration initializer.
    pub init: Option<Expr>,
    /// Source span.
    pub span: Span,
}

/// A variable declaration (`logic [7:0] q = 0;`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VarDecl {
    /// The variable datatype.
    pub ty: DataType,
    /// The variable name.
    pub name: String,
    /// The optional declaration initializer.
    pub init: Option<Expr>,
    /// Source span.
    pub span: Span,
}

/// A `parameter` or `localparam` declaration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParamDecl {
    /// Whether this is a `localparam`.
    pub local: bool,
    /// The parameter name.
    pub name: String,
    /// The default value expression.
    pub value: Expr,
    /// Source span.
    pub span: Span,
}

/// A continuous assignment (`assign lhs = rhs;`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContinuousAssign {
    /// The assignment target.
    pub lhs: Expr,
    /// The driven expression.
    pub rhs: Expr,
    /// Source span.
    pub span: Span,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scalar_width_is_one() {
        assert_eq!(DataType::scalar(DataTypeKind::Wire).bit_width(), 1);
        assert_eq!(DataType::scalar(DataTypeKind::Logic).bit_width(), 1);
    }

    #[test]
    fn packed_width() {
        assert_eq!(DataType::packed(DataTypeKind::Logic, 7, 0).bit_width(), 8);
        assert_eq!(DataType::packed(DataTypeKind::Reg, 3, 0).bit_width(), 4);
        // Reversed ranges are accepted.
        assert_eq!(DataType::packed(DataTypeKind::Wire, 0, 7).bit_width(), 8);
    }

    #[test]
    fn integer_is_32_bits() {
        assert_eq!(DataType::scalar(DataTypeKind::Integer).bit_width(), 32);
    }

    #[test]
    fn param_decl_roundtrip() {
        let p = ParamDecl {
            local: false,
            name: "WIDTH".into(),
            value: Expr::number("8"),
            span: Span::DUMMY,
        };
        let json = serde_json::to_string(&p).unwrap();
        let back: ParamDecl = serde_json::from_str(&json).unwrap();
        assert_eq!(back.name, "WIDTH");
        assert!(!back.local);
    }
}
