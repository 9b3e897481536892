//! RTL expression trees.

use serde::{Deserialize, Serialize};

/// A unary operator in the RTL IR.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RtlUnaryOp {
    /// Unary plus (identity).
    Plus,
    /// Arithmetic negation.
    Minus,
    /// Logical NOT (reduction to 1 bit, then invert).
    LogicalNot,
    /// Bitwise NOT.
    BitNot,
}

/// A binary operator in the RTL IR.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RtlBinaryOp {
    /// Addition.
    Add,
    /// Subtraction.
    Sub,
    /// Multiplication.
    Mul,
    /// Division (division by zero yields 0).
    Div,
    /// Modulo (modulo by zero yields 0).
    Mod,
    /// Bitwise AND.
    And,
    /// Bitwise OR.
    Or,
    /// Bitwise XOR.
    Xor,
    /// Logical AND (1-bit result).
    LogicalAnd,
    /// Logical OR (1-bit result).
    LogicalOr,
    /// Equality (1-bit result).
    Eq,
    /// Inequality (1-bit result).
    Ne,
    /// Case equality; a synonym of `Eq` in this subset.
    CaseEq,
    /// Case inequality; a synonym of `Ne` in this subset.
    CaseNe,
    /// Less than (1-bit result).
    Lt,
    /// Greater than (1-bit result).
    Gt,
    /// Less than or equal (1-bit result).
    Le,
    /// Greater than or equal (1-bit result).
    Ge,
    /// Logical left shift.
    Shl,
    /// Logical right shift.
    Shr,
    /// Arithmetic left shift.
    Ashl,
    /// Arithmetic right shift.
    Ashr,
}

/// An RTL expression. Owns its sub-trees; deep copy is `Clone`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum RtlExpr {
    /// A reference to a signal by name. Evaluated at the signal's stored
    /// width; a missing signal reads as 1-bit X.
    Ref(String),
    /// A literal, kept as its source text (e.g. `4'b1010`, `42`).
    Const(String),
    /// A unary operation.
    Unary {
        /// The operator.
        op: RtlUnaryOp,
        /// The operand.
        operand: Box<RtlExpr>,
    },
    /// A binary operation.
    Binary {
        /// The operator.
        op: RtlBinaryOp,
        /// The left-hand side.
        lhs: Box<RtlExpr>,
        /// The right-hand side.
        rhs: Box<RtlExpr>,
    },
}

impl RtlExpr {
    /// Convenience constructor for a signal reference.
    pub fn reference(name: impl Into<String>) -> Self {
        RtlExpr::Ref(name.into())
    }

    /// Convenience constructor for a literal.
    pub fn literal(text: impl Into<String>) -> Self {
        RtlExpr::Const(text.into())
    }

    /// Convenience constructor for a unary operation.
    pub fn unary(op: RtlUnaryOp, operand: RtlExpr) -> Self {
        RtlExpr::Unary {
            op,
            operand: Box::new(operand),
        }
    }

    /// Convenience constructor for a binary operation.
    pub fn binary(op: RtlBinaryOp, lhs: RtlExpr, rhs: RtlExpr) -> Self {
        RtlExpr::Binary {
            op,
            lhs: Box::new(lhs),
            rhs: Box::new(rhs),
        }
    }

    /// Invokes `f` for every `Ref` name in this expression tree.
    pub fn for_each_ref(&self, f: &mut impl FnMut(&str)) {
        match self {
            RtlExpr::Ref(name) => f(name),
            RtlExpr::Const(_) => {}
            RtlExpr::Unary { operand, .. } => operand.for_each_ref(f),
            RtlExpr::Binary { lhs, rhs, .. } => {
                lhs.for_each_ref(f);
                rhs.for_each_ref(f);
            }
        }
    }
}
