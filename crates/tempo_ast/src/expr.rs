//! Expression nodes.

use serde::{Deserialize, Serialize};
use tempo_source::Span;

/// A unary operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UnaryOp {
    /// Unary plus (`+`).
    Plus,
    /// Arithmetic negation (`-`).
    Minus,
    /// Logical NOT (`!`).
    LogicalNot,
    /// Bitwise NOT (`~`).
    BitNot,
}

/// A binary operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BinaryOp {
    /// Addition (`+`).
    Add,
    /// Subtraction (`-`).
    Sub,
    /// Multiplication (`*`).
    Mul,
    /// Division (`/`).
    Div,
    /// Modulo (`%`).
    Mod,
    /// Bitwise AND (`&`).
    BitAnd,
    /// Bitwise OR (`|`).
    BitOr,
    /// Bitwise XOR (`^`).
    BitXor,
    /// Logical AND (`&&`).
    LogicalAnd,
    /// Logical OR (`||`).
    LogicalOr,
    /// Equality (`==`).
    Eq,
    /// Inequality (`!=`).
    Ne,
    /// Case equality (`===`).
    CaseEq,
    /// Case inequality (`!==`).
    CaseNe,
    /// Less than (`<`).
    Lt,
    /// Greater than (`>`).
    Gt,
    /// Less than or equal (`<=`).
    Le,
    /// Greater than or equal (`>=`).
    Ge,
    /// Logical left shift (`<<`).
    Shl,
    /// Logical right shift (`>>`).
    Shr,
    /// Arithmetic left shift (`<<<`).
    Ashl,
    /// Arithmetic right shift (`>>>`).
    Ashr,
}

/// An expression.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Expr {
    /// An identifier reference.
    Identifier {
        /// The referenced name.
        name: String,
        /// Source span.
        span: Span,
    },
    /// A numeric literal, kept as its source text (e.g. `4'b1010`, `42`).
    Number {
        /// The literal text.
        literal: String,
        /// Source span.
        span: Span,
    },
    /// A string literal.
    StringLit {
        /// The string contents, without quotes.
        value: String,
        /// Source span.
        span: Span,
    },
    /// A unary operation.
    Unary {
        /// The operator.
        op: UnaryOp,
        /// The operand.
        operand: Box<Expr>,
        /// Source span.
        span: Span,
    },
    /// A binary operation.
    Binary {
        /// The operator.
        op: BinaryOp,
        /// The left-hand side.
        lhs: Box<Expr>,
        /// The right-hand side.
        rhs: Box<Expr>,
        /// Source span.
        span: Span,
    },
    /// A ternary/conditional expression (`cond ? t : f`).
    Ternary {
        /// The condition.
        cond: Box<Expr>,
        /// The value when the condition is nonzero.
        then_expr: Box<Expr>,
        /// The value otherwise.
        else_expr: Box<Expr>,
        /// Source span.
        span: Span,
    },
    /// A concatenation (`{a, b, c}`).
    Concat {
        /// The concatenated elements, MSB-first.
        elems: Vec<Expr>,
        /// Source span.
        span: Span,
    },
    /// A replication (`{N{a, b}}`).
    Replication {
        /// The repetition count.
        count: Box<Expr>,
        /// The replicated elements.
        elems: Vec<Expr>,
        /// Source span.
        span: Span,
    },
    /// A bit select (`base[index]`).
    BitSelect {
        /// The indexed expression.
        base: Box<Expr>,
        /// The index expression.
        index: Box<Expr>,
        /// Source span.
        span: Span,
    },
}

impl Expr {
    /// Convenience constructor for an identifier with a dummy span.
    pub fn ident(name: impl Into<String>) -> Self {
        Expr::Identifier {
            name: name.into(),
            span: Span::DUMMY,
        }
    }

    /// Convenience constructor for a number literal with a dummy span.
    pub fn number(literal: impl Into<String>) -> Self {
        Expr::Number {
            literal: literal.into(),
            span: Span::DUMMY,
        }
    }

    /// Returns the source span of this expression.
    pub fn span(&self) -> Span {
        match self {
            Expr::Identifier { span, .. }
            | Expr::Number { span, .. }
            | Expr::StringLit { span, .. }
            | Expr::Unary { span, .. }
            | Expr::Binary { span, .. }
            | Expr::Ternary { span, .. }
            | Expr::Concat { span, .. }
            | Expr::Replication { span, .. }
            | Expr::BitSelect { span, .. } => *span,
        }
    }
}
