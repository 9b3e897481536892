//! Expression lowering.

use tempo_ast::{BinaryOp, Expr, UnaryOp};
use tempo_ir::{RtlBinaryOp, RtlExpr, RtlUnaryOp};

/// Lowers an AST expression to an [`RtlExpr`].
///
/// Operators map one-to-one. A ternary `c ? t : f` lowers to the
/// bit-parallel `(c & t) | (~c & f)`. Concatenations, replications, and
/// string literals lower to a constant `0` placeholder. A bit-select
/// rvalue reduces to a reference to its base identifier (bit-slice
/// semantics are lost in this subset).
pub fn lower_expr(e: &Expr) -> RtlExpr {
    match e {
        Expr::Identifier { name, .. } => RtlExpr::reference(name.clone()),
        Expr::Number { literal, .. } => RtlExpr::literal(literal.clone()),
        Expr::Unary { op, operand, .. } => RtlExpr::unary(lower_unary_op(*op), lower_expr(operand)),
        Expr::Binary { op, lhs, rhs, .. } => {
            RtlExpr::binary(lower_binary_op(*op), lower_expr(lhs), lower_expr(rhs))
        }
        Expr::Ternary {
            cond,
            then_expr,
            else_expr,
            ..
        } => {
            let c = lower_expr(cond);
            let t = lower_expr(then_expr);
            let f = lower_expr(else_expr);
            RtlExpr::binary(
                RtlBinaryOp::Or,
                RtlExpr::binary(RtlBinaryOp::And, c.clone(), t),
                RtlExpr::binary(
                    RtlBinaryOp::And,
                    RtlExpr::unary(RtlUnaryOp::BitNot, c),
                    f,
                ),
            )
        }
        Expr::BitSelect { base, .. } => match base.as_ref() {
            Expr::Identifier { name, .. } => RtlExpr::reference(name.clone()),
            _ => RtlExpr::literal("0"),
        },
        Expr::StringLit { .. } | Expr::Concat { .. } | Expr::Replication { .. } => {
            RtlExpr::literal("0")
        }
    }
}

/// Reduces an assignment target to its base signal name: an identifier, or
/// the base of a bit-select (`r[i] = ...` drives `r`). Anything else
/// reduces to a `"<expr>"` placeholder.
pub fn lvalue_base_name(lhs: &Expr) -> String {
    match lhs {
        Expr::Identifier { name, .. } => name.clone(),
        Expr::BitSelect { base, .. } => match base.as_ref() {
            Expr::Identifier { name, .. } => name.clone(),
            _ => "<expr>".into(),
        },
        _ => "<expr>".into(),
    }
}

fn lower_unary_op(op: UnaryOp) -> RtlUnaryOp {
    match op {
        UnaryOp::Plus => RtlUnaryOp::Plus,
        UnaryOp::Minus => RtlUnaryOp::Minus,
        UnaryOp::LogicalNot => RtlUnaryOp::LogicalNot,
        UnaryOp::BitNot => RtlUnaryOp::BitNot,
    }
}

fn lower_binary_op(op: BinaryOp) -> RtlBinaryOp {
    match op {
        BinaryOp::Add => RtlBinaryOp::Add,
        BinaryOp::Sub => RtlBinaryOp::Sub,
        BinaryOp::Mul => RtlBinaryOp::Mul,
        BinaryOp::Div => RtlBinaryOp::Div,
        BinaryOp::Mod => RtlBinaryOp::Mod,
        BinaryOp::BitAnd => RtlBinaryOp::And,
        BinaryOp::BitOr => RtlBinaryOp::Or,
        BinaryOp::BitXor => RtlBinaryOp::Xor,
        BinaryOp::LogicalAnd => RtlBinaryOp::LogicalAnd,
        BinaryOp::LogicalOr => RtlBinaryOp::LogicalOr,
        BinaryOp::Eq => RtlBinaryOp::Eq,
        BinaryOp::Ne => RtlBinaryOp::Ne,
        BinaryOp::CaseEq => RtlBinaryOp::CaseEq,
        BinaryOp::CaseNe => RtlBinaryOp::CaseNe,
        BinaryOp::Lt => RtlBinaryOp::Lt,
        BinaryOp::Gt => RtlBinaryOp::Gt,
        BinaryOp::Le => RtlBinaryOp::Le,
        BinaryOp::Ge => RtlBinaryOp::Ge,
        BinaryOp::Shl => RtlBinaryOp::Shl,
        BinaryOp::Shr => RtlBinaryOp::Shr,
        BinaryOp::Ashl => RtlBinaryOp::Ashl,
        BinaryOp::Ashr => RtlBinaryOp::Ashr,
    }
}
